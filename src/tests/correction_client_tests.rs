#[cfg(test)]
mod tests {
    use crate::correction::{CorrectionClient, CorrectionError, SYSTEM_PROMPT};
    use serde_json::{json, Value};
    use std::time::Duration;
    use wiremock::{
        matchers::{body_partial_json, header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    const CHAT_PATH: &str = "/v1/chat/completions";

    fn client_for(server: &MockServer, api_key: Option<&str>) -> CorrectionClient {
        CorrectionClient::new(
            format!("{}{}", server.uri(), CHAT_PATH),
            api_key.map(str::to_string),
            Duration::from_secs(5),
            8000,
        )
        .unwrap()
    }

    fn completion(content: Value) -> Value {
        json!({
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": content}}
            ]
        })
    }

    #[tokio::test]
    async fn test_no_api_key_returns_input_unchanged() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(json!("changed"))))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server, None);
        let input = "  Em4il: hong@examp1e.com \n";

        assert_eq!(client.correct(input).await, input);
        assert_eq!(client.try_correct(input).await.unwrap_err(), CorrectionError::MissingApiKey);
    }

    #[tokio::test]
    async fn test_successful_correction_is_trimmed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(CHAT_PATH))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(json!({
                "model": "solar-1-mini-chat",
                "messages": [
                    {"role": "system", "content": SYSTEM_PROMPT},
                    {"role": "user", "content": "전화 O1O-l234-S678"}
                ]
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion(json!("\n 전화 010-1234-5678 \n"))),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, Some("test-key"));
        assert_eq!(client.correct("전화 O1O-l234-S678").await, "전화 010-1234-5678");
    }

    #[tokio::test]
    async fn test_custom_model_is_sent() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"model": "solar-pro"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(json!("fixed"))))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, Some("test-key")).with_model("solar-pro");
        assert_eq!(client.correct("flxed").await, "fixed");
    }

    #[tokio::test]
    async fn test_empty_completion_falls_back_to_input() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(json!("   \n\t "))))
            .mount(&server)
            .await;

        let client = client_for(&server, Some("test-key"));
        assert_eq!(client.try_correct("original").await.unwrap_err(), CorrectionError::EmptyCompletion);
        assert_eq!(client.correct("original").await, "original");
    }

    #[tokio::test]
    async fn test_null_content_falls_back_to_input() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(Value::Null)))
            .mount(&server)
            .await;

        let client = client_for(&server, Some("test-key"));
        assert_eq!(client.correct("original").await, "original");
    }

    #[tokio::test]
    async fn test_error_status_falls_back_to_input() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_json(json!({"error": "rate limited"})))
            .mount(&server)
            .await;

        let client = client_for(&server, Some("test-key"));
        assert_eq!(
            client.try_correct("original").await.unwrap_err(),
            CorrectionError::UpstreamStatus { status: 429 }
        );
        assert_eq!(client.correct("original").await, "original");
    }

    #[tokio::test]
    async fn test_malformed_response_falls_back_to_input() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": "no choices key"})))
            .mount(&server)
            .await;

        let client = client_for(&server, Some("test-key"));
        assert!(matches!(
            client.try_correct("original").await.unwrap_err(),
            CorrectionError::InvalidResponse { .. }
        ));
        assert_eq!(client.correct("original").await, "original");
    }

    #[tokio::test]
    async fn test_empty_choices_falls_back_to_input() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let client = client_for(&server, Some("test-key"));
        assert!(matches!(
            client.try_correct("original").await.unwrap_err(),
            CorrectionError::InvalidResponse { .. }
        ));
        assert_eq!(client.correct("original").await, "original");
    }

    #[tokio::test]
    async fn test_timeout_falls_back_to_input() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion(json!("too late")))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let client = CorrectionClient::new(
            format!("{}{}", server.uri(), CHAT_PATH),
            Some("test-key".to_string()),
            Duration::from_millis(200),
            8000,
        )
        .unwrap();

        assert_eq!(client.try_correct("original").await.unwrap_err(), CorrectionError::Timeout);
        assert_eq!(client.correct("original").await, "original");
    }

    #[tokio::test]
    async fn test_transport_failure_falls_back_to_input() {
        let client = CorrectionClient::new(
            "http://127.0.0.1:1/chat",
            Some("test-key".to_string()),
            Duration::from_secs(5),
            8000,
        )
        .unwrap();

        assert!(matches!(
            client.try_correct("original").await.unwrap_err(),
            CorrectionError::Request { .. }
        ));
        assert_eq!(client.correct("original").await, "original");
    }

    #[tokio::test]
    async fn test_long_input_is_truncated_before_sending() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(json!("short"))))
            .expect(1)
            .mount(&server)
            .await;

        let client = CorrectionClient::new(
            format!("{}{}", server.uri(), CHAT_PATH),
            Some("test-key".to_string()),
            Duration::from_secs(5),
            10,
        )
        .unwrap();

        let input = "가".repeat(25);
        assert_eq!(client.correct(&input).await, "short");

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body["messages"][1]["content"], "가".repeat(10));
        assert_eq!(body["messages"][0]["role"], "system");
    }

    #[tokio::test]
    async fn test_empty_completion_returns_untruncated_input() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(json!(""))))
            .mount(&server)
            .await;

        let client = CorrectionClient::new(
            format!("{}{}", server.uri(), CHAT_PATH),
            Some("test-key".to_string()),
            Duration::from_secs(5),
            4,
        )
        .unwrap();

        let input = "abcdefghij";
        assert_eq!(client.correct(input).await, input);
    }
}
