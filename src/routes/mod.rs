use axum::{routing::post, Router};
use std::sync::Arc;

use crate::AppState;

pub mod scan;

pub use scan::*;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/scan", post(scan))
}
