use anyhow::{anyhow, Context, Result};
use clap::{Arg, ArgAction, Command};
use std::path::Path;
use tracing::info;

use docscan::{
    config::Config,
    context::context_window,
    correction::CorrectionClient,
    ocr::OcrClient,
    pipeline::ScanPipeline,
    upload::UploadGate,
};

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("docscan=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let matches = Command::new("docscan-cli")
        .about("Extract text from a document with remote OCR and optional correction")
        .arg(
            Arg::new("file")
                .help("Document or image to scan")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("no-correct")
                .help("Print raw OCR output without language-model correction")
                .long("no-correct")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("line")
                .help("Only print the lines around this zero-based line index")
                .long("line")
                .short('l')
                .value_name("INDEX")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("window")
                .help("Number of lines to include on each side of --line")
                .long("window")
                .short('w')
                .value_name("N")
                .default_value("2")
                .value_parser(clap::value_parser!(usize)),
        )
        .get_matches();

    let config = Config::from_env()?;

    let file_arg = matches
        .get_one::<String>("file")
        .ok_or_else(|| anyhow!("missing file argument"))?;
    let path = Path::new(file_arg);

    let data = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;

    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let content_type = mime_guess::from_path(path).first_or_octet_stream();

    let metadata = UploadGate::new(config.max_file_size_mb)
        .validate(&filename, Some(content_type.essence_str()), &data)?;
    info!("Scanning {} ({} KB)", metadata.filename, metadata.size_kb);

    let correction = if matches.get_flag("no-correct") {
        None
    } else {
        Some(CorrectionClient::from_config(&config)?)
    };
    let pipeline = ScanPipeline::new(OcrClient::from_config(&config), correction);

    let text = pipeline.extract(&data).await?;

    match matches.get_one::<usize>("line") {
        Some(&index) => {
            let window = matches.get_one::<usize>("window").copied().unwrap_or(2);
            let lines: Vec<&str> = text.lines().collect();
            let ctx = context_window(&lines, index, window).ok_or_else(|| {
                anyhow!("line {} is out of range ({} lines extracted)", index, lines.len())
            })?;
            println!("# lines {}-{}", ctx.start, ctx.end);
            println!("{}", ctx.text);
        }
        None => println!("{}", text),
    }

    Ok(())
}
