pub mod client;
pub mod error;

pub use client::OcrClient;
pub use error::OcrError;
