pub mod client;
pub mod error;

pub use client::{truncate_chars, CorrectionClient, SYSTEM_PROMPT};
pub use error::CorrectionError;
