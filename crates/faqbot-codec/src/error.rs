//! Error types for the faqbot-codec crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error(
    "CSV must contain 'question' and 'answer' columns (missing: {})",
    .0.join(", ")
  )]
  MissingColumns(Vec<&'static str>),

  #[error("CSV error: {0}")]
  Csv(#[from] csv::Error),

  #[error("JSON error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("output is not valid UTF-8: {0}")]
  Utf8(#[from] std::string::FromUtf8Error),

  #[error("failed to flush CSV writer: {0}")]
  Flush(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
