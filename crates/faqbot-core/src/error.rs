//! Error types for `faqbot-core`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("session not found: {0}")]
  SessionNotFound(Uuid),

  #[error("no FAQ at index {index} (have {len})")]
  IndexOutOfRange { index: usize, len: usize },

  #[error("{0} must not be empty")]
  EmptyField(&'static str),

  #[error("{questions} questions but {answers} answers")]
  LengthMismatch { questions: usize, answers: usize },

  #[error("unknown template: {0:?}")]
  UnknownTemplate(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
