//! Error type for `faqbot-store-memory`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] faqbot_core::Error),
}

impl Error {
  pub(crate) fn not_found(id: uuid::Uuid) -> Self {
    Error::Core(faqbot_core::Error::SessionNotFound(id))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
