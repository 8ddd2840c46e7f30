//! API error type and [`axum::response::IntoResponse`] implementation.

use std::error::Error as StdError;

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn StdError + Send + Sync>),
}

impl ApiError {
  /// Classify a backend error by the [`faqbot_core::Error`] in its source
  /// chain, if there is one.
  pub fn from_store<E>(e: E) -> Self
  where
    E: StdError + Send + Sync + 'static,
  {
    let mapped = find_core(&e).map(|core| {
      use faqbot_core::Error as Core;
      match core {
        Core::SessionNotFound(_)
        | Core::IndexOutOfRange { .. }
        | Core::UnknownTemplate(_) => ApiError::NotFound(core.to_string()),
        Core::EmptyField(_) | Core::LengthMismatch { .. } => {
          ApiError::BadRequest(core.to_string())
        }
      }
    });
    mapped.unwrap_or_else(|| ApiError::Store(Box::new(e)))
  }
}

fn find_core<'a>(
  e: &'a (dyn StdError + 'static),
) -> Option<&'a faqbot_core::Error> {
  let mut current = Some(e);
  while let Some(err) = current {
    if let Some(core) = err.downcast_ref::<faqbot_core::Error>() {
      return Some(core);
    }
    current = err.source();
  }
  None
}

impl From<faqbot_codec::Error> for ApiError {
  fn from(e: faqbot_codec::Error) -> Self { ApiError::BadRequest(e.to_string()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
