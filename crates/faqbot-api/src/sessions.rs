//! Handlers for `/sessions` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `POST`   | `/sessions` | 201 + [`SessionInfo`] |
//! | `GET`    | `/sessions/:id` | 404 if not found |
//! | `DELETE` | `/sessions/:id` | 204; discards FAQs and transcript |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use faqbot_core::{session::SessionInfo, store::SessionStore};
use uuid::Uuid;

use crate::error::ApiError;

/// `POST /sessions`
pub async fn create<S>(
  State(store): State<Arc<S>>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SessionStore,
{
  let info = store.open_session().await.map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(info)))
}

/// `GET /sessions/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<SessionInfo>, ApiError>
where
  S: SessionStore,
{
  let info = store
    .session_info(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("session {id} not found")))?;
  Ok(Json(info))
}

/// `DELETE /sessions/:id`
pub async fn close<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: SessionStore,
{
  store.close_session(id).await.map_err(ApiError::from_store)?;
  Ok(StatusCode::NO_CONTENT)
}
