//! Handlers for chat endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/sessions/:id/chat` | Body: `{"message":"..."}`; [`ChatReply`] |
//! | `POST` | `/sessions/:id/faqs/:index/ask` | Asks the stored question |
//! | `GET`  | `/sessions/:id/messages` | Transcript, oldest first |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use faqbot_core::{chat::ChatMessage, session::ChatReply, store::SessionStore};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct ChatBody {
  pub message: String,
}

/// `POST /sessions/:id/chat`
pub async fn ask<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<ChatBody>,
) -> Result<Json<ChatReply>, ApiError>
where
  S: SessionStore,
{
  let reply = store
    .ask(id, body.message)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(reply))
}

/// `POST /sessions/:id/faqs/:index/ask`
pub async fn ask_faq<S>(
  State(store): State<Arc<S>>,
  Path((id, index)): Path<(Uuid, usize)>,
) -> Result<Json<ChatReply>, ApiError>
where
  S: SessionStore,
{
  let reply = store
    .ask_faq(id, index)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(reply))
}

/// `GET /sessions/:id/messages`
pub async fn transcript<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Vec<ChatMessage>>, ApiError>
where
  S: SessionStore,
{
  let messages = store.transcript(id).await.map_err(ApiError::from_store)?;
  Ok(Json(messages))
}
