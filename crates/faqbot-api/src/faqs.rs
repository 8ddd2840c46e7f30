//! Handlers for `/sessions/:id/faqs` and `/sessions/:id/stats`.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/faqs` | `{"questions": [...], "answers": [...]}` |
//! | `POST`   | `/faqs` | Body: [`AddBody`]; 201 + `{"total": n}` |
//! | `DELETE` | `/faqs` | Clears FAQs and transcript; 204 |
//! | `DELETE` | `/faqs/:index` | Returns the removed entry |
//! | `POST`   | `/faqs/bulk` | `question\|answer` lines; [`ImportReport`] |
//! | `POST`   | `/faqs/import/csv` | CSV body; all-or-nothing |
//! | `POST`   | `/faqs/import/json` | JSON record body; all-or-nothing |
//! | `GET`    | `/faqs/export/csv` | Attachment `my_faqs.csv` |
//! | `GET`    | `/faqs/export/json` | Attachment `my_faqs.json` |
//! | `GET`    | `/stats` | Total and sample questions |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::{StatusCode, header},
  response::IntoResponse,
};
use bytes::Bytes;
use faqbot_codec::{Format, NO_VALID_FAQS};
use faqbot_core::{
  faq::{FaqEntry, FaqSet, FaqStats},
  store::SessionStore,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::error::ApiError;

// ─── Reports ──────────────────────────────────────────────────────────────────

/// Outcome of any operation that appends several FAQs at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
  pub added:   usize,
  /// Input lines that could not be used (bulk text only).
  #[serde(default)]
  pub skipped: usize,
  /// FAQ count after the import.
  pub total:   usize,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub notice:  Option<String>,
}

/// Append `entries` and build the report.
async fn import<S: SessionStore>(
  store: &S,
  id: Uuid,
  entries: Vec<FaqEntry>,
  skipped: usize,
) -> Result<ImportReport, ApiError> {
  let added = store
    .extend_faqs(id, entries)
    .await
    .map_err(ApiError::from_store)?;
  let total = store.stats(id).await.map_err(ApiError::from_store)?.total;
  Ok(ImportReport {
    added,
    skipped,
    total,
    notice: None,
  })
}

// ─── List / add / clear ───────────────────────────────────────────────────────

/// `GET /sessions/:id/faqs`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<FaqSet>, ApiError>
where
  S: SessionStore,
{
  let faqs = store.faqs(id).await.map_err(ApiError::from_store)?;
  Ok(Json(faqs))
}

/// JSON body accepted by `POST /sessions/:id/faqs`.
#[derive(Debug, Deserialize)]
pub struct AddBody {
  pub question: String,
  pub answer:   String,
}

/// `POST /sessions/:id/faqs`: both fields must be non-blank.
pub async fn add<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<AddBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SessionStore,
{
  let total = store
    .add_faq(id, FaqEntry::new(body.question, body.answer))
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(json!({ "total": total }))))
}

/// `DELETE /sessions/:id/faqs`
pub async fn clear<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: SessionStore,
{
  store.clear(id).await.map_err(ApiError::from_store)?;
  Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /sessions/:id/faqs/:index`
pub async fn remove<S>(
  State(store): State<Arc<S>>,
  Path((id, index)): Path<(Uuid, usize)>,
) -> Result<Json<FaqEntry>, ApiError>
where
  S: SessionStore,
{
  let removed = store
    .remove_faq(id, index)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(removed))
}

// ─── Imports ──────────────────────────────────────────────────────────────────

/// `POST /sessions/:id/faqs/bulk`: one `question|answer` per line.
///
/// Valid lines are applied even if others are skipped. With no valid lines
/// nothing changes and the report carries a notice.
pub async fn bulk<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  body: String,
) -> Result<Json<ImportReport>, ApiError>
where
  S: SessionStore,
{
  let parsed = faqbot_codec::parse_bulk(&body);
  let mut report = import(&*store, id, parsed.entries, parsed.skipped).await?;
  if report.added == 0 {
    report.notice = Some(NO_VALID_FAQS.to_owned());
  }
  tracing::debug!(session_id = %id, added = report.added, skipped = report.skipped, "bulk import");
  Ok(Json(report))
}

/// `POST /sessions/:id/faqs/import/csv`
pub async fn import_csv<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  body: Bytes,
) -> Result<Json<ImportReport>, ApiError>
where
  S: SessionStore,
{
  // Reject unknown sessions before parsing so the error is a 404.
  store.stats(id).await.map_err(ApiError::from_store)?;
  let entries = faqbot_codec::parse_csv(&body)?;
  Ok(Json(import(&*store, id, entries, 0).await?))
}

/// `POST /sessions/:id/faqs/import/json`
pub async fn import_json<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  body: String,
) -> Result<Json<ImportReport>, ApiError>
where
  S: SessionStore,
{
  store.stats(id).await.map_err(ApiError::from_store)?;
  let set = faqbot_codec::parse_json(&body)?;
  Ok(Json(import(&*store, id, set.entries(), 0).await?))
}

// ─── Exports ──────────────────────────────────────────────────────────────────

fn attachment(format: Format, body: String) -> impl IntoResponse {
  (
    [
      (header::CONTENT_TYPE, format.mime_type().to_owned()),
      (
        header::CONTENT_DISPOSITION,
        format!("attachment; filename=\"{}\"", format.file_name()),
      ),
    ],
    body,
  )
}

/// `GET /sessions/:id/faqs/export/csv`
pub async fn export_csv<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SessionStore,
{
  let faqs = store.faqs(id).await.map_err(ApiError::from_store)?;
  let body = faqbot_codec::to_csv(&faqs).map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(attachment(Format::Csv, body))
}

/// `GET /sessions/:id/faqs/export/json`
pub async fn export_json<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SessionStore,
{
  let faqs = store.faqs(id).await.map_err(ApiError::from_store)?;
  let body = faqbot_codec::to_json(&faqs).map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(attachment(Format::Json, body))
}

// ─── Stats ────────────────────────────────────────────────────────────────────

/// `GET /sessions/:id/stats`
pub async fn stats<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<FaqStats>, ApiError>
where
  S: SessionStore,
{
  let stats = store.stats(id).await.map_err(ApiError::from_store)?;
  Ok(Json(stats))
}
