//! Handlers for built-in templates.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/templates` | Slugs, titles and sizes |
//! | `POST` | `/sessions/:id/templates/:slug` | Appends the template; 404 for unknown slugs |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use faqbot_core::{store::SessionStore, template::Template};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{error::ApiError, faqs::ImportReport};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSummary {
  pub slug:    String,
  pub title:   String,
  pub entries: usize,
}

/// `GET /templates`
pub async fn list() -> Json<Vec<TemplateSummary>> {
  Json(
    Template::all()
      .map(|t| TemplateSummary {
        slug:    t.slug(),
        title:   t.title().to_owned(),
        entries: t.entries().len(),
      })
      .collect(),
  )
}

/// `POST /sessions/:id/templates/:slug`
pub async fn load<S>(
  State(store): State<Arc<S>>,
  Path((id, slug)): Path<(Uuid, String)>,
) -> Result<Json<ImportReport>, ApiError>
where
  S: SessionStore,
{
  let template =
    Template::from_slug(&slug).map_err(|e| ApiError::NotFound(e.to_string()))?;
  let added = store
    .load_template(id, template)
    .await
    .map_err(ApiError::from_store)?;
  let total = store.stats(id).await.map_err(ApiError::from_store)?.total;
  tracing::debug!(session_id = %id, template = %template, added, "loaded template");
  Ok(Json(ImportReport {
    added,
    skipped: 0,
    total,
    notice: None,
  }))
}
