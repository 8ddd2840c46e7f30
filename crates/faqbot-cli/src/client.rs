//! Async HTTP client wrapping the faqbot JSON API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use faqbot_codec::Format;
use faqbot_core::{
  chat::ChatMessage,
  faq::{FaqEntry, FaqSet},
  session::{ChatReply, SessionInfo},
};
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

/// Connection settings for the faqbot API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
  pub base_url: String,
}

/// Result of a bulk, file or template import.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportReport {
  pub added:   usize,
  #[serde(default)]
  pub skipped: usize,
  pub total:   usize,
  #[serde(default)]
  pub notice:  Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TemplateSummary {
  pub slug:    String,
  pub title:   String,
  pub entries: usize,
}

#[derive(Deserialize)]
struct ErrorBody {
  error: String,
}

/// Async HTTP client bound to one chat session.
///
/// Cheap to clone: the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client:  Client,
  config:  ApiConfig,
  session: Option<Uuid>,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self {
      client,
      config,
      session: None,
    })
  }

  fn url(&self, path: &str) -> String {
    format!(
      "{}/api{}",
      self.config.base_url.trim_end_matches('/'),
      path
    )
  }

  fn session_url(&self, path: &str) -> Result<String> {
    let id = self.session.ok_or_else(|| anyhow!("no open session"))?;
    Ok(self.url(&format!("/sessions/{id}{path}")))
  }

  /// Send `req`, turning non-2xx responses into errors carrying the
  /// server's message.
  async fn send(req: RequestBuilder, what: &str) -> Result<Response> {
    let resp = req
      .send()
      .await
      .with_context(|| format!("{what} failed"))?;
    let status = resp.status();
    if status.is_success() {
      return Ok(resp);
    }
    let message = resp
      .json::<ErrorBody>()
      .await
      .map(|b| b.error)
      .unwrap_or_else(|_| status.to_string());
    Err(anyhow!("{what} → {message}"))
  }

  // ── Sessions ──────────────────────────────────────────────────────────────

  /// `POST /api/sessions`: the client is bound to the new session.
  pub async fn open_session(&mut self) -> Result<SessionInfo> {
    let resp =
      Self::send(self.client.post(self.url("/sessions")), "POST /sessions")
        .await?;
    let info: SessionInfo =
      resp.json().await.context("deserialising session")?;
    self.session = Some(info.session_id);
    Ok(info)
  }

  /// `DELETE /api/sessions/:id`
  pub async fn close_session(&mut self) -> Result<()> {
    let url = self.session_url("")?;
    Self::send(self.client.delete(url), "DELETE /sessions").await?;
    self.session = None;
    Ok(())
  }

  // ── FAQs ──────────────────────────────────────────────────────────────────

  /// `GET /api/sessions/:id/faqs`
  pub async fn faqs(&self) -> Result<FaqSet> {
    let url = self.session_url("/faqs")?;
    let resp = Self::send(self.client.get(url), "GET /faqs").await?;
    resp.json().await.context("deserialising faqs")
  }

  /// `POST /api/sessions/:id/faqs`: returns the new FAQ count.
  pub async fn add_faq(&self, question: &str, answer: &str) -> Result<usize> {
    #[derive(Deserialize)]
    struct Added {
      total: usize,
    }
    let url = self.session_url("/faqs")?;
    let req = self
      .client
      .post(url)
      .json(&json!({ "question": question, "answer": answer }));
    let added: Added = Self::send(req, "POST /faqs")
      .await?
      .json()
      .await
      .context("deserialising add result")?;
    Ok(added.total)
  }

  /// `DELETE /api/sessions/:id/faqs/:index`
  pub async fn remove_faq(&self, index: usize) -> Result<FaqEntry> {
    let url = self.session_url(&format!("/faqs/{index}"))?;
    let resp = Self::send(self.client.delete(url), "DELETE /faqs/:index").await?;
    resp.json().await.context("deserialising removed entry")
  }

  /// `DELETE /api/sessions/:id/faqs`: also clears the transcript.
  pub async fn clear(&self) -> Result<()> {
    let url = self.session_url("/faqs")?;
    Self::send(self.client.delete(url), "DELETE /faqs").await?;
    Ok(())
  }

  /// Upload file contents to the import endpoint matching `format`.
  pub async fn import(&self, format: Format, body: String) -> Result<ImportReport> {
    let path = match format {
      Format::Csv => "/faqs/import/csv",
      Format::Json => "/faqs/import/json",
      Format::Bulk => "/faqs/bulk",
    };
    let url = self.session_url(path)?;
    let req = self
      .client
      .post(url)
      .header(reqwest::header::CONTENT_TYPE, format.mime_type())
      .body(body);
    let resp = Self::send(req, &format!("POST {path}")).await?;
    resp.json().await.context("deserialising import report")
  }

  /// Download the FAQ set in `format` (CSV or JSON).
  pub async fn export(&self, format: Format) -> Result<String> {
    let path = match format {
      Format::Json => "/faqs/export/json",
      _ => "/faqs/export/csv",
    };
    let url = self.session_url(path)?;
    let resp = Self::send(self.client.get(url), &format!("GET {path}")).await?;
    resp.text().await.context("reading export body")
  }

  // ── Templates ─────────────────────────────────────────────────────────────

  /// `GET /api/templates`
  pub async fn templates(&self) -> Result<Vec<TemplateSummary>> {
    let resp =
      Self::send(self.client.get(self.url("/templates")), "GET /templates")
        .await?;
    resp.json().await.context("deserialising templates")
  }

  /// `POST /api/sessions/:id/templates/:slug`
  pub async fn load_template(&self, slug: &str) -> Result<ImportReport> {
    let url = self.session_url(&format!("/templates/{slug}"))?;
    let resp = Self::send(self.client.post(url), "POST /templates/:slug").await?;
    resp.json().await.context("deserialising import report")
  }

  // ── Chat ──────────────────────────────────────────────────────────────────

  /// `POST /api/sessions/:id/chat`
  pub async fn ask(&self, message: &str) -> Result<ChatReply> {
    let url = self.session_url("/chat")?;
    let req = self.client.post(url).json(&json!({ "message": message }));
    let resp = Self::send(req, "POST /chat").await?;
    resp.json().await.context("deserialising reply")
  }

  /// `POST /api/sessions/:id/faqs/:index/ask`
  pub async fn ask_faq(&self, index: usize) -> Result<ChatReply> {
    let url = self.session_url(&format!("/faqs/{index}/ask"))?;
    let resp = Self::send(self.client.post(url), "POST /faqs/:index/ask").await?;
    resp.json().await.context("deserialising reply")
  }

  /// `GET /api/sessions/:id/messages`
  pub async fn transcript(&self) -> Result<Vec<ChatMessage>> {
    let url = self.session_url("/messages")?;
    let resp = Self::send(self.client.get(url), "GET /messages").await?;
    resp.json().await.context("deserialising transcript")
  }
}
