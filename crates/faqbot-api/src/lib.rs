//! JSON REST API for the FAQ chatbot.
//!
//! Exposes an axum [`Router`] backed by any
//! [`faqbot_core::store::SessionStore`]. Transport concerns (binding,
//! tracing, body limits) are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", faqbot_api::api_router(store.clone()))
//! ```

pub mod chat;
pub mod error;
pub mod faqs;
pub mod sessions;
pub mod templates;

use std::sync::Arc;

use axum::{
  Router,
  routing::{delete, get, post},
};
use faqbot_core::store::SessionStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: SessionStore + 'static,
{
  Router::new()
    // Sessions
    .route("/sessions", post(sessions::create::<S>))
    .route(
      "/sessions/{id}",
      get(sessions::get_one::<S>).delete(sessions::close::<S>),
    )
    // FAQs
    .route(
      "/sessions/{id}/faqs",
      get(faqs::list::<S>)
        .post(faqs::add::<S>)
        .delete(faqs::clear::<S>),
    )
    .route("/sessions/{id}/faqs/bulk", post(faqs::bulk::<S>))
    .route("/sessions/{id}/faqs/import/csv", post(faqs::import_csv::<S>))
    .route("/sessions/{id}/faqs/import/json", post(faqs::import_json::<S>))
    .route("/sessions/{id}/faqs/export/csv", get(faqs::export_csv::<S>))
    .route("/sessions/{id}/faqs/export/json", get(faqs::export_json::<S>))
    .route("/sessions/{id}/faqs/{index}", delete(faqs::remove::<S>))
    .route("/sessions/{id}/faqs/{index}/ask", post(chat::ask_faq::<S>))
    .route("/sessions/{id}/stats", get(faqs::stats::<S>))
    // Templates
    .route("/templates", get(templates::list))
    .route("/sessions/{id}/templates/{slug}", post(templates::load::<S>))
    // Chat
    .route("/sessions/{id}/chat", post(chat::ask::<S>))
    .route("/sessions/{id}/messages", get(chat::transcript::<S>))
    .with_state(store)
}

#[cfg(test)]
mod tests {
  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
  };
  use faqbot_core::matcher::{FALLBACK_MESSAGE, NO_FAQS_MESSAGE};
  use faqbot_store_memory::MemoryStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;
  use uuid::Uuid;

  use super::*;

  fn app(store: &MemoryStore) -> Router {
    api_router(Arc::new(store.clone()))
  }

  async fn send(
    store: &MemoryStore,
    method: &str,
    uri: &str,
    content_type: Option<&str>,
    body: impl Into<Body>,
  ) -> Response {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(ct) = content_type {
      req = req.header(header::CONTENT_TYPE, ct);
    }
    app(store).oneshot(req.body(body.into()).unwrap()).await.unwrap()
  }

  async fn send_json(
    store: &MemoryStore,
    method: &str,
    uri: &str,
    body: Option<Value>,
  ) -> (StatusCode, Value) {
    let resp = match body {
      Some(v) => {
        send(store, method, uri, Some("application/json"), v.to_string()).await
      }
      None => send(store, method, uri, None, Body::empty()).await,
    };
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    let value = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
  }

  async fn open(store: &MemoryStore) -> String {
    let (status, body) = send_json(store, "POST", "/sessions", None).await;
    assert_eq!(status, StatusCode::CREATED);
    body["session_id"].as_str().unwrap().to_owned()
  }

  // ── Sessions ────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn session_lifecycle() {
    let store = MemoryStore::new();
    let id = open(&store).await;

    let (status, info) =
      send_json(&store, "GET", &format!("/sessions/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(info["faq_count"], 0);

    let (status, _) =
      send_json(&store, "DELETE", &format!("/sessions/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) =
      send_json(&store, "GET", &format!("/sessions/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains(&id));
  }

  #[tokio::test]
  async fn unknown_session_returns_404() {
    let store = MemoryStore::new();
    let id = Uuid::new_v4();
    let (status, body) = send_json(
      &store,
      "POST",
      &format!("/sessions/{id}/chat"),
      Some(json!({ "message": "hi" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("session not found"));
  }

  // ── FAQs ────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn add_list_and_remove() {
    let store = MemoryStore::new();
    let id = open(&store).await;
    let uri = format!("/sessions/{id}/faqs");

    for (q, a) in [("Q0?", "A0"), ("Q1?", "A1"), ("Q2?", "A2")] {
      let (status, _) = send_json(
        &store,
        "POST",
        &uri,
        Some(json!({ "question": q, "answer": a })),
      )
      .await;
      assert_eq!(status, StatusCode::CREATED);
    }

    let (status, removed) =
      send_json(&store, "DELETE", &format!("{uri}/1"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(removed, json!({ "question": "Q1?", "answer": "A1" }));

    let (_, faqs) = send_json(&store, "GET", &uri, None).await;
    assert_eq!(
      faqs,
      json!({ "questions": ["Q0?", "Q2?"], "answers": ["A0", "A2"] })
    );

    let (status, _) =
      send_json(&store, "DELETE", &format!("{uri}/7"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn blank_question_is_rejected() {
    let store = MemoryStore::new();
    let id = open(&store).await;
    let (status, body) = send_json(
      &store,
      "POST",
      &format!("/sessions/{id}/faqs"),
      Some(json!({ "question": "   ", "answer": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "question must not be empty");
  }

  #[tokio::test]
  async fn bulk_applies_valid_lines_and_reports_skips() {
    let store = MemoryStore::new();
    let id = open(&store).await;
    let uri = format!("/sessions/{id}/faqs/bulk");

    let resp =
      send(&store, "POST", &uri, Some("text/plain"), "Q1?|A1\nbadline\nQ2?|A2").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let report: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(report["added"], 2);
    assert_eq!(report["skipped"], 1);
    assert_eq!(report["total"], 2);
    assert!(report.get("notice").is_none());

    let resp = send(&store, "POST", &uri, Some("text/plain"), "nothing here").await;
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let report: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(report["added"], 0);
    assert_eq!(report["notice"], faqbot_codec::NO_VALID_FAQS);
  }

  #[tokio::test]
  async fn csv_import_is_all_or_nothing() {
    let store = MemoryStore::new();
    let id = open(&store).await;
    let uri = format!("/sessions/{id}/faqs/import/csv");

    let resp =
      send(&store, "POST", &uri, Some("text/csv"), "q,a\nx,y\n").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = send(
      &store,
      "POST",
      &uri,
      Some("text/csv"),
      "question,answer\nok?,fine\nbroken\n",
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let (_, stats) =
      send_json(&store, "GET", &format!("/sessions/{id}/stats"), None).await;
    assert_eq!(stats["total"], 0);
  }

  #[tokio::test]
  async fn csv_export_then_import_round_trips() {
    let store = MemoryStore::new();
    let a = open(&store).await;
    let b = open(&store).await;

    send_json(&store, "POST", &format!("/sessions/{a}/templates/tech-support"), None)
      .await;

    let resp =
      send(&store, "GET", &format!("/sessions/{a}/faqs/export/csv"), None, Body::empty())
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[header::CONTENT_TYPE], "text/csv");
    assert!(
      resp.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .contains("my_faqs.csv")
    );
    let csv = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();

    let resp = send(
      &store,
      "POST",
      &format!("/sessions/{b}/faqs/import/csv"),
      Some("text/csv"),
      csv,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let (_, faqs_a) = send_json(&store, "GET", &format!("/sessions/{a}/faqs"), None).await;
    let (_, faqs_b) = send_json(&store, "GET", &format!("/sessions/{b}/faqs"), None).await;
    assert_eq!(faqs_a, faqs_b);
  }

  #[tokio::test]
  async fn json_export_and_import() {
    let store = MemoryStore::new();
    let id = open(&store).await;
    send_json(
      &store,
      "POST",
      &format!("/sessions/{id}/templates/product-faqs"),
      None,
    )
    .await;

    let (status, exported) =
      send_json(&store, "GET", &format!("/sessions/{id}/faqs/export/json"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(exported["questions"].as_array().unwrap().len(), 3);

    let (status, report) = send_json(
      &store,
      "POST",
      &format!("/sessions/{id}/faqs/import/json"),
      Some(exported),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["added"], 3);
    assert_eq!(report["total"], 6);

    let (status, _) = send_json(
      &store,
      "POST",
      &format!("/sessions/{id}/faqs/import/json"),
      Some(json!({ "questions": ["a"], "answers": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  // ── Templates ───────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn templates_are_listed_and_loaded() {
    let store = MemoryStore::new();
    let id = open(&store).await;

    let (_, list) = send_json(&store, "GET", "/templates", None).await;
    assert_eq!(list.as_array().unwrap().len(), 4);
    assert_eq!(list[0]["slug"], "tech-support");
    assert_eq!(list[0]["title"], "Tech Support");

    let (status, report) = send_json(
      &store,
      "POST",
      &format!("/sessions/{id}/templates/company-policies"),
      None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["added"], 3);

    let (status, _) = send_json(
      &store,
      "POST",
      &format!("/sessions/{id}/templates/cooking"),
      None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  // ── Chat ────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn chat_flow() {
    let store = MemoryStore::new();
    let id = open(&store).await;
    let chat = format!("/sessions/{id}/chat");

    let (_, reply) =
      send_json(&store, "POST", &chat, Some(json!({ "message": "hello" }))).await;
    assert_eq!(reply["answer"], NO_FAQS_MESSAGE);
    assert_eq!(reply["confidence"], 0.0);

    send_json(
      &store,
      "POST",
      &format!("/sessions/{id}/templates/educational-content"),
      None,
    )
    .await;

    let (status, reply) = send_json(
      &store,
      "POST",
      &chat,
      Some(json!({ "message": "What is the capital of France?" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reply["answer"], "The capital of France is Paris.");
    assert_eq!(reply["confident"], true);
    assert!((reply["confidence"].as_f64().unwrap() - 1.0).abs() < 1e-9);

    let (_, reply) =
      send_json(&store, "POST", &chat, Some(json!({ "message": "zzz qqq xyz" }))).await;
    assert_eq!(reply["answer"], FALLBACK_MESSAGE);
    assert_eq!(reply["confident"], false);

    let (_, reply) = send_json(
      &store,
      "POST",
      &format!("/sessions/{id}/faqs/0/ask"),
      None,
    )
    .await;
    assert_eq!(reply["matched_index"], 0);

    let (_, messages) =
      send_json(&store, "GET", &format!("/sessions/{id}/messages"), None).await;
    let messages = messages.as_array().unwrap();
    assert_eq!(messages.len(), 8);
    assert_eq!(messages[0]["role"], "user");
    assert_eq!(messages[1]["role"], "assistant");

    let (status, _) =
      send_json(&store, "DELETE", &format!("/sessions/{id}/faqs"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, messages) =
      send_json(&store, "GET", &format!("/sessions/{id}/messages"), None).await;
    assert_eq!(messages, json!([]));
  }
}
