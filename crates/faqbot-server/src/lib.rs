//! HTTP host for the FAQ chatbot.
//!
//! Wraps [`faqbot_api::api_router`] with request tracing and a body limit,
//! and runs the background task that expires idle sessions.

use std::{sync::Arc, time::Duration};

use axum::{Router, extract::DefaultBodyLimit};
use chrono::TimeDelta;
use faqbot_core::store::SessionStore;
use serde::Deserialize;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `FAQBOT_*` environment variables. Every key is optional.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
  pub host:                String,
  pub port:                u16,
  /// Sessions idle for longer than this are closed.
  pub session_ttl_secs:    u64,
  pub sweep_interval_secs: u64,
  pub max_body_bytes:      usize,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:                "127.0.0.1".to_owned(),
      port:                8080,
      session_ttl_secs:    3600,
      sweep_interval_secs: 60,
      max_body_bytes:      8 * 1024 * 1024,
    }
  }
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn session_ttl(&self) -> TimeDelta {
    TimeDelta::try_seconds(i64::try_from(self.session_ttl_secs).unwrap_or(i64::MAX))
      .unwrap_or(TimeDelta::MAX)
  }

  pub fn sweep_interval(&self) -> Duration {
    // `tokio::time::interval` panics on a zero period.
    Duration::from_secs(self.sweep_interval_secs.max(1))
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The complete application: the API under `/api` plus tracing and the
/// request body limit.
pub fn app<S>(store: Arc<S>, config: &ServerConfig) -> Router
where
  S: SessionStore + 'static,
{
  Router::new()
    .nest("/api", faqbot_api::api_router(store))
    .layer(DefaultBodyLimit::max(config.max_body_bytes))
    .layer(TraceLayer::new_for_http())
}

// ─── Sweeper ──────────────────────────────────────────────────────────────────

/// Close sessions idle for longer than `ttl`, every `every`.
pub fn spawn_sweeper<S>(
  store: Arc<S>,
  ttl: TimeDelta,
  every: Duration,
) -> JoinHandle<()>
where
  S: SessionStore + 'static,
{
  tokio::spawn(async move {
    let mut ticks = tokio::time::interval(every);
    ticks.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    loop {
      ticks.tick().await;
      match store.purge_idle(ttl).await {
        Ok(0) => {}
        Ok(purged) => tracing::debug!(purged, "session sweep"),
        Err(e) => tracing::warn!(error = %e, "session sweep failed"),
      }
    }
  })
}

#[cfg(test)]
mod tests {
  use axum::{
    body::Body,
    http::{Request, StatusCode},
  };
  use faqbot_store_memory::MemoryStore;
  use tower::ServiceExt as _;

  use super::*;

  #[test]
  fn missing_keys_take_defaults() {
    let cfg: ServerConfig = config::Config::builder()
      .set_override("port", 9000)
      .unwrap()
      .build()
      .unwrap()
      .try_deserialize()
      .unwrap();
    assert_eq!(cfg.port, 9000);
    assert_eq!(cfg.host, "127.0.0.1");
    assert_eq!(cfg.session_ttl_secs, 3600);
    assert_eq!(cfg.sweep_interval_secs, 60);
    assert_eq!(cfg.max_body_bytes, 8 * 1024 * 1024);
    assert_eq!(cfg.address(), "127.0.0.1:9000");
  }

  #[test]
  fn zero_interval_is_clamped() {
    let cfg = ServerConfig {
      sweep_interval_secs: 0,
      ..ServerConfig::default()
    };
    assert_eq!(cfg.sweep_interval(), Duration::from_secs(1));
    assert_eq!(cfg.session_ttl(), TimeDelta::hours(1));
  }

  #[tokio::test]
  async fn api_is_mounted_under_prefix() {
    let store = Arc::new(MemoryStore::new());
    let app = app(store, &ServerConfig::default());

    let resp = app
      .clone()
      .oneshot(Request::get("/api/templates").body(Body::empty()).unwrap())
      .await
      .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
      .oneshot(Request::get("/templates").body(Body::empty()).unwrap())
      .await
      .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn oversized_body_is_rejected() {
    let store = Arc::new(MemoryStore::new());
    let id = store.open_session().await.unwrap().session_id;
    let cfg = ServerConfig {
      max_body_bytes: 16,
      ..ServerConfig::default()
    };

    let resp = app(store, &cfg)
      .oneshot(
        Request::post(format!("/api/sessions/{id}/faqs/bulk"))
          .header("content-type", "text/plain")
          .body(Body::from("Q?|A\n".repeat(20)))
          .unwrap(),
      )
      .await
      .unwrap();
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
  }

  #[tokio::test]
  async fn sweeper_closes_idle_sessions() {
    let store = Arc::new(MemoryStore::new());
    store.open_session().await.unwrap();

    let handle =
      spawn_sweeper(store.clone(), TimeDelta::zero(), Duration::from_millis(10));
    tokio::time::sleep(Duration::from_millis(100)).await;
    handle.abort();

    assert!(store.is_empty().await);
  }
}
