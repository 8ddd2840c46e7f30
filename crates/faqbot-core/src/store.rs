//! The `SessionStore` trait.
//!
//! Implemented by session backends (e.g. `faqbot-store-memory`). The HTTP
//! layer depends on this abstraction, not on any concrete backend. Every
//! per-session method fails with [`Error::SessionNotFound`](crate::Error)
//! (wrapped in the backend's error type) when the id is unknown.

use std::future::Future;

use chrono::TimeDelta;
use uuid::Uuid;

use crate::{
  chat::ChatMessage,
  faq::{FaqEntry, FaqSet, FaqStats},
  session::{ChatReply, SessionInfo},
  template::Template,
};

/// Abstraction over a registry of isolated chat sessions.
///
/// All methods return `Send` futures so the trait can be used from axum
/// handlers on a multi-threaded runtime.
pub trait SessionStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Lifecycle ─────────────────────────────────────────────────────────

  /// Create a new, empty session.
  fn open_session(
    &self,
  ) -> impl Future<Output = Result<SessionInfo, Self::Error>> + Send + '_;

  /// Tear a session down, discarding its FAQs and transcript.
  fn close_session(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Look up a session. Returns `None` if not found.
  fn session_info(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<SessionInfo>, Self::Error>> + Send + '_;

  /// Close every session idle for longer than `idle_for`. Returns how many
  /// were closed.
  fn purge_idle(
    &self,
    idle_for: TimeDelta,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  // ── FAQs ──────────────────────────────────────────────────────────────

  /// Snapshot of the session's FAQ set.
  fn faqs(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<FaqSet, Self::Error>> + Send + '_;

  /// Add one pair; returns the new FAQ count.
  fn add_faq(
    &self,
    id: Uuid,
    entry: FaqEntry,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  /// Append all `entries` in order; returns how many were added.
  fn extend_faqs(
    &self,
    id: Uuid,
    entries: Vec<FaqEntry>,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  /// Remove and return the pair at `index`.
  fn remove_faq(
    &self,
    id: Uuid,
    index: usize,
  ) -> impl Future<Output = Result<FaqEntry, Self::Error>> + Send + '_;

  /// Drop every FAQ and the transcript.
  fn clear(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Append a built-in template; returns how many entries were added.
  fn load_template(
    &self,
    id: Uuid,
    template: Template,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  fn stats(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<FaqStats, Self::Error>> + Send + '_;

  // ── Chat ──────────────────────────────────────────────────────────────

  /// Run one chat turn for `query`.
  fn ask(
    &self,
    id: Uuid,
    query: String,
  ) -> impl Future<Output = Result<ChatReply, Self::Error>> + Send + '_;

  /// Run one chat turn using the stored question at `index`.
  fn ask_faq(
    &self,
    id: Uuid,
    index: usize,
  ) -> impl Future<Output = Result<ChatReply, Self::Error>> + Send + '_;

  /// Snapshot of the transcript, oldest first.
  fn transcript(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Vec<ChatMessage>, Self::Error>> + Send + '_;
}
