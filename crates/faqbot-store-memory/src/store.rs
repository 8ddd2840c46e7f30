//! [`MemoryStore`]: the in-memory implementation of [`SessionStore`].

use std::{collections::HashMap, sync::Arc};

use chrono::{TimeDelta, Utc};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use faqbot_core::{
  chat::ChatMessage,
  faq::{FaqEntry, FaqSet, FaqStats},
  session::{ChatReply, Session, SessionInfo},
  store::SessionStore,
  template::Template,
};

use crate::{Error, Result};

// ─── Store ───────────────────────────────────────────────────────────────────

/// Session registry held in process memory.
///
/// The map is behind a read-write lock; each session has its own mutex, so
/// turns within one session serialise while other sessions proceed.
/// Cloning is cheap: clones share the same registry.
#[derive(Clone, Default)]
pub struct MemoryStore {
  sessions: Arc<RwLock<HashMap<Uuid, Arc<Mutex<Session>>>>>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  /// Number of live sessions.
  pub async fn len(&self) -> usize { self.sessions.read().await.len() }

  pub async fn is_empty(&self) -> bool { self.len().await == 0 }

  async fn session(&self, id: Uuid) -> Result<Arc<Mutex<Session>>> {
    self
      .sessions
      .read()
      .await
      .get(&id)
      .cloned()
      .ok_or_else(|| Error::not_found(id))
  }

  /// Run `f` against the session while holding its lock.
  async fn with_session<T, F>(&self, id: Uuid, f: F) -> Result<T>
  where
    F: FnOnce(&mut Session) -> T + Send,
    T: Send,
  {
    let session = self.session(id).await?;
    let mut guard = session.lock().await;
    Ok(f(&mut guard))
  }
}

impl SessionStore for MemoryStore {
  type Error = Error;

  // ── Lifecycle ─────────────────────────────────────────────────────────────

  async fn open_session(&self) -> Result<SessionInfo> {
    let session = Session::new();
    let info = session.info();
    self
      .sessions
      .write()
      .await
      .insert(info.session_id, Arc::new(Mutex::new(session)));
    tracing::info!(session_id = %info.session_id, "opened session");
    Ok(info)
  }

  async fn close_session(&self, id: Uuid) -> Result<()> {
    self
      .sessions
      .write()
      .await
      .remove(&id)
      .ok_or_else(|| Error::not_found(id))?;
    tracing::info!(session_id = %id, "closed session");
    Ok(())
  }

  async fn session_info(&self, id: Uuid) -> Result<Option<SessionInfo>> {
    let Some(session) = self.sessions.read().await.get(&id).cloned() else {
      return Ok(None);
    };
    let info = session.lock().await.info();
    Ok(Some(info))
  }

  async fn purge_idle(&self, idle_for: TimeDelta) -> Result<usize> {
    let cutoff = Utc::now() - idle_for;
    let mut sessions = self.sessions.write().await;
    let before = sessions.len();
    // A session whose lock is held is in use right now, so not idle.
    sessions.retain(|_, session| match session.try_lock() {
      Ok(s) => s.last_active() >= cutoff,
      Err(_) => true,
    });
    let purged = before - sessions.len();
    if purged > 0 {
      tracing::info!(purged, remaining = sessions.len(), "purged idle sessions");
    }
    Ok(purged)
  }

  // ── FAQs ──────────────────────────────────────────────────────────────────

  async fn faqs(&self, id: Uuid) -> Result<FaqSet> {
    self.with_session(id, |s| s.faqs().clone()).await
  }

  async fn add_faq(&self, id: Uuid, entry: FaqEntry) -> Result<usize> {
    Ok(
      self
        .with_session(id, |s| s.add_faq(&entry.question, &entry.answer))
        .await??,
    )
  }

  async fn extend_faqs(&self, id: Uuid, entries: Vec<FaqEntry>) -> Result<usize> {
    self.with_session(id, |s| s.extend(entries)).await
  }

  async fn remove_faq(&self, id: Uuid, index: usize) -> Result<FaqEntry> {
    Ok(self.with_session(id, |s| s.remove_faq(index)).await??)
  }

  async fn clear(&self, id: Uuid) -> Result<()> {
    self.with_session(id, Session::clear).await
  }

  async fn load_template(&self, id: Uuid, template: Template) -> Result<usize> {
    self.with_session(id, |s| s.load_template(template)).await
  }

  async fn stats(&self, id: Uuid) -> Result<FaqStats> {
    self.with_session(id, |s| s.stats()).await
  }

  // ── Chat ──────────────────────────────────────────────────────────────────

  async fn ask(&self, id: Uuid, query: String) -> Result<ChatReply> {
    self.with_session(id, |s| s.ask(&query)).await
  }

  async fn ask_faq(&self, id: Uuid, index: usize) -> Result<ChatReply> {
    Ok(self.with_session(id, |s| s.ask_faq(index)).await??)
  }

  async fn transcript(&self, id: Uuid) -> Result<Vec<ChatMessage>> {
    self.with_session(id, |s| s.transcript().to_vec()).await
  }
}
