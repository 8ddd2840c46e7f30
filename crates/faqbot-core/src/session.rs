//! [`Session`]: one user's FAQ set and chat transcript.
//!
//! A session is created empty and owns everything a user builds up: the FAQ
//! set, the transcript, and the cached index fitted on the current questions.
//! Nothing is shared between sessions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Error, Result,
  cache::IndexCache,
  chat::ChatMessage,
  faq::{FaqEntry, FaqSet, FaqStats},
  matcher::best_match,
  template::Template,
};

// ─── Read models ─────────────────────────────────────────────────────────────

/// Identity and size of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInfo {
  pub session_id:    Uuid,
  pub created_at:    DateTime<Utc>,
  pub last_active:   DateTime<Utc>,
  pub faq_count:     usize,
  pub message_count: usize,
}

/// The assistant's side of one chat turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
  /// Matched answer, or the fallback / no-FAQ message.
  pub answer:        String,
  pub confidence:    f64,
  pub confident:     bool,
  pub matched_index: Option<usize>,
  /// The assistant message appended to the transcript.
  pub message:       ChatMessage,
}

// ─── Session ─────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct Session {
  id:          Uuid,
  created_at:  DateTime<Utc>,
  last_active: DateTime<Utc>,
  faqs:        FaqSet,
  transcript:  Vec<ChatMessage>,
  cache:       IndexCache,
}

impl Session {
  /// A new, empty session with a random id.
  pub fn new() -> Self { Self::with_id(Uuid::new_v4()) }

  pub fn with_id(id: Uuid) -> Self {
    let now = Utc::now();
    Self {
      id,
      created_at: now,
      last_active: now,
      faqs: FaqSet::new(),
      transcript: Vec::new(),
      cache: IndexCache::new(),
    }
  }

  pub fn id(&self) -> Uuid { self.id }

  pub fn last_active(&self) -> DateTime<Utc> { self.last_active }

  pub fn faqs(&self) -> &FaqSet { &self.faqs }

  pub fn transcript(&self) -> &[ChatMessage] { &self.transcript }

  pub fn stats(&self) -> FaqStats { self.faqs.stats() }

  pub fn info(&self) -> SessionInfo {
    SessionInfo {
      session_id:    self.id,
      created_at:    self.created_at,
      last_active:   self.last_active,
      faq_count:     self.faqs.len(),
      message_count: self.transcript.len(),
    }
  }

  fn touch(&mut self) { self.last_active = Utc::now(); }

  // ── FAQ management ────────────────────────────────────────────────────

  /// Add one pair, trimmed. Both sides must be non-empty. Returns the new
  /// number of FAQs.
  pub fn add_faq(&mut self, question: &str, answer: &str) -> Result<usize> {
    let (question, answer) = (question.trim(), answer.trim());
    if question.is_empty() {
      return Err(Error::EmptyField("question"));
    }
    if answer.is_empty() {
      return Err(Error::EmptyField("answer"));
    }
    self.faqs.push(FaqEntry::new(question, answer));
    self.touch();
    Ok(self.faqs.len())
  }

  /// Append entries as given. Returns how many were added.
  pub fn extend(&mut self, entries: impl IntoIterator<Item = FaqEntry>) -> usize {
    let added = self.faqs.extend(entries);
    self.touch();
    added
  }

  pub fn remove_faq(&mut self, index: usize) -> Result<FaqEntry> {
    let removed = self.faqs.remove(index)?;
    self.touch();
    Ok(removed)
  }

  pub fn load_template(&mut self, template: Template) -> usize {
    self.extend(template.entries())
  }

  /// Drop every FAQ and the whole transcript.
  pub fn clear(&mut self) {
    self.faqs.clear();
    self.transcript.clear();
    self.cache.invalidate();
    self.touch();
  }

  // ── Chat ──────────────────────────────────────────────────────────────

  /// Record `query`, match it and record the reply.
  pub fn ask(&mut self, query: &str) -> ChatReply {
    self.transcript.push(ChatMessage::user(query));

    let index = self.cache.get_or_fit(self.faqs.questions());
    let result = best_match(&index, query, self.faqs.answers());
    let message = ChatMessage::assistant(&result);
    self.transcript.push(message.clone());
    self.touch();

    ChatReply {
      confident: result.is_confident(),
      matched_index: result.matched_index,
      confidence: result.score,
      answer: result.answer,
      message,
    }
  }

  /// Ask the stored question at `index`.
  pub fn ask_faq(&mut self, index: usize) -> Result<ChatReply> {
    let question = self
      .faqs
      .get(index)
      .map(|(q, _)| q.to_owned())
      .ok_or(Error::IndexOutOfRange {
        index,
        len: self.faqs.len(),
      })?;
    Ok(self.ask(&question))
  }

  /// Number of index fits so far.
  pub fn index_fits(&self) -> u64 { self.cache.fit_count() }
}

impl Default for Session {
  fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    chat::Role,
    matcher::{FALLBACK_MESSAGE, NO_FAQS_MESSAGE},
  };

  #[test]
  fn new_session_is_empty() {
    let s = Session::new();
    let info = s.info();
    assert_eq!(info.faq_count, 0);
    assert_eq!(info.message_count, 0);
  }

  #[test]
  fn add_faq_trims_and_rejects_empty_sides() {
    let mut s = Session::new();
    assert_eq!(s.add_faq("  Is there a free trial? ", " Yes. ").unwrap(), 1);
    assert_eq!(s.faqs().get(0), Some(("Is there a free trial?", "Yes.")));

    assert!(matches!(s.add_faq("  ", "x"), Err(Error::EmptyField("question"))));
    assert!(matches!(s.add_faq("q", ""), Err(Error::EmptyField("answer"))));
    assert_eq!(s.faqs().len(), 1);
  }

  #[test]
  fn ask_appends_user_and_assistant_messages() {
    let mut s = Session::new();
    s.load_template(Template::EducationalContent);

    let reply = s.ask("What is the capital of France?");
    assert!(reply.confident);
    assert_eq!(reply.answer, "The capital of France is Paris.");
    assert_eq!(reply.matched_index, Some(2));

    let transcript = s.transcript();
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript[0].role, Role::User);
    assert_eq!(transcript[0].content, "What is the capital of France?");
    assert_eq!(transcript[1].role, Role::Assistant);
    assert!(transcript[1].content.contains("Match confidence: 1.00"));
  }

  #[test]
  fn ask_on_empty_session_gives_no_faqs_message() {
    let mut s = Session::new();
    let reply = s.ask("hello");
    assert_eq!(reply.answer, NO_FAQS_MESSAGE);
    assert_eq!(reply.confidence, 0.0);
    assert_eq!(s.transcript().len(), 2);
  }

  #[test]
  fn index_is_refitted_only_after_changes() {
    let mut s = Session::new();
    s.load_template(Template::TechSupport);
    s.ask("reset password");
    s.ask("contact support");
    assert_eq!(s.index_fits(), 1);

    s.add_faq("What is the refund policy?", "30 days.").unwrap();
    let reply = s.ask("refund policy");
    assert_eq!(reply.matched_index, Some(3));
    assert_eq!(s.index_fits(), 2);
  }

  #[test]
  fn ask_faq_uses_stored_question() {
    let mut s = Session::new();
    s.load_template(Template::ProductFaqs);
    let reply = s.ask_faq(1).unwrap();
    assert_eq!(reply.matched_index, Some(1));
    assert!(matches!(s.ask_faq(9), Err(Error::IndexOutOfRange { index: 9, len: 3 })));
  }

  #[test]
  fn clear_resets_faqs_and_transcript() {
    let mut s = Session::new();
    s.load_template(Template::CompanyPolicies);
    s.ask("zzz");
    assert_eq!(s.transcript()[1].content, FALLBACK_MESSAGE);

    s.clear();
    assert!(s.faqs().is_empty());
    assert!(s.transcript().is_empty());
  }
}
