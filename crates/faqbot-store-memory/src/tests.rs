//! Tests for `MemoryStore`.

use chrono::TimeDelta;
use faqbot_core::{
  faq::FaqEntry,
  matcher::NO_FAQS_MESSAGE,
  store::SessionStore,
  template::Template,
};
use uuid::Uuid;

use crate::{Error, MemoryStore};

fn is_not_found(err: &Error, id: Uuid) -> bool {
  matches!(err, Error::Core(faqbot_core::Error::SessionNotFound(x)) if *x == id)
}

// ─── Lifecycle ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn open_and_close_session() {
  let s = MemoryStore::new();

  let info = s.open_session().await.unwrap();
  assert_eq!(info.faq_count, 0);
  assert_eq!(info.message_count, 0);
  assert_eq!(s.len().await, 1);

  let fetched = s.session_info(info.session_id).await.unwrap().unwrap();
  assert_eq!(fetched.session_id, info.session_id);

  s.close_session(info.session_id).await.unwrap();
  assert!(s.is_empty().await);
  assert!(s.session_info(info.session_id).await.unwrap().is_none());
}

#[tokio::test]
async fn unknown_session_is_not_found() {
  let s = MemoryStore::new();
  let id = Uuid::new_v4();

  assert!(s.session_info(id).await.unwrap().is_none());
  assert!(is_not_found(&s.close_session(id).await.unwrap_err(), id));
  assert!(is_not_found(&s.faqs(id).await.unwrap_err(), id));
  assert!(is_not_found(&s.ask(id, "hi".into()).await.unwrap_err(), id));
}

#[tokio::test]
async fn purge_removes_only_idle_sessions() {
  let s = MemoryStore::new();
  let a = s.open_session().await.unwrap().session_id;
  let b = s.open_session().await.unwrap().session_id;

  // Nothing has been idle for an hour.
  assert_eq!(s.purge_idle(TimeDelta::hours(1)).await.unwrap(), 0);

  // A negative idle window puts the cutoff in the future: everything is idle.
  assert_eq!(s.purge_idle(TimeDelta::seconds(-1)).await.unwrap(), 2);
  assert!(s.session_info(a).await.unwrap().is_none());
  assert!(s.session_info(b).await.unwrap().is_none());
}

// ─── FAQs ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_extend_remove_keep_order() {
  let s = MemoryStore::new();
  let id = s.open_session().await.unwrap().session_id;

  assert_eq!(s.add_faq(id, FaqEntry::new("Q0?", "A0")).await.unwrap(), 1);
  let added = s
    .extend_faqs(id, vec![
      FaqEntry::new("Q1?", "A1"),
      FaqEntry::new("Q2?", "A2"),
    ])
    .await
    .unwrap();
  assert_eq!(added, 2);

  let removed = s.remove_faq(id, 1).await.unwrap();
  assert_eq!(removed, FaqEntry::new("Q1?", "A1"));

  let faqs = s.faqs(id).await.unwrap();
  assert_eq!(faqs.entries(), vec![
    FaqEntry::new("Q0?", "A0"),
    FaqEntry::new("Q2?", "A2"),
  ]);
}

#[tokio::test]
async fn add_faq_with_empty_answer_is_rejected() {
  let s = MemoryStore::new();
  let id = s.open_session().await.unwrap().session_id;
  let err = s.add_faq(id, FaqEntry::new("Q?", "  ")).await.unwrap_err();
  assert!(matches!(
    err,
    Error::Core(faqbot_core::Error::EmptyField("answer"))
  ));
  assert_eq!(s.stats(id).await.unwrap().total, 0);
}

#[tokio::test]
async fn remove_out_of_range() {
  let s = MemoryStore::new();
  let id = s.open_session().await.unwrap().session_id;
  let err = s.remove_faq(id, 0).await.unwrap_err();
  assert!(matches!(
    err,
    Error::Core(faqbot_core::Error::IndexOutOfRange { index: 0, len: 0 })
  ));
}

// ─── Chat ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn chat_turns_are_recorded() {
  let s = MemoryStore::new();
  let id = s.open_session().await.unwrap().session_id;

  let reply = s.ask(id, "anything".into()).await.unwrap();
  assert_eq!(reply.answer, NO_FAQS_MESSAGE);

  s.load_template(id, Template::TechSupport).await.unwrap();
  let reply = s.ask(id, "How do I reset my password?".into()).await.unwrap();
  assert!(reply.confident);
  assert_eq!(reply.matched_index, Some(0));

  let reply = s.ask_faq(id, 2).await.unwrap();
  assert_eq!(reply.matched_index, Some(2));

  let transcript = s.transcript(id).await.unwrap();
  assert_eq!(transcript.len(), 6);
  let info = s.session_info(id).await.unwrap().unwrap();
  assert_eq!(info.message_count, 6);
  assert_eq!(info.faq_count, 3);
}

#[tokio::test]
async fn clear_empties_faqs_and_transcript() {
  let s = MemoryStore::new();
  let id = s.open_session().await.unwrap().session_id;
  s.load_template(id, Template::ProductFaqs).await.unwrap();
  s.ask(id, "free trial".into()).await.unwrap();

  s.clear(id).await.unwrap();
  assert!(s.faqs(id).await.unwrap().is_empty());
  assert!(s.transcript(id).await.unwrap().is_empty());
}

#[tokio::test]
async fn sessions_are_isolated() {
  let s = MemoryStore::new();
  let a = s.open_session().await.unwrap().session_id;
  let b = s.open_session().await.unwrap().session_id;

  s.load_template(a, Template::CompanyPolicies).await.unwrap();
  s.ask(a, "refund policy".into()).await.unwrap();

  assert_eq!(s.faqs(a).await.unwrap().len(), 3);
  assert!(s.faqs(b).await.unwrap().is_empty());
  assert!(s.transcript(b).await.unwrap().is_empty());

  let reply = s.ask(b, "refund policy".into()).await.unwrap();
  assert_eq!(reply.answer, NO_FAQS_MESSAGE);
}
