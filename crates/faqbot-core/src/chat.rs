//! Chat transcript messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::matcher::MatchResult;

/// Who produced a message.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
  User,
  Assistant,
}

/// One entry in a session's append-only transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
  pub role:       Role,
  pub content:    String,
  /// Only set on assistant messages.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub confidence: Option<f64>,
  pub sent_at:    DateTime<Utc>,
}

impl ChatMessage {
  pub fn user(content: impl Into<String>) -> Self {
    Self {
      role:       Role::User,
      content:    content.into(),
      confidence: None,
      sent_at:    Utc::now(),
    }
  }

  /// The assistant's reply to a match. Confident answers carry the score in
  /// their text; the score is recorded either way.
  pub fn assistant(result: &MatchResult) -> Self {
    let content = if result.is_confident() {
      format!("{}\n\n*Match confidence: {:.2}*", result.answer, result.score)
    } else {
      result.answer.clone()
    };
    Self {
      role: Role::Assistant,
      content,
      confidence: Some(result.score),
      sent_at: Utc::now(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::matcher::FALLBACK_MESSAGE;

  #[test]
  fn confident_reply_mentions_score() {
    let msg = ChatMessage::assistant(&MatchResult {
      answer:        "Paris.".into(),
      score:         0.8765,
      matched_index: Some(0),
    });
    assert_eq!(msg.role, Role::Assistant);
    assert_eq!(msg.content, "Paris.\n\n*Match confidence: 0.88*");
    assert_eq!(msg.confidence, Some(0.8765));
  }

  #[test]
  fn fallback_reply_is_plain() {
    let msg = ChatMessage::assistant(&MatchResult {
      answer:        FALLBACK_MESSAGE.into(),
      score:         0.1,
      matched_index: None,
    });
    assert_eq!(msg.content, FALLBACK_MESSAGE);
    assert_eq!(msg.confidence, Some(0.1));
  }

  #[test]
  fn role_serialises_lowercase() {
    assert_eq!(Role::User.to_string(), "user");
    let json = serde_json::to_value(ChatMessage::user("hi")).unwrap();
    assert_eq!(json["role"], "user");
    assert!(json.get("confidence").is_none());
  }
}
