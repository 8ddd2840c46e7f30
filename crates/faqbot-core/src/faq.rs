//! The FAQ set: a user's collection of question/answer pairs.
//!
//! Questions and answers are held in two index-aligned sequences. The index is
//! the only link between a question and its answer, so every mutation touches
//! both sequences in lockstep and the fields are never exposed mutably.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Number of questions included in [`FaqStats::sample`].
pub const SAMPLE_SIZE: usize = 3;

// ─── Entry ───────────────────────────────────────────────────────────────────

/// A single question/answer pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
  pub question: String,
  pub answer:   String,
}

impl FaqEntry {
  pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
    Self {
      question: question.into(),
      answer:   answer.into(),
    }
  }
}

// ─── Set ─────────────────────────────────────────────────────────────────────

/// Ordered FAQ collection, serialised as `{"questions": [...], "answers": [...]}`.
///
/// Deserialising a record whose sequences differ in length fails with
/// [`Error::LengthMismatch`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawFaqSet")]
pub struct FaqSet {
  questions: Vec<String>,
  answers:   Vec<String>,
}

#[derive(Deserialize)]
struct RawFaqSet {
  #[serde(default)]
  questions: Vec<String>,
  #[serde(default)]
  answers:   Vec<String>,
}

impl TryFrom<RawFaqSet> for FaqSet {
  type Error = Error;

  fn try_from(raw: RawFaqSet) -> Result<Self> {
    if raw.questions.len() != raw.answers.len() {
      return Err(Error::LengthMismatch {
        questions: raw.questions.len(),
        answers:   raw.answers.len(),
      });
    }
    Ok(Self {
      questions: raw.questions,
      answers:   raw.answers,
    })
  }
}

impl FaqSet {
  pub fn new() -> Self { Self::default() }

  pub fn len(&self) -> usize { self.questions.len() }

  pub fn is_empty(&self) -> bool { self.questions.is_empty() }

  pub fn questions(&self) -> &[String] { &self.questions }

  pub fn answers(&self) -> &[String] { &self.answers }

  /// The pair at `index`, if any.
  pub fn get(&self, index: usize) -> Option<(&str, &str)> {
    Some((
      self.questions.get(index)?.as_str(),
      self.answers.get(index)?.as_str(),
    ))
  }

  /// Iterate pairs in stored order.
  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self
      .questions
      .iter()
      .zip(&self.answers)
      .map(|(q, a)| (q.as_str(), a.as_str()))
  }

  /// Owned copies of every pair, in stored order.
  pub fn entries(&self) -> Vec<FaqEntry> {
    self.iter().map(|(q, a)| FaqEntry::new(q, a)).collect()
  }

  pub fn push(&mut self, entry: FaqEntry) {
    self.questions.push(entry.question);
    self.answers.push(entry.answer);
  }

  /// Append every entry in order and return how many were appended.
  pub fn extend(&mut self, entries: impl IntoIterator<Item = FaqEntry>) -> usize {
    let before = self.len();
    for entry in entries {
      self.push(entry);
    }
    self.len() - before
  }

  /// Remove the pair at `index`, shifting later pairs down by one.
  pub fn remove(&mut self, index: usize) -> Result<FaqEntry> {
    if index >= self.len() {
      return Err(Error::IndexOutOfRange {
        index,
        len: self.len(),
      });
    }
    Ok(FaqEntry {
      question: self.questions.remove(index),
      answer:   self.answers.remove(index),
    })
  }

  pub fn clear(&mut self) {
    self.questions.clear();
    self.answers.clear();
  }

  pub fn stats(&self) -> FaqStats {
    FaqStats {
      total:  self.len(),
      sample: self.questions.iter().take(SAMPLE_SIZE).cloned().collect(),
    }
  }
}

impl FromIterator<FaqEntry> for FaqSet {
  fn from_iter<I: IntoIterator<Item = FaqEntry>>(iter: I) -> Self {
    let mut set = Self::new();
    set.extend(iter);
    set
  }
}

// ─── Stats ───────────────────────────────────────────────────────────────────

/// Summary shown alongside the knowledge base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqStats {
  pub total:  usize,
  /// The first few stored questions.
  pub sample: Vec<String>,
}
