//! TF-IDF question matcher.
//!
//! Pipeline:
//!   stored questions
//!     └─ tokenize()          → lower-cased word tokens minus stop words
//!          └─ TfidfIndex::fit() → vocabulary, smoothed IDF, L2-normalised rows
//!   query
//!     └─ TfidfIndex::transform() → vector in the fitted vocabulary
//!          └─ cosine against every row → stable argmax → threshold

use std::{
  collections::{BTreeMap, BTreeSet, HashMap},
  sync::LazyLock,
};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::stop_words::is_stop_word;

/// A best score strictly above this is a confident match.
pub const CONFIDENCE_THRESHOLD: f64 = 0.3;

pub const NO_FAQS_MESSAGE: &str = "I don't have any FAQs yet. Please add some \
                                   questions and answers in the sidebar!";

pub const FALLBACK_MESSAGE: &str = "I'm not sure about that. Could you \
                                    rephrase your question or add this FAQ \
                                    to my knowledge base?";

// Runs of two or more word characters.
static TOKEN_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\b\w\w+\b").unwrap());

/// Split `text` into lower-cased tokens, dropping English stop words.
pub fn tokenize(text: &str) -> Vec<String> {
  let lower = text.to_lowercase();
  TOKEN_RE
    .find_iter(&lower)
    .map(|m| m.as_str())
    .filter(|t| !is_stop_word(t))
    .map(str::to_owned)
    .collect()
}

// ─── Sparse vectors ──────────────────────────────────────────────────────────

/// A sparse vector over vocabulary indices, sorted by index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
  entries: Vec<(usize, f64)>,
}

impl SparseVector {
  /// Weight raw term counts by `idf` and L2-normalise. A vector with no
  /// terms stays zero.
  fn weighted(counts: BTreeMap<usize, usize>, idf: &[f64]) -> Self {
    let mut entries: Vec<(usize, f64)> = counts
      .into_iter()
      .map(|(term, count)| (term, count as f64 * idf[term]))
      .collect();
    let norm = entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
      for (_, w) in &mut entries {
        *w /= norm;
      }
    }
    Self { entries }
  }

  pub fn is_zero(&self) -> bool { self.entries.is_empty() }

  /// Dot product; for two normalised vectors this is their cosine.
  pub fn dot(&self, other: &SparseVector) -> f64 {
    let (mut i, mut j, mut sum) = (0, 0, 0.0);
    while i < self.entries.len() && j < other.entries.len() {
      let (a, wa) = self.entries[i];
      let (b, wb) = other.entries[j];
      match a.cmp(&b) {
        std::cmp::Ordering::Less => i += 1,
        std::cmp::Ordering::Greater => j += 1,
        std::cmp::Ordering::Equal => {
          sum += wa * wb;
          i += 1;
          j += 1;
        }
      }
    }
    sum
  }
}

// ─── Index ───────────────────────────────────────────────────────────────────

/// TF-IDF representation fitted on a sequence of stored questions.
#[derive(Debug, Clone, Default)]
pub struct TfidfIndex {
  vocabulary: HashMap<String, usize>,
  idf:        Vec<f64>,
  rows:       Vec<SparseVector>,
}

impl TfidfIndex {
  /// Fit vocabulary and IDF weights on `documents`.
  ///
  /// `idf(t) = ln((1 + n) / (1 + df(t))) + 1`; term indices follow the
  /// sorted vocabulary.
  pub fn fit<S: AsRef<str>>(documents: &[S]) -> Self {
    let tokenized: Vec<Vec<String>> =
      documents.iter().map(|d| tokenize(d.as_ref())).collect();

    let vocabulary: HashMap<String, usize> = tokenized
      .iter()
      .flatten()
      .map(String::as_str)
      .collect::<BTreeSet<_>>()
      .into_iter()
      .enumerate()
      .map(|(i, term)| (term.to_owned(), i))
      .collect();

    let mut df = vec![0usize; vocabulary.len()];
    for tokens in &tokenized {
      let seen: BTreeSet<usize> =
        tokens.iter().map(|t| vocabulary[t.as_str()]).collect();
      for term in seen {
        df[term] += 1;
      }
    }

    let n = documents.len() as f64;
    let idf: Vec<f64> = df
      .iter()
      .map(|&d| ((1.0 + n) / (1.0 + d as f64)).ln() + 1.0)
      .collect();

    let rows = tokenized
      .iter()
      .map(|tokens| vectorize(&vocabulary, &idf, tokens))
      .collect();

    Self {
      vocabulary,
      idf,
      rows,
    }
  }

  /// Number of fitted documents.
  pub fn len(&self) -> usize { self.rows.len() }

  pub fn is_empty(&self) -> bool { self.rows.is_empty() }

  pub fn vocabulary_len(&self) -> usize { self.vocabulary.len() }

  /// Vectorise `text` in the fitted vocabulary; unknown terms are ignored.
  pub fn transform(&self, text: &str) -> SparseVector {
    vectorize(&self.vocabulary, &self.idf, &tokenize(text))
  }

  /// Cosine similarity of `query` against every fitted row, in row order.
  pub fn similarities(&self, query: &SparseVector) -> Vec<f64> {
    self.rows.iter().map(|row| row.dot(query)).collect()
  }
}

fn vectorize(
  vocabulary: &HashMap<String, usize>,
  idf: &[f64],
  tokens: &[String],
) -> SparseVector {
  let mut counts = BTreeMap::new();
  for term in tokens.iter().filter_map(|t| vocabulary.get(t.as_str())) {
    *counts.entry(*term).or_insert(0) += 1;
  }
  SparseVector::weighted(counts, idf)
}

// ─── Matching ────────────────────────────────────────────────────────────────

/// Outcome of matching one query against the FAQ set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
  /// The stored answer on a confident match, otherwise a fixed message.
  pub answer:        String,
  /// Best cosine similarity, in `[0, 1]`.
  pub score:         f64,
  /// Index of the matched FAQ; `None` unless confident.
  pub matched_index: Option<usize>,
}

impl MatchResult {
  pub fn no_faqs() -> Self {
    Self {
      answer:        NO_FAQS_MESSAGE.to_owned(),
      score:         0.0,
      matched_index: None,
    }
  }

  pub fn is_confident(&self) -> bool { self.matched_index.is_some() }
}

/// Fit on `questions` and match `query` against them.
pub fn find_best_match(
  query: &str,
  questions: &[String],
  answers: &[String],
) -> MatchResult {
  if questions.is_empty() {
    return MatchResult::no_faqs();
  }
  best_match(&TfidfIndex::fit(questions), query, answers)
}

/// Match `query` against an already fitted index. `answers` must be aligned
/// with the documents the index was fitted on.
pub fn best_match(
  index: &TfidfIndex,
  query: &str,
  answers: &[String],
) -> MatchResult {
  if index.is_empty() {
    return MatchResult::no_faqs();
  }

  let query_vec = index.transform(&query.to_lowercase());
  let similarities = index.similarities(&query_vec);

  // Stable argmax: only a strictly greater score moves the winner.
  let (best_idx, best_score) = similarities.iter().copied().enumerate().fold(
    (0, f64::NEG_INFINITY),
    |best, (i, s)| if s > best.1 { (i, s) } else { best },
  );
  let score = best_score.clamp(0.0, 1.0);

  tracing::debug!(best_idx, score, "matched query");

  match answers.get(best_idx) {
    Some(answer) if score > CONFIDENCE_THRESHOLD => MatchResult {
      answer: answer.clone(),
      score,
      matched_index: Some(best_idx),
    },
    _ => MatchResult {
      answer: FALLBACK_MESSAGE.to_owned(),
      score,
      matched_index: None,
    },
  }
}
