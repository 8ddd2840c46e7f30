//! Cache of the fitted [`TfidfIndex`], keyed by a fingerprint of the question
//! sequence it was fitted on.
//!
//! Fingerprints are SHA-256 over the length-prefixed questions in order, so
//! reordering, editing, adding or removing a question all change it.

use std::sync::Arc;

use sha2::{Digest, Sha256};

use crate::matcher::TfidfIndex;

/// Compute the fingerprint of `questions`.
pub fn fingerprint<S: AsRef<str>>(questions: &[S]) -> String {
  let mut hasher = Sha256::new();
  for q in questions {
    let bytes = q.as_ref().as_bytes();
    hasher.update((bytes.len() as u64).to_le_bytes());
    hasher.update(bytes);
  }
  hex::encode(hasher.finalize())
}

#[derive(Debug, Default)]
pub struct IndexCache {
  entry: Option<(String, Arc<TfidfIndex>)>,
  fits:  u64,
}

impl IndexCache {
  pub fn new() -> Self { Self::default() }

  /// Return the index for `questions`, refitting only when the fingerprint
  /// differs from the cached one.
  pub fn get_or_fit(&mut self, questions: &[String]) -> Arc<TfidfIndex> {
    let key = fingerprint(questions);
    if let Some((cached, index)) = &self.entry
      && *cached == key
    {
      return Arc::clone(index);
    }

    let index = Arc::new(TfidfIndex::fit(questions));
    self.fits += 1;
    tracing::debug!(
      documents = index.len(),
      vocabulary = index.vocabulary_len(),
      "fitted tf-idf index"
    );
    self.entry = Some((key, Arc::clone(&index)));
    index
  }

  pub fn invalidate(&mut self) { self.entry = None; }

  /// Fingerprint of the currently cached index, if any.
  pub fn fingerprint(&self) -> Option<&str> {
    self.entry.as_ref().map(|(key, _)| key.as_str())
  }

  /// How many times an index has been fitted.
  pub fn fit_count(&self) -> u64 { self.fits }
}
