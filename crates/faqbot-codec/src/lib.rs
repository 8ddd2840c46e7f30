//! Import/export codecs for FAQ sets.
//!
//! Converts between CSV, JSON and `question|answer` bulk text and
//! [`faqbot_core`] types. Pure synchronous; no HTTP or runtime dependencies.
//!
//! # Quick start
//!
//! ```no_run
//! use faqbot_codec::{parse_csv, to_json};
//! use faqbot_core::faq::FaqSet;
//!
//! let entries = parse_csv(b"question,answer\nFree trial?,Yes.\n").unwrap();
//! let set: FaqSet = entries.into_iter().collect();
//! println!("{}", to_json(&set).unwrap());
//! ```

mod bulk;
pub mod error;
mod table;

use std::path::Path;

pub use bulk::{BulkParse, NO_VALID_FAQS};
pub use error::{Error, Result};
use faqbot_core::faq::{FaqEntry, FaqSet};

// ─── Formats ─────────────────────────────────────────────────────────────────

/// A supported file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
  Csv,
  Json,
  /// `question|answer` per line.
  Bulk,
}

impl Format {
  /// Pick a format from a file extension; anything unrecognised is bulk
  /// text.
  pub fn from_path(path: &Path) -> Self {
    match path
      .extension()
      .and_then(|e| e.to_str())
      .map(str::to_ascii_lowercase)
      .as_deref()
    {
      Some("csv") => Format::Csv,
      Some("json") => Format::Json,
      _ => Format::Bulk,
    }
  }

  pub fn mime_type(self) -> &'static str {
    match self {
      Format::Csv => "text/csv",
      Format::Json => "application/json",
      Format::Bulk => "text/plain",
    }
  }

  /// Default download name for an export in this format.
  pub fn file_name(self) -> &'static str {
    match self {
      Format::Csv => "my_faqs.csv",
      Format::Json => "my_faqs.json",
      Format::Bulk => "my_faqs.txt",
    }
  }
}

// ─── Public API ──────────────────────────────────────────────────────────────

/// Parse CSV with `question` and `answer` header fields. Either every row is
/// returned or the input is rejected.
pub fn parse_csv(input: &[u8]) -> Result<Vec<FaqEntry>> {
  let entries = table::parse(input);
  match &entries {
    Ok(e) => tracing::debug!(rows = e.len(), "parsed csv"),
    Err(e) => tracing::warn!(error = %e, "rejected csv"),
  }
  entries
}

/// Serialise as CSV with a `question,answer` header.
pub fn to_csv(set: &FaqSet) -> Result<String> { table::write(set) }

/// Parse the `{"questions": [...], "answers": [...]}` record.
pub fn parse_json(input: &str) -> Result<FaqSet> { Ok(serde_json::from_str(input)?) }

/// Serialise as pretty JSON mirroring the in-memory record.
pub fn to_json(set: &FaqSet) -> Result<String> {
  Ok(serde_json::to_string_pretty(set)?)
}

/// Parse `question|answer` lines. See [`BulkParse`].
pub fn parse_bulk(text: &str) -> BulkParse { bulk::parse(text) }
