//! `question|answer` line format.

use faqbot_core::faq::FaqEntry;

/// Shown when bulk text contains no usable line.
pub const NO_VALID_FAQS: &str = "No valid FAQs found. Use format: Question?|Answer";

/// Result of parsing bulk text. Parsing never fails; unusable lines are
/// counted in `skipped`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkParse {
  pub entries: Vec<FaqEntry>,
  pub skipped: usize,
}

/// Split each line at its first `|`; both sides are trimmed and must be
/// non-empty. Leading and trailing whitespace of the whole input is ignored.
pub(crate) fn parse(text: &str) -> BulkParse {
  let mut out = BulkParse::default();
  for line in text.trim().lines() {
    match line.split_once('|') {
      Some((q, a)) if !q.trim().is_empty() && !a.trim().is_empty() => {
        out.entries.push(FaqEntry::new(q.trim(), a.trim()));
      }
      _ => out.skipped += 1,
    }
  }
  out
}
