//! CSV reader and writer.
//!
//! The header row must name `question` and `answer` columns; their order is
//! irrelevant and other columns are ignored. Any malformed row rejects the
//! whole input.

use faqbot_core::faq::{FaqEntry, FaqSet};

use crate::error::{Error, Result};

pub(crate) const QUESTION: &str = "question";
pub(crate) const ANSWER: &str = "answer";

pub(crate) fn parse(input: &[u8]) -> Result<Vec<FaqEntry>> {
  let mut reader = csv::ReaderBuilder::new()
    .has_headers(true)
    .from_reader(input);

  let headers = reader.headers()?.clone();
  let column = |name: &str| headers.iter().position(|h| h.trim() == name);

  let (q_col, a_col) = match (column(QUESTION), column(ANSWER)) {
    (Some(q), Some(a)) => (q, a),
    (q, a) => {
      let mut missing = Vec::new();
      if q.is_none() {
        missing.push(QUESTION);
      }
      if a.is_none() {
        missing.push(ANSWER);
      }
      return Err(Error::MissingColumns(missing));
    }
  };

  let mut entries = Vec::new();
  for record in reader.records() {
    let record = record?;
    entries.push(FaqEntry::new(
      record.get(q_col).unwrap_or_default(),
      record.get(a_col).unwrap_or_default(),
    ));
  }
  Ok(entries)
}

pub(crate) fn write(set: &FaqSet) -> Result<String> {
  let mut writer = csv::Writer::from_writer(Vec::new());
  writer.write_record([QUESTION, ANSWER])?;
  for (q, a) in set.iter() {
    writer.write_record([q, a])?;
  }
  let bytes = writer
    .into_inner()
    .map_err(|e| Error::Flush(e.to_string()))?;
  Ok(String::from_utf8(bytes)?)
}
