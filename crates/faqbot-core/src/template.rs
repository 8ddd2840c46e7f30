//! Built-in starter FAQ sets.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString, IntoEnumIterator};

use crate::{Error, Result, faq::FaqEntry};

/// A built-in template, addressed by its kebab-case slug
/// (e.g. `tech-support`).
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  strum::Display,
  EnumString,
  EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Template {
  TechSupport,
  ProductFaqs,
  CompanyPolicies,
  EducationalContent,
}

impl Template {
  pub fn all() -> impl Iterator<Item = Template> { Template::iter() }

  /// Parse a slug, mapping failures to [`Error::UnknownTemplate`].
  pub fn from_slug(slug: &str) -> Result<Self> {
    Template::from_str(slug).map_err(|_| Error::UnknownTemplate(slug.to_owned()))
  }

  pub fn slug(self) -> String { self.to_string() }

  /// Human-readable name.
  pub fn title(self) -> &'static str {
    match self {
      Template::TechSupport => "Tech Support",
      Template::ProductFaqs => "Product FAQs",
      Template::CompanyPolicies => "Company Policies",
      Template::EducationalContent => "Educational Content",
    }
  }

  pub fn entries(self) -> Vec<FaqEntry> {
    self
      .pairs()
      .iter()
      .map(|(q, a)| FaqEntry::new(*q, *a))
      .collect()
  }

  fn pairs(self) -> &'static [(&'static str, &'static str)] {
    match self {
      Template::TechSupport => &[
        (
          "How do I reset my password?",
          "Go to Settings > Account > Reset Password and follow the instructions.",
        ),
        (
          "The app is crashing, what should I do?",
          "Try clearing cache or reinstalling the application.",
        ),
        (
          "How to contact support?",
          "Email support@company.com or call 1-800-HELP.",
        ),
      ],
      Template::ProductFaqs => &[
        (
          "What are the main features?",
          "Our product offers feature A, B, and C with advanced customization.",
        ),
        (
          "Is there a free trial?",
          "Yes, we offer a 30-day free trial with full features.",
        ),
        (
          "What platforms are supported?",
          "Available on Windows, Mac, iOS, and Android.",
        ),
      ],
      Template::CompanyPolicies => &[
        (
          "What is the refund policy?",
          "We offer 30-day money-back guarantee for all purchases.",
        ),
        (
          "What are your working hours?",
          "Our team is available Monday-Friday, 9 AM - 6 PM EST.",
        ),
        (
          "Do you offer discounts for students?",
          "Yes, we provide 50% discount for verified students.",
        ),
      ],
      Template::EducationalContent => &[
        (
          "What is photosynthesis?",
          "Photosynthesis is the process plants use to convert light energy \
           into chemical energy.",
        ),
        (
          "How does gravity work?",
          "Gravity is a force that attracts objects with mass toward each \
           other.",
        ),
        (
          "What is the capital of France?",
          "The capital of France is Paris.",
        ),
      ],
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn slugs_round_trip() {
    for t in Template::all() {
      assert_eq!(Template::from_slug(&t.slug()).unwrap(), t);
      assert_eq!(t.entries().len(), 3);
    }
    assert_eq!(Template::TechSupport.slug(), "tech-support");
  }

  #[test]
  fn unknown_slug_is_an_error() {
    assert!(matches!(
      Template::from_slug("recipes"),
      Err(Error::UnknownTemplate(s)) if s == "recipes"
    ));
  }
}
