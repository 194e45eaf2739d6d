//! The `Summary` record and the inputs used to create and change it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  provider::{Summarizer, SummaryLength},
  ratio::{compression_ratio, word_count},
};

/// Title given to records created without one.
pub const DEFAULT_TITLE: &str = "Untitled";
/// Texts with fewer words than this are not worth summarizing.
pub const MIN_WORDS: usize = 10;
/// Longest accepted title, in characters.
pub const TITLE_MAX_CHARS: usize = 200;

/// A persisted summary, exactly as the store returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
  pub id:                i64,
  pub original_text:     String,
  pub summary_text:      String,
  pub created_at:        DateTime<Utc>,
  pub updated_at:        DateTime<Utc>,
  pub title:             Option<String>,
  pub compression_ratio: f64,
}

/// An original text together with its generated summary and their ratio.
///
/// The three fields only ever change together, which keeps the stored ratio
/// consistent with the stored texts.
#[derive(Debug, Clone, PartialEq)]
pub struct Content {
  pub original_text:     String,
  pub summary_text:      String,
  pub compression_ratio: f64,
}

impl Content {
  /// Pair `original_text` with `summary_text`, computing the ratio.
  pub fn new(original_text: String, summary_text: String) -> Self {
    let compression_ratio = compression_ratio(&original_text, &summary_text);
    Self { original_text, summary_text, compression_ratio }
  }
}

/// Input to [`SummaryStore::create`](crate::store::SummaryStore::create).
/// Identity and timestamps are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewSummary {
  pub content: Content,
  pub title:   Option<String>,
}

/// Input to [`SummaryStore::update`](crate::store::SummaryStore::update).
///
/// `None` leaves a field untouched. `title: Some(None)` clears the title.
/// `updated_at` is refreshed regardless.
#[derive(Debug, Clone, Default)]
pub struct SummaryUpdate {
  pub content: Option<Content>,
  pub title:   Option<Option<String>>,
}

/// Reject texts below [`MIN_WORDS`].
pub fn check_word_count(text: &str) -> Result<()> {
  let words = word_count(text);
  if words < MIN_WORDS {
    return Err(Error::TextTooShort { words });
  }
  Ok(())
}

/// Reject titles over [`TITLE_MAX_CHARS`].
pub fn check_title(title: Option<&str>) -> Result<()> {
  match title {
    Some(t) if t.chars().count() > TITLE_MAX_CHARS => {
      Err(Error::TitleTooLong { max: TITLE_MAX_CHARS })
    }
    _ => Ok(()),
  }
}

/// Validate `text`, run it through `provider`, and bundle the result.
///
/// The provider is only called once the text passes the word-count check.
pub async fn summarize_content<P>(
  provider: &P,
  text:     String,
  length:   SummaryLength,
) -> Result<Content>
where
  P: Summarizer,
{
  check_word_count(&text)?;
  let summary_text = provider.summarize(&text, length).await?;
  Ok(Content::new(text, summary_text))
}

#[cfg(test)]
mod tests {
  use std::sync::atomic::{AtomicUsize, Ordering};

  use super::*;
  use crate::provider::ProviderError;

  /// Keeps the first five words and counts calls.
  #[derive(Default)]
  struct FirstFive {
    calls: AtomicUsize,
  }

  impl Summarizer for FirstFive {
    async fn summarize(&self, text: &str, _length: SummaryLength) -> Result<String, ProviderError> {
      self.calls.fetch_add(1, Ordering::SeqCst);
      Ok(text.split_whitespace().take(5).collect::<Vec<_>>().join(" "))
    }

    fn is_loaded(&self) -> bool { true }
  }

  struct Broken;

  impl Summarizer for Broken {
    async fn summarize(&self, _text: &str, _length: SummaryLength) -> Result<String, ProviderError> {
      Err(ProviderError::Unavailable)
    }

    fn is_loaded(&self) -> bool { false }
  }

  const TWENTY: &str = "one two three four five six seven eight nine ten \
                        eleven twelve thirteen fourteen fifteen sixteen \
                        seventeen eighteen nineteen twenty";

  #[test]
  fn content_computes_ratio() {
    let c = Content::new("a b c d".into(), "a".into());
    assert_eq!(c.compression_ratio, 25.0);
  }

  #[test]
  fn word_count_boundary() {
    assert!(check_word_count("1 2 3 4 5 6 7 8 9").is_err());
    assert!(check_word_count("1 2 3 4 5 6 7 8 9 10").is_ok());
    assert!(matches!(
      check_word_count("too short"),
      Err(Error::TextTooShort { words: 2 })
    ));
  }

  #[test]
  fn title_length_is_counted_in_chars() {
    let ok = "é".repeat(TITLE_MAX_CHARS);
    let long = "x".repeat(TITLE_MAX_CHARS + 1);
    assert!(check_title(Some(&ok)).is_ok());
    assert!(check_title(None).is_ok());
    assert!(matches!(
      check_title(Some(&long)),
      Err(Error::TitleTooLong { max: TITLE_MAX_CHARS })
    ));
  }

  #[tokio::test]
  async fn summarize_content_bundles_ratio() {
    let provider = FirstFive::default();
    let content = summarize_content(&provider, TWENTY.to_string(), SummaryLength::default())
      .await
      .unwrap();
    assert_eq!(content.original_text, TWENTY);
    assert_eq!(content.summary_text, "one two three four five");
    assert_eq!(content.compression_ratio, 25.0);
  }

  #[tokio::test]
  async fn short_text_never_reaches_provider() {
    let provider = FirstFive::default();
    let err = summarize_content(&provider, "too short".into(), SummaryLength::default())
      .await
      .unwrap_err();
    assert!(matches!(err, Error::TextTooShort { .. }));
    assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
  }

  #[tokio::test]
  async fn provider_failure_is_surfaced() {
    let err = summarize_content(&Broken, TWENTY.to_string(), SummaryLength::default())
      .await
      .unwrap_err();
    assert!(matches!(err, Error::Provider(ProviderError::Unavailable)));
    assert_eq!(err.to_string(), "summarization model is not available");
  }
}
