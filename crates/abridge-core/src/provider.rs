//! The summarization provider and accelerator probe abstractions.
//!
//! The inference backend is external. Everything in this crate talks to it
//! through [`Summarizer`], so the backend can be swapped for a fake in tests.

use std::future::Future;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default upper bound on generated summary length, in model tokens.
pub const DEFAULT_MAX_LENGTH: u32 = 130;
/// Default lower bound on generated summary length, in model tokens.
pub const DEFAULT_MIN_LENGTH: u32 = 30;

/// Length bounds forwarded to the provider on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryLength {
  pub max_length: u32,
  pub min_length: u32,
}

impl Default for SummaryLength {
  fn default() -> Self {
    Self {
      max_length: DEFAULT_MAX_LENGTH,
      min_length: DEFAULT_MIN_LENGTH,
    }
  }
}

impl SummaryLength {
  /// Fill unset bounds with the defaults and check they are usable.
  pub fn resolve(max_length: Option<u32>, min_length: Option<u32>) -> crate::Result<Self> {
    let length = Self {
      max_length: max_length.unwrap_or(DEFAULT_MAX_LENGTH),
      min_length: min_length.unwrap_or(DEFAULT_MIN_LENGTH),
    };
    if length.max_length == 0 {
      return Err(crate::Error::ZeroMaxLength);
    }
    if length.min_length > length.max_length {
      return Err(crate::Error::LengthOrder {
        min: length.min_length,
        max: length.max_length,
      });
    }
    Ok(length)
  }
}

/// A failed inference call. The display text is what callers see.
#[derive(Debug, Error)]
pub enum ProviderError {
  #[error("inference request failed: {0}")]
  Request(String),

  #[error("inference backend returned {status}: {body}")]
  Status { status: u16, body: String },

  #[error("inference backend returned no summary")]
  EmptyResponse,

  #[error("summarization model is not available")]
  Unavailable,
}

/// A black-box text summarizer.
///
/// Calls are awaited to completion; there is no cancellation or retry at this
/// layer.
pub trait Summarizer: Send + Sync {
  /// Produce a summary of `text` within the given length bounds.
  fn summarize<'a>(
    &'a self,
    text: &'a str,
    length: SummaryLength,
  ) -> impl Future<Output = Result<String, ProviderError>> + Send + 'a;

  /// Whether the model is ready to serve requests.
  fn is_loaded(&self) -> bool;
}

/// Reports whether accelerated compute is available to the inference backend.
pub trait AcceleratorProbe: Send + Sync {
  fn available(&self) -> bool;
}

/// A probe with a fixed answer.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticProbe(pub bool);

impl AcceleratorProbe for StaticProbe {
  fn available(&self) -> bool { self.0 }
}
