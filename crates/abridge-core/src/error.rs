//! Error types for `abridge-core`.

use thiserror::Error;

use crate::provider::ProviderError;

#[derive(Debug, Error)]
pub enum Error {
  #[error("this text is too short to summarize")]
  TextTooShort { words: usize },

  #[error("invalid summary length: min_length {min} exceeds max_length {max}")]
  LengthOrder { min: u32, max: u32 },

  #[error("invalid summary length: max_length must be positive")]
  ZeroMaxLength,

  #[error("title exceeds {max} characters")]
  TitleTooLong { max: usize },

  #[error("{0}")]
  Provider(#[from] ProviderError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
