//! [`HttpSummarizer`]: a [`Summarizer`] backed by a hosted inference API.
//!
//! Speaks the Hugging Face inference protocol for summarization models:
//!
//! ```text
//! POST {endpoint}
//! {"inputs": "...", "parameters": {"max_length": 130, "min_length": 30},
//!  "options": {"wait_for_model": true}}
//!
//! 200 [{"summary_text": "..."}]
//! ```

use std::{
  sync::atomic::{AtomicBool, Ordering},
  time::Duration,
};

use abridge_core::provider::{ProviderError, Summarizer, SummaryLength};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;

use crate::config::ServerConfig;

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
  inputs:     &'a str,
  parameters: SummaryLength,
  options:    InferenceOptions,
}

#[derive(Debug, Serialize)]
struct InferenceOptions {
  wait_for_model: bool,
}

#[derive(Debug, Deserialize)]
struct InferenceOutput {
  summary_text: String,
}

/// Connection settings for [`HttpSummarizer`].
#[derive(Debug, Clone)]
pub struct ProviderConfig {
  pub endpoint:       String,
  pub token:          Option<String>,
  pub timeout:        Option<Duration>,
  pub max_concurrent: Option<usize>,
}

impl From<&ServerConfig> for ProviderConfig {
  fn from(cfg: &ServerConfig) -> Self {
    Self {
      endpoint:       cfg.provider_endpoint.clone(),
      token:          cfg.provider_token.clone(),
      timeout:        cfg.provider_timeout_secs.map(Duration::from_secs),
      max_concurrent: cfg.max_concurrent_inference,
    }
  }
}

/// Summarizer that forwards every call to a remote model endpoint.
pub struct HttpSummarizer {
  http:     Client,
  endpoint: String,
  token:    Option<String>,
  permits:  Option<Semaphore>,
  /// Cleared when the backend reports the model is still loading; set again
  /// by the next successful call.
  loaded:   AtomicBool,
}

impl HttpSummarizer {
  pub fn new(config: ProviderConfig) -> Result<Self, reqwest::Error> {
    let mut builder = Client::builder();
    if let Some(timeout) = config.timeout {
      builder = builder.timeout(timeout);
    }
    Ok(Self {
      http:     builder.build()?,
      endpoint: config.endpoint,
      token:    config.token,
      permits:  config.max_concurrent.map(|n| Semaphore::new(n.max(1))),
      loaded:   AtomicBool::new(true),
    })
  }

  pub fn endpoint(&self) -> &str { &self.endpoint }

  async fn request(&self, text: &str, length: SummaryLength) -> Result<String, ProviderError> {
    let body = InferenceRequest {
      inputs:     text,
      parameters: length,
      options:    InferenceOptions { wait_for_model: true },
    };

    let mut req = self.http.post(&self.endpoint).json(&body);
    if let Some(token) = &self.token {
      req = req.bearer_auth(token);
    }

    tracing::debug!(endpoint = %self.endpoint, ?length, "sending inference request");
    let response = req
      .send()
      .await
      .map_err(|e| ProviderError::Request(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
      if status == StatusCode::SERVICE_UNAVAILABLE {
        self.loaded.store(false, Ordering::Relaxed);
      }
      let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
      return Err(ProviderError::Status {
        status: status.as_u16(),
        body,
      });
    }

    let outputs: Vec<InferenceOutput> = response
      .json()
      .await
      .map_err(|e| ProviderError::Request(e.to_string()))?;
    self.loaded.store(true, Ordering::Relaxed);

    outputs
      .into_iter()
      .next()
      .map(|o| o.summary_text)
      .ok_or(ProviderError::EmptyResponse)
  }
}

impl Summarizer for HttpSummarizer {
  async fn summarize(&self, text: &str, length: SummaryLength) -> Result<String, ProviderError> {
    let _permit = match &self.permits {
      Some(permits) => Some(
        permits
          .acquire()
          .await
          .map_err(|_| ProviderError::Unavailable)?,
      ),
      None => None,
    };
    self.request(text, length).await
  }

  fn is_loaded(&self) -> bool { self.loaded.load(Ordering::Relaxed) }
}
