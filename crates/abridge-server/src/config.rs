//! Runtime server configuration.
//!
//! Layered with the `config` crate: an optional TOML file, then `ABRIDGE_*`
//! environment variables (e.g. `ABRIDGE_PORT=8080`).

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;

/// Hosted inference endpoint for the default summarization model.
pub const DEFAULT_PROVIDER_ENDPOINT: &str =
  "https://api-inference.huggingface.co/models/facebook/bart-large-cnn";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub host:                     String,
  pub port:                     u16,
  /// SQLite database file. A leading `~/` is expanded.
  pub store_path:               PathBuf,
  pub provider_endpoint:        String,
  /// Sent as a bearer token when set.
  pub provider_token:           Option<String>,
  /// Per-call timeout. Unset means wait as long as inference takes.
  pub provider_timeout_secs:    Option<u64>,
  /// Cap on provider calls in flight. Unset means unbounded.
  pub max_concurrent_inference: Option<usize>,
  /// Overrides accelerator detection when set.
  pub gpu:                      Option<bool>,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:                     "127.0.0.1".to_string(),
      port:                     5000,
      store_path:               PathBuf::from("database.db"),
      provider_endpoint:        DEFAULT_PROVIDER_ENDPOINT.to_string(),
      provider_token:           None,
      provider_timeout_secs:    None,
      max_concurrent_inference: None,
      gpu:                      None,
    }
  }
}

impl ServerConfig {
  /// Read `path` (if it exists) and the environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("ABRIDGE"))
      .build()
      .with_context(|| format!("failed to read config file {path:?}"))?;

    settings
      .try_deserialize()
      .context("failed to deserialise ServerConfig")
  }

  /// `host:port`, ready for binding.
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  /// The store path with a leading `~` expanded.
  pub fn resolved_store_path(&self) -> PathBuf { expand_tilde(&self.store_path) }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn from_toml(toml: &str) -> ServerConfig {
    config::Config::builder()
      .add_source(config::File::from_str(toml, config::FileFormat::Toml))
      .build()
      .unwrap()
      .try_deserialize()
      .unwrap()
  }

  #[test]
  fn empty_file_gives_defaults() {
    let cfg = from_toml("");
    assert_eq!(cfg.address(), "127.0.0.1:5000");
    assert_eq!(cfg.store_path, PathBuf::from("database.db"));
    assert_eq!(cfg.provider_endpoint, DEFAULT_PROVIDER_ENDPOINT);
    assert!(cfg.provider_token.is_none());
    assert!(cfg.max_concurrent_inference.is_none());
    assert!(cfg.gpu.is_none());
  }

  #[test]
  fn file_values_override_defaults() {
    let cfg = from_toml(
      r#"
        host = "0.0.0.0"
        port = 8080
        store_path = "/var/lib/abridge/summaries.db"
        provider_endpoint = "http://localhost:9000/summarize"
        provider_timeout_secs = 120
        max_concurrent_inference = 2
        gpu = true
      "#,
    );
    assert_eq!(cfg.address(), "0.0.0.0:8080");
    assert_eq!(cfg.store_path, PathBuf::from("/var/lib/abridge/summaries.db"));
    assert_eq!(cfg.provider_endpoint, "http://localhost:9000/summarize");
    assert_eq!(cfg.provider_timeout_secs, Some(120));
    assert_eq!(cfg.max_concurrent_inference, Some(2));
    assert_eq!(cfg.gpu, Some(true));
  }

  #[test]
  fn missing_file_is_not_an_error() {
    let cfg = ServerConfig::load(Path::new("/nonexistent/abridge.toml")).unwrap();
    assert!(!cfg.host.is_empty());
  }

  #[test]
  fn tilde_is_expanded() {
    let Ok(home) = std::env::var("HOME") else { return };
    let expanded = expand_tilde(Path::new("~/data/db.sqlite"));
    assert_eq!(expanded, PathBuf::from(home).join("data/db.sqlite"));
    assert_eq!(expand_tilde(Path::new("/abs/db")), PathBuf::from("/abs/db"));
  }
}
