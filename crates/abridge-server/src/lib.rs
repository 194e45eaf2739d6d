//! Server-side collaborators for abridge: configuration, the HTTP inference
//! client, and accelerator detection.
//!
//! The binary in `main.rs` wires these into an [`abridge_api::AppState`].

pub mod accelerator;
pub mod config;
pub mod provider;

pub use accelerator::DeviceProbe;
pub use config::ServerConfig;
pub use provider::{HttpSummarizer, ProviderConfig};
