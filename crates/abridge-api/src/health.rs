//! Handler for `GET /health`.
//!
//! Always answers 200. Degraded subsystems show up as `false` flags.

use abridge_core::{provider::Summarizer, store::SummaryStore};
use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::AppState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Health {
  pub status:             String,
  pub model_loaded:       bool,
  pub gpu_available:      bool,
  pub database_connected: bool,
}

/// `GET /health`
pub async fn handler<S, P>(State(state): State<AppState<S, P>>) -> Json<Health>
where
  S: SummaryStore + 'static,
  P: Summarizer + 'static,
{
  let database_connected = match state.store.ping().await {
    Ok(()) => true,
    Err(e) => {
      tracing::warn!(error = %e, "health check: store unreachable");
      false
    }
  };

  Json(Health {
    status: "healthy".to_owned(),
    model_loaded: state.provider.is_loaded(),
    gpu_available: state.accelerator.available(),
    database_connected,
  })
}
