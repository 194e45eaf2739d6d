//! JSON REST API for abridge.
//!
//! Exposes an axum [`Router`] backed by any [`SummaryStore`] and
//! [`Summarizer`]. TLS and process concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = abridge_api::app(state); // everything under /api, with tracing
//! ```

pub mod error;
pub mod health;
pub mod summaries;

use std::sync::Arc;

use abridge_core::{
  provider::{AcceleratorProbe, Summarizer},
  store::SummaryStore,
};
use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
///
/// Every collaborator is passed in explicitly, so tests can substitute a fake
/// provider or a throwaway store.
pub struct AppState<S, P> {
  pub store:       Arc<S>,
  pub provider:    Arc<P>,
  pub accelerator: Arc<dyn AcceleratorProbe>,
}

impl<S, P> AppState<S, P> {
  pub fn new(store: S, provider: P, accelerator: impl AcceleratorProbe + 'static) -> Self {
    Self {
      store:       Arc::new(store),
      provider:    Arc::new(provider),
      accelerator: Arc::new(accelerator),
    }
  }
}

impl<S, P> Clone for AppState<S, P> {
  fn clone(&self) -> Self {
    Self {
      store:       Arc::clone(&self.store),
      provider:    Arc::clone(&self.provider),
      accelerator: Arc::clone(&self.accelerator),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the API router for `state`, with paths relative to the mount point.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S, P>(state: AppState<S, P>) -> Router<()>
where
  S: SummaryStore + 'static,
  P: Summarizer + 'static,
{
  Router::new()
    .route(
      "/summaries",
      get(summaries::list::<S, P>).post(summaries::create::<S, P>),
    )
    .route(
      "/summaries/",
      get(summaries::list::<S, P>).post(summaries::create::<S, P>),
    )
    .route(
      "/summaries/{id}",
      get(summaries::get_one::<S, P>)
        .put(summaries::update::<S, P>)
        .delete(summaries::delete_one::<S, P>),
    )
    .route("/health", get(health::handler::<S, P>))
    .with_state(state)
}

/// The full application: [`api_router`] mounted at `/api`, with request
/// tracing.
pub fn app<S, P>(state: AppState<S, P>) -> Router
where
  S: SummaryStore + 'static,
  P: Summarizer + 'static,
{
  Router::new()
    .nest("/api", api_router(state))
    .layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────
