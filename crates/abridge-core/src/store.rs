//! The `SummaryStore` trait.
//!
//! Implemented by storage backends (e.g. `abridge-store-sqlite`). The API
//! layer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::summary::{NewSummary, Summary, SummaryUpdate};

/// Abstraction over a durable, keyed collection of [`Summary`] records.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait SummaryStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a new record. The store assigns `id`, `created_at`, and
  /// `updated_at` (equal to `created_at`).
  fn create(
    &self,
    input: NewSummary,
  ) -> impl Future<Output = Result<Summary, Self::Error>> + Send + '_;

  /// Retrieve a record by id. Returns `None` if not found.
  fn get(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Summary>, Self::Error>> + Send + '_;

  /// All records, newest first.
  fn list(&self) -> impl Future<Output = Result<Vec<Summary>, Self::Error>> + Send + '_;

  /// Apply `update` and refresh `updated_at` in one write.
  ///
  /// Returns the record as stored afterwards, or `None` if `id` does not
  /// exist.
  fn update(
    &self,
    id: i64,
    update: SummaryUpdate,
  ) -> impl Future<Output = Result<Option<Summary>, Self::Error>> + Send + '_;

  /// Hard-delete a record. Returns `false` if `id` did not exist.
  fn delete(&self, id: i64) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Trivial round-trip used by the health check.
  fn ping(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
