//! The `CompetitionStore` trait.
//!
//! Implemented by storage backends (e.g. `mierda-store-sqlite`). The API
//! layer depends on this abstraction, not on a concrete backend.

use std::future::Future;

use crate::{
  competition::{CompetitionKey, CompetitionRecord},
  patch::CompetitionPatch,
};

/// Diagnostic fields a backend can extract from one of its errors, for
/// logging at the API boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreDiagnostics {
  /// Backend-specific result code, e.g. `ConstraintViolation (2067)`.
  pub code:   Option<String>,
  /// Extra detail reported by the driver alongside the code.
  pub detail: Option<String>,
}

/// Abstraction over the competition table.
///
/// Every method is one unit of work against the store: implementations
/// acquire their connection when called and release it before the returned
/// future resolves, on success and failure alike. Records handed back are
/// always re-read from storage, so callers observe server-side defaults.
pub trait CompetitionStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Pull code and detail out of `error`. Backends without structured
  /// error information keep the default.
  fn diagnostics(_error: &Self::Error) -> StoreDiagnostics {
    StoreDiagnostics::default()
  }

  /// All competitions, most recently ended first (rows without an end
  /// period last), ties broken by descending id.
  fn list(
    &self,
  ) -> impl Future<Output = Result<Vec<CompetitionRecord>, Self::Error>> + Send + '_;

  /// A single competition, or `None` when the key matches no row.
  fn get(
    &self,
    key: CompetitionKey,
  ) -> impl Future<Output = Result<Option<CompetitionRecord>, Self::Error>> + Send + '_;

  /// Insert a new competition built from `patch` reconciled against
  /// [`CompetitionRecord::blank`].
  fn create(
    &self,
    patch: CompetitionPatch,
  ) -> impl Future<Output = Result<CompetitionRecord, Self::Error>> + Send + '_;

  /// Reconcile `patch` against the stored row and persist the result.
  ///
  /// Returns `None` when the key matches no row. Opponents are rewritten
  /// only when `patch.opponents` is `Some`.
  fn update(
    &self,
    key: CompetitionKey,
    patch: CompetitionPatch,
  ) -> impl Future<Output = Result<Option<CompetitionRecord>, Self::Error>> + Send + '_;

  /// Remove a competition. Returns `false` when the key matches no row.
  fn delete(
    &self,
    key: CompetitionKey,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
