//! Error types for `mierda-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The payload failed validation. Each entry is a human-readable message.
  #[error("{}", .0.join("; "))]
  Validation(Vec<String>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
