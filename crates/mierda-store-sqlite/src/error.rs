//! Error type for `mierda-store-sqlite`.

use mierda_core::store::StoreDiagnostics;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Displays the driver's own message, e.g. `no such table: competition`.
  #[error("{}", driver_message(.0))]
  Database(#[from] tokio_rusqlite::Error),
}

fn driver_message(err: &tokio_rusqlite::Error) -> String {
  match err {
    tokio_rusqlite::Error::Rusqlite(inner) => inner.to_string(),
    other => other.to_string(),
  }
}

impl Error {
  /// SQLite result code and driver message, when the failure came from
  /// SQLite itself.
  pub fn diagnostics(&self) -> StoreDiagnostics {
    let Error::Database(tokio_rusqlite::Error::Rusqlite(err)) = self else {
      return StoreDiagnostics::default();
    };
    match err {
      rusqlite::Error::SqliteFailure(failure, detail) => StoreDiagnostics {
        code:   Some(format!("{:?} ({})", failure.code, failure.extended_code)),
        detail: detail.clone(),
      },
      other => StoreDiagnostics {
        code:   None,
        detail: Some(other.to_string()),
      },
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
