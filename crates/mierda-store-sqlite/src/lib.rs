//! SQLite backend for the competition records.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. Each store operation opens its own
//! connection and drops it before returning.

mod encode;
mod functions;
mod queries;
mod store;

pub mod error;
pub mod schema;

pub use error::{Error, Result};
pub use store::SqliteStore;
