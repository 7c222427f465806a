//! Core types for the FC Mierda competition records.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! storage backend (`mierda-store-sqlite`) and the JSON API (`mierda-api`)
//! both build on the types, the opponent-list codec and the reconciler
//! defined here.

pub mod competition;
pub mod error;
pub mod opponents;
pub mod patch;
pub mod reconcile;
pub mod schema;
pub mod store;

pub use error::{Error, Result};
