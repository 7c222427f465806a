//! [`SqliteStore`], the SQLite implementation of [`CompetitionStore`].

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use mierda_core::{
  competition::{CompetitionKey, CompetitionRecord},
  patch::CompetitionPatch,
  schema::{OpponentsType, OrganisationColumn, SchemaProbe},
  store::{CompetitionStore, StoreDiagnostics},
};
use rusqlite::TransactionBehavior;

use crate::{Error, Result, functions, queries, schema::competition_ddl};

// ─── Store ───────────────────────────────────────────────────────────────────

/// The competition table in a single SQLite file.
///
/// Holds nothing but the database path: every operation opens a fresh
/// connection and drops it when done. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct SqliteStore {
  path: PathBuf,
}

impl SqliteStore {
  /// Build a store for a connection string. A `sqlite://` or `sqlite:`
  /// scheme is accepted and stripped; anything else is taken as a path.
  pub fn new(database_url: &str) -> Self {
    let path = database_url
      .strip_prefix("sqlite://")
      .or_else(|| database_url.strip_prefix("sqlite:"))
      .unwrap_or(database_url);
    Self { path: PathBuf::from(path) }
  }

  pub fn path(&self) -> &Path { &self.path }

  /// Open a connection with the store's SQL functions registered.
  async fn connect(&self) -> Result<tokio_rusqlite::Connection> {
    let conn = tokio_rusqlite::Connection::open(&self.path).await?;
    conn
      .call(|conn| {
        conn.busy_timeout(Duration::from_secs(5))?;
        functions::register(conn)?;
        Ok(())
      })
      .await?;
    Ok(conn)
  }

  /// Create the competition table in the given layout if it does not exist.
  pub async fn create_table(
    &self,
    organisation: OrganisationColumn,
    opponents: OpponentsType,
  ) -> Result<()> {
    let ddl = competition_ddl(organisation, opponents);
    self
      .connect()
      .await?
      .call(move |conn| {
        conn.execute_batch(&ddl)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Detect the organisation column and the opponents column type.
  pub async fn probe(&self) -> Result<SchemaProbe> {
    let probe = self
      .connect()
      .await?
      .call(|conn| Ok(queries::probe(conn)?))
      .await?;
    Ok(probe)
  }
}

// ─── CompetitionStore impl ───────────────────────────────────────────────────

impl CompetitionStore for SqliteStore {
  type Error = Error;

  fn diagnostics(error: &Error) -> StoreDiagnostics { error.diagnostics() }

  async fn list(&self) -> Result<Vec<CompetitionRecord>> {
    let rows = self
      .connect()
      .await?
      .call(|conn| Ok(queries::fetch_all(conn)?))
      .await?;
    Ok(rows)
  }

  async fn get(&self, key: CompetitionKey) -> Result<Option<CompetitionRecord>> {
    let row = self
      .connect()
      .await?
      .call(move |conn| {
        let probe = queries::probe(conn)?;
        Ok(queries::fetch_one(conn, probe.organisation, &key)?)
      })
      .await?;
    Ok(row)
  }

  async fn create(&self, patch: CompetitionPatch) -> Result<CompetitionRecord> {
    let record = self
      .connect()
      .await?
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let record = queries::insert(&tx, &patch)?;
        tx.commit()?;
        Ok(record)
      })
      .await?;
    tracing::info!(id = record.id, name = %record.competition_name, "created competition");
    Ok(record)
  }

  async fn update(
    &self,
    key: CompetitionKey,
    patch: CompetitionPatch,
  ) -> Result<Option<CompetitionRecord>> {
    let record = self
      .connect()
      .await?
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let record = queries::update(&tx, &key, &patch)?;
        tx.commit()?;
        Ok(record)
      })
      .await?;
    if let Some(r) = &record {
      tracing::info!(id = r.id, name = %r.competition_name, "updated competition");
    }
    Ok(record)
  }

  async fn delete(&self, key: CompetitionKey) -> Result<bool> {
    let target = key.clone();
    let deleted = self
      .connect()
      .await?
      .call(move |conn| Ok(queries::delete(conn, &target)?))
      .await?;
    if deleted {
      tracing::info!(%key, "deleted competition");
    }
    Ok(deleted)
  }
}
