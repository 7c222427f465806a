//! DDL for the `competition` table.
//!
//! The table normally exists before this service starts, in one of several
//! physical layouts. [`competition_ddl`] renders any of those layouts so a
//! fresh database (or a test) can be bootstrapped; the store itself never
//! alters an existing table.

use mierda_core::schema::{OpponentsType, OrganisationColumn};

pub const TABLE: &str = "competition";

/// `CREATE TABLE IF NOT EXISTS` for the given schema variant.
///
/// Native arrays are declared as `TEXT ARRAY`; SQLite keeps the declared
/// type verbatim, which is what the probe matches on.
pub fn competition_ddl(organisation: OrganisationColumn, opponents: OpponentsType) -> String {
  let organisation_column = organisation
    .column_name()
    .map(|name| format!("\n    {name:<22}TEXT,"))
    .unwrap_or_default();

  let opponents_type = match opponents {
    OpponentsType::Json => "JSONB",
    OpponentsType::NativeArray => "TEXT ARRAY",
    OpponentsType::Text => "TEXT",
  };

  format!(
    "CREATE TABLE IF NOT EXISTS {TABLE} (
    id                    INTEGER PRIMARY KEY,{organisation_column}
    division              TEXT,
    competition_name      TEXT NOT NULL,
    total_teams           INTEGER,
    start_period          TEXT,         -- ISO 8601 date
    end_period            TEXT,         -- ISO 8601 date
    football_type         TEXT,
    fcmierda_final_rank   INTEGER,
    competition_champion  TEXT,         -- NULL while ongoing
    opponents             {opponents_type}
);
CREATE INDEX IF NOT EXISTS competition_name_idx ON {TABLE}(competition_name);
"
  )
}
