//! Conversions between competition rows and domain types.

use mierda_core::{
  competition::{CompetitionKey, CompetitionRecord, organisation_or_default},
  opponents,
  schema::OrganisationColumn,
};
use rusqlite::{Row, types::Value};

// ─── Select list ─────────────────────────────────────────────────────────────

/// Column list for reads. The organisation expression follows the probed
/// column; without one it reads as `NULL` so the row shape never changes.
pub fn select_list(organisation: OrganisationColumn) -> String {
  let organisation_expr = organisation.column_name().unwrap_or("NULL");
  format!(
    "id, {organisation_expr} AS organisation, division, competition_name,
     total_teams, start_period, end_period, football_type,
     fcmierda_final_rank, competition_champion, opponents"
  )
}

// ─── Key ─────────────────────────────────────────────────────────────────────

/// `WHERE` predicate and bound value selecting the row `key` addresses.
pub fn key_filter(key: &CompetitionKey) -> (&'static str, Value) {
  match key {
    CompetitionKey::Id(id) => ("id = ?1", Value::Integer(*id)),
    CompetitionKey::Name(name) => ("competition_name = ?1", Value::Text(name.clone())),
  }
}

// ─── Row type ────────────────────────────────────────────────────────────────

/// A `competition` row as stored, before normalisation.
pub struct RawCompetition {
  pub id:                   i64,
  pub organisation:         Option<String>,
  pub division:             Option<String>,
  pub competition_name:     String,
  pub total_teams:          Option<i64>,
  pub start_period:         Option<String>,
  pub end_period:           Option<String>,
  pub football_type:        Option<String>,
  pub fcmierda_final_rank:  Option<i64>,
  pub competition_champion: Option<String>,
  pub opponents:            Value,
}

impl RawCompetition {
  /// Read a row selected with [`select_list`].
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:                   row.get(0)?,
      organisation:         row.get(1)?,
      division:             row.get(2)?,
      competition_name:     row.get(3)?,
      total_teams:          row.get(4)?,
      start_period:         row.get(5)?,
      end_period:           row.get(6)?,
      football_type:        row.get(7)?,
      fcmierda_final_rank:  row.get(8)?,
      competition_champion: row.get(9)?,
      opponents:            row.get(10)?,
    })
  }

  /// Apply the organisation fallback and decode the opponents column.
  pub fn into_record(self) -> CompetitionRecord {
    // JSONB columns have NUMERIC affinity, so a bare legacy `7` comes back
    // as an integer.
    let opponents = match &self.opponents {
      Value::Text(text) => opponents::decode_str(text),
      Value::Integer(n) => opponents::decode_str(&n.to_string()),
      Value::Real(n) => opponents::decode_str(&n.to_string()),
      Value::Blob(bytes) => opponents::decode_str(&String::from_utf8_lossy(bytes)),
      Value::Null => Vec::new(),
    };

    CompetitionRecord {
      id: self.id,
      organisation: organisation_or_default(self.organisation.as_deref()),
      division: self.division,
      competition_name: self.competition_name,
      total_teams: self.total_teams,
      start_period: self.start_period,
      end_period: self.end_period,
      football_type: self.football_type,
      fcmierda_final_rank: self.fcmierda_final_rank,
      competition_champion: self.competition_champion,
      opponents,
    }
  }
}
