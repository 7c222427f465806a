//! Synchronous statements run inside `tokio_rusqlite::Connection::call`.
//!
//! Every function takes a plain [`rusqlite::Connection`] (transactions deref
//! to one), so an operation can chain probe, read and write on a single
//! connection.

use mierda_core::{
  competition::{CompetitionKey, CompetitionRecord},
  opponents::{ARRAY_DELIMITER, EncodedOpponents, encode},
  patch::CompetitionPatch,
  reconcile::reconcile,
  schema::{OpponentsType, OrganisationColumn, SchemaProbe},
};
use rusqlite::{Connection, OptionalExtension as _, ToSql, params};

use crate::{
  encode::{RawCompetition, key_filter, select_list},
  schema::TABLE,
};

// ─── Probe ───────────────────────────────────────────────────────────────────

/// Inspect the live column catalog of the competition table.
///
/// A missing table reports no columns and therefore probes as
/// `Absent`/`Text`; the statements that follow surface the real error.
pub fn probe(conn: &Connection) -> rusqlite::Result<SchemaProbe> {
  let mut stmt = conn.prepare(&format!("PRAGMA table_info({TABLE})"))?;
  let columns = stmt
    .query_map([], |row| Ok((row.get::<_, String>(1)?, row.get::<_, String>(2)?)))?
    .collect::<rusqlite::Result<Vec<_>>>()?;

  let organisation = OrganisationColumn::resolve(columns.iter().map(|(name, _)| name.as_str()));
  let opponents = columns
    .iter()
    .find(|(name, _)| name.eq_ignore_ascii_case("opponents"))
    .map(|(_, declared)| OpponentsType::from_catalog_type(declared))
    .unwrap_or(OpponentsType::Text);

  let probe = SchemaProbe { organisation, opponents };
  tracing::debug!(?probe, "probed competition schema");
  Ok(probe)
}

// ─── Reads ───────────────────────────────────────────────────────────────────

pub fn fetch_one(
  conn: &Connection,
  organisation: OrganisationColumn,
  key: &CompetitionKey,
) -> rusqlite::Result<Option<CompetitionRecord>> {
  let (predicate, value) = key_filter(key);
  let sql = format!(
    "SELECT {} FROM {TABLE} WHERE {predicate} LIMIT 1",
    select_list(organisation)
  );
  let raw = conn
    .query_row(&sql, [value], RawCompetition::from_row)
    .optional()?;
  Ok(raw.map(RawCompetition::into_record))
}

fn fetch_all_with(
  conn: &Connection,
  organisation: OrganisationColumn,
) -> rusqlite::Result<Vec<CompetitionRecord>> {
  let sql = format!(
    "SELECT {} FROM {TABLE} ORDER BY end_period DESC NULLS LAST, id DESC",
    select_list(organisation)
  );
  let mut stmt = conn.prepare(&sql)?;
  let rows = stmt
    .query_map([], RawCompetition::from_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows.into_iter().map(RawCompetition::into_record).collect())
}

/// List every competition without probing first.
///
/// The UK-spelled query runs first; any failure is taken as a schema
/// mismatch and the US spelling is tried, then a query without the
/// organisation column. The error of the last attempt is returned.
pub fn fetch_all(conn: &Connection) -> rusqlite::Result<Vec<CompetitionRecord>> {
  let err = match fetch_all_with(conn, OrganisationColumn::Uk) {
    Ok(rows) => return Ok(rows),
    Err(err) => err,
  };
  tracing::warn!(error = %err, "listing by `organisation` failed, retrying with `organization`");

  let err = match fetch_all_with(conn, OrganisationColumn::Us) {
    Ok(rows) => return Ok(rows),
    Err(err) => err,
  };
  tracing::warn!(error = %err, "listing by `organization` failed, retrying without organisation");

  fetch_all_with(conn, OrganisationColumn::Absent)
}

// ─── Writes ──────────────────────────────────────────────────────────────────

/// Named parameters for the scalar columns of `record`, organisation first
/// when the schema has a column for it.
fn field_params<'a>(
  organisation: OrganisationColumn,
  record: &'a CompetitionRecord,
) -> Vec<(&'static str, &'a dyn ToSql)> {
  let mut params: Vec<(&'static str, &dyn ToSql)> = Vec::with_capacity(10);
  if organisation.column_name().is_some() {
    params.push((":organisation", &record.organisation as &dyn ToSql));
  }
  let fields: [(&'static str, &dyn ToSql); 8] = [
    (":division", &record.division),
    (":competition_name", &record.competition_name),
    (":total_teams", &record.total_teams),
    (":start_period", &record.start_period),
    (":end_period", &record.end_period),
    (":football_type", &record.football_type),
    (":fcmierda_final_rank", &record.fcmierda_final_rank),
    (":competition_champion", &record.competition_champion),
  ];
  params.extend(fields);
  params
}

/// The three update shapes: UK column, US column, or no organisation column.
fn update_sql(organisation: OrganisationColumn) -> String {
  let assign_organisation = organisation
    .column_name()
    .map(|column| format!("{column} = :organisation,"))
    .unwrap_or_default();
  format!(
    "UPDATE {TABLE} SET {assign_organisation}
       division = :division,
       competition_name = :competition_name,
       total_teams = :total_teams,
       start_period = :start_period,
       end_period = :end_period,
       football_type = :football_type,
       fcmierda_final_rank = :fcmierda_final_rank,
       competition_champion = :competition_champion
     WHERE id = :id"
  )
}

fn insert_sql(organisation: OrganisationColumn) -> String {
  let (column, value) = match organisation.column_name() {
    Some(column) => (format!("{column}, "), ":organisation, "),
    None => (String::new(), ""),
  };
  format!(
    "INSERT INTO {TABLE} (
       {column}division, competition_name, total_teams, start_period,
       end_period, football_type, fcmierda_final_rank, competition_champion
     ) VALUES (
       {value}:division, :competition_name, :total_teams, :start_period,
       :end_period, :football_type, :fcmierda_final_rank, :competition_champion
     )"
  )
}

/// Rewrite the opponents of row `id`, encoded for the probed column type.
pub fn write_opponents(
  conn: &Connection,
  target: OpponentsType,
  id: i64,
  list: &[String],
) -> rusqlite::Result<()> {
  match encode(list, target) {
    EncodedOpponents::Json(text) => {
      conn.execute(
        &format!("UPDATE {TABLE} SET opponents = ?1 WHERE id = ?2"),
        params![text, id],
      )?;
    }
    EncodedOpponents::Delimited(joined) => {
      conn.execute(
        &format!(
          "UPDATE {TABLE}
           SET opponents = CASE WHEN ?1 = '' THEN '{{}}'
                                ELSE string_to_array(?1, '{ARRAY_DELIMITER}') END
           WHERE id = ?2"
        ),
        params![joined, id],
      )?;
    }
  }
  Ok(())
}

/// Load, reconcile and persist. `None` when `key` matches no row.
pub fn update(
  conn: &Connection,
  key: &CompetitionKey,
  patch: &CompetitionPatch,
) -> rusqlite::Result<Option<CompetitionRecord>> {
  let probe = probe(conn)?;

  let Some(current) = fetch_one(conn, probe.organisation, key)? else {
    return Ok(None);
  };
  let merged = reconcile(&current, patch);

  let mut params = field_params(probe.organisation, &merged);
  params.push((":id", &merged.id as &dyn ToSql));
  conn.execute(&update_sql(probe.organisation), params.as_slice())?;

  if patch.opponents.is_some() {
    write_opponents(conn, probe.opponents, merged.id, &merged.opponents)?;
  }

  fetch_one(conn, probe.organisation, &CompetitionKey::Id(merged.id))
}

/// Insert a new row built from `patch` and return it as stored.
pub fn insert(
  conn: &Connection,
  patch: &CompetitionPatch,
) -> rusqlite::Result<CompetitionRecord> {
  let probe = probe(conn)?;
  let record = reconcile(&CompetitionRecord::blank(), patch);

  conn.execute(
    &insert_sql(probe.organisation),
    field_params(probe.organisation, &record).as_slice(),
  )?;
  let id = conn.last_insert_rowid();
  write_opponents(conn, probe.opponents, id, &record.opponents)?;

  fetch_one(conn, probe.organisation, &CompetitionKey::Id(id))?
    .ok_or(rusqlite::Error::QueryReturnedNoRows)
}

/// Delete the row `key` addresses; by name, only the first match.
pub fn delete(conn: &Connection, key: &CompetitionKey) -> rusqlite::Result<bool> {
  let (predicate, value) = key_filter(key);
  let changed = conn.execute(
    &format!(
      "DELETE FROM {TABLE}
       WHERE id = (SELECT id FROM {TABLE} WHERE {predicate} LIMIT 1)"
    ),
    [value],
  )?;
  Ok(changed > 0)
}
