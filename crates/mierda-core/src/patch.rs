//! Parse-and-validate step for create/update payloads.
//!
//! The JSON body is inspected once, here, and turned into an immutable
//! [`CompetitionPatch`]. Nothing past this boundary sees an untyped map.

use serde_json::{Map, Value};

use crate::{Error, Result, opponents};

/// The state of one field in a partial payload.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Patch<T> {
  /// The key was not present at all.
  #[default]
  Missing,
  /// The key was present with an explicit `null`.
  Null,
  /// The key carried a usable value.
  Value(T),
}

impl Patch<String> {
  /// Read a text field. Non-string values are treated like a missing key.
  fn text(body: &Map<String, Value>, key: &str) -> Self {
    match body.get(key) {
      None => Self::Missing,
      Some(Value::Null) => Self::Null,
      Some(Value::String(s)) => Self::Value(s.clone()),
      Some(_) => Self::Missing,
    }
  }
}

impl Patch<i64> {
  /// Read an integer field. Values that are not whole numbers are treated
  /// like a missing key; validation reports them separately.
  fn integer(body: &Map<String, Value>, key: &str) -> Self {
    match body.get(key) {
      None => Self::Missing,
      Some(Value::Null) => Self::Null,
      Some(Value::Number(n)) => n.as_i64().map_or(Self::Missing, Self::Value),
      Some(_) => Self::Missing,
    }
  }
}

/// A validated create/update payload.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompetitionPatch {
  pub organisation:         Patch<String>,
  pub division:             Patch<String>,
  pub competition_name:     Patch<String>,
  pub total_teams:          Patch<i64>,
  pub start_period:         Patch<String>,
  pub end_period:           Patch<String>,
  pub football_type:        Patch<String>,
  pub fcmierda_final_rank:  Patch<i64>,
  pub competition_champion: Patch<String>,
  /// `Some` only when the payload carried an `opponents` key. An explicit
  /// `null` decodes to an empty list and clears the stored opponents.
  pub opponents:            Option<Vec<String>>,
}

impl CompetitionPatch {
  /// Validate `payload` and build the patch.
  ///
  /// All problems are collected before returning, so the caller gets one
  /// message per offending field.
  pub fn parse(payload: &Value) -> Result<Self> {
    let Some(body) = payload.as_object() else {
      return Err(Error::Validation(vec![
        "payload must be a JSON object".to_owned(),
      ]));
    };

    let mut errors = Vec::new();

    match body.get("competition_name") {
      Some(Value::String(s)) if !s.trim().is_empty() => {}
      _ => errors.push("competition_name is required".to_owned()),
    }

    for key in ["total_teams", "fcmierda_final_rank"] {
      match body.get(key) {
        None | Some(Value::Null) => {}
        Some(Value::Number(n)) if n.is_i64() => {}
        Some(Value::Number(_)) => {
          errors.push(format!("{key} must be a whole number"));
        }
        Some(_) => errors.push(format!("{key} must be a number or null")),
      }
    }

    match body.get("opponents") {
      None | Some(Value::Null) | Some(Value::Array(_)) => {}
      Some(_) => errors.push("opponents must be an array".to_owned()),
    }

    if !errors.is_empty() {
      return Err(Error::Validation(errors));
    }

    Ok(Self {
      organisation:         Patch::text(body, "organisation"),
      division:             Patch::text(body, "division"),
      competition_name:     Patch::text(body, "competition_name"),
      total_teams:          Patch::integer(body, "total_teams"),
      start_period:         Patch::text(body, "start_period"),
      end_period:           Patch::text(body, "end_period"),
      football_type:        Patch::text(body, "football_type"),
      fcmierda_final_rank:  Patch::integer(body, "fcmierda_final_rank"),
      competition_champion: Patch::text(body, "competition_champion"),
      opponents:            body.get("opponents").map(opponents::decode),
    })
  }
}
