//! Competition records and the keys used to address them.

use serde::{Deserialize, Serialize};

/// Organisation reported whenever a record carries no usable value.
pub const DEFAULT_ORGANISATION: &str = "Powerleague Rotterdam";

/// Resolve a stored or submitted organisation against the fallback.
///
/// `None`, empty and whitespace-only values all resolve to
/// [`DEFAULT_ORGANISATION`]; anything else is returned as given.
pub fn organisation_or_default(value: Option<&str>) -> String {
  match value {
    Some(v) if !v.trim().is_empty() => v.to_owned(),
    _ => DEFAULT_ORGANISATION.to_owned(),
  }
}

// ─── Record ──────────────────────────────────────────────────────────────────

/// One competition/season entry, as observed by readers.
///
/// `organisation` is never empty and `opponents` is always a plain ordered
/// list, whatever the physical layout of the underlying table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitionRecord {
  pub id:                   i64,
  pub organisation:         String,
  pub division:             Option<String>,
  pub competition_name:     String,
  pub total_teams:          Option<i64>,
  pub start_period:         Option<String>,
  pub end_period:           Option<String>,
  pub football_type:        Option<String>,
  pub fcmierda_final_rank:  Option<i64>,
  /// `None` while the competition is still running.
  pub competition_champion: Option<String>,
  pub opponents:            Vec<String>,
}

impl CompetitionRecord {
  /// The "current" side of a reconciliation for a row that does not exist
  /// yet. Every optional field is empty and the organisation is already
  /// resolved to the fallback.
  pub fn blank() -> Self {
    Self {
      id:                   0,
      organisation:         DEFAULT_ORGANISATION.to_owned(),
      division:             None,
      competition_name:     String::new(),
      total_teams:          None,
      start_period:         None,
      end_period:           None,
      football_type:        None,
      fcmierda_final_rank:  None,
      competition_champion: None,
      opponents:            Vec::new(),
    }
  }
}

// ─── Key ─────────────────────────────────────────────────────────────────────

/// How a client addresses a single competition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompetitionKey {
  /// Numeric surrogate key.
  Id(i64),
  /// Exact match on `competition_name`, already trimmed.
  Name(String),
}

impl CompetitionKey {
  /// Classify a raw path segment.
  ///
  /// An all-digit key is an id lookup; anything else (including digit
  /// strings too large for an `i64`) is an exact name lookup on the trimmed
  /// key.
  pub fn classify(raw: &str) -> Self {
    if !raw.is_empty()
      && raw.bytes().all(|b| b.is_ascii_digit())
      && let Ok(id) = raw.parse()
    {
      return Self::Id(id);
    }
    Self::Name(raw.trim().to_owned())
  }
}

impl std::fmt::Display for CompetitionKey {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Id(id) => write!(f, "{id}"),
      Self::Name(name) => write!(f, "{name:?}"),
    }
  }
}
