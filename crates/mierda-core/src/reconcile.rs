//! Merging a partial payload into the stored record.
//!
//! | Incoming              | Text field      | Integer field |
//! |-----------------------|-----------------|---------------|
//! | key missing           | keep current    | keep current  |
//! | explicit `null`       | clear           | clear         |
//! | blank after trimming  | keep current    | n/a           |
//! | anything else         | trimmed value   | value         |
//!
//! The organisation is resolved through
//! [`organisation_or_default`] afterwards, so it can never end up empty.
//! Opponents are replaced only when the payload carried the key.

use crate::{
  competition::{CompetitionRecord, organisation_or_default},
  patch::{CompetitionPatch, Patch},
};

/// Apply `incoming` on top of `current`.
pub fn reconcile(
  current: &CompetitionRecord,
  incoming: &CompetitionPatch,
) -> CompetitionRecord {
  let organisation =
    merge_text(Some(current.organisation.as_str()), &incoming.organisation);

  CompetitionRecord {
    id:                   current.id,
    organisation:         organisation_or_default(organisation.as_deref()),
    division:             merge_text(current.division.as_deref(), &incoming.division),
    competition_name:     merge_text(
      Some(current.competition_name.as_str()),
      &incoming.competition_name,
    )
    .unwrap_or_else(|| current.competition_name.clone()),
    total_teams:          merge_integer(current.total_teams, &incoming.total_teams),
    start_period:         merge_text(current.start_period.as_deref(), &incoming.start_period),
    end_period:           merge_text(current.end_period.as_deref(), &incoming.end_period),
    football_type:        merge_text(current.football_type.as_deref(), &incoming.football_type),
    fcmierda_final_rank:  merge_integer(
      current.fcmierda_final_rank,
      &incoming.fcmierda_final_rank,
    ),
    competition_champion: merge_text(
      current.competition_champion.as_deref(),
      &incoming.competition_champion,
    ),
    opponents:            incoming
      .opponents
      .clone()
      .unwrap_or_else(|| current.opponents.clone()),
  }
}

/// A blank submission never erases stored data; only `null` clears.
fn merge_text(current: Option<&str>, incoming: &Patch<String>) -> Option<String> {
  match incoming {
    Patch::Missing => current.map(str::to_owned),
    Patch::Null => None,
    Patch::Value(v) => match v.trim() {
      "" => current.map(str::to_owned),
      trimmed => Some(trimmed.to_owned()),
    },
  }
}

fn merge_integer(current: Option<i64>, incoming: &Patch<i64>) -> Option<i64> {
  match incoming {
    Patch::Missing => current,
    Patch::Null => None,
    Patch::Value(v) => Some(*v),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::competition::DEFAULT_ORGANISATION;

  fn current() -> CompetitionRecord {
    CompetitionRecord {
      id:                   7,
      organisation:         "Sportcity".into(),
      division:             Some("Division 2".into()),
      competition_name:     "Spring League 2025".into(),
      total_teams:          Some(8),
      start_period:         Some("2025-03-01".into()),
      end_period:           Some("2025-06-30".into()),
      football_type:        Some("5v5".into()),
      fcmierda_final_rank:  Some(3),
      competition_champion: None,
      opponents:            vec!["Team A".into(), "Team B".into()],
    }
  }

  #[test]
  fn empty_patch_keeps_everything() {
    assert_eq!(reconcile(&current(), &CompetitionPatch::default()), current());
  }

  #[test]
  fn blank_text_keeps_current_value() {
    let blank = || Patch::Value("   ".to_string());
    let patch = CompetitionPatch {
      division: blank(),
      competition_name: blank(),
      start_period: blank(),
      end_period: blank(),
      football_type: blank(),
      competition_champion: blank(),
      ..Default::default()
    };
    assert_eq!(reconcile(&current(), &patch), current());
  }

  #[test]
  fn null_clears_text_and_integers() {
    let patch = CompetitionPatch {
      division: Patch::Null,
      total_teams: Patch::Null,
      fcmierda_final_rank: Patch::Null,
      ..Default::default()
    };
    let merged = reconcile(&current(), &patch);
    assert_eq!(merged.division, None);
    assert_eq!(merged.total_teams, None);
    assert_eq!(merged.fcmierda_final_rank, None);
    assert_eq!(merged.end_period, current().end_period);
  }

  #[test]
  fn values_are_trimmed_and_applied() {
    let patch = CompetitionPatch {
      competition_champion: Patch::Value("  Team B ".into()),
      total_teams: Patch::Value(10),
      ..Default::default()
    };
    let merged = reconcile(&current(), &patch);
    assert_eq!(merged.competition_champion.as_deref(), Some("Team B"));
    assert_eq!(merged.total_teams, Some(10));
  }

  #[test]
  fn null_or_blank_organisation_falls_back() {
    let patch = CompetitionPatch {
      organisation: Patch::Null,
      ..Default::default()
    };
    assert_eq!(reconcile(&current(), &patch).organisation, DEFAULT_ORGANISATION);

    let mut stored = current();
    stored.organisation = "  ".into();
    let patch = CompetitionPatch {
      organisation: Patch::Value("".into()),
      ..Default::default()
    };
    assert_eq!(reconcile(&stored, &patch).organisation, DEFAULT_ORGANISATION);
  }

  #[test]
  fn opponents_only_replaced_when_present() {
    let merged = reconcile(&current(), &CompetitionPatch::default());
    assert_eq!(merged.opponents, current().opponents);

    let patch = CompetitionPatch {
      opponents: Some(vec![]),
      ..Default::default()
    };
    assert!(reconcile(&current(), &patch).opponents.is_empty());
  }
}
