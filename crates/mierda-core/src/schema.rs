//! Capabilities of the live `competition` table, as detected by a probe.
//!
//! The table predates this code. The organisation field exists under either
//! the British or the American spelling (or not at all), and the opponents
//! column may be JSON, a native array or plain text. Storage backends detect
//! both once per request and branch on the enums below.

/// Which physical column carries organisation semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrganisationColumn {
  /// `organisation`
  Uk,
  /// `organization`
  Us,
  /// Neither column exists. Reads see `NULL`; writes skip the field.
  Absent,
}

impl OrganisationColumn {
  pub const UK_NAME: &'static str = "organisation";
  pub const US_NAME: &'static str = "organization";

  /// Resolve from the table's column names, preferring the UK spelling.
  pub fn resolve<'a>(columns: impl IntoIterator<Item = &'a str>) -> Self {
    let mut found = Self::Absent;
    for column in columns {
      if column.eq_ignore_ascii_case(Self::UK_NAME) {
        return Self::Uk;
      }
      if column.eq_ignore_ascii_case(Self::US_NAME) {
        found = Self::Us;
      }
    }
    found
  }

  pub fn column_name(self) -> Option<&'static str> {
    match self {
      Self::Uk => Some(Self::UK_NAME),
      Self::Us => Some(Self::US_NAME),
      Self::Absent => None,
    }
  }
}

/// Physical type of the `opponents` column, i.e. the codec target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpponentsType {
  Json,
  NativeArray,
  Text,
}

impl OpponentsType {
  /// Map a type string reported by the column catalog.
  ///
  /// `jsonb` matches exactly (ignoring ASCII case); any type carrying an
  /// array marker (`ARRAY`, `[]`) is a native array; everything else,
  /// including an empty declared type, is plain text.
  pub fn from_catalog_type(reported: &str) -> Self {
    let reported = reported.trim().to_ascii_lowercase();
    if reported == "jsonb" {
      Self::Json
    } else if reported.contains("array") || reported.contains("[]") {
      Self::NativeArray
    } else {
      Self::Text
    }
  }
}

/// Result of probing the live schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaProbe {
  pub organisation: OrganisationColumn,
  pub opponents:    OpponentsType,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn uk_spelling_wins_when_both_exist() {
    let cols = ["id", "organization", "organisation", "division"];
    assert_eq!(OrganisationColumn::resolve(cols), OrganisationColumn::Uk);
  }

  #[test]
  fn us_spelling_used_when_alone() {
    let cols = ["id", "organization"];
    assert_eq!(OrganisationColumn::resolve(cols), OrganisationColumn::Us);
  }

  #[test]
  fn neither_spelling_is_absent() {
    let cols = ["id", "division"];
    assert_eq!(OrganisationColumn::resolve(cols), OrganisationColumn::Absent);
    assert_eq!(OrganisationColumn::Absent.column_name(), None);
  }

  #[test]
  fn catalog_types_map_to_codec_targets() {
    assert_eq!(OpponentsType::from_catalog_type("jsonb"), OpponentsType::Json);
    assert_eq!(OpponentsType::from_catalog_type("JSONB"), OpponentsType::Json);
    assert_eq!(OpponentsType::from_catalog_type("ARRAY"), OpponentsType::NativeArray);
    assert_eq!(OpponentsType::from_catalog_type("TEXT ARRAY"), OpponentsType::NativeArray);
    assert_eq!(OpponentsType::from_catalog_type("text[]"), OpponentsType::NativeArray);
    assert_eq!(OpponentsType::from_catalog_type("json"), OpponentsType::Text);
    assert_eq!(OpponentsType::from_catalog_type("TEXT"), OpponentsType::Text);
    assert_eq!(OpponentsType::from_catalog_type(""), OpponentsType::Text);
  }
}
