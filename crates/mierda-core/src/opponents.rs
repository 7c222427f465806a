//! Opponent-list codec.
//!
//! Logically the opponents of a competition are an ordered list of team
//! names. Physically the column holds one of three encodings depending on its
//! declared type:
//!
//! - JSON array text: `["Team A","Team B"]`
//! - an array literal: `{"Team A","Team B"}`
//! - legacy comma-separated text: `Team A, Team B`
//!
//! [`decode`] accepts any of them and fails soft: input it cannot make sense
//! of yields an empty list rather than an error. [`encode`] picks the output
//! form strictly from the probed [`OpponentsType`].

use serde_json::Value;

use crate::schema::OpponentsType;

/// Separator used to hand a list to the array constructor of a
/// native-array column.
///
/// Names containing this character are split in two on that path. That is a
/// known lossy boundary; the JSON path is exact.
pub const ARRAY_DELIMITER: char = '|';

// ─── Decode ──────────────────────────────────────────────────────────────────

/// Normalise any stored or submitted opponents value to a plain list.
///
/// Sequences are taken element-wise (strings as-is, numbers and booleans in
/// their textual form, anything else dropped). Strings go through
/// [`decode_str`]. Every other value decodes to an empty list.
pub fn decode(raw: &Value) -> Vec<String> {
  match raw {
    Value::Array(items) => clean(items.iter().filter_map(scalar_text)),
    Value::String(s) => decode_str(s),
    _ => Vec::new(),
  }
}

/// Decode a textual column value. Never fails; see the module docs for the
/// accepted forms.
pub fn decode_str(raw: &str) -> Vec<String> {
  let trimmed = raw.trim();

  if trimmed.starts_with('[') {
    return match serde_json::from_str::<Value>(trimmed) {
      Ok(Value::Array(items)) => clean(items.iter().filter_map(scalar_text)),
      _ => Vec::new(),
    };
  }

  if let Some(inner) = trimmed
    .strip_prefix('{')
    .and_then(|rest| rest.strip_suffix('}'))
  {
    return clean(split_array_literal(inner));
  }

  clean(trimmed.split(','))
}

fn scalar_text(value: &Value) -> Option<String> {
  match value {
    Value::String(s) => Some(s.clone()),
    Value::Number(n) => Some(n.to_string()),
    Value::Bool(b) => Some(b.to_string()),
    _ => None,
  }
}

/// Trim every entry and drop the ones left empty.
fn clean<I, S>(items: I) -> Vec<String>
where
  I: IntoIterator<Item = S>,
  S: AsRef<str>,
{
  items
    .into_iter()
    .map(|s| s.as_ref().trim().to_owned())
    .filter(|s| !s.is_empty())
    .collect()
}

/// Single-level tokenizer for the body of an array literal.
///
/// Double quotes protect embedded commas; a backslash takes the next
/// character literally, so `\"` yields `"` and `\,` yields `,`.
fn split_array_literal(body: &str) -> Vec<String> {
  let mut tokens = Vec::new();
  let mut current = String::new();
  let mut quoted = false;
  let mut chars = body.chars();

  while let Some(c) = chars.next() {
    match c {
      '\\' => {
        if let Some(next) = chars.next() {
          current.push(next);
        }
      }
      '"' => quoted = !quoted,
      ',' if !quoted => tokens.push(std::mem::take(&mut current)),
      _ => current.push(c),
    }
  }
  tokens.push(current);
  tokens
}

// ─── Encode ──────────────────────────────────────────────────────────────────

/// A list ready to be bound into a write statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodedOpponents {
  /// JSON array text, stored as-is.
  Json(String),
  /// Names joined with [`ARRAY_DELIMITER`], for the array constructor. An
  /// empty string stands for an empty array and must not be split.
  Delimited(String),
}

/// Encode `list` for a column of physical type `target`.
///
/// Empty and whitespace-only names are dropped first. JSON and plain text
/// columns both receive JSON array text.
pub fn encode(list: &[String], target: OpponentsType) -> EncodedOpponents {
  let names = clean(list);
  match target {
    OpponentsType::Json | OpponentsType::Text => {
      EncodedOpponents::Json(Value::from(names).to_string())
    }
    OpponentsType::NativeArray => {
      let mut joined = String::new();
      for (i, name) in names.iter().enumerate() {
        if i > 0 {
          joined.push(ARRAY_DELIMITER);
        }
        joined.push_str(name);
      }
      EncodedOpponents::Delimited(joined)
    }
  }
}

/// Render names as an array literal that [`decode_str`] reads back.
pub fn to_array_literal<I, S>(names: I) -> String
where
  I: IntoIterator<Item = S>,
  S: AsRef<str>,
{
  let mut out = String::from("{");
  for (i, name) in names.into_iter().enumerate() {
    if i > 0 {
      out.push(',');
    }
    out.push('"');
    for c in name.as_ref().chars() {
      if c == '"' || c == '\\' {
        out.push('\\');
      }
      out.push(c);
    }
    out.push('"');
  }
  out.push('}');
  out
}
