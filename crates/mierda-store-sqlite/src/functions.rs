//! Scalar SQL functions registered on every connection.

use mierda_core::opponents::to_array_literal;
use rusqlite::{Connection, functions::FunctionFlags};

/// Register `string_to_array(text, delimiter)`.
///
/// Splits `text` on `delimiter` and returns an array literal
/// (`{"a","b"}`). Like its Postgres namesake it is applied to the joined
/// opponent names; callers guard the empty string themselves, since
/// splitting `''` yields one empty element. `NULL` text yields `NULL`.
pub fn register(conn: &Connection) -> rusqlite::Result<()> {
  conn.create_scalar_function(
    "string_to_array",
    2,
    FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
    |ctx| {
      let text: Option<String> = ctx.get(0)?;
      let delimiter: String = ctx.get(1)?;
      Ok(text.map(|t| {
        if delimiter.is_empty() {
          to_array_literal([t])
        } else {
          to_array_literal(t.split(delimiter.as_str()))
        }
      }))
    },
  )
}
