//! Conversions between domain types and the plain-text representations stored
//! in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 UTC strings with a fixed microsecond
//! width, so comparing and sorting the column text is chronological.

use abridge_core::summary::Summary;
use chrono::{DateTime, SecondsFormat, Utc};

use crate::{Error, Result};

/// Columns in the order every `SELECT`/`RETURNING` clause lists them.
pub const COLUMNS: &str =
  "id, original_text, summary_text, created_at, updated_at, title, compression_ratio";

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

/// A `summaries` row before timestamp decoding.
pub struct RawSummary {
  pub id:                i64,
  pub original_text:     String,
  pub summary_text:      String,
  pub created_at:        String,
  pub updated_at:        String,
  pub title:             Option<String>,
  pub compression_ratio: f64,
}

impl RawSummary {
  /// Read a row selected with [`COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:                row.get(0)?,
      original_text:     row.get(1)?,
      summary_text:      row.get(2)?,
      created_at:        row.get(3)?,
      updated_at:        row.get(4)?,
      title:             row.get(5)?,
      compression_ratio: row.get(6)?,
    })
  }

  pub fn into_summary(self) -> Result<Summary> {
    Ok(Summary {
      id:                self.id,
      original_text:     self.original_text,
      summary_text:      self.summary_text,
      created_at:        decode_dt(&self.created_at)?,
      updated_at:        decode_dt(&self.updated_at)?,
      title:             self.title,
      compression_ratio: self.compression_ratio,
    })
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  #[test]
  fn timestamps_have_fixed_width() {
    let whole = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let fractional = whole + chrono::Duration::microseconds(1500);
    assert_eq!(encode_dt(whole), "2024-05-01T12:00:00.000000Z");
    assert_eq!(encode_dt(fractional), "2024-05-01T12:00:00.001500Z");
    assert!(encode_dt(whole) < encode_dt(fractional));
  }

  #[test]
  fn decode_accepts_offsets() {
    let dt = decode_dt("2024-05-01T14:00:00+02:00").unwrap();
    assert_eq!(encode_dt(dt), "2024-05-01T12:00:00.000000Z");
  }

  #[test]
  fn decode_rejects_garbage() {
    assert!(matches!(decode_dt("yesterday"), Err(Error::DateParse(_))));
  }
}
