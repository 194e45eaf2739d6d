//! [`SqliteStore`], the SQLite implementation of [`SummaryStore`].

use std::path::Path;

use abridge_core::{
  store::SummaryStore,
  summary::{NewSummary, Summary, SummaryUpdate},
};
use chrono::Utc;
use rusqlite::OptionalExtension as _;

use crate::{
  Result,
  encode::{COLUMNS, RawSummary, encode_dt},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A summary store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Close the underlying connection. Subsequent calls fail with
  /// [`Error::Database`](crate::Error::Database).
  pub async fn close(&self) -> Result<()> {
    self.conn.clone().close().await?;
    Ok(())
  }
}

// ─── SummaryStore impl ───────────────────────────────────────────────────────

impl SummaryStore for SqliteStore {
  type Error = crate::Error;

  async fn create(&self, input: NewSummary) -> Result<Summary> {
    let now = Utc::now();
    let at_str = encode_dt(now);
    let NewSummary { content, title } = input;

    let raw: RawSummary = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "INSERT INTO summaries (
             original_text, summary_text, created_at, updated_at, title, compression_ratio
           ) VALUES (?1, ?2, ?3, ?3, ?4, ?5)
           RETURNING {COLUMNS}"
        );
        Ok(conn.query_row(
          &sql,
          rusqlite::params![
            content.original_text,
            content.summary_text,
            at_str,
            title,
            content.compression_ratio,
          ],
          RawSummary::from_row,
        )?)
      })
      .await?;

    raw.into_summary()
  }

  async fn get(&self, id: i64) -> Result<Option<Summary>> {
    let raw: Option<RawSummary> = self
      .conn
      .call(move |conn| {
        let sql = format!("SELECT {COLUMNS} FROM summaries WHERE id = ?1");
        Ok(
          conn
            .query_row(&sql, rusqlite::params![id], RawSummary::from_row)
            .optional()?,
        )
      })
      .await?;

    raw.map(RawSummary::into_summary).transpose()
  }

  async fn list(&self) -> Result<Vec<Summary>> {
    let raws: Vec<RawSummary> = self
      .conn
      .call(|conn| {
        let sql = format!(
          "SELECT {COLUMNS} FROM summaries ORDER BY created_at DESC, id DESC"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map([], RawSummary::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSummary::into_summary).collect()
  }

  async fn update(&self, id: i64, update: SummaryUpdate) -> Result<Option<Summary>> {
    let now_str = encode_dt(Utc::now());
    let (original, summary, ratio) = match update.content {
      Some(c) => (Some(c.original_text), Some(c.summary_text), Some(c.compression_ratio)),
      None => (None, None, None),
    };
    let set_title = update.title.is_some();
    let title = update.title.flatten();

    // One statement, so the text/summary/ratio triple and the title land
    // together or not at all.
    let raw: Option<RawSummary> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "UPDATE summaries SET
             original_text     = COALESCE(?2, original_text),
             summary_text      = COALESCE(?3, summary_text),
             compression_ratio = COALESCE(?4, compression_ratio),
             title             = CASE WHEN ?5 THEN ?6 ELSE title END,
             updated_at        = MAX(?7, created_at)
           WHERE id = ?1
           RETURNING {COLUMNS}"
        );
        Ok(
          conn
            .query_row(
              &sql,
              rusqlite::params![id, original, summary, ratio, set_title, title, now_str],
              RawSummary::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawSummary::into_summary).transpose()
  }

  async fn delete(&self, id: i64) -> Result<bool> {
    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM summaries WHERE id = ?1", rusqlite::params![id])?)
      })
      .await?;
    Ok(affected > 0)
  }

  async fn ping(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}
