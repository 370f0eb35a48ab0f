//! [`SqliteStore`] — the SQLite implementation of [`StoryStore`].

use std::{net::IpAddr, path::Path};

use chrono::Utc;
use relato_core::{
  query::{self, StoryFilter},
  store::StoryStore,
  story::{Story, ValidStory},
};

use crate::{
  Error, Result,
  encode::{RawStory, encode_dt},
  schema::SCHEMA,
};

const STORY_COLUMNS: &str =
  "id, name, email, location, story_type, story, share, ip_address, created_at";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A story archive backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
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

  /// Open an in-memory store — useful for testing.
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
}

// ─── StoryStore impl ─────────────────────────────────────────────────────────

impl StoryStore for SqliteStore {
  type Error = Error;

  async fn list(&self, filter: &StoryFilter) -> Result<Vec<Story>> {
    // The base predicate lives in SQL; kind/search/sort semantics live in
    // `relato_core::query::apply`, the same function clients use on cached
    // snapshots.
    let raws: Vec<RawStory> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {STORY_COLUMNS} FROM stories WHERE share = 'yes'"
        ))?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawStory {
              id:         row.get(0)?,
              name:       row.get(1)?,
              email:      row.get(2)?,
              location:   row.get(3)?,
              story_type: row.get(4)?,
              story:      row.get(5)?,
              share:      row.get(6)?,
              ip_address: row.get(7)?,
              created_at: row.get(8)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    let stories = raws
      .into_iter()
      .map(RawStory::into_story)
      .collect::<Result<Vec<_>>>()?;

    Ok(query::apply(stories, filter))
  }

  async fn create(&self, input: ValidStory, ip_address: IpAddr) -> Result<Story> {
    let created_at = Utc::now();

    let name       = input.name.clone();
    let email      = input.email.clone();
    let location   = input.location.clone();
    let story_type = input.story_type.as_str().to_owned();
    let story_text = input.story.clone();
    let share      = input.share.as_str();
    let ip_str     = ip_address.to_string();
    let at_str     = encode_dt(created_at);

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO stories (
             name, email, location, story_type, story, share,
             ip_address, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
          rusqlite::params![
            name,
            email,
            location,
            story_type,
            story_text,
            share,
            ip_str,
            at_str,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    tracing::info!(id, "story persisted");

    Ok(Story {
      id,
      name: input.name,
      email: input.email,
      location: input.location,
      story_type: input.story_type,
      story: input.story,
      share: input.share,
      ip_address: ip_address.to_string(),
      created_at,
    })
  }

  async fn delete(&self, id: i64) -> Result<bool> {
    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM stories WHERE id = ?1", rusqlite::params![id])?)
      })
      .await?;

    if affected > 0 {
      tracing::info!(id, "story deleted");
    }

    Ok(affected > 0)
  }
}
