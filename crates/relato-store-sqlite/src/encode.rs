//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings; the share flag and story kind
//! are stored as their wire tokens.

use chrono::{DateTime, Utc};
use relato_core::story::{ShareFlag, Story, StoryKind};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Rows ────────────────────────────────────────────────────────────────────

/// A `stories` row as it comes off the wire from rusqlite, before domain
/// decoding.
pub struct RawStory {
  pub id:         i64,
  pub name:       String,
  pub email:      String,
  pub location:   String,
  pub story_type: String,
  pub story:      String,
  pub share:      String,
  pub ip_address: String,
  pub created_at: String,
}

impl RawStory {
  pub fn into_story(self) -> Result<Story> {
    let share: ShareFlag = self.share.parse().map_err(|_| {
      Error::InvalidShareFlag { id: self.id, value: self.share.clone() }
    })?;

    Ok(Story {
      id:         self.id,
      name:       self.name,
      email:      self.email,
      location:   self.location,
      story_type: StoryKind::from(self.story_type.as_str()),
      story:      self.story,
      share,
      ip_address: self.ip_address,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}
