//! Story — the sole entity of the archive.
//!
//! A story is written once at submission time and never updated. The only
//! later mutation is permanent deletion by id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, ValidationError};

/// Minimum story length, counted in Unicode scalar values. The boundary is
/// inclusive: exactly this many characters is accepted.
pub const MIN_STORY_CHARS: usize = 50;

// ─── Share flag ──────────────────────────────────────────────────────────────

/// Whether the author allows the story in public listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareFlag {
  Yes,
  No,
}

impl ShareFlag {
  pub fn is_public(self) -> bool { matches!(self, Self::Yes) }

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Yes => "yes",
      Self::No => "no",
    }
  }
}

impl std::str::FromStr for ShareFlag {
  type Err = ValidationError;

  fn from_str(s: &str) -> Result<Self> {
    match s {
      "yes" => Ok(Self::Yes),
      "no" => Ok(Self::No),
      other => Err(ValidationError::InvalidShareFlag(other.to_owned())),
    }
  }
}

// ─── Story kind ──────────────────────────────────────────────────────────────

/// Loose category a story is filed under.
///
/// Unrecognized tokens are carried through unchanged rather than rejected;
/// they render with a default label. Filtering compares the raw token, so a
/// pass-through kind still round-trips through list queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoryKind {
  Memory,
  Family,
  Work,
  Cultural,
  Tradition,
  Other,
  Unrecognized(String),
}

impl StoryKind {
  /// The wire/storage token for this kind.
  pub fn as_str(&self) -> &str {
    match self {
      Self::Memory => "memory",
      Self::Family => "family",
      Self::Work => "work",
      Self::Cultural => "cultural",
      Self::Tradition => "tradition",
      Self::Other => "other",
      Self::Unrecognized(raw) => raw,
    }
  }

  /// Human-readable label for rendering.
  pub fn label(&self) -> &'static str {
    match self {
      Self::Memory => "Personal memory",
      Self::Family => "Family history",
      Self::Work => "Working life",
      Self::Cultural => "Cultural heritage",
      Self::Tradition => "Tradition",
      Self::Other => "Other",
      Self::Unrecognized(_) => "Story",
    }
  }
}

impl From<&str> for StoryKind {
  fn from(s: &str) -> Self {
    match s {
      "memory" => Self::Memory,
      "family" => Self::Family,
      "work" => Self::Work,
      "cultural" => Self::Cultural,
      "tradition" => Self::Tradition,
      "other" => Self::Other,
      raw => Self::Unrecognized(raw.to_owned()),
    }
  }
}

impl std::fmt::Display for StoryKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

impl Serialize for StoryKind {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(self.as_str())
  }
}

impl<'de> Deserialize<'de> for StoryKind {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let raw = String::deserialize(deserializer)?;
    Ok(Self::from(raw.as_str()))
  }
}

// ─── Story ───────────────────────────────────────────────────────────────────

/// A persisted story record.
///
/// `id`, `ip_address`, and `created_at` are assigned by the store, never by
/// client input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Story {
  pub id:         i64,
  pub name:       String,
  pub email:      String,
  pub location:   String,
  pub story_type: StoryKind,
  pub story:      String,
  pub share:      ShareFlag,
  pub ip_address: String,
  pub created_at: DateTime<Utc>,
}

/// A [`Story`] augmented with the presentation fields the listing endpoint
/// returns: a human-readable date and a Unix timestamp, both derived from
/// `created_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryView {
  #[serde(flatten)]
  pub story:     Story,
  pub date:      String,
  pub timestamp: i64,
}

impl From<Story> for StoryView {
  fn from(story: Story) -> Self {
    let date = format_date(story.created_at);
    let timestamp = story.created_at.timestamp();
    Self { story, date, timestamp }
  }
}

/// Render a timestamp as e.g. `24 August 2026` (day without leading zero).
pub fn format_date(at: DateTime<Utc>) -> String {
  at.format("%-d %B %Y").to_string()
}

// ─── Drafts and validation ───────────────────────────────────────────────────

/// The untrusted wire-format draft of a story submission.
///
/// Every field is optional at this stage; [`NewStory::validate`] is the only
/// path to a [`ValidStory`]. Clients run the same validation before sending
/// for immediate feedback, but the store-side check is authoritative.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStory {
  pub name:       Option<String>,
  pub email:      Option<String>,
  pub location:   Option<String>,
  pub story_type: Option<String>,
  pub story:      Option<String>,
  pub share:      Option<String>,
}

impl NewStory {
  /// Enforce the submission rules: name, email, storyType, story, and share
  /// present and non-empty after trimming; story at least
  /// [`MIN_STORY_CHARS`] characters; share one of `yes`/`no`.
  ///
  /// Values are stored untrimmed — trimming applies to the emptiness check
  /// only.
  pub fn validate(self) -> Result<ValidStory> {
    let name = required(self.name, "name")?;
    let email = required(self.email, "email")?;
    let story_type = required(self.story_type, "storyType")?;
    let story = required(self.story, "story")?;
    let share = required(self.share, "share")?;

    let chars = story.chars().count();
    if chars < MIN_STORY_CHARS {
      return Err(ValidationError::StoryTooShort(chars));
    }

    Ok(ValidStory {
      name,
      email,
      location: self.location.unwrap_or_default(),
      story_type: StoryKind::from(story_type.as_str()),
      story,
      share: share.parse()?,
    })
  }
}

fn required(value: Option<String>, field: &'static str) -> Result<String> {
  match value {
    Some(v) if !v.trim().is_empty() => Ok(v),
    _ => Err(ValidationError::MissingField(field)),
  }
}

/// A validated create input. Only the store can turn this into a [`Story`],
/// by assigning id, source address, and creation time.
#[derive(Debug, Clone)]
pub struct ValidStory {
  pub name:       String,
  pub email:      String,
  pub location:   String,
  pub story_type: StoryKind,
  pub story:      String,
  pub share:      ShareFlag,
}
