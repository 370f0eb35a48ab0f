//! Listing semantics — the single implementation of filter + sort.
//!
//! Both the server-authoritative store and any client filtering a cached
//! snapshot call [`apply`], so displayed ordering always matches what the
//! store would return for the same filter.

use serde::{Deserialize, Serialize};

use crate::story::{Story, StoryKind};

// ─── Sort order ──────────────────────────────────────────────────────────────

/// Listing order. Unrecognized tokens fall back to the default, `newest`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
  /// `created_at` descending.
  #[default]
  Newest,
  /// `created_at` ascending.
  Oldest,
  /// Lexicographic ascending by author name.
  Name,
}

impl From<&str> for SortOrder {
  fn from(s: &str) -> Self {
    match s {
      "oldest" => Self::Oldest,
      "name" => Self::Name,
      _ => Self::Newest,
    }
  }
}

// ─── Filter ──────────────────────────────────────────────────────────────────

/// Parameters for [`crate::store::StoryStore::list`] and for filtering a
/// cached snapshot.
#[derive(Debug, Clone, Default)]
pub struct StoryFilter {
  /// Restrict to stories of this kind (exact token match).
  pub kind:   Option<StoryKind>,
  /// Case-insensitive substring matched against name, story, or location.
  pub search: Option<String>,
  pub sort:   SortOrder,
}

// ─── The shared pure function ────────────────────────────────────────────────

/// Apply the full listing semantics to a snapshot of stories:
///
/// 1. only publicly shared stories survive (base predicate);
/// 2. optional exact kind filter;
/// 3. optional free-text search over name OR story OR location;
/// 4. ordering per [`SortOrder`] (stable sort).
pub fn apply(stories: Vec<Story>, filter: &StoryFilter) -> Vec<Story> {
  let mut out: Vec<Story> = stories
    .into_iter()
    .filter(|s| s.share.is_public())
    .filter(|s| filter.kind.as_ref().is_none_or(|k| s.story_type == *k))
    .filter(|s| {
      filter.search.as_deref().is_none_or(|needle| matches_search(s, needle))
    })
    .collect();

  match filter.sort {
    SortOrder::Newest => out.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
    SortOrder::Oldest => out.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
    SortOrder::Name => out.sort_by(|a, b| a.name.cmp(&b.name)),
  }

  out
}

fn matches_search(story: &Story, needle: &str) -> bool {
  let needle = needle.to_lowercase();
  [&story.name, &story.story, &story.location]
    .into_iter()
    .any(|field| field.to_lowercase().contains(&needle))
}

#[cfg(test)]
mod tests {
  use chrono::{DateTime, TimeZone, Utc};

  use super::*;
  use crate::story::ShareFlag;

  fn at(secs: i64) -> DateTime<Utc> { Utc.timestamp_opt(secs, 0).unwrap() }

  fn story(id: i64, name: &str, kind: &str, share: ShareFlag, secs: i64) -> Story {
    Story {
      id,
      name: name.to_owned(),
      email: format!("{name}@example.com"),
      location: String::new(),
      story_type: StoryKind::from(kind),
      story: "a story long enough to have been accepted at submission".into(),
      share,
      ip_address: "203.0.113.7".into(),
      created_at: at(secs),
    }
  }

  fn corpus() -> Vec<Story> {
    vec![
      story(1, "Carmen", "family", ShareFlag::Yes, 300),
      story(2, "Andrés", "work", ShareFlag::Yes, 100),
      story(3, "Beatriz", "family", ShareFlag::No, 200),
      story(4, "Diego", "memory", ShareFlag::Yes, 200),
    ]
  }

  #[test]
  fn base_predicate_drops_private_stories() {
    let out = apply(corpus(), &StoryFilter::default());
    assert!(out.iter().all(|s| s.share.is_public()));
    assert_eq!(out.len(), 3);
  }

  #[test]
  fn kind_filter_is_exact() {
    let filter = StoryFilter {
      kind: Some(StoryKind::Family),
      ..Default::default()
    };
    let out = apply(corpus(), &filter);
    // Beatriz is family but private, so only Carmen remains.
    assert_eq!(out.iter().map(|s| s.id).collect::<Vec<_>>(), [1]);
  }

  #[test]
  fn default_sort_is_newest_first() {
    let out = apply(corpus(), &StoryFilter::default());
    assert_eq!(out.iter().map(|s| s.id).collect::<Vec<_>>(), [1, 4, 2]);
  }

  #[test]
  fn oldest_sorts_ascending_by_created_at() {
    let filter = StoryFilter { sort: SortOrder::Oldest, ..Default::default() };
    let out = apply(corpus(), &filter);
    assert_eq!(out.iter().map(|s| s.id).collect::<Vec<_>>(), [2, 4, 1]);
  }

  #[test]
  fn name_sorts_lexicographically() {
    let filter = StoryFilter { sort: SortOrder::Name, ..Default::default() };
    let out = apply(corpus(), &filter);
    assert_eq!(
      out.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
      ["Andrés", "Carmen", "Diego"]
    );
  }

  #[test]
  fn search_is_case_insensitive_or_across_fields() {
    let mut stories = corpus();
    stories[3].location = "Lubbock, Texas".into();

    let filter = StoryFilter {
      search: Some("TEXAS".into()),
      ..Default::default()
    };
    // Matches only via location; name and story do not contain the needle.
    let out = apply(stories, &filter);
    assert_eq!(out.iter().map(|s| s.id).collect::<Vec<_>>(), [4]);
  }

  #[test]
  fn unknown_sort_token_falls_back_to_newest() {
    assert_eq!(SortOrder::from("garbage"), SortOrder::Newest);
    assert_eq!(SortOrder::from("oldest"), SortOrder::Oldest);
    assert_eq!(SortOrder::from("name"), SortOrder::Name);
  }
}
