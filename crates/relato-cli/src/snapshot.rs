//! Locally-cached listing snapshot.
//!
//! A successful unfiltered fetch is written to disk; `list --cached` then
//! filters it offline with [`relato_core::query::apply`] — the same function
//! the server runs, so the displayed ordering matches what a live query
//! would have returned.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use relato_core::{
  query::{self, StoryFilter},
  story::StoryView,
};

pub fn save(path: &Path, stories: &[StoryView]) -> Result<()> {
  let json = serde_json::to_string_pretty(stories)?;
  fs::write(path, json)
    .with_context(|| format!("writing snapshot {}", path.display()))
}

pub fn load(path: &Path) -> Result<Vec<StoryView>> {
  let raw = fs::read_to_string(path).with_context(|| {
    format!("no snapshot at {} — run an unfiltered `list` first", path.display())
  })?;
  serde_json::from_str(&raw).context("parsing snapshot")
}

/// Filter/sort a snapshot exactly as the store would. The presentation
/// fields are recomputed, which is lossless — both derive from `created_at`.
pub fn filter(stories: Vec<StoryView>, filter: &StoryFilter) -> Vec<StoryView> {
  let stories: Vec<_> = stories.into_iter().map(|v| v.story).collect();
  query::apply(stories, filter)
    .into_iter()
    .map(StoryView::from)
    .collect()
}
