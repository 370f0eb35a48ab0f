//! `relato` — command-line client for the Relato story archive.
//!
//! # Usage
//!
//! ```
//! relato --url http://localhost:5280 list --type family --sort name
//! relato submit --name "Carmen" --email carmen@example.com \
//!     --type family --story "..." --share yes
//! relato delete 12
//! relato list --cached --search mill
//! ```

mod client;
mod snapshot;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use client::{ApiClient, ApiConfig, ListQuery};
use relato_core::{
  query::{SortOrder, StoryFilter},
  story::{NewStory, StoryKind, StoryView},
};
use serde::Deserialize;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "relato", about = "Client for the Relato story archive")]
struct Args {
  /// Path to a TOML config file (url, snapshot_path).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the relato server (default: http://localhost:5280).
  #[arg(long, env = "RELATO_URL")]
  url: Option<String>,

  /// Where the listing snapshot is cached for `list --cached`.
  #[arg(long, value_name = "FILE")]
  snapshot: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Fetch and print stories; an unfiltered fetch refreshes the snapshot.
  List {
    /// Restrict to a story type (memory, family, work, ...).
    #[arg(long = "type")]
    kind: Option<String>,

    /// Free-text search over name, story, and location.
    #[arg(long)]
    search: Option<String>,

    /// Ordering: newest (default), oldest, or name.
    #[arg(long)]
    sort: Option<String>,

    /// Filter the cached snapshot offline instead of calling the server.
    #[arg(long)]
    cached: bool,
  },

  /// Submit a story. The draft is validated locally before sending; the
  /// server validates again regardless.
  Submit {
    #[arg(long)]
    name: String,

    #[arg(long)]
    email: String,

    #[arg(long)]
    location: Option<String>,

    /// Story type (memory, family, work, cultural, tradition, other).
    #[arg(long = "type")]
    kind: String,

    /// The story text; at least 50 characters.
    #[arg(long)]
    story: String,

    /// Whether the story may be listed publicly: yes or no.
    #[arg(long, default_value = "yes")]
    share: String,
  },

  /// Permanently delete a story by id.
  Delete { id: i64 },
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url:           String,
  #[serde(default)]
  snapshot_path: Option<PathBuf>,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  // Load config file if provided.
  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let base_url = args
    .url
    .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
    .unwrap_or_else(|| "http://localhost:5280".to_string());
  let snapshot_path = args
    .snapshot
    .or(file_cfg.snapshot_path)
    .unwrap_or_else(|| PathBuf::from("relato-snapshot.json"));

  let client = ApiClient::new(ApiConfig { base_url })?;

  match args.command {
    Command::List { kind, search, sort, cached } => {
      list(&client, &snapshot_path, kind, search, sort, cached).await?
    }
    Command::Submit { name, email, location, kind, story, share } => {
      submit(&client, name, email, location, kind, story, share).await?
    }
    Command::Delete { id } => {
      client.delete(id).await?;
      println!("Story {id} deleted.");
    }
  }

  Ok(())
}

// ─── Subcommands ──────────────────────────────────────────────────────────────

async fn list(
  client: &ApiClient,
  snapshot_path: &std::path::Path,
  kind: Option<String>,
  search: Option<String>,
  sort: Option<String>,
  cached: bool,
) -> Result<()> {
  if cached {
    let filter = StoryFilter {
      kind:   kind.as_deref().map(StoryKind::from),
      search: search.clone(),
      sort:   sort.as_deref().map(SortOrder::from).unwrap_or_default(),
    };
    let stories = snapshot::filter(snapshot::load(snapshot_path)?, &filter);
    render(&stories);
    return Ok(());
  }

  let unfiltered = kind.is_none() && search.is_none() && sort.is_none();
  let query = ListQuery { kind, search, sort };
  let stories = client.list(&query).await?;
  render(&stories);

  if unfiltered {
    snapshot::save(snapshot_path, &stories)?;
  }
  Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn submit(
  client: &ApiClient,
  name: String,
  email: String,
  location: Option<String>,
  kind: String,
  story: String,
  share: String,
) -> Result<()> {
  // Client-only shape check; the store does not validate email format.
  if !looks_like_email(&email) {
    bail!("{email:?} does not look like an email address");
  }

  let draft = NewStory {
    name:       Some(name),
    email:      Some(email),
    location,
    story_type: Some(kind),
    story:      Some(story),
    share:      Some(share),
  };

  // Same rules the server applies; failing here saves a round trip but is
  // never a substitute for the store-side check.
  if let Err(e) = draft.clone().validate() {
    bail!("rejected before sending: {e}");
  }

  let created = client.submit(&draft).await?;
  println!(
    "Story #{} submitted ({}).",
    created.story.id,
    if created.story.share.is_public() { "public" } else { "private" }
  );
  Ok(())
}

fn looks_like_email(email: &str) -> bool {
  match email.split_once('@') {
    Some((local, domain)) => {
      !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
    }
    None => false,
  }
}

// ─── Rendering ────────────────────────────────────────────────────────────────

fn render(stories: &[StoryView]) {
  if stories.is_empty() {
    println!("No stories.");
    return;
  }
  for view in stories {
    let s = &view.story;
    let location = if s.location.is_empty() {
      String::new()
    } else {
      format!(", {}", s.location)
    };
    println!("#{} {} ({}{location}) — {}", s.id, s.name, s.story_type.label(), view.date);
    println!("{}\n", s.story);
  }
}
