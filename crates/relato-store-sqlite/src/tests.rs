//! Integration tests for `SqliteStore` against an in-memory database.

use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use relato_core::{
  query::{SortOrder, StoryFilter},
  store::StoryStore,
  story::{ShareFlag, StoryKind, ValidStory},
};

use crate::SqliteStore;

const SOURCE: IpAddr = IpAddr::V4(Ipv4Addr::new(203, 0, 113, 7));

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn submission(name: &str, kind: &str, share: ShareFlag) -> ValidStory {
  ValidStory {
    name:       name.to_owned(),
    email:      format!("{}@example.com", name.to_lowercase()),
    location:   String::new(),
    story_type: StoryKind::from(kind),
    story:      format!("{name} remembers the harvest seasons of the late fifties in detail."),
    share,
  }
}

fn by_kind(kind: &str) -> StoryFilter {
  StoryFilter { kind: Some(StoryKind::from(kind)), ..Default::default() }
}

// Store-assigned timestamps can collide at clock resolution; keep the
// ordering tests honest by spacing the inserts.
async fn settle() {
  tokio::time::sleep(Duration::from_millis(5)).await;
}

// ─── Create + list ───────────────────────────────────────────────────────────

#[tokio::test]
async fn create_then_list_includes_story() {
  let s = store().await;

  let created = s
    .create(submission("Carmen", "family", ShareFlag::Yes), SOURCE)
    .await
    .unwrap();
  assert!(created.id > 0);
  assert_eq!(created.share, ShareFlag::Yes);
  assert_eq!(created.ip_address, "203.0.113.7");

  let listed = s.list(&StoryFilter::default()).await.unwrap();
  assert_eq!(listed.len(), 1);
  assert_eq!(listed[0].id, created.id);
  assert_eq!(listed[0].share, ShareFlag::Yes);
  assert_eq!(listed[0].created_at, created.created_at);
}

#[tokio::test]
async fn private_stories_never_listed() {
  let s = store().await;
  s.create(submission("Carmen", "family", ShareFlag::Yes), SOURCE)
    .await
    .unwrap();
  s.create(submission("Beatriz", "family", ShareFlag::No), SOURCE)
    .await
    .unwrap();

  // Excluded from the unfiltered listing and from any filtered one.
  let all = s.list(&StoryFilter::default()).await.unwrap();
  assert_eq!(all.len(), 1);
  assert_eq!(all[0].name, "Carmen");

  let family = s.list(&by_kind("family")).await.unwrap();
  assert_eq!(family.len(), 1);
  assert_eq!(family[0].name, "Carmen");
}

#[tokio::test]
async fn kind_filter_matches_exactly() {
  let s = store().await;
  s.create(submission("Carmen", "family", ShareFlag::Yes), SOURCE)
    .await
    .unwrap();
  s.create(submission("Diego", "work", ShareFlag::Yes), SOURCE)
    .await
    .unwrap();

  let family = s.list(&by_kind("family")).await.unwrap();
  assert_eq!(family.len(), 1);
  assert_eq!(family[0].story_type, StoryKind::Family);

  // A pass-through kind round-trips through storage and filtering.
  s.create(submission("Elena", "ranching", ShareFlag::Yes), SOURCE)
    .await
    .unwrap();
  let ranching = s.list(&by_kind("ranching")).await.unwrap();
  assert_eq!(ranching.len(), 1);
  assert_eq!(ranching[0].story_type.as_str(), "ranching");
}

#[tokio::test]
async fn search_matches_location_only() {
  let s = store().await;
  let mut with_location = submission("Carmen", "family", ShareFlag::Yes);
  with_location.location = "Lubbock, Texas".into();
  s.create(with_location, SOURCE).await.unwrap();
  s.create(submission("Diego", "memory", ShareFlag::Yes), SOURCE)
    .await
    .unwrap();

  let filter = StoryFilter { search: Some("lubbock".into()), ..Default::default() };
  let out = s.list(&filter).await.unwrap();
  assert_eq!(out.len(), 1);
  assert_eq!(out[0].name, "Carmen");
}

// ─── Ordering ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn sort_orders() {
  let s = store().await;
  s.create(submission("Carmen", "family", ShareFlag::Yes), SOURCE)
    .await
    .unwrap();
  settle().await;
  s.create(submission("Andrés", "work", ShareFlag::Yes), SOURCE)
    .await
    .unwrap();
  settle().await;
  s.create(submission("Beatriz", "memory", ShareFlag::Yes), SOURCE)
    .await
    .unwrap();

  let newest = s.list(&StoryFilter::default()).await.unwrap();
  assert_eq!(
    newest.iter().map(|t| t.name.as_str()).collect::<Vec<_>>(),
    ["Beatriz", "Andrés", "Carmen"]
  );
  assert!(newest.windows(2).all(|w| w[0].created_at >= w[1].created_at));

  let oldest = s
    .list(&StoryFilter { sort: SortOrder::Oldest, ..Default::default() })
    .await
    .unwrap();
  assert!(oldest.windows(2).all(|w| w[0].created_at <= w[1].created_at));

  let by_name = s
    .list(&StoryFilter { sort: SortOrder::Name, ..Default::default() })
    .await
    .unwrap();
  assert_eq!(
    by_name.iter().map(|t| t.name.as_str()).collect::<Vec<_>>(),
    ["Andrés", "Beatriz", "Carmen"]
  );
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_succeeds_exactly_once() {
  let s = store().await;
  let created = s
    .create(submission("Carmen", "family", ShareFlag::Yes), SOURCE)
    .await
    .unwrap();

  assert!(s.delete(created.id).await.unwrap());
  assert!(!s.delete(created.id).await.unwrap());

  let listed = s.list(&StoryFilter::default()).await.unwrap();
  assert!(listed.is_empty());
}

#[tokio::test]
async fn delete_unknown_id_reports_missing() {
  let s = store().await;
  assert!(!s.delete(9999).await.unwrap());
}

// ─── Concurrency ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn concurrent_creates_get_distinct_ids() {
  let s = store().await;

  let (a, b) = tokio::join!(
    s.create(submission("Carmen", "family", ShareFlag::Yes), SOURCE),
    s.create(submission("Diego", "work", ShareFlag::Yes), SOURCE),
  );
  let (a, b) = (a.unwrap(), b.unwrap());
  assert_ne!(a.id, b.id);

  let listed = s.list(&StoryFilter::default()).await.unwrap();
  assert_eq!(listed.len(), 2);
  let ids: Vec<i64> = listed.iter().map(|t| t.id).collect();
  assert!(ids.contains(&a.id) && ids.contains(&b.id));
}

#[tokio::test]
async fn concurrent_deletes_of_same_id_succeed_at_most_once() {
  let s = store().await;
  let created = s
    .create(submission("Carmen", "family", ShareFlag::Yes), SOURCE)
    .await
    .unwrap();

  let (a, b) = tokio::join!(s.delete(created.id), s.delete(created.id));
  let removed = [a.unwrap(), b.unwrap()];
  assert_eq!(removed.iter().filter(|r| **r).count(), 1);
}
