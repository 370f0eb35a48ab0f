//! The `StoryStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `relato-store-sqlite`).
//! Higher layers (`relato-api`) depend on this abstraction, not on any
//! concrete backend.

use std::{future::Future, net::IpAddr};

use crate::{
  query::StoryFilter,
  story::{Story, ValidStory},
};

/// Abstraction over a story archive backend.
///
/// Each operation is an independent unit of work: it completes or fails
/// within a single bounded call, with no partial mutation ever visible to a
/// concurrent reader. There is no retry policy inside the store.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait StoryStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// List publicly shared stories matching `filter`, ordered per its sort.
  ///
  /// No pagination; the full filtered match is returned.
  fn list<'a>(
    &'a self,
    filter: &'a StoryFilter,
  ) -> impl Future<Output = Result<Vec<Story>, Self::Error>> + Send + 'a;

  /// Persist a validated submission and return the full created [`Story`].
  ///
  /// The store assigns the id and `created_at`; `ip_address` is the request
  /// source address, never client input. Id assignment is atomic relative
  /// to concurrent writers.
  fn create(
    &self,
    input: ValidStory,
    ip_address: IpAddr,
  ) -> impl Future<Output = Result<Story, Self::Error>> + Send + '_;

  /// Permanently remove the story with `id`.
  ///
  /// Returns `false` if no such story exists. When two deletes race on the
  /// same id, at most one observes `true`.
  fn delete(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
