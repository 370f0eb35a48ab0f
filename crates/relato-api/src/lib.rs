//! JSON REST API for the Relato story archive.
//!
//! Exposes an axum [`Router`] backed by any [`relato_core::store::StoryStore`].
//! TLS and transport concerns are the caller's responsibility.
//!
//! The endpoint is a public contribution form: cross-origin access is
//! deliberately unrestricted, and there is no authentication layer.

pub mod error;
pub mod stories;

use std::{path::PathBuf, sync::Arc};

use axum::{Router, http::Method, routing::get};
use relato_core::store::StoryStore;
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};

pub use error::ApiError;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `RELATO_`-prefixed environment variables. Every field has a default so
/// the server starts with no config file at all.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:       String,
  #[serde(default = "default_port")]
  pub port:       u16,
  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 5280 }
fn default_store_path() -> PathBuf { PathBuf::from("relato.db") }

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: StoryStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    .route(
      "/stories",
      get(stories::list::<S>)
        .post(stories::create::<S>)
        .delete(stories::remove::<S>),
    )
    .layer(cors_layer())
    .with_state(store)
}

/// Any origin may read and write — the endpoint exists to receive
/// submissions from pages hosted elsewhere. Preflight OPTIONS is answered
/// by the layer itself.
fn cors_layer() -> CorsLayer {
  CorsLayer::new()
    .allow_origin(Any)
    .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
    .allow_headers(Any)
}
