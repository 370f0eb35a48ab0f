//! Handlers for the `/stories` endpoint.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/stories` | Optional `?type=`, `?search=`, `?sort=` |
//! | `POST`   | `/stories` | Body: [`NewStory`] wire draft |
//! | `DELETE` | `/stories` | Body: `{"id": <i64>}` |

use std::{
  net::{IpAddr, SocketAddr},
  sync::Arc,
};

use axum::{
  Json,
  extract::{ConnectInfo, Query, State, rejection::JsonRejection},
  http::{HeaderMap, StatusCode},
  response::IntoResponse,
};
use relato_core::{
  query::{SortOrder, StoryFilter},
  store::StoryStore,
  story::{NewStory, StoryKind, StoryView},
};
use serde::Deserialize;
use serde_json::json;

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

/// Raw query parameters; empty strings are treated as absent, matching how
/// browser forms submit untouched filter controls.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
  #[serde(rename = "type")]
  pub kind:   Option<String>,
  pub search: Option<String>,
  pub sort:   Option<String>,
}

impl ListParams {
  fn into_filter(self) -> StoryFilter {
    StoryFilter {
      kind:   self
        .kind
        .filter(|k| !k.is_empty())
        .map(|k| StoryKind::from(k.as_str())),
      search: self.search.filter(|q| !q.is_empty()),
      sort:   self
        .sort
        .as_deref()
        .map(SortOrder::from)
        .unwrap_or_default(),
    }
  }
}

/// `GET /stories[?type=..][&search=..][&sort=..]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<StoryView>>, ApiError>
where
  S: StoryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let filter = params.into_filter();
  let stories = store
    .list(&filter)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  tracing::debug!(count = stories.len(), ?filter, "stories listed");
  Ok(Json(stories.into_iter().map(StoryView::from).collect()))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /stories` — body is the [`NewStory`] wire draft.
///
/// The source address is taken from `x-forwarded-for` when present (the
/// service is expected to sit behind a proxy) and the peer address
/// otherwise; it is never client-supplied body data.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  ConnectInfo(peer): ConnectInfo<SocketAddr>,
  headers: HeaderMap,
  body: Result<Json<NewStory>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: StoryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let Json(draft) = body.map_err(|e| ApiError::MalformedRequest(e.body_text()))?;
  let input = draft.validate()?;

  let story = store
    .create(input, client_ip(&headers, peer))
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  tracing::info!(id = story.id, "story created");
  Ok((StatusCode::CREATED, Json(StoryView::from(story))))
}

fn client_ip(headers: &HeaderMap, peer: SocketAddr) -> IpAddr {
  headers
    .get("x-forwarded-for")
    .and_then(|v| v.to_str().ok())
    .and_then(|raw| raw.split(',').next())
    .and_then(|first| first.trim().parse().ok())
    .unwrap_or_else(|| peer.ip())
}

// ─── Delete ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct DeleteBody {
  pub id: i64,
}

/// `DELETE /stories` — body: `{"id": <i64>}`. Deletion is permanent.
pub async fn remove<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<DeleteBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: StoryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let Json(body) = body.map_err(|e| ApiError::MalformedRequest(e.body_text()))?;

  let removed = store
    .delete(body.id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  if !removed {
    return Err(ApiError::NotFound(body.id));
  }

  tracing::info!(id = body.id, "story deleted");
  Ok(Json(json!({ "success": true })))
}
