//! Async HTTP client wrapping the Relato JSON API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use relato_core::story::{NewStory, StoryView};
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::json;

/// Connection settings for the Relato API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

/// Query parameters for a listing request, passed through verbatim — the
/// server owns filter semantics for live fetches.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
  pub kind:   Option<String>,
  pub search: Option<String>,
  pub sort:   Option<String>,
}

/// The `{ "error": .. }` envelope every failure response carries.
#[derive(Debug, Deserialize)]
struct ErrorBody {
  error: String,
}

/// Async HTTP client for the Relato JSON REST API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self) -> String {
    format!("{}/stories", self.config.base_url.trim_end_matches('/'))
  }

  /// Turn a non-success response into the error message the server sent.
  async fn reject(resp: Response) -> anyhow::Error {
    let status = resp.status();
    match resp.json::<ErrorBody>().await {
      Ok(body) => anyhow!("server rejected request ({status}): {}", body.error),
      Err(_) => anyhow!("server rejected request: {status}"),
    }
  }

  /// `GET /stories[?type=..][&search=..][&sort=..]`
  pub async fn list(&self, query: &ListQuery) -> Result<Vec<StoryView>> {
    let mut params: Vec<(&str, &str)> = Vec::new();
    if let Some(kind) = query.kind.as_deref() {
      params.push(("type", kind));
    }
    if let Some(search) = query.search.as_deref() {
      params.push(("search", search));
    }
    if let Some(sort) = query.sort.as_deref() {
      params.push(("sort", sort));
    }

    let resp = self
      .client
      .get(self.url())
      .query(&params)
      .send()
      .await
      .context("GET /stories failed")?;

    if !resp.status().is_success() {
      return Err(Self::reject(resp).await);
    }
    resp.json().await.context("deserialising stories")
  }

  /// `POST /stories` — the server re-validates independently of any check
  /// the caller already ran.
  pub async fn submit(&self, draft: &NewStory) -> Result<StoryView> {
    let resp = self
      .client
      .post(self.url())
      .json(draft)
      .send()
      .await
      .context("POST /stories failed")?;

    if !resp.status().is_success() {
      return Err(Self::reject(resp).await);
    }
    resp.json().await.context("deserialising created story")
  }

  /// `DELETE /stories` — body `{"id": ..}`.
  pub async fn delete(&self, id: i64) -> Result<()> {
    let resp = self
      .client
      .delete(self.url())
      .json(&json!({ "id": id }))
      .send()
      .await
      .context("DELETE /stories failed")?;

    if !resp.status().is_success() {
      return Err(Self::reject(resp).await);
    }
    Ok(())
  }
}
