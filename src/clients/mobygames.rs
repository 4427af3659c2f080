use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

pub const MOBYGAMES_API: &str = "https://api.mobygames.com/v1/games";

/// The catalog could not answer a search.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog request failed: {0}")]
    Request(reqwest::Error),

    #[error("Catalog returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Malformed catalog response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries the API key.
        Self::Request(err.without_url())
    }
}

#[derive(Debug, Deserialize)]
struct GamesResponse {
    games: Vec<Value>,
}

/// Match records exactly as the catalog returned them.
#[derive(Debug, Clone)]
pub struct CatalogSearch {
    pub games: Vec<Value>,
    pub count: usize,
}

#[derive(Clone)]
pub struct CatalogClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl CatalogClient {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("gameshelf/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build catalog HTTP client: {e}"))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        })
    }

    /// Searches the catalog by free-text title.
    ///
    /// One GET, no retries. The `games` list is handed back untouched, in
    /// the catalog's own order.
    pub async fn search(&self, title: &str) -> Result<CatalogSearch, CatalogError> {
        debug!("Searching catalog for: {}", title);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("api_key", self.api_key.as_str()), ("title", title)])
            .send()
            .await
            .inspect_err(|_| record_outcome("error"))?;

        let status = response.status();
        if !status.is_success() {
            record_outcome("error");
            let body = response.text().await.unwrap_or_default();
            warn!("Catalog search for '{}' failed with {}", title, status);
            return Err(CatalogError::Status { status, body });
        }

        let bytes = response.bytes().await?;
        let parsed: GamesResponse = serde_json::from_slice(&bytes).map_err(|e| {
            record_outcome("malformed");
            CatalogError::Malformed(e.to_string())
        })?;

        record_outcome("success");

        let count = parsed.games.len();
        debug!("Catalog returned {} result(s) for '{}'", count, title);

        Ok(CatalogSearch {
            games: parsed.games,
            count,
        })
    }
}

fn record_outcome(outcome: &'static str) {
    metrics::counter!("catalog_requests_total", "outcome" => outcome).increment(1);
}
