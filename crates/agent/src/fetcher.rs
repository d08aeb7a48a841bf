//! HTTP client for the metrics API.
//!
//! [`GlancesClient::fetch`] never fails: transport errors, timeouts, non-200
//! responses and undecodable bodies all collapse into `None` for that
//! endpoint. [`GlancesClient::fetch_all`] queries every endpoint
//! concurrently; one endpoint failing has no effect on the others.

use std::time::Duration;

use serde_json::Value;

use hostwatch_core::endpoint::{Endpoint, RawPayloads};

/// Per-request timeout for a single endpoint.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Reasons a single endpoint fetch produced no data.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The HTTP request failed (connect, timeout, body decode, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The metrics API answered with something other than 200.
    #[error("Metrics API returned HTTP {0}")]
    HttpStatus(u16),
}

/// Client bound to one metrics API base URL.
#[derive(Debug, Clone)]
pub struct GlancesClient {
    client: reqwest::Client,
    base_url: String,
}

impl GlancesClient {
    /// Create a client with the default [`REQUEST_TIMEOUT`].
    pub fn new(base_url: impl Into<String>) -> Result<Self, FetchError> {
        Self::with_timeout(base_url, REQUEST_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: Endpoint) -> String {
        format!("{}/{}", self.base_url, endpoint.path())
    }

    /// Fetch one endpoint, returning `None` on any failure.
    pub async fn fetch(&self, endpoint: Endpoint) -> Option<Value> {
        match self.try_fetch(endpoint).await {
            Ok(value) => Some(value),
            Err(e) => {
                // Polling runs every few seconds; keep failures out of info logs.
                tracing::debug!(%endpoint, error = %e, "Metrics fetch failed");
                None
            }
        }
    }

    /// Fetch every endpoint concurrently and collect the results slot by slot.
    pub async fn fetch_all(&self) -> RawPayloads {
        let results =
            futures::future::join_all(Endpoint::ALL.iter().map(|&endpoint| async move {
                (endpoint, self.fetch(endpoint).await)
            }))
            .await;

        let mut raw = RawPayloads::default();
        for (endpoint, payload) in results {
            raw.set(endpoint, payload);
        }
        raw
    }

    async fn try_fetch(&self, endpoint: Endpoint) -> Result<Value, FetchError> {
        let response = self.client.get(self.url(endpoint)).send().await?;
        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }
        Ok(response.json::<Value>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_does_not_panic() {
        let _client = GlancesClient::new("http://localhost:61208/api/4").expect("client builds");
    }

    #[test]
    fn urls_join_base_and_endpoint() {
        let client = GlancesClient::new("http://host:61208/api/4/").expect("client builds");
        assert_eq!(client.base_url(), "http://host:61208/api/4");
        assert_eq!(client.url(Endpoint::CpuTotal), "http://host:61208/api/4/cpu/total");
        assert_eq!(client.url(Endpoint::Alert), "http://host:61208/api/4/alert");
    }
}
