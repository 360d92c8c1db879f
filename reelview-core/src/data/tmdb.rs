//! TMDB (The Movie Database) provider.
//!
//! One blocking GET per call against the v3 API. No retries: a failed request
//! surfaces as an error and the view shows "not found". The client timeout is
//! the only bound on a slow request.

use std::time::Duration;

use super::provider::{MovieProvider, ProviderError};
use crate::config::ApiConfig;

pub struct TmdbProvider {
    client: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
    language: String,
}

impl TmdbProvider {
    pub fn new(api: &ApiConfig) -> Result<Self, ProviderError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(api.timeout_secs.max(1)))
            .user_agent(concat!("reelview/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ProviderError::Setup(format!("failed to build HTTP client: {e}")))?;

        if api.api_key.is_empty() {
            tracing::warn!("no TMDB API key configured; requests will be rejected");
        }

        Ok(Self {
            client,
            base_url: api.base_url.trim_end_matches('/').to_string(),
            api_key: api.api_key.clone(),
            language: api.language.clone(),
        })
    }

    /// Absolute URL for an API path such as `movie/550` (query string excluded).
    pub fn request_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn query(&self) -> Vec<(&'static str, &str)> {
        let mut params = Vec::with_capacity(2);
        if !self.api_key.is_empty() {
            params.push(("api_key", self.api_key.as_str()));
        }
        if !self.language.is_empty() {
            params.push(("language", self.language.as_str()));
        }
        params
    }
}

/// Map a non-success HTTP status to an error.
fn status_error(
    status: reqwest::StatusCode,
    path: &str,
    retry_after: Option<u64>,
) -> ProviderError {
    match status {
        reqwest::StatusCode::NOT_FOUND => ProviderError::NotFound { path: path.into() },
        reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
            ProviderError::Unauthorized("TMDB API key is invalid or missing".into())
        }
        reqwest::StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimited {
            retry_after_secs: retry_after.unwrap_or(10),
        },
        other => ProviderError::Http {
            status: other.as_u16(),
            path: path.into(),
        },
    }
}

impl MovieProvider for TmdbProvider {
    fn name(&self) -> &str {
        "tmdb"
    }

    fn fetch_json(&self, path: &str) -> Result<serde_json::Value, ProviderError> {
        let url = self.request_url(path);
        tracing::debug!(%url, "GET");

        let resp = self
            .client
            .get(&url)
            .query(&self.query())
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout(format!("{path}: {e}"))
                } else {
                    ProviderError::NetworkUnreachable(format!("{path}: {e}"))
                }
            })?;

        let status = resp.status();
        if !status.is_success() {
            let retry_after = resp
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok());
            return Err(status_error(status, path, retry_after));
        }

        resp.json::<serde_json::Value>().map_err(|e| {
            ProviderError::ResponseFormatChanged(format!("failed to parse response for {path}: {e}"))
        })
    }
}
