//! Provider trait and structured error types.
//!
//! A provider answers `GET {path}` with a JSON document. The typed accessors
//! (`movie_details`, `movie_credits`, `movie_reviews`) sit on top of that, so
//! implementations only deal with transport and the tests can swap in fixtures.

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::domain::{MovieId, RawCredits, RawMovieDetails, RawReviews};

/// Structured provider errors.
///
/// Views collapse all of these into a single "not found" state; the variants
/// exist for logs and the TUI error history.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("not found: {path}")]
    NotFound { path: String },

    #[error("authentication required: {0}")]
    Unauthorized(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("HTTP {status} for {path}")]
    Http { status: u16, path: String },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("invalid request path: {0}")]
    InvalidPath(String),

    #[error("fixture I/O error: {0}")]
    Io(String),

    #[error("provider setup failed: {0}")]
    Setup(String),
}

/// Request path for a movie's details.
pub fn movie_path(id: &MovieId) -> String {
    format!("movie/{id}")
}

pub fn credits_path(id: &MovieId) -> String {
    format!("movie/{id}/credits")
}

pub fn reviews_path(id: &MovieId) -> String {
    format!("movie/{id}/reviews")
}

/// Source of raw movie payloads.
pub trait MovieProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// `GET {path}` and return the decoded JSON body. Non-success responses are errors.
    fn fetch_json(&self, path: &str) -> Result<serde_json::Value, ProviderError>;

    fn movie_details(&self, id: &MovieId) -> Result<RawMovieDetails, ProviderError> {
        let path = movie_path(id);
        decode(&path, self.fetch_json(&path)?)
    }

    fn movie_credits(&self, id: &MovieId) -> Result<RawCredits, ProviderError> {
        let path = credits_path(id);
        decode(&path, self.fetch_json(&path)?)
    }

    fn movie_reviews(&self, id: &MovieId) -> Result<RawReviews, ProviderError> {
        let path = reviews_path(id);
        decode(&path, self.fetch_json(&path)?)
    }
}

fn decode<T: DeserializeOwned>(path: &str, value: serde_json::Value) -> Result<T, ProviderError> {
    serde_json::from_value(value)
        .map_err(|e| ProviderError::ResponseFormatChanged(format!("{path}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory provider recording every path it is asked for.
    struct MapProvider {
        docs: HashMap<String, serde_json::Value>,
        requests: Mutex<Vec<String>>,
    }

    impl MovieProvider for MapProvider {
        fn name(&self) -> &str {
            "map"
        }

        fn fetch_json(&self, path: &str) -> Result<serde_json::Value, ProviderError> {
            self.requests.lock().unwrap().push(path.to_string());
            self.docs
                .get(path)
                .cloned()
                .ok_or_else(|| ProviderError::NotFound { path: path.into() })
        }
    }

    fn provider() -> MapProvider {
        let mut docs = HashMap::new();
        docs.insert(
            "movie/550".to_string(),
            serde_json::json!({"original_title": "Fight Club", "vote_average": 8.4}),
        );
        docs.insert(
            "movie/13".to_string(),
            serde_json::json!({"original_title": 13}),
        );
        MapProvider {
            docs,
            requests: Mutex::new(Vec::new()),
        }
    }

    #[test]
    fn movie_details_requests_movie_path() {
        let p = provider();
        let id = MovieId::parse("550").unwrap();
        let raw = p.movie_details(&id).unwrap();
        assert_eq!(raw.original_title, "Fight Club");
        assert_eq!(*p.requests.lock().unwrap(), vec!["movie/550".to_string()]);
    }

    #[test]
    fn sub_view_paths() {
        let id = MovieId::parse("550").unwrap();
        assert_eq!(credits_path(&id), "movie/550/credits");
        assert_eq!(reviews_path(&id), "movie/550/reviews");
    }

    #[test]
    fn wrong_shape_is_format_error() {
        let p = provider();
        let err = p.movie_details(&MovieId::parse("13").unwrap()).unwrap_err();
        assert!(matches!(err, ProviderError::ResponseFormatChanged(_)));
    }

    #[test]
    fn missing_document_propagates() {
        let p = provider();
        let err = p.movie_credits(&MovieId::parse("550").unwrap()).unwrap_err();
        assert!(matches!(err, ProviderError::NotFound { .. }));
        assert_eq!(err.to_string(), "not found: movie/550/credits");
    }
}
