//! Data providers: where raw movie payloads come from.

pub mod fixture;
pub mod provider;
pub mod tmdb;

pub use fixture::FixtureProvider;
pub use provider::{MovieProvider, ProviderError};
pub use tmdb::TmdbProvider;

use std::sync::Arc;
use std::time::Duration;

use crate::config::AppConfig;

/// Build the provider the config asks for: fixtures when `[fixtures] dir` is
/// set, TMDB over HTTP otherwise.
pub fn provider_from_config(config: &AppConfig) -> Result<Arc<dyn MovieProvider>, ProviderError> {
    match &config.fixtures.dir {
        Some(dir) => {
            tracing::info!(dir = %dir.display(), "using fixture provider");
            Ok(Arc::new(
                FixtureProvider::new(dir)
                    .with_latency(Duration::from_millis(config.fixtures.latency_ms)),
            ))
        }
        None => {
            tracing::info!(base_url = %config.api.base_url, "using TMDB provider");
            Ok(Arc::new(TmdbProvider::new(&config.api)?))
        }
    }
}
