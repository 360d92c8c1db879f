//! Application configuration loaded from TOML.
//!
//! Every field has a default, so an empty or missing file is a valid config.
//!
//! ```toml
//! [api]
//! base_url = "https://api.themoviedb.org/3"
//! api_key = "..."
//! language = "en-US"
//! timeout_secs = 30
//!
//! [images]
//! base_url = "https://image.tmdb.org/t/p/w500"
//! placeholder = "assets/poster-not-found.jpg"
//!
//! [logging]
//! filter = "info"
//! file = "reelview.log"
//!
//! [fixtures]
//! dir = "fixtures"
//! latency_ms = 0
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const API_KEY_ENV: &str = "TMDB_API_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub images: ImageConfig,
    pub logging: LoggingConfig,
    pub fixtures: FixtureConfig,
}

/// Remote movie database settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_key: String,
    pub language: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.themoviedb.org/3".into(),
            api_key: String::new(),
            language: "en-US".into(),
            timeout_secs: 30,
        }
    }
}

/// Where poster and profile images come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    /// Prefix for poster paths such as `/abc.jpg`.
    pub base_url: String,
    /// Shown when a movie has no poster.
    pub placeholder: String,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            base_url: "https://image.tmdb.org/t/p/w500".into(),
            placeholder: "assets/poster-not-found.jpg".into(),
        }
    }
}

impl ImageConfig {
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directives. `RUST_LOG` wins when set.
    pub filter: String,
    /// Log file for the TUI. Relative paths resolve against the working directory.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".into(),
            file: None,
        }
    }
}

/// Serve responses from JSON files instead of the network.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixtureConfig {
    pub dir: Option<PathBuf>,
    /// Artificial delay per request, to make the loading state visible.
    pub latency_ms: u64,
}

impl AppConfig {
    /// `<config dir>/reelview/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("reelview").join("config.toml"))
    }

    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    pub fn to_toml_string(&self) -> String {
        // Every field is a plain string/number/path; serialization cannot fail.
        toml::to_string_pretty(self).unwrap_or_default()
    }

    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, the default location is
    /// used if present, otherwise defaults apply. `TMDB_API_KEY` overrides
    /// `api.api_key` in every case.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::read(path)?,
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::read(&path)?,
                _ => Self::default(),
            },
        };
        Ok(config.with_api_key_override(std::env::var(API_KEY_ENV).ok()))
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content, path)
    }

    /// Replace the API key when `key` is set and non-blank.
    pub fn with_api_key_override(mut self, key: Option<String>) -> Self {
        if let Some(key) = key.filter(|k| !k.trim().is_empty()) {
            self.api.api_key = key.trim().to_string();
        }
        self
    }
}
