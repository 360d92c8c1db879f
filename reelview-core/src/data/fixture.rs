//! JSON fixture provider.
//!
//! Serves `GET {path}` from `{root}/{path}.json`, e.g. `movie/550` from
//! `fixtures/movie/550.json` and `movie/550/credits` from
//! `fixtures/movie/550/credits.json`. Used for offline runs and tests.

use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use super::provider::{MovieProvider, ProviderError};

pub struct FixtureProvider {
    root: PathBuf,
    latency: Duration,
}

impl FixtureProvider {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            latency: Duration::ZERO,
        }
    }

    /// Sleep this long before answering each request.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// File backing `path`. Rejects anything that could escape the root.
    pub fn file_for(&self, path: &str) -> Result<PathBuf, ProviderError> {
        let rel = Path::new(path.trim_start_matches('/'));
        let escapes = rel
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        if path.trim().is_empty() || escapes {
            return Err(ProviderError::InvalidPath(path.to_string()));
        }
        let mut file = self.root.join(rel).into_os_string();
        file.push(".json");
        Ok(PathBuf::from(file))
    }
}

impl MovieProvider for FixtureProvider {
    fn name(&self) -> &str {
        "fixtures"
    }

    fn fetch_json(&self, path: &str) -> Result<serde_json::Value, ProviderError> {
        let file = self.file_for(path)?;
        if !self.latency.is_zero() {
            std::thread::sleep(self.latency);
        }
        tracing::debug!(file = %file.display(), "fixture GET");

        let content = match std::fs::read_to_string(&file) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ProviderError::NotFound { path: path.into() });
            }
            Err(e) => return Err(ProviderError::Io(format!("{}: {e}", file.display()))),
        };

        serde_json::from_str(&content).map_err(|e| {
            ProviderError::ResponseFormatChanged(format!("{}: {e}", file.display()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MovieId;

    fn write(root: &Path, rel: &str, body: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, body).unwrap();
    }

    #[test]
    fn serves_nested_paths() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "movie/550.json", r#"{"original_title": "Fight Club"}"#);
        write(dir.path(), "movie/550/credits.json", r#"{"cast": []}"#);

        let p = FixtureProvider::new(dir.path());
        let id = MovieId::parse("550").unwrap();
        assert_eq!(p.movie_details(&id).unwrap().original_title, "Fight Club");
        assert!(p.movie_credits(&id).unwrap().cast.is_empty());
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let p = FixtureProvider::new(dir.path());
        let err = p.fetch_json("movie/1").unwrap_err();
        assert!(matches!(err, ProviderError::NotFound { .. }));
    }

    #[test]
    fn invalid_json_is_format_error() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "movie/2.json", "not json {{");
        let err = FixtureProvider::new(dir.path()).fetch_json("movie/2").unwrap_err();
        assert!(matches!(err, ProviderError::ResponseFormatChanged(_)));
    }

    #[test]
    fn rejects_escaping_paths() {
        let p = FixtureProvider::new("/tmp/fixtures");
        assert!(matches!(p.file_for("../secret"), Err(ProviderError::InvalidPath(_))));
        assert!(matches!(p.file_for(""), Err(ProviderError::InvalidPath(_))));
        assert_eq!(
            p.file_for("/movie/550").unwrap(),
            PathBuf::from("/tmp/fixtures/movie/550.json")
        );
    }
}
