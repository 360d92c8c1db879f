//! Session persistence: JSON save/load across restarts.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use reelview_core::domain::MovieId;
use reelview_core::navigation::Location;

use crate::app::AppState;

/// Serializable subset of app state that persists across restarts.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedState {
    /// Location on exit, including its navigation state.
    pub last_location: Location,
    /// Recently opened movies, newest first.
    pub recent: Vec<MovieId>,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            last_location: Location::home(),
            recent: Vec::new(),
        }
    }
}

/// `{data_local_dir}/reelview/state.json`.
pub fn default_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("reelview").join("state.json"))
}

/// Load persisted state from disk. Returns defaults if file is missing or corrupt.
pub fn load(path: &Path) -> PersistedState {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "ignoring corrupt state file");
            PersistedState::default()
        }),
        Err(_) => PersistedState::default(),
    }
}

/// Save persisted state to disk. Creates parent directories if needed.
pub fn save(path: &Path, state: &PersistedState) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Extract persisted state from AppState.
pub fn extract(app: &AppState) -> PersistedState {
    PersistedState {
        last_location: app.nav.current().clone(),
        recent: app.recent.clone(),
    }
}

/// Apply persisted state to AppState and start loading the restored route.
pub fn apply(app: &mut AppState, state: PersistedState) {
    app.set_recent(state.recent);
    app.navigate(state.last_location);
}
