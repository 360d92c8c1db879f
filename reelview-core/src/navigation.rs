//! Explicit routing: paths, locations and the opaque state that travels with them.
//!
//! Routes:
//! - `/`: home
//! - `/movies/{id}`: movie detail
//! - `/movies/{id}/cast`: detail with the cast outlet open
//! - `/movies/{id}/reviews`: detail with the reviews outlet open

use serde::{Deserialize, Serialize};

use crate::domain::MovieId;

pub const HOME_PATH: &str = "/";

/// Opaque data handed from one view to the next so the receiver can offer a
/// consistent "go back" target. Never inspected beyond `from`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavState {
    #[serde(default)]
    pub from: Option<String>,
}

impl NavState {
    pub fn from_path(path: impl Into<String>) -> Self {
        Self {
            from: Some(path.into()),
        }
    }
}

/// Nested view rendered in the detail page's outlet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubView {
    Cast,
    Reviews,
}

impl SubView {
    pub const ALL: [SubView; 2] = [SubView::Cast, SubView::Reviews];

    pub fn segment(self) -> &'static str {
        match self {
            SubView::Cast => "cast",
            SubView::Reviews => "reviews",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SubView::Cast => "Cast",
            SubView::Reviews => "Reviews",
        }
    }

    fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "cast" => Some(SubView::Cast),
            "reviews" => Some(SubView::Reviews),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Movie { id: MovieId, sub: Option<SubView> },
}

impl Route {
    /// Parse a path. Anything unrecognised resolves to `Home`.
    pub fn parse(path: &str) -> Route {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            ["movies", id] => MovieId::parse(id)
                .map(|id| Route::Movie { id, sub: None })
                .unwrap_or(Route::Home),
            ["movies", id, sub] => match (MovieId::parse(id), SubView::from_segment(sub)) {
                (Some(id), Some(sub)) => Route::Movie {
                    id,
                    sub: Some(sub),
                },
                (Some(id), None) => Route::Movie { id, sub: None },
                _ => Route::Home,
            },
            _ => Route::Home,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => HOME_PATH.to_string(),
            Route::Movie { id, sub: None } => format!("/movies/{id}"),
            Route::Movie { id, sub: Some(sub) } => format!("/movies/{id}/{}", sub.segment()),
        }
    }

    pub fn movie_id(&self) -> Option<&MovieId> {
        match self {
            Route::Movie { id, .. } => Some(id),
            Route::Home => None,
        }
    }

    pub fn sub_view(&self) -> Option<SubView> {
        match self {
            Route::Movie { sub, .. } => *sub,
            Route::Home => None,
        }
    }
}

/// A path plus the navigation state it was reached with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub path: String,
    #[serde(default)]
    pub state: NavState,
}

impl Location {
    pub fn new(path: impl Into<String>, state: NavState) -> Self {
        Self {
            path: path.into(),
            state,
        }
    }

    pub fn home() -> Self {
        Self::new(HOME_PATH, NavState::default())
    }

    /// Location of a movie's detail page, reached from `from`.
    pub fn movie(id: &MovieId, from: impl Into<String>) -> Self {
        let route = Route::Movie {
            id: id.clone(),
            sub: None,
        };
        Self::new(route.path(), NavState::from_path(from))
    }

    pub fn route(&self) -> Route {
        Route::parse(&self.path)
    }

    /// Where "Go back" leads: the `from` carried in the state, or home.
    pub fn back_target(&self) -> Location {
        match &self.state.from {
            Some(from) => Location::new(from.clone(), NavState::default()),
            None => Location::home(),
        }
    }

    /// Link to a sub-view of this location's movie, forwarding the state unchanged.
    pub fn sub_view_link(&self, sub: SubView) -> Option<Location> {
        let id = self.route().movie_id()?.clone();
        let route = Route::Movie { id, sub: Some(sub) };
        Some(Location::new(route.path(), self.state.clone()))
    }
}

/// Holder of the current location.
#[derive(Debug, Clone)]
pub struct Navigator {
    current: Location,
}

impl Navigator {
    pub fn new(start: Location) -> Self {
        Self { current: start }
    }

    pub fn current(&self) -> &Location {
        &self.current
    }

    pub fn route(&self) -> Route {
        self.current.route()
    }

    pub fn push(&mut self, location: Location) {
        tracing::debug!(from = %self.current.path, to = %location.path, "navigate");
        self.current = location;
    }

    /// Follow the current location's back target. Returns the new location.
    pub fn go_back(&mut self) -> &Location {
        let target = self.current.back_target();
        self.push(target);
        &self.current
    }

    /// Open a sub-view of the current movie. No-op on the home route.
    pub fn open_sub_view(&mut self, sub: SubView) -> bool {
        match self.current.sub_view_link(sub) {
            Some(link) => {
                self.push(link);
                true
            }
            None => false,
        }
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Location::home())
    }
}
