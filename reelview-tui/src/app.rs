//! Application state: single-owner, main-thread only.
//!
//! All TUI state lives here. The worker thread communicates via channels;
//! responses are applied through the fetch slots, which drop stale ones.

use std::collections::{HashSet, VecDeque};
use std::sync::mpsc::{Receiver, Sender};

use chrono::NaiveDateTime;

use reelview_core::config::ImageConfig;
use reelview_core::domain::{CastMember, MovieDetails, MovieId, Review};
use reelview_core::fetch::{FetchSlot, LoadTicket, Resolution};
use reelview_core::navigation::{Location, Navigator, Route, SubView};
use reelview_core::view::{DetailView, OutletView};

use crate::worker::{WorkerCommand, WorkerResponse};

const ERROR_HISTORY_CAP: usize = 50;
pub const RECENT_CAP: usize = 20;

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub source: &'static str,
    pub message: String,
    pub context: String,
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    OpenMovie,
    ErrorHistory,
    Help,
}

/// Top-level application state.
pub struct AppState {
    pub running: bool,

    // Navigation
    pub nav: Navigator,
    /// Recently opened movies, newest first.
    pub recent: Vec<MovieId>,
    pub recent_cursor: usize,

    // Fetch slots
    pub movie: FetchSlot<MovieDetails>,
    pub cast: FetchSlot<Vec<CastMember>>,
    pub reviews: FetchSlot<Vec<Review>>,
    pub images: ImageConfig,

    // Worker communication
    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
    pub overlay: Overlay,
    pub input: String,
    pub detail_scroll: u16,
    pub provider_name: String,
}

impl AppState {
    pub fn new(
        worker_tx: Sender<WorkerCommand>,
        worker_rx: Receiver<WorkerResponse>,
        images: ImageConfig,
        provider_name: impl Into<String>,
    ) -> Self {
        Self {
            running: true,
            nav: Navigator::default(),
            recent: Vec::new(),
            recent_cursor: 0,
            movie: FetchSlot::new("movie"),
            cast: FetchSlot::new("cast"),
            reviews: FetchSlot::new("reviews"),
            images,
            worker_tx,
            worker_rx,
            status_message: None,
            error_history: VecDeque::with_capacity(ERROR_HISTORY_CAP),
            error_scroll: 0,
            overlay: Overlay::None,
            input: String::new(),
            detail_scroll: 0,
            provider_name: provider_name.into(),
        }
    }

    pub fn route(&self) -> Route {
        self.nav.route()
    }

    /// Move to `location` and start whatever loads the new route needs.
    pub fn navigate(&mut self, location: Location) {
        if location.route().movie_id() != self.nav.route().movie_id() {
            self.detail_scroll = 0;
        }
        self.nav.push(location);
        self.sync_route();
    }

    /// Open a movie's detail page from wherever we are now.
    pub fn open_movie(&mut self, id: MovieId) {
        let from = self.nav.current().path.clone();
        self.remember(&id);
        self.navigate(Location::movie(&id, from));
    }

    /// "Go back" button: only present once the movie has loaded.
    pub fn go_back(&mut self) -> bool {
        if self.movie.status().success().is_none() {
            return false;
        }
        let target = self.nav.current().back_target();
        self.navigate(target);
        true
    }

    pub fn go_home(&mut self) {
        self.navigate(Location::home());
    }

    /// Follow the Cast/Reviews link. Only available once the movie has loaded.
    pub fn open_sub_view(&mut self, sub: SubView) -> bool {
        if self.movie.status().success().is_none() {
            return false;
        }
        match self.nav.current().sub_view_link(sub) {
            Some(link) => {
                self.navigate(link);
                true
            }
            None => false,
        }
    }

    /// Re-issue the current route's requests regardless of their status.
    pub fn reload(&mut self) {
        let route = self.route();
        let Some(id) = route.movie_id().cloned() else {
            return;
        };
        let ticket = self.movie.load(id.clone());
        self.send(WorkerCommand::FetchMovie { ticket });
        match route.sub_view() {
            Some(SubView::Cast) => {
                let ticket = self.cast.load(id);
                self.send(WorkerCommand::FetchCast { ticket });
            }
            Some(SubView::Reviews) => {
                let ticket = self.reviews.load(id);
                self.send(WorkerCommand::FetchReviews { ticket });
            }
            None => {}
        }
        self.set_status("Reloading...");
    }

    /// Bring the fetch slots in line with the current route.
    ///
    /// The detail slot follows the route's identifier. A sub-view slot follows
    /// it only while that sub-view is open, and a failed one is fetched again
    /// each time its route is entered.
    pub fn sync_route(&mut self) {
        let route = self.route();
        let id = route.movie_id();

        if let Some(ticket) = self.movie.sync(id) {
            self.send(WorkerCommand::FetchMovie { ticket });
        }
        match route.sub_view() {
            Some(SubView::Cast) => {
                if let Some(ticket) = enter_outlet(&mut self.cast, id) {
                    self.send(WorkerCommand::FetchCast { ticket });
                }
            }
            Some(SubView::Reviews) => {
                if let Some(ticket) = enter_outlet(&mut self.reviews, id) {
                    self.send(WorkerCommand::FetchReviews { ticket });
                }
            }
            None => {}
        }
    }

    fn send(&mut self, cmd: WorkerCommand) {
        if self.worker_tx.send(cmd).is_err() {
            self.push_error("worker", "background worker is not running".into(), String::new());
        }
    }

    /// Apply one worker response.
    pub fn apply(&mut self, resp: WorkerResponse) -> Resolution {
        match resp {
            WorkerResponse::Movie { ticket, result } => {
                let error = result.as_ref().err().map(|e| e.to_string());
                let r = self.movie.resolve(&ticket, result, MovieDetails::from_raw);
                self.after_resolve(r, "movie", &ticket, error);
                r
            }
            WorkerResponse::Cast { ticket, result } => {
                let error = result.as_ref().err().map(|e| e.to_string());
                let r = self.cast.resolve(&ticket, result, CastMember::list_from_raw);
                self.after_resolve(r, "cast", &ticket, error);
                r
            }
            WorkerResponse::Reviews { ticket, result } => {
                let error = result.as_ref().err().map(|e| e.to_string());
                let r = self.reviews.resolve(&ticket, result, Review::list_from_raw);
                self.after_resolve(r, "reviews", &ticket, error);
                r
            }
        }
    }

    fn after_resolve(
        &mut self,
        resolution: Resolution,
        source: &'static str,
        ticket: &LoadTicket,
        error: Option<String>,
    ) {
        if resolution == Resolution::Stale {
            return;
        }
        match error {
            Some(message) => self.push_error(source, message, format!("movie {}", ticket.id)),
            None if source == "movie" => {
                self.set_status(format!("Loaded movie {} from {}", ticket.id, self.provider_name));
            }
            None => {}
        }
    }

    /// Drain all pending worker responses without blocking.
    pub fn drain_worker(&mut self) {
        while let Ok(resp) = self.worker_rx.try_recv() {
            self.apply(resp);
        }
    }

    /// View model for the detail page of the current route.
    pub fn detail_view(&self) -> DetailView {
        let location = self.nav.current();
        let outlet = OutletView::build(
            location.route().sub_view(),
            self.cast.status(),
            self.reviews.status(),
            &self.images,
        );
        DetailView::build(self.movie.status(), location, outlet, &self.images)
    }

    fn remember(&mut self, id: &MovieId) {
        let mut recent = vec![id.clone()];
        recent.append(&mut self.recent);
        self.set_recent(recent);
    }

    /// Replace the recent list, keeping the first occurrence of each id and at
    /// most `RECENT_CAP` entries.
    pub fn set_recent(&mut self, ids: Vec<MovieId>) {
        let mut seen = HashSet::new();
        self.recent = ids.into_iter().filter(|id| seen.insert(id.clone())).collect();
        self.recent.truncate(RECENT_CAP);
        self.recent_cursor = 0;
    }

    /// Push an error to the history, capping at 50.
    pub fn push_error(&mut self, source: &'static str, message: String, context: String) {
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            source,
            message: message.clone(),
            context,
        };
        self.error_history.push_front(record);
        if self.error_history.len() > ERROR_HISTORY_CAP {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    /// Set an info status message.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    /// Set a warning status message.
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }
}

/// Ticket for a sub-view slot whose route was just entered.
fn enter_outlet<T>(slot: &mut FetchSlot<T>, id: Option<&MovieId>) -> Option<LoadTicket> {
    match id {
        Some(id) if slot.status().is_error() => Some(slot.load(id.clone())),
        _ => slot.sync(id),
    }
}
