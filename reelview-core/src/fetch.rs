//! Fetch slots: the idle → loading → success/error state machine behind each view.
//!
//! A slot tracks one identifier at a time. Every load hands out a [`LoadTicket`]
//! carrying the identifier and a generation number; a response is applied only
//! if its ticket is still the current one and the slot is still loading.
//! Responses for superseded identifiers are dropped, so a slow reply for movie
//! "1" can never overwrite the state of a newer request for movie "2".

use std::fmt;

use crate::domain::MovieId;

/// Which of the four mutually exclusive visual states a view is in.
///
/// The loaded value lives inside `Success`, so there is no way to observe a
/// success status without its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus<T> {
    Idle,
    Loading,
    Success(T),
    Error,
}

impl<T> Default for FetchStatus<T> {
    fn default() -> Self {
        FetchStatus::Idle
    }
}

impl<T> FetchStatus<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, FetchStatus::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FetchStatus::Loading)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, FetchStatus::Error)
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            FetchStatus::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FetchStatus::Idle => "idle",
            FetchStatus::Loading => "loading",
            FetchStatus::Success(_) => "success",
            FetchStatus::Error => "error",
        }
    }
}

/// Proof that a request was issued for `id` at `generation`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub id: MovieId,
    pub generation: u64,
}

/// Outcome of handing a response to [`FetchSlot::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The response belonged to the current load and updated the status.
    Applied,
    /// The response was superseded (or already settled) and was discarded.
    Stale,
}

/// Status holder for one view keyed by a movie identifier.
#[derive(Debug)]
pub struct FetchSlot<T> {
    name: &'static str,
    current: Option<MovieId>,
    generation: u64,
    status: FetchStatus<T>,
}

impl<T> FetchSlot<T> {
    /// `name` only appears in log records ("movie", "cast", ...).
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            current: None,
            generation: 0,
            status: FetchStatus::Idle,
        }
    }

    pub fn status(&self) -> &FetchStatus<T> {
        &self.status
    }

    pub fn current_id(&self) -> Option<&MovieId> {
        self.current.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// React to the identifier the view is showing.
    ///
    /// Returns a ticket only when the identifier changed to a new value; the
    /// caller must then issue exactly one request for it. Switching to `None`
    /// returns the slot to idle and invalidates any request in flight.
    pub fn sync(&mut self, id: Option<&MovieId>) -> Option<LoadTicket> {
        if self.current.as_ref() == id {
            return None;
        }
        match id {
            Some(id) => Some(self.load(id.clone())),
            None => {
                self.reset();
                None
            }
        }
    }

    /// Start a load for `id` unconditionally. Status is `Loading` on return.
    pub fn load(&mut self, id: MovieId) -> LoadTicket {
        self.generation += 1;
        self.status = FetchStatus::Loading;
        tracing::debug!(slot = self.name, movie_id = %id, generation = self.generation, "load started");
        self.current = Some(id.clone());
        LoadTicket {
            id,
            generation: self.generation,
        }
    }

    /// Back to idle; any ticket issued so far becomes stale.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.current = None;
        self.status = FetchStatus::Idle;
    }

    /// True if a response for `ticket` would be applied right now.
    pub fn is_awaiting(&self, ticket: &LoadTicket) -> bool {
        ticket.generation == self.generation
            && self.current.as_ref() == Some(&ticket.id)
            && self.status.is_loading()
    }

    /// Settle the load identified by `ticket`.
    ///
    /// On `Ok`, `map` turns the raw payload into the display value. On `Err`
    /// the error is logged and the status becomes `Error`; the error itself is
    /// not kept.
    pub fn resolve<R, E>(
        &mut self,
        ticket: &LoadTicket,
        result: Result<R, E>,
        map: impl FnOnce(R) -> T,
    ) -> Resolution
    where
        E: fmt::Display,
    {
        if !self.is_awaiting(ticket) {
            tracing::debug!(
                slot = self.name,
                movie_id = %ticket.id,
                generation = ticket.generation,
                current = self.generation,
                "discarding stale response"
            );
            return Resolution::Stale;
        }

        self.status = match result {
            Ok(raw) => FetchStatus::Success(map(raw)),
            Err(e) => {
                tracing::warn!(slot = self.name, movie_id = %ticket.id, error = %e, "fetch failed");
                FetchStatus::Error
            }
        };
        Resolution::Applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> MovieId {
        MovieId::parse(s).unwrap()
    }

    #[test]
    fn starts_idle() {
        let slot: FetchSlot<String> = FetchSlot::new("movie");
        assert!(slot.status().is_idle());
        assert!(slot.current_id().is_none());
    }

    #[test]
    fn load_is_loading_before_any_response() {
        let mut slot: FetchSlot<String> = FetchSlot::new("movie");
        let ticket = slot.sync(Some(&id("550"))).unwrap();
        assert!(slot.status().is_loading());
        assert_eq!(ticket.id, id("550"));
    }

    #[test]
    fn sync_with_same_id_issues_nothing() {
        let mut slot: FetchSlot<String> = FetchSlot::new("movie");
        assert!(slot.sync(Some(&id("550"))).is_some());
        assert!(slot.sync(Some(&id("550"))).is_none());
        assert!(slot.sync(None).is_none());
        assert!(slot.status().is_idle());
        assert!(slot.sync(None).is_none());
    }

    #[test]
    fn success_applies_mapped_value() {
        let mut slot: FetchSlot<usize> = FetchSlot::new("movie");
        let ticket = slot.load(id("550"));
        let r = slot.resolve(&ticket, Ok::<_, String>("abcd"), |s| s.len());
        assert_eq!(r, Resolution::Applied);
        assert_eq!(slot.status(), &FetchStatus::Success(4));
    }

    #[test]
    fn failure_sets_error_without_value() {
        let mut slot: FetchSlot<usize> = FetchSlot::new("movie");
        let ticket = slot.load(id("550"));
        let r = slot.resolve(&ticket, Err::<&str, _>("boom"), |s| s.len());
        assert_eq!(r, Resolution::Applied);
        assert!(slot.status().is_error());
        assert!(slot.status().success().is_none());
    }

    #[test]
    fn superseded_response_is_discarded() {
        let mut slot: FetchSlot<String> = FetchSlot::new("movie");
        let first = slot.sync(Some(&id("1"))).unwrap();
        let second = slot.sync(Some(&id("2"))).unwrap();

        // "1" settles late: must not touch the loading state of "2".
        let r = slot.resolve(&first, Ok::<_, String>("one".to_string()), |s| s);
        assert_eq!(r, Resolution::Stale);
        assert!(slot.status().is_loading());

        let r = slot.resolve(&second, Ok::<_, String>("two".to_string()), |s| s);
        assert_eq!(r, Resolution::Applied);
        assert_eq!(slot.status().success().map(String::as_str), Some("two"));
    }

    #[test]
    fn reload_of_same_id_invalidates_older_ticket() {
        let mut slot: FetchSlot<String> = FetchSlot::new("movie");
        let old = slot.load(id("1"));
        let new = slot.load(id("1"));
        assert_eq!(
            slot.resolve(&old, Err::<String, _>("late"), |s| s),
            Resolution::Stale
        );
        assert!(slot.is_awaiting(&new));
    }

    #[test]
    fn settles_at_most_once_per_ticket() {
        let mut slot: FetchSlot<String> = FetchSlot::new("movie");
        let ticket = slot.load(id("1"));
        slot.resolve(&ticket, Ok::<_, String>("a".to_string()), |s| s);
        let r = slot.resolve(&ticket, Err::<String, _>("again"), |s| s);
        assert_eq!(r, Resolution::Stale);
        assert_eq!(slot.status().label(), "success");
    }

    #[test]
    fn reset_invalidates_in_flight_request() {
        let mut slot: FetchSlot<String> = FetchSlot::new("cast");
        let ticket = slot.load(id("1"));
        slot.reset();
        assert_eq!(
            slot.resolve(&ticket, Ok::<_, String>("x".to_string()), |s| s),
            Resolution::Stale
        );
        assert!(slot.status().is_idle());
    }
}
