//! End-to-end detail page flow against the JSON fixtures:
//! route → fetch slot → provider → mapping → view model.

use std::path::PathBuf;

use reelview_core::config::ImageConfig;
use reelview_core::data::{FixtureProvider, MovieProvider};
use reelview_core::domain::{CastMember, MovieDetails, MovieId, Review};
use reelview_core::fetch::{FetchSlot, FetchStatus, Resolution};
use reelview_core::navigation::{Location, Navigator, SubView};
use reelview_core::view::{DetailView, OutletView};

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn id(s: &str) -> MovieId {
    MovieId::parse(s).unwrap()
}

/// Load the movie for the navigator's current route, synchronously.
fn load_current(
    nav: &Navigator,
    slot: &mut FetchSlot<MovieDetails>,
    provider: &dyn MovieProvider,
) -> Option<Resolution> {
    let route = nav.route();
    let ticket = slot.sync(route.movie_id())?;
    assert!(slot.status().is_loading(), "loading must be set before the request");
    let result = provider.movie_details(&ticket.id);
    Some(slot.resolve(&ticket, result, MovieDetails::from_raw))
}

fn render(nav: &Navigator, slot: &FetchSlot<MovieDetails>) -> Vec<String> {
    DetailView::build(slot.status(), nav.current(), OutletView::Closed, &ImageConfig::default())
        .to_lines()
}

#[test]
fn known_movie_renders_full_layout() {
    let provider = FixtureProvider::new(fixture_dir());
    let mut nav = Navigator::default();
    let mut slot = FetchSlot::new("movie");

    nav.push(Location::movie(&id("550"), "/"));
    assert_eq!(load_current(&nav, &mut slot, &provider), Some(Resolution::Applied));

    let lines = render(&nav, &slot);
    assert_eq!(lines[0], "[Go back] -> /");
    assert_eq!(
        lines[1],
        "Poster: https://image.tmdb.org/t/p/w500/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg"
    );
    assert_eq!(lines[2], "Fight Club (1999)");
    assert_eq!(lines[3], "User score 84%");
    assert!(lines.contains(&"Drama Thriller".to_string()));
}

#[test]
fn sparse_movie_uses_fallbacks() {
    let provider = FixtureProvider::new(fixture_dir());
    let mut nav = Navigator::default();
    let mut slot = FetchSlot::new("movie");

    nav.push(Location::movie(&id("9999"), "/"));
    load_current(&nav, &mut slot, &provider);

    let lines = render(&nav, &slot);
    assert_eq!(lines[1], "Poster: assets/poster-not-found.jpg");
    assert_eq!(lines[2], "Untitled Project");
    assert_eq!(lines[3], "User score 0%");
    assert_eq!(
        lines.iter().filter(|l| *l == "Not information").count(),
        2,
        "overview and genres both fall back"
    );
}

#[test]
fn unknown_movie_is_not_found() {
    let provider = FixtureProvider::new(fixture_dir());
    let mut nav = Navigator::default();
    let mut slot = FetchSlot::new("movie");

    nav.push(Location::movie(&id("404"), "/"));
    load_current(&nav, &mut slot, &provider);

    assert!(slot.status().is_error());
    assert_eq!(render(&nav, &slot), vec!["NOT FOUND"]);
}

#[test]
fn home_route_stays_idle() {
    let provider = FixtureProvider::new(fixture_dir());
    let nav = Navigator::default();
    let mut slot = FetchSlot::new("movie");

    assert_eq!(load_current(&nav, &mut slot, &provider), None);
    assert!(slot.status().is_idle());
    assert!(render(&nav, &slot).is_empty());
}

#[test]
fn switching_sub_views_keeps_movie_loaded() {
    let provider = FixtureProvider::new(fixture_dir());
    let mut nav = Navigator::default();
    let mut slot = FetchSlot::new("movie");
    let mut cast: FetchSlot<Vec<CastMember>> = FetchSlot::new("cast");
    let reviews: FetchSlot<Vec<Review>> = FetchSlot::new("reviews");

    nav.push(Location::movie(&id("550"), "/"));
    load_current(&nav, &mut slot, &provider);
    assert!(nav.open_sub_view(SubView::Cast));

    // Same identifier: the detail slot issues nothing new.
    assert_eq!(load_current(&nav, &mut slot, &provider), None);

    let ticket = cast.sync(nav.route().movie_id()).unwrap();
    let outlet = OutletView::build(nav.route().sub_view(), cast.status(), reviews.status(), &ImageConfig::default());
    assert_eq!(outlet, OutletView::Loading);

    cast.resolve(&ticket, provider.movie_credits(&ticket.id), CastMember::list_from_raw);
    let outlet = OutletView::build(nav.route().sub_view(), cast.status(), reviews.status(), &ImageConfig::default());
    assert_eq!(
        outlet.to_lines(),
        vec![
            "- Edward Norton as The Narrator",
            "- Brad Pitt as Tyler Durden",
            "- Helena Bonham Carter as Marla Singer",
        ]
    );

    let lines = DetailView::build(slot.status(), nav.current(), outlet, &ImageConfig::default()).to_lines();
    assert!(lines.contains(&"  * Cast -> /movies/550/cast".to_string()));
    assert_eq!(lines.last().unwrap(), "- Helena Bonham Carter as Marla Singer");

    nav.go_back();
    assert_eq!(nav.current().path, "/");
}

#[test]
fn late_response_for_previous_movie_is_ignored() {
    let provider = FixtureProvider::new(fixture_dir());
    let mut slot = FetchSlot::new("movie");

    // "550" is requested, then the user moves on to "9999" before it settles.
    let first = slot.sync(Some(&id("550"))).unwrap();
    let second = slot.sync(Some(&id("9999"))).unwrap();

    let late = provider.movie_details(&first.id);
    assert_eq!(
        slot.resolve(&first, late, MovieDetails::from_raw),
        Resolution::Stale
    );
    assert!(slot.status().is_loading());

    let current = provider.movie_details(&second.id);
    assert_eq!(
        slot.resolve(&second, current, MovieDetails::from_raw),
        Resolution::Applied
    );
    match slot.status() {
        FetchStatus::Success(movie) => assert_eq!(movie.title, "Untitled Project"),
        other => panic!("expected success, got {}", other.label()),
    }
}
