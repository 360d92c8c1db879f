//! ReelView CLI: print a movie's detail page without the TUI.
//!
//! Commands:
//! - `show`: detail page, optionally with the cast or reviews sub-view
//! - `cast` / `reviews`: just the sub-view content
//! - `config`: print the effective configuration

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use reelview_core::config::{AppConfig, ImageConfig};
use reelview_core::data::{provider_from_config, MovieProvider};
use reelview_core::domain::{CastMember, MovieDetails, MovieId, Review};
use reelview_core::fetch::{FetchSlot, FetchStatus};
use reelview_core::navigation::{Location, NavState, Route, SubView};
use reelview_core::telemetry;
use reelview_core::view::{DetailView, OutletView};

#[derive(Parser)]
#[command(name = "reelview", about = "ReelView CLI: movie details from TMDB")]
struct Cli {
    /// Config file (default: platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Serve requests from a fixture directory instead of the network
    #[arg(long, global = true)]
    fixtures: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a movie's detail page.
    Show {
        /// Movie identifier (e.g. 550).
        id: String,

        /// Open a sub-view below the details.
        #[arg(long, value_enum)]
        with: Option<SubViewArg>,

        /// Path the page was reached from; "Go back" leads here.
        #[arg(long)]
        from: Option<String>,

        /// Print the mapped movie as JSON instead.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print a movie's cast.
    Cast {
        id: String,
    },
    /// Print a movie's reviews.
    Reviews {
        id: String,
    },
    /// Print the effective configuration as TOML.
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SubViewArg {
    Cast,
    Reviews,
}

impl From<SubViewArg> for SubView {
    fn from(arg: SubViewArg) -> Self {
        match arg {
            SubViewArg::Cast => SubView::Cast,
            SubViewArg::Reviews => SubView::Reviews,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(dir) = cli.fixtures {
        config.fixtures.dir = Some(dir);
    }
    telemetry::init_stderr(&config.logging.filter)?;

    match cli.command {
        Commands::Show {
            id,
            with,
            from,
            json,
        } => {
            let provider = provider_from_config(&config)?;
            let id = parse_id(&id)?;
            if json {
                return print_json(provider.as_ref(), &id);
            }
            let view = detail_view(
                provider.as_ref(),
                &config.images,
                &id,
                with.map(SubView::from),
                from,
            );
            print_lines(&view.to_lines());
            if view == DetailView::NotFound {
                bail!("movie {id} could not be loaded");
            }
            Ok(())
        }
        Commands::Cast { id } => run_sub_view(&config, &id, SubView::Cast),
        Commands::Reviews { id } => run_sub_view(&config, &id, SubView::Reviews),
        Commands::Config => {
            print!("{}", config.to_toml_string());
            Ok(())
        }
    }
}

fn parse_id(raw: &str) -> Result<MovieId> {
    MovieId::parse(raw).with_context(|| format!("invalid movie id {raw:?}"))
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

/// Run one load through a fresh slot, the same way the TUI does.
fn load<R, T>(
    name: &'static str,
    id: &MovieId,
    fetch: impl FnOnce(&MovieId) -> Result<R, reelview_core::data::ProviderError>,
    map: impl FnOnce(R) -> T,
) -> FetchSlot<T> {
    let mut slot = FetchSlot::new(name);
    if let Some(ticket) = slot.sync(Some(id)) {
        let result = fetch(id);
        slot.resolve(&ticket, result, map);
    }
    slot
}

fn detail_view(
    provider: &dyn MovieProvider,
    images: &ImageConfig,
    id: &MovieId,
    sub: Option<SubView>,
    from: Option<String>,
) -> DetailView {
    let route = Route::Movie {
        id: id.clone(),
        sub,
    };
    let location = Location::new(route.path(), NavState { from });

    let movie = load("movie", id, |id| provider.movie_details(id), MovieDetails::from_raw);

    let cast_slot: FetchSlot<Vec<CastMember>> = FetchSlot::new("cast");
    let reviews_slot: FetchSlot<Vec<Review>> = FetchSlot::new("reviews");
    let (cast, reviews) = match sub {
        // The outlet only mounts once the movie itself has loaded.
        Some(_) if movie.status().success().is_none() => (cast_slot, reviews_slot),
        Some(SubView::Cast) => (
            load("cast", id, |id| provider.movie_credits(id), CastMember::list_from_raw),
            reviews_slot,
        ),
        Some(SubView::Reviews) => (
            cast_slot,
            load("reviews", id, |id| provider.movie_reviews(id), Review::list_from_raw),
        ),
        None => (cast_slot, reviews_slot),
    };

    let outlet = OutletView::build(sub, cast.status(), reviews.status(), images);
    DetailView::build(movie.status(), &location, outlet, images)
}

fn print_json(provider: &dyn MovieProvider, id: &MovieId) -> Result<()> {
    let movie = load("movie", id, |id| provider.movie_details(id), MovieDetails::from_raw);
    match movie.status() {
        FetchStatus::Success(details) => {
            println!("{}", serde_json::to_string_pretty(details)?);
            Ok(())
        }
        _ => bail!("movie {id} could not be loaded"),
    }
}

fn run_sub_view(config: &AppConfig, raw_id: &str, sub: SubView) -> Result<()> {
    let provider = provider_from_config(config)?;
    let id = parse_id(raw_id)?;
    let outlet = match sub {
        SubView::Cast => {
            let slot = load("cast", &id, |id| provider.movie_credits(id), CastMember::list_from_raw);
            OutletView::build(Some(sub), slot.status(), &FetchStatus::Idle, &config.images)
        }
        SubView::Reviews => {
            let slot = load("reviews", &id, |id| provider.movie_reviews(id), Review::list_from_raw);
            OutletView::build(Some(sub), &FetchStatus::Idle, slot.status(), &config.images)
        }
    };
    print_lines(&outlet.to_lines());
    if outlet == OutletView::NotFound {
        bail!("{} for movie {id} could not be loaded", sub.label().to_lowercase());
    }
    Ok(())
}
