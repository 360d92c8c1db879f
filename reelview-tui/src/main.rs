//! ReelView TUI: movie detail browser.
//!
//! Routes:
//! - `/`: home, recently opened movies
//! - `/movies/{id}`: detail page
//! - `/movies/{id}/cast`, `/movies/{id}/reviews`: detail page with a sub-view below it

mod app;
mod input;
mod persistence;
mod theme;
mod ui;
mod worker;

use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use reelview_core::config::AppConfig;
use reelview_core::data::provider_from_config;
use reelview_core::domain::MovieId;
use reelview_core::telemetry;

use crate::app::AppState;

const SHUTDOWN_GRACE: Duration = Duration::from_millis(500);

#[derive(Parser)]
#[command(name = "reelview-tui", about = "Browse movie details in the terminal")]
struct Args {
    /// Config file (default: platform config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Serve requests from a fixture directory instead of the network
    #[arg(long)]
    fixtures: Option<PathBuf>,

    /// Open this movie on startup
    movie_id: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = AppConfig::load(args.config.as_deref())?;
    if let Some(dir) = args.fixtures {
        config.fixtures.dir = Some(dir);
    }

    let log_path = config
        .logging
        .file
        .clone()
        .or_else(|| dirs::data_local_dir().map(|d| d.join("reelview").join("reelview.log")))
        .unwrap_or_else(|| PathBuf::from("reelview.log"));
    telemetry::init_file(&log_path, &config.logging.filter)?;

    let start_movie = match args.movie_id.as_deref() {
        Some(raw) => Some(
            MovieId::parse(raw).with_context(|| format!("invalid movie id {raw:?}"))?,
        ),
        None => None,
    };

    let provider = provider_from_config(&config)?;
    tracing::info!(provider = provider.name(), "starting");

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let state_path = persistence::default_path().unwrap_or_else(|| PathBuf::from("state.json"));
    let persisted = persistence::load(&state_path);

    // Worker channels
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();

    let provider_name = provider.name().to_string();
    let worker_handle = worker::spawn_worker(cmd_rx, resp_tx, provider)?;

    let mut app = AppState::new(cmd_tx.clone(), resp_rx, config.images.clone(), provider_name);
    persistence::apply(&mut app, persisted);
    if let Some(id) = start_movie {
        app.open_movie(id);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Save state before exit
    let persisted = persistence::extract(&app);
    if let Err(e) = persistence::save(&state_path, &persisted) {
        tracing::warn!(path = %state_path.display(), error = %e, "could not save state");
    }

    // Shutdown worker; a blocking request in flight must not hold up quitting
    worker::stop_worker(&cmd_tx, worker_handle, SHUTDOWN_GRACE);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("exiting");
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Drain worker responses (non-blocking)
        app.drain_worker();

        // 3. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        // 4. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}
