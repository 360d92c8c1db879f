//! Background worker thread: every network request runs here.
//!
//! Communication with the TUI main thread is via `mpsc` channels. Each command
//! carries the `LoadTicket` it was issued for and the response echoes it back,
//! so the main thread can drop answers that arrive after the user moved on.

use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use reelview_core::data::{MovieProvider, ProviderError};
use reelview_core::domain::{RawCredits, RawMovieDetails, RawReviews};
use reelview_core::fetch::LoadTicket;

/// Commands sent from the TUI to the worker.
#[derive(Debug)]
pub enum WorkerCommand {
    FetchMovie { ticket: LoadTicket },
    FetchCast { ticket: LoadTicket },
    FetchReviews { ticket: LoadTicket },
    Shutdown,
}

impl WorkerCommand {
    /// Commands of the same kind target the same fetch slot.
    fn kind(&self) -> u8 {
        match self {
            WorkerCommand::FetchMovie { .. } => 0,
            WorkerCommand::FetchCast { .. } => 1,
            WorkerCommand::FetchReviews { .. } => 2,
            WorkerCommand::Shutdown => 3,
        }
    }
}

/// Responses sent from the worker back to the TUI.
#[derive(Debug)]
pub enum WorkerResponse {
    Movie {
        ticket: LoadTicket,
        result: Result<RawMovieDetails, ProviderError>,
    },
    Cast {
        ticket: LoadTicket,
        result: Result<RawCredits, ProviderError>,
    },
    Reviews {
        ticket: LoadTicket,
        result: Result<RawReviews, ProviderError>,
    },
}

/// Spawn the background worker thread.
pub fn spawn_worker(
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
    provider: Arc<dyn MovieProvider>,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("reelview-worker".into())
        .spawn(move || worker_loop(rx, tx, provider))
}

/// Ask the worker to stop and wait up to `grace` for it.
///
/// A request already in flight is not interrupted. If the worker has not
/// finished within `grace` it is left detached and `false` is returned.
pub fn stop_worker(tx: &Sender<WorkerCommand>, handle: JoinHandle<()>, grace: Duration) -> bool {
    let _ = tx.send(WorkerCommand::Shutdown);
    let deadline = Instant::now() + grace;
    while !handle.is_finished() {
        if Instant::now() >= deadline {
            tracing::warn!(grace_ms = grace.as_millis() as u64, "worker still busy, not waiting for it");
            return false;
        }
        thread::sleep(Duration::from_millis(10));
    }
    let _ = handle.join();
    true
}

fn worker_loop(
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
    provider: Arc<dyn MovieProvider>,
) {
    tracing::debug!(provider = provider.name(), "worker started");
    loop {
        let first = match rx.recv() {
            Ok(WorkerCommand::Shutdown) | Err(_) => break,
            Ok(cmd) => cmd,
        };

        // Whatever queued up while the last request ran.
        let mut pending = vec![first];
        pending.extend(rx.try_iter());

        for cmd in coalesce(pending) {
            if matches!(cmd, WorkerCommand::Shutdown) {
                tracing::debug!("worker stopping");
                return;
            }
            if tx.send(handle_command(cmd, provider.as_ref())).is_err() {
                // UI is gone.
                return;
            }
        }
    }
    tracing::debug!("worker stopping");
}

/// Keep only the newest command per slot, in arrival order.
///
/// A newer fetch for a slot always supersedes an older one, so the older
/// response would be discarded as stale anyway.
fn coalesce(commands: Vec<WorkerCommand>) -> Vec<WorkerCommand> {
    let mut kept: Vec<WorkerCommand> = Vec::with_capacity(commands.len());
    for cmd in commands {
        if cmd.kind() != WorkerCommand::Shutdown.kind() {
            if let Some(pos) = kept.iter().position(|c| c.kind() == cmd.kind()) {
                let superseded = kept.remove(pos);
                tracing::debug!(?superseded, "skipping superseded request");
            }
        }
        kept.push(cmd);
    }
    kept
}

fn handle_command(cmd: WorkerCommand, provider: &dyn MovieProvider) -> WorkerResponse {
    match cmd {
        WorkerCommand::FetchMovie { ticket } => {
            let result = provider.movie_details(&ticket.id);
            WorkerResponse::Movie { ticket, result }
        }
        WorkerCommand::FetchCast { ticket } => {
            let result = provider.movie_credits(&ticket.id);
            WorkerResponse::Cast { ticket, result }
        }
        WorkerCommand::FetchReviews { ticket } => {
            let result = provider.movie_reviews(&ticket.id);
            WorkerResponse::Reviews { ticket, result }
        }
        WorkerCommand::Shutdown => unreachable!("shutdown is handled by the worker loop"),
    }
}
