//! Background worker thread that processes actions through middleware
//!
//! - Main thread handles rendering and user input only
//! - Background thread runs the middleware chain (GitHub calls, file I/O)
//! - Actions the middleware lets through are sent back for the reducers

use crate::actions::{Action, BootstrapAction, GlobalAction};
use crate::dispatcher::Dispatcher;
use crate::middleware::Middleware;
use crate::state::AppState;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, RwLock};
use std::thread;
use std::time::{Duration, Instant};

/// Shared state that background can read (main thread writes via reducer)
pub type SharedState = Arc<RwLock<AppState>>;

/// Splash animation speed
const BOOTSTRAP_TICK: Duration = Duration::from_millis(150);
/// Afterwards ticks only expire notices
const IDLE_TICK: Duration = Duration::from_secs(1);

/// Spawn the background worker thread
///
/// - `action_rx`: actions from the main thread and from the Dispatcher
/// - `action_tx`: feeds the Dispatcher so middleware output re-enters the chain
/// - `result_tx`: actions for the reducers on the main thread
pub fn spawn_background_worker(
    action_rx: Receiver<Action>,
    action_tx: Sender<Action>,
    result_tx: Sender<Action>,
    state: SharedState,
    middleware: Vec<Box<dyn Middleware + Send>>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        background_loop(action_rx, action_tx, result_tx, state, middleware);
    })
}

fn background_loop(
    action_rx: Receiver<Action>,
    action_tx: Sender<Action>,
    result_tx: Sender<Action>,
    state: SharedState,
    mut middleware: Vec<Box<dyn Middleware + Send>>,
) {
    log::info!("Background worker started");

    let dispatcher = Dispatcher::new(action_tx);

    let mut last_tick = Instant::now();
    let mut tick_rate = BOOTSTRAP_TICK;

    loop {
        match action_rx.recv_timeout(Duration::from_millis(10)) {
            Ok(action) => {
                if matches!(action, Action::Global(GlobalAction::Quit)) {
                    log::info!("Background worker received shutdown signal");
                    if result_tx.send(action).is_err() {
                        log::error!("Failed to send quit action to main thread");
                    }
                    break;
                }

                if matches!(action, Action::Bootstrap(BootstrapAction::End)) {
                    tick_rate = IDLE_TICK;
                    log::debug!("Bootstrap ended, slowing down ticks");
                }

                let current_state = match state.read() {
                    Ok(s) => s.clone(),
                    Err(e) => {
                        log::error!("Failed to read shared state: {}", e);
                        continue;
                    }
                };

                let should_forward = middleware
                    .iter_mut()
                    .all(|mw| mw.handle(&action, &current_state, &dispatcher));

                // Events are only for middleware observation
                if should_forward
                    && !matches!(action, Action::Event(_))
                    && result_tx.send(action).is_err()
                {
                    log::error!("Result channel disconnected, shutting down");
                    break;
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                log::info!("Action channel disconnected, shutting down");
                break;
            }
        }

        if last_tick.elapsed() >= tick_rate {
            if result_tx.send(Action::Global(GlobalAction::Tick)).is_err() {
                log::error!("Result channel disconnected during tick");
                break;
            }
            last_tick = Instant::now();
        }
    }

    log::info!("Background worker stopped");
}
