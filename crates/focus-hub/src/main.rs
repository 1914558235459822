use anyhow::Result;
use focus_hub_config::{AppConfig, EncryptedCredentialStore, FileWatchlistStore};
use gh_client::ClientManager;
use ratatui::{
    backend::CrosstermBackend,
    crossterm::{
        event::{self, Event, KeyEventKind},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    },
    Terminal,
};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, RwLock};
use std::time::Duration;

mod actions;
mod background;
mod capabilities;
mod command_id;
mod dispatcher;
mod domain_models;
mod keybindings;
mod keymap;
mod logger;
mod middleware;
mod pr_triage;
mod reducers;
mod repository_sync;
mod session_manager;
mod state;
#[cfg(test)]
mod test_support;
mod utils;
mod view_models;
mod views;

use actions::{Action, BootstrapAction, GlobalAction};
use background::{spawn_background_worker, SharedState};
use middleware::{
    ContextActionMiddleware, KeyboardMiddleware, Middleware, NavigationMiddleware,
    PullRequestMiddleware, RepositorySyncMiddleware, SessionMiddleware, TextInputMiddleware,
};
use session_manager::{SessionManager, SharedClientManager};
use state::AppState;

fn main() -> Result<()> {
    let log_path = logger::init()?;
    log::info!("Starting focus-hub, logging to {}", log_path.display());

    let config = AppConfig::load();
    log::info!("Data directory: {}", config.data_dir.display());

    let clients: SharedClientManager =
        Arc::new(RwLock::new(ClientManager::new(&config.api_base_url)));
    let session_manager = SessionManager::new(
        Arc::clone(&clients),
        Box::new(EncryptedCredentialStore::new(config.secrets_path())),
        Box::new(FileWatchlistStore::new(config.watchlist_path())),
    );

    // Order matters: key translation first, then the layers that talk to GitHub
    let middleware: Vec<Box<dyn Middleware + Send>> = vec![
        Box::new(KeyboardMiddleware::new()),
        Box::new(NavigationMiddleware::new()),
        Box::new(TextInputMiddleware::new()),
        Box::new(ContextActionMiddleware::new()),
        Box::new(SessionMiddleware::new(session_manager)),
        Box::new(RepositorySyncMiddleware::new(Arc::clone(&clients))),
        Box::new(PullRequestMiddleware::new(clients)),
    ];

    let state: SharedState = Arc::new(RwLock::new(AppState::new(config)));
    let (action_tx, action_rx) = mpsc::channel();
    let (result_tx, result_rx) = mpsc::channel();
    let worker = spawn_background_worker(
        action_rx,
        action_tx.clone(),
        result_tx,
        Arc::clone(&state),
        middleware,
    );

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let _ = action_tx.send(Action::Bootstrap(BootstrapAction::Start));
    let result = run_app(&mut terminal, &state, &action_tx, &result_rx);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let _ = action_tx.send(Action::Global(GlobalAction::Quit));
    if worker.join().is_err() {
        log::error!("Background worker panicked");
    }

    if let Err(err) = &result {
        eprintln!("Error: {}", err);
    }
    log::info!("Exiting focus-hub");
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    shared: &SharedState,
    action_tx: &Sender<Action>,
    result_rx: &Receiver<Action>,
) -> Result<()> {
    let mut state = shared
        .read()
        .map_err(|e| anyhow::anyhow!("State lock poisoned: {}", e))?
        .clone();

    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            views::render(&state, area, frame);
        })?;

        // Apply everything the middleware let through
        let mut changed = false;
        while let Ok(action) = result_rx.try_recv() {
            state = reducers::reduce(state, &action);
            changed = true;
        }
        if changed {
            match shared.write() {
                Ok(mut guard) => *guard = state.clone(),
                Err(e) => log::error!("Failed to publish state: {}", e),
            }
        }

        if !state.running {
            break;
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press
                    && action_tx
                        .send(Action::Global(GlobalAction::KeyPressed(key)))
                        .is_err()
                {
                    log::error!("Background worker is gone, quitting");
                    break;
                }
            }
        }
    }

    Ok(())
}
