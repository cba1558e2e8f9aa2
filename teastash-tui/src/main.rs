//! teastash - tea inventory manager
//!
//! Terminal UI for a personal tea collection backed by a managed GraphQL
//! store. Local state updates immediately on every action; the remote
//! store catches up asynchronously.

mod app;
mod ui;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use teastash_core::{Config, GraphQlStore, SyncController};

use crate::app::App;

#[derive(Parser, Debug)]
#[command(name = "teastash", about = "Tea inventory manager", version)]
struct Args {
    /// Path to the config file (defaults to ~/.config/teastash/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the GraphQL endpoint from the config file
    #[arg(long)]
    endpoint: Option<String>,

    /// Override the API key from the config file
    #[arg(long)]
    api_key: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration, applying CLI overrides
    let mut config = match &args.config {
        Some(path) => Config::load_from(path).context("failed to load configuration")?,
        None => Config::load().context("failed to load configuration")?,
    };
    if args.endpoint.is_some() {
        config.remote.endpoint = args.endpoint;
    }
    if args.api_key.is_some() {
        config.remote.api_key = args.api_key;
    }

    // Initialize logging (to file, not stdout since we have a TUI)
    let _log_guard =
        teastash_core::logging::init(&config.logging).context("failed to initialize logging")?;

    tracing::info!("teastash TUI starting up");

    let store = GraphQlStore::new(&config.remote).context("failed to create remote store")?;
    let mut app = App::new(SyncController::new(store));

    // Setup terminal
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    // Single-threaded event loop: every sync operation runs as a local
    // task, so the UI keeps rendering while remote calls are in flight.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build runtime")?;
    let local = tokio::task::LocalSet::new();
    let result = local.block_on(&runtime, run_app(&mut terminal, &mut app));

    // Restore terminal
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor().context("failed to show cursor")?;

    tracing::info!("teastash TUI shutting down");

    result
}

/// Run the main application loop.
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<GraphQlStore>,
) -> Result<()> {
    // Initial fetch of the remote collection
    app.dispatch_refresh();

    let mut events = EventStream::new();
    let mut tick = tokio::time::interval(Duration::from_millis(100));

    loop {
        // Spawned operations may have shrunk the list since last frame
        app.clamp_selection();

        terminal.draw(|frame| ui::render(frame, app))?;

        tokio::select! {
            maybe_event = events.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        app.handle_key(key);
                    }
                    Some(Ok(_)) => {}
                    Some(Err(err)) => return Err(err).context("terminal event error"),
                    None => break,
                }
            }
            // Periodic redraw so in-flight operations become visible
            _ = tick.tick() => {}
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
