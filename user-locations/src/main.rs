//! user-locations - terminal client for the user location API
//!
//! 1. Terminal event -> `App::map_event` -> actions
//! 2. Actions dispatched to the store; the reducer returns effects
//! 3. Effects go to the epics, which run API calls as keyed tasks
//! 4. Task results come back as actions; re-render when state changed
//!
//! # Usage
//!
//! ```sh
//! user-locations --api-url http://localhost:8080/api/ --log-file /tmp/ul.log
//! user-locations --offline
//! ```

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use slice_dispatch::{
    spawn_event_poller, EffectRuntime, EffectStoreWithMiddleware, LoggingMiddleware,
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use user_locations::api::{HttpApi, InMemoryApi, UserLocationApi};
use user_locations::config::{init_logging, Config};
use user_locations::ui::App;
use user_locations::user_location::{fetch_user_locations, UserLocationEpics};
use user_locations::{handle_effect, reducer, Action, AppState};

const OFFLINE_LATENCY: Duration = Duration::from_millis(300);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    config.validate()?;

    if let Some(path) = &config.log_file {
        init_logging(path)?;
    }
    tracing::info!(api_url = %config.api_url, offline = config.offline, "Starting");

    // Build the client before taking over the terminal so errors stay readable
    if config.offline {
        let api = InMemoryApi::with_sample_data().with_latency(OFFLINE_LATENCY);
        run(api).await
    } else {
        let api = HttpApi::new(config.api_url.clone(), config.request_timeout())
            .context("building HTTP client")?;
        run(api).await
    }
}

async fn run<C: UserLocationApi>(api: C) -> anyhow::Result<()> {
    enable_raw_mode().context("enabling raw mode")?;
    let mut terminal = match enter_terminal() {
        Ok(terminal) => terminal,
        Err(e) => {
            let _ = restore_terminal();
            return Err(e);
        }
    };

    let result = run_app(&mut terminal, api).await;

    restore_terminal()?;
    terminal.show_cursor()?;

    result
}

fn enter_terminal() -> anyhow::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .context("entering alternate screen")?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    Ok(terminal)
}

/// Undo raw mode and the alternate screen
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)
}

async fn run_app<B, C>(terminal: &mut Terminal<B>, api: C) -> anyhow::Result<()>
where
    B: ratatui::backend::Backend,
    C: UserLocationApi,
{
    let store =
        EffectStoreWithMiddleware::new(AppState::default(), reducer, LoggingMiddleware::new());
    let mut runtime = EffectRuntime::from_store(store);
    let epics = UserLocationEpics::new(Arc::new(api));
    let mut ui = App::new();

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let cancel = CancellationToken::new();
    let poller = spawn_event_poller(
        event_tx,
        Duration::from_millis(10),
        Duration::from_millis(16),
        cancel.clone(),
    );

    runtime.enqueue(Action::from(fetch_user_locations()));

    let mut should_render = true;
    loop {
        if should_render {
            terminal.draw(|frame| {
                let area = frame.area();
                ui.render(frame, area, runtime.state());
            })?;
            should_render = false;
        }

        tokio::select! {
            Some(event) = event_rx.recv() => {
                for action in ui.map_event(&event, runtime.state()) {
                    runtime.enqueue(action);
                }
                // Component-local state (cursor, form draft) may have moved
                should_render = true;
            }
            Some(action) = runtime.next_action() => {
                if matches!(action, Action::Quit) {
                    break;
                }
                should_render |= runtime.dispatch(action, &mut |effect, ctx| {
                    handle_effect(&epics, effect, ctx)
                });
            }
            else => break,
        }
    }

    tracing::info!("Shutting down");
    cancel.cancel();
    runtime.shutdown();
    let _ = poller.await;
    Ok(())
}
