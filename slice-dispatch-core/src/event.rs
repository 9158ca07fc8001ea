//! Terminal input
//!
//! A background task polls crossterm and forwards key presses and resizes
//! over a channel. Everything else (key releases, mouse, focus, paste) is
//! dropped before it reaches a component.

use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Upper bound on events forwarded per tick
const MAX_EVENTS_PER_TICK: usize = 20;

/// Input handed to components
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Key(KeyEvent),
    /// New terminal size as (columns, rows)
    Resize(u16, u16),
}

impl EventKind {
    /// The key event, if this is one
    pub fn as_key(&self) -> Option<&KeyEvent> {
        match self {
            EventKind::Key(key) => Some(key),
            EventKind::Resize(..) => None,
        }
    }
}

/// Keep the events components care about
pub fn translate_event(event: Event) -> Option<EventKind> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(EventKind::Key(key)),
        Event::Resize(columns, rows) => Some(EventKind::Resize(columns, rows)),
        _ => None,
    }
}

/// Poll the terminal until `cancel` fires or the receiver goes away.
///
/// Every `tick` the task forwards what crossterm has buffered, waiting at
/// most `poll_timeout` per event.
pub fn spawn_event_poller(
    tx: mpsc::UnboundedSender<EventKind>,
    poll_timeout: Duration,
    tick: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    // Leave nothing buffered for the shell
                    let mut drained = 0usize;
                    while event::poll(Duration::ZERO).unwrap_or(false) {
                        let _ = event::read();
                        drained += 1;
                    }
                    info!(drained, "Event poller stopped");
                    return;
                }
                _ = tokio::time::sleep(tick) => {
                    for _ in 0..MAX_EVENTS_PER_TICK {
                        if !event::poll(poll_timeout).unwrap_or(false) {
                            break;
                        }
                        let Some(kind) = event::read().ok().and_then(translate_event) else {
                            continue;
                        };
                        if tx.send(kind).is_err() {
                            debug!("Event channel closed, stopping poller");
                            return;
                        }
                    }
                }
            }
        }
    })
}
