//! Event handling for the TUI
//!
//! Terminal input is read on its own thread. Background allocation fetches
//! report back through the same channel, so the event loop is the only
//! place form state changes.

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crate::api::LoadOutcome;

/// Tick period; short enough for the modal reveal delay to be visible
pub const TICK_RATE: Duration = Duration::from_millis(50);

/// Events consumed by the main loop
#[derive(Debug, Clone)]
pub enum Event {
    /// Key press event
    Key(KeyEvent),
    /// Terminal resize
    Resize(u16, u16),
    /// Tick event for timers
    Tick,
    /// A secondary allocation fetch finished
    Repartitions(LoadOutcome),
}

/// Event handler for terminal events
pub struct EventHandler {
    sender: mpsc::Sender<Event>,
    receiver: mpsc::Receiver<Event>,
    #[allow(dead_code)]
    handler: thread::JoinHandle<()>,
}

impl EventHandler {
    /// Create a new event handler with the specified tick rate
    pub fn new(tick_rate: Duration) -> Self {
        let (sender, receiver) = mpsc::channel();
        let handler = {
            let sender = sender.clone();
            thread::spawn(move || {
                let mut last_tick = Instant::now();
                loop {
                    let timeout = tick_rate
                        .checked_sub(last_tick.elapsed())
                        .unwrap_or(Duration::ZERO);

                    let ready = match event::poll(timeout) {
                        Ok(ready) => ready,
                        Err(e) => {
                            tracing::error!(error = %e, "terminal poll failed");
                            return;
                        }
                    };

                    if ready {
                        match event::read() {
                            Ok(CrosstermEvent::Key(key)) => {
                                if sender.send(Event::Key(key)).is_err() {
                                    return;
                                }
                            }
                            Ok(CrosstermEvent::Resize(width, height)) => {
                                if sender.send(Event::Resize(width, height)).is_err() {
                                    return;
                                }
                            }
                            Ok(_) => {}
                            Err(e) => {
                                tracing::error!(error = %e, "terminal read failed");
                                return;
                            }
                        }
                    }

                    if last_tick.elapsed() >= tick_rate {
                        if sender.send(Event::Tick).is_err() {
                            return;
                        }
                        last_tick = Instant::now();
                    }
                }
            })
        };

        Self {
            sender,
            receiver,
            handler,
        }
    }

    /// A sender for work finishing off the event loop
    pub fn sender(&self) -> mpsc::Sender<Event> {
        self.sender.clone()
    }

    /// Get the next event (blocking)
    pub fn next(&self) -> Result<Event, mpsc::RecvError> {
        self.receiver.recv()
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new(TICK_RATE)
    }
}
