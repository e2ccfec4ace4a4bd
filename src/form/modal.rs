//! Modal lifecycle
//!
//! A modal is hidden, fading in, shown, or fading out. Transitions are driven
//! by explicit `Instant`s so the event loop (or a test) decides when time
//! passes. A close always wins over a pending reveal: once `close` has been
//! called, no earlier timer can bring the modal back.

use std::time::{Duration, Instant};

use crate::config::ModalTimings;

/// Where a modal is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalPhase {
    #[default]
    Closed,
    /// Container visible, content still in its "entering" style
    Opening { reveal_at: Instant },
    Open,
    /// Content back in its "entering" style, container hidden at `hide_at`
    Closing { hide_at: Instant },
}

/// A modal's visibility state machine
#[derive(Debug, Clone)]
pub struct Modal {
    phase: ModalPhase,
    open_delay: Duration,
    close_delay: Duration,
}

impl Modal {
    pub fn new(timings: &ModalTimings) -> Self {
        Self {
            phase: ModalPhase::Closed,
            open_delay: timings.open_delay(),
            close_delay: timings.close_delay(),
        }
    }

    pub fn phase(&self) -> ModalPhase {
        self.phase
    }

    /// Show the container and arm the reveal timer
    ///
    /// Opening an already opening or open modal keeps its current state.
    pub fn open(&mut self, now: Instant) {
        match self.phase {
            ModalPhase::Closed | ModalPhase::Closing { .. } => {
                self.phase = ModalPhase::Opening {
                    reveal_at: now + self.open_delay,
                };
            }
            ModalPhase::Opening { .. } | ModalPhase::Open => {}
        }
    }

    /// Start fading out and arm the hide timer
    pub fn close(&mut self, now: Instant) {
        match self.phase {
            ModalPhase::Opening { .. } | ModalPhase::Open => {
                self.phase = ModalPhase::Closing {
                    hide_at: now + self.close_delay,
                };
            }
            ModalPhase::Closed | ModalPhase::Closing { .. } => {}
        }
    }

    /// Fire any timer that is due; returns true if the phase changed
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.phase {
            ModalPhase::Opening { reveal_at } if now >= reveal_at => {
                self.phase = ModalPhase::Open;
                true
            }
            ModalPhase::Closing { hide_at } if now >= hide_at => {
                self.phase = ModalPhase::Closed;
                true
            }
            _ => false,
        }
    }

    /// The container is hidden
    pub fn is_hidden(&self) -> bool {
        self.phase == ModalPhase::Closed
    }

    /// The content has its full "revealed" style
    pub fn is_revealed(&self) -> bool {
        self.phase == ModalPhase::Open
    }

    /// The modal accepts input (it is not hidden and not on its way out)
    pub fn is_interactive(&self) -> bool {
        matches!(self.phase, ModalPhase::Opening { .. } | ModalPhase::Open)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn modal() -> Modal {
        Modal::new(&ModalTimings::default())
    }

    #[test]
    fn test_starts_hidden() {
        let m = modal();
        assert!(m.is_hidden());
        assert!(!m.is_interactive());
    }

    #[test]
    fn test_open_reveals_after_delay() {
        let mut m = modal();
        let t0 = Instant::now();
        m.open(t0);
        assert!(!m.is_hidden());
        assert!(!m.is_revealed());

        assert!(!m.tick(t0 + Duration::from_millis(49)));
        assert!(!m.is_revealed());

        assert!(m.tick(t0 + Duration::from_millis(50)));
        assert!(m.is_revealed());
    }

    #[test]
    fn test_close_hides_after_delay() {
        let mut m = modal();
        let t0 = Instant::now();
        m.open(t0);
        m.tick(t0 + Duration::from_millis(60));

        let t1 = t0 + Duration::from_millis(100);
        m.close(t1);
        assert!(!m.is_revealed());
        assert!(!m.is_hidden());

        m.tick(t1 + Duration::from_millis(149));
        assert!(!m.is_hidden());
        m.tick(t1 + Duration::from_millis(150));
        assert!(m.is_hidden());
    }

    #[test]
    fn test_open_then_immediate_close_always_ends_hidden() {
        let t0 = Instant::now();
        for gap_ms in [0u64, 10, 49, 50, 51, 200] {
            let mut m = modal();
            m.open(t0);
            m.close(t0);
            // the reveal timer firing late must not bring the modal back
            m.tick(t0 + Duration::from_millis(gap_ms));
            m.tick(t0 + Duration::from_secs(1));
            assert!(m.is_hidden(), "gap {}ms left modal visible", gap_ms);
        }
    }

    #[test]
    fn test_reopen_while_closing() {
        let mut m = modal();
        let t0 = Instant::now();
        m.open(t0);
        m.tick(t0 + Duration::from_millis(50));
        m.close(t0 + Duration::from_millis(60));
        m.open(t0 + Duration::from_millis(70));

        // the stale hide timer is gone
        m.tick(t0 + Duration::from_millis(300));
        assert!(m.is_revealed());
    }

    #[test]
    fn test_double_open_keeps_first_timer() {
        let mut m = modal();
        let t0 = Instant::now();
        m.open(t0);
        m.open(t0 + Duration::from_millis(40));
        m.tick(t0 + Duration::from_millis(50));
        assert!(m.is_revealed());
    }
}
