//! Countdown engine implementation.
//!
//! The engine is a whole-second state machine. It owns no clock: the caller
//! invokes `tick()` once per elapsed second while the engine is running,
//! either from a [`TickSource`](super::TickSource) or directly in tests.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> Paused -> Running -> Expired -> Idle
//! ```
//!
//! `Expired` is transient: the tick that reaches zero passes through it and
//! settles in `Idle` with nothing remaining.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = CountdownEngine::new(0);
//! engine.start(90);
//! // Once per second:
//! if let Some(Event::TimerExpired { .. }) = engine.tick() { /* reward */ }
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::parse::{format_mmss, parse_time_input};
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
    /// Countdown reached zero; immediately followed by `Idle`.
    Expired,
}

/// Core countdown engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountdownEngine {
    state: TimerState,
    remaining_secs: u64,
    /// Length of the current run, reported when it expires.
    duration_secs: u64,
}

impl CountdownEngine {
    /// Create an idle engine with a pre-set remainder.
    pub fn new(remaining_secs: u64) -> Self {
        Self {
            state: TimerState::Idle,
            remaining_secs,
            duration_secs: remaining_secs,
        }
    }

    /// Create an idle engine from the initial display text.
    ///
    /// Unparseable text leaves the engine at zero.
    pub fn from_display(text: &str) -> Self {
        Self::new(parse_time_input(text).unwrap_or(0))
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    /// Whether the duration display accepts edits.
    pub fn input_editable(&self) -> bool {
        !self.is_running()
    }

    /// `MM:SS` form of the remaining time.
    pub fn display(&self) -> String {
        format_mmss(self.remaining_secs)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.state,
            remaining_secs: self.remaining_secs,
            display: self.display(),
            input_editable: self.input_editable(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start a countdown of `requested_secs`, or resume the remainder when
    /// `requested_secs` is zero and time is left over.
    pub fn start(&mut self, requested_secs: u64) -> Option<Event> {
        if self.state == TimerState::Running {
            return None;
        }

        let resumed = requested_secs == 0;
        if resumed {
            if self.remaining_secs == 0 {
                return None;
            }
        } else {
            self.remaining_secs = requested_secs;
            self.duration_secs = requested_secs;
        }

        self.transition(TimerState::Running);
        Some(Event::TimerStarted {
            duration_secs: self.remaining_secs,
            resumed,
            at: Utc::now(),
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        self.transition(TimerState::Paused);
        Some(Event::TimerPaused {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Advance one second. Returns `TimerExpired` on the tick that reaches
    /// zero, `TimerTicked` otherwise, and `None` when not running.
    pub fn tick(&mut self) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return Some(Event::TimerTicked {
                remaining_secs: self.remaining_secs,
                display: self.display(),
                at: Utc::now(),
            });
        }

        self.transition(TimerState::Expired);
        let duration_secs = self.duration_secs;
        self.duration_secs = 0;
        self.transition(TimerState::Idle);
        Some(Event::TimerExpired {
            duration_secs,
            at: Utc::now(),
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn transition(&mut self, next: TimerState) {
        debug!(from = ?self.state, to = ?next, remaining = self.remaining_secs, "countdown transition");
        self.state = next;
    }
}

impl Default for CountdownEngine {
    fn default() -> Self {
        Self::new(0)
    }
}
