use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::TimerState;

/// Every countdown state change produces an Event.
/// The rendering surface reacts to them; `TimerExpired` is the expiry signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        duration_secs: u64,
        /// True when the engine continued an existing remainder.
        resumed: bool,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerTicked {
        remaining_secs: u64,
        display: String,
        at: DateTime<Utc>,
    },
    /// Fired once per completed countdown.
    TimerExpired {
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: TimerState,
        remaining_secs: u64,
        display: String,
        input_editable: bool,
        at: DateTime<Utc>,
    },
}

impl Event {
    pub fn is_expiry(&self) -> bool {
        matches!(self, Event::TimerExpired { .. })
    }
}
