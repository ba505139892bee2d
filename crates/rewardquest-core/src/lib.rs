//! # Reward Quest Core Library
//!
//! Business logic for Reward Quest: fetch a random activity suggestion, then
//! hold it back as a reward until a focus countdown runs out.
//!
//! ## Architecture
//!
//! - **Timer**: a whole-second countdown state machine advanced by explicit
//!   `tick()` calls, plus a tokio-interval tick source and the time parser
//! - **Activity**: HTTP client for the suggestion service and the selector
//!   that picks and escapes one reward
//! - **Alarm**: synthesized expiry tone with a lazily opened audio output
//! - **UI**: visible-state slots and the [`FocusSession`] that owns everything
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`CountdownEngine`]: countdown state machine
//! - [`ActivityClient`]: activity service client
//! - [`AlarmSynthesizer`]: best-effort alarm playback
//! - [`FocusSession`]: single owner of the session state
//! - [`Config`]: application configuration management

pub mod activity;
pub mod alarm;
pub mod error;
pub mod events;
pub mod storage;
pub mod timer;
pub mod ui;

pub use activity::{ActivityClient, ActivityPayload, Category, SelectedReward};
pub use alarm::{AlarmSynthesizer, Tone};
pub use error::{
    ActivityError, AudioUnavailableError, ConfigError, EmptyResultError, FetchError, ParseError,
};
pub use events::Event;
pub use storage::Config;
pub use timer::{format_mmss, parse_time_input, CountdownEngine, TickSource, TimerState};
pub use ui::{FocusSession, UiState};
