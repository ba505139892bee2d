//! Core error types for rewardquest-core.
//!
//! Each component reports failures through its own thiserror enum. The
//! boundary that detects a failure turns it into a safe default or a
//! user message.

use std::path::PathBuf;
use thiserror::Error;

/// Message shown whenever the activity service cannot be reached.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch an activity. Please try again.";

/// Free-text time input that is neither `MM:SS` nor bare minutes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unrecognised time '{input}': expected MM:SS or whole minutes")]
pub struct ParseError {
    pub input: String,
}

/// Network failure or non-success response from the activity service.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The configured base URL or proxy prefix does not form a valid URL
    #[error("Invalid activity URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Connection, TLS or body-decoding failure
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-2xx status
    #[error("HTTP {status}")]
    Status { status: u16 },
}

/// Well-formed response that contains nothing to select.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyResultError {
    /// An empty array: the category exists but has no entries
    #[error("No activities found for this category.")]
    NoActivitiesInCategory,

    /// Null or a value that is neither an array nor an object
    #[error("No activity returned.")]
    NoActivityReturned,
}

/// Either half of a failed reward fetch.
#[derive(Error, Debug)]
pub enum ActivityError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Empty(#[from] EmptyResultError),
}

impl ActivityError {
    /// Text for the rendering surface. Fetch failures share one generic
    /// message; empty results keep their distinct wording.
    pub fn user_message(&self) -> String {
        match self {
            ActivityError::Fetch(_) => FETCH_FAILED_MESSAGE.to_string(),
            ActivityError::Empty(e) => e.to_string(),
        }
    }
}

/// Alarm playback failure. Never shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AudioUnavailableError {
    /// No output device could be opened
    #[error("No audio output available: {0}")]
    NoOutput(String),

    /// Built without the `audio` feature
    #[error("Audio support was not compiled in")]
    Unsupported,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Could not determine or create the data directory
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}
