//! Alarm playback on countdown expiry.
//!
//! [`AlarmSynthesizer::play`] never fails from the caller's point of view:
//! `try_play` reports [`AudioUnavailableError`] and `play` logs and drops it.
//! The output handle is opened on first use and kept for the process
//! lifetime; a failed open is retried on the next call.

#[cfg(feature = "audio")]
mod rodio_output;
mod tone;

pub use tone::{Tone, SAMPLE_RATE};

use tracing::{debug, warn};

use crate::error::AudioUnavailableError;
use crate::storage::AlarmConfig;

/// A live audio output.
pub trait AudioOutput {
    /// Un-pause the output if it was suspended.
    fn resume(&mut self) -> Result<(), AudioUnavailableError> {
        Ok(())
    }

    /// Queue mono samples without blocking on playback.
    fn play(&mut self, sample_rate: u32, samples: Vec<f32>) -> Result<(), AudioUnavailableError>;
}

/// Opens the platform output on demand.
pub type OutputOpener =
    Box<dyn FnMut() -> Result<Box<dyn AudioOutput>, AudioUnavailableError>>;

pub struct AlarmSynthesizer {
    enabled: bool,
    samples: Vec<f32>,
    opener: OutputOpener,
    output: Option<Box<dyn AudioOutput>>,
}

impl AlarmSynthesizer {
    /// Alarm on the default output device.
    pub fn new(tone: Tone) -> Self {
        Self::with_opener(tone, Box::new(open_default_output))
    }

    pub fn from_config(config: &AlarmConfig) -> Self {
        let mut alarm = Self::new(Tone::from(config));
        alarm.enabled = config.enabled;
        alarm
    }

    pub fn with_opener(tone: Tone, opener: OutputOpener) -> Self {
        Self {
            enabled: true,
            samples: tone.render(SAMPLE_RATE),
            opener,
            output: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether an output handle has been acquired.
    pub fn has_output(&self) -> bool {
        self.output.is_some()
    }

    /// Play the tone once. Failures are logged, never returned.
    pub fn play(&mut self) {
        if let Err(e) = self.try_play() {
            warn!("alarm playback failed: {e}");
        }
    }

    pub fn try_play(&mut self) -> Result<(), AudioUnavailableError> {
        if !self.enabled {
            debug!("alarm disabled; skipping tone");
            return Ok(());
        }

        let output = match self.output.take() {
            Some(output) => output,
            None => (self.opener)()?,
        };
        let output = self.output.insert(output);
        output.resume()?;
        output.play(SAMPLE_RATE, self.samples.clone())
    }
}

#[cfg(feature = "audio")]
fn open_default_output() -> Result<Box<dyn AudioOutput>, AudioUnavailableError> {
    Ok(Box::new(rodio_output::RodioOutput::open()?))
}

#[cfg(not(feature = "audio"))]
fn open_default_output() -> Result<Box<dyn AudioOutput>, AudioUnavailableError> {
    Err(AudioUnavailableError::Unsupported)
}
