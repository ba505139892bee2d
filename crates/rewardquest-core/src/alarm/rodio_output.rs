use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, OutputStreamHandle, Sink};

use super::AudioOutput;
use crate::error::AudioUnavailableError;

/// Default output device with one long-lived sink.
pub(super) struct RodioOutput {
    // Dropping the stream silences the device.
    _stream: OutputStream,
    _handle: OutputStreamHandle,
    sink: Sink,
}

impl RodioOutput {
    pub(super) fn open() -> Result<Self, AudioUnavailableError> {
        let (stream, handle) = OutputStream::try_default()
            .map_err(|e| AudioUnavailableError::NoOutput(e.to_string()))?;
        let sink =
            Sink::try_new(&handle).map_err(|e| AudioUnavailableError::NoOutput(e.to_string()))?;
        Ok(Self {
            _stream: stream,
            _handle: handle,
            sink,
        })
    }
}

impl AudioOutput for RodioOutput {
    fn resume(&mut self) -> Result<(), AudioUnavailableError> {
        if self.sink.is_paused() {
            self.sink.play();
        }
        Ok(())
    }

    fn play(&mut self, sample_rate: u32, samples: Vec<f32>) -> Result<(), AudioUnavailableError> {
        self.sink.append(SamplesBuffer::new(1, sample_rate, samples));
        Ok(())
    }
}
