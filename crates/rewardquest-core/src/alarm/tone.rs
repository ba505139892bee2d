//! Alarm tone rendering.
//!
//! The envelope follows two exponential ramps: up from `floor` to `peak`
//! over the attack, then down to `floor` at `decay_end`, held until `stop`.

use std::f32::consts::TAU;
use std::time::Duration;

use crate::storage::AlarmConfig;

pub const SAMPLE_RATE: u32 = 44_100;

/// Parameters for the alarm beep.
#[derive(Debug, Clone, PartialEq)]
pub struct Tone {
    pub frequency_hz: f32,
    pub peak: f32,
    pub floor: f32,
    pub attack: Duration,
    pub decay_end: Duration,
    pub stop: Duration,
}

impl Default for Tone {
    fn default() -> Self {
        Self {
            frequency_hz: 880.0,
            peak: 0.2,
            floor: 0.001,
            attack: Duration::from_millis(20),
            decay_end: Duration::from_millis(1000),
            stop: Duration::from_millis(1050),
        }
    }
}

impl From<&AlarmConfig> for Tone {
    fn from(config: &AlarmConfig) -> Self {
        Self {
            frequency_hz: config.frequency_hz,
            peak: config.peak_gain.clamp(0.001, 1.0),
            ..Self::default()
        }
    }
}

impl Tone {
    /// Gain at `t` seconds from the start of the tone.
    pub fn gain_at(&self, t: f32) -> f32 {
        let attack = self.attack.as_secs_f32();
        let decay_end = self.decay_end.as_secs_f32();
        if t <= 0.0 {
            self.floor
        } else if t < attack {
            exp_ramp(self.floor, self.peak, t / attack)
        } else if t < decay_end {
            exp_ramp(self.peak, self.floor, (t - attack) / (decay_end - attack))
        } else {
            self.floor
        }
    }

    /// Mono f32 samples covering the whole tone.
    pub fn render(&self, sample_rate: u32) -> Vec<f32> {
        let len = (self.stop.as_secs_f64() * f64::from(sample_rate)).round() as usize;
        let rate = sample_rate as f32;
        (0..len)
            .map(|n| {
                let t = n as f32 / rate;
                (TAU * self.frequency_hz * t).sin() * self.gain_at(t)
            })
            .collect()
    }
}

fn exp_ramp(from: f32, to: f32, progress: f32) -> f32 {
    from * (to / from).powf(progress.clamp(0.0, 1.0))
}
