//! Piezo buzzer pattern player.
//!
//! A pattern is a fixed number of tone bursts separated by silent gaps.
//! Playback blocks for the full duration of the pattern and cannot be
//! interrupted once started.

use embedded_hal::delay::DelayNs;
use serde::{Deserialize, Serialize};

use super::ToneOutput;
use crate::error::ActuatorError;

/// Named audio patterns.  Timing lives in [`ToneConfig`](crate::config::ToneConfig).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TonePattern {
    /// Single short beep: ready, button press, mode change.
    ShortAck,
    /// Quick bursts: obstacle or tilt warning.
    HazardBurst,
    /// Long beeps: environmental hazard (gas).
    HazardSustained,
}

/// Timing of one pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToneSpec {
    pub frequency_hz: u32,
    /// Tone-on time per burst.
    pub on_ms: u32,
    /// Silence after each burst.
    pub gap_ms: u32,
    pub repeats: u8,
}

impl ToneSpec {
    pub const fn new(frequency_hz: u32, on_ms: u32, gap_ms: u32, repeats: u8) -> Self {
        Self {
            frequency_hz,
            on_ms,
            gap_ms,
            repeats,
        }
    }

    /// Wall-clock time the pattern occupies the control thread.
    pub const fn total_ms(&self) -> u32 {
        (self.on_ms + self.gap_ms) * self.repeats as u32
    }
}

pub struct Buzzer<T, D> {
    output: T,
    delay: D,
    patterns_played: u32,
}

impl<T, D> Buzzer<T, D>
where
    T: ToneOutput,
    D: DelayNs,
{
    pub fn new(output: T, delay: D) -> Self {
        Self {
            output,
            delay,
            patterns_played: 0,
        }
    }

    /// Play `spec` to completion.
    ///
    /// Any failed write gets one more silencing attempt before the error is
    /// returned, so a tone is never left stuck on.
    pub fn play(&mut self, spec: &ToneSpec) -> Result<(), ActuatorError> {
        for _ in 0..spec.repeats {
            self.output
                .start_tone(spec.frequency_hz)
                .map_err(|e| self.abort(e))?;
            self.delay.delay_ms(spec.on_ms);
            self.output.stop_tone().map_err(|e| self.abort(e))?;
            self.delay.delay_ms(spec.gap_ms);
        }
        self.patterns_played = self.patterns_played.wrapping_add(1);
        Ok(())
    }

    pub fn patterns_played(&self) -> u32 {
        self.patterns_played
    }

    fn abort(&mut self, e: ActuatorError) -> ActuatorError {
        let _ = self.output.stop_tone();
        e
    }
}
