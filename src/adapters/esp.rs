//! ESP-IDF specific driver glue.
//!
//! Everything else in the crate is written against `embedded-hal`; the
//! only thing the HAL traits cannot express is changing a PWM frequency
//! at runtime, which the buzzer needs for its tones.

use esp_idf_hal::ledc::LedcDriver;
use esp_idf_svc::sys::{ledc_mode_t_LEDC_LOW_SPEED_MODE, ledc_set_freq, ledc_timer_t, ESP_OK};

use crate::drivers::ToneOutput;
use crate::error::ActuatorError;

/// Passive buzzer on a dedicated LEDC channel and timer.  The timer must
/// not be shared with any other channel, since every tone retunes it.
pub struct LedcTone<'d> {
    channel: LedcDriver<'d>,
    timer: ledc_timer_t,
}

impl<'d> LedcTone<'d> {
    pub fn new(channel: LedcDriver<'d>, timer: ledc_timer_t) -> Self {
        Self { channel, timer }
    }
}

impl ToneOutput for LedcTone<'_> {
    fn start_tone(&mut self, frequency_hz: u32) -> Result<(), ActuatorError> {
        // SAFETY: `timer` is configured by a live LedcTimerDriver owned by
        // main for the program's lifetime and used only by this channel.
        let rc = unsafe { ledc_set_freq(ledc_mode_t_LEDC_LOW_SPEED_MODE, self.timer, frequency_hz) };
        if rc != ESP_OK as i32 {
            return Err(ActuatorError::PwmWriteFailed);
        }
        // 50 % duty square wave.
        let half = self.channel.get_max_duty() / 2;
        self.channel
            .set_duty(half)
            .map_err(|_| ActuatorError::PwmWriteFailed)
    }

    fn stop_tone(&mut self) -> Result<(), ActuatorError> {
        self.channel
            .set_duty(0)
            .map_err(|_| ActuatorError::PwmWriteFailed)
    }
}
