//! Actuator drivers and the narrow traits the hardware adapter drives them
//! through.
//!
//! Each driver is generic over `embedded-hal` 1.0 traits so the same code
//! runs against `esp-idf-hal` on target and against fakes on the host.
//! The traits below are the seam between a concrete driver and
//! [`ActuatorBank`](crate::adapters::hardware::ActuatorBank).

pub mod buzzer;
pub mod lcd;
pub mod motor;
pub mod power_switch;
pub mod status_led;

use crate::display::DisplayPage;
use crate::error::ActuatorError;
use status_led::Rgb;

/// Propulsion motor: binary full-speed or stopped.
pub trait MotorOutput {
    fn run_full(&mut self) -> Result<(), ActuatorError>;
    fn stop(&mut self) -> Result<(), ActuatorError>;
}

/// Three-channel indicator LED.
pub trait RgbOutput {
    fn set_rgb(&mut self, rgb: Rgb) -> Result<(), ActuatorError>;
}

/// Square-wave source feeding a passive piezo buzzer.
pub trait ToneOutput {
    /// Start a continuous tone at `frequency_hz`.
    fn start_tone(&mut self, frequency_hz: u32) -> Result<(), ActuatorError>;
    /// Silence the buzzer.
    fn stop_tone(&mut self) -> Result<(), ActuatorError>;
}

/// Two-line character display.
pub trait TextDisplay {
    /// Clear and write both lines; turns the backlight on.
    fn show(&mut self, page: &DisplayPage) -> Result<(), ActuatorError>;
    fn set_backlight(&mut self, on: bool) -> Result<(), ActuatorError>;
}
