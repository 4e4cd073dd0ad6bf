//! RGB status indicator driver.
//!
//! Three PWM channels drive a common-cathode RGB LED.  Colours are named
//! by [`IndicatorColor`]; the actual RGB values come from the configured
//! [`IndicatorPalette`](crate::config::IndicatorPalette).

use embedded_hal::pwm::SetDutyCycle;
use serde::{Deserialize, Serialize};

use super::RgbOutput;
use crate::error::ActuatorError;

/// Colour as (R, G, B) tuple, each 0–255.
pub type Rgb = (u8, u8, u8);

/// Named indicator colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndicatorColor {
    Off,
    Green,
    Blue,
    Red,
    Yellow,
    Purple,
    Orange,
    Cyan,
    DeepBlue,
}

pub struct StatusLed<R, G, B> {
    red: R,
    green: G,
    blue: B,
    current: Rgb,
}

impl<R, G, B> StatusLed<R, G, B>
where
    R: SetDutyCycle,
    G: SetDutyCycle,
    B: SetDutyCycle,
{
    pub fn new(red: R, green: G, blue: B) -> Self {
        Self {
            red,
            green,
            blue,
            current: (0, 0, 0),
        }
    }

    pub fn set_colour(&mut self, rgb: Rgb) -> Result<(), ActuatorError> {
        let (r, g, b) = rgb;
        self.red
            .set_duty_cycle_fraction(u16::from(r), 255)
            .map_err(|_| ActuatorError::PwmWriteFailed)?;
        self.green
            .set_duty_cycle_fraction(u16::from(g), 255)
            .map_err(|_| ActuatorError::PwmWriteFailed)?;
        self.blue
            .set_duty_cycle_fraction(u16::from(b), 255)
            .map_err(|_| ActuatorError::PwmWriteFailed)?;
        self.current = rgb;
        Ok(())
    }

    pub fn off(&mut self) -> Result<(), ActuatorError> {
        self.set_colour((0, 0, 0))
    }

    pub fn current_colour(&self) -> Rgb {
        self.current
    }
}

impl<R, G, B> RgbOutput for StatusLed<R, G, B>
where
    R: SetDutyCycle,
    G: SetDutyCycle,
    B: SetDutyCycle,
{
    fn set_rgb(&mut self, rgb: Rgb) -> Result<(), ActuatorError> {
        self.set_colour(rgb)
    }
}
