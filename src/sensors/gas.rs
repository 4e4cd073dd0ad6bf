//! MQ-2 combustible gas sensor on an ADC channel.
//!
//! The firmware reasons about gas on a 0–1023 scale (10-bit).  The
//! ESP32-S3 ADC delivers 12-bit samples, so raw values are rescaled.  The
//! reading is relative, not calibrated ppm.

use log::warn;

use super::AnalogSource;

pub const ADC_FULL_SCALE_12BIT: u16 = 4095;

pub struct GasSensor<S> {
    source: S,
    raw_full_scale: u16,
    full_scale: u16,
    last_level: u16,
}

impl<S: AnalogSource> GasSensor<S> {
    pub fn new(source: S, raw_full_scale: u16, full_scale: u16) -> Self {
        Self {
            source,
            raw_full_scale: raw_full_scale.max(1),
            full_scale,
            last_level: 0,
        }
    }

    /// Current level on the `0..=full_scale` scale.  A failed ADC read
    /// repeats the previous level.
    pub fn read_level(&mut self) -> u16 {
        match self.source.read_raw() {
            Ok(raw) => {
                self.last_level = self.scale(raw);
                self.last_level
            }
            Err(e) => {
                warn!("Gas ADC read failed ({}), holding {}", e, self.last_level);
                self.last_level
            }
        }
    }

    fn scale(&self, raw: u16) -> u16 {
        let raw = raw.min(self.raw_full_scale);
        let scaled = u32::from(raw) * u32::from(self.full_scale) / u32::from(self.raw_full_scale);
        // raw ≤ raw_full_scale, so scaled ≤ full_scale.
        scaled as u16
    }
}
