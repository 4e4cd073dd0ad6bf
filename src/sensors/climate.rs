//! DHT11 temperature / humidity sensor (single-wire).
//!
//! ## Protocol
//!
//! ```text
//!  host   ▔▔▔╲______18 ms______╱▔▔ release
//!  sensor                           ╲__80 µs__╱▔▔80 µs▔▔╲ bit0 bit1 … bit39
//!  bit          ╲__50 µs__╱▔▔ 26–28 µs ▔▔  = 0
//!               ╲__50 µs__╱▔▔▔▔▔ 70 µs ▔▔▔▔  = 1
//! ```
//!
//! 40 bits = humidity int, humidity frac, temperature int, temperature frac,
//! checksum (low byte of the sum of the first four).
//!
//! The pin must be open-drain with a pull-up: the driver both drives it
//! low and reads it back.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use super::ClimateSource;
use crate::error::SensorError;

const START_LOW_MS: u32 = 18;
/// Generous upper bound on any single level in the reply.
const LEVEL_TIMEOUT_US: u32 = 100;
/// High pulses longer than this are a `1` bit.
const ONE_THRESHOLD_US: u32 = 40;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Climate {
    pub temperature_c: f32,
    pub humidity_pct: f32,
}

/// Validate and decode a 5-byte DHT11 frame.
pub fn decode_frame(frame: [u8; 5]) -> Result<Climate, SensorError> {
    let sum = frame[..4].iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    if sum != frame[4] {
        return Err(SensorError::ChecksumMismatch);
    }

    let humidity_pct = f32::from(frame[0]) + f32::from(frame[1]) / 10.0;
    let magnitude = f32::from(frame[2] & 0x7F) + f32::from(frame[3]) / 10.0;
    let temperature_c = if frame[2] & 0x80 != 0 {
        -magnitude
    } else {
        magnitude
    };

    Ok(Climate {
        temperature_c,
        humidity_pct,
    })
}

pub struct Dht11<P, D> {
    pin: P,
    delay: D,
}

impl<P, D> Dht11<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    pub fn new(pin: P, delay: D) -> Self {
        Self { pin, delay }
    }

    /// Run one full start/reply exchange.
    pub fn read(&mut self) -> Result<Climate, SensorError> {
        self.pin.set_low().map_err(|_| SensorError::BusError)?;
        self.delay.delay_ms(START_LOW_MS);
        self.pin.set_high().map_err(|_| SensorError::BusError)?;

        // Pull-up, then the sensor's 80 µs low / 80 µs high preamble.
        self.hold_time(true)?;
        self.hold_time(false)?;
        self.hold_time(true)?;

        let mut frame = [0u8; 5];
        for bit in 0..40 {
            self.hold_time(false)?;
            let high_us = self.hold_time(true)?;
            if high_us > ONE_THRESHOLD_US {
                frame[bit / 8] |= 0x80 >> (bit % 8);
            }
        }

        decode_frame(frame)
    }

    /// Microseconds the line stays at `high`, bounded by [`LEVEL_TIMEOUT_US`].
    fn hold_time(&mut self, high: bool) -> Result<u32, SensorError> {
        let mut elapsed = 0;
        while self.pin.is_high().map_err(|_| SensorError::BusError)? == high {
            if elapsed >= LEVEL_TIMEOUT_US {
                return Err(SensorError::Timeout);
            }
            self.delay.delay_us(1);
            elapsed += 1;
        }
        Ok(elapsed)
    }
}

impl<P, D> ClimateSource for Dht11<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    fn read_climate(&mut self) -> Result<Climate, SensorError> {
        self.read()
    }
}
