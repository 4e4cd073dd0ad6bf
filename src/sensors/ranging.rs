//! HC-SR04 ultrasonic ranger.
//!
//! A 10 µs trigger pulse starts a burst; the echo pin then stays high for
//! the round-trip time of flight.  Sound covers 0.034 cm/µs, so
//! `cm = echo_us × 0.034 / 2`.
//!
//! One deadline, measured from the end of the trigger pulse, bounds the
//! wait for the echo to rise and the echo itself (30 ms ≈ 5 m).  Both edges
//! are timestamped on a monotonic clock, so loop overhead does not shorten
//! the measured pulse.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use super::{MicrosClock, RangeSource};
use crate::error::SensorError;

const SOUND_CM_PER_US: f32 = 0.034;

/// Round-trip echo time to one-way distance.
pub fn echo_to_cm(echo_us: u32) -> u16 {
    let cm = echo_us as f32 * SOUND_CM_PER_US / 2.0;
    cm.min(f32::from(u16::MAX)) as u16
}

pub struct UltrasonicRanger<TRIG, ECHO, D, C> {
    trig: TRIG,
    echo: ECHO,
    delay: D,
    clock: C,
    timeout_us: u32,
}

impl<TRIG, ECHO, D, C> UltrasonicRanger<TRIG, ECHO, D, C>
where
    TRIG: OutputPin,
    ECHO: InputPin,
    D: DelayNs,
    C: MicrosClock,
{
    pub fn new(trig: TRIG, echo: ECHO, delay: D, clock: C, timeout_us: u32) -> Self {
        Self {
            trig,
            echo,
            delay,
            clock,
            timeout_us,
        }
    }

    /// Fire one ping and return the echo pulse width in microseconds.
    pub fn ping_us(&mut self) -> Result<u32, SensorError> {
        self.trig.set_low().map_err(|_| SensorError::BusError)?;
        self.delay.delay_us(2);
        self.trig.set_high().map_err(|_| SensorError::BusError)?;
        self.delay.delay_us(10);
        self.trig.set_low().map_err(|_| SensorError::BusError)?;

        let start = self.clock.now_us();
        let rise = self.wait_for(true, start)?;
        let fall = self.wait_for(false, start)?;
        Ok(fall.saturating_sub(rise) as u32)
    }

    /// Timestamp of the first sample at level `high`.  `Timeout` once
    /// `timeout_us` has passed since `start`.
    fn wait_for(&mut self, high: bool, start: u64) -> Result<u64, SensorError> {
        let timeout = u64::from(self.timeout_us);
        loop {
            let now = self.clock.now_us();
            if now.saturating_sub(start) >= timeout {
                return Err(SensorError::Timeout);
            }
            if self.echo.is_high().map_err(|_| SensorError::BusError)? == high {
                return Ok(now);
            }
        }
    }
}

impl<TRIG, ECHO, D, C> RangeSource for UltrasonicRanger<TRIG, ECHO, D, C>
where
    TRIG: OutputPin,
    ECHO: InputPin,
    D: DelayNs,
    C: MicrosClock,
{
    fn measure_cm(&mut self) -> Result<u16, SensorError> {
        self.ping_us().map(echo_to_cm)
    }
}
