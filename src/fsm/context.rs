//! Per-cycle sensor data handed to the state machine.
//!
//! A [`SensorSnapshot`] is built fresh by
//! [`SensorAcquisition`](crate::sensors::SensorAcquisition) every poll and
//! dropped at the end of the cycle.  Nothing here is persisted.

use crate::error::SensorError;

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// Outcome of one sensor read: the value, or why there isn't one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading<T> {
    Ok(T),
    Failed(SensorError),
}

impl<T> Reading<T> {
    pub fn from_result(result: Result<T, SensorError>) -> Self {
        match result {
            Ok(v) => Self::Ok(v),
            Err(e) => Self::Failed(e),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Ok(v) => Some(v),
            Self::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<SensorError> {
        match self {
            Self::Ok(_) => None,
            Self::Failed(e) => Some(*e),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Reading<U> {
        match self {
            Self::Ok(v) => Reading::Ok(f(v)),
            Self::Failed(e) => Reading::Failed(e),
        }
    }

    /// Replace a successful value with a failure when `keep` rejects it.
    pub fn filter(self, keep: impl FnOnce(&T) -> bool, reject_as: SensorError) -> Self {
        match self {
            Self::Ok(v) if !keep(&v) => Self::Failed(reject_as),
            other => other,
        }
    }

    pub fn unwrap_or(self, fallback: T) -> T {
        match self {
            Self::Ok(v) => v,
            Self::Failed(_) => fallback,
        }
    }
}

// ---------------------------------------------------------------------------
// Orientation
// ---------------------------------------------------------------------------

/// Attitude estimate in degrees.  `yaw` is the instantaneous rotation rate
/// about Z (°/s), not an integrated heading.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Orientation {
    pub pitch: f32,
    pub roll: f32,
    pub yaw: f32,
}

impl Orientation {
    pub fn is_finite(&self) -> bool {
        self.pitch.is_finite() && self.roll.is_finite() && self.yaw.is_finite()
    }
}

// ---------------------------------------------------------------------------
// Sensor snapshot
// ---------------------------------------------------------------------------

/// One poll's worth of normalised readings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorSnapshot {
    pub temperature_c: Reading<f32>,
    pub humidity_pct: Reading<f32>,
    /// 0–1023, clamped.
    pub gas_level: u16,
    /// Centimetres, within the configured ranging window.
    pub distance_cm: Reading<u16>,
    pub orientation: Reading<Orientation>,
}

impl SensorSnapshot {
    /// Climate data usable.  Distance, gas and orientation never count.
    pub fn is_valid(&self) -> bool {
        self.temperature_c.is_ok() && self.humidity_pct.is_ok()
    }
}
