//! Sensor subsystem — individual drivers, the aggregating [`SensorHub`],
//! and the normalisation rules in [`SensorAcquisition`].
//!
//! ```text
//!  Dht11 ─────────┐
//!  GasSensor ─────┤
//!  Ultrasonic ────┼──▶ SensorHub ══SensorPort══▶ SensorAcquisition ──▶ SensorSnapshot
//!  Mpu6050 ───────┘
//! ```
//!
//! The hub only forwards raw driver results.  Acquisition decides what
//! counts as a usable reading and never lets a failure escape the
//! snapshot.

pub mod climate;
pub mod gas;
pub mod orientation;
pub mod ranging;

use log::warn;

use crate::app::ports::SensorPort;
use crate::config::SystemConfig;
use crate::error::SensorError;
use crate::fsm::context::{Orientation, Reading, SensorSnapshot};
use climate::Climate;

// ───────────────────────────────────────────────────────────────
// Driver-facing source traits
// ───────────────────────────────────────────────────────────────

/// Combined temperature/humidity sensor.  One read yields both values.
pub trait ClimateSource {
    fn read_climate(&mut self) -> Result<Climate, SensorError>;
}

/// One raw ADC sample.
pub trait AnalogSource {
    fn read_raw(&mut self) -> Result<u16, SensorError>;
}

impl<F> AnalogSource for F
where
    F: FnMut() -> Result<u16, SensorError>,
{
    fn read_raw(&mut self) -> Result<u16, SensorError> {
        self()
    }
}

/// Distance to the nearest obstacle, in centimetres.
pub trait RangeSource {
    fn measure_cm(&mut self) -> Result<u16, SensorError>;
}

/// Attitude estimate.
pub trait MotionSource {
    fn read_motion(&mut self) -> Result<Orientation, SensorError>;
}

/// Monotonic microsecond time source for pulse-width measurement.
pub trait MicrosClock {
    fn now_us(&self) -> u64;
}

// ───────────────────────────────────────────────────────────────
// SensorHub
// ───────────────────────────────────────────────────────────────

/// Owns every sensor driver.  Implements
/// [`SensorPort`](crate::app::ports::SensorPort) in
/// [`adapters::hardware`](crate::adapters::hardware).
pub struct SensorHub<C, G, R, M> {
    pub climate: C,
    pub gas: gas::GasSensor<G>,
    pub ranger: R,
    pub motion: M,
    /// Result of the last climate read, held between the temperature and
    /// humidity calls so the DHT is sampled once per poll.
    pub(crate) climate_cache: Option<Result<Climate, SensorError>>,
}

impl<C, G, R, M> SensorHub<C, G, R, M>
where
    C: ClimateSource,
    G: AnalogSource,
    R: RangeSource,
    M: MotionSource,
{
    /// Construct a new hub.  Pass in pre-built drivers (built in main
    /// where peripheral ownership is established).
    pub fn new(climate: C, gas: gas::GasSensor<G>, ranger: R, motion: M) -> Self {
        Self {
            climate,
            gas,
            ranger,
            motion,
            climate_cache: None,
        }
    }

    /// Fresh climate sample, cached for the paired read.
    pub(crate) fn sample_climate(&mut self) -> Result<Climate, SensorError> {
        let r = self.climate.read_climate();
        self.climate_cache = Some(r);
        r
    }

    /// The cached sample if there is one, otherwise a fresh read.
    pub(crate) fn take_climate(&mut self) -> Result<Climate, SensorError> {
        match self.climate_cache.take() {
            Some(r) => r,
            None => self.climate.read_climate(),
        }
    }
}

// ───────────────────────────────────────────────────────────────
// SensorAcquisition
// ───────────────────────────────────────────────────────────────

/// Turns raw port reads into a fully populated [`SensorSnapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorAcquisition {
    gas_full_scale: u16,
    distance_min_cm: u16,
    distance_max_cm: u16,
}

impl SensorAcquisition {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            gas_full_scale: config.gas_full_scale,
            distance_min_cm: config.distance_min_cm,
            distance_max_cm: config.distance_max_cm,
        }
    }

    /// Read every sensor once.  Never fails; every absorbed failure is
    /// logged at `warn`.
    pub fn read_all(&self, port: &mut impl SensorPort) -> SensorSnapshot {
        let temperature_c = finite("temperature", port.read_temperature());
        let humidity_pct = finite("humidity", port.read_humidity());

        let raw_gas = port.read_gas_level();
        if raw_gas > self.gas_full_scale {
            warn!("Gas level {} above full scale, clamping", raw_gas);
        }
        let gas_level = raw_gas.min(self.gas_full_scale);

        let (lo, hi) = (self.distance_min_cm, self.distance_max_cm);
        let distance_cm = port
            .read_distance()
            .filter(|d| (lo..=hi).contains(d), SensorError::OutOfRange);
        if let Some(e) = distance_cm.error() {
            warn!("Distance unavailable: {}", e);
        }

        let orientation = port
            .read_orientation()
            .filter(Orientation::is_finite, SensorError::ReadFailed);
        if let Some(e) = orientation.error() {
            warn!("Orientation unavailable: {}", e);
        }

        SensorSnapshot {
            temperature_c,
            humidity_pct,
            gas_level,
            distance_cm,
            orientation,
        }
    }
}

fn finite(what: &str, reading: Reading<f32>) -> Reading<f32> {
    let reading = reading.filter(|v| v.is_finite(), SensorError::ReadFailed);
    if let Some(e) = reading.error() {
        warn!("{} unavailable: {}", what, e);
    }
    reading
}
