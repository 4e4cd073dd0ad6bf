//! Serial status line.
//!
//! One comma-separated record per poll, in the column order the ground
//! station's plotting script expects:
//!
//! ```text
//! temp,humid,gas,dist,state,pitch,roll,yaw
//! 24.50,40.00,312,87,2,1.20,-0.40,0.00
//! ```
//!
//! Failed readings fall back to fixed sentinels (temperature and humidity
//! -999, distance -1, orientation 0) so the column count never changes.

use core::fmt::Write;

use heapless::String;

use crate::fsm::context::{Orientation, SensorSnapshot};
use crate::fsm::Mode;

pub const CLIMATE_SENTINEL: f32 = -999.0;
pub const DISTANCE_SENTINEL: i32 = -1;

/// Longest possible line, with room to spare.
pub const CSV_CAPACITY: usize = 96;

pub const CSV_HEADER: &str = "temp,humid,gas,dist,state,pitch,roll,yaw";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusRecord {
    pub mode: Mode,
    pub snapshot: SensorSnapshot,
}

impl StatusRecord {
    pub fn new(mode: Mode, snapshot: SensorSnapshot) -> Self {
        Self { mode, snapshot }
    }

    pub fn to_csv(&self) -> String<CSV_CAPACITY> {
        let s = &self.snapshot;
        let o = s.orientation.unwrap_or(Orientation::default());
        let dist = s
            .distance_cm
            .map(i32::from)
            .unwrap_or(DISTANCE_SENTINEL);

        let mut line = String::new();
        // Every field is bounded, so the line always fits.
        let _ = write!(
            line,
            "{:.2},{:.2},{},{},{},{:.2},{:.2},{:.2}",
            s.temperature_c.unwrap_or(CLIMATE_SENTINEL),
            s.humidity_pct.unwrap_or(CLIMATE_SENTINEL),
            s.gas_level,
            dist,
            self.mode.code(),
            o.pitch,
            o.roll,
            o.yaw,
        );
        line
    }
}
