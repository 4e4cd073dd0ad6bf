//! System configuration parameters
//!
//! All tunable parameters for the rover.  The firmware bakes
//! `config/rover.json` into the image; any field missing from the JSON
//! falls back to the default below.

use serde::{Deserialize, Serialize};

use crate::drivers::buzzer::{TonePattern, ToneSpec};
use crate::drivers::status_led::{IndicatorColor, Rgb};
use crate::error::{Error, Result};

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    // --- Gas ---
    /// Gas level at or above which the rover enters ALERT
    pub gas_hazard_threshold: u16,
    /// Top of the normalised gas scale
    pub gas_full_scale: u16,

    // --- Ranging ---
    /// Shortest distance the ultrasonic ranger reports reliably (cm)
    pub distance_min_cm: u16,
    /// Longest distance the ultrasonic ranger reports reliably (cm)
    pub distance_max_cm: u16,
    /// Echo wait bound (microseconds)
    pub ranging_timeout_us: u32,

    // --- Timing ---
    /// Sensor poll interval (milliseconds)
    pub poll_interval_ms: u32,

    // --- Policy ---
    /// Drop to ERROR when temperature or humidity cannot be read
    pub error_on_invalid_climate: bool,

    // --- Outputs ---
    pub tones: ToneConfig,
    pub palette: IndicatorPalette,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            gas_hazard_threshold: 460,
            gas_full_scale: 1023,

            distance_min_cm: 2,
            distance_max_cm: 400,
            ranging_timeout_us: 30_000,

            poll_interval_ms: 15_000,

            error_on_invalid_climate: false,

            tones: ToneConfig::default(),
            palette: IndicatorPalette::default(),
        }
    }
}

impl SystemConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|_| Error::Config("malformed JSON"))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the firmware cannot run with.  Nothing is clamped.
    pub fn validate(&self) -> Result<()> {
        if self.gas_full_scale == 0 {
            return Err(Error::Config("gas_full_scale must be non-zero"));
        }
        if self.gas_hazard_threshold == 0 || self.gas_hazard_threshold > self.gas_full_scale {
            return Err(Error::Config("gas_hazard_threshold outside 1..=gas_full_scale"));
        }
        if self.distance_min_cm >= self.distance_max_cm {
            return Err(Error::Config("distance_min_cm must be below distance_max_cm"));
        }
        if self.ranging_timeout_us == 0 {
            return Err(Error::Config("ranging_timeout_us must be non-zero"));
        }
        if self.poll_interval_ms == 0 {
            return Err(Error::Config("poll_interval_ms must be non-zero"));
        }
        self.tones.validate()
    }
}

// ---------------------------------------------------------------------------
// Tones
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToneConfig {
    pub short_ack: ToneSpec,
    pub hazard_burst: ToneSpec,
    pub hazard_sustained: ToneSpec,
}

impl Default for ToneConfig {
    fn default() -> Self {
        Self {
            short_ack: ToneSpec::new(1000, 100, 50, 1),
            hazard_burst: ToneSpec::new(2000, 80, 100, 5),
            hazard_sustained: ToneSpec::new(2000, 300, 200, 3),
        }
    }
}

impl ToneConfig {
    pub fn spec(&self, pattern: TonePattern) -> ToneSpec {
        match pattern {
            TonePattern::ShortAck => self.short_ack,
            TonePattern::HazardBurst => self.hazard_burst,
            TonePattern::HazardSustained => self.hazard_sustained,
        }
    }

    fn validate(&self) -> Result<()> {
        for spec in [self.short_ack, self.hazard_burst, self.hazard_sustained] {
            if spec.frequency_hz == 0 || spec.repeats == 0 {
                return Err(Error::Config("tone needs a frequency and at least one repeat"));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Indicator palette
// ---------------------------------------------------------------------------

/// RGB value for each named indicator colour.  `Off` is always black.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorPalette {
    pub green: Rgb,
    pub blue: Rgb,
    pub red: Rgb,
    pub yellow: Rgb,
    pub purple: Rgb,
    pub orange: Rgb,
    pub cyan: Rgb,
    pub deep_blue: Rgb,
}

impl Default for IndicatorPalette {
    fn default() -> Self {
        Self {
            green: (0, 255, 0),
            blue: (0, 0, 255),
            red: (255, 0, 0),
            yellow: (255, 255, 0),
            purple: (128, 0, 128),
            orange: (255, 165, 0),
            cyan: (0, 255, 255),
            deep_blue: (0, 0, 139),
        }
    }
}

impl IndicatorPalette {
    pub fn rgb(&self, color: IndicatorColor) -> Rgb {
        match color {
            IndicatorColor::Off => (0, 0, 0),
            IndicatorColor::Green => self.green,
            IndicatorColor::Blue => self.blue,
            IndicatorColor::Red => self.red,
            IndicatorColor::Yellow => self.yellow,
            IndicatorColor::Purple => self.purple,
            IndicatorColor::Orange => self.orange,
            IndicatorColor::Cyan => self.cyan,
            IndicatorColor::DeepBlue => self.deep_blue,
        }
    }
}
