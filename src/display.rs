//! Two-line display content: fixed status pages and the rotating sensor
//! pages shown while the rover is ACTIVE.
//!
//! Everything here is pure.  A [`DisplayPage`] is just text; pushing it to
//! the LCD is the job of [`TextDisplay`](crate::drivers::TextDisplay).
//!
//! ```text
//!  index % 4   line 1                line 2
//!  ─────────   ───────────────────   ──────────────
//!      0       T:<t>C H:<h>%         Gas:<g>
//!      1       Gas:<g> (<pct>%)      Dist:<d> cm
//!      2       Pitch:<p>             Roll:<r>
//!      3       Yaw:<y>               Heading
//! ```

use core::fmt::{self, Write};

use heapless::String;

use crate::config::SystemConfig;
use crate::fsm::context::{Reading, SensorSnapshot};

pub const LCD_COLS: usize = 16;
pub const SENSOR_PAGE_COUNT: u32 = 4;

/// Gas full scale assumed by [`select_page`] (the 10-bit default).
pub const DEFAULT_GAS_FULL_SCALE: u16 = 1023;

pub type Line = String<LCD_COLS>;

/// Two lines of at most [`LCD_COLS`] characters each.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisplayPage {
    line1: Line,
    line2: Line,
}

impl DisplayPage {
    /// Build a page, truncating each line to the display width.
    pub fn new(line1: &str, line2: &str) -> Self {
        let mut page = Self::default();
        let _ = TruncatingLine(&mut page.line1).write_str(line1);
        let _ = TruncatingLine(&mut page.line2).write_str(line2);
        page
    }

    fn formatted(line1: fmt::Arguments<'_>, line2: fmt::Arguments<'_>) -> Self {
        let mut page = Self::default();
        let _ = TruncatingLine(&mut page.line1).write_fmt(line1);
        let _ = TruncatingLine(&mut page.line2).write_fmt(line2);
        page
    }

    pub fn line1(&self) -> &str {
        &self.line1
    }

    pub fn line2(&self) -> &str {
        &self.line2
    }
}

/// `fmt::Write` adapter that silently drops characters past the line width
/// instead of failing the whole write.
struct TruncatingLine<'a>(&'a mut Line);

impl Write for TruncatingLine<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            if self.0.push(c).is_err() {
                break;
            }
        }
        Ok(())
    }
}

// ───────────────────────────────────────────────────────────────
// Fixed status pages
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusPage {
    Initializing,
    Ready,
    Standby,
    WarmingUp,
    Alert,
    Error,
}

impl StatusPage {
    pub fn render(self) -> DisplayPage {
        let (l1, l2) = match self {
            Self::Initializing => ("UAV Initializing", "Please wait..."),
            Self::Ready => ("Ready to Fly!", "Press IR ON"),
            Self::Standby => ("UAV OFF", "Standby Mode"),
            Self::WarmingUp => ("UAV ACTIVE", "Warming up..."),
            Self::Alert => ("!!! ALERT !!!", "GAS DETECTED!"),
            Self::Error => ("SENSOR ERROR", "Check wiring"),
        };
        DisplayPage::new(l1, l2)
    }
}

// ───────────────────────────────────────────────────────────────
// Rotating sensor pages
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorPage {
    Climate = 0,
    GasDistance = 1,
    Attitude = 2,
    Heading = 3,
}

impl SensorPage {
    pub fn from_index(index: u32) -> Self {
        match index % SENSOR_PAGE_COUNT {
            0 => Self::Climate,
            1 => Self::GasDistance,
            2 => Self::Attitude,
            _ => Self::Heading,
        }
    }
}

/// Formats a reading with `--` in place of a failed value.
struct Shown<'a, T>(&'a Reading<T>, fn(&T, &mut fmt::Formatter<'_>) -> fmt::Result);

impl<T> fmt::Display for Shown<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Reading::Ok(v) => (self.1)(v, f),
            Reading::Failed(_) => f.write_str("--"),
        }
    }
}

fn one_decimal(v: &f32, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:.1}", v)
}

fn no_decimal(v: &f32, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:.0}", v)
}

fn integer(v: &u16, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", v)
}

/// The rotating sensor pages, scaled to the configured gas range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayRotator {
    gas_full_scale: u16,
}

impl DisplayRotator {
    pub fn new(gas_full_scale: u16) -> Self {
        Self {
            gas_full_scale: gas_full_scale.max(1),
        }
    }

    pub fn from_config(config: &SystemConfig) -> Self {
        Self::new(config.gas_full_scale)
    }

    /// Render sensor page `index mod 4` for `snapshot`.
    pub fn page(&self, snapshot: &SensorSnapshot, index: u32) -> DisplayPage {
        let gas = snapshot.gas_level;
        match SensorPage::from_index(index) {
            SensorPage::Climate => DisplayPage::formatted(
                format_args!(
                    "T:{}C H:{}%",
                    Shown(&snapshot.temperature_c, one_decimal),
                    Shown(&snapshot.humidity_pct, no_decimal)
                ),
                format_args!("Gas:{}", gas),
            ),
            SensorPage::GasDistance => DisplayPage::formatted(
                format_args!("Gas:{} ({}%)", gas, self.gas_percent(gas)),
                format_args!("Dist:{} cm", Shown(&snapshot.distance_cm, integer)),
            ),
            SensorPage::Attitude => {
                let pitch = snapshot.orientation.map(|o| o.pitch);
                let roll = snapshot.orientation.map(|o| o.roll);
                DisplayPage::formatted(
                    format_args!("Pitch:{}", Shown(&pitch, one_decimal)),
                    format_args!("Roll:{}", Shown(&roll, one_decimal)),
                )
            }
            SensorPage::Heading => {
                let yaw = snapshot.orientation.map(|o| o.yaw);
                DisplayPage::formatted(
                    format_args!("Yaw:{}", Shown(&yaw, one_decimal)),
                    format_args!("Heading"),
                )
            }
        }
    }

    fn gas_percent(&self, gas: u16) -> u32 {
        u32::from(gas) * 100 / u32::from(self.gas_full_scale)
    }
}

impl Default for DisplayRotator {
    fn default() -> Self {
        Self::new(DEFAULT_GAS_FULL_SCALE)
    }
}

/// Render sensor page `index mod 4` for `snapshot` on the default gas scale.
pub fn select_page(snapshot: &SensorSnapshot, index: u32) -> DisplayPage {
    DisplayRotator::default().page(snapshot, index)
}
