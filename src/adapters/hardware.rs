//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! [`SensorHub`] is exposed through [`SensorPort`] and [`ActuatorBank`]
//! through [`ActuatorPort`].  This is the only layer that calls into the
//! drivers.  Driver errors stop here: they are logged at `warn` and the
//! domain never sees them.

use log::warn;

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::config::{IndicatorPalette, SystemConfig, ToneConfig};
use crate::display::DisplayPage;
use crate::drivers::buzzer::{Buzzer, TonePattern};
use crate::drivers::status_led::IndicatorColor;
use crate::drivers::{MotorOutput, RgbOutput, TextDisplay, ToneOutput};
use crate::error::ActuatorError;
use crate::fsm::context::{Orientation, Reading};
use crate::sensors::{AnalogSource, ClimateSource, MotionSource, RangeSource, SensorHub};

use embedded_hal::delay::DelayNs;

// ── SensorPort implementation ─────────────────────────────────

impl<C, G, R, M> SensorPort for SensorHub<C, G, R, M>
where
    C: ClimateSource,
    G: AnalogSource,
    R: RangeSource,
    M: MotionSource,
{
    fn read_temperature(&mut self) -> Reading<f32> {
        Reading::from_result(self.sample_climate().map(|c| c.temperature_c))
    }

    fn read_humidity(&mut self) -> Reading<f32> {
        Reading::from_result(self.take_climate().map(|c| c.humidity_pct))
    }

    fn read_gas_level(&mut self) -> u16 {
        self.gas.read_level()
    }

    fn read_distance(&mut self) -> Reading<u16> {
        Reading::from_result(self.ranger.measure_cm())
    }

    fn read_orientation(&mut self) -> Reading<Orientation> {
        Reading::from_result(self.motion.read_motion())
    }
}

// ── ActuatorBank ──────────────────────────────────────────────

/// Every output device behind one [`ActuatorPort`].
pub struct ActuatorBank<MO, L, T, D, DL> {
    motor: MO,
    led: L,
    buzzer: Buzzer<T, DL>,
    display: D,
    palette: IndicatorPalette,
    tones: ToneConfig,
    /// Last state the hardware accepted; `None` until the first write.
    motor_on: Option<bool>,
    indicator: Option<IndicatorColor>,
    write_failures: u32,
}

impl<MO, L, T, D, DL> ActuatorBank<MO, L, T, D, DL>
where
    MO: MotorOutput,
    L: RgbOutput,
    T: ToneOutput,
    D: TextDisplay,
    DL: DelayNs,
{
    pub fn new(motor: MO, led: L, buzzer: Buzzer<T, DL>, display: D, config: &SystemConfig) -> Self {
        Self {
            motor,
            led,
            buzzer,
            display,
            palette: config.palette,
            tones: config.tones,
            motor_on: None,
            indicator: None,
            write_failures: 0,
        }
    }

    /// Driver writes that failed since boot.
    pub fn write_failures(&self) -> u32 {
        self.write_failures
    }

    pub fn motor_on(&self) -> Option<bool> {
        self.motor_on
    }

    pub fn indicator(&self) -> Option<IndicatorColor> {
        self.indicator
    }

    fn report(&mut self, what: &str, result: Result<(), ActuatorError>) -> bool {
        match result {
            Ok(()) => true,
            Err(e) => {
                self.write_failures = self.write_failures.wrapping_add(1);
                warn!("{} write failed: {}", what, e);
                false
            }
        }
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<MO, L, T, D, DL> ActuatorPort for ActuatorBank<MO, L, T, D, DL>
where
    MO: MotorOutput,
    L: RgbOutput,
    T: ToneOutput,
    D: TextDisplay,
    DL: DelayNs,
{
    fn set_motor(&mut self, on: bool) {
        if self.motor_on == Some(on) {
            return;
        }
        let result = if on {
            self.motor.run_full()
        } else {
            self.motor.stop()
        };
        if self.report("Motor", result) {
            self.motor_on = Some(on);
        }
    }

    fn set_indicator(&mut self, color: IndicatorColor) {
        if self.indicator == Some(color) {
            return;
        }
        let result = self.led.set_rgb(self.palette.rgb(color));
        if self.report("Indicator", result) {
            self.indicator = Some(color);
        }
    }

    fn set_display_page(&mut self, page: &DisplayPage) {
        let result = self.display.show(page);
        self.report("Display", result);
    }

    fn ensure_backlight(&mut self) {
        let result = self.display.set_backlight(true);
        self.report("Backlight", result);
    }

    fn emit_tone(&mut self, pattern: TonePattern) {
        let spec = self.tones.spec(pattern);
        let result = self.buzzer.play(&spec);
        self.report("Buzzer", result);
    }
}
