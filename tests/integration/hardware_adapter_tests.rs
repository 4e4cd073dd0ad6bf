//! Integration tests for the hardware adapter layer.
//!
//! `ActuatorBank` and `SensorHub` are exercised through their port traits
//! with trait-level fakes underneath, checking the glue the service relies
//! on: write de-duplication, failure absorption, palette and tone lookup,
//! and one-sample-per-poll climate reads.

use std::cell::RefCell;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;

use reconuav::adapters::hardware::ActuatorBank;
use reconuav::app::ports::{ActuatorPort, SensorPort};
use reconuav::config::SystemConfig;
use reconuav::display::{DisplayPage, StatusPage};
use reconuav::drivers::buzzer::{Buzzer, TonePattern};
use reconuav::drivers::status_led::{IndicatorColor, Rgb};
use reconuav::drivers::{MotorOutput, RgbOutput, TextDisplay, ToneOutput};
use reconuav::error::{ActuatorError, SensorError};
use reconuav::fsm::context::{Orientation, Reading};
use reconuav::sensors::climate::Climate;
use reconuav::sensors::gas::{GasSensor, ADC_FULL_SCALE_12BIT};
use reconuav::sensors::{
    ClimateSource, MotionSource, RangeSource, SensorAcquisition, SensorHub,
};

// ── Output fakes ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
enum Op {
    MotorRun,
    MotorStop,
    Rgb(Rgb),
    ToneStart(u32),
    ToneStop,
    Show(String, String),
    Backlight(bool),
}

type OpLog = Rc<RefCell<Vec<Op>>>;

struct FakeMotor {
    log: OpLog,
    fail: bool,
}

impl MotorOutput for FakeMotor {
    fn run_full(&mut self) -> Result<(), ActuatorError> {
        self.log.borrow_mut().push(Op::MotorRun);
        if self.fail {
            Err(ActuatorError::PwmWriteFailed)
        } else {
            Ok(())
        }
    }

    fn stop(&mut self) -> Result<(), ActuatorError> {
        self.log.borrow_mut().push(Op::MotorStop);
        Ok(())
    }
}

struct FakeLed(OpLog);

impl RgbOutput for FakeLed {
    fn set_rgb(&mut self, rgb: Rgb) -> Result<(), ActuatorError> {
        self.0.borrow_mut().push(Op::Rgb(rgb));
        Ok(())
    }
}

struct FakeTone(OpLog);

impl ToneOutput for FakeTone {
    fn start_tone(&mut self, frequency_hz: u32) -> Result<(), ActuatorError> {
        self.0.borrow_mut().push(Op::ToneStart(frequency_hz));
        Ok(())
    }

    fn stop_tone(&mut self) -> Result<(), ActuatorError> {
        self.0.borrow_mut().push(Op::ToneStop);
        Ok(())
    }
}

struct FakeDisplay(OpLog);

impl TextDisplay for FakeDisplay {
    fn show(&mut self, page: &DisplayPage) -> Result<(), ActuatorError> {
        self.0
            .borrow_mut()
            .push(Op::Show(page.line1().to_string(), page.line2().to_string()));
        Ok(())
    }

    fn set_backlight(&mut self, on: bool) -> Result<(), ActuatorError> {
        self.0.borrow_mut().push(Op::Backlight(on));
        Ok(())
    }
}

struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

type Bank = ActuatorBank<FakeMotor, FakeLed, FakeTone, FakeDisplay, NoDelay>;

fn bank_with(config: &SystemConfig, motor_fails: bool) -> (Bank, OpLog) {
    let log: OpLog = Rc::default();
    let bank = ActuatorBank::new(
        FakeMotor {
            log: log.clone(),
            fail: motor_fails,
        },
        FakeLed(log.clone()),
        Buzzer::new(FakeTone(log.clone()), NoDelay),
        FakeDisplay(log.clone()),
        config,
    );
    (bank, log)
}

// ── ActuatorBank ──────────────────────────────────────────────

#[test]
fn repeated_motor_command_writes_once() {
    let (mut bank, log) = bank_with(&SystemConfig::default(), false);

    bank.set_motor(true);
    bank.set_motor(true);
    bank.set_motor(false);

    assert_eq!(*log.borrow(), vec![Op::MotorRun, Op::MotorStop]);
    assert_eq!(bank.motor_on(), Some(false));
}

#[test]
fn failed_motor_write_is_absorbed_and_retried() {
    let (mut bank, log) = bank_with(&SystemConfig::default(), true);

    bank.set_motor(true);
    bank.set_motor(true);

    assert_eq!(*log.borrow(), vec![Op::MotorRun, Op::MotorRun]);
    assert_eq!(bank.motor_on(), None);
    assert_eq!(bank.write_failures(), 2);
}

#[test]
fn indicator_uses_configured_palette() {
    let mut config = SystemConfig::default();
    config.palette.red = (200, 10, 10);
    let (mut bank, log) = bank_with(&config, false);

    bank.set_indicator(IndicatorColor::Red);
    bank.set_indicator(IndicatorColor::Red);
    bank.set_indicator(IndicatorColor::Off);

    assert_eq!(*log.borrow(), vec![Op::Rgb((200, 10, 10)), Op::Rgb((0, 0, 0))]);
    assert_eq!(bank.indicator(), Some(IndicatorColor::Off));
}

#[test]
fn tone_follows_configured_pattern() {
    let config = SystemConfig::default();
    let spec = config.tones.spec(TonePattern::HazardBurst);
    let (mut bank, log) = bank_with(&config, false);

    bank.emit_tone(TonePattern::HazardBurst);

    let log = log.borrow();
    let starts = log
        .iter()
        .filter(|op| **op == Op::ToneStart(spec.frequency_hz))
        .count();
    let stops = log.iter().filter(|op| **op == Op::ToneStop).count();
    assert_eq!(starts, usize::from(spec.repeats));
    assert_eq!(stops, usize::from(spec.repeats));
    assert_eq!(log.last(), Some(&Op::ToneStop));
}

#[test]
fn display_page_and_backlight_pass_through() {
    let (mut bank, log) = bank_with(&SystemConfig::default(), false);

    bank.set_display_page(&StatusPage::Alert.render());
    bank.ensure_backlight();

    assert_eq!(
        *log.borrow(),
        vec![
            Op::Show("!!! ALERT !!!".into(), "GAS DETECTED!".into()),
            Op::Backlight(true),
        ]
    );
}

// ── Sensor fakes ──────────────────────────────────────────────

struct FakeClimate {
    reads: u32,
    result: Result<Climate, SensorError>,
}

impl ClimateSource for FakeClimate {
    fn read_climate(&mut self) -> Result<Climate, SensorError> {
        self.reads += 1;
        self.result
    }
}

struct FakeRanger(Result<u16, SensorError>);

impl RangeSource for FakeRanger {
    fn measure_cm(&mut self) -> Result<u16, SensorError> {
        self.0
    }
}

struct FakeMotion(Result<Orientation, SensorError>);

impl MotionSource for FakeMotion {
    fn read_motion(&mut self) -> Result<Orientation, SensorError> {
        self.0
    }
}

fn adc(raw: u16) -> impl FnMut() -> Result<u16, SensorError> {
    move || Ok(raw)
}

fn hub(
    raw_gas: u16,
    distance: Result<u16, SensorError>,
) -> SensorHub<FakeClimate, impl FnMut() -> Result<u16, SensorError>, FakeRanger, FakeMotion> {
    SensorHub::new(
        FakeClimate {
            reads: 0,
            result: Ok(Climate {
                temperature_c: 21.0,
                humidity_pct: 63.0,
            }),
        },
        GasSensor::new(adc(raw_gas), ADC_FULL_SCALE_12BIT, 1023),
        FakeRanger(distance),
        FakeMotion(Ok(Orientation {
            pitch: 4.0,
            roll: 0.0,
            yaw: -2.0,
        })),
    )
}

// ── SensorHub ─────────────────────────────────────────────────

#[test]
fn one_climate_sample_per_poll() {
    let acquisition = SensorAcquisition::new(&SystemConfig::default());
    let mut hub = hub(2048, Ok(80));

    let snap = acquisition.read_all(&mut hub);
    assert_eq!(hub.climate.reads, 1);
    assert_eq!(snap.temperature_c, Reading::Ok(21.0));
    assert_eq!(snap.humidity_pct, Reading::Ok(63.0));

    acquisition.read_all(&mut hub);
    assert_eq!(hub.climate.reads, 2);
}

#[test]
fn climate_failure_reaches_both_fields() {
    let acquisition = SensorAcquisition::new(&SystemConfig::default());
    let mut hub = hub(0, Ok(80));
    hub.climate.result = Err(SensorError::ChecksumMismatch);

    let snap = acquisition.read_all(&mut hub);

    assert_eq!(snap.temperature_c, Reading::Failed(SensorError::ChecksumMismatch));
    assert_eq!(snap.humidity_pct, Reading::Failed(SensorError::ChecksumMismatch));
    assert!(!snap.is_valid());
}

#[test]
fn gas_is_rescaled_to_ten_bits() {
    let acquisition = SensorAcquisition::new(&SystemConfig::default());

    assert_eq!(acquisition.read_all(&mut hub(4095, Ok(80))).gas_level, 1023);
    assert_eq!(acquisition.read_all(&mut hub(2048, Ok(80))).gas_level, 511);
    assert_eq!(acquisition.read_all(&mut hub(0, Ok(80))).gas_level, 0);
}

#[test]
fn distance_outside_sensor_range_is_rejected() {
    let acquisition = SensorAcquisition::new(&SystemConfig::default());

    for cm in [0, 1, 401, 999] {
        let snap = acquisition.read_all(&mut hub(100, Ok(cm)));
        assert_eq!(snap.distance_cm, Reading::Failed(SensorError::OutOfRange), "{cm} cm");
    }
    for cm in [2, 150, 400] {
        let snap = acquisition.read_all(&mut hub(100, Ok(cm)));
        assert_eq!(snap.distance_cm, Reading::Ok(cm));
    }

    let snap = acquisition.read_all(&mut hub(100, Err(SensorError::Timeout)));
    assert_eq!(snap.distance_cm, Reading::Failed(SensorError::Timeout));
}

#[test]
fn orientation_failure_leaves_other_readings_intact() {
    let acquisition = SensorAcquisition::new(&SystemConfig::default());
    let mut hub = hub(1000, Ok(55));
    hub.motion = FakeMotion(Err(SensorError::BusError));

    let snap = acquisition.read_all(&mut hub);

    assert_eq!(snap.orientation, Reading::Failed(SensorError::BusError));
    assert_eq!(snap.distance_cm, Reading::Ok(55));
    assert!(snap.is_valid());
    assert_eq!(hub.read_orientation(), Reading::Failed(SensorError::BusError));
}
