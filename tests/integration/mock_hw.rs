//! Mock hardware adapters for integration tests.
//!
//! Records every actuator call so tests can assert on the full command
//! history, and replays scripted sensor values so a test can walk the
//! rover through a mission without real GPIO, ADC or I²C.

use std::collections::VecDeque;

use reconuav::app::events::AppEvent;
use reconuav::app::ports::{ActuatorPort, EventSink, SensorPort};
use reconuav::display::DisplayPage;
use reconuav::drivers::buzzer::TonePattern;
use reconuav::drivers::status_led::IndicatorColor;
use reconuav::error::SensorError;
use reconuav::fsm::context::{Orientation, Reading};

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum ActuatorCall {
    Motor(bool),
    Indicator(IndicatorColor),
    Page(DisplayPage),
    Backlight,
    Tone(TonePattern),
}

// ── MockActuators ─────────────────────────────────────────────

pub struct MockActuators {
    pub calls: Vec<ActuatorCall>,
}

#[allow(dead_code)]
impl MockActuators {
    pub fn new() -> Self {
        Self { calls: Vec::new() }
    }

    pub fn last_call(&self) -> Option<&ActuatorCall> {
        self.calls.last()
    }

    pub fn motor_on(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::Motor(on) => Some(*on),
                _ => None,
            })
            .unwrap_or(false)
    }

    pub fn indicator(&self) -> Option<IndicatorColor> {
        self.calls.iter().rev().find_map(|c| match c {
            ActuatorCall::Indicator(color) => Some(*color),
            _ => None,
        })
    }

    pub fn last_page(&self) -> Option<&DisplayPage> {
        self.calls.iter().rev().find_map(|c| match c {
            ActuatorCall::Page(page) => Some(page),
            _ => None,
        })
    }

    pub fn tones(&self) -> Vec<TonePattern> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                ActuatorCall::Tone(p) => Some(*p),
                _ => None,
            })
            .collect()
    }
}

impl Default for MockActuators {
    fn default() -> Self {
        Self::new()
    }
}

impl ActuatorPort for MockActuators {
    fn set_motor(&mut self, on: bool) {
        self.calls.push(ActuatorCall::Motor(on));
    }

    fn set_indicator(&mut self, color: IndicatorColor) {
        self.calls.push(ActuatorCall::Indicator(color));
    }

    fn set_display_page(&mut self, page: &DisplayPage) {
        self.calls.push(ActuatorCall::Page(page.clone()));
    }

    fn ensure_backlight(&mut self) {
        self.calls.push(ActuatorCall::Backlight);
    }

    fn emit_tone(&mut self, pattern: TonePattern) {
        self.calls.push(ActuatorCall::Tone(pattern));
    }
}

// ── ScriptedSensors ───────────────────────────────────────────

/// Replays one gas level per poll; the other channels hold steady values
/// that tests can override.  Once the script runs dry the last gas level
/// repeats.
pub struct ScriptedSensors {
    gas: VecDeque<u16>,
    last_gas: u16,
    pub temperature: Reading<f32>,
    pub humidity: Reading<f32>,
    pub distance: Reading<u16>,
    pub orientation: Reading<Orientation>,
}

#[allow(dead_code)]
impl ScriptedSensors {
    pub fn new(gas: &[u16]) -> Self {
        Self {
            gas: gas.iter().copied().collect(),
            last_gas: 0,
            temperature: Reading::Ok(24.5),
            humidity: Reading::Ok(51.0),
            distance: Reading::Ok(120),
            orientation: Reading::Ok(Orientation {
                pitch: 2.0,
                roll: -1.0,
                yaw: 0.5,
            }),
        }
    }

    /// Make the climate sensor fail on every read from now on.
    pub fn lose_climate(&mut self) {
        self.temperature = Reading::Failed(SensorError::Timeout);
        self.humidity = Reading::Failed(SensorError::Timeout);
    }
}

impl SensorPort for ScriptedSensors {
    fn read_temperature(&mut self) -> Reading<f32> {
        self.temperature
    }

    fn read_humidity(&mut self) -> Reading<f32> {
        self.humidity
    }

    fn read_gas_level(&mut self) -> u16 {
        if let Some(level) = self.gas.pop_front() {
            self.last_gas = level;
        }
        self.last_gas
    }

    fn read_distance(&mut self) -> Reading<u16> {
        self.distance
    }

    fn read_orientation(&mut self) -> Reading<Orientation> {
        self.orientation
    }
}

// ── LogSink ───────────────────────────────────────────────────

/// Event sink that records every event for later assertion.
pub struct LogSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl LogSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn mode_changes(&self) -> Vec<(reconuav::fsm::Mode, reconuav::fsm::Mode)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::ModeChanged { from, to } => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }

    pub fn hazard_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, AppEvent::HazardDetected { .. }))
            .count()
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
