//! Application service — the hexagonal core.
//!
//! [`AppService`] owns the state machine, the sensor acquisition rules and
//! the hazard policy.  It exposes a hardware-agnostic API; all I/O flows
//! through port traits passed in at each call, so the whole service runs
//! against mock adapters on the host.
//!
//! ```text
//!  SensorPort ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!                 │        AppService        │
//! ActuatorPort ◀──│  Acquire · FSM · Rotator │
//!                 └──────────────────────────┘
//! ```

use log::{debug, info};

use crate::config::SystemConfig;
use crate::display::{DisplayRotator, StatusPage};
use crate::drivers::buzzer::TonePattern;
use crate::drivers::status_led::IndicatorColor;
use crate::fsm::context::SensorSnapshot;
use crate::fsm::{Mode, StateMachine, Transition};
use crate::hazard::HazardPolicy;
use crate::sensors::SensorAcquisition;
use crate::telemetry::StatusRecord;

use super::commands::AppCommand;
use super::events::AppEvent;
use super::ports::{ActuatorPort, EventSink, SensorPort};

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService {
    fsm: StateMachine,
    acquisition: SensorAcquisition,
    policy: HazardPolicy,
    rotator: DisplayRotator,
    poll_count: u64,
}

impl AppService {
    /// Construct the service from configuration.
    ///
    /// Does **not** touch any actuator; call [`start`](Self::start) next.
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            fsm: StateMachine::with_config(config),
            acquisition: SensorAcquisition::new(config),
            policy: HazardPolicy::from_config(config),
            rotator: DisplayRotator::from_config(config),
            poll_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Put the outputs in their boot state and announce readiness.  The
    /// FSM stays in OFF until a `PowerOn` command arrives.
    pub fn start(&mut self, actuators: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        actuators.set_motor(false);
        actuators.set_indicator(IndicatorColor::Off);
        actuators.set_display_page(&StatusPage::Ready.render());
        actuators.emit_tone(TonePattern::ShortAck);

        sink.emit(&AppEvent::Started(self.fsm.current()));
        info!("AppService started in {}", self.fsm.current());
    }

    // ── Per-poll orchestration ────────────────────────────────

    /// Run one full cycle: acquire → decide → actuate → report.
    ///
    /// `rotation_index` selects the sensor page shown while ACTIVE.  The
    /// snapshot is returned to the caller and not kept.
    pub fn poll(
        &mut self,
        sensors: &mut impl SensorPort,
        actuators: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
        rotation_index: u32,
    ) -> SensorSnapshot {
        self.poll_count += 1;

        // 1. Acquire
        let snapshot = self.acquisition.read_all(sensors);

        // 2. Decide
        if self.fsm.current() != Mode::Off && self.policy.is_hazardous_gas(snapshot.gas_level) {
            sink.emit(&AppEvent::HazardDetected {
                gas_level: snapshot.gas_level,
            });
        }
        if let Some(t) = self.fsm.update(&snapshot, &self.policy, actuators) {
            emit_transition(t, sink);
        }

        // 3. Rotator owns the display while active
        if self.fsm.current() == Mode::Active {
            actuators.set_display_page(&self.rotator.page(&snapshot, rotation_index));
        }

        // 4. Report
        let record = StatusRecord::new(self.fsm.current(), snapshot);
        debug!("poll #{} | {}", self.poll_count, record.to_csv());
        sink.emit(&AppEvent::Telemetry(record));

        snapshot
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an external command (power switch, remote, console).
    pub fn handle_command(
        &mut self,
        cmd: AppCommand,
        actuators: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) -> Option<Transition> {
        let target = match cmd {
            AppCommand::PowerOn if self.fsm.current() == Mode::Off => Mode::Idle,
            AppCommand::PowerOn => {
                debug!("PowerOn ignored in {}", self.fsm.current());
                return None;
            }
            AppCommand::PowerOff => Mode::Off,
            AppCommand::ForceMode(mode) => mode,
        };

        let t = self.fsm.transition_to(target, actuators)?;
        emit_transition(t, sink);
        Some(t)
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn mode(&self) -> Mode {
        self.fsm.current()
    }

    pub fn previous_mode(&self) -> Mode {
        self.fsm.previous()
    }

    /// Total polls executed since startup.
    pub fn poll_count(&self) -> u64 {
        self.poll_count
    }
}

fn emit_transition(t: Transition, sink: &mut impl EventSink) {
    sink.emit(&AppEvent::ModeChanged {
        from: t.from,
        to: t.to,
    });
}
