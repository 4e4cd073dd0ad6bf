//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them (serial log, test recorder).

use crate::fsm::Mode;
use crate::telemetry::StatusRecord;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The application service has started (carries initial mode).
    Started(Mode),

    /// The FSM changed mode.
    ModeChanged { from: Mode, to: Mode },

    /// A poll saw gas at or above the hazard threshold.
    HazardDetected { gas_level: u16 },

    /// End-of-poll status, one per cycle.
    Telemetry(StatusRecord),
}
