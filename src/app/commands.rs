//! Inbound commands to the application service.
//!
//! These represent actions requested by the outside world (the power
//! switch, a remote, a debug console) that the
//! [`AppService`](super::service::AppService) interprets and acts upon.

use crate::fsm::Mode;

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Leave OFF and start warming up.  Ignored in any other mode.
    PowerOn,

    /// Return to OFF from any mode.
    PowerOff,

    /// Jump straight to a mode (debug / testing, and the only way into
    /// ERROR unless climate escalation is enabled).
    ForceMode(Mode),
}
