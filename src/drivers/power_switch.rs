//! Debounced power switch.
//!
//! A latching switch (or the output of the IR remote decoder) on a single
//! GPIO.  The main loop calls [`PowerSwitch::poll`] on every pass with the
//! current monotonic time; once the level has been stable for
//! [`DEBOUNCE_MS`] a change is reported as a power command.
//!
//! ```text
//!  level ──┐   ┌─bounce─┐   ┌──────────────────
//!          └───┘        └───┘
//!              │◀── DEBOUNCE_MS ──▶│ PowerOn
//! ```

use embedded_hal::digital::InputPin;
use log::warn;

use crate::app::commands::AppCommand;

pub const DEBOUNCE_MS: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SwitchState {
    Stable(bool),
    Settling { level: bool, since_ms: u32, stable: bool },
}

pub struct PowerSwitch<P> {
    pin: P,
    active_high: bool,
    state: SwitchState,
}

impl<P: InputPin> PowerSwitch<P> {
    /// The switch is assumed to be in the "off" position at boot, so a
    /// switch already on produces a `PowerOn` after the first debounce.
    pub fn new(pin: P, active_high: bool) -> Self {
        Self {
            pin,
            active_high,
            state: SwitchState::Stable(false),
        }
    }

    pub fn poll(&mut self, now_ms: u32) -> Option<AppCommand> {
        let on = match self.pin.is_high() {
            Ok(high) => high == self.active_high,
            Err(_) => {
                warn!("Power switch read failed");
                return None;
            }
        };

        match self.state {
            SwitchState::Stable(stable) => {
                if on != stable {
                    self.state = SwitchState::Settling {
                        level: on,
                        since_ms: now_ms,
                        stable,
                    };
                }
                None
            }
            SwitchState::Settling {
                level,
                since_ms,
                stable,
            } => {
                if on != level {
                    // Bounced back; restart from the new level.
                    self.state = if on == stable {
                        SwitchState::Stable(stable)
                    } else {
                        SwitchState::Settling {
                            level: on,
                            since_ms: now_ms,
                            stable,
                        }
                    };
                    return None;
                }
                if now_ms.wrapping_sub(since_ms) < DEBOUNCE_MS {
                    return None;
                }
                self.state = SwitchState::Stable(level);
                Some(if level {
                    AppCommand::PowerOn
                } else {
                    AppCommand::PowerOff
                })
            }
        }
    }

    pub fn is_on(&self) -> bool {
        match self.state {
            SwitchState::Stable(on) => on,
            SwitchState::Settling { stable, .. } => stable,
        }
    }
}
