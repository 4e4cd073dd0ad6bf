//! Function-pointer finite state machine for the rover's operating mode.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  StateTable                                  │
//! │  ┌────────┬─────────┬──────────────────────┐ │
//! │  │ Mode   │ name    │ on_enter             │ │
//! │  ├────────┼─────────┼──────────────────────┤ │
//! │  │ Off    │ "OFF"   │ fn(&mut EffectBlock) │ │
//! │  │ Idle   │ "IDLE"  │ fn(&mut EffectBlock) │ │
//! │  │ Active │ "ACTIVE"│ fn(&mut EffectBlock) │ │
//! │  │ Alert  │ "ALERT" │ fn(&mut EffectBlock) │ │
//! │  │ Error  │ "ERROR" │ fn(&mut EffectBlock) │ │
//! │  └────────┴─────────┴──────────────────────┘ │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! A transition to a different mode records the old mode as `previous`,
//! plays the short acknowledgment tone, then replays the target row's
//! entry block against the [`ActuatorPort`].  A transition to the mode
//! already current does nothing at all.
//!
//! [`StateMachine::update`] is the per-poll decision: it looks at one
//! [`SensorSnapshot`] and the [`HazardPolicy`] and picks at most one
//! transition.

pub mod context;
pub mod effects;
pub mod states;

use core::fmt;

use context::SensorSnapshot;
use effects::{Effect, EffectBlock};
use log::info;

use crate::app::ports::ActuatorPort;
use crate::config::SystemConfig;
use crate::drivers::buzzer::TonePattern;
use crate::hazard::HazardPolicy;

// ---------------------------------------------------------------------------
// Mode identity
// ---------------------------------------------------------------------------

/// Operating modes.  The discriminants are the codes used on the serial
/// status line and must stay in sync with [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Mode {
    Off = 0,
    Idle = 1,
    Active = 2,
    Alert = 3,
    Error = 4,
}

impl Mode {
    /// Total number of modes, used to size the table array.
    pub const COUNT: usize = 5;

    /// Convert an index back to `Mode`.  Panics on out-of-range in debug
    /// builds; returns `Error` in release.
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Off,
            1 => Self::Idle,
            2 => Self::Active,
            3 => Self::Alert,
            4 => Self::Error,
            _ => {
                debug_assert!(false, "invalid mode index: {idx}");
                Self::Error
            }
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Off => "OFF",
            Self::Idle => "IDLE",
            Self::Active => "ACTIVE",
            Self::Alert => "ALERT",
            Self::Error => "ERROR",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Fills the effect block run when a mode is entered.
pub type StateEnterFn = fn(&mut EffectBlock);

/// Static descriptor for a single mode.
/// Stored in a fixed-size array: no heap, no `dyn`.
pub struct StateDescriptor {
    pub id: Mode,
    pub name: &'static str,
    pub on_enter: StateEnterFn,
}

/// A completed mode change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: Mode,
    pub to: Mode,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

pub struct StateMachine {
    /// Fixed-size table indexed by `Mode as usize`.
    table: [StateDescriptor; Mode::COUNT],
    current: Mode,
    previous: Mode,
    transitions: u32,
    /// Invalid climate data sends the rover to ERROR.
    escalate_invalid: bool,
}

impl StateMachine {
    /// Boots in OFF with `previous` also OFF.
    pub fn new() -> Self {
        Self {
            table: states::build_state_table(),
            current: Mode::Off,
            previous: Mode::Off,
            transitions: 0,
            escalate_invalid: false,
        }
    }

    pub fn with_config(config: &SystemConfig) -> Self {
        Self {
            escalate_invalid: config.error_on_invalid_climate,
            ..Self::new()
        }
    }

    pub fn current(&self) -> Mode {
        self.current
    }

    pub fn previous(&self) -> Mode {
        self.previous
    }

    /// Mode changes since boot (wrapping).
    pub fn transitions(&self) -> u32 {
        self.transitions
    }

    /// Effects a change into `target` produces: the ack tone followed by the
    /// target's entry block.
    pub fn entry_effects(&self, target: Mode) -> EffectBlock {
        let mut block = EffectBlock::new();
        effects::push(&mut block, Effect::Tone(TonePattern::ShortAck));
        (self.table[target as usize].on_enter)(&mut block);
        block
    }

    /// Move to `target`.  Returns `None` without touching anything when the
    /// rover is already there.
    pub fn transition_to<A: ActuatorPort + ?Sized>(
        &mut self,
        target: Mode,
        actuators: &mut A,
    ) -> Option<Transition> {
        if target == self.current {
            return None;
        }

        let from = self.current;
        info!(
            "FSM transition: {} -> {}",
            self.table[from as usize].name, self.table[target as usize].name
        );

        self.previous = from;
        self.current = target;
        self.transitions = self.transitions.wrapping_add(1);

        let block = self.entry_effects(target);
        effects::apply(&block, actuators);

        Some(Transition { from, to: target })
    }

    /// Per-poll mode decision.
    ///
    /// 1. OFF ignores sensors entirely.
    /// 2. Hazardous gas → ALERT, whatever else the snapshot holds.
    /// 3. With escalation enabled, missing climate data → ERROR.
    /// 4. IDLE or ALERT with safe gas → ACTIVE.
    pub fn update<A: ActuatorPort + ?Sized>(
        &mut self,
        snapshot: &SensorSnapshot,
        policy: &HazardPolicy,
        actuators: &mut A,
    ) -> Option<Transition> {
        if self.current == Mode::Off {
            return None;
        }

        if policy.is_hazardous_gas(snapshot.gas_level) {
            return self.transition_to(Mode::Alert, actuators);
        }

        if self.escalate_invalid && !snapshot.is_valid() {
            return self.transition_to(Mode::Error, actuators);
        }

        match self.current {
            Mode::Idle | Mode::Alert => self.transition_to(Mode::Active, actuators),
            _ => None,
        }
    }
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}
