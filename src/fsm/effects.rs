//! Actuator side effects as data.
//!
//! A state's `on_enter` handler does not touch hardware.  It appends
//! [`Effect`]s to an [`EffectBlock`]; the engine then replays the block
//! against an [`ActuatorPort`] in order.  Keeping effects as values lets
//! tests compare a transition's output directly.

use heapless::Vec;
use log::error;

use crate::app::ports::ActuatorPort;
use crate::display::StatusPage;
use crate::drivers::buzzer::TonePattern;
use crate::drivers::status_led::IndicatorColor;

/// Upper bound on effects per transition (ack tone + one state block).
pub const MAX_EFFECTS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// `true` runs the motor at full speed, `false` stops it.
    Motor(bool),
    Indicator(IndicatorColor),
    Page(StatusPage),
    /// Leave the current page alone but make sure it is lit.
    Backlight,
    Tone(TonePattern),
}

pub type EffectBlock = Vec<Effect, MAX_EFFECTS>;

/// Append `effect`; a full block drops it and logs.
pub fn push(block: &mut EffectBlock, effect: Effect) {
    if block.push(effect).is_err() {
        error!("Effect block full, dropping {:?}", effect);
    }
}

/// Apply every effect in `block` to `actuators`, in order.
pub fn apply<A: ActuatorPort + ?Sized>(block: &EffectBlock, actuators: &mut A) {
    for effect in block {
        match *effect {
            Effect::Motor(on) => actuators.set_motor(on),
            Effect::Indicator(color) => actuators.set_indicator(color),
            Effect::Page(page) => actuators.set_display_page(&page.render()),
            Effect::Backlight => actuators.ensure_backlight(),
            Effect::Tone(pattern) => actuators.emit_tone(pattern),
        }
    }
}
