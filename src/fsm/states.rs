//! Per-mode entry actions and the table builder.
//!
//! Each mode is one row: a name and a plain `fn` that fills the
//! [`EffectBlock`] run on entry.  No closures, no dynamic dispatch, no heap.
//!
//! ```text
//!  from            condition                     to
//!  ─────────────   ───────────────────────────   ──────
//!  OFF             power on                      IDLE
//!  IDLE, ACTIVE    gas ≥ threshold               ALERT
//!  IDLE, ALERT     gas < threshold               ACTIVE
//!  any             power off                     OFF
//!  any             forced, or climate lost*      ERROR
//!
//!  * only with `error_on_invalid_climate`
//! ```

use super::effects::{push, Effect, EffectBlock};
use super::{Mode, StateDescriptor};
use crate::display::StatusPage;
use crate::drivers::buzzer::TonePattern;
use crate::drivers::status_led::IndicatorColor;

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static mode table.  Indexed by `Mode as usize`.
pub fn build_state_table() -> [StateDescriptor; Mode::COUNT] {
    [
        // Index 0 — Off
        StateDescriptor {
            id: Mode::Off,
            name: "OFF",
            on_enter: off_enter,
        },
        // Index 1 — Idle
        StateDescriptor {
            id: Mode::Idle,
            name: "IDLE",
            on_enter: idle_enter,
        },
        // Index 2 — Active
        StateDescriptor {
            id: Mode::Active,
            name: "ACTIVE",
            on_enter: active_enter,
        },
        // Index 3 — Alert
        StateDescriptor {
            id: Mode::Alert,
            name: "ALERT",
            on_enter: alert_enter,
        },
        // Index 4 — Error
        StateDescriptor {
            id: Mode::Error,
            name: "ERROR",
            on_enter: error_enter,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  Entry actions
// ═══════════════════════════════════════════════════════════════════════════

fn off_enter(block: &mut EffectBlock) {
    push(block, Effect::Motor(false));
    push(block, Effect::Indicator(IndicatorColor::Off));
    push(block, Effect::Page(StatusPage::Standby));
}

fn idle_enter(block: &mut EffectBlock) {
    push(block, Effect::Motor(true));
    push(block, Effect::Indicator(IndicatorColor::Purple));
    push(block, Effect::Page(StatusPage::WarmingUp));
}

fn active_enter(block: &mut EffectBlock) {
    // The sensor rotator owns the page while active.
    push(block, Effect::Motor(true));
    push(block, Effect::Indicator(IndicatorColor::Green));
    push(block, Effect::Backlight);
}

fn alert_enter(block: &mut EffectBlock) {
    push(block, Effect::Motor(true));
    push(block, Effect::Indicator(IndicatorColor::Red));
    push(block, Effect::Page(StatusPage::Alert));
    push(block, Effect::Tone(TonePattern::HazardSustained));
}

fn error_enter(block: &mut EffectBlock) {
    push(block, Effect::Motor(false));
    push(block, Effect::Indicator(IndicatorColor::Yellow));
    push(block, Effect::Page(StatusPage::Error));
}
