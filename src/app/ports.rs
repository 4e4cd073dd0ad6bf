//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (sensor hub, actuator bank, event sinks) implement these
//! traits.  The [`AppService`](super::service::AppService) consumes them via
//! generics, so the domain core never touches hardware directly.

use crate::display::DisplayPage;
use crate::drivers::buzzer::TonePattern;
use crate::drivers::status_led::IndicatorColor;
use crate::fsm::context::{Orientation, Reading};

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Raw per-sensor reads.  Implementations report failures through
/// [`Reading::Failed`]; they never panic and never block past their
/// own timeouts.
pub trait SensorPort {
    fn read_temperature(&mut self) -> Reading<f32>;

    fn read_humidity(&mut self) -> Reading<f32>;

    /// Gas level on the 0–1023 scale.  Analog reads cannot fail.
    fn read_gas_level(&mut self) -> u16;

    /// Distance to the nearest obstacle in centimetres.
    fn read_distance(&mut self) -> Reading<u16>;

    fn read_orientation(&mut self) -> Reading<Orientation>;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port.  Every primitive is idempotent and infallible from
/// the caller's point of view; hardware errors are the adapter's problem.
pub trait ActuatorPort {
    /// `true` runs the propulsion motor at full speed, `false` stops it.
    fn set_motor(&mut self, on: bool);

    fn set_indicator(&mut self, color: IndicatorColor);

    /// Clear the display, write both lines, backlight on.
    fn set_display_page(&mut self, page: &DisplayPage);

    /// Turn the backlight on without changing the text.
    fn ensure_backlight(&mut self);

    /// Play `pattern` to completion.  Blocks.
    fn emit_tone(&mut self, pattern: TonePattern);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
