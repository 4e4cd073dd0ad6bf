//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the logger (UART / USB-CDC on the rover).  The telemetry line is the
//! CSV record the ground station plots.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::telemetry::CSV_HEADER;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink {
    header_sent: bool,
}

impl LogEventSink {
    pub fn new() -> Self {
        Self { header_sent: false }
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(record) => {
                if !self.header_sent {
                    info!("TELEM | {}", CSV_HEADER);
                    self.header_sent = true;
                }
                info!("TELEM | {}", record.to_csv());
            }
            AppEvent::ModeChanged { from, to } => {
                info!("MODE | {} -> {}", from, to);
            }
            AppEvent::HazardDetected { gas_level } => {
                warn!("HAZARD | gas level {}", gas_level);
            }
            AppEvent::Started(mode) => {
                info!("START | initial_mode={}", mode);
            }
        }
    }
}
