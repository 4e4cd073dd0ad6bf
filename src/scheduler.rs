//! Poll scheduler.
//!
//! The main loop spins continuously (power switch debounce needs that),
//! but sensors are only sampled every `poll_interval_ms`.  The scheduler
//! answers "is a poll due?" and owns the display rotation index that the
//! poll hands to the rotator.
//!
//! ```text
//!  t = 0        15 s         30 s          (loop stalled)   62 s
//!  │ poll #0    │ poll #1    │ poll #2  ─────────────────── │ poll #3
//!  │ page 0     │ page 1     │ page 2                       │ page 3
//! ```
//!
//! A late loop gets one poll, not a burst of catch-up polls; the next
//! deadline is measured from the time the late poll actually ran.

use log::debug;

/// What the caller needs to run one poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollTick {
    /// Page index for [`select_page`](crate::display::select_page).
    pub rotation_index: u32,
    /// Zero-based poll number since boot (wrapping).
    pub sequence: u32,
}

pub struct PollScheduler {
    interval_ms: u32,
    /// `None` until the first poll has run.
    last_poll_ms: Option<u32>,
    rotation_index: u32,
    polls: u32,
}

impl PollScheduler {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            last_poll_ms: None,
            rotation_index: 0,
            polls: 0,
        }
    }

    /// Returns a tick when a poll should run at `now_ms` (monotonic,
    /// wrapping), advancing the rotation for the next one.
    pub fn due(&mut self, now_ms: u32) -> Option<PollTick> {
        if let Some(last) = self.last_poll_ms {
            if now_ms.wrapping_sub(last) < self.interval_ms {
                return None;
            }
        }

        let tick = PollTick {
            rotation_index: self.rotation_index,
            sequence: self.polls,
        };
        self.last_poll_ms = Some(now_ms);
        self.rotation_index = self.rotation_index.wrapping_add(1);
        self.polls = self.polls.wrapping_add(1);
        debug!(
            "Poll #{} due at {} ms (page {})",
            tick.sequence, now_ms, tick.rotation_index
        );
        Some(tick)
    }

    /// Milliseconds until the next poll; 0 when one is already due.
    pub fn remaining_ms(&self, now_ms: u32) -> u32 {
        match self.last_poll_ms {
            None => 0,
            Some(last) => self.interval_ms.saturating_sub(now_ms.wrapping_sub(last)),
        }
    }
}
