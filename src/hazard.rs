//! Gas hazard policy.

use crate::config::SystemConfig;

/// Decides whether a gas reading is dangerous.  Pure; holds only the
/// threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HazardPolicy {
    threshold: u16,
}

impl HazardPolicy {
    pub const fn new(threshold: u16) -> Self {
        Self { threshold }
    }

    pub fn from_config(config: &SystemConfig) -> Self {
        Self::new(config.gas_hazard_threshold)
    }

    /// `true` when `gas_level` is at or above the threshold.
    pub fn is_hazardous_gas(&self, gas_level: u16) -> bool {
        gas_level >= self.threshold
    }

    pub fn threshold(&self) -> u16 {
        self.threshold
    }
}

impl Default for HazardPolicy {
    fn default() -> Self {
        Self::from_config(&SystemConfig::default())
    }
}
