//! Fuzz target: `SystemConfig::from_json`
//!
//! Feeds arbitrary bytes to the config parser and verifies:
//! - No panics on malformed JSON or out-of-range values
//! - Anything accepted passes `validate()` again
//! - Anything accepted survives a serialize → parse round trip unchanged
//!
//! cargo fuzz run fuzz_config_json

#![no_main]

use libfuzzer_sys::fuzz_target;
use reconuav::config::SystemConfig;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };

    let Ok(config) = SystemConfig::from_json(text) else {
        return;
    };

    assert!(config.validate().is_ok(), "accepted config fails validation");
    assert!(config.gas_hazard_threshold <= config.gas_full_scale);
    assert!(config.distance_min_cm <= config.distance_max_cm);

    let json = serde_json::to_string(&config).expect("valid config serializes");
    let reparsed = SystemConfig::from_json(&json).expect("serialized config parses");
    assert_eq!(config, reparsed);
});
