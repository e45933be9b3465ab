//! Fuzz target: `SystemConfig::from_json_str`
//!
//! Arbitrary text must either parse into a config that passes validation
//! and builds a service, or be rejected with an error. Never a panic.
//!
//! cargo fuzz run fuzz_config

#![no_main]

use artc::app::service::AppService;
use artc::config::SystemConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(config) = SystemConfig::from_json_str(text) {
        assert!(config.validate().is_ok());
        assert!(AppService::new(config).is_ok());
    }
});
