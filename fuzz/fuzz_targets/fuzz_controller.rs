//! Fuzz target: `ClimateController::compute`
//!
//! Feeds arbitrary bit patterns (NaN, infinities, subnormals included) as
//! readings and asserts that every cycle yields a potency in 0–100.
//!
//! cargo fuzz run fuzz_controller

#![no_main]

use artc::control::climate::{ClimateController, Reading};
use artc::fuzzy::DefuzzMethod;
use libfuzzer_sys::fuzz_target;

const METHODS: [DefuzzMethod; 6] = [
    DefuzzMethod::Centroid,
    DefuzzMethod::AreaCentroid,
    DefuzzMethod::Bisector,
    DefuzzMethod::MeanOfMaximum,
    DefuzzMethod::SmallestOfMaximum,
    DefuzzMethod::LargestOfMaximum,
];

fuzz_target!(|data: &[u8]| {
    if data.len() < 25 {
        return;
    }
    let f = |i: usize| {
        let mut b = [0u8; 8];
        b.copy_from_slice(&data[i..i + 8]);
        f64::from_le_bytes(b)
    };
    let method = METHODS[data[24] as usize % METHODS.len()];

    let Ok(mut ctl) = ClimateController::new(method, 2) else {
        return;
    };
    let reading = Reading {
        temperature_c: f(0),
        pressure_hpa: f(8),
        humidity_percent: f(16),
    };

    if let Ok(p) = ctl.compute(&reading) {
        assert!((0.0..=100.0).contains(&p.heater_percent), "{reading:?} -> {p:?}");
        assert!((0.0..=100.0).contains(&p.chiller_percent), "{reading:?} -> {p:?}");
    }
});
