//! Room climate control on top of the fuzzy engine.

pub mod climate;
pub mod knowledge;

pub use climate::{ClimateController, FallbackPolicy, Potency, Reading};
