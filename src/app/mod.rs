//! Application core: the polling cycle, zero I/O.
//!
//! Reads the room through port traits defined in [`ports`], runs the
//! fuzzy controller and commands heater and chiller duty. All interaction
//! with hardware goes through those traits, keeping this layer testable
//! without real peripherals.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
