//! Automated room temperature control.
//!
//! A Mamdani fuzzy controller over temperature, pressure and humidity
//! drives heater and chiller duty. The [`fuzzy`] engine is generic;
//! [`control`] holds the room knowledge base, and [`app`] the polling
//! service behind port traits.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod control;
pub mod error;
pub mod fuzzy;

pub use error::{ConfigError, Error, NoRuleFired, Result};
