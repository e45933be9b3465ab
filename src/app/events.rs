//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.

use crate::control::climate::{FallbackPolicy, Potency, Reading};

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The service started and switched both actuators off.
    Started,

    /// One completed poll.
    Telemetry(TelemetryData),

    /// Outputs for which no rule fired, and the fallback applied to them.
    NoRuleFired {
        outputs: Vec<String>,
        fallback: FallbackPolicy,
    },

    /// A new configuration was accepted at runtime.
    ConfigUpdated,
}

/// A point-in-time snapshot of one poll.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryData {
    pub tick: u64,
    /// Readings as fed to the controller (rounded, humidity substituted).
    pub reading: Reading,
    pub potency: Potency,
    pub heater_duty: u8,
    pub chiller_duty: u8,
}
