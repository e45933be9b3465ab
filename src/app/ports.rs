//! Port traits: the hexagonal boundary between the controller and the room.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (sensors, actuators, event sinks) implement these
//! traits. The [`AppService`](super::service::AppService) consumes them via
//! generics, so the domain core never touches hardware directly.

use crate::control::climate::Reading;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Raw sensor values for one poll. Humidity is `None` when no
/// humidity sensor is fitted.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SensorSnapshot {
    pub temperature_c: f64,
    pub pressure_hpa: f64,
    pub humidity_percent: Option<f64>,
}

impl SensorSnapshot {
    /// Crisp reading, substituting `default_humidity` for a missing sensor.
    pub fn to_reading(&self, default_humidity: f64) -> Reading {
        Reading {
            temperature_c: self.temperature_c,
            pressure_hpa: self.pressure_hpa,
            humidity_percent: self.humidity_percent.unwrap_or(default_humidity),
        }
    }
}

/// Read-side port: the domain calls this to obtain sensor data.
pub trait SensorPort {
    /// Read every sensor and return a unified snapshot.
    fn read_all(&mut self) -> SensorSnapshot;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command actuators.
pub trait ActuatorPort {
    /// Set heater duty (0–100).
    fn set_heater(&mut self, duty: u8);

    /// Set chiller duty (0–100).
    fn set_chiller(&mut self, duty: u8);

    /// Switch heater and chiller off.
    fn all_off(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
