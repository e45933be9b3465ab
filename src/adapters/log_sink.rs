//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing the poll report through the `log`
//! facade. Each telemetry event becomes five report lines.

use log::{info, warn};

use crate::app::events::{AppEvent, TelemetryData};
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
pub struct LogEventSink {
    display_decimals: usize,
}

impl LogEventSink {
    /// `display_decimals` is the precision used for potency lines.
    pub fn new(display_decimals: usize) -> Self {
        Self { display_decimals }
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Render one poll as report lines: readings with two decimals, potency
/// with `display_decimals`.
pub fn report_lines(t: &TelemetryData, display_decimals: usize) -> [String; 5] {
    [
        format!("Temperature: {:.2} *C", t.reading.temperature_c),
        format!("Pressure: {:.2} hPa", t.reading.pressure_hpa),
        format!("Humidity: {:.2} %", t.reading.humidity_percent),
        format!(
            "Chiller Potency: {:.*} %",
            display_decimals, t.potency.chiller_percent
        ),
        format!(
            "Heater Potency: {:.*} %",
            display_decimals, t.potency.heater_percent
        ),
    ]
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => {
                for line in report_lines(t, self.display_decimals) {
                    info!("{}", line);
                }
            }
            AppEvent::NoRuleFired { outputs, fallback } => {
                warn!("NO RULE | {} | fallback={:?}", outputs.join(", "), fallback);
            }
            AppEvent::ConfigUpdated => {
                info!("CONFIG | updated");
            }
            AppEvent::Started => {
                info!("START | actuators off");
            }
        }
    }
}
