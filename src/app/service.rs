//! Application service: the hexagonal core.
//!
//! [`AppService`] owns the climate controller and the live configuration.
//! All I/O flows through port traits injected at call sites, making the
//! entire service testable with mock adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                 │       AppService        │
//! ActuatorPort ◀──│  round · infer · duty   │
//!                 └────────────────────────┘
//! ```

use std::sync::Arc;

use log::{info, warn};

use crate::config::SystemConfig;
use crate::control::climate::ClimateController;
use crate::error::{ConfigError, Error, Result};
use crate::fuzzy::InferenceEngine;

use super::commands::AppCommand;
use super::events::{AppEvent, TelemetryData};
use super::ports::{ActuatorPort, EventSink, SensorPort};

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

pub struct AppService {
    config: SystemConfig,
    controller: ClimateController,
    tick_count: u64,
    last: Option<TelemetryData>,
}

impl AppService {
    /// Validate `config` and build the knowledge base.
    pub fn new(config: SystemConfig) -> core::result::Result<Self, ConfigError> {
        config.validate()?;
        let controller = ClimateController::new(config.defuzzification, config.potency_decimals)?;
        Ok(Self::with_controller(config, controller))
    }

    /// Run the service over a custom rule base. The engine must register
    /// the room's three antecedents and two consequents; its
    /// defuzzification method is replaced by the configured one.
    pub fn with_engine(
        config: SystemConfig,
        engine: Arc<InferenceEngine>,
    ) -> core::result::Result<Self, ConfigError> {
        config.validate()?;
        let mut controller = ClimateController::with_engine(engine, config.potency_decimals);
        if controller.simulation().engine().defuzzification() != config.defuzzification {
            controller.set_defuzzification(config.defuzzification);
        }
        Ok(Self::with_controller(config, controller))
    }

    fn with_controller(config: SystemConfig, controller: ClimateController) -> Self {
        Self {
            config,
            controller,
            tick_count: 0,
            last: None,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Put the actuators in a known state and announce the service.
    pub fn start(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        hw.all_off();
        sink.emit(&AppEvent::Started);
        info!(
            "AppService started (poll every {}s, {:?}, fallback {:?})",
            self.config.poll_interval_secs, self.config.defuzzification, self.config.no_rule_fallback
        );
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one poll: read sensors → round → infer → fallback → actuators.
    ///
    /// A NoRuleFired cycle is handled here with the configured fallback and
    /// still produces telemetry. Any other error switches the actuators
    /// off and is returned.
    pub fn tick(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        sink: &mut impl EventSink,
    ) -> Result<TelemetryData> {
        self.tick_count += 1;

        // 1. Read sensors via SensorPort
        let snapshot = hw.read_all();
        let reading = snapshot
            .to_reading(self.config.default_humidity_percent)
            .rounded(self.config.reading_decimals);

        // 2. Inference, with the NoRuleFired fallback
        let potency = match self.controller.compute(&reading) {
            Ok(p) => p,
            Err(Error::NoRuleFired(fault)) => {
                let fallback = self.config.no_rule_fallback;
                sink.emit(&AppEvent::NoRuleFired {
                    outputs: fault.outputs.clone(),
                    fallback,
                });
                match self.controller.apply_fallback(fallback, &fault) {
                    Ok(p) => p,
                    Err(e) => return Err(self.abort(hw, e)),
                }
            }
            Err(e) => return Err(self.abort(hw, e)),
        };

        // 3. Apply actuator commands via ActuatorPort
        let heater_duty = potency.heater_duty();
        let chiller_duty = potency.chiller_duty();
        hw.set_heater(heater_duty);
        hw.set_chiller(chiller_duty);

        // 4. Telemetry
        let telemetry = TelemetryData {
            tick: self.tick_count,
            reading,
            potency,
            heater_duty,
            chiller_duty,
        };
        sink.emit(&AppEvent::Telemetry(telemetry.clone()));
        self.last = Some(telemetry.clone());
        Ok(telemetry)
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an external command.
    pub fn handle_command(
        &mut self,
        cmd: AppCommand,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) -> core::result::Result<(), ConfigError> {
        match cmd {
            AppCommand::UpdateConfig(new_config) => {
                new_config.validate()?;
                if new_config.defuzzification != self.config.defuzzification {
                    // held outputs are dropped with the old method
                    self.controller
                        .set_defuzzification(new_config.defuzzification);
                }
                self.controller
                    .set_potency_decimals(new_config.potency_decimals);
                self.config = new_config;
                sink.emit(&AppEvent::ConfigUpdated);
                info!("Configuration updated at runtime");
            }
            AppCommand::SetFallback(policy) => {
                self.config.no_rule_fallback = policy;
                info!("NoRuleFired fallback set to {:?}", policy);
            }
            AppCommand::AllOff => {
                hw.all_off();
                info!("Actuators switched off on request");
            }
        }
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────

    /// Total polls executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    /// Telemetry of the last successful poll.
    pub fn last_telemetry(&self) -> Option<&TelemetryData> {
        self.last.as_ref()
    }

    pub fn controller(&self) -> &ClimateController {
        &self.controller
    }

    // ── Internal ──────────────────────────────────────────────

    fn abort(&self, hw: &mut impl ActuatorPort, e: Error) -> Error {
        warn!("Poll {} failed, actuators off: {}", self.tick_count, e);
        hw.all_off();
        e
    }
}
