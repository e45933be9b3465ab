//! Climate controller: one inference cycle from readings to duty.
//!
//! Wraps a [`Simulation`] over the room knowledge base. Outputs come back
//! in `[0, 1)`; potency is `round(output, decimals) * 100`.

use std::sync::Arc;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::control::knowledge::{self, CHILLER, HEATER, HUMIDITY, PRESSURE, TEMPERATURE};
use crate::error::{ConfigError, Error, NoRuleFired, Result};
use crate::fuzzy::{DefuzzMethod, InferenceEngine, Simulation};

/// Crisp sensor readings for one cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub temperature_c: f64,
    pub pressure_hpa: f64,
    pub humidity_percent: f64,
}

impl Reading {
    /// Round every field to `decimals` places, as the sensor loop reports them.
    pub fn rounded(&self, decimals: usize) -> Self {
        Self {
            temperature_c: round_to(self.temperature_c, decimals),
            pressure_hpa: round_to(self.pressure_hpa, decimals),
            humidity_percent: round_to(self.humidity_percent, decimals),
        }
    }
}

/// Heater and chiller potency in percent (0–100).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Potency {
    pub heater_percent: f64,
    pub chiller_percent: f64,
}

impl Potency {
    /// Integer duty for the actuators, clamped to 0–100.
    pub fn heater_duty(&self) -> u8 {
        duty(self.heater_percent)
    }

    pub fn chiller_duty(&self) -> u8 {
        duty(self.chiller_percent)
    }
}

fn duty(percent: f64) -> u8 {
    if percent.is_nan() {
        return 0;
    }
    percent.round().clamp(0.0, 100.0) as u8
}

/// What to do with an output for which no rule fired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Keep the last computed value (0 if there is none yet).
    #[default]
    HoldLast,
    /// Drive the output to 0.
    Off,
}

pub struct ClimateController {
    sim: Simulation,
    potency_decimals: usize,
}

impl ClimateController {
    /// Build the room knowledge base with the given defuzzification method.
    pub fn new(method: DefuzzMethod, potency_decimals: usize) -> core::result::Result<Self, ConfigError> {
        let engine = knowledge::build_engine()?.with_defuzzification(method);
        Ok(Self::with_engine(Arc::new(engine), potency_decimals))
    }

    /// Share an already-built engine (its variables must match the room model).
    pub fn with_engine(engine: Arc<InferenceEngine>, potency_decimals: usize) -> Self {
        Self {
            sim: Simulation::new(engine),
            potency_decimals,
        }
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn set_potency_decimals(&mut self, decimals: usize) {
        self.potency_decimals = decimals;
    }

    /// Swap the defuzzification method, keeping the engine's variables and
    /// rules. Held inputs and outputs are dropped.
    pub fn set_defuzzification(&mut self, method: DefuzzMethod) {
        let engine = self.sim.engine().clone().with_defuzzification(method);
        self.sim = Simulation::new(Arc::new(engine));
    }

    /// Feed one reading through the engine and return the new potency.
    pub fn compute(&mut self, reading: &Reading) -> Result<Potency> {
        self.sim.set_input(TEMPERATURE, reading.temperature_c)?;
        self.sim.set_input(PRESSURE, reading.pressure_hpa)?;
        self.sim.set_input(HUMIDITY, reading.humidity_percent)?;

        self.sim.compute()?;

        let potency = self.potency()?;
        debug!(
            "Cycle: T={:.2} P={:.2} H={:.2} -> heater={}% chiller={}%",
            reading.temperature_c,
            reading.pressure_hpa,
            reading.humidity_percent,
            potency.heater_percent,
            potency.chiller_percent
        );
        Ok(potency)
    }

    /// Apply `policy` to the outputs named in `fault` and return the
    /// resulting potency.
    pub fn apply_fallback(&mut self, policy: FallbackPolicy, fault: &NoRuleFired) -> Result<Potency> {
        for name in &fault.outputs {
            let held = match self.sim.get_output(name) {
                Ok(v) => Some(v),
                Err(Error::OutputUnavailable(_)) => None,
                Err(e) => return Err(e),
            };
            let value = match policy {
                FallbackPolicy::HoldLast => held.unwrap_or(0.0),
                FallbackPolicy::Off => 0.0,
            };
            warn!("Fallback {:?}: {} = {}", policy, name, value);
            self.sim.set_output(name, value)?;
        }
        self.potency()
    }

    /// Potency from the outputs currently held by the simulation.
    pub fn potency(&self) -> Result<Potency> {
        Ok(Potency {
            heater_percent: to_percent(self.sim.get_output(HEATER)?, self.potency_decimals),
            chiller_percent: to_percent(self.sim.get_output(CHILLER)?, self.potency_decimals),
        })
    }
}

/// Round to `decimals` places using the exact binary value, so 0.495
/// (stored as 0.49499…) rounds to 0.49.
pub fn round_to(value: f64, decimals: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{value:.decimals$}").parse().unwrap_or(value)
}

/// `round(output, decimals) * 100`
pub fn to_percent(output: f64, decimals: usize) -> f64 {
    round_to(output, decimals) * 100.0
}
