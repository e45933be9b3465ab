//! Mock hardware adapter for integration tests.
//!
//! Serves a scripted sequence of sensor snapshots and records every
//! actuator call so tests can assert on the full command history.

use std::collections::VecDeque;

use artc::app::events::AppEvent;
use artc::app::ports::{ActuatorPort, EventSink, SensorPort, SensorSnapshot};

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorCall {
    SetHeater(u8),
    SetChiller(u8),
    AllOff,
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    script: VecDeque<SensorSnapshot>,
    last: SensorSnapshot,
    pub reads: usize,
    pub calls: Vec<ActuatorCall>,
}

#[allow(dead_code)]
impl MockHardware {
    /// Serves `snapshots` in order, then keeps repeating the last one.
    pub fn new(snapshots: impl IntoIterator<Item = SensorSnapshot>) -> Self {
        Self {
            script: snapshots.into_iter().collect(),
            last: SensorSnapshot::default(),
            reads: 0,
            calls: Vec::new(),
        }
    }

    pub fn constant(temperature_c: f64, pressure_hpa: f64, humidity_percent: Option<f64>) -> Self {
        Self::new([SensorSnapshot {
            temperature_c,
            pressure_hpa,
            humidity_percent,
        }])
    }

    pub fn last_call(&self) -> Option<&ActuatorCall> {
        self.calls.last()
    }

    pub fn heater(&self) -> u8 {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::SetHeater(d) => Some(*d),
                ActuatorCall::AllOff => Some(0),
                ActuatorCall::SetChiller(_) => None,
            })
            .unwrap_or(0)
    }

    pub fn chiller(&self) -> u8 {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::SetChiller(d) => Some(*d),
                ActuatorCall::AllOff => Some(0),
                ActuatorCall::SetHeater(_) => None,
            })
            .unwrap_or(0)
    }
}

impl SensorPort for MockHardware {
    fn read_all(&mut self) -> SensorSnapshot {
        self.reads += 1;
        if let Some(next) = self.script.pop_front() {
            self.last = next;
        }
        self.last
    }
}

impl ActuatorPort for MockHardware {
    fn set_heater(&mut self, duty: u8) {
        self.calls.push(ActuatorCall::SetHeater(duty));
    }

    fn set_chiller(&mut self, duty: u8) {
        self.calls.push(ActuatorCall::SetChiller(duty));
    }

    fn all_off(&mut self) {
        self.calls.push(ActuatorCall::AllOff);
    }
}

// ── Recording event sink ──────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn telemetry(&self) -> impl Iterator<Item = &artc::app::events::TelemetryData> {
        self.events.iter().filter_map(|e| match e {
            AppEvent::Telemetry(t) => Some(t),
            _ => None,
        })
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
