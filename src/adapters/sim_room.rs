//! Simulated room adapter.
//!
//! Implements [`SensorPort`] and [`ActuatorPort`] in memory. Readings are
//! fixed unless a drift is configured, in which case every poll moves the
//! temperature by `drift * (heater - chiller) / 100` °C.

use log::debug;

use crate::app::ports::{ActuatorPort, SensorPort, SensorSnapshot};

#[derive(Debug, Clone, Default)]
pub struct SimulatedRoom {
    snapshot: SensorSnapshot,
    heater: u8,
    chiller: u8,
    drift_c: f64,
    /// `(heater, chiller)` duty after every actuator write.
    history: Vec<(u8, u8)>,
}

impl SimulatedRoom {
    pub fn new(temperature_c: f64, pressure_hpa: f64, humidity_percent: Option<f64>) -> Self {
        Self {
            snapshot: SensorSnapshot {
                temperature_c,
                pressure_hpa,
                humidity_percent,
            },
            ..Self::default()
        }
    }

    /// °C gained per poll at full heater duty (lost at full chiller duty).
    pub fn with_drift(mut self, drift_c: f64) -> Self {
        self.drift_c = drift_c;
        self
    }

    pub fn snapshot(&self) -> SensorSnapshot {
        self.snapshot
    }

    pub fn set_snapshot(&mut self, snapshot: SensorSnapshot) {
        self.snapshot = snapshot;
    }

    pub fn heater(&self) -> u8 {
        self.heater
    }

    pub fn chiller(&self) -> u8 {
        self.chiller
    }

    pub fn history(&self) -> &[(u8, u8)] {
        &self.history
    }

    fn record(&mut self) {
        self.history.push((self.heater, self.chiller));
    }
}

impl SensorPort for SimulatedRoom {
    fn read_all(&mut self) -> SensorSnapshot {
        if self.drift_c != 0.0 {
            let net = f64::from(self.heater) - f64::from(self.chiller);
            self.snapshot.temperature_c += self.drift_c * net / 100.0;
            debug!("Simulated room now {:.2} *C", self.snapshot.temperature_c);
        }
        self.snapshot
    }
}

impl ActuatorPort for SimulatedRoom {
    fn set_heater(&mut self, duty: u8) {
        self.heater = duty.min(100);
        self.record();
    }

    fn set_chiller(&mut self, duty: u8) {
        self.chiller = duty.min(100);
        self.record();
    }

    fn all_off(&mut self) {
        self.heater = 0;
        self.chiller = 0;
        self.record();
    }
}
