//! Simulation façade: named inputs in, named crisp outputs out.
//!
//! A [`Simulation`] is created once and reused every cycle. The engine
//! behind it is shared read-only; the simulation only owns the current
//! input snapshot, the last crisp outputs and the last trace.

use std::sync::Arc;

use log::warn;
use slotmap::SecondaryMap;

use crate::error::{Error, NoRuleFired, Result};
use crate::fuzzy::inference::{InferenceEngine, InferenceTrace};
use crate::fuzzy::variable::{Role, VariableKey};

#[derive(Debug, Clone)]
pub struct Simulation {
    engine: Arc<InferenceEngine>,
    inputs: SecondaryMap<VariableKey, f64>,
    outputs: SecondaryMap<VariableKey, f64>,
    trace: Option<InferenceTrace>,
}

impl Simulation {
    pub fn new(engine: Arc<InferenceEngine>) -> Self {
        Self {
            engine,
            inputs: SecondaryMap::new(),
            outputs: SecondaryMap::new(),
            trace: None,
        }
    }

    pub fn engine(&self) -> &InferenceEngine {
        &self.engine
    }

    /// Assign a crisp value to an antecedent.
    ///
    /// NaN and infinities are rejected; only finite values are clamped
    /// into the universe.
    pub fn set_input(&mut self, name: &str, value: f64) -> Result<()> {
        let key = self.key(name, Role::Antecedent)?;
        if !value.is_finite() {
            return Err(Error::NonFiniteInput {
                variable: name.to_owned(),
                value,
            });
        }
        self.inputs.insert(key, value);
        Ok(())
    }

    pub fn input(&self, name: &str) -> Result<Option<f64>> {
        let key = self.key(name, Role::Antecedent)?;
        Ok(self.inputs.get(key).copied())
    }

    /// Run one inference cycle over the current inputs.
    ///
    /// Outputs that received a centroid are overwritten. Outputs whose
    /// aggregate was empty keep their previous value and are named in the
    /// returned [`NoRuleFired`]; the caller decides what to do with them.
    pub fn compute(&mut self) -> Result<()> {
        let inference = self.engine.infer(&self.inputs)?;
        let registry = self.engine.registry();

        for (key, _) in registry.with_role(Role::Consequent) {
            if let Some(v) = inference.crisp(key) {
                self.outputs.insert(key, v);
            }
        }

        let unfired = inference.unfired(registry);
        self.trace = Some(inference.into_trace());

        if unfired.is_empty() {
            Ok(())
        } else {
            warn!("No rule fired for {:?}", unfired);
            Err(NoRuleFired { outputs: unfired }.into())
        }
    }

    /// Last crisp value of a consequent.
    pub fn get_output(&self, name: &str) -> Result<f64> {
        let key = self.key(name, Role::Consequent)?;
        self.outputs
            .get(key)
            .copied()
            .ok_or_else(|| Error::OutputUnavailable(name.to_owned()))
    }

    /// Overwrite a held output, e.g. when a fallback policy switches it off.
    pub fn set_output(&mut self, name: &str, value: f64) -> Result<()> {
        let key = self.key(name, Role::Consequent)?;
        self.outputs.insert(key, value);
        Ok(())
    }

    /// Trace of the most recent `compute`, if any ran past fuzzification.
    pub fn trace(&self) -> Option<&InferenceTrace> {
        self.trace.as_ref()
    }

    /// Fuzzified degree of `variable[term]` from the last cycle.
    pub fn term_degree(&self, variable: &str, term: &str) -> Result<Option<f64>> {
        let t = self
            .engine
            .registry()
            .resolve(variable, term, Role::Antecedent)
            .map_err(|_| Error::UnknownVariable(format!("{variable}[{term}]")))?;
        Ok(self.trace.as_ref().map(|tr| tr.fuzzified.degree(t)))
    }

    /// Clip level of `output[term]` from the last cycle.
    pub fn term_activation(&self, output: &str, term: &str) -> Result<Option<f64>> {
        let t = self
            .engine
            .registry()
            .resolve(output, term, Role::Consequent)
            .map_err(|_| Error::UnknownVariable(format!("{output}[{term}]")))?;
        Ok(self
            .trace
            .as_ref()
            .and_then(|tr| tr.outputs.get(t.variable))
            .map(|set| set.activations[t.term]))
    }

    fn key(&self, name: &str, role: Role) -> Result<VariableKey> {
        let registry = self.engine.registry();
        match registry.key(name) {
            Some(k) if registry.get(k).is_some_and(|v| v.role() == role) => Ok(k),
            _ => Err(Error::UnknownVariable(name.to_owned())),
        }
    }
}
