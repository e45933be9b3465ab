//! Mamdani inference: fuzzify, fire, aggregate, defuzzify.
//!
//! Every step is a pure function of the crisp inputs and the definitions
//! captured at construction. Consequent memberships are sampled over their
//! universes once, up front, so a cycle only does min/max passes and one
//! weighted sum per output.

use log::{debug, info};
use slotmap::SecondaryMap;

use crate::error::{ConfigError, Error, NoRuleFired, Result};
use crate::fuzzy::defuzz::DefuzzMethod;
use crate::fuzzy::rules::RuleBase;
use crate::fuzzy::variable::{Role, TermRef, VariableKey, VariableRegistry};

/// Read-only fuzzy system: variables, rules and the defuzzification method.
#[derive(Debug, Clone)]
pub struct InferenceEngine {
    registry: VariableRegistry,
    rules: RuleBase,
    method: DefuzzMethod,
    /// Consequent term memberships over each universe, term-major.
    sampled: SecondaryMap<VariableKey, Vec<Vec<f64>>>,
    /// Antecedents referenced by at least one rule, in registration order.
    required: Vec<VariableKey>,
}

impl InferenceEngine {
    pub fn new(registry: VariableRegistry, rules: RuleBase) -> core::result::Result<Self, ConfigError> {
        for rule in rules.rules() {
            for t in rule.antecedents() {
                check_ref(&registry, *t, Role::Antecedent)?;
            }
            for t in rule.consequents() {
                check_ref(&registry, *t, Role::Consequent)?;
            }
        }

        let mut sampled = SecondaryMap::new();
        for (key, var) in registry.with_role(Role::Consequent) {
            sampled.insert(key, var.sample_terms());
        }

        let required = registry
            .with_role(Role::Antecedent)
            .map(|(k, _)| k)
            .filter(|k| {
                rules
                    .rules()
                    .iter()
                    .any(|r| r.antecedents().iter().any(|t| t.variable == *k))
            })
            .collect();

        info!(
            "Inference engine ready: {} variables, {} rules",
            registry.len(),
            rules.len()
        );

        Ok(Self {
            registry,
            rules,
            method: DefuzzMethod::default(),
            sampled,
            required,
        })
    }

    /// Replace the defuzzification method (centroid by default).
    pub fn with_defuzzification(mut self, method: DefuzzMethod) -> Self {
        self.method = method;
        self
    }

    pub fn defuzzification(&self) -> DefuzzMethod {
        self.method
    }

    pub fn registry(&self) -> &VariableRegistry {
        &self.registry
    }

    pub fn rules(&self) -> &RuleBase {
        &self.rules
    }

    /// Membership of every antecedent term at the (clamped) crisp input.
    ///
    /// Inputs beyond the sampled universe are clamped to its edge points.
    pub fn fuzzify(&self, inputs: &SecondaryMap<VariableKey, f64>) -> Result<Fuzzified> {
        let mut degrees = SecondaryMap::new();

        for (key, var) in self.registry.with_role(Role::Antecedent) {
            let Some(&raw) = inputs.get(key) else {
                if self.required.contains(&key) {
                    return Err(Error::MissingInput(var.name().to_owned()));
                }
                continue;
            };
            let x = var.universe().clamp(raw);
            let row = var.terms().iter().map(|t| t.shape().degree(x)).collect();
            degrees.insert(key, row);
        }

        Ok(Fuzzified(degrees))
    }

    /// Firing strength of every rule, in rule-base order.
    pub fn fire(&self, fuzzified: &Fuzzified) -> Vec<f64> {
        self.rules
            .rules()
            .iter()
            .map(|rule| rule.firing_strength(|t| fuzzified.degree(t)))
            .collect()
    }

    /// Max-aggregate rule activations per consequent term, then clip each
    /// term's sampled membership and take the pointwise maximum.
    pub fn aggregate(&self, firing: &[f64]) -> SecondaryMap<VariableKey, OutputSet> {
        let mut out = SecondaryMap::new();

        for (key, var) in self.registry.with_role(Role::Consequent) {
            out.insert(
                key,
                OutputSet {
                    activations: vec![0.0; var.terms().len()],
                    membership: vec![0.0; var.universe().len()],
                },
            );
        }

        for (rule, &strength) in self.rules.rules().iter().zip(firing) {
            for t in rule.consequents() {
                let set = &mut out[t.variable];
                set.activations[t.term] = set.activations[t.term].max(strength);
            }
        }

        for (key, set) in &mut out {
            let terms = &self.sampled[key];
            for (term, &level) in terms.iter().zip(&set.activations) {
                if level <= 0.0 {
                    continue;
                }
                for (agg, &mu) in set.membership.iter_mut().zip(term) {
                    *agg = agg.max(mu.min(level));
                }
            }
        }

        out
    }

    /// Crisp value of one aggregated output, `None` if nothing fired.
    pub fn defuzzify(&self, key: VariableKey, set: &OutputSet) -> Option<f64> {
        let var = self.registry.get(key)?;
        self.method.apply(var.universe().points(), &set.membership)
    }

    /// Run a full cycle and keep every intermediate result.
    pub fn infer(&self, inputs: &SecondaryMap<VariableKey, f64>) -> Result<Inference> {
        let fuzzified = self.fuzzify(inputs)?;
        let firing = self.fire(&fuzzified);
        let outputs = self.aggregate(&firing);

        let mut crisp = SecondaryMap::new();
        for (key, set) in &outputs {
            crisp.insert(key, self.defuzzify(key, set));
        }

        debug!(
            "Inference: {}/{} rules fired",
            firing.iter().filter(|&&s| s > 0.0).count(),
            firing.len()
        );

        Ok(Inference {
            crisp,
            trace: InferenceTrace {
                fuzzified,
                firing,
                outputs,
            },
        })
    }

    /// Crisp outputs only; an output with an empty aggregate is an error.
    pub fn evaluate(&self, inputs: &SecondaryMap<VariableKey, f64>) -> Result<SecondaryMap<VariableKey, f64>> {
        let inference = self.infer(inputs)?;
        let unfired = inference.unfired(&self.registry);
        if !unfired.is_empty() {
            return Err(NoRuleFired { outputs: unfired }.into());
        }
        Ok(inference
            .crisp
            .iter()
            .filter_map(|(k, v)| v.map(|v| (k, v)))
            .collect())
    }
}

fn check_ref(registry: &VariableRegistry, t: TermRef, role: Role) -> core::result::Result<(), ConfigError> {
    let var = registry
        .get(t.variable)
        .ok_or_else(|| ConfigError::UnknownVariable(format!("{:?}", t.variable)))?;
    if var.role() != role {
        return Err(ConfigError::RoleMismatch {
            variable: var.name().to_owned(),
        });
    }
    if t.term >= var.terms().len() {
        return Err(ConfigError::UnknownTerm {
            variable: var.name().to_owned(),
            term: format!("#{}", t.term),
        });
    }
    Ok(())
}

/// Per-term membership degrees of the crisp inputs.
#[derive(Debug, Clone, Default)]
pub struct Fuzzified(SecondaryMap<VariableKey, Vec<f64>>);

impl Fuzzified {
    /// Degree of one antecedent term; 0 for an input that was not supplied.
    pub fn degree(&self, t: TermRef) -> f64 {
        self.0
            .get(t.variable)
            .and_then(|row| row.get(t.term))
            .copied()
            .unwrap_or(0.0)
    }
}

/// Aggregated fuzzy set of one output variable.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputSet {
    /// Clip level of each term: max firing strength of the rules asserting it.
    pub activations: Vec<f64>,
    /// Aggregate membership at each universe point.
    pub membership: Vec<f64>,
}

/// Intermediate results of one cycle.
#[derive(Debug, Clone)]
pub struct InferenceTrace {
    pub fuzzified: Fuzzified,
    /// Firing strengths in rule-base order.
    pub firing: Vec<f64>,
    pub outputs: SecondaryMap<VariableKey, OutputSet>,
}

#[derive(Debug, Clone)]
pub struct Inference {
    crisp: SecondaryMap<VariableKey, Option<f64>>,
    trace: InferenceTrace,
}

impl Inference {
    pub fn crisp(&self, key: VariableKey) -> Option<f64> {
        self.crisp.get(key).copied().flatten()
    }

    pub fn trace(&self) -> &InferenceTrace {
        &self.trace
    }

    pub fn into_trace(self) -> InferenceTrace {
        self.trace
    }

    /// Names of the outputs whose aggregate was empty.
    pub fn unfired(&self, registry: &VariableRegistry) -> Vec<String> {
        registry
            .with_role(Role::Consequent)
            .filter(|(k, _)| self.crisp(*k).is_none())
            .map(|(_, v)| v.name().to_owned())
            .collect()
    }
}
