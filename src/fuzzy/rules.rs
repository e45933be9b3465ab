//! Rule base: conjunctive IF/THEN rules over registered variables.
//!
//! Rules are resolved against a [`VariableRegistry`] when they are built,
//! so an unknown variable or term is a startup error and inference never
//! has to look anything up by name.

use std::fmt;

use crate::error::ConfigError;
use crate::fuzzy::variable::{Role, TermRef, VariableRegistry};

/// `IF a1 AND a2 AND ... THEN c1, c2, ...`
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    antecedents: Vec<TermRef>,
    consequents: Vec<TermRef>,
}

impl Rule {
    /// Build a rule from `(variable, term)` name pairs.
    pub fn new(
        registry: &VariableRegistry,
        when: &[(&str, &str)],
        then: &[(&str, &str)],
    ) -> Result<Self, ConfigError> {
        if when.is_empty() || then.is_empty() {
            return Err(ConfigError::EmptyRule);
        }
        let antecedents = when
            .iter()
            .map(|(v, t)| registry.resolve(v, t, Role::Antecedent))
            .collect::<Result<Vec<_>, _>>()?;
        let consequents = then
            .iter()
            .map(|(v, t)| registry.resolve(v, t, Role::Consequent))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            antecedents,
            consequents,
        })
    }

    pub fn antecedents(&self) -> &[TermRef] {
        &self.antecedents
    }

    pub fn consequents(&self) -> &[TermRef] {
        &self.consequents
    }

    /// Minimum T-norm over the antecedent degrees.
    ///
    /// `degree` maps a resolved term to its fuzzified membership.
    pub fn firing_strength(&self, degree: impl Fn(TermRef) -> f64) -> f64 {
        self.antecedents
            .iter()
            .map(|&t| degree(t))
            .fold(1.0, f64::min)
    }

    /// Human-readable form, e.g. `Temperature[Cold] & Pressure[Low] => Heater[Heat]`.
    pub fn describe<'r>(&'r self, registry: &'r VariableRegistry) -> RuleDisplay<'r> {
        RuleDisplay { rule: self, registry }
    }
}

pub struct RuleDisplay<'r> {
    rule: &'r Rule,
    registry: &'r VariableRegistry,
}

impl fmt::Display for RuleDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // a registry other than the one the rule was built against may
        // lack the variable or the term
        let name = |t: &TermRef| match self.registry.get(t.variable) {
            Some(v) => {
                let term = v.terms().get(t.term).map_or("?", |term| term.name());
                format!("{}[{}]", v.name(), term)
            }
            None => "?".to_owned(),
        };
        let when: Vec<_> = self.rule.antecedents.iter().map(name).collect();
        let then: Vec<_> = self.rule.consequents.iter().map(name).collect();
        write!(f, "{} => {}", when.join(" & "), then.join(", "))
    }
}

/// Ordered rules. Order never changes the inference result; it fixes the
/// order of firing strengths in diagnostic traces.
#[derive(Debug, Clone, Default)]
pub struct RuleBase(Vec<Rule>);

impl RuleBase {
    pub fn new() -> Self {
        RuleBase(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        RuleBase(Vec::with_capacity(capacity))
    }

    pub fn push(&mut self, rule: Rule) {
        self.0.push(rule);
    }

    /// Resolve and append in one step.
    pub fn add(
        &mut self,
        registry: &VariableRegistry,
        when: &[(&str, &str)],
        then: &[(&str, &str)],
    ) -> Result<(), ConfigError> {
        self.0.push(Rule::new(registry, when, then)?);
        Ok(())
    }

    pub fn rules(&self) -> &[Rule] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
