//! Linguistic variable registry.
//!
//! Variables live in a [`SlotMap`] and are addressed by [`VariableKey`];
//! a name index gives O(1) lookup by string. Each variable owns its
//! universe and an ordered set of named terms.

use std::collections::HashMap;

use slotmap::{SlotMap, new_key_type};

use crate::error::ConfigError;
use crate::fuzzy::membership::MembershipFunction;
use crate::fuzzy::universe::Universe;

new_key_type! {
    /// A variable key
    pub struct VariableKey;
}

/// Whether a variable is fed by crisp inputs or produced by inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Antecedent,
    Consequent,
}

/// A resolved `(variable, term)` pair. Cheap to copy, valid only for the
/// registry that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TermRef {
    pub variable: VariableKey,
    pub term: usize,
}

#[derive(Debug, Clone)]
pub struct Term {
    name: String,
    shape: MembershipFunction,
}

impl Term {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shape(&self) -> &MembershipFunction {
        &self.shape
    }
}

#[derive(Debug, Clone)]
pub struct LinguisticVariable {
    name: String,
    role: Role,
    universe: Universe,
    terms: Vec<Term>,
    index: HashMap<String, usize>,
}

impl LinguisticVariable {
    fn new(name: String, role: Role, universe: Universe) -> Self {
        Self {
            name,
            role,
            universe,
            terms: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    /// Terms in insertion order.
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn term_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn term(&self, name: &str) -> Option<&Term> {
        self.term_index(name).map(|i| &self.terms[i])
    }

    /// Membership of every term sampled over the universe, term-major.
    pub fn sample_terms(&self) -> Vec<Vec<f64>> {
        self.terms
            .iter()
            .map(|t| {
                self.universe
                    .points()
                    .iter()
                    .map(|&u| t.shape.degree(u))
                    .collect()
            })
            .collect()
    }

    fn add_term(&mut self, name: String, shape: MembershipFunction) -> Result<usize, ConfigError> {
        if self.index.contains_key(&name) {
            return Err(ConfigError::DuplicateTerm {
                variable: self.name.clone(),
                term: name,
            });
        }
        let i = self.terms.len();
        self.index.insert(name.clone(), i);
        self.terms.push(Term { name, shape });
        Ok(i)
    }
}

/// Owns every antecedent and consequent of one fuzzy system.
#[derive(Debug, Clone, Default)]
pub struct VariableRegistry {
    vars: SlotMap<VariableKey, LinguisticVariable>,
    by_name: HashMap<String, VariableKey>,
    order: Vec<VariableKey>,
}

impl VariableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        name: impl Into<String>,
        role: Role,
        universe: Universe,
    ) -> Result<VariableKey, ConfigError> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(ConfigError::DuplicateVariable(name));
        }
        let key = self
            .vars
            .insert(LinguisticVariable::new(name.clone(), role, universe));
        self.by_name.insert(name, key);
        self.order.push(key);
        Ok(key)
    }

    pub fn antecedent(&mut self, name: impl Into<String>, universe: Universe) -> Result<VariableKey, ConfigError> {
        self.register(name, Role::Antecedent, universe)
    }

    pub fn consequent(&mut self, name: impl Into<String>, universe: Universe) -> Result<VariableKey, ConfigError> {
        self.register(name, Role::Consequent, universe)
    }

    /// Attach a named shape to a variable. Term names are unique per variable.
    pub fn add_term(
        &mut self,
        variable: VariableKey,
        name: impl Into<String>,
        shape: MembershipFunction,
    ) -> Result<TermRef, ConfigError> {
        let var = self
            .vars
            .get_mut(variable)
            .ok_or_else(|| ConfigError::UnknownVariable(format!("{variable:?}")))?;
        let term = var.add_term(name.into(), shape)?;
        Ok(TermRef { variable, term })
    }

    pub fn key(&self, name: &str) -> Option<VariableKey> {
        self.by_name.get(name).copied()
    }

    pub fn get(&self, key: VariableKey) -> Option<&LinguisticVariable> {
        self.vars.get(key)
    }

    pub fn by_name(&self, name: &str) -> Option<&LinguisticVariable> {
        self.key(name).and_then(|k| self.vars.get(k))
    }

    /// Resolve `variable[term]` for a rule slot that expects `role`.
    pub fn resolve(&self, variable: &str, term: &str, role: Role) -> Result<TermRef, ConfigError> {
        let key = self
            .key(variable)
            .ok_or_else(|| ConfigError::UnknownVariable(variable.to_owned()))?;
        let var = &self.vars[key];
        if var.role != role {
            return Err(ConfigError::RoleMismatch {
                variable: variable.to_owned(),
            });
        }
        let term_index = var.term_index(term).ok_or_else(|| ConfigError::UnknownTerm {
            variable: variable.to_owned(),
            term: term.to_owned(),
        })?;
        Ok(TermRef {
            variable: key,
            term: term_index,
        })
    }

    /// Variables of one role in registration order.
    pub fn with_role(&self, role: Role) -> impl Iterator<Item = (VariableKey, &LinguisticVariable)> {
        self.order
            .iter()
            .map(|&k| (k, &self.vars[k]))
            .filter(move |(_, v)| v.role == role)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}
