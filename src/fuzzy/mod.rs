//! Mamdani fuzzy inference.
//!
//! ```text
//!  crisp inputs ──▶ fuzzify ──▶ fire (min) ──▶ aggregate (max) ──▶ defuzzify ──▶ crisp outputs
//!                     ▲            ▲                ▲
//!              VariableRegistry  RuleBase     sampled consequents
//! ```
//!
//! Definitions are built once and are read-only afterwards; a
//! [`Simulation`] holds the per-cycle state.

pub mod defuzz;
pub mod inference;
pub mod membership;
pub mod rules;
pub mod simulation;
pub mod universe;
pub mod variable;

pub use defuzz::DefuzzMethod;
pub use inference::{Fuzzified, Inference, InferenceEngine, InferenceTrace, OutputSet};
pub use membership::MembershipFunction;
pub use rules::{Rule, RuleBase};
pub use simulation::Simulation;
pub use universe::Universe;
pub use variable::{LinguisticVariable, Role, Term, TermRef, VariableKey, VariableRegistry};
