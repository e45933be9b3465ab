//! Unified error types for the room temperature controller.
//!
//! Configuration problems are fatal and surface while the knowledge base
//! is being built. `NoRuleFired` is the one recoverable condition: the
//! caller picks a fallback (hold the last duty or switch off).

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the crate funnels into this type.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The fuzzy system or the runtime configuration is malformed.
    Config(ConfigError),
    /// `set_input` / `get_output` named a variable that is not registered
    /// in the role the call expects.
    UnknownVariable(String),
    /// `compute` was called before this antecedent received a value.
    MissingInput(String),
    /// A reading was NaN or infinite; a failed sensor, never a temperature.
    NonFiniteInput { variable: String, value: f64 },
    /// The output has never been produced by a successful inference.
    OutputUnavailable(String),
    /// No rule fired for one or more outputs; there is no centroid.
    NoRuleFired(NoRuleFired),
}

impl Error {
    /// True for the recoverable no-rule-fired condition.
    pub fn is_no_rule_fired(&self) -> bool {
        matches!(self, Self::NoRuleFired(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::UnknownVariable(name) => write!(f, "unknown variable '{name}'"),
            Self::MissingInput(name) => write!(f, "no value set for input '{name}'"),
            Self::NonFiniteInput { variable, value } => {
                write!(f, "input '{variable}' is not a finite number ({value})")
            }
            Self::OutputUnavailable(name) => write!(f, "output '{name}' has not been computed"),
            Self::NoRuleFired(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Universe bounds are not finite, `max <= min`, or `step <= 0`.
    InvalidUniverse { min: f64, max: f64, step: f64 },
    /// Membership breakpoints must be non-decreasing.
    NonMonotonic { breakpoints: Vec<f64> },
    /// A breakpoint is NaN or infinite.
    NonFinite,
    /// A variable with this name is already registered.
    DuplicateVariable(String),
    /// The variable already holds a term with this name.
    DuplicateTerm { variable: String, term: String },
    /// A rule referenced a variable the registry does not know.
    UnknownVariable(String),
    /// A rule referenced a term the variable does not define.
    UnknownTerm { variable: String, term: String },
    /// An antecedent was used as a consequent or vice versa.
    RoleMismatch { variable: String },
    /// A rule needs at least one antecedent and one consequent.
    EmptyRule,
    /// A runtime configuration field is out of range.
    Invalid(&'static str),
    /// The configuration document could not be decoded.
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidUniverse { min, max, step } => {
                write!(f, "invalid universe [{min}, {max}) step {step}")
            }
            Self::NonMonotonic { breakpoints } => {
                write!(f, "breakpoints {breakpoints:?} are not non-decreasing")
            }
            Self::NonFinite => write!(f, "breakpoint is not finite"),
            Self::DuplicateVariable(name) => write!(f, "variable '{name}' already registered"),
            Self::DuplicateTerm { variable, term } => {
                write!(f, "term '{term}' already defined on '{variable}'")
            }
            Self::UnknownVariable(name) => write!(f, "rule references unknown variable '{name}'"),
            Self::UnknownTerm { variable, term } => {
                write!(f, "rule references unknown term '{variable}[{term}]'")
            }
            Self::RoleMismatch { variable } => {
                write!(f, "variable '{variable}' used in the wrong rule position")
            }
            Self::EmptyRule => write!(f, "rule needs at least one antecedent and one consequent"),
            Self::Invalid(msg) => write!(f, "invalid setting: {msg}"),
            Self::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// No rule fired
// ---------------------------------------------------------------------------

/// All rule firing strengths were zero for these outputs, so their
/// aggregate fuzzy set is empty and has no centroid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoRuleFired {
    pub outputs: Vec<String>,
}

impl fmt::Display for NoRuleFired {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no rule fired for {}", self.outputs.join(", "))
    }
}

impl From<NoRuleFired> for Error {
    fn from(e: NoRuleFired) -> Self {
        Self::NoRuleFired(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
