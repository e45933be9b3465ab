//! Inbound commands to the application service.

use crate::config::SystemConfig;
use crate::control::climate::FallbackPolicy;

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone)]
pub enum AppCommand {
    /// Replace the live configuration. Validated before it takes effect.
    UpdateConfig(SystemConfig),

    /// Change only the NoRuleFired fallback.
    SetFallback(FallbackPolicy),

    /// Switch both actuators off until the next tick.
    AllOff,
}
