//! Error taxonomy.
//!
//! Every `SimError` is recoverable: the engine turns it into a HUD message
//! and keeps ticking.

use std::fmt;

use crate::enums::PlacementViolation;

/// Recoverable gameplay errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// Purchase attempted with a balance below the cost.
    InsufficientFunds { cost: u32, balance: u32 },
    /// Geometry or cap violation at placement commit time.
    InvalidPlacement(PlacementViolation),
    /// A lookup found nothing to act on (e.g. no wall in repair reach).
    NoTarget,
    /// Gameplay action attempted while no run is active.
    SessionNotRunning,
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InsufficientFunds { .. } => write!(f, "Not enough gems"),
            SimError::InvalidPlacement(PlacementViolation::TurretCapReached) => {
                write!(f, "Turret cap reached")
            }
            SimError::InvalidPlacement(_) => write!(f, "Invalid placement"),
            SimError::NoTarget => write!(f, "Nothing in reach"),
            SimError::SessionNotRunning => write!(f, "Press Start to begin"),
        }
    }
}

impl std::error::Error for SimError {}

/// Configuration loading errors.
#[derive(Debug)]
pub enum ConfigError {
    Parse(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "failed to parse config: {e}"),
            ConfigError::Invalid(reason) => write!(f, "invalid config: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}
