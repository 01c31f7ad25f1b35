//! Core error types for puppy-core.
//!
//! Expected-flow refusals (a gated activity, a spent reset) are ordinary
//! `Err` values the host branches on; nothing in here is fatal.

use std::path::PathBuf;
use thiserror::Error;

use serde::{Deserialize, Serialize};

use crate::activity::Activity;
use crate::gauge::Resource;

/// Core error type for puppy-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A requested activity was refused
    #[error("Transition refused: {0}")]
    Transition(#[from] TransitionError),

    /// A reset was refused
    #[error("Reset refused: {0}")]
    Reset(#[from] ResetError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Unknown activity name from a host
    #[error(transparent)]
    ParseActivity(#[from] ParseActivityError),

    /// Out-of-range gauge value
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Why `request_activity` refused a target.
///
/// The whole transition is aborted when this is returned: mood, energy,
/// activity and sleep timing are exactly as they were before the call.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionError {
    #[error("not enough {resource} to {requested}")]
    InsufficientResource {
        requested: Activity,
        resource: Resource,
    },
}

impl TransitionError {
    pub fn resource(&self) -> Resource {
        match self {
            TransitionError::InsufficientResource { resource, .. } => *resource,
        }
    }

    /// Short warning the pet shows over its sprite.
    pub fn warning(&self) -> &'static str {
        match self {
            TransitionError::InsufficientResource {
                requested: Activity::Study,
                resource: Resource::Mood,
            } => "Don't have enough mood",
            TransitionError::InsufficientResource {
                requested: Activity::Study,
                resource: Resource::Energy,
            } => "Don't have enough energy",
            TransitionError::InsufficientResource {
                resource: Resource::Energy,
                ..
            } => "Energy too low!",
            TransitionError::InsufficientResource {
                resource: Resource::Mood,
                ..
            } => "Mood too low!",
        }
    }
}

/// Why `request_reset` refused.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResetError {
    #[error("No chance to reset... Just enjoy your day!")]
    Exhausted,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// No usable configuration directory
    #[error("Could not resolve configuration directory: {0}")]
    NoDataDir(String),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("gauge value {value} is outside 0..={max}")]
    GaugeOutOfRange {
        value: u8,
        max: u8,
    },

    #[error("hour must be 0-23, got {0}")]
    HourOutOfRange(u32),
}

/// A host passed an activity name that is not one of the five.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown activity '{0}' (expected study, guitar, game, sleep or idle)")]
pub struct ParseActivityError(pub String);

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warnings_match_gate() {
        let mood = TransitionError::InsufficientResource {
            requested: Activity::Study,
            resource: Resource::Mood,
        };
        let energy = TransitionError::InsufficientResource {
            requested: Activity::Study,
            resource: Resource::Energy,
        };
        let guitar = TransitionError::InsufficientResource {
            requested: Activity::Guitar,
            resource: Resource::Energy,
        };
        assert_eq!(mood.warning(), "Don't have enough mood");
        assert_eq!(energy.warning(), "Don't have enough energy");
        assert_eq!(guitar.warning(), "Energy too low!");
        assert_eq!(guitar.resource(), Resource::Energy);
    }

    #[test]
    fn display_names_resource_and_target() {
        let err = TransitionError::InsufficientResource {
            requested: Activity::Game,
            resource: Resource::Energy,
        };
        assert_eq!(err.to_string(), "not enough energy to game");
    }

    #[test]
    fn core_error_wraps_config_errors_verbatim() {
        let err: CoreError = ConfigError::UnknownKey("petting.nope".into()).into();
        assert_eq!(
            err.to_string(),
            "Configuration error: Unknown configuration key: petting.nope"
        );
        let err: CoreError = ValidationError::HourOutOfRange(24).into();
        assert!(err.to_string().ends_with("hour must be 0-23, got 24"));
    }

    #[test]
    fn core_error_wraps_reset() {
        let err: CoreError = ResetError::Exhausted.into();
        assert!(err.to_string().contains("No chance to reset"));
    }
}
