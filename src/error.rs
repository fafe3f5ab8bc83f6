//! Error types for the wheel core.
//!
//! Misses that are not errors (a click off the wheel, a redistribution with
//! nobody to redistribute to) are reported as `None` or a silent no-op, never
//! through this type.

use std::fmt;

/// Errors returned by wheel operations.
#[derive(Debug, Clone, PartialEq)]
pub enum WheelError {
    /// Caller broke a precondition: non-positive total weight, a percentage
    /// outside [0, 100], an index out of range, an unknown id.
    InvalidInput(String),
    /// Operation not allowed in the current state: committing odds that do
    /// not sum to 100, spinning a wheel with fewer than two segments.
    InvalidState(String),
    /// Serialized data could not be decoded.
    Parse(String),
}

impl WheelError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }
}

impl fmt::Display for WheelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput(msg) => write!(f, "invalid input: {}", msg),
            Self::InvalidState(msg) => write!(f, "invalid state: {}", msg),
            Self::Parse(msg) => write!(f, "parse error: {}", msg),
        }
    }
}

impl std::error::Error for WheelError {}

impl From<serde_json::Error> for WheelError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, WheelError>;
