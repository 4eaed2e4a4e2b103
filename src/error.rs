use thiserror::Error;

use crate::id_generator::ComponentId;

/// Errors raised by the component manager and propagated through commands.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    /// No top-level component with this id exists
    #[error("component {0} not found")]
    NotFound(ComponentId),
    /// An index fell outside the component collection
    #[error("index {index} out of range (len {len})")]
    OutOfRange { index: usize, len: usize },
    /// Caller supplied an argument the operation cannot accept
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Internal state did not match what the operation expected
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

impl EditorError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }
}
