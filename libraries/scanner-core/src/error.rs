//! Core error types for Scanner Player
use thiserror::Error;

use crate::types::CallId;

/// Result type alias using `ScannerError`
pub type Result<T> = std::result::Result<T, ScannerError>;

/// Core error type for Scanner Player
#[derive(Error, Debug)]
pub enum ScannerError {
    /// A call record failed validation
    #[error("Invalid call {id}: {reason}")]
    InvalidCall {
        /// Offending call
        id: CallId,
        /// What is wrong with it
        reason: String,
    },

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ScannerError {
    /// Create an invalid call error
    pub fn invalid_call(id: CallId, reason: impl Into<String>) -> Self {
        Self::InvalidCall {
            id,
            reason: reason.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
