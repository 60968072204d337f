//! Error types for call sequencing

use scanner_core::{CallId, ScannerError};
use thiserror::Error;

/// Playback errors
///
/// The decision engine itself never fails; these cover the collaborator-facing
/// edges (merging fetched or pushed calls into the collection).
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// A call record was rejected before merge
    #[error("Rejected call: {0}")]
    Rejected(#[from] ScannerError),

    /// Same id arrived twice with different contents
    #[error("Conflicting record for call {0}")]
    ConflictingRecord(CallId),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
