//! Checkpoint error types.

use crate::machine::RecoveryError;
use thiserror::Error;

/// Errors that can occur while saving or restoring a checkpoint
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// Encoding to JSON or binary failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Decoding from JSON or binary failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Checkpoint does not match the definition it is restored into
    #[error("Checkpoint validation failed: {0}")]
    ValidationFailed(String),

    /// The recovery hook refused the entity
    #[error(transparent)]
    Recovery(#[from] RecoveryError),
}
