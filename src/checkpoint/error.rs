//! Errors raised while saving or restoring a camera checkpoint.

use thiserror::Error;

/// Why a camera snapshot could not be saved or restored.
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// The camera snapshot could not be encoded as JSON or bincode
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// The input is not a camera snapshot in either encoding
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// The snapshot was saved by a different checkpoint format
    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Camera state, history and capture counters disagree; one message
    /// per problem found
    #[error("Checkpoint validation failed: {}", .0.join("; "))]
    ValidationFailed(Vec<String>),
}
