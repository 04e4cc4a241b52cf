//! Cross-cutting error types for Tally.
//!
//! Errors specific to the history engine (`HistoryError`, `ActionError`) and to
//! configuration (`ConfigError`) live in their own crates. The CLI converges
//! everything on `anyhow`.

use thiserror::Error;

/// Errors that can be raised by record and snapshot operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// A field name that the record type does not expose for editing.
    #[error("Unknown field '{field}' on {entity_type}")]
    UnknownField { entity_type: String, field: String },

    /// A field value that does not deserialize into the field's type.
    #[error("Invalid value for {entity_type}.{field}: {reason}")]
    InvalidFieldValue {
        entity_type: String,
        field: String,
        reason: String,
    },

    /// A record could not be encoded to or decoded from a snapshot.
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// Data failed validation (format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),
}
