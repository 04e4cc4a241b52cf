//! Error types for tally-history.

use tally_core::errors::CoreError;
use thiserror::Error;

/// Failure of a single `undo`/`redo` execution.
///
/// The stack or audit entry that owned the action is left where it was.
#[derive(Debug, Error)]
pub enum ActionError {
    /// The record the action targets is no longer in its collection.
    #[error("{entity_type} {id} is no longer present")]
    MissingRecord { entity_type: String, id: String },

    /// A snapshot could not be applied to its collection.
    #[error("Snapshot for {entity_type} was rejected")]
    RejectedSnapshot { entity_type: String },

    /// Record or field level failure.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Free-form failure raised by a caller-supplied closure.
    #[error("{0}")]
    Failed(String),
}

/// Errors from history, audit, and document store operations.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// No audit event with this ID is retained.
    #[error("Audit event not found: {0}")]
    EventNotFound(String),

    /// The event is a meta-event, already undone, or has no live action.
    #[error("Audit event cannot be undone: {0}")]
    NotUndoable(String),

    /// The event is a meta-event, not undone, or has no live action.
    #[error("Audit event cannot be redone: {0}")]
    NotRedoable(String),

    /// Executing the action failed.
    #[error("Action failed: {0}")]
    Action(#[from] ActionError),

    /// Record or snapshot failure while building an action.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Document file could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Document JSON could not be encoded or decoded.
    #[error("Document format error: {0}")]
    Format(#[from] serde_json::Error),
}
