//! # tally-history
//!
//! Undo/redo and audit history for Tally company documents.
//!
//! Two views over the same recorded actions:
//!
//! - [`HistoryStack`]: strict linear undo/redo with coalescing of rapid
//!   repeated edits and save-point dirty tracking.
//! - [`AuditLog`]: an append-only timeline persisted with the document,
//!   supporting selective undo/redo of any past event. Events loaded from an
//!   earlier session get their actions rebuilt through the
//!   [`EntityLocator`] where enough data survives.
//!
//! [`Journal`] owns both for one open document and fans out [`Notice`]s to
//! subscribers. Everything here is single-threaded: actions are shared with
//! `Rc` and the context type is mutated through `&mut`.

pub mod action;
pub mod audit;
pub mod coalesce;
pub mod error;
pub mod journal;
pub mod locator;
pub mod stack;
pub mod store;

pub use action::Action;
pub use audit::{AuditFilter, AuditLog};
pub use coalesce::CoalescePolicy;
pub use error::{ActionError, HistoryError};
pub use journal::{Journal, Notice};
pub use locator::{CollectionStore, EntityLocator, EntityStore, RecordView};
pub use stack::{HistoryStack, RecordOutcome};
pub use store::{DocumentStore, export_trail, read_trail};
