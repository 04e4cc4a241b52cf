//! Linear undo/redo history.
//!
//! Two bounded stacks back Ctrl+Z / Ctrl+Y:
//!
//! ```text
//! record(a4)
//!   undo: [a1, a2, a3, a4]   redo: []
//! undo() x2
//!   undo: [a1, a2]           redo: [a4, a3]
//! record(a5)   <-- new edit, redo cleared
//!   undo: [a1, a2, a5]       redo: []
//! ```
//!
//! # Invariants
//!
//! 1. `undo_stack.len() <= max_depth` and `redo_stack.len() <= max_depth`.
//! 2. The redo stack is cleared whenever a new entry is pushed or merged.
//! 3. Nothing is recorded while an undo or redo is executing.
//! 4. A failed undo/redo leaves both stacks exactly as they were.
//!
//! Entries are shared as `Rc<Action<C>>` so the audit log can hold the same
//! action for selective undo. The save point stores a `Weak` to the action
//! that was on top when the document was saved; identity, not equality,
//! decides whether the document is dirty.

use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Instant;

use tally_config::HistoryConfig;

use crate::action::Action;
use crate::coalesce::CoalescePolicy;
use crate::error::ActionError;

/// Result of [`HistoryStack::record`].
pub enum RecordOutcome<C> {
    /// A new entry was pushed.
    Pushed(Rc<Action<C>>),
    /// The action merged into the existing top entry, returned here.
    Coalesced(Rc<Action<C>>),
    /// Recording was suppressed because an undo/redo is executing.
    Ignored,
}

impl<C> RecordOutcome<C> {
    #[must_use]
    pub const fn is_pushed(&self) -> bool {
        matches!(self, Self::Pushed(_))
    }

    #[must_use]
    pub const fn is_coalesced(&self) -> bool {
        matches!(self, Self::Coalesced(_))
    }
}

impl<C> fmt::Debug for RecordOutcome<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pushed(a) => f.debug_tuple("Pushed").field(a).finish(),
            Self::Coalesced(a) => f.debug_tuple("Coalesced").field(a).finish(),
            Self::Ignored => f.write_str("Ignored"),
        }
    }
}

enum SavePoint<C> {
    /// Saved with an empty undo stack.
    Empty,
    /// Saved with this action on top.
    At(Weak<Action<C>>),
    /// The saved state can no longer be reached by undo/redo.
    Unreachable,
}

/// Bounded undo/redo stacks with coalescing and save-point tracking.
pub struct HistoryStack<C> {
    undo_stack: VecDeque<Rc<Action<C>>>,
    redo_stack: VecDeque<Rc<Action<C>>>,
    max_depth: usize,
    policy: CoalescePolicy,
    last_record: Option<Instant>,
    save_point: SavePoint<C>,
    executing: bool,
}

impl<C> fmt::Debug for HistoryStack<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryStack")
            .field("undo_depth", &self.undo_stack.len())
            .field("redo_depth", &self.redo_stack.len())
            .field("max_depth", &self.max_depth)
            .field("window", &self.policy.window())
            .finish_non_exhaustive()
    }
}

impl<C> Default for HistoryStack<C> {
    fn default() -> Self {
        Self::new(&HistoryConfig::default())
    }
}

impl<C> HistoryStack<C> {
    #[must_use]
    pub fn new(config: &HistoryConfig) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: VecDeque::new(),
            max_depth: config.max_depth.max(1),
            policy: CoalescePolicy::from_config(config),
            last_record: None,
            save_point: SavePoint::Empty,
            executing: false,
        }
    }

    /// Record an action that has already been applied, stamped with now.
    pub fn record(&mut self, action: Action<C>) -> RecordOutcome<C> {
        self.record_at(action, Instant::now())
    }

    /// Record an action that has already been applied at `now`.
    pub fn record_at(&mut self, action: Action<C>, now: Instant) -> RecordOutcome<C> {
        if self.executing {
            tracing::debug!("ignoring '{}' recorded during undo/redo", action.description());
            return RecordOutcome::Ignored;
        }

        let elapsed = self.last_record.map(|last| now.saturating_duration_since(last));
        self.last_record = Some(now);

        if let Some(top) = self.undo_stack.back() {
            if self.policy.should_merge(&**top, &action, elapsed) {
                if let (Some(target), Some(next)) = (top.as_coalescing(), action.as_coalescing()) {
                    target.absorb(next);
                }
                tracing::debug!("coalesced '{}' into top entry", action.description());
                let top = Rc::clone(top);
                if self.is_save_point(&top) {
                    self.save_point = SavePoint::Unreachable;
                }
                self.redo_stack.clear();
                return RecordOutcome::Coalesced(top);
            }
        }

        let action = Rc::new(action);
        self.undo_stack.push_back(Rc::clone(&action));
        self.redo_stack.clear();
        self.enforce_limit();
        RecordOutcome::Pushed(action)
    }

    /// Undo the most recent entry.
    ///
    /// Returns `Ok(false)` when there is nothing to undo or an undo/redo is
    /// already executing.
    ///
    /// # Errors
    ///
    /// Returns the action's error; the entry stays on the undo stack.
    pub fn undo(&mut self, ctx: &mut C) -> Result<bool, ActionError> {
        if self.executing {
            return Ok(false);
        }
        let Some(action) = self.undo_stack.pop_back() else {
            return Ok(false);
        };

        self.executing = true;
        let result = action.undo(ctx);
        self.executing = false;

        if let Err(e) = result {
            tracing::warn!("could not undo '{}': {e}", action.description());
            self.undo_stack.push_back(action);
            return Err(e);
        }

        self.redo_stack.push_back(action);
        if self.redo_stack.len() > self.max_depth {
            self.redo_stack.pop_front();
        }
        self.last_record = None;
        Ok(true)
    }

    /// Redo the most recently undone entry.
    ///
    /// Returns `Ok(false)` when there is nothing to redo or an undo/redo is
    /// already executing.
    ///
    /// # Errors
    ///
    /// Returns the action's error; the entry stays on the redo stack.
    pub fn redo(&mut self, ctx: &mut C) -> Result<bool, ActionError> {
        if self.executing {
            return Ok(false);
        }
        let Some(action) = self.redo_stack.pop_back() else {
            return Ok(false);
        };

        self.executing = true;
        let result = action.redo(ctx);
        self.executing = false;

        if let Err(e) = result {
            tracing::warn!("could not redo '{}': {e}", action.description());
            self.redo_stack.push_back(action);
            return Err(e);
        }

        self.undo_stack.push_back(action);
        self.enforce_limit();
        self.last_record = None;
        Ok(true)
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.executing && !self.undo_stack.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.executing && !self.redo_stack.is_empty()
    }

    #[must_use]
    pub const fn is_executing(&self) -> bool {
        self.executing
    }

    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    #[must_use]
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    #[must_use]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    #[must_use]
    pub fn next_undo_description(&self) -> Option<&str> {
        self.undo_stack.back().map(|a| a.description())
    }

    #[must_use]
    pub fn next_redo_description(&self) -> Option<&str> {
        self.redo_stack.back().map(|a| a.description())
    }

    /// Undo descriptions, most recent first.
    #[must_use]
    pub fn undo_descriptions(&self, limit: usize) -> Vec<&str> {
        self.undo_stack
            .iter()
            .rev()
            .take(limit)
            .map(|a| a.description())
            .collect()
    }

    /// Remember the current top of the undo stack as the saved state.
    pub fn mark_saved(&mut self) {
        self.save_point = self
            .undo_stack
            .back()
            .map_or(SavePoint::Empty, |top| SavePoint::At(Rc::downgrade(top)));
    }

    /// Whether the current top differs from the saved one.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        match (&self.save_point, self.undo_stack.back()) {
            (SavePoint::Empty, None) => false,
            (SavePoint::At(saved), Some(top)) => !std::ptr::eq(saved.as_ptr(), Rc::as_ptr(top)),
            _ => true,
        }
    }

    fn is_save_point(&self, action: &Rc<Action<C>>) -> bool {
        match &self.save_point {
            SavePoint::At(saved) => std::ptr::eq(saved.as_ptr(), Rc::as_ptr(action)),
            _ => false,
        }
    }

    fn enforce_limit(&mut self) {
        while self.undo_stack.len() > self.max_depth {
            if let Some(evicted) = self.undo_stack.pop_front() {
                tracing::debug!("evicted '{}' from undo history", evicted.description());
            }
            // An empty undo stack no longer means "nothing changed".
            if matches!(self.save_point, SavePoint::Empty) {
                self.save_point = SavePoint::Unreachable;
            }
        }
    }
}
