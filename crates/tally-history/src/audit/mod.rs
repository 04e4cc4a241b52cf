//! Persisted audit timeline with selective undo/redo.
//!
//! The log is an append-only list of [`AuditEvent`]s plus a side table from
//! event ID to the live [`Action`] that can revert it. Events outlive the
//! process; actions do not. After a reload, [`AuditLog::initialize`] rebuilds
//! what it can through the [`EntityLocator`] and leaves the rest display-only.
//!
//! Per event: `recorded -> [undone <-> redone]*`. Undoing event E does not
//! require E to be the latest event. If a later event touched the same
//! record, the result may be incoherent; the log does not detect this.
//!
//! # Invariants
//!
//! 1. Meta-events (`undone`/`redone`) never have an action and are never
//!    marked undone.
//! 2. `is_undone` flips only when the event's action succeeds.
//! 3. Trimming an event drops its side-table entry in the same call.

mod describe;
mod filter;
mod reconstruct;

pub use describe::{
    ParsedDescription, VERB_ADD, VERB_DELETE, VERB_EDIT, VERB_UPDATE, describe, parse_description,
};
pub use filter::AuditFilter;
pub use reconstruct::reconstruct;

use std::collections::{BTreeSet, HashMap, VecDeque};
use std::fmt;
use std::rc::Rc;

use tally_config::AuditConfig;
use tally_core::document::EventStore;
use tally_core::entities::{AuditEvent, FieldChange};
use tally_core::enums::{AuditEventKind, EntityType};

use crate::action::Action;
use crate::error::HistoryError;
use crate::locator::EntityLocator;

/// Bounded audit timeline for one open document.
pub struct AuditLog<C> {
    events: VecDeque<AuditEvent>,
    actions: HashMap<String, Rc<Action<C>>>,
    locator: Rc<EntityLocator<C>>,
    max_events: usize,
}

impl<C> fmt::Debug for AuditLog<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuditLog")
            .field("events", &self.events.len())
            .field("live_actions", &self.actions.len())
            .field("max_events", &self.max_events)
            .finish_non_exhaustive()
    }
}

impl<C: 'static> AuditLog<C> {
    #[must_use]
    pub fn new(locator: Rc<EntityLocator<C>>, config: &AuditConfig) -> Self {
        Self {
            events: VecDeque::new(),
            actions: HashMap::new(),
            locator,
            max_events: config.max_events.max(1),
        }
    }

    /// Append an event, attaching `action` unless the event is a meta-event.
    ///
    /// Trims the oldest events when over capacity.
    pub fn record_event(
        &mut self,
        event: AuditEvent,
        action: Option<Rc<Action<C>>>,
    ) -> &AuditEvent {
        if let Some(action) = action {
            if !event.is_meta() {
                self.actions.insert(event.id.clone(), action);
            }
        }
        self.events.push_back(event);
        self.trim();
        &self.events[self.events.len() - 1]
    }

    /// Derive an event from an action's description and append it.
    ///
    /// The kind, entity type and name come from [`parse_description`]; the ID
    /// is resolved by name through the locator. Added events also capture a
    /// snapshot of the freshly created record. Returns `None` when the
    /// description does not follow the convention.
    pub fn record_from_action(&mut self, ctx: &C, action: Rc<Action<C>>) -> Option<&AuditEvent> {
        let Some(parsed) = parse_description(action.description()) else {
            tracing::debug!("no audit event for '{}'", action.description());
            return None;
        };

        let entity_type = EntityType::parse_tag(&parsed.entity_label)
            .map_or_else(|| parsed.entity_label.clone(), |e| e.label().to_string());
        let entity_id = self
            .locator
            .find_id_by_name(ctx, &entity_type, &parsed.entity_name)
            .unwrap_or_default();
        let snapshot = if parsed.kind == AuditEventKind::Added && !entity_id.is_empty() {
            self.locator.snapshot(ctx, &entity_type, &entity_id)
        } else {
            None
        };

        let event = AuditEvent::new(
            parsed.kind,
            entity_type,
            entity_id,
            parsed.entity_name,
            action.description(),
        )
        .with_snapshot(snapshot);
        Some(self.record_event(event, Some(action)))
    }

    /// Whether `event_id` can be selectively undone right now.
    #[must_use]
    pub fn can_undo_event(&self, event_id: &str) -> bool {
        self.get(event_id)
            .is_some_and(|e| !e.is_meta() && !e.is_undone && self.actions.contains_key(event_id))
    }

    /// Whether `event_id` can be selectively redone right now.
    #[must_use]
    pub fn can_redo_event(&self, event_id: &str) -> bool {
        self.get(event_id)
            .is_some_and(|e| !e.is_meta() && e.is_undone && self.actions.contains_key(event_id))
    }

    /// Revert one past event and append an `undone` meta-event.
    ///
    /// # Errors
    ///
    /// [`HistoryError::EventNotFound`] for unknown IDs,
    /// [`HistoryError::NotUndoable`] when [`Self::can_undo_event`] is false,
    /// and [`HistoryError::Action`] when the action fails. On error nothing
    /// changes.
    pub fn undo_event(&mut self, ctx: &mut C, event_id: &str) -> Result<AuditEvent, HistoryError> {
        if self.get(event_id).is_none() {
            return Err(HistoryError::EventNotFound(event_id.to_string()));
        }
        if !self.can_undo_event(event_id) {
            return Err(HistoryError::NotUndoable(event_id.to_string()));
        }
        self.execute(ctx, event_id, AuditEventKind::Undone)
    }

    /// Re-apply one previously undone event and append a `redone` meta-event.
    ///
    /// # Errors
    ///
    /// [`HistoryError::EventNotFound`] for unknown IDs,
    /// [`HistoryError::NotRedoable`] when [`Self::can_redo_event`] is false,
    /// and [`HistoryError::Action`] when the action fails. On error nothing
    /// changes.
    pub fn redo_event(&mut self, ctx: &mut C, event_id: &str) -> Result<AuditEvent, HistoryError> {
        if self.get(event_id).is_none() {
            return Err(HistoryError::EventNotFound(event_id.to_string()));
        }
        if !self.can_redo_event(event_id) {
            return Err(HistoryError::NotRedoable(event_id.to_string()));
        }
        self.execute(ctx, event_id, AuditEventKind::Redone)
    }

    /// Replace the timeline with persisted events and rebuild actions.
    ///
    /// Keeps the newest `max_events`. Returns how many events got an action.
    pub fn initialize(&mut self, ctx: &C, events: Vec<AuditEvent>) -> usize {
        self.events = events.into();
        self.actions.clear();
        self.trim();

        for event in &self.events {
            if let Some(action) = reconstruct(event, ctx, &self.locator) {
                self.actions.insert(event.id.clone(), Rc::new(action));
            }
        }
        tracing::debug!(
            "audit log loaded {} events, {} reversible",
            self.events.len(),
            self.actions.len()
        );
        self.actions.len()
    }

    /// Write the current timeline into `store` for persistence.
    pub fn sync_to_document<S: EventStore + ?Sized>(&self, store: &mut S) {
        store.replace_audit_events(self.events.iter().cloned().collect());
    }

    /// Update the displayed changes, name and description of the event whose
    /// action absorbed a later coalesced edit.
    pub(crate) fn refresh_coalesced(
        &mut self,
        action: &Rc<Action<C>>,
        field: &str,
        entity_name: &str,
        description: &str,
    ) {
        let Some(coalescing) = action.as_coalescing() else {
            return;
        };
        let Some(event_id) = self
            .actions
            .iter()
            .find(|(_, live)| Rc::ptr_eq(live, action))
            .map(|(id, _)| id.clone())
        else {
            return;
        };
        if let Some(event) = self.events.iter_mut().find(|e| e.id == event_id) {
            event.changes = Some(vec![FieldChange {
                field: field.to_string(),
                before: coalescing.old_value().clone(),
                after: coalescing.new_value(),
            }]);
            event.entity_name = entity_name.to_string();
            event.description = description.to_string();
        }
    }

    fn execute(
        &mut self,
        ctx: &mut C,
        event_id: &str,
        kind: AuditEventKind,
    ) -> Result<AuditEvent, HistoryError> {
        let action = self
            .actions
            .get(event_id)
            .map(Rc::clone)
            .ok_or_else(|| HistoryError::EventNotFound(event_id.to_string()))?;

        let result = if kind == AuditEventKind::Undone {
            action.undo(ctx)
        } else {
            action.redo(ctx)
        };
        if let Err(e) = result {
            tracing::warn!("could not {kind} event {event_id}: {e}");
            return Err(e.into());
        }

        let Some(original) = self.events.iter_mut().find(|e| e.id == event_id) else {
            return Err(HistoryError::EventNotFound(event_id.to_string()));
        };
        original.is_undone = kind == AuditEventKind::Undone;
        let meta = AuditEvent::meta(kind, original);
        Ok(self.record_event(meta, None).clone())
    }

    fn trim(&mut self) {
        while self.events.len() > self.max_events {
            if let Some(dropped) = self.events.pop_front() {
                self.actions.remove(&dropped.id);
            }
        }
    }
}

impl<C> AuditLog<C> {
    #[must_use]
    pub fn get(&self, event_id: &str) -> Option<&AuditEvent> {
        self.events.iter().find(|e| e.id == event_id)
    }

    /// Events, oldest first.
    pub fn events(&self) -> impl Iterator<Item = &AuditEvent> {
        self.events.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    #[must_use]
    pub const fn max_events(&self) -> usize {
        self.max_events
    }

    /// Whether the event currently has a live action.
    #[must_use]
    pub fn has_action(&self, event_id: &str) -> bool {
        self.actions.contains_key(event_id)
    }

    /// Events matching `filter`, newest first.
    #[must_use]
    pub fn filter(&self, filter: &AuditFilter) -> Vec<&AuditEvent> {
        self.events
            .iter()
            .rev()
            .filter(|e| filter.matches(e))
            .take(filter.limit.unwrap_or(usize::MAX))
            .collect()
    }

    /// Distinct entity types present in the timeline, sorted.
    #[must_use]
    pub fn entity_types(&self) -> Vec<String> {
        self.events
            .iter()
            .map(|e| e.entity_type.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
