//! One open document's history: linear stack, audit log and subscribers.
//!
//! [`Journal`] wires the data flow together. A mutation is applied to the
//! context, an [`Action`] is built, the [`HistoryStack`] records it (possibly
//! coalescing), and a newly pushed entry becomes an [`AuditEvent`] holding the
//! same `Rc<Action>` for selective undo.
//!
//! Linear undo/redo moves entries between stacks and does not touch the audit
//! log. Selective undo/redo goes through the audit log and does not move
//! stack entries.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::Instant;

use serde_json::Value;
use tally_config::TallyConfig;
use tally_core::document::{EventStore, HasRecords};
use tally_core::entities::{AuditEvent, FieldChange, Record};
use tally_core::enums::AuditEventKind;
use tally_core::errors::CoreError;
use tally_core::snapshot;

use crate::action::Action;
use crate::audit::{AuditLog, VERB_ADD, VERB_DELETE, VERB_EDIT, VERB_UPDATE, describe};
use crate::error::{ActionError, HistoryError};
use crate::locator::EntityLocator;
use crate::stack::{HistoryStack, RecordOutcome};

/// Fire-and-forget notifications for UI and dirty-indicator collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    ActionRecorded { description: String },
    ActionUndone { description: String },
    ActionRedone { description: String },
    StateChanged {
        can_undo: bool,
        can_redo: bool,
        has_unsaved_changes: bool,
    },
    EventsChanged,
}

type Subscriber = Box<dyn Fn(&Notice)>;

/// History engine for one open document of type `C`.
pub struct Journal<C> {
    history: HistoryStack<C>,
    audit: AuditLog<C>,
    locator: Rc<EntityLocator<C>>,
    subscribers: Vec<Subscriber>,
    /// Selective undo/redo changed the document since the last save.
    event_edits: bool,
}

impl<C> fmt::Debug for Journal<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Journal")
            .field("history", &self.history)
            .field("audit", &self.audit)
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

impl<C: 'static> Journal<C> {
    #[must_use]
    pub fn new(locator: EntityLocator<C>, config: &TallyConfig) -> Self {
        let locator = Rc::new(locator);
        Self {
            history: HistoryStack::new(&config.history),
            audit: AuditLog::new(Rc::clone(&locator), &config.audit),
            locator,
            subscribers: Vec::new(),
            event_edits: false,
        }
    }

    /// Create a journal and load the document's persisted timeline.
    #[must_use]
    pub fn open(ctx: &C, locator: EntityLocator<C>, config: &TallyConfig) -> Self
    where
        C: EventStore,
    {
        let mut journal = Self::new(locator, config);
        journal.initialize(ctx, ctx.audit_events().to_vec());
        journal
    }

    pub fn subscribe(&mut self, subscriber: impl Fn(&Notice) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Replace the audit timeline with persisted events. Returns how many
    /// events are reversible this session.
    pub fn initialize(&mut self, ctx: &C, events: Vec<AuditEvent>) -> usize {
        let reversible = self.audit.initialize(ctx, events);
        self.notify(&Notice::EventsChanged);
        reversible
    }

    /// Record an action that has already been applied to `ctx`.
    ///
    /// The audit event is derived from the action's description.
    pub fn record(&mut self, ctx: &C, action: Action<C>) -> RecordOutcome<C> {
        self.record_at(ctx, action, Instant::now())
    }

    pub fn record_at(&mut self, ctx: &C, action: Action<C>, now: Instant) -> RecordOutcome<C> {
        let outcome = self.history.record_at(action, now);
        if let RecordOutcome::Pushed(action) = &outcome {
            if self.audit.record_from_action(ctx, Rc::clone(action)).is_some() {
                self.notify(&Notice::EventsChanged);
            }
            self.notify(&Notice::ActionRecorded {
                description: action.description().to_string(),
            });
        }
        self.notify_state();
        outcome
    }

    /// Linear undo of the most recent entry.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Action`] if the action fails; the entry stays.
    pub fn undo(&mut self, ctx: &mut C) -> Result<bool, HistoryError> {
        let description = self.history.next_undo_description().map(str::to_string);
        if !self.history.undo(ctx)? {
            return Ok(false);
        }
        if let Some(description) = description {
            self.notify(&Notice::ActionUndone { description });
        }
        self.notify_state();
        Ok(true)
    }

    /// Linear redo of the most recently undone entry.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Action`] if the action fails; the entry stays.
    pub fn redo(&mut self, ctx: &mut C) -> Result<bool, HistoryError> {
        let description = self.history.next_redo_description().map(str::to_string);
        if !self.history.redo(ctx)? {
            return Ok(false);
        }
        if let Some(description) = description {
            self.notify(&Notice::ActionRedone { description });
        }
        self.notify_state();
        Ok(true)
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn mark_saved(&mut self) {
        self.history.mark_saved();
        self.event_edits = false;
        self.notify_state();
    }

    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.event_edits || self.history.has_unsaved_changes()
    }

    #[must_use]
    pub fn can_undo_event(&self, event_id: &str) -> bool {
        self.audit.can_undo_event(event_id)
    }

    #[must_use]
    pub fn can_redo_event(&self, event_id: &str) -> bool {
        self.audit.can_redo_event(event_id)
    }

    /// Selectively undo one past event.
    ///
    /// # Errors
    ///
    /// See [`AuditLog::undo_event`].
    pub fn undo_event(&mut self, ctx: &mut C, event_id: &str) -> Result<AuditEvent, HistoryError> {
        let meta = self.audit.undo_event(ctx, event_id)?;
        self.after_event_edit();
        Ok(meta)
    }

    /// Selectively redo one past event.
    ///
    /// # Errors
    ///
    /// See [`AuditLog::redo_event`].
    pub fn redo_event(&mut self, ctx: &mut C, event_id: &str) -> Result<AuditEvent, HistoryError> {
        let meta = self.audit.redo_event(ctx, event_id)?;
        self.after_event_edit();
        Ok(meta)
    }

    /// Write the audit timeline into the document before saving.
    pub fn sync_to_document<S: EventStore + ?Sized>(&self, store: &mut S) {
        self.audit.sync_to_document(store);
    }

    #[must_use]
    pub const fn history(&self) -> &HistoryStack<C> {
        &self.history
    }

    #[must_use]
    pub const fn audit(&self) -> &AuditLog<C> {
        &self.audit
    }

    #[must_use]
    pub fn locator(&self) -> &EntityLocator<C> {
        &self.locator
    }

    // -----------------------------------------------------------------------
    // Typed record mutations
    // -----------------------------------------------------------------------

    /// Insert `record` and record an `added` event with its snapshot.
    ///
    /// # Errors
    ///
    /// [`CoreError::Validation`] if a record with the same ID exists.
    pub fn add_record<R>(&mut self, ctx: &mut C, record: R) -> Result<String, HistoryError>
    where
        C: HasRecords<R>,
        R: Record,
    {
        let id = record.id().to_string();
        if position::<C, R>(ctx, &id).is_some() {
            let reason = format!("{} {id} already exists", R::ENTITY_TYPE);
            return Err(CoreError::Validation(reason).into());
        }
        let snapshot = snapshot::encode(&record)?;
        let name = record.display_name().to_string();
        ctx.records_mut().push(record.clone());

        let description = describe(VERB_ADD, R::ENTITY_TYPE, &name);
        // Undo re-captures the live record so redo restores later edits.
        let held = Rc::new(RefCell::new(record));
        let (undo_held, undo_id) = (Rc::clone(&held), id.clone());
        let action = Action::delegate(
            description.clone(),
            move |ctx: &mut C| {
                *undo_held.borrow_mut() = take_record::<C, R>(ctx, &undo_id)?;
                Ok(())
            },
            move |ctx: &mut C| insert_record(ctx, held.borrow().clone(), None),
        );
        let event = AuditEvent::new(
            AuditEventKind::Added,
            R::ENTITY_TYPE.label(),
            &id,
            name,
            description,
        )
        .with_snapshot(Some(snapshot));
        self.commit(action, Instant::now(), event);
        Ok(id)
    }

    /// Replace the stored record that has `record`'s ID.
    ///
    /// Returns `false` without recording anything when nothing changed.
    ///
    /// # Errors
    ///
    /// [`CoreError::NotFound`] if no record has that ID.
    pub fn update_record<R>(&mut self, ctx: &mut C, record: R) -> Result<bool, HistoryError>
    where
        C: HasRecords<R>,
        R: Record,
    {
        let id = record.id().to_string();
        let pos = position::<C, R>(ctx, &id).ok_or_else(|| not_found::<R>(&id))?;
        let before = ctx.records()[pos].clone();

        let before_snapshot = snapshot::encode(&before)?;
        if before_snapshot == snapshot::encode(&record)? {
            return Ok(false);
        }
        let changes = snapshot::diff_records(&before, &record)?;
        let old = serde_json::to_value(&before).map_err(CoreError::from)?;
        let new = serde_json::to_value(&record).map_err(CoreError::from)?;
        let name = record.display_name().to_string();
        ctx.records_mut()[pos] = record;

        let description = describe(VERB_EDIT, R::ENTITY_TYPE, &name);
        let action = Action::simple(
            description.clone(),
            old,
            new,
            |ctx: &mut C, value: &Value| {
                let record: R = serde_json::from_value(value.clone()).map_err(CoreError::from)?;
                replace_record(ctx, record)
            },
        );
        let event = AuditEvent::new(
            AuditEventKind::Modified,
            R::ENTITY_TYPE.label(),
            &id,
            name,
            description,
        )
        .with_changes(changes)
        .with_snapshot(Some(before_snapshot));
        self.commit(action, Instant::now(), event);
        Ok(true)
    }

    /// Remove the record with `id` and record a `deleted` event carrying its
    /// pre-delete snapshot.
    ///
    /// # Errors
    ///
    /// [`CoreError::NotFound`] if no record has that ID.
    pub fn delete_record<R>(&mut self, ctx: &mut C, id: &str) -> Result<R, HistoryError>
    where
        C: HasRecords<R>,
        R: Record,
    {
        let pos = position::<C, R>(ctx, id).ok_or_else(|| not_found::<R>(id))?;
        let snapshot = snapshot::encode(&ctx.records()[pos])?;
        let record = ctx.records_mut().remove(pos);
        let name = record.display_name().to_string();

        let description = describe(VERB_DELETE, R::ENTITY_TYPE, &name);
        let held = Rc::new(RefCell::new(record.clone()));
        let (redo_held, redo_id) = (Rc::clone(&held), id.to_string());
        let action = Action::delegate(
            description.clone(),
            move |ctx: &mut C| insert_record(ctx, held.borrow().clone(), Some(pos)),
            move |ctx: &mut C| {
                *redo_held.borrow_mut() = take_record::<C, R>(ctx, &redo_id)?;
                Ok(())
            },
        );
        let event = AuditEvent::new(
            AuditEventKind::Deleted,
            R::ENTITY_TYPE.label(),
            id,
            name,
            description,
        )
        .with_snapshot(Some(snapshot));
        self.commit(action, Instant::now(), event);
        Ok(record)
    }

    /// Edit one field. Rapid edits of the same field coalesce into one
    /// history entry keyed `type:id:field`.
    ///
    /// Returns `false` when the value is unchanged.
    ///
    /// # Errors
    ///
    /// [`CoreError::NotFound`], [`CoreError::UnknownField`] or
    /// [`CoreError::InvalidFieldValue`]; the record is untouched on error.
    pub fn set_field<R>(
        &mut self,
        ctx: &mut C,
        id: &str,
        field: &str,
        value: Value,
    ) -> Result<bool, HistoryError>
    where
        C: HasRecords<R>,
        R: Record,
    {
        self.set_field_at::<R>(ctx, id, field, value, Instant::now())
    }

    /// [`Self::set_field`] with an explicit clock reading.
    ///
    /// # Errors
    ///
    /// Same as [`Self::set_field`].
    pub fn set_field_at<R>(
        &mut self,
        ctx: &mut C,
        id: &str,
        field: &str,
        value: Value,
        now: Instant,
    ) -> Result<bool, HistoryError>
    where
        C: HasRecords<R>,
        R: Record,
    {
        let pos = position::<C, R>(ctx, id).ok_or_else(|| not_found::<R>(id))?;
        let record = &mut ctx.records_mut()[pos];
        let old = record.field_value(field).ok_or_else(|| CoreError::UnknownField {
            entity_type: R::ENTITY_TYPE.as_str().to_string(),
            field: field.to_string(),
        })?;
        if old == value {
            return Ok(false);
        }
        let before_snapshot = snapshot::encode(&*record)?;
        record.set_field(field, value.clone())?;
        let name = record.display_name().to_string();

        let description = describe(VERB_UPDATE, R::ENTITY_TYPE, &name);
        let key = format!("{}:{id}:{field}", R::ENTITY_TYPE.as_str());
        let (target, field_name) = (id.to_string(), field.to_string());
        let action = Action::coalescing(
            description.clone(),
            key,
            old.clone(),
            value.clone(),
            move |ctx: &mut C, value: &Value| {
                let pos = position::<C, R>(ctx, &target).ok_or_else(|| missing::<R>(&target))?;
                ctx.records_mut()[pos].set_field(&field_name, value.clone())?;
                Ok(())
            },
        );
        let event = AuditEvent::new(
            AuditEventKind::Modified,
            R::ENTITY_TYPE.label(),
            id,
            name.clone(),
            description.clone(),
        )
        .with_changes(vec![FieldChange {
            field: field.to_string(),
            before: old,
            after: value,
        }])
        .with_snapshot(Some(before_snapshot));

        if let RecordOutcome::Coalesced(action) = self.commit(action, now, event) {
            self.audit.refresh_coalesced(&action, field, &name, &description);
            self.notify(&Notice::EventsChanged);
        }
        Ok(true)
    }

    /// Push an action with explicit audit metadata.
    fn commit(&mut self, action: Action<C>, now: Instant, event: AuditEvent) -> RecordOutcome<C> {
        let outcome = self.history.record_at(action, now);
        if let RecordOutcome::Pushed(action) = &outcome {
            self.audit.record_event(event, Some(Rc::clone(action)));
            self.notify(&Notice::EventsChanged);
            self.notify(&Notice::ActionRecorded {
                description: action.description().to_string(),
            });
        }
        self.notify_state();
        outcome
    }

    fn after_event_edit(&mut self) {
        self.event_edits = true;
        self.notify(&Notice::EventsChanged);
        self.notify_state();
    }

    fn notify_state(&self) {
        self.notify(&Notice::StateChanged {
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
            has_unsaved_changes: self.has_unsaved_changes(),
        });
    }

    fn notify(&self, notice: &Notice) {
        for subscriber in &self.subscribers {
            subscriber(notice);
        }
    }
}

fn position<C: HasRecords<R>, R: Record>(ctx: &C, id: &str) -> Option<usize> {
    ctx.records().iter().position(|r| r.id() == id)
}

fn not_found<R: Record>(id: &str) -> CoreError {
    CoreError::NotFound {
        entity_type: R::ENTITY_TYPE.as_str().to_string(),
        id: id.to_string(),
    }
}

fn missing<R: Record>(id: &str) -> ActionError {
    ActionError::MissingRecord {
        entity_type: R::ENTITY_TYPE.as_str().to_string(),
        id: id.to_string(),
    }
}

fn take_record<C: HasRecords<R>, R: Record>(ctx: &mut C, id: &str) -> Result<R, ActionError> {
    let pos = position::<C, R>(ctx, id).ok_or_else(|| missing::<R>(id))?;
    Ok(ctx.records_mut().remove(pos))
}

/// Insert at `index` (clamped) or at the end. Fails on a duplicate ID.
fn insert_record<C: HasRecords<R>, R: Record>(
    ctx: &mut C,
    record: R,
    index: Option<usize>,
) -> Result<(), ActionError> {
    if position::<C, R>(ctx, record.id()).is_some() {
        return Err(ActionError::Failed(format!(
            "{} {} is already present",
            R::ENTITY_TYPE,
            record.id()
        )));
    }
    let records = ctx.records_mut();
    let index = index.map_or(records.len(), |i| i.min(records.len()));
    records.insert(index, record);
    Ok(())
}

fn replace_record<C: HasRecords<R>, R: Record>(ctx: &mut C, record: R) -> Result<(), ActionError> {
    let pos = position::<C, R>(ctx, record.id()).ok_or_else(|| missing::<R>(record.id()))?;
    ctx.records_mut()[pos] = record;
    Ok(())
}
