//! Rebuilding actions for events persisted by an earlier session.
//!
//! The closures behind an action do not survive a restart. For each
//! persisted event the log tries to assemble a [`DelegateAction`] from the
//! event's snapshot and the live document, through the [`EntityLocator`]:
//!
//! | kind     | needs                                   | undo               | redo                    |
//! |----------|-----------------------------------------|--------------------|-------------------------|
//! | added    | snapshot (persisted or live record)     | capture, remove    | insert captured state   |
//! | deleted  | persisted pre-delete snapshot           | insert snapshot    | remove by ID            |
//! | modified | persisted pre-edit snapshot, live record| replace with pre   | replace with live state |
//! | meta     | never rebuilt                           |                    |                         |
//!
//! A missing ingredient makes the event display-only for the session.
//!
//! [`DelegateAction`]: crate::action::DelegateAction

use std::cell::RefCell;
use std::rc::Rc;

use tally_core::entities::AuditEvent;
use tally_core::enums::AuditEventKind;

use crate::action::Action;
use crate::error::ActionError;
use crate::locator::EntityLocator;

/// Try to rebuild an executable action for `event`.
///
/// Returns `None` when the event is a meta-event or any ingredient is
/// missing: unknown type tag, absent snapshot, unresolvable ID, or a record
/// that no longer exists.
pub fn reconstruct<C: 'static>(
    event: &AuditEvent,
    ctx: &C,
    locator: &Rc<EntityLocator<C>>,
) -> Option<Action<C>> {
    let action = match event.kind {
        AuditEventKind::Added => reconstruct_added(event, ctx, locator),
        AuditEventKind::Deleted => reconstruct_deleted(event, locator),
        AuditEventKind::Modified => reconstruct_modified(event, ctx, locator),
        AuditEventKind::Undone | AuditEventKind::Redone => return None,
    };
    if action.is_none() {
        tracing::debug!(
            "event {} ({} {}) is display-only for this session",
            event.id,
            event.kind,
            event.entity_type
        );
    }
    action
}

fn reconstruct_added<C: 'static>(
    event: &AuditEvent,
    ctx: &C,
    locator: &Rc<EntityLocator<C>>,
) -> Option<Action<C>> {
    let tag = supported_tag(event, locator)?;
    let id = resolve_id(event, ctx, locator)?;
    let snapshot = event
        .entity_snapshot
        .clone()
        .or_else(|| locator.snapshot(ctx, &tag, &id))?;

    let captured = Rc::new(RefCell::new(snapshot));
    let undo = {
        let (locator, captured) = (Rc::clone(locator), Rc::clone(&captured));
        let (tag, id) = (tag.clone(), id);
        move |ctx: &mut C| {
            if let Some(current) = locator.snapshot(ctx, &tag, &id) {
                *captured.borrow_mut() = current;
            }
            if locator.remove(ctx, &tag, &id) {
                Ok(())
            } else {
                Err(missing(&tag, &id))
            }
        }
    };
    let redo = {
        let locator = Rc::clone(locator);
        move |ctx: &mut C| {
            let snapshot = captured.borrow().clone();
            if locator.add_from_snapshot(ctx, &tag, &snapshot) {
                Ok(())
            } else {
                Err(rejected(&tag))
            }
        }
    };
    Some(Action::delegate(event.description.clone(), undo, redo))
}

fn reconstruct_deleted<C: 'static>(
    event: &AuditEvent,
    locator: &Rc<EntityLocator<C>>,
) -> Option<Action<C>> {
    let tag = supported_tag(event, locator)?;
    let snapshot = event.entity_snapshot.clone()?;
    let id = if event.entity_id.is_empty() {
        snapshot_id(&snapshot)?
    } else {
        event.entity_id.clone()
    };
    let undo = {
        let (locator, tag) = (Rc::clone(locator), tag.clone());
        move |ctx: &mut C| {
            if locator.add_from_snapshot(ctx, &tag, &snapshot) {
                Ok(())
            } else {
                Err(rejected(&tag))
            }
        }
    };
    let redo = {
        let locator = Rc::clone(locator);
        move |ctx: &mut C| {
            if locator.remove(ctx, &tag, &id) {
                Ok(())
            } else {
                Err(missing(&tag, &id))
            }
        }
    };
    Some(Action::delegate(event.description.clone(), undo, redo))
}

fn reconstruct_modified<C: 'static>(
    event: &AuditEvent,
    ctx: &C,
    locator: &Rc<EntityLocator<C>>,
) -> Option<Action<C>> {
    let tag = supported_tag(event, locator)?;
    let before = event.entity_snapshot.clone()?;
    let id = resolve_id(event, ctx, locator)?;
    // The live record stands in for the post-edit state.
    let after = locator.snapshot(ctx, &tag, &id)?;

    let undo = {
        let (locator, tag) = (Rc::clone(locator), tag.clone());
        move |ctx: &mut C| replace(&*locator, ctx, &tag, &before)
    };
    let redo = {
        let locator = Rc::clone(locator);
        move |ctx: &mut C| replace(&*locator, ctx, &tag, &after)
    };
    Some(Action::delegate(event.description.clone(), undo, redo))
}

fn replace<C>(
    locator: &EntityLocator<C>,
    ctx: &mut C,
    tag: &str,
    snapshot: &str,
) -> Result<(), ActionError> {
    if locator.replace_from_snapshot(ctx, tag, snapshot) {
        Ok(())
    } else {
        Err(rejected(tag))
    }
}

fn supported_tag<C>(event: &AuditEvent, locator: &EntityLocator<C>) -> Option<String> {
    locator
        .supports(&event.entity_type)
        .then(|| event.entity_type.clone())
}

/// Event ID, else the ID inside the snapshot, else a lookup by display name.
fn resolve_id<C>(event: &AuditEvent, ctx: &C, locator: &EntityLocator<C>) -> Option<String> {
    if !event.entity_id.is_empty() {
        return Some(event.entity_id.clone());
    }
    event
        .entity_snapshot
        .as_deref()
        .and_then(snapshot_id)
        .or_else(|| locator.find_id_by_name(ctx, &event.entity_type, &event.entity_name))
}

fn snapshot_id(snapshot: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(snapshot).ok()?;
    value.get("id")?.as_str().map(str::to_string)
}

fn missing(tag: &str, id: &str) -> ActionError {
    ActionError::MissingRecord {
        entity_type: tag.to_string(),
        id: id.to_string(),
    }
}

fn rejected(tag: &str) -> ActionError {
    ActionError::RejectedSnapshot {
        entity_type: tag.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tally_core::document::CompanyDocument;
    use tally_core::entities::Department;
    use tally_core::snapshot;

    fn sales() -> Department {
        Department {
            id: "dep-00000001".into(),
            name: "Sales".into(),
            description: None,
        }
    }

    fn event(kind: AuditEventKind, snapshot: Option<String>) -> AuditEvent {
        AuditEvent::new(kind, "Department", "dep-00000001", "Sales", "Add Department 'Sales'")
            .with_snapshot(snapshot)
    }

    fn locator() -> Rc<EntityLocator<CompanyDocument>> {
        Rc::new(EntityLocator::for_company())
    }

    #[test]
    fn meta_events_are_never_rebuilt() {
        let doc = CompanyDocument::default();
        let original = event(AuditEventKind::Added, None);
        let meta = AuditEvent::meta(AuditEventKind::Undone, &original);
        assert!(reconstruct(&meta, &doc, &locator()).is_none());
    }

    #[test]
    fn unknown_type_is_display_only() {
        let doc = CompanyDocument::default();
        let mut e = event(AuditEventKind::Deleted, Some("{}".into()));
        e.entity_type = "Spaceship".into();
        assert!(reconstruct(&e, &doc, &locator()).is_none());
    }

    #[test]
    fn added_event_uses_latest_state_on_redo() {
        let mut doc = CompanyDocument::default();
        doc.departments.push(sales());
        let snap = snapshot::encode(&sales()).unwrap();
        let event = event(AuditEventKind::Added, Some(snap));
        let action = reconstruct(&event, &doc, &locator()).unwrap();

        doc.departments[0].name = "Field Sales".into();
        action.undo(&mut doc).unwrap();
        assert!(doc.departments.is_empty());
        action.redo(&mut doc).unwrap();
        assert_eq!(doc.departments[0].name, "Field Sales");
    }

    #[test]
    fn added_event_falls_back_to_live_record() {
        let mut doc = CompanyDocument::default();
        doc.departments.push(sales());
        assert!(reconstruct(&event(AuditEventKind::Added, None), &doc, &locator()).is_some());

        doc.departments.clear();
        assert!(reconstruct(&event(AuditEventKind::Added, None), &doc, &locator()).is_none());
    }

    #[test]
    fn deleted_event_needs_snapshot() {
        let mut doc = CompanyDocument::default();
        assert!(reconstruct(&event(AuditEventKind::Deleted, None), &doc, &locator()).is_none());

        let snap = snapshot::encode(&sales()).unwrap();
        let action =
            reconstruct(&event(AuditEventKind::Deleted, Some(snap)), &doc, &locator()).unwrap();
        action.undo(&mut doc).unwrap();
        assert_eq!(doc.departments, vec![sales()]);
        action.redo(&mut doc).unwrap();
        assert!(doc.departments.is_empty());
    }

    #[test]
    fn modified_event_swaps_between_snapshot_and_live_state() {
        let mut doc = CompanyDocument::default();
        let mut renamed = sales();
        renamed.name = "Field Sales".into();
        doc.departments.push(renamed.clone());

        let before = snapshot::encode(&sales()).unwrap();
        let action =
            reconstruct(&event(AuditEventKind::Modified, Some(before)), &doc, &locator()).unwrap();
        action.undo(&mut doc).unwrap();
        assert_eq!(doc.departments, vec![sales()]);
        action.redo(&mut doc).unwrap();
        assert_eq!(doc.departments, vec![renamed]);
    }

    #[test]
    fn modified_event_without_live_record_is_display_only() {
        let doc = CompanyDocument::default();
        let before = snapshot::encode(&sales()).unwrap();
        let event = event(AuditEventKind::Modified, Some(before));
        assert!(reconstruct(&event, &doc, &locator()).is_none());
    }

    #[test]
    fn id_can_come_from_snapshot() {
        assert_eq!(
            snapshot_id(r#"{"id":"dep-00000009","name":"Ops"}"#).as_deref(),
            Some("dep-00000009")
        );
        assert_eq!(snapshot_id("not json"), None);
    }
}
