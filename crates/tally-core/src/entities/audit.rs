use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::AuditEventKind;
use crate::ids::generate_event_id;

/// A display-only before/after pair for one changed field.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FieldChange {
    pub field: String,
    pub before: serde_json::Value,
    pub after: serde_json::Value,
}

/// An append-only audit event recording one semantic change to the document.
///
/// Persisted with the owning document. `entity_type` is kept as the label
/// text rather than [`EntityType`](crate::enums::EntityType) so that events
/// naming a type this build does not know still load and display.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AuditEvent {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub kind: AuditEventKind,
    pub entity_type: String,
    pub entity_id: String,
    pub entity_name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changes: Option<Vec<FieldChange>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_snapshot: Option<String>,
    #[serde(default)]
    pub is_undone: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_event_id: Option<String>,
}

impl AuditEvent {
    /// Create a new event stamped with a fresh ID and the current time.
    #[must_use]
    pub fn new(
        kind: AuditEventKind,
        entity_type: impl Into<String>,
        entity_id: impl Into<String>,
        entity_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: generate_event_id(),
            timestamp: Utc::now(),
            kind,
            entity_type: entity_type.into(),
            entity_id: entity_id.into(),
            entity_name: entity_name.into(),
            description: description.into(),
            changes: None,
            entity_snapshot: None,
            is_undone: false,
            related_event_id: None,
        }
    }

    /// Create the `Undone`/`Redone` meta-event describing an act on `original`.
    #[must_use]
    pub fn meta(kind: AuditEventKind, original: &Self) -> Self {
        debug_assert!(kind.is_meta(), "meta events must be undone or redone");
        let verb = if kind == AuditEventKind::Undone {
            "Undid"
        } else {
            "Redid"
        };
        let mut event = Self::new(
            kind,
            original.entity_type.clone(),
            original.entity_id.clone(),
            original.entity_name.clone(),
            format!("{verb}: {}", original.description),
        );
        event.related_event_id = Some(original.id.clone());
        event
    }

    #[must_use]
    pub fn with_changes(mut self, changes: Vec<FieldChange>) -> Self {
        self.changes = if changes.is_empty() {
            None
        } else {
            Some(changes)
        };
        self
    }

    #[must_use]
    pub fn with_snapshot(mut self, snapshot: Option<String>) -> Self {
        self.entity_snapshot = snapshot;
        self
    }

    /// Whether this event is an `Undone`/`Redone` log entry.
    #[must_use]
    pub const fn is_meta(&self) -> bool {
        self.kind.is_meta()
    }
}
