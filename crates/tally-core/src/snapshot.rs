//! Snapshot codec for single records.
//!
//! A snapshot is the compact JSON encoding of one record. Struct fields are
//! written in declaration order, so two snapshots of an unmodified record are
//! byte-equal. Snapshots are embedded in persisted audit events and are the
//! only input needed to recreate a record verbatim.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::entities::FieldChange;
use crate::errors::CoreError;

/// Encode a record as a snapshot string.
///
/// # Errors
///
/// Returns [`CoreError::Snapshot`] if the record cannot be serialized.
pub fn encode<R: Serialize>(record: &R) -> Result<String, CoreError> {
    Ok(serde_json::to_string(record)?)
}

/// Decode a snapshot string back into a record.
///
/// # Errors
///
/// Returns [`CoreError::Snapshot`] on malformed JSON or a shape mismatch.
pub fn decode<R: DeserializeOwned>(snapshot: &str) -> Result<R, CoreError> {
    Ok(serde_json::from_str(snapshot)?)
}

/// Field-level differences between two records of the same type.
///
/// Display-only: the result feeds `AuditEvent::changes` and is never used
/// to reconcile state. Fields are reported in key order.
///
/// # Errors
///
/// Returns [`CoreError::Snapshot`] if either record cannot be serialized.
pub fn diff_records<R: Serialize>(before: &R, after: &R) -> Result<Vec<FieldChange>, CoreError> {
    let before = serde_json::to_value(before)?;
    let after = serde_json::to_value(after)?;
    Ok(diff_values(&before, &after))
}

/// Field-level differences between two snapshot strings.
///
/// Malformed input yields no changes.
#[must_use]
pub fn diff_snapshots(before: &str, after: &str) -> Vec<FieldChange> {
    match (
        serde_json::from_str::<Value>(before),
        serde_json::from_str::<Value>(after),
    ) {
        (Ok(before), Ok(after)) => diff_values(&before, &after),
        _ => Vec::new(),
    }
}

fn diff_values(before: &Value, after: &Value) -> Vec<FieldChange> {
    let (Some(before), Some(after)) = (before.as_object(), after.as_object()) else {
        return Vec::new();
    };

    let mut changes = Vec::new();
    for (field, old) in before {
        let new = after.get(field).unwrap_or(&Value::Null);
        if old != new {
            changes.push(FieldChange {
                field: field.clone(),
                before: old.clone(),
                after: new.clone(),
            });
        }
    }
    for (field, new) in after {
        if !before.contains_key(field) {
            changes.push(FieldChange {
                field: field.clone(),
                before: Value::Null,
                after: new.clone(),
            });
        }
    }
    changes
}
