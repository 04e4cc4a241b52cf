//! Read-side queries over the audit timeline.

use chrono::{DateTime, Utc};
use tally_core::entities::AuditEvent;
use tally_core::enums::{AuditEventKind, EntityType, normalize_tag};

/// Filter for [`AuditLog::filter`](super::AuditLog::filter).
///
/// Every set criterion must match. Results come back newest first and are
/// cut to `limit` after filtering.
#[derive(Debug, Clone, Default)]
pub struct AuditFilter {
    pub kind: Option<AuditEventKind>,
    /// Tag or label; `"purchase_order"` and `"Purchase Order"` are equivalent.
    pub entity_type: Option<String>,
    pub entity_id: Option<String>,
    /// Case-insensitive substring of the description, entity name or ID.
    pub text: Option<String>,
    /// Inclusive lower bound on the timestamp.
    pub since: Option<DateTime<Utc>>,
    /// Inclusive upper bound on the timestamp.
    pub until: Option<DateTime<Utc>>,
    pub limit: Option<usize>,
}

impl AuditFilter {
    #[must_use]
    pub fn matches(&self, event: &AuditEvent) -> bool {
        if self.kind.is_some_and(|kind| kind != event.kind) {
            return false;
        }
        if let Some(ref wanted) = self.entity_type {
            if !same_entity_type(wanted, &event.entity_type) {
                return false;
            }
        }
        if let Some(ref id) = self.entity_id {
            if &event.entity_id != id {
                return false;
            }
        }
        if let Some(ref text) = self.text {
            let needle = text.to_lowercase();
            let hit = [&event.description, &event.entity_name, &event.entity_id]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }
        if self.since.is_some_and(|since| event.timestamp < since) {
            return false;
        }
        if self.until.is_some_and(|until| event.timestamp > until) {
            return false;
        }
        true
    }
}

/// Compare two type tags, resolving known aliases (`"return_record"` is
/// `"Return"`) and falling back to normalized text for unknown ones.
pub(crate) fn same_entity_type(a: &str, b: &str) -> bool {
    match (EntityType::parse_tag(a), EntityType::parse_tag(b)) {
        (Some(a), Some(b)) => a == b,
        _ => normalize_tag(a) == normalize_tag(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn event(kind: AuditEventKind, entity_type: &str, name: &str) -> AuditEvent {
        AuditEvent::new(
            kind,
            entity_type,
            "id-1",
            name,
            format!("Add {entity_type} '{name}'"),
        )
    }

    #[test]
    fn default_filter_matches_everything() {
        assert!(AuditFilter::default().matches(&event(AuditEventKind::Added, "Customer", "Acme")));
    }

    #[test]
    fn entity_type_accepts_tag_or_label() {
        let filter = AuditFilter {
            entity_type: Some("return_record".into()),
            ..AuditFilter::default()
        };
        assert!(filter.matches(&event(AuditEventKind::Added, "Return", "RET-1")));
        assert!(!filter.matches(&event(AuditEventKind::Added, "Customer", "Acme")));

        let unknown = AuditFilter {
            entity_type: Some("warp_drive".into()),
            ..AuditFilter::default()
        };
        assert!(unknown.matches(&event(AuditEventKind::Added, "Warp Drive", "WD-1")));
    }

    #[test]
    fn text_is_case_insensitive() {
        let filter = AuditFilter {
            text: Some("acme".into()),
            ..AuditFilter::default()
        };
        assert!(filter.matches(&event(AuditEventKind::Added, "Customer", "ACME Ltd")));
        assert!(!filter.matches(&event(AuditEventKind::Added, "Customer", "Globex")));
    }

    #[test]
    fn kind_and_date_range() {
        let e = event(AuditEventKind::Deleted, "Product", "Widget");
        let kind = AuditFilter {
            kind: Some(AuditEventKind::Added),
            ..AuditFilter::default()
        };
        assert!(!kind.matches(&e));

        let window = AuditFilter {
            since: Some(e.timestamp - Duration::minutes(1)),
            until: Some(e.timestamp),
            ..AuditFilter::default()
        };
        assert!(window.matches(&e));

        let future = AuditFilter {
            since: Some(e.timestamp + Duration::minutes(1)),
            ..AuditFilter::default()
        };
        assert!(!future.matches(&e));
    }
}
