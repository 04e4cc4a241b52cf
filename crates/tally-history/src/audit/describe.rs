//! Action description conventions.
//!
//! Descriptions read `<Verb> <Entity Label> '<Display Name>'`, for example
//! `Add Customer 'Acme Ltd'` or `Update Purchase Order 'PO-7'`. The audit log
//! derives an event's kind, entity type and name from this text when an
//! action is recorded without explicit metadata.

use tally_core::enums::{AuditEventKind, EntityType};

pub const VERB_ADD: &str = "Add";
pub const VERB_EDIT: &str = "Edit";
pub const VERB_UPDATE: &str = "Update";
pub const VERB_DELETE: &str = "Delete";

/// Kind, entity label and display name recovered from a description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDescription {
    pub kind: AuditEventKind,
    pub entity_label: String,
    pub entity_name: String,
}

/// Format a description for an action on one record.
#[must_use]
pub fn describe(verb: &str, entity: EntityType, name: &str) -> String {
    format!("{verb} {} '{name}'", entity.label())
}

/// Parse a description written by [`describe`] or by hand in the same shape.
///
/// Returns `None` when no known verb prefix matches or the entity part is
/// empty. A description without a quoted name yields an empty name.
#[must_use]
pub fn parse_description(description: &str) -> Option<ParsedDescription> {
    let (kind, rest) = [
        (VERB_ADD, AuditEventKind::Added),
        (VERB_EDIT, AuditEventKind::Modified),
        (VERB_UPDATE, AuditEventKind::Modified),
        (VERB_DELETE, AuditEventKind::Deleted),
    ]
    .into_iter()
    .find_map(|(verb, kind)| {
        description
            .strip_prefix(verb)
            .and_then(|rest| rest.strip_prefix(' '))
            .map(|rest| (kind, rest))
    })?;

    let (entity_label, entity_name) = match (rest.find('\''), rest.rfind('\'')) {
        (Some(open), Some(close)) if close > open => (&rest[..open], &rest[open + 1..close]),
        _ => (rest, ""),
    };
    let entity_label = entity_label.trim();
    if entity_label.is_empty() {
        return None;
    }

    Some(ParsedDescription {
        kind,
        entity_label: entity_label.to_string(),
        entity_name: entity_name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("Add Customer 'Acme Ltd'", AuditEventKind::Added, "Customer", "Acme Ltd")]
    #[case("Edit Invoice 'INV-2024-017'", AuditEventKind::Modified, "Invoice", "INV-2024-017")]
    #[case("Update Purchase Order 'PO-7'", AuditEventKind::Modified, "Purchase Order", "PO-7")]
    #[case("Delete Product 'O'Brien Widget'", AuditEventKind::Deleted, "Product", "O'Brien Widget")]
    #[case("Delete Location", AuditEventKind::Deleted, "Location", "")]
    fn parses_known_verbs(
        #[case] description: &str,
        #[case] kind: AuditEventKind,
        #[case] label: &str,
        #[case] name: &str,
    ) {
        assert_eq!(
            parse_description(description),
            Some(ParsedDescription {
                kind,
                entity_label: label.into(),
                entity_name: name.into(),
            })
        );
    }

    #[rstest]
    #[case("Undid: Add Customer 'Acme Ltd'")]
    #[case("Added Customer 'Acme Ltd'")]
    #[case("Add 'Acme Ltd'")]
    #[case("Add")]
    #[case("")]
    fn rejects_unknown_shapes(#[case] description: &str) {
        assert_eq!(parse_description(description), None);
    }

    #[test]
    fn describe_round_trips_through_parse() {
        let description = describe(VERB_ADD, EntityType::RentalItem, "Scaffold Tower");
        assert_eq!(description, "Add Rental Item 'Scaffold Tower'");
        let parsed = parse_description(&description).unwrap();
        assert_eq!(parsed.entity_label, "Rental Item");
        assert_eq!(parsed.entity_name, "Scaffold Tower");
    }
}
