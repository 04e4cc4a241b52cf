//! Record structs for every collection in a company document.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for JSON
//! snapshots and schema validation. Each one implements [`Record`] through
//! `impl_record!`, which spells out the editable fields explicitly so that
//! field edits never rely on runtime type inspection.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::enums::EntityType;
use crate::errors::CoreError;

/// A record stored in one of the document's collections.
pub trait Record: Serialize + DeserializeOwned + Clone + std::fmt::Debug + 'static {
    /// Entity type of the collection this record lives in.
    const ENTITY_TYPE: EntityType;

    /// Fields accepted by [`Record::set_field`] and [`Record::field_value`].
    const EDITABLE_FIELDS: &'static [&'static str];

    /// Stable record ID.
    fn id(&self) -> &str;

    /// Human-readable name shown in history descriptions.
    fn display_name(&self) -> &str;

    /// Replace one editable field with a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownField`] for fields outside
    /// [`Record::EDITABLE_FIELDS`] and [`CoreError::InvalidFieldValue`] when
    /// the value does not fit the field's type. The record is untouched on
    /// error.
    fn set_field(&mut self, field: &str, value: serde_json::Value) -> Result<(), CoreError>;

    /// Current value of one editable field as JSON.
    fn field_value(&self, field: &str) -> Option<serde_json::Value>;
}

macro_rules! impl_record {
    ($ty:ty, $entity:expr, name: $name:ident, fields: [$($field:ident),* $(,)?]) => {
        impl $crate::entities::Record for $ty {
            const ENTITY_TYPE: $crate::enums::EntityType = $entity;
            const EDITABLE_FIELDS: &'static [&'static str] = &[$(stringify!($field)),*];

            fn id(&self) -> &str {
                &self.id
            }

            fn display_name(&self) -> &str {
                &self.$name
            }

            fn set_field(
                &mut self,
                field: &str,
                value: serde_json::Value,
            ) -> Result<(), $crate::errors::CoreError> {
                let invalid = |e: serde_json::Error| $crate::errors::CoreError::InvalidFieldValue {
                    entity_type: Self::ENTITY_TYPE.as_str().to_string(),
                    field: field.to_string(),
                    reason: e.to_string(),
                };
                match field {
                    $(stringify!($field) => {
                        self.$field = serde_json::from_value(value).map_err(invalid)?;
                        Ok(())
                    })*
                    _ => Err($crate::errors::CoreError::UnknownField {
                        entity_type: Self::ENTITY_TYPE.as_str().to_string(),
                        field: field.to_string(),
                    }),
                }
            }

            fn field_value(&self, field: &str) -> Option<serde_json::Value> {
                match field {
                    $(stringify!($field) => serde_json::to_value(&self.$field).ok(),)*
                    _ => None,
                }
            }
        }
    };
}

mod accountant;
mod audit;
mod category;
mod customer;
mod department;
mod employee;
mod expense;
mod invoice;
mod location;
mod lost_damaged;
mod payment;
mod product;
mod purchase_order;
mod recurring_invoice;
mod rental;
mod return_record;
mod revenue;
mod stock;
mod supplier;

pub use accountant::Accountant;
pub use audit::{AuditEvent, FieldChange};
pub use category::Category;
pub use customer::Customer;
pub use department::Department;
pub use employee::Employee;
pub use expense::Expense;
pub use invoice::Invoice;
pub use location::Location;
pub use lost_damaged::LostDamaged;
pub use payment::Payment;
pub use product::Product;
pub use purchase_order::PurchaseOrder;
pub use recurring_invoice::RecurringInvoice;
pub use rental::{RentalItem, RentalRecord};
pub use return_record::ReturnRecord;
pub use revenue::Revenue;
pub use stock::{StockAdjustment, StockTransfer};
pub use supplier::Supplier;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn customer() -> Customer {
        Customer {
            id: "cus-00000001".into(),
            name: "Acme Ltd".into(),
            email: None,
            phone: None,
            address: None,
            notes: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn set_field_replaces_value() {
        let mut c = customer();
        c.set_field("email", serde_json::json!("billing@acme.test"))
            .unwrap();
        assert_eq!(c.email.as_deref(), Some("billing@acme.test"));
        assert_eq!(
            c.field_value("email"),
            Some(serde_json::json!("billing@acme.test"))
        );
    }

    #[test]
    fn set_field_rejects_unknown_field() {
        let mut c = customer();
        let err = c.set_field("id", serde_json::json!("cus-x")).unwrap_err();
        assert!(matches!(err, CoreError::UnknownField { .. }));
        assert_eq!(c.id, "cus-00000001");
    }

    #[test]
    fn set_field_rejects_wrong_type_and_keeps_record() {
        let mut c = customer();
        let before = c.clone();
        let err = c.set_field("name", serde_json::json!(42)).unwrap_err();
        assert!(matches!(err, CoreError::InvalidFieldValue { .. }));
        assert_eq!(c, before);
    }

    #[test]
    fn field_value_unknown_is_none() {
        assert_eq!(customer().field_value("created_at"), None);
    }

    #[test]
    fn display_name_uses_declared_field() {
        let invoice = Invoice {
            id: "inv-00000001".into(),
            number: "INV-2024-001".into(),
            customer_id: "cus-00000001".into(),
            issued_on: chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            due_on: None,
            status: crate::enums::InvoiceStatus::Draft,
            total_cents: 12_500,
            notes: None,
        };
        assert_eq!(invoice.display_name(), "INV-2024-001");
        assert_eq!(Invoice::ENTITY_TYPE, EntityType::Invoice);
    }
}
