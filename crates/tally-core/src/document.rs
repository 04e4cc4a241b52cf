//! The owning company document.
//!
//! A [`CompanyDocument`] holds one collection per record type plus the
//! persisted audit timeline. It is serialized as a single JSON object; every
//! collection defaults to empty so older documents missing a collection still
//! load.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{
    Accountant, AuditEvent, Category, Customer, Department, Employee, Expense, Invoice, Location,
    LostDamaged, Payment, Product, PurchaseOrder, RecurringInvoice, Record, RentalItem,
    RentalRecord, ReturnRecord, Revenue, StockAdjustment, StockTransfer, Supplier,
};

/// Typed access to the collection holding records of type `R`.
pub trait HasRecords<R: Record> {
    fn records(&self) -> &Vec<R>;
    fn records_mut(&mut self) -> &mut Vec<R>;
}

/// Read and replace access to a persisted audit timeline.
pub trait EventStore {
    fn audit_events(&self) -> &[AuditEvent];
    fn replace_audit_events(&mut self, events: Vec<AuditEvent>);
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CompanyDocument {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub saved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub customers: Vec<Customer>,
    #[serde(default)]
    pub suppliers: Vec<Supplier>,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub departments: Vec<Department>,
    #[serde(default)]
    pub employees: Vec<Employee>,
    #[serde(default)]
    pub locations: Vec<Location>,
    #[serde(default)]
    pub accountants: Vec<Accountant>,
    #[serde(default)]
    pub invoices: Vec<Invoice>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub revenues: Vec<Revenue>,
    #[serde(default)]
    pub payments: Vec<Payment>,
    #[serde(default)]
    pub purchase_orders: Vec<PurchaseOrder>,
    #[serde(default)]
    pub recurring_invoices: Vec<RecurringInvoice>,
    #[serde(default)]
    pub rental_items: Vec<RentalItem>,
    #[serde(default)]
    pub rental_records: Vec<RentalRecord>,
    #[serde(default)]
    pub stock_adjustments: Vec<StockAdjustment>,
    #[serde(default)]
    pub stock_transfers: Vec<StockTransfer>,
    #[serde(default)]
    pub returns: Vec<ReturnRecord>,
    #[serde(default)]
    pub lost_damaged: Vec<LostDamaged>,
    /// Persisted audit timeline, oldest first.
    #[serde(default)]
    pub audit_events: Vec<AuditEvent>,
}

impl CompanyDocument {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Total number of records across all collections.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.customers.len()
            + self.suppliers.len()
            + self.products.len()
            + self.categories.len()
            + self.departments.len()
            + self.employees.len()
            + self.locations.len()
            + self.accountants.len()
            + self.invoices.len()
            + self.expenses.len()
            + self.revenues.len()
            + self.payments.len()
            + self.purchase_orders.len()
            + self.recurring_invoices.len()
            + self.rental_items.len()
            + self.rental_records.len()
            + self.stock_adjustments.len()
            + self.stock_transfers.len()
            + self.returns.len()
            + self.lost_damaged.len()
    }
}

impl EventStore for CompanyDocument {
    fn audit_events(&self) -> &[AuditEvent] {
        &self.audit_events
    }

    fn replace_audit_events(&mut self, events: Vec<AuditEvent>) {
        self.audit_events = events;
    }
}

macro_rules! has_records {
    ($($ty:ty => $field:ident),* $(,)?) => {
        $(
            impl HasRecords<$ty> for CompanyDocument {
                fn records(&self) -> &Vec<$ty> {
                    &self.$field
                }

                fn records_mut(&mut self) -> &mut Vec<$ty> {
                    &mut self.$field
                }
            }
        )*
    };
}

has_records!(
    Customer => customers,
    Supplier => suppliers,
    Product => products,
    Category => categories,
    Department => departments,
    Employee => employees,
    Location => locations,
    Accountant => accountants,
    Invoice => invoices,
    Expense => expenses,
    Revenue => revenues,
    Payment => payments,
    PurchaseOrder => purchase_orders,
    RecurringInvoice => recurring_invoices,
    RentalItem => rental_items,
    RentalRecord => rental_records,
    StockAdjustment => stock_adjustments,
    StockTransfer => stock_transfers,
    ReturnRecord => returns,
    LostDamaged => lost_damaged,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_loads_as_empty_document() {
        let doc: CompanyDocument = serde_json::from_str("{}").unwrap();
        assert_eq!(doc, CompanyDocument::default());
        assert_eq!(doc.record_count(), 0);
    }

    #[test]
    fn typed_access_reaches_the_right_collection() {
        let mut doc = CompanyDocument::new("Demo Co");
        HasRecords::<Department>::records_mut(&mut doc).push(Department {
            id: "dep-00000001".into(),
            name: "Sales".into(),
            description: None,
        });
        assert_eq!(doc.departments.len(), 1);
        assert_eq!(HasRecords::<Department>::records(&doc)[0].name, "Sales");
        assert_eq!(doc.record_count(), 1);
    }

    #[test]
    fn event_store_replaces_timeline() {
        let mut doc = CompanyDocument::new("Demo Co");
        assert!(doc.audit_events().is_empty());
        doc.replace_audit_events(vec![AuditEvent::new(
            crate::enums::AuditEventKind::Added,
            "Department",
            "dep-00000001",
            "Sales",
            "Add Department 'Sales'",
        )]);
        assert_eq!(doc.audit_events().len(), 1);
        assert_eq!(doc.audit_events()[0].entity_name, "Sales");
    }
}
