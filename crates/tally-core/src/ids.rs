//! ID prefixes and generators.
//!
//! Record IDs look like `cus-a3f8b2c1`: a three-letter prefix per entity type
//! followed by eight random hex characters. Audit event IDs use a UUIDv7 body
//! (`evt-0190c2...`) so that lexical order follows creation order.

use uuid::Uuid;

use crate::enums::EntityType;

pub const PREFIX_CUSTOMER: &str = "cus";
pub const PREFIX_SUPPLIER: &str = "sup";
pub const PREFIX_PRODUCT: &str = "prd";
pub const PREFIX_CATEGORY: &str = "cat";
pub const PREFIX_DEPARTMENT: &str = "dep";
pub const PREFIX_EMPLOYEE: &str = "emp";
pub const PREFIX_LOCATION: &str = "loc";
pub const PREFIX_ACCOUNTANT: &str = "acc";
pub const PREFIX_INVOICE: &str = "inv";
pub const PREFIX_EXPENSE: &str = "exp";
pub const PREFIX_REVENUE: &str = "rev";
pub const PREFIX_PAYMENT: &str = "pay";
pub const PREFIX_PURCHASE_ORDER: &str = "pur";
pub const PREFIX_RECURRING_INVOICE: &str = "rin";
pub const PREFIX_RENTAL_ITEM: &str = "rti";
pub const PREFIX_RENTAL_RECORD: &str = "rtr";
pub const PREFIX_STOCK_ADJUSTMENT: &str = "adj";
pub const PREFIX_STOCK_TRANSFER: &str = "trf";
pub const PREFIX_RETURN: &str = "ret";
pub const PREFIX_LOST_DAMAGED: &str = "lst";
pub const PREFIX_EVENT: &str = "evt";

/// All record prefixes, in [`EntityType::ALL`] order.
pub const ALL_PREFIXES: [&str; 20] = [
    PREFIX_CUSTOMER,
    PREFIX_SUPPLIER,
    PREFIX_PRODUCT,
    PREFIX_CATEGORY,
    PREFIX_DEPARTMENT,
    PREFIX_EMPLOYEE,
    PREFIX_LOCATION,
    PREFIX_ACCOUNTANT,
    PREFIX_INVOICE,
    PREFIX_EXPENSE,
    PREFIX_REVENUE,
    PREFIX_PAYMENT,
    PREFIX_PURCHASE_ORDER,
    PREFIX_RECURRING_INVOICE,
    PREFIX_RENTAL_ITEM,
    PREFIX_RENTAL_RECORD,
    PREFIX_STOCK_ADJUSTMENT,
    PREFIX_STOCK_TRANSFER,
    PREFIX_RETURN,
    PREFIX_LOST_DAMAGED,
];

/// ID prefix for records of the given type.
#[must_use]
pub const fn prefix_for(entity: EntityType) -> &'static str {
    match entity {
        EntityType::Customer => PREFIX_CUSTOMER,
        EntityType::Supplier => PREFIX_SUPPLIER,
        EntityType::Product => PREFIX_PRODUCT,
        EntityType::Category => PREFIX_CATEGORY,
        EntityType::Department => PREFIX_DEPARTMENT,
        EntityType::Employee => PREFIX_EMPLOYEE,
        EntityType::Location => PREFIX_LOCATION,
        EntityType::Accountant => PREFIX_ACCOUNTANT,
        EntityType::Invoice => PREFIX_INVOICE,
        EntityType::Expense => PREFIX_EXPENSE,
        EntityType::Revenue => PREFIX_REVENUE,
        EntityType::Payment => PREFIX_PAYMENT,
        EntityType::PurchaseOrder => PREFIX_PURCHASE_ORDER,
        EntityType::RecurringInvoice => PREFIX_RECURRING_INVOICE,
        EntityType::RentalItem => PREFIX_RENTAL_ITEM,
        EntityType::RentalRecord => PREFIX_RENTAL_RECORD,
        EntityType::StockAdjustment => PREFIX_STOCK_ADJUSTMENT,
        EntityType::StockTransfer => PREFIX_STOCK_TRANSFER,
        EntityType::ReturnRecord => PREFIX_RETURN,
        EntityType::LostDamaged => PREFIX_LOST_DAMAGED,
    }
}

/// Generate a prefixed record ID, e.g. `"inv-3fa85f64"`.
#[must_use]
pub fn generate_id(prefix: &str) -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("{prefix}-{}", &hex[..8])
}

/// Generate a record ID for the given entity type.
#[must_use]
pub fn generate_record_id(entity: EntityType) -> String {
    generate_id(prefix_for(entity))
}

/// Generate a time-ordered audit event ID.
#[must_use]
pub fn generate_event_id() -> String {
    format!("{PREFIX_EVENT}-{}", Uuid::now_v7().simple())
}
