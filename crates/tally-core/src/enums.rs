//! Entity types, audit event kinds, and record status enums for Tally.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! [`EntityType`] additionally carries the human-readable label used in action
//! descriptions and persisted audit events, and a tolerant tag parser.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// EntityType
// ---------------------------------------------------------------------------

/// Type of record in a company document, used in audit events and by the
/// entity locator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Customer,
    Supplier,
    Product,
    Category,
    Department,
    Employee,
    Location,
    Accountant,
    Invoice,
    Expense,
    Revenue,
    Payment,
    PurchaseOrder,
    RecurringInvoice,
    RentalItem,
    RentalRecord,
    StockAdjustment,
    StockTransfer,
    ReturnRecord,
    LostDamaged,
}

impl EntityType {
    /// Every supported entity type, in document order.
    pub const ALL: [Self; 20] = [
        Self::Customer,
        Self::Supplier,
        Self::Product,
        Self::Category,
        Self::Department,
        Self::Employee,
        Self::Location,
        Self::Accountant,
        Self::Invoice,
        Self::Expense,
        Self::Revenue,
        Self::Payment,
        Self::PurchaseOrder,
        Self::RecurringInvoice,
        Self::RentalItem,
        Self::RentalRecord,
        Self::StockAdjustment,
        Self::StockTransfer,
        Self::ReturnRecord,
        Self::LostDamaged,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Supplier => "supplier",
            Self::Product => "product",
            Self::Category => "category",
            Self::Department => "department",
            Self::Employee => "employee",
            Self::Location => "location",
            Self::Accountant => "accountant",
            Self::Invoice => "invoice",
            Self::Expense => "expense",
            Self::Revenue => "revenue",
            Self::Payment => "payment",
            Self::PurchaseOrder => "purchase_order",
            Self::RecurringInvoice => "recurring_invoice",
            Self::RentalItem => "rental_item",
            Self::RentalRecord => "rental_record",
            Self::StockAdjustment => "stock_adjustment",
            Self::StockTransfer => "stock_transfer",
            Self::ReturnRecord => "return_record",
            Self::LostDamaged => "lost_damaged",
        }
    }

    /// Human-readable label, as it appears in action descriptions
    /// (`"Add Purchase Order 'PO-7'"`) and in persisted audit events.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Customer => "Customer",
            Self::Supplier => "Supplier",
            Self::Product => "Product",
            Self::Category => "Category",
            Self::Department => "Department",
            Self::Employee => "Employee",
            Self::Location => "Location",
            Self::Accountant => "Accountant",
            Self::Invoice => "Invoice",
            Self::Expense => "Expense",
            Self::Revenue => "Revenue",
            Self::Payment => "Payment",
            Self::PurchaseOrder => "Purchase Order",
            Self::RecurringInvoice => "Recurring Invoice",
            Self::RentalItem => "Rental Item",
            Self::RentalRecord => "Rental Record",
            Self::StockAdjustment => "Stock Adjustment",
            Self::StockTransfer => "Stock Transfer",
            Self::ReturnRecord => "Return",
            Self::LostDamaged => "Lost Damaged",
        }
    }

    /// Parse a type tag, ignoring case, spaces, underscores, and hyphens.
    ///
    /// Accepts both the snake_case tag and the label, so `"purchase_order"`,
    /// `"Purchase Order"`, and `"PURCHASE-ORDER"` all resolve to
    /// [`EntityType::PurchaseOrder`].
    #[must_use]
    pub fn parse_tag(raw: &str) -> Option<Self> {
        let wanted = normalize_tag(raw);
        if wanted.is_empty() {
            return None;
        }
        Self::ALL.into_iter().find(|entity| {
            normalize_tag(entity.as_str()) == wanted || normalize_tag(entity.label()) == wanted
        })
    }
}

/// Lowercase a tag and drop every character that is not alphanumeric.
#[must_use]
pub fn normalize_tag(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_tag(s).ok_or_else(|| format!("unknown entity type '{s}'"))
    }
}

// ---------------------------------------------------------------------------
// AuditEventKind
// ---------------------------------------------------------------------------

/// What an audit event records.
///
/// `Added`, `Modified`, and `Deleted` describe data mutations and may carry a
/// reversible action. `Undone` and `Redone` are meta-events recording a
/// selective undo/redo of another event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AuditEventKind {
    Added,
    Modified,
    Deleted,
    Undone,
    Redone,
}

impl AuditEventKind {
    /// Whether this kind is a meta-event (a log entry about another event).
    #[must_use]
    pub const fn is_meta(self) -> bool {
        matches!(self, Self::Undone | Self::Redone)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Modified => "modified",
            Self::Deleted => "deleted",
            Self::Undone => "undone",
            Self::Redone => "redone",
        }
    }
}

impl fmt::Display for AuditEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuditEventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "added" => Ok(Self::Added),
            "modified" => Ok(Self::Modified),
            "deleted" => Ok(Self::Deleted),
            "undone" => Ok(Self::Undone),
            "redone" => Ok(Self::Redone),
            _ => Err(format!("unknown event kind '{s}'")),
        }
    }
}

// ---------------------------------------------------------------------------
// InvoiceStatus
// ---------------------------------------------------------------------------

/// Status of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    #[default]
    Draft,
    Sent,
    Paid,
    Overdue,
    Cancelled,
}

impl InvoiceStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Sent => "sent",
            Self::Paid => "paid",
            Self::Overdue => "overdue",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// OrderStatus
// ---------------------------------------------------------------------------

/// Status of a purchase order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Ordered,
    Received,
    Cancelled,
}

impl OrderStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Ordered => "ordered",
            Self::Received => "received",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// PaymentMethod
// ---------------------------------------------------------------------------

/// How a payment was settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Card,
    BankTransfer,
    Cheque,
}

impl PaymentMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Card => "card",
            Self::BankTransfer => "bank_transfer",
            Self::Cheque => "cheque",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Frequency
// ---------------------------------------------------------------------------

/// Repeat interval of a recurring invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl Frequency {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Yearly => "yearly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// CategoryKind
// ---------------------------------------------------------------------------

/// Which ledger a category belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    Sales,
    Purchase,
    Rental,
}

impl CategoryKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sales => "sales",
            Self::Purchase => "purchase",
            Self::Rental => "rental",
        }
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    // --- Serde roundtrip tests ---

    macro_rules! test_serde_roundtrip {
        ($name:ident, $ty:ty, $variant:expr, $expected_str:expr) => {
            #[test]
            fn $name() {
                let val = $variant;
                let json = serde_json::to_string(&val).unwrap();
                assert_eq!(json, format!("\"{}\"", $expected_str));
                let recovered: $ty = serde_json::from_str(&json).unwrap();
                assert_eq!(recovered, val);
            }
        };
    }

    test_serde_roundtrip!(
        entity_purchase_order,
        EntityType,
        EntityType::PurchaseOrder,
        "purchase_order"
    );
    test_serde_roundtrip!(
        entity_lost_damaged,
        EntityType,
        EntityType::LostDamaged,
        "lost_damaged"
    );
    test_serde_roundtrip!(kind_undone, AuditEventKind, AuditEventKind::Undone, "undone");
    test_serde_roundtrip!(invoice_overdue, InvoiceStatus, InvoiceStatus::Overdue, "overdue");
    test_serde_roundtrip!(
        payment_bank_transfer,
        PaymentMethod,
        PaymentMethod::BankTransfer,
        "bank_transfer"
    );

    // --- Tag parsing ---

    #[rstest]
    #[case("customer", EntityType::Customer)]
    #[case("Customer", EntityType::Customer)]
    #[case("purchase_order", EntityType::PurchaseOrder)]
    #[case("Purchase Order", EntityType::PurchaseOrder)]
    #[case("  PURCHASE-ORDER ", EntityType::PurchaseOrder)]
    #[case("Return", EntityType::ReturnRecord)]
    #[case("return_record", EntityType::ReturnRecord)]
    #[case("Lost Damaged", EntityType::LostDamaged)]
    #[case("rentalitem", EntityType::RentalItem)]
    fn parse_tag_is_case_and_space_insensitive(#[case] raw: &str, #[case] expected: EntityType) {
        assert_eq!(EntityType::parse_tag(raw), Some(expected));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("widget")]
    #[case("customers")]
    fn parse_tag_rejects_unknown(#[case] raw: &str) {
        assert_eq!(EntityType::parse_tag(raw), None);
    }

    #[test]
    fn every_label_and_tag_parses_back() {
        for entity in EntityType::ALL {
            assert_eq!(EntityType::parse_tag(entity.label()), Some(entity));
            assert_eq!(EntityType::parse_tag(entity.as_str()), Some(entity));
        }
    }

    #[test]
    fn from_str_reports_unknown_tag() {
        let err = "gadget".parse::<EntityType>().unwrap_err();
        assert!(err.contains("gadget"));
    }

    #[test]
    fn meta_kinds() {
        assert!(AuditEventKind::Undone.is_meta());
        assert!(AuditEventKind::Redone.is_meta());
        assert!(!AuditEventKind::Added.is_meta());
        assert!(!AuditEventKind::Modified.is_meta());
        assert!(!AuditEventKind::Deleted.is_meta());
    }

    #[test]
    fn kind_from_str() {
        assert_eq!("Deleted".parse::<AuditEventKind>(), Ok(AuditEventKind::Deleted));
        assert_eq!(" redone ".parse::<AuditEventKind>(), Ok(AuditEventKind::Redone));
        assert!("archived".parse::<AuditEventKind>().is_err());
    }

    // --- Display / as_str tests ---

    #[test]
    fn display_matches_as_str() {
        assert_eq!(format!("{}", EntityType::StockTransfer), "stock_transfer");
        assert_eq!(format!("{}", AuditEventKind::Modified), "modified");
        assert_eq!(format!("{}", InvoiceStatus::Cancelled), "cancelled");
        assert_eq!(format!("{}", OrderStatus::Received), "received");
        assert_eq!(format!("{}", Frequency::Quarterly), "quarterly");
        assert_eq!(format!("{}", CategoryKind::Rental), "rental");
    }
}
