use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{EntityType, InvoiceStatus};

/// A customer invoice. Displayed by its invoice number.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Invoice {
    pub id: String,
    pub number: String,
    pub customer_id: String,
    pub issued_on: NaiveDate,
    pub due_on: Option<NaiveDate>,
    pub status: InvoiceStatus,
    pub total_cents: i64,
    pub notes: Option<String>,
}

impl_record!(
    Invoice,
    EntityType::Invoice,
    name: number,
    fields: [number, customer_id, issued_on, due_on, status, total_cents, notes]
);
