use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{EntityType, PaymentMethod};

/// A payment received against an invoice.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Payment {
    pub id: String,
    pub reference: String,
    pub invoice_id: Option<String>,
    pub method: PaymentMethod,
    pub amount_cents: i64,
    pub paid_on: NaiveDate,
}

impl_record!(
    Payment,
    EntityType::Payment,
    name: reference,
    fields: [reference, invoice_id, method, amount_cents, paid_on]
);
