use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::EntityType;

/// Goods returned by a customer.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ReturnRecord {
    pub id: String,
    pub reference: String,
    pub product_id: String,
    pub customer_id: Option<String>,
    pub quantity: u32,
    pub refund_cents: i64,
    pub reason: Option<String>,
    pub returned_on: NaiveDate,
}

impl_record!(
    ReturnRecord,
    EntityType::ReturnRecord,
    name: reference,
    fields: [reference, product_id, customer_id, quantity, refund_cents, reason, returned_on]
);
