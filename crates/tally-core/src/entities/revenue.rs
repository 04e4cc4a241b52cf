use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::EntityType;

/// A sales-side transaction. Displayed by its reference.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Revenue {
    pub id: String,
    pub reference: String,
    pub customer_id: Option<String>,
    pub product_id: Option<String>,
    pub quantity: u32,
    pub amount_cents: i64,
    pub sold_on: NaiveDate,
}

impl_record!(
    Revenue,
    EntityType::Revenue,
    name: reference,
    fields: [reference, customer_id, product_id, quantity, amount_cents, sold_on]
);
