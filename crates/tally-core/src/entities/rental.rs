use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::EntityType;

/// An item available for rent.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RentalItem {
    pub id: String,
    pub name: String,
    pub total_quantity: u32,
    pub daily_rate_cents: i64,
    pub deposit_cents: i64,
}

impl_record!(
    RentalItem,
    EntityType::RentalItem,
    name: name,
    fields: [name, total_quantity, daily_rate_cents, deposit_cents]
);

/// One rental of a [`RentalItem`] to a customer.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RentalRecord {
    pub id: String,
    pub reference: String,
    pub rental_item_id: String,
    pub customer_id: String,
    pub quantity: u32,
    pub starts_on: NaiveDate,
    pub due_on: NaiveDate,
    pub returned_on: Option<NaiveDate>,
}

impl_record!(
    RentalRecord,
    EntityType::RentalRecord,
    name: reference,
    fields: [reference, rental_item_id, customer_id, quantity, starts_on, due_on, returned_on]
);
