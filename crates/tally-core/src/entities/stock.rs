use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::EntityType;

/// A manual correction of on-hand quantity at one location.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StockAdjustment {
    pub id: String,
    pub reference: String,
    pub product_id: String,
    pub location_id: Option<String>,
    pub quantity_change: i64,
    pub reason: Option<String>,
    pub adjusted_on: NaiveDate,
}

impl_record!(
    StockAdjustment,
    EntityType::StockAdjustment,
    name: reference,
    fields: [reference, product_id, location_id, quantity_change, reason, adjusted_on]
);

/// A move of stock between two locations.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StockTransfer {
    pub id: String,
    pub reference: String,
    pub product_id: String,
    pub from_location_id: String,
    pub to_location_id: String,
    pub quantity: u32,
    pub transferred_on: NaiveDate,
}

impl_record!(
    StockTransfer,
    EntityType::StockTransfer,
    name: reference,
    fields: [
        reference,
        product_id,
        from_location_id,
        to_location_id,
        quantity,
        transferred_on,
    ]
);
