use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{EntityType, OrderStatus};

/// An order placed with a supplier. Displayed by its order number.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PurchaseOrder {
    pub id: String,
    pub number: String,
    pub supplier_id: String,
    pub status: OrderStatus,
    pub total_cents: i64,
    pub ordered_on: NaiveDate,
    pub expected_on: Option<NaiveDate>,
}

impl_record!(
    PurchaseOrder,
    EntityType::PurchaseOrder,
    name: number,
    fields: [number, supplier_id, status, total_cents, ordered_on, expected_on]
);
