use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::EntityType;

/// A stocked product. Prices are in integer cents.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub sku: Option<String>,
    pub category_id: Option<String>,
    pub supplier_id: Option<String>,
    pub unit_price_cents: i64,
    pub unit_cost_cents: i64,
    pub reorder_level: u32,
}

impl_record!(
    Product,
    EntityType::Product,
    name: name,
    fields: [
        name,
        sku,
        category_id,
        supplier_id,
        unit_price_cents,
        unit_cost_cents,
        reorder_level,
    ]
);
