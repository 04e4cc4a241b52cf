use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::EntityType;

/// Stock written off as lost or damaged.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LostDamaged {
    pub id: String,
    pub reference: String,
    pub product_id: String,
    pub quantity: u32,
    pub reason: Option<String>,
    pub reported_on: NaiveDate,
}

impl_record!(
    LostDamaged,
    EntityType::LostDamaged,
    name: reference,
    fields: [reference, product_id, quantity, reason, reported_on]
);
