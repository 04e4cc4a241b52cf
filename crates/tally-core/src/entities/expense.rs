use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::EntityType;

/// A purchase-side transaction. Displayed by its reference.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Expense {
    pub id: String,
    pub reference: String,
    pub supplier_id: Option<String>,
    pub category_id: Option<String>,
    pub description: Option<String>,
    pub amount_cents: i64,
    pub tax_cents: i64,
    pub incurred_on: NaiveDate,
}

impl_record!(
    Expense,
    EntityType::Expense,
    name: reference,
    fields: [
        reference,
        supplier_id,
        category_id,
        description,
        amount_cents,
        tax_cents,
        incurred_on,
    ]
);
