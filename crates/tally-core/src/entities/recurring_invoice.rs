use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{EntityType, Frequency};

/// A template that generates invoices on a schedule.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RecurringInvoice {
    pub id: String,
    pub name: String,
    pub customer_id: String,
    pub frequency: Frequency,
    pub amount_cents: i64,
    pub next_run_on: NaiveDate,
    pub active: bool,
}

impl_record!(
    RecurringInvoice,
    EntityType::RecurringInvoice,
    name: name,
    fields: [name, customer_id, frequency, amount_cents, next_run_on, active]
);
