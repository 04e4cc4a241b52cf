use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::EntityType;

/// An employee, optionally assigned to a department.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub position: Option<String>,
    pub department_id: Option<String>,
    pub hired_on: Option<NaiveDate>,
}

impl_record!(
    Employee,
    EntityType::Employee,
    name: name,
    fields: [name, email, position, department_id, hired_on]
);
