use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::EntityType;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Accountant {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl_record!(
    Accountant,
    EntityType::Accountant,
    name: name,
    fields: [name, email, phone]
);
