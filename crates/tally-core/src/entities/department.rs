use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::EntityType;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Department {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

impl_record!(
    Department,
    EntityType::Department,
    name: name,
    fields: [name, description]
);
