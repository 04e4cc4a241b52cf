use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::EntityType;

/// A warehouse or shop location holding stock.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Location {
    pub id: String,
    pub name: String,
    pub address: Option<String>,
    pub contact_person: Option<String>,
    pub capacity: Option<u32>,
}

impl_record!(
    Location,
    EntityType::Location,
    name: name,
    fields: [name, address, contact_person, capacity]
);
