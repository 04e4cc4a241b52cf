use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{CategoryKind, EntityType};

/// A product or expense category, optionally nested under a parent.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub kind: CategoryKind,
    pub parent_id: Option<String>,
}

impl_record!(
    Category,
    EntityType::Category,
    name: name,
    fields: [name, kind, parent_id]
);
