//! Audit timeline retention configuration.

use serde::{Deserialize, Serialize};

const fn default_max_events() -> usize {
    1000
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct AuditConfig {
    /// Maximum number of audit events retained; the oldest are trimmed first.
    #[serde(default = "default_max_events")]
    pub max_events: usize,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            max_events: default_max_events(),
        }
    }
}

impl AuditConfig {
    #[must_use]
    pub const fn with_max_events(max_events: usize) -> Self {
        Self { max_events }
    }
}
