//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default result limit.
const fn default_limit() -> u32 {
    50
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Document opened when the CLI is not given `--document`.
    #[serde(default)]
    pub default_document: String,

    /// Default result limit for timeline listings.
    #[serde(default = "default_limit")]
    pub default_limit: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_document: String::new(),
            default_limit: default_limit(),
        }
    }
}

impl GeneralConfig {
    /// Whether a default document path is set.
    #[must_use]
    pub const fn has_default_document(&self) -> bool {
        !self.default_document.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GeneralConfig::default();
        assert!(!config.has_default_document());
        assert_eq!(config.default_limit, 50);
    }
}
