//! Linear undo/redo history configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

const fn default_max_depth() -> usize {
    100
}

const fn default_coalesce_window_ms() -> u64 {
    500
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct HistoryConfig {
    /// Maximum number of entries kept on each of the undo and redo stacks.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Edits with the same coalescing key recorded closer together than this
    /// merge into one undo entry.
    #[serde(default = "default_coalesce_window_ms")]
    pub coalesce_window_ms: u64,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            coalesce_window_ms: default_coalesce_window_ms(),
        }
    }
}

impl HistoryConfig {
    #[must_use]
    pub const fn new(max_depth: usize, coalesce_window_ms: u64) -> Self {
        Self {
            max_depth,
            coalesce_window_ms,
        }
    }

    /// The coalescing window as a [`Duration`].
    #[must_use]
    pub const fn coalesce_window(&self) -> Duration {
        Duration::from_millis(self.coalesce_window_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = HistoryConfig::default();
        assert_eq!(config.max_depth, 100);
        assert_eq!(config.coalesce_window(), Duration::from_millis(500));
    }
}
