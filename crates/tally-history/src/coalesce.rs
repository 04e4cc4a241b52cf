//! Merge policy for rapid repeated edits.
//!
//! Applied only when an action is about to be pushed, and only against the
//! action on top of the undo stack.

use std::time::Duration;

use tally_config::HistoryConfig;

use crate::action::Action;

/// Decides whether an incoming action merges into the current top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoalescePolicy {
    window: Duration,
}

impl Default for CoalescePolicy {
    fn default() -> Self {
        Self::new(Duration::from_millis(500))
    }
}

impl CoalescePolicy {
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self { window }
    }

    #[must_use]
    pub const fn from_config(config: &HistoryConfig) -> Self {
        Self::new(config.coalesce_window())
    }

    #[must_use]
    pub const fn window(&self) -> Duration {
        self.window
    }

    /// Both actions coalesce, share a non-empty key, and `elapsed` since the
    /// previous record is strictly inside the window.
    ///
    /// `elapsed` is `None` when nothing has been recorded yet.
    #[must_use]
    pub fn should_merge<C>(
        &self,
        top: &Action<C>,
        incoming: &Action<C>,
        elapsed: Option<Duration>,
    ) -> bool {
        let (Some(top), Some(incoming)) = (top.as_coalescing(), incoming.as_coalescing()) else {
            return false;
        };
        if top.key().is_empty() || top.key() != incoming.key() {
            return false;
        }
        elapsed.is_some_and(|elapsed| elapsed < self.window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn edit(key: &str) -> Action<()> {
        Action::coalescing("Edit", key, json!(0), json!(1), |_, _| Ok(()))
    }

    fn plain() -> Action<()> {
        Action::simple("Set", json!(0), json!(1), |_, _| Ok(()))
    }

    #[rstest]
    #[case::same_key_inside_window("a", "a", Some(100), true)]
    #[case::same_key_at_window("a", "a", Some(500), false)]
    #[case::same_key_outside_window("a", "a", Some(900), false)]
    #[case::different_keys("a", "b", Some(10), false)]
    #[case::empty_keys("", "", Some(10), false)]
    #[case::first_record("a", "a", None, false)]
    fn merge_rules(
        #[case] top: &str,
        #[case] incoming: &str,
        #[case] elapsed_ms: Option<u64>,
        #[case] expected: bool,
    ) {
        let policy = CoalescePolicy::default();
        let elapsed = elapsed_ms.map(Duration::from_millis);
        assert_eq!(
            policy.should_merge(&edit(top), &edit(incoming), elapsed),
            expected
        );
    }

    #[test]
    fn non_coalescing_actions_never_merge() {
        let policy = CoalescePolicy::default();
        let elapsed = Some(Duration::from_millis(1));
        assert!(!policy.should_merge(&plain(), &edit("a"), elapsed));
        assert!(!policy.should_merge(&edit("a"), &plain(), elapsed));
    }

    #[test]
    fn window_follows_config() {
        let policy = CoalescePolicy::from_config(&HistoryConfig::new(10, 250));
        assert_eq!(policy.window(), Duration::from_millis(250));
    }
}
