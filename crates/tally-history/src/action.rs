//! Reversible actions.
//!
//! An [`Action`] is an in-memory unit of change over a context `C` (usually a
//! [`CompanyDocument`](tally_core::document::CompanyDocument)). Actions are
//! never persisted. The four variants cover plain value swaps, ordered
//! batches, mergeable rapid edits, and opaque closure pairs used for actions
//! rebuilt from the audit timeline.
//!
//! Contract for every variant:
//!
//! - `undo` then `redo`, repeated any number of times, alternates between the
//!   same two states.
//! - [`Action::description`] is pure.
//! - Failures are returned as [`ActionError`], never raised as panics.

use std::cell::RefCell;
use std::fmt;

use serde_json::Value;

use crate::error::ActionError;

/// Closure run on `undo` or `redo`.
pub type ActionFn<C> = Box<dyn Fn(&mut C) -> Result<(), ActionError>>;

/// Closure that writes one captured value into the context.
pub type SetterFn<C> = Box<dyn Fn(&mut C, &Value) -> Result<(), ActionError>>;

/// A reversible operation over a context `C`.
pub enum Action<C> {
    Simple(SimpleAction<C>),
    Composite(CompositeAction<C>),
    Coalescing(CoalescingAction<C>),
    Delegate(DelegateAction<C>),
}

impl<C> Action<C> {
    /// Build a [`SimpleAction`].
    pub fn simple(
        description: impl Into<String>,
        old: Value,
        new: Value,
        setter: impl Fn(&mut C, &Value) -> Result<(), ActionError> + 'static,
    ) -> Self {
        Self::Simple(SimpleAction {
            description: description.into(),
            old,
            new,
            setter: Box::new(setter),
        })
    }

    /// Build a [`CompositeAction`] from sub-actions in application order.
    pub fn composite(description: impl Into<String>, actions: Vec<Self>) -> Self {
        Self::Composite(CompositeAction {
            description: description.into(),
            actions,
        })
    }

    /// Build a [`CoalescingAction`].
    pub fn coalescing(
        description: impl Into<String>,
        key: impl Into<String>,
        old: Value,
        new: Value,
        setter: impl Fn(&mut C, &Value) -> Result<(), ActionError> + 'static,
    ) -> Self {
        Self::Coalescing(CoalescingAction {
            description: description.into(),
            key: key.into(),
            old,
            new: RefCell::new(new),
            setter: Box::new(setter),
        })
    }

    /// Build a [`DelegateAction`].
    pub fn delegate(
        description: impl Into<String>,
        undo: impl Fn(&mut C) -> Result<(), ActionError> + 'static,
        redo: impl Fn(&mut C) -> Result<(), ActionError> + 'static,
    ) -> Self {
        Self::Delegate(DelegateAction {
            description: description.into(),
            undo: Box::new(undo),
            redo: Box::new(redo),
        })
    }

    #[must_use]
    pub fn description(&self) -> &str {
        match self {
            Self::Simple(a) => &a.description,
            Self::Composite(a) => &a.description,
            Self::Coalescing(a) => &a.description,
            Self::Delegate(a) => &a.description,
        }
    }

    /// Revert the change.
    ///
    /// # Errors
    ///
    /// Returns the [`ActionError`] raised by the underlying setter or closure.
    pub fn undo(&self, ctx: &mut C) -> Result<(), ActionError> {
        match self {
            Self::Simple(a) => (a.setter)(ctx, &a.old),
            Self::Composite(a) => a.undo(ctx),
            Self::Coalescing(a) => (a.setter)(ctx, &a.old),
            Self::Delegate(a) => (a.undo)(ctx),
        }
    }

    /// Re-apply the change.
    ///
    /// # Errors
    ///
    /// Returns the [`ActionError`] raised by the underlying setter or closure.
    pub fn redo(&self, ctx: &mut C) -> Result<(), ActionError> {
        match self {
            Self::Simple(a) => (a.setter)(ctx, &a.new),
            Self::Composite(a) => a.redo(ctx),
            Self::Coalescing(a) => {
                let new = a.new.borrow().clone();
                (a.setter)(ctx, &new)
            }
            Self::Delegate(a) => (a.redo)(ctx),
        }
    }

    /// The coalescing capability, if this action has one.
    #[must_use]
    pub const fn as_coalescing(&self) -> Option<&CoalescingAction<C>> {
        match self {
            Self::Coalescing(a) => Some(a),
            _ => None,
        }
    }

    const fn kind_name(&self) -> &'static str {
        match self {
            Self::Simple(_) => "Simple",
            Self::Composite(_) => "Composite",
            Self::Coalescing(_) => "Coalescing",
            Self::Delegate(_) => "Delegate",
        }
    }
}

impl<C> fmt::Debug for Action<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(self.kind_name())
            .field("description", &self.description())
            .finish_non_exhaustive()
    }
}

/// Swaps between an old and a new value through a setter.
pub struct SimpleAction<C> {
    description: String,
    old: Value,
    new: Value,
    setter: SetterFn<C>,
}

impl<C> SimpleAction<C> {
    #[must_use]
    pub const fn old_value(&self) -> &Value {
        &self.old
    }

    #[must_use]
    pub const fn new_value(&self) -> &Value {
        &self.new
    }
}

/// Ordered sub-actions: undo runs them in reverse, redo forward.
///
/// If a sub-action fails, the ones already applied in that call are rolled
/// back before the error is returned.
pub struct CompositeAction<C> {
    description: String,
    actions: Vec<Action<C>>,
}

impl<C> CompositeAction<C> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    fn undo(&self, ctx: &mut C) -> Result<(), ActionError> {
        for (i, action) in self.actions.iter().enumerate().rev() {
            if let Err(e) = action.undo(ctx) {
                for applied in &self.actions[i + 1..] {
                    if let Err(rollback) = applied.redo(ctx) {
                        tracing::warn!(
                            "rollback of '{}' failed: {rollback}",
                            applied.description()
                        );
                    }
                }
                return Err(e);
            }
        }
        Ok(())
    }

    fn redo(&self, ctx: &mut C) -> Result<(), ActionError> {
        for (i, action) in self.actions.iter().enumerate() {
            if let Err(e) = action.redo(ctx) {
                for applied in self.actions[..i].iter().rev() {
                    if let Err(rollback) = applied.undo(ctx) {
                        tracing::warn!(
                            "rollback of '{}' failed: {rollback}",
                            applied.description()
                        );
                    }
                }
                return Err(e);
            }
        }
        Ok(())
    }
}

/// A value swap that can absorb later edits carrying the same key.
///
/// Absorbing replaces only the "new" value; the original "old" value is kept,
/// so one undo returns to the state before the whole run of edits.
pub struct CoalescingAction<C> {
    description: String,
    key: String,
    old: Value,
    new: RefCell<Value>,
    setter: SetterFn<C>,
}

impl<C> CoalescingAction<C> {
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub const fn old_value(&self) -> &Value {
        &self.old
    }

    #[must_use]
    pub fn new_value(&self) -> Value {
        self.new.borrow().clone()
    }

    /// Take over the "new" value of `next`.
    pub fn absorb(&self, next: &Self) {
        let value = next.new.borrow().clone();
        *self.new.borrow_mut() = value;
    }
}

/// Two opaque closures, one per direction.
pub struct DelegateAction<C> {
    description: String,
    undo: ActionFn<C>,
    redo: ActionFn<C>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[derive(Debug, Default, PartialEq)]
    struct Counter {
        value: i64,
        log: Vec<&'static str>,
    }

    fn set_value(ctx: &mut Counter, v: &Value) -> Result<(), ActionError> {
        ctx.value = v
            .as_i64()
            .ok_or_else(|| ActionError::Failed("not an integer".into()))?;
        Ok(())
    }

    fn push_log(tag: &'static str) -> Action<Counter> {
        Action::delegate(
            tag,
            move |ctx: &mut Counter| {
                ctx.log.retain(|t| *t != tag);
                Ok(())
            },
            move |ctx: &mut Counter| {
                ctx.log.push(tag);
                Ok(())
            },
        )
    }

    #[test]
    fn simple_alternates_between_states() {
        let action = Action::simple("Set value", json!(1), json!(2), set_value);
        let mut ctx = Counter {
            value: 2,
            ..Counter::default()
        };

        for _ in 0..3 {
            action.undo(&mut ctx).unwrap();
            assert_eq!(ctx.value, 1);
            action.redo(&mut ctx).unwrap();
            assert_eq!(ctx.value, 2);
        }
        assert_eq!(action.description(), "Set value");
    }

    #[test]
    fn composite_undo_runs_in_reverse() {
        let action = Action::composite("Batch", vec![push_log("a"), push_log("b")]);
        let mut ctx = Counter::default();

        action.redo(&mut ctx).unwrap();
        assert_eq!(ctx.log, vec!["a", "b"]);
        action.undo(&mut ctx).unwrap();
        assert!(ctx.log.is_empty());
    }

    #[test]
    fn composite_rolls_back_on_failure() {
        let failing = Action::delegate(
            "broken",
            |_: &mut Counter| Err(ActionError::Failed("undo".into())),
            |_: &mut Counter| Err(ActionError::Failed("redo".into())),
        );
        let action = Action::composite("Batch", vec![push_log("a"), push_log("b"), failing]);
        let mut ctx = Counter::default();

        assert!(action.redo(&mut ctx).is_err());
        assert!(ctx.log.is_empty(), "applied sub-actions must be rolled back");
    }

    #[test]
    fn composite_undo_failure_restores_redone_state() {
        let failing = Action::delegate(
            "broken",
            |_: &mut Counter| Err(ActionError::Failed("undo".into())),
            |_: &mut Counter| Ok(()),
        );
        let action = Action::composite("Batch", vec![failing, push_log("a"), push_log("b")]);
        let mut ctx = Counter::default();
        action.redo(&mut ctx).unwrap();

        assert!(action.undo(&mut ctx).is_err());
        assert_eq!(ctx.log, vec!["a", "b"]);
    }

    #[test]
    fn coalescing_absorb_keeps_old_value() {
        let first = Action::coalescing("Edit", "k", json!(1), json!(2), set_value);
        let second = Action::coalescing("Edit", "k", json!(2), json!(3), set_value);
        first
            .as_coalescing()
            .unwrap()
            .absorb(second.as_coalescing().unwrap());

        let merged = first.as_coalescing().unwrap();
        assert_eq!(merged.old_value(), &json!(1));
        assert_eq!(merged.new_value(), json!(3));

        let mut ctx = Counter {
            value: 3,
            ..Counter::default()
        };
        first.undo(&mut ctx).unwrap();
        assert_eq!(ctx.value, 1);
        first.redo(&mut ctx).unwrap();
        assert_eq!(ctx.value, 3);
    }

    #[test]
    fn setter_errors_surface() {
        let action = Action::simple("Bad", json!("x"), json!(1), set_value);
        let mut ctx = Counter::default();
        assert!(matches!(action.undo(&mut ctx), Err(ActionError::Failed(_))));
        assert_eq!(ctx.value, 0);
    }

    #[test]
    fn debug_shows_variant_and_description() {
        let action = push_log("a");
        assert!(format!("{action:?}").starts_with("Delegate"));
        assert!(Action::<Counter>::composite("empty", Vec::new())
            .as_coalescing()
            .is_none());
    }
}
