#![forbid(unsafe_code)]

//! Reversible changes and change groups.
//!
//! A [`Change`] pairs a snapshot of the state *before* a mutation with two
//! callbacks: one that performs the mutation and one that reverts it given
//! the snapshot. A [`ChangeGroup`] is an ordered run of changes recorded as a
//! single history entry.
//!
//! # Invariants
//!
//! - `old_value` is fixed at construction and never re-derived.
//! - `apply()` may be called again on redo, so `execute` must be safe to
//!   repeat from the caller's point of view.
//! - A missing callback is a no-op, never an error.
//!
//! # Failure Modes
//!
//! - **Panicking callback**: the panic unwinds through the stack operation
//!   that invoked it. Members of a group after the panicking one are not run.
//! - **Reentrancy**: callbacks must not call back into the stack that owns
//!   them.

use std::fmt;

use crate::config::RevertOrder;

/// Callback that performs the forward mutation.
pub type ExecuteFn = Box<dyn FnMut() + Send>;
/// Callback that reverts the mutation given the captured old value.
pub type UndoFn<T> = Box<dyn FnMut(&T) + Send>;
/// A stored action, for changes whose "old value" is the inverse operation.
pub type Action = Box<dyn Fn() + Send>;

/// A single reversible change.
pub struct Change<T> {
    old_value: T,
    execute: Option<ExecuteFn>,
    undo: Option<UndoFn<T>>,
    description: Option<String>,
}

impl<T: fmt::Debug> fmt::Debug for Change<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Change")
            .field("old_value", &self.old_value)
            .field("description", &self.description)
            .field("has_execute", &self.execute.is_some())
            .field("has_undo", &self.undo.is_some())
            .finish()
    }
}

impl<T> Change<T> {
    /// Create a change from a snapshot and its execute/undo callbacks.
    #[must_use]
    pub fn new(
        old_value: T,
        execute: impl FnMut() + Send + 'static,
        undo: impl FnMut(&T) + Send + 'static,
    ) -> Self {
        Self::from_parts(old_value, Some(Box::new(execute)), Some(Box::new(undo)))
    }

    /// Create a change from optional callbacks.
    #[must_use]
    pub fn from_parts(old_value: T, execute: Option<ExecuteFn>, undo: Option<UndoFn<T>>) -> Self {
        Self {
            old_value,
            execute,
            undo,
            description: None,
        }
    }

    /// Create a change with no callbacks. Applying or reverting it does nothing
    /// until callbacks are attached.
    #[must_use]
    pub fn snapshot(old_value: T) -> Self {
        Self::from_parts(old_value, None, None)
    }

    /// Set the execute callback.
    #[must_use]
    pub fn with_execute(mut self, execute: impl FnMut() + Send + 'static) -> Self {
        self.execute = Some(Box::new(execute));
        self
    }

    /// Set the undo callback.
    #[must_use]
    pub fn with_undo(mut self, undo: impl FnMut(&T) + Send + 'static) -> Self {
        self.undo = Some(Box::new(undo));
        self
    }

    /// Attach a human-readable description (e.g. "Rename person").
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The snapshot captured before the change.
    #[must_use]
    pub fn old_value(&self) -> &T {
        &self.old_value
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn has_execute(&self) -> bool {
        self.execute.is_some()
    }

    #[must_use]
    pub fn has_undo(&self) -> bool {
        self.undo.is_some()
    }

    /// Run the execute callback, if any.
    pub fn apply(&mut self) {
        if let Some(execute) = self.execute.as_mut() {
            execute();
        }
    }

    /// Run the undo callback with the captured old value, if any.
    pub fn revert(&mut self) {
        if let Some(undo) = self.undo.as_mut() {
            undo(&self.old_value);
        }
    }
}

impl Change<Action> {
    /// Create a command-style change whose snapshot is the inverse action.
    ///
    /// Reverting the change simply runs `inverse`.
    #[must_use]
    pub fn command(
        execute: impl FnMut() + Send + 'static,
        inverse: impl Fn() + Send + 'static,
    ) -> Self {
        Self::new(Box::new(inverse), execute, |inverse: &Action| inverse())
    }
}

/// An ordered run of changes applied and reverted as one history entry.
pub struct ChangeGroup<T> {
    /// Changes in recording order.
    changes: Vec<Change<T>>,
    description: Option<String>,
}

impl<T> fmt::Debug for ChangeGroup<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeGroup")
            .field("changes_count", &self.changes.len())
            .field("description", &self.description())
            .finish()
    }
}

impl<T> Default for ChangeGroup<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ChangeGroup<T> {
    /// Create an empty group.
    #[must_use]
    pub fn new() -> Self {
        Self {
            changes: Vec::new(),
            description: None,
        }
    }

    /// Set the group description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append a change to the group.
    pub fn push(&mut self, change: Change<T>) {
        self.changes.push(change);
    }

    /// Number of changes in the group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Iterate the changes in recording order.
    pub fn iter(&self) -> std::slice::Iter<'_, Change<T>> {
        self.changes.iter()
    }

    /// The group description, falling back to the description of a lone
    /// member.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref().or_else(|| match self.changes.as_slice() {
            [only] => only.description(),
            _ => None,
        })
    }

    /// Apply every change front to back.
    pub fn apply(&mut self) {
        self.changes.iter_mut().for_each(Change::apply);
    }

    /// Revert every change in the given order.
    pub fn revert(&mut self, order: RevertOrder) {
        match order {
            RevertOrder::Forward => self.changes.iter_mut().for_each(Change::revert),
            RevertOrder::Reverse => self.changes.iter_mut().rev().for_each(Change::revert),
        }
    }

    /// Consume the group, returning its changes.
    #[must_use]
    pub fn into_changes(self) -> Vec<Change<T>> {
        self.changes
    }
}

impl<T> From<Change<T>> for ChangeGroup<T> {
    fn from(change: Change<T>) -> Self {
        Self {
            changes: vec![change],
            description: None,
        }
    }
}

impl<T> From<Vec<Change<T>>> for ChangeGroup<T> {
    fn from(changes: Vec<Change<T>>) -> Self {
        Self {
            changes,
            description: None,
        }
    }
}

impl<T> FromIterator<Change<T>> for ChangeGroup<T> {
    fn from_iter<I: IntoIterator<Item = Change<T>>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<T> Extend<Change<T>> for ChangeGroup<T> {
    fn extend<I: IntoIterator<Item = Change<T>>>(&mut self, iter: I) {
        self.changes.extend(iter);
    }
}

impl<'a, T> IntoIterator for &'a ChangeGroup<T> {
    type Item = &'a Change<T>;
    type IntoIter = std::slice::Iter<'a, Change<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.iter()
    }
}

// ============================================================================
// Tests
// ============================================================================
