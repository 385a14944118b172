#![forbid(unsafe_code)]

//! The undo/redo engine.
//!
//! [`ChangeStack`] keeps two queues of [`ChangeGroup`]s:
//!
//! - **history**: entries applied and not yet undone, oldest at the front
//! - **redos**: entries undone and not yet redone, most recently undone at
//!   the front
//!
//! # Invariants
//!
//! 1. `redos` is empty right after any `add`/`add_group`.
//! 2. `history.len() <= config.retained_capacity()` after any add.
//! 3. An entry lives in exactly one of the two queues.
//! 4. `clear()` never touches `config`.
//!
//! # Lifecycle
//!
//! ```text
//! add(c1) add(c2) add(c3)
//! ┌───────────────────────────────────────────────┐
//! │ History: [c1, c2, c3]                         │
//! │ Redos:   []                                   │
//! └───────────────────────────────────────────────┘
//!
//! undo() x2
//! ┌───────────────────────────────────────────────┐
//! │ History: [c1]                                 │
//! │ Redos:   [c2, c3]                             │
//! └───────────────────────────────────────────────┘
//!
//! add(c4)  <-- clears redos
//! ┌───────────────────────────────────────────────┐
//! │ History: [c1, c4]                             │
//! │ Redos:   []                                   │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! # Capacity
//!
//! With the default [`CapacityPolicy::Lenient`](crate::CapacityPolicy) a
//! stack built with `limit = L > 0` retains `L + 1` entries. This matches the
//! long-standing behaviour of the classic change stack that callers rely on.
//! Use [`CapacityPolicy::Exact`](crate::CapacityPolicy) to retain exactly `L`.
//!
//! # Failure Modes
//!
//! Callbacks that panic unwind through `add`, `undo` and `redo`. The entry
//! being moved has already left its source queue by then and is dropped, so
//! the recorded timeline no longer matches the external state.

use std::collections::VecDeque;
use std::fmt;

use crate::change::{Change, ChangeGroup};
use crate::config::StackConfig;
use crate::error::{StackError, StackResult};

const TARGET: &str = "changekit.stack";

/// Undo/redo history over changes that snapshot a `T`.
pub struct ChangeStack<T> {
    /// Applied entries (oldest at front).
    history: VecDeque<ChangeGroup<T>>,
    /// Undone entries (most recently undone at front).
    redos: VecDeque<ChangeGroup<T>>,
    config: StackConfig,
}

impl<T> fmt::Debug for ChangeStack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeStack")
            .field("undo_depth", &self.history.len())
            .field("redo_depth", &self.redos.len())
            .field("config", &self.config)
            .finish()
    }
}

impl<T> Default for ChangeStack<T> {
    fn default() -> Self {
        Self::with_config(StackConfig::default())
    }
}

impl<T> ChangeStack<T> {
    /// Create a stack with the given limit (0 = unlimited) and default
    /// policies.
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self::with_config(StackConfig::new(limit))
    }

    /// Create a stack with an explicit configuration.
    #[must_use]
    pub fn with_config(config: StackConfig) -> Self {
        Self {
            history: VecDeque::new(),
            redos: VecDeque::new(),
            config,
        }
    }

    // ========================================================================
    // Core Operations
    // ========================================================================

    /// Apply a change and record it as a new history entry.
    ///
    /// Clears the redo side and enforces the capacity limit.
    pub fn add(&mut self, change: Change<T>) {
        self.add_group(change);
    }

    /// Apply a group of changes in order and record them as one entry.
    ///
    /// An empty group still records an (empty) entry and clears redo.
    pub fn add_group(&mut self, group: impl Into<ChangeGroup<T>>) {
        let mut group = group.into();
        let _span =
            tracing::debug_span!(target: TARGET, "change_stack.add", changes = group.len())
                .entered();

        group.apply();
        self.history.push_back(group);
        self.move_forward();

        tracing::debug!(
            target: TARGET,
            undo_depth = self.history.len(),
            "recorded history entry"
        );
    }

    /// Undo the most recent entry.
    ///
    /// Returns `false` (and does nothing) when history is empty.
    pub fn undo(&mut self) -> bool {
        let _span = tracing::debug_span!(target: TARGET, "change_stack.undo").entered();

        let Some(mut group) = self.history.pop_back() else {
            tracing::trace!(target: TARGET, "undo requested with empty history");
            return false;
        };

        group.revert(self.config.revert_order);
        self.redos.push_front(group);

        tracing::debug!(
            target: TARGET,
            undo_depth = self.history.len(),
            redo_depth = self.redos.len(),
            "reverted history entry"
        );
        true
    }

    /// Redo the most recently undone entry.
    ///
    /// Returns `false` (and does nothing) when nothing has been undone.
    pub fn redo(&mut self) -> bool {
        let _span = tracing::debug_span!(target: TARGET, "change_stack.redo").entered();

        let Some(mut group) = self.redos.pop_front() else {
            tracing::trace!(target: TARGET, "redo requested with no undone entries");
            return false;
        };

        group.apply();
        self.history.push_back(group);

        tracing::debug!(
            target: TARGET,
            undo_depth = self.history.len(),
            redo_depth = self.redos.len(),
            "reapplied history entry"
        );
        true
    }

    /// Undo the most recent entry, failing when history is empty.
    pub fn try_undo(&mut self) -> StackResult<()> {
        if self.undo() {
            Ok(())
        } else {
            Err(StackError::NothingToUndo)
        }
    }

    /// Redo the most recently undone entry, failing when there is none.
    pub fn try_redo(&mut self) -> StackResult<()> {
        if self.redo() {
            Ok(())
        } else {
            Err(StackError::NothingToRedo)
        }
    }

    /// Check if undo is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// Check if redo is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redos.is_empty()
    }

    // ========================================================================
    // Info
    // ========================================================================

    /// Number of entries available to undo.
    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.history.len()
    }

    /// Number of entries available to redo.
    #[must_use]
    pub fn redo_depth(&self) -> usize {
        self.redos.len()
    }

    /// True when both sides are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty() && self.redos.is_empty()
    }

    /// The configured limit (0 = unlimited).
    #[must_use]
    pub fn limit(&self) -> usize {
        self.config.limit
    }

    /// Get the current configuration.
    #[must_use]
    pub fn config(&self) -> &StackConfig {
        &self.config
    }

    /// Descriptions of undoable entries, most recent first.
    #[must_use]
    pub fn undo_descriptions(&self, limit: usize) -> Vec<Option<&str>> {
        self.history
            .iter()
            .rev()
            .take(limit)
            .map(ChangeGroup::description)
            .collect()
    }

    /// Descriptions of redoable entries, next redo first.
    #[must_use]
    pub fn redo_descriptions(&self, limit: usize) -> Vec<Option<&str>> {
        self.redos
            .iter()
            .take(limit)
            .map(ChangeGroup::description)
            .collect()
    }

    /// Description of the entry the next undo reverts.
    #[must_use]
    pub fn next_undo_description(&self) -> Option<&str> {
        self.history.back().and_then(ChangeGroup::description)
    }

    /// Description of the entry the next redo reapplies.
    #[must_use]
    pub fn next_redo_description(&self) -> Option<&str> {
        self.redos.front().and_then(ChangeGroup::description)
    }

    /// Entries available to undo, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &ChangeGroup<T>> {
        self.history.iter()
    }

    /// Entries available to redo, next redo first.
    pub fn redos(&self) -> impl Iterator<Item = &ChangeGroup<T>> {
        self.redos.iter()
    }

    // ========================================================================
    // Maintenance
    // ========================================================================

    /// Drop all history. Changes already applied stay applied.
    pub fn clear(&mut self) {
        let _span = tracing::debug_span!(target: TARGET, "change_stack.clear").entered();

        tracing::debug!(
            target: TARGET,
            undo_depth = self.history.len(),
            redo_depth = self.redos.len(),
            "cleared history"
        );
        self.history.clear();
        self.redos.clear();
    }

    /// Start a new branch: drop redos and evict entries over capacity.
    fn move_forward(&mut self) {
        self.redos.clear();

        let Some(capacity) = self.config.retained_capacity() else {
            return;
        };
        while self.history.len() > capacity {
            if let Some(evicted) = self.history.pop_front() {
                tracing::debug!(
                    target: TARGET,
                    evicted_changes = evicted.len(),
                    limit = self.config.limit,
                    "evicted oldest history entry"
                );
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
