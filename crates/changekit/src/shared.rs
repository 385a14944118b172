#![forbid(unsafe_code)]

//! Thread-shared handle to a [`ChangeStack`].
//!
//! The stack itself does no locking. [`SharedChangeStack`] serializes every
//! call through one `Mutex`, so multiple threads can record and undo against
//! the same history. Callbacks run while the lock is held: a callback that
//! touches the same handle deadlocks.
//!
//! A poisoned lock (a callback panicked on another thread) is recovered
//! rather than propagated; the history is then in whatever state the
//! panicking operation left it.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::change::{Change, ChangeGroup};
use crate::config::StackConfig;
use crate::error::StackResult;
use crate::stack::ChangeStack;

/// Cloneable, lock-protected handle to a change stack.
pub struct SharedChangeStack<T> {
    inner: Arc<Mutex<ChangeStack<T>>>,
}

impl<T> Clone for SharedChangeStack<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for SharedChangeStack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedChangeStack").field(&*self.lock()).finish()
    }
}

impl<T> Default for SharedChangeStack<T> {
    fn default() -> Self {
        Self::from(ChangeStack::default())
    }
}

impl<T> From<ChangeStack<T>> for SharedChangeStack<T> {
    fn from(stack: ChangeStack<T>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(stack)),
        }
    }
}

impl<T> SharedChangeStack<T> {
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self::from(ChangeStack::new(limit))
    }

    #[must_use]
    pub fn with_config(config: StackConfig) -> Self {
        Self::from(ChangeStack::with_config(config))
    }

    fn lock(&self) -> MutexGuard<'_, ChangeStack<T>> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Run `f` with exclusive access to the underlying stack.
    pub fn with<R>(&self, f: impl FnOnce(&mut ChangeStack<T>) -> R) -> R {
        f(&mut self.lock())
    }

    pub fn add(&self, change: Change<T>) {
        self.lock().add(change);
    }

    pub fn add_group(&self, group: impl Into<ChangeGroup<T>>) {
        self.lock().add_group(group);
    }

    pub fn undo(&self) -> bool {
        self.lock().undo()
    }

    pub fn redo(&self) -> bool {
        self.lock().redo()
    }

    pub fn try_undo(&self) -> StackResult<()> {
        self.lock().try_undo()
    }

    pub fn try_redo(&self) -> StackResult<()> {
        self.lock().try_redo()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.lock().can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.lock().can_redo()
    }

    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.lock().undo_depth()
    }

    #[must_use]
    pub fn redo_depth(&self) -> usize {
        self.lock().redo_depth()
    }
}
