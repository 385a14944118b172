#![forbid(unsafe_code)]

//! Undo/redo change history for arbitrary mutable state.
//!
//! `changekit` records reversible changes against state it never owns. The
//! caller captures the "before" value, supplies an execute callback and an
//! undo callback, and hands the resulting [`Change`] to a [`ChangeStack`],
//! which runs it immediately and keeps it for undo.
//!
//! # Key Components
//!
//! - [`Change`] - Snapshot plus execute/undo callbacks
//! - [`ChangeGroup`] - Changes recorded as one history step
//! - [`ChangeStack`] - Dual-queue undo/redo engine with a capacity limit
//! - [`StackConfig`] - Limit and bookkeeping policies
//! - [`SharedChangeStack`] - Lock-protected handle for multi-threaded hosts
//!
//! # Quick Start
//!
//! ```
//! use std::sync::{Arc, Mutex};
//! use changekit::{Change, ChangeStack};
//!
//! let name = Arc::new(Mutex::new(String::new()));
//! let mut changes = ChangeStack::new(5);
//!
//! let old = name.lock().unwrap().clone();
//! let (set, restore) = (name.clone(), name.clone());
//! changes.add(Change::new(
//!     old,
//!     move || *set.lock().unwrap() = "Jane".to_string(),
//!     move |old: &String| *restore.lock().unwrap() = old.clone(),
//! ));
//! assert_eq!(*name.lock().unwrap(), "Jane");
//!
//! changes.undo();
//! assert_eq!(*name.lock().unwrap(), "");
//!
//! changes.redo();
//! assert_eq!(*name.lock().unwrap(), "Jane");
//! ```
//!
//! # Concurrency
//!
//! Every operation is synchronous and runs to completion on the calling
//! thread. The stack performs no locking; wrap it in [`SharedChangeStack`]
//! (or your own mutex) when several threads need it. Callbacks must not call
//! back into the stack that is running them.

pub mod change;
pub mod config;
pub mod error;
pub mod shared;
pub mod stack;

pub use change::{Action, Change, ChangeGroup, ExecuteFn, UndoFn};
pub use config::{CapacityPolicy, ConfigError, RevertOrder, StackConfig};
pub use error::{StackError, StackResult};
pub use shared::SharedChangeStack;
pub use stack::ChangeStack;
