#![forbid(unsafe_code)]

//! Errors surfaced by the strict stack operations.
//!
//! The default [`undo`](crate::ChangeStack::undo) and
//! [`redo`](crate::ChangeStack::redo) are silent no-ops on an empty side.
//! [`try_undo`](crate::ChangeStack::try_undo) and
//! [`try_redo`](crate::ChangeStack::try_redo) report that case instead.

use std::fmt;

/// Result of a strict stack operation.
pub type StackResult<T> = Result<T, StackError>;

/// Errors that can occur during a strict undo or redo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackError {
    /// History is empty.
    NothingToUndo,
    /// No undone entries are waiting.
    NothingToRedo,
}

impl fmt::Display for StackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NothingToUndo => write!(f, "nothing to undo"),
            Self::NothingToRedo => write!(f, "nothing to redo"),
        }
    }
}

impl std::error::Error for StackError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(StackError::NothingToUndo.to_string(), "nothing to undo");
        assert_eq!(StackError::NothingToRedo.to_string(), "nothing to redo");
    }
}
