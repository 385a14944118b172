#![forbid(unsafe_code)]

//! Configuration for [`ChangeStack`](crate::ChangeStack).
//!
//! [`StackConfig`] captures the capacity limit and the two policy knobs that
//! shape history bookkeeping. With the `config` feature it can be loaded from
//! TOML or JSON:
//!
//! ```toml
//! # changekit.toml
//! limit = 50
//! capacity = "lenient"
//! revert_order = "forward"
//! ```
//!
//! ```no_run
//! # #[cfg(feature = "config")]
//! # fn main() -> Result<(), changekit::ConfigError> {
//! use changekit::{ChangeStack, StackConfig};
//!
//! let config = StackConfig::from_toml_file("changekit.toml")?;
//! let stack = ChangeStack::<String>::with_config(config);
//! # drop(stack);
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "config"))]
//! # fn main() {}
//! ```
//!
//! # Defaults
//!
//! `StackConfig::default()` is unlimited, lenient and forward-reverting,
//! which reproduces the classic change-stack bookkeeping exactly.

use std::fmt;

#[cfg(feature = "config")]
use std::path::Path;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

/// How the `limit` of a stack translates into retained history entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "snake_case"))]
pub enum CapacityPolicy {
    /// Keep `limit + 1` entries before evicting the oldest.
    #[default]
    Lenient,
    /// Keep exactly `limit` entries.
    Exact,
}

/// Order in which the members of a group are reverted on undo.
///
/// Apply (and redo) always runs members front to back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "snake_case"))]
pub enum RevertOrder {
    /// Revert members in the order they were recorded.
    #[default]
    Forward,
    /// Revert members last to first.
    Reverse,
}

/// Configuration for a change stack.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct StackConfig {
    /// Maximum history entries (0 = unlimited). See [`CapacityPolicy`].
    pub limit: usize,
    /// How `limit` is enforced.
    pub capacity: CapacityPolicy,
    /// Member order when reverting a group.
    pub revert_order: RevertOrder,
}

impl StackConfig {
    /// Create a configuration with the given limit and default policies.
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    /// Create an unlimited configuration.
    #[must_use]
    pub fn unlimited() -> Self {
        Self::new(0)
    }

    /// Set the capacity policy.
    #[must_use]
    pub fn with_capacity_policy(mut self, capacity: CapacityPolicy) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the group revert order.
    #[must_use]
    pub fn with_revert_order(mut self, order: RevertOrder) -> Self {
        self.revert_order = order;
        self
    }

    /// Maximum number of history entries retained, or `None` when unbounded.
    #[must_use]
    pub fn retained_capacity(&self) -> Option<usize> {
        if self.limit == 0 {
            return None;
        }
        match self.capacity {
            CapacityPolicy::Lenient => Some(self.limit.saturating_add(1)),
            CapacityPolicy::Exact => Some(self.limit),
        }
    }

    /// Validate the configuration.
    ///
    /// Returns a list of problems. An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.capacity == CapacityPolicy::Exact && self.limit == 0 {
            errors.push("capacity = \"exact\" requires limit > 0".into());
        }

        errors
    }

    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(ConfigError::Toml)?;
        config.validated()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s).map_err(ConfigError::Json)?;
        config.validated()
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    #[cfg(feature = "config")]
    fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

/// Errors from loading a [`StackConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
