//! Core types for the component library
//!
//! This module defines the error type, the priority type and the opaque handle
//! returned by every hook registration. Everything else in the crate builds on
//! these.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Result type for component operations
pub type Result<T> = std::result::Result<T, ComponentError>;

/// Callback priority (lower runs earlier)
pub type Priority = i32;

/// Priority used by `add_action` / `add_filter`
pub const DEFAULT_PRIORITY: Priority = 10;

/// Errors that can occur while running hooks or reading configuration
#[derive(Debug, thiserror::Error)]
pub enum ComponentError {
    /// Error returned by a registered callback, passed through as-is
    #[error(transparent)]
    Callback(#[from] anyhow::Error),

    /// A configuration key holds a value of the wrong type
    #[error("Invalid configuration value for key '{key}': {source}")]
    InvalidConfigValue {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration is not a key-value table
    #[error("Configuration must be a key-value table, got: {0}")]
    InvalidConfig(String),
}

static NEXT_HANDLE: AtomicU64 = AtomicU64::new(1);

/// Opaque token identifying one registration
///
/// Returned by every `register_*` / `add_*` call and required to remove the
/// registration again. Handles are unique for the lifetime of the process, so
/// a handle from one table never matches an entry of another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HookHandle(u64);

impl HookHandle {
    pub(crate) fn next() -> Self {
        Self(NEXT_HANDLE.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value of the handle
    pub fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for HookHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which of the two hook tables an entry lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookKind {
    /// Fire-and-forget callbacks
    Action,
    /// Value-transforming callbacks
    Filter,
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HookKind::Action => write!(f, "ACTION"),
            HookKind::Filter => write!(f, "FILTER"),
        }
    }
}
