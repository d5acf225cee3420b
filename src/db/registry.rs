//! Named prepared-statement registry.
//!
//! The registry maps statement names to a tagged slot rather than a
//! nullable handle, so the two lookup failure modes form a closed
//! enumeration: a name that was never registered is distinct from a name
//! whose preparation did not succeed.

use crate::error::{DalError, DalResult};
use std::collections::HashMap;

/// A registered statement slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementSlot<S> {
    /// Known name with no usable handle: preparation is pending or failed.
    Uninitialized,
    /// Prepared and ready for execution.
    Ready(S),
}

/// Mapping from statement name to slot.
///
/// Populated once at startup and read-only afterwards; runtime
/// re-registration is outside the supported contract and must be
/// synchronized externally. Generic over the handle type so lookup
/// semantics are testable without a live server.
#[derive(Clone)]
pub struct StatementRegistry<S> {
    statements: HashMap<String, StatementSlot<S>>,
}

impl<S> StatementRegistry<S> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            statements: HashMap::new(),
        }
    }

    /// Register a prepared statement under `name`.
    pub fn insert(&mut self, name: impl Into<String>, statement: S) {
        self.statements
            .insert(name.into(), StatementSlot::Ready(statement));
    }

    /// Register `name` without a handle.
    ///
    /// Used when preparation failed upstream: the name stays known to the
    /// system, and lookups report "not initialized" instead of "not found".
    pub fn reserve(&mut self, name: impl Into<String>) {
        self.statements
            .insert(name.into(), StatementSlot::Uninitialized);
    }

    /// Look up a prepared statement by name.
    ///
    /// Returns `StatementNotFound` when `name` was never registered and
    /// `StatementNotInitialized` when it was registered without a handle.
    /// No side effects, no logging; the caller decides severity.
    pub fn lookup(&self, name: &str) -> DalResult<&S> {
        match self.statements.get(name) {
            None => Err(DalError::statement_not_found(name)),
            Some(StatementSlot::Uninitialized) => Err(DalError::statement_not_initialized(name)),
            Some(StatementSlot::Ready(statement)) => Ok(statement),
        }
    }

    /// Check if a name is registered, initialized or not.
    pub fn contains(&self, name: &str) -> bool {
        self.statements.contains_key(name)
    }

    /// Number of registered names.
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Iterate over registered names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.statements.keys().map(String::as_str)
    }
}

impl<S> Default for StatementRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> std::fmt::Debug for StatementRegistry<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (name, slot) in &self.statements {
            let state = match slot {
                StatementSlot::Uninitialized => "uninitialized",
                StatementSlot::Ready(_) => "ready",
            };
            map.entry(name, &state);
        }
        map.finish()
    }
}
