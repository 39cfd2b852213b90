//! Clock Types
//!
//! Identifiers and relation kinds shared by every clock operation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Process identifier
///
/// # Design Notes
///
/// A newtype over the process name so a process can never be confused with
/// an arbitrary string (an event label, a file name) in a signature. Ordering
/// is lexicographic, which is what makes clock display deterministic.
///
/// # Example
///
/// ```rust
/// use hbgraph_core::domain::clock::ProcessId;
///
/// let a = ProcessId::new("A");
/// assert_eq!(a.as_str(), "A");
/// assert!(a < ProcessId::from("B"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcessId(String);

impl ProcessId {
    /// Create a new process identifier
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Borrow the process name
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProcessId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ProcessId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Happens-before relationship between two clocks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HappensBeforeRelation {
    /// First clock happens-before the second
    Before,
    /// Second clock happens-before the first
    After,
    /// Neither is ordered (includes equivalent clocks)
    Concurrent,
}

impl HappensBeforeRelation {
    /// Relation seen from the other operand
    #[inline]
    pub fn reverse(self) -> Self {
        match self {
            Self::Before => Self::After,
            Self::After => Self::Before,
            Self::Concurrent => Self::Concurrent,
        }
    }

    /// True for `Before` and `After`
    #[inline]
    pub fn is_ordered(self) -> bool {
        !matches!(self, Self::Concurrent)
    }
}
