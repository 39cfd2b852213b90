//! Vector Clock Implementation
//!
//! Vector clocks are used to track causality (happens-before relation)
//! between events recorded on different processes.
//!
//! # Theory
//!
//! Given events e1 and e2:
//! - e1 happens-before e2 (e1 → e2) if VC(e1) < VC(e2)
//! - e1 and e2 are concurrent if neither happens-before the other
//!
//! # Implementation
//!
//! Entries live in a `BTreeMap` keyed by process, so iteration and display
//! are ordered. A process missing from the map reads as zero; every
//! comparison therefore runs over the *union* of both key sets.

use super::types::{HappensBeforeRelation, ProcessId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Vector clock for tracking causality
///
/// # Representation
///
/// One counter per process, summarizing how much of that process's history
/// the owner has observed.
///
/// ```text
/// A's send:     <A:2, B:0>   (A has executed 2 events, saw nothing of B)
/// B's receive:  <A:2, B:1>   (B merged A's clock, then ticked itself)
/// ```
///
/// A clock attached to an event is never mutated again; new clocks are
/// derived with `clone()` followed by [`tick`](Self::tick) or
/// [`merge`](Self::merge).
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VectorClock {
    clocks: BTreeMap<ProcessId, u64>,
}

impl VectorClock {
    /// Create an empty clock (every process reads as zero)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock with an explicit zero entry for each named process
    ///
    /// Logically identical to [`VectorClock::new`]; the explicit entries only
    /// make display output list every process.
    ///
    /// # Example
    ///
    /// ```rust
    /// use hbgraph_core::domain::clock::VectorClock;
    ///
    /// let vc = VectorClock::zero(["A", "B"]);
    /// assert_eq!(vc.to_string(), "<A:0, B:0>");
    /// assert_eq!(vc, VectorClock::new());
    /// ```
    pub fn zero<I, P>(processes: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<ProcessId>,
    {
        processes.into_iter().map(|p| (p, 0)).collect()
    }

    /// Get the counter for a process (zero if absent)
    #[inline]
    pub fn get(&self, process: &ProcessId) -> u64 {
        self.clocks.get(process).copied().unwrap_or(0)
    }

    /// Set the counter for a process
    pub fn set(&mut self, process: impl Into<ProcessId>, value: u64) {
        self.clocks.insert(process.into(), value);
    }

    /// Increment the counter of `process` and return the new value
    ///
    /// # Example
    ///
    /// ```rust
    /// use hbgraph_core::domain::clock::{ProcessId, VectorClock};
    ///
    /// let a = ProcessId::from("A");
    /// let mut vc = VectorClock::new();
    /// vc.tick(&a);
    /// assert_eq!(vc.tick(&a), 2);
    /// ```
    pub fn tick(&mut self, process: &ProcessId) -> u64 {
        let counter = self.clocks.entry(process.clone()).or_insert(0);
        *counter = counter.saturating_add(1);
        *counter
    }

    /// Merge with another vector clock (element-wise max)
    ///
    /// This is used when a process receives a message.
    ///
    /// ```text
    /// self:  <A:3, B:1>
    /// other: <A:2, B:5, C:1>
    /// result:<A:3, B:5, C:1>
    /// ```
    pub fn merge(&mut self, other: &VectorClock) {
        for (process, &value) in &other.clocks {
            let entry = self.clocks.entry(process.clone()).or_insert(0);
            if value > *entry {
                *entry = value;
            }
        }
    }

    /// Check if this clock happens-before another
    ///
    /// # Definition
    ///
    /// VC1 < VC2 iff, over the union of both key sets:
    /// - For all p: VC1[p] <= VC2[p], AND
    /// - Exists q: VC1[q] < VC2[q]
    ///
    /// # Example
    ///
    /// ```text
    /// <A:1>       happens-before <A:2, B:0>   ✓
    /// <A:1, C:1>  happens-before <A:1>        ✗ (C: 1 > 0)
    /// <A:1, B:2>  happens-before <A:1, B:2>   ✗ (equal)
    /// ```
    pub fn happens_before(&self, other: &VectorClock) -> bool {
        let mut some_strictly_less = false;

        for (process, &mine) in &self.clocks {
            let theirs = other.get(process);
            if mine > theirs {
                return false;
            }
            if mine < theirs {
                some_strictly_less = true;
            }
        }

        // Keys only present in `other` compare against an implicit zero here.
        if !some_strictly_less {
            some_strictly_less = other
                .clocks
                .iter()
                .any(|(process, &theirs)| theirs > 0 && !self.clocks.contains_key(process));
        }

        some_strictly_less
    }

    /// Check if two clocks are concurrent (neither happens-before the other)
    #[inline]
    pub fn concurrent(&self, other: &VectorClock) -> bool {
        !self.happens_before(other) && !other.happens_before(self)
    }

    /// Classify the causal relation between two clocks
    pub fn relation(&self, other: &VectorClock) -> HappensBeforeRelation {
        if self.happens_before(other) {
            HappensBeforeRelation::Before
        } else if other.happens_before(self) {
            HappensBeforeRelation::After
        } else {
            HappensBeforeRelation::Concurrent
        }
    }

    /// True when both clocks agree on every process (absent = zero)
    pub fn equivalent(&self, other: &VectorClock) -> bool {
        self.clocks.iter().all(|(p, &v)| other.get(p) == v)
            && other.clocks.iter().all(|(p, &v)| self.get(p) == v)
    }

    /// Sum of all counters
    pub fn sum(&self) -> u64 {
        self.clocks.values().fold(0u64, |acc, &v| acc.saturating_add(v))
    }

    /// Processes with an explicit entry, in order
    pub fn processes(&self) -> impl Iterator<Item = &ProcessId> + '_ {
        self.clocks.keys()
    }

    /// Explicit entries, in process order
    pub fn iter(&self) -> impl Iterator<Item = (&ProcessId, u64)> + '_ {
        self.clocks.iter().map(|(p, &v)| (p, v))
    }

    /// Number of explicit entries
    #[inline]
    pub fn len(&self) -> usize {
        self.clocks.len()
    }

    /// True if no process has an explicit entry
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.clocks.is_empty()
    }
}

impl PartialEq for VectorClock {
    fn eq(&self, other: &Self) -> bool {
        self.equivalent(other)
    }
}

impl Eq for VectorClock {}

impl<P: Into<ProcessId>> FromIterator<(P, u64)> for VectorClock {
    fn from_iter<I: IntoIterator<Item = (P, u64)>>(iter: I) -> Self {
        Self {
            clocks: iter.into_iter().map(|(p, v)| (p.into(), v)).collect(),
        }
    }
}

impl fmt::Display for VectorClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<")?;
        for (i, (process, value)) in self.clocks.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{process}:{value}")?;
        }
        write!(f, ">")
    }
}

impl fmt::Debug for VectorClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VC{self}")
    }
}
