//! Node bitset used for reachability bookkeeping
//!
//! # Design
//!
//! - **Capacity:** fixed at construction (number of graph nodes)
//! - **Storage:** `ceil(capacity / 64)` words
//! - **Union:** word-wise OR, 64 nodes per instruction
//!
//! ```text
//! insert(3):     words[0] |= (1 << 3)
//! contains(70):  words[1] & (1 << 6)
//! union_with:    words[i] |= other.words[i]
//! ```

use std::fmt;

const WORD_BITS: usize = 64;

/// Fixed-capacity set of node indices
#[derive(Clone, PartialEq, Eq)]
pub struct NodeSet {
    words: Vec<u64>,
    capacity: usize,
}

impl NodeSet {
    /// Create an empty set able to hold indices `0..capacity`
    pub fn new(capacity: usize) -> Self {
        Self {
            words: vec![0; capacity.div_ceil(WORD_BITS)],
            capacity,
        }
    }

    /// Insert an index
    ///
    /// # Panics
    ///
    /// Panics if `idx >= capacity`
    #[inline]
    pub fn insert(&mut self, idx: usize) {
        assert!(idx < self.capacity, "Index out of bounds: {idx}");
        self.words[idx / WORD_BITS] |= 1u64 << (idx % WORD_BITS);
    }

    /// Check membership (out-of-range indices are never members)
    #[inline]
    pub fn contains(&self, idx: usize) -> bool {
        idx < self.capacity && (self.words[idx / WORD_BITS] & (1u64 << (idx % WORD_BITS))) != 0
    }

    /// Add every member of `other` to `self`
    ///
    /// # Panics
    ///
    /// Panics if the capacities differ
    #[inline]
    pub fn union_with(&mut self, other: &Self) {
        assert_eq!(self.capacity, other.capacity, "NodeSet capacity mismatch");
        for (mine, theirs) in self.words.iter_mut().zip(&other.words) {
            *mine |= *theirs;
        }
    }

    /// Remove every member
    #[inline]
    pub fn clear(&mut self) {
        self.words.fill(0);
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// True if the set has no members
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Members in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(w, &word)| {
            let mut bits = word;
            std::iter::from_fn(move || {
                if bits == 0 {
                    None
                } else {
                    let bit = bits.trailing_zeros() as usize;
                    bits &= bits - 1;
                    Some(w * WORD_BITS + bit)
                }
            })
        })
    }
}

impl fmt::Debug for NodeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
