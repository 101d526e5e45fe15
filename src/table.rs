//! ## Order-statistics table
//! Retains the `capacity` smallest distinct 64-bit values ever inserted.
//!
//! Insertion policy:
//! - while the table has free slots, every new distinct value is kept
//! - once full, values greater than or equal to the current maximum are ignored
//! - once full, a smaller value not yet retained evicts the current maximum
//!
//! Values are kept in a `BTreeSet`, giving `O(log k)` membership, insertion and
//! eviction of the maximum. The set never grows beyond `capacity` elements.

use std::collections::btree_set;
use std::collections::BTreeSet;
use std::mem::size_of;

use crate::error::KmvError;

/// Bounded container of the smallest distinct values observed so far.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderStatisticsTable {
    /// Retained values in ascending order
    values: BTreeSet<u64>,
    /// Maximum number of retained values
    capacity: usize,
}

impl OrderStatisticsTable {
    /// Create new empty table bounded to `capacity` values
    pub fn new(capacity: usize) -> Result<Self, KmvError> {
        if capacity == 0 {
            return Err(KmvError::InvalidConfiguration { capacity });
        }
        Ok(Self {
            values: BTreeSet::new(),
            capacity,
        })
    }

    /// Rebuild a table from previously retained values.
    ///
    /// `values` must be strictly ascending and hold at most `capacity` entries.
    pub(crate) fn from_values(capacity: usize, values: &[u64]) -> Result<Self, KmvError> {
        let mut table = Self::new(capacity)?;
        if values.len() > capacity {
            return Err(KmvError::CorruptedState {
                reason: "more retained hashes than capacity",
            });
        }
        if values.windows(2).any(|w| w[0] >= w[1]) {
            return Err(KmvError::CorruptedState {
                reason: "retained hashes not strictly ascending",
            });
        }
        table.values.extend(values.iter().copied());
        Ok(table)
    }

    /// Insert value into the table.
    /// Returns true if the retained set changed, false otherwise.
    #[inline]
    pub fn insert(&mut self, value: u64) -> bool {
        if self.values.len() < self.capacity {
            return self.values.insert(value);
        }

        match self.values.last() {
            Some(&max) if value < max => {
                if self.values.contains(&value) {
                    return false;
                }
                self.values.pop_last();
                self.values.insert(value)
            }
            _ => false,
        }
    }

    /// Return number of retained values
    #[inline]
    pub fn size(&self) -> usize {
        self.values.len()
    }

    /// Return configured capacity
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Return largest retained value
    #[inline]
    pub fn max(&self) -> Result<u64, KmvError> {
        self.values.last().copied().ok_or(KmvError::EmptyTable)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Return whether the table holds `capacity` values
    #[inline]
    pub fn is_full(&self) -> bool {
        self.values.len() == self.capacity
    }

    #[inline]
    pub fn contains(&self, value: u64) -> bool {
        self.values.contains(&value)
    }

    /// Return retained values in ascending order
    pub fn iter(&self) -> Iter<'_> {
        Iter(self.values.iter())
    }

    /// Return approximate memory size of the table, counting only the retained values
    /// and not the B-tree node overhead.
    pub fn size_of(&self) -> usize {
        size_of::<Self>() + self.values.len() * size_of::<u64>()
    }
}

/// Ascending iterator over retained values
#[derive(Clone, Debug)]
pub struct Iter<'a>(btree_set::Iter<'a, u64>);

impl Iterator for Iter<'_> {
    type Item = u64;

    #[inline]
    fn next(&mut self) -> Option<u64> {
        self.0.next().copied()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}
