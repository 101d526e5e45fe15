//! KMV (K-Minimum-Values) estimator allows to estimate number of distinct elements
//! in the stream or dataset while keeping memory bounded by its `capacity` parameter:
//! - `capacity`: number of smallest distinct hashes retained, `k`.
//! - `seed`: 32-bit seed passed to the hash function for every token.
//!
//! # Estimation
//!
//! Tokens are hashed uniformly onto `[0, u64::MAX]`. If `n` distinct hashes populate
//! that range, the `k`-th smallest one is expected near `k * u64::MAX / (n + 1)`.
//! Solving for `n` gives the classical KMV estimate `k * u64::MAX / X`, where `X` is the
//! largest retained hash. It is computed as `u64::MAX / (X / k)` so that no intermediate
//! value overflows.
//!
//! ## Filling regime
//! Until `k` distinct hashes have been observed, the table holds all of them and
//! the estimate is the exact number of distinct hashes seen.
//!
//! ## Saturated regime
//! Once the table is full it stays full and the estimate becomes statistical.
//! - Expected relative standard error is roughly `1 / sqrt(k - 2)`:
//!   k = 16: 26.7%,
//!   k = 64: 12.7%,
//!   k = 256: 6.3%
//!
//! # Element counter
//! Every `insert_*` call increments `elements_added`, whether or not the hash was
//! distinct or retained. It counts stream length processed, not distinct elements.
//! The counter saturates at `u64::MAX` and never decreases.

use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;
use std::mem::size_of;

use crate::error::KmvError;
use crate::hash::{Murmur3Hasher, SeededHasher};
use crate::stream::Report;
use crate::table::{self, OrderStatisticsTable};

/// Capacity used when none is configured
pub const DEFAULT_CAPACITY: usize = 64;

/// Two cardinality regimes of `KmvEstimator`.
/// The transition from `Filling` to `Saturated` is one-way.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Regime {
    /// Table not yet full, estimate is exact
    Filling,
    /// Table full, estimate is statistical
    Saturated,
}

/// Distinct-count sketch retaining the `capacity` smallest hashes of the inserted tokens.
///
/// `H` picks the seeded hash function applied by `insert_token`.
pub struct KmvEstimator<H: SeededHasher = Murmur3Hasher> {
    /// Smallest distinct hashes observed so far
    pub(crate) table: OrderStatisticsTable,
    /// Seed used for every token hash
    pub(crate) seed: u32,
    /// Number of `insert_*` calls
    pub(crate) total_count: u64,
    /// Zero-sized hash function marker
    _hasher: PhantomData<H>,
}

impl<H: SeededHasher> KmvEstimator<H> {
    /// Creates new instance of `KmvEstimator` retaining `capacity` hashes
    #[inline]
    pub fn new(capacity: usize, seed: u32) -> Result<Self, KmvError> {
        Ok(Self::from_parts(OrderStatisticsTable::new(capacity)?, seed, 0))
    }

    /// Creates new instance of `KmvEstimator` with a random seed
    pub fn with_random_seed(capacity: usize) -> Result<Self, KmvError> {
        Self::new(capacity, rand::random())
    }

    #[inline]
    pub(crate) fn from_parts(table: OrderStatisticsTable, seed: u32, total_count: u64) -> Self {
        Self {
            table,
            seed,
            total_count,
            _hasher: PhantomData,
        }
    }

    /// Insert a token into `KmvEstimator`
    #[inline]
    pub fn insert_token<B: AsRef<[u8]> + ?Sized>(&mut self, token: &B) {
        let hash = H::hash(token.as_ref(), self.seed);
        self.insert_hash(hash);
    }

    /// Insert hash into `KmvEstimator`
    #[inline]
    pub fn insert_hash(&mut self, hash: u64) {
        self.total_count = self.total_count.saturating_add(1);
        self.table.insert(hash);
    }

    /// Return number of `insert_*` calls made so far
    #[inline]
    pub fn elements_added(&self) -> u64 {
        self.total_count
    }

    /// Return number of retained hashes
    #[inline]
    pub fn retained_size(&self) -> usize {
        self.table.size()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    #[inline]
    pub fn seed(&self) -> u32 {
        self.seed
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Return current cardinality regime
    #[inline]
    pub fn regime(&self) -> Regime {
        if self.table.is_full() {
            Regime::Saturated
        } else {
            Regime::Filling
        }
    }

    /// Return retained hashes in ascending order
    pub fn retained(&self) -> table::Iter<'_> {
        self.table.iter()
    }

    /// Return cardinality estimate
    pub fn estimate_cardinality(&self) -> Result<u64, KmvError> {
        match self.regime() {
            Regime::Filling => Ok(self.table.size() as u64),
            Regime::Saturated => {
                let max = self.table.max()?;
                let capacity = self.table.capacity();
                let mean_gap = max / capacity as u64;
                if mean_gap == 0 {
                    return Err(KmvError::DegenerateEstimate { max, capacity });
                }
                Ok(u64::MAX / mean_gap)
            }
        }
    }

    /// Return estimate, elements added and retained size in one value
    pub fn report(&self) -> Result<Report, KmvError> {
        Ok(Report {
            estimate: self.estimate_cardinality()?,
            elements_added: self.total_count,
            retained: self.table.size(),
        })
    }

    /// Return approximate memory size of `KmvEstimator`
    pub fn size_of(&self) -> usize {
        size_of::<Self>() - size_of::<OrderStatisticsTable>() + self.table.size_of()
    }
}

impl<H: SeededHasher> Clone for KmvEstimator<H> {
    fn clone(&self) -> Self {
        Self::from_parts(self.table.clone(), self.seed, self.total_count)
    }
}

impl<H: SeededHasher> PartialEq for KmvEstimator<H> {
    /// Compare KMV estimators
    fn eq(&self, rhs: &Self) -> bool {
        self.seed == rhs.seed && self.total_count == rhs.total_count && self.table == rhs.table
    }
}

impl<H: SeededHasher> Eq for KmvEstimator<H> {}

impl<H: SeededHasher> Debug for KmvEstimator<H> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let estimate = match self.estimate_cardinality() {
            Ok(estimate) => estimate.to_string(),
            Err(err) => err.to_string(),
        };
        write!(
            f,
            "{{ regime: {:?}, estimate: {}, retained: {}, added: {} }}",
            self.regime(),
            estimate,
            self.table.size(),
            self.total_count
        )
    }
}
