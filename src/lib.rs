//! `kmv-estimator` is a Rust crate designed to estimate the number of distinct elements in a stream or dataset
//! with memory bounded by a fixed capacity `k`.
//!
//! This library uses the K-Minimum-Values sketch: every token is hashed with a seeded 64-bit hash and only the `k`
//! smallest distinct hashes are retained. The spread of those hashes over the hash range gives the estimate.
//!
//! ```
//! use kmv_estimator::KmvEstimator;
//!
//! let mut estimator = KmvEstimator::<kmv_estimator::Murmur3Hasher>::new(64, 42).unwrap();
//! for word in "to be or not to be".split_whitespace() {
//!     estimator.insert_token(word);
//! }
//! assert_eq!(estimator.estimate_cardinality(), Ok(4));
//! assert_eq!(estimator.elements_added(), 6);
//! ```
pub mod error;
pub mod estimator;
pub mod hash;
#[cfg(feature = "with_serde")]
mod serde;
pub mod stream;
pub mod table;

pub use error::KmvError;
pub use estimator::{KmvEstimator, Regime, DEFAULT_CAPACITY};
pub use hash::{Murmur3Hasher, SeededHasher, WyHasher};
pub use stream::{ingest, Report};
pub use table::OrderStatisticsTable;
