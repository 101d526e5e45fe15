use std::fmt;

/// Errors returned by the order-statistics table and the KMV estimator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KmvError {
    /// Capacity must be at least one.
    InvalidConfiguration {
        /// The rejected capacity
        capacity: usize,
    },
    /// Maximum was requested from a table holding no values.
    EmptyTable,
    /// The k-th smallest hash is below `capacity`, so the mean gap between
    /// retained hashes rounds down to zero.
    DegenerateEstimate {
        /// Largest retained hash
        max: u64,
        /// Configured capacity
        capacity: usize,
    },
    /// Serialized estimator state violates a table invariant.
    CorruptedState {
        /// Which invariant was violated
        reason: &'static str,
    },
}

impl fmt::Display for KmvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfiguration { capacity } => {
                write!(f, "invalid configuration: capacity must be >= 1, got {capacity}")
            }
            Self::EmptyTable => write!(f, "order-statistics table is empty"),
            Self::DegenerateEstimate { max, capacity } => {
                write!(
                    f,
                    "degenerate estimate: max retained hash {max} is smaller than capacity {capacity}"
                )
            }
            Self::CorruptedState { reason } => write!(f, "corrupted estimator state: {reason}"),
        }
    }
}

impl std::error::Error for KmvError {}
