//! # Serde module for KmvEstimator
//!
//! This module provides serde-based (serialization and deserialization) features for
//! `KmvEstimator`. It uses `serde`'s custom serialization and deserialization mechanisms.
//!
//! During serialization the estimator is converted into a tuple:
//! `(capacity, seed, elements_added, retained_hashes)`, with retained hashes in ascending order.
//!
//! During deserialization the tuple is validated against the order-statistics table invariants
//! before the estimator is rebuilt. The hash function is not part of the serialized state:
//! the caller picks it through the `H` type parameter and must use the same one that built
//! the estimator for subsequent inserts to be meaningful.
//!
//! Refer to the serde documentation for more details on custom serialization and deserialization:
//! - [Serialization](https://serde.rs/impl-serialize.html)
//! - [Deserialization](https://serde.rs/impl-deserialize.html)
use serde::de::Error;
use serde::ser::SerializeTuple;
use serde::{Deserialize, Serialize};

use crate::error::KmvError;
use crate::estimator::KmvEstimator;
use crate::hash::SeededHasher;
use crate::table::OrderStatisticsTable;

impl<H: SeededHasher> Serialize for KmvEstimator<H> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let retained: Vec<u64> = self.table.iter().collect();

        let mut tup = serializer.serialize_tuple(4)?;
        tup.serialize_element(&self.table.capacity())?;
        tup.serialize_element(&self.seed)?;
        tup.serialize_element(&self.total_count)?;
        tup.serialize_element(&retained)?;
        tup.end()
    }
}

impl<'de, H: SeededHasher> Deserialize<'de> for KmvEstimator<H> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let (capacity, seed, total_count, retained): (usize, u32, u64, Vec<u64>) =
            Deserialize::deserialize(deserializer)?;

        if total_count < retained.len() as u64 {
            return Err(D::Error::custom(KmvError::CorruptedState {
                reason: "fewer elements added than hashes retained",
            }));
        }
        let table =
            OrderStatisticsTable::from_values(capacity, &retained).map_err(D::Error::custom)?;

        Ok(KmvEstimator::from_parts(table, seed, total_count))
    }
}

#[cfg(test)]
pub mod tests {
    use crate::estimator::KmvEstimator;
    use crate::hash::{Murmur3Hasher, WyHasher};
    use test_case::test_case;

    #[test_case(1, 0; "empty set")]
    #[test_case(1, 1; "single element")]
    #[test_case(4, 2; "filling")]
    #[test_case(4, 100; "saturated")]
    #[test_case(64, 10000; "ten thousand elements")]
    fn test_serde(capacity: usize, n: usize) {
        let mut original_estimator = KmvEstimator::<Murmur3Hasher>::new(capacity, 17).unwrap();

        for i in 0..n {
            let item = &format!("item{}", i);
            original_estimator.insert_token(item);
        }

        let serialized = serde_json::to_string(&original_estimator).expect("serialization failed");
        assert!(
            !serialized.is_empty(),
            "serialized string should not be empty"
        );

        let mut deserialized_estimator: KmvEstimator<Murmur3Hasher> =
            serde_json::from_str(&serialized).expect("deserialization failed");

        assert_eq!(original_estimator, deserialized_estimator);
        assert_eq!(
            original_estimator.estimate_cardinality(),
            deserialized_estimator.estimate_cardinality()
        );

        original_estimator.insert_token("one more");
        deserialized_estimator.insert_token("one more");
        assert_eq!(original_estimator, deserialized_estimator);
    }

    #[test]
    fn test_serialized_layout() {
        let mut estimator = KmvEstimator::<WyHasher>::new(2, 5).unwrap();
        for hash in [5, 3, 9, 1] {
            estimator.insert_hash(hash);
        }
        assert_eq!(serde_json::to_string(&estimator).unwrap(), "[2,5,4,[1,3]]");
    }

    #[test]
    fn test_insert_after_max_counter() {
        let mut estimator: KmvEstimator =
            serde_json::from_str("[1,0,18446744073709551615,[]]").unwrap();
        estimator.insert_hash(5);
        assert_eq!(estimator.elements_added(), u64::MAX);
        assert_eq!(estimator.retained_size(), 1);
        assert_eq!(estimator.estimate_cardinality(), Ok(u64::MAX / 5));
    }

    #[test]
    fn test_deserialize_invalid_json() {
        let invalid_json = "{ invalid_json_string }";
        let result: Result<KmvEstimator, _> = serde_json::from_str(invalid_json);

        assert!(
            result.is_err(),
            "Deserialization should fail for invalid JSON"
        );
    }

    #[test_case("[0,1,0,[]]", "invalid configuration: capacity must be >= 1, got 0"; "zero capacity")]
    #[test_case("[1,1,2,[1,2]]", "more retained hashes than capacity"; "too many hashes")]
    #[test_case("[4,1,2,[2,1]]", "retained hashes not strictly ascending"; "unsorted hashes")]
    #[test_case("[4,1,2,[3,3]]", "retained hashes not strictly ascending"; "duplicate hashes")]
    #[test_case("[4,1,1,[1,2]]", "fewer elements added than hashes retained"; "counter too small")]
    fn test_failed_validation(input: &str, expected: &str) {
        let err = serde_json::from_str::<KmvEstimator>(input).unwrap_err();
        assert!(
            err.to_string().contains(expected),
            "unexpected error: {}",
            err
        );
    }

    #[test_case("[12345,null]".as_bytes(); "case 1")]
    #[test_case(b"[1,2,3]"; "case 2")]
    #[test_case(b"[1,2,3,[-1]]"; "case 3")]
    #[test_case(b"[1,4294967296,0,[]]"; "case 4")]
    fn test_failed_deserialization(input: &[u8]) {
        let result: Result<KmvEstimator, _> = serde_json::from_slice(input);
        assert!(result.is_err());
    }
}
