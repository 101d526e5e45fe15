#![no_main]

use kmv_estimator::KmvEstimator;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(mut estimator) = serde_json::from_slice::<KmvEstimator>(data) {
        assert!(estimator.retained_size() <= estimator.capacity());
        estimator.insert_token(&1u64.to_le_bytes());
        assert!(estimator.elements_added() > 0);
    }
});
