#![no_main]

use kmv_estimator::{KmvEstimator, Murmur3Hasher, Regime};
use libfuzzer_sys::fuzz_target;
use wyhash::wyhash;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let capacity = 1 + wyhash(data, 0) as usize % 32;
    let seed = wyhash(data, 1) as u32;

    let mut estimator = KmvEstimator::<Murmur3Hasher>::new(capacity, seed).unwrap();
    let mut calls = 0;
    for chunk in data.chunks(4) {
        let was_saturated = estimator.regime() == Regime::Saturated;
        estimator.insert_token(chunk);
        calls += 1;

        assert!(estimator.retained_size() <= capacity);
        assert_eq!(estimator.elements_added(), calls);
        if was_saturated {
            assert_eq!(estimator.regime(), Regime::Saturated);
        }
        if estimator.regime() == Regime::Filling {
            assert_eq!(
                estimator.estimate_cardinality(),
                Ok(estimator.retained_size() as u64)
            );
        }
    }

    let retained: Vec<u64> = estimator.retained().collect();
    assert!(retained.windows(2).all(|w| w[0] < w[1]));
});
