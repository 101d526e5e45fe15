use kmv_estimator::{KmvEstimator, Murmur3Hasher};

fn main() {
    let mut estimator = KmvEstimator::<Murmur3Hasher>::new(64, 42).unwrap();
    for i in 0..10 {
        estimator.insert_token(&format!("item{}", i));
    }
    println!(
        "estimate after 10 distinct items = {} ({:?})",
        estimator.estimate_cardinality().unwrap(),
        estimator.regime()
    );

    for i in 0..100_000 {
        estimator.insert_token(&format!("item{}", i % 50_000));
    }
    println!(
        "estimate after 50000 distinct items = {} ({:?})",
        estimator.estimate_cardinality().unwrap(),
        estimator.regime()
    );
    println!("report = {}", estimator.report().unwrap());
}
