use crate::terrain::generator::PositionalRng;
use approx::assert_relative_eq;
use test_case::test_case;

#[test_case(42, 0.0, -32770)]
#[test_case(42, 10.0, 1307789310)]
#[test_case(7, -3.5, 1830840121)]
#[test_case(1337, 123.25, 1893572323)]
fn test_int_hash_reference_values(seed: i32, x: f64, expected: i32) {
    assert_eq!(PositionalRng::new(seed).int_hash(x), expected);
}

#[test_case(42, 0.0, -1.0, 1.0, 0.9999847400467807)]
#[test_case(42, 10.0, -1.0, 1.0, -0.39101314693480105)]
#[test_case(7, -3.5, 0.0, 100.0, 42.62756835497626)]
#[test_case(1337, 123.25, -5.0, 5.0, -0.5911833747735207)]
fn test_range_float_reference_values(seed: i32, x: f64, min: f64, max: f64, expected: f64) {
    let value = PositionalRng::new(seed).range_float(x, min, max);
    assert_relative_eq!(value, expected, epsilon = 1e-12);
}

#[test]
fn test_range_int_truncates() {
    let rng = PositionalRng::new(7);
    assert_eq!(rng.range_int(-3.5, 0, 100), 42);
}

#[test]
fn test_same_position_same_bits() {
    let rng = PositionalRng::new(-918_273);
    for i in 0..200 {
        let x = i as f64 * 3.7 - 100.0;
        let a = rng.range_float(x, -2.0, 2.0);
        let b = rng.range_float(x, -2.0, 2.0);
        assert_eq!(a.to_bits(), b.to_bits(), "x={} should be reproducible", x);
        assert_eq!(rng.int_hash(x), PositionalRng::new(-918_273).int_hash(x));
    }
}

#[test]
fn test_range_float_bounds() {
    let rng = PositionalRng::new(20_240_601);
    let (min, max) = (-3.0, 5.0);
    let slack = 1e-9 * (max - min);
    for i in 0..5_000 {
        let x = i as f64 * 0.37 - 900.0;
        let value = rng.range_float(x, min, max);
        assert!(
            value >= min - slack && value < max,
            "range_float({}) = {} escaped [{}, {})",
            x,
            value,
            min,
            max
        );
    }
}

#[test]
fn test_empty_range_returns_min() {
    let rng = PositionalRng::new(5);
    assert_eq!(rng.range_float(12.5, 3.0, 3.0), 3.0);
}

#[test]
fn test_nearby_positions_are_uncorrelated() {
    let rng = PositionalRng::new(42);
    let distinct = (0..100)
        .map(|i| rng.int_hash(10.0 + i as f64 * 1e-3))
        .collect::<std::collections::HashSet<_>>();
    assert!(distinct.len() > 90, "only {} distinct hashes", distinct.len());
}

#[test_case(1, 2)]
#[test_case(42, 43)]
#[test_case(-7, 7)]
fn test_seed_changes_stream(a: i32, b: i32) {
    let (rng_a, rng_b) = (PositionalRng::new(a), PositionalRng::new(b));
    let differs = (1..50).any(|i| rng_a.int_hash(i as f64 * 1.5) != rng_b.int_hash(i as f64 * 1.5));
    assert!(differs, "seeds {} and {} should produce different values", a, b);
}

#[test]
fn test_salted_stream_differs() {
    let rng = PositionalRng::new(42);
    let salted = rng.salted(0x0DEC_0A7E);
    assert_ne!(rng.seed(), salted.seed());
    assert_ne!(rng.int_hash(10.0), salted.int_hash(10.0));
}
