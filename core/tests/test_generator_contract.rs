//! Generator contract tests
//!
//! The derived operations (range, float, bool) are shared by every engine, so
//! the same suite runs against all three.
//!
//! Critical invariants tested:
//! - Range containment, including degenerate and extreme ranges
//! - Uniformity of range, float and bool
//! - Validation errors are raised before any draw

use proptest::prelude::*;
use replay_rand_core::{Generator, HashRand, MtRand, RandError, XorShiftRand};

/// Average of a sample
fn mean(data: &[f64]) -> f64 {
    data.iter().sum::<f64>() / data.len() as f64
}

macro_rules! contract_tests {
    ($module:ident, $rand:ty) => {
        mod $module {
            use super::*;

            #[test]
            fn test_next_int_within_int_max() {
                let mut rng = <$rand>::with_seed("raw ints");
                let int_max = rng.int_max();

                let data: Vec<f64> = (0..10_000)
                    .map(|_| {
                        let num = rng.next_int();
                        assert!(num <= int_max);
                        num as f64 * 0.5
                    })
                    .collect();

                // Average should be within 2% of int_max of int_max / 4
                let target = int_max as f64 * 0.25;
                assert!((mean(&data) - target).abs() < int_max as f64 * 0.02);
            }

            #[test]
            fn test_degenerate_ranges() {
                let mut rng = <$rand>::with_seed("degenerate");
                let int_max = rng.int_max() as i64;

                assert_eq!(rng.range(0, 0).unwrap(), 0);
                assert_eq!(rng.range(1, 1).unwrap(), 1);
                assert_eq!(rng.range(-1, -1).unwrap(), -1);
                assert_eq!(rng.range(int_max, int_max).unwrap(), int_max);
            }

            #[test]
            fn test_range_containment() {
                let mut rng = <$rand>::with_seed("containment");
                let int_max = rng.int_max() as i64;
                let ranges = [
                    (0, 0),
                    (10, 12),
                    (-12, -5),
                    (-100, 100),
                    (int_max - 1, int_max),
                ];

                for (min, max) in ranges {
                    for _ in 0..10_000 {
                        let num = rng.range(min, max).unwrap();
                        assert!(
                            num >= min && num <= max,
                            "{} outside [{}, {}]",
                            num,
                            min,
                            max
                        );
                    }
                }
            }

            #[test]
            fn test_range_uniformity() {
                let mut rng = <$rand>::with_seed("buckets");
                let mut data = [0i32; 5];
                for _ in 0..10_000 {
                    data[rng.range(0, 4).unwrap() as usize] += 1;
                }
                // Expected 10000 / 5 = 2000 per bucket, 10% deviation
                for cnt in data {
                    assert!((2000 - cnt).abs() < 200, "bucket count {} off", cnt);
                }
            }

            #[test]
            fn test_next_float() {
                let mut rng = <$rand>::with_seed("floats");
                let data: Vec<f64> = (0..10_000)
                    .map(|_| {
                        let float = rng.next_float();
                        assert!((0.0..=1.0).contains(&float));
                        float
                    })
                    .collect();
                assert!((mean(&data) - 0.5).abs() < 0.02);
            }

            #[test]
            fn test_next_bool() {
                let mut rng = <$rand>::with_seed("bools");
                let mut data = [0i32; 2];
                for _ in 0..10_000 {
                    data[rng.next_bool() as usize] += 1;
                }
                for cnt in data {
                    assert!((5000 - cnt).abs() < 200, "bool count {} off", cnt);
                }
            }

            #[test]
            fn test_invalid_range_error() {
                let mut rng = <$rand>::with_seed(1);
                assert_eq!(
                    rng.range(10, 1),
                    Err(RandError::InvalidRange { min: 10, max: 1 })
                );
            }

            #[test]
            fn test_errors_do_not_consume_draws() {
                let mut rng = <$rand>::with_seed("no draw");
                let before = rng.state();
                assert!(rng.range(5, 4).is_err());
                assert_eq!(rng.state(), before);
            }

            proptest! {
                #[test]
                fn prop_range_contains_result(
                    seed in any::<i64>(),
                    min in -1_000_000_000i64..1_000_000_000,
                    width in 0i64..1_000_000,
                ) {
                    let mut rng = <$rand>::with_seed(seed);
                    let max = min + width;
                    for _ in 0..32 {
                        let num = rng.range(min, max).unwrap();
                        prop_assert!(num >= min && num <= max);
                    }
                }

                #[test]
                fn prop_inverted_range_rejected(
                    min in any::<i64>(),
                    gap in 1i64..1000,
                ) {
                    let mut rng = <$rand>::with_seed("inverted");
                    let max = min.saturating_sub(gap);
                    prop_assume!(max < min);
                    prop_assert_eq!(
                        rng.range(min, max),
                        Err(RandError::InvalidRange { min, max })
                    );
                }
            }
        }
    };
}

contract_tests!(mt, MtRand);
contract_tests!(xorshift, XorShiftRand);
contract_tests!(hash, HashRand);

#[test]
fn test_mt_range_too_large() {
    let mut rng = MtRand::with_seed(1);
    assert_eq!(
        rng.range(1, 0x8000_0000),
        Err(RandError::RangeTooLarge {
            max: 0x8000_0000,
            int_max: 0x7fff_ffff
        })
    );
}

#[test]
fn test_63_bit_engines_accept_full_range() {
    let mut xs = XorShiftRand::with_seed("full");
    let mut hash = HashRand::with_seed("full");
    for _ in 0..1000 {
        assert!(xs.range(0, i64::MAX).unwrap() >= 0);
        assert!(hash.range(0, i64::MAX).unwrap() >= 0);
    }
}

#[test]
fn test_trait_object_uses_shared_operations() {
    let mut rngs: Vec<Box<dyn Generator>> = vec![
        Box::new(MtRand::with_seed("dyn")),
        Box::new(XorShiftRand::with_seed("dyn")),
        Box::new(HashRand::with_seed("dyn")),
    ];
    for rng in rngs.iter_mut() {
        let num = rng.range(-3, 3).unwrap();
        assert!((-3..=3).contains(&num));
        let float = rng.next_float();
        assert!((0.0..=1.0).contains(&float));
    }
}
