//! Gaussian sampler tests
//!
//! Shape checks over 50,000 samples: mean and median near zero, the mode in
//! the central bins, and the 68/95/99.7 rule.

use replay_rand_core::{GaussianSampler, Generator, HashRand, MtRand, XorShiftRand};

const SAMPLES: usize = 50_000;

/// Percentage of samples whose |value| falls within 1, 2 and 3 deviations
fn coverage(data: &[f64]) -> [f64; 3] {
    let mut within = [0usize; 3];
    for &num in data {
        let k = num.abs().ceil() as usize;
        for (sigma, count) in within.iter_mut().enumerate() {
            if k <= sigma + 1 {
                *count += 1;
            }
        }
    }
    within.map(|count| (100.0 * count as f64 / data.len() as f64).round())
}

fn assert_standard_normal(mut data: Vec<f64>) {
    let c = data.len();

    let avg = data.iter().sum::<f64>() / c as f64;
    assert!(avg.abs() < 0.02, "mean {} too far from 0", avg);

    data.sort_by(|a, b| a.total_cmp(b));
    let median = data[c / 2];
    assert!(median.abs() < 0.02, "median {} too far from 0", median);

    let [p1, p2, p3] = coverage(&data);
    // 68% of the data should be within one standard deviation
    assert!((67.0..=69.0).contains(&p1), "p1 = {}", p1);
    // 95% of the data should be within two standard deviations
    assert!((94.0..=96.0).contains(&p2), "p2 = {}", p2);
    // 99% of the data should be within three standard deviations
    assert!(p3 >= 99.0, "p3 = {}", p3);
}

#[test]
fn test_sampler_standard_normal_shape() {
    let mut rng = XorShiftRand::with_seed("ziggurat");
    let sampler = GaussianSampler::for_generator(&rng);
    let data: Vec<f64> = (0..SAMPLES).map(|_| sampler.next_sample(&mut rng)).collect();
    assert_standard_normal(data);
}

#[test]
fn test_sampler_mode_is_central() {
    let mut rng = XorShiftRand::with_seed("mode");
    let sampler = GaussianSampler::for_generator(&rng);

    // Histogram of values rounded to one decimal, bins -40..=40
    let mut stats = [0usize; 81];
    for _ in 0..SAMPLES {
        let bin = (sampler.next_sample(&mut rng) * 10.0).round() as i64;
        if (-40..=40).contains(&bin) {
            stats[(bin + 40) as usize] += 1;
        }
    }
    let count = |bin: i64| stats[(bin + 40) as usize];

    let (mode, _) = stats
        .iter()
        .enumerate()
        .max_by_key(|&(_, &n)| n)
        .expect("histogram is not empty");
    let mode = mode as i64 - 40;
    assert!((-2..=2).contains(&mode), "mode bin {}", mode);
    assert!(count(0) > count(30));

    let inner: usize = [1, 2, 3].iter().map(|&b| count(b) + count(-b)).sum();
    let outer: usize = [4, 5, 6].iter().map(|&b| count(b) + count(-b)).sum();
    assert!(inner > outer);
}

#[test]
fn test_generator_gaussian_each_engine() {
    let mut mt = MtRand::with_seed("gauss mt");
    let data: Vec<f64> = (0..SAMPLES).map(|_| mt.gaussian(0.0, 1.0)).collect();
    assert_standard_normal(data);

    let mut xs = XorShiftRand::with_seed("gauss xorshift");
    let data: Vec<f64> = (0..SAMPLES).map(|_| xs.gaussian(0.0, 1.0)).collect();
    assert_standard_normal(data);

    let mut hash = HashRand::with_seed("gauss hash");
    let data: Vec<f64> = (0..SAMPLES).map(|_| hash.gaussian(0.0, 1.0)).collect();
    assert_standard_normal(data);
}

#[test]
fn test_gaussian_mean_and_sigma_rescale() {
    let mut rng = XorShiftRand::with_seed("rescale");
    let (mean, sigma) = (5.0, 2.0);
    let data: Vec<f64> = (0..SAMPLES).map(|_| rng.gaussian(mean, sigma)).collect();

    let avg = data.iter().sum::<f64>() / SAMPLES as f64;
    assert!((avg - mean).abs() < 0.05, "mean {}", avg);

    let standardized: Vec<f64> = data.iter().map(|x| (x - mean) / sigma).collect();
    let [p1, p2, _] = coverage(&standardized);
    assert!((67.0..=69.0).contains(&p1), "p1 = {}", p1);
    assert!((94.0..=96.0).contains(&p2), "p2 = {}", p2);
}

#[test]
fn test_gaussian_replays_under_snapshot() {
    let mut rng = MtRand::with_seed(77);
    rng.gaussian(0.0, 1.0);
    let saved = rng.state();
    let a: Vec<f64> = (0..100).map(|_| rng.gaussian(0.0, 1.0)).collect();

    rng.set_state(saved).unwrap();
    let b: Vec<f64> = (0..100).map(|_| rng.gaussian(0.0, 1.0)).collect();
    assert_eq!(a, b);

    // A fresh generator builds its own tables and agrees
    let mut fresh = MtRand::with_seed(77);
    fresh.gaussian(0.0, 1.0);
    let c: Vec<f64> = (0..100).map(|_| fresh.gaussian(0.0, 1.0)).collect();
    assert_eq!(a, c);
}
