//! Normally distributed samples via the Ziggurat algorithm
//!
//! The standard normal density is covered by 128 horizontal layers of equal
//! area `A`. Most draws land inside a layer's rectangle and are accepted with
//! a single integer comparison; the rest fall back to an exact density check,
//! or to the exponential tail algorithm for the base layer.
//!
//! Tables depend only on the generator's `int_max`, never on its seed.
//!
//! # Example
//! ```
//! use replay_rand_core::{GaussianSampler, Generator, XorShiftRand};
//!
//! let mut rng = XorShiftRand::with_seed("bell");
//! let sampler = GaussianSampler::for_generator(&rng);
//! let z = sampler.next_sample(&mut rng);
//! assert!(z.is_finite());
//! ```

use tracing::debug;

use crate::rng::{scale_to_range, Generator};

/// Number of Ziggurat layers
pub const BLOCK_COUNT: usize = 128;

/// x coordinate of the right edge of the base rectangle
pub const R: f64 = 3.442619855899;

/// Area of every layer
pub const A: f64 = 9.91256303526217e-3;

/// Precomputed Ziggurat tables for one integer width
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianSampler {
    int_max_div: f64,
    /// Layer x boundaries, `x[BLOCK_COUNT] == 0`
    x: [f64; BLOCK_COUNT + 1],
    /// Layer y boundaries
    y: [f64; BLOCK_COUNT],
    /// Integer fast-path thresholds, scaled by `int_max`
    x_comp: [u64; BLOCK_COUNT],
    /// `A / y[0]`
    ay0: f64,
}

impl GaussianSampler {
    /// Build tables for a generator whose raw output tops out at `int_max`
    pub fn new(int_max: u64) -> Self {
        let int_max_f = int_max as f64;
        let mut x = [0.0; BLOCK_COUNT + 1];
        let mut y = [0.0; BLOCK_COUNT];

        x[0] = R;
        y[0] = (-(R * R / 2.0)).exp();

        x[1] = R;
        y[1] = y[0] + A / x[1];

        for i in 2..BLOCK_COUNT {
            x[i] = (-2.0 * y[i - 1].ln()).sqrt();
            y[i] = y[i - 1] + A / x[i];
        }
        x[BLOCK_COUNT] = 0.0;

        let ay0 = A / y[0];

        let mut x_comp = [0u64; BLOCK_COUNT];
        x_comp[0] = ((R * y[0]) / A * int_max_f) as u64;
        for i in 1..BLOCK_COUNT - 1 {
            x_comp[i] = (x[i + 1] / x[i] * int_max_f) as u64;
        }
        x_comp[BLOCK_COUNT - 1] = 0;

        debug!(int_max, "built ziggurat tables");

        Self {
            int_max_div: 1.0 / int_max_f,
            x,
            y,
            x_comp,
            ay0,
        }
    }

    /// Tables matching `rng`'s integer width
    pub fn for_generator<G: Generator + ?Sized>(rng: &G) -> Self {
        Self::new(rng.int_max())
    }

    /// Standard normal sample (mean 0, deviation 1) drawn from `rng`
    pub fn next_sample<G: Generator + ?Sized>(&self, rng: &mut G) -> f64 {
        let int_max = rng.int_max();
        loop {
            // Low 7 bits pick the layer, bit 7 the sign
            let u = scale_to_range(0, 255, rng.next_int(), int_max);
            let i = (u & 0x7f) as usize;
            let sign = if u & 0x80 == 0 { -1.0 } else { 1.0 };
            let u2 = rng.next_int();

            if i == 0 {
                if u2 < self.x_comp[0] {
                    return u2 as f64 * self.int_max_div * self.ay0 * sign;
                }
                return self.sample_tail(rng) * sign;
            }

            if u2 < self.x_comp[i] {
                return u2 as f64 * self.int_max_div * self.x[i] * sign;
            }

            let x = u2 as f64 * self.int_max_div * self.x[i];
            let y = self.y[i - 1] + (self.y[i] - self.y[i - 1]) * rng.next_float();
            if y < (-(x * x / 2.0)).exp() {
                return x * sign;
            }
        }
    }

    /// Marsaglia's tail algorithm for `x > R`
    fn sample_tail<G: Generator + ?Sized>(&self, rng: &mut G) -> f64 {
        loop {
            let x = -nonzero_float(rng).ln() / R;
            let y = -nonzero_float(rng).ln();
            if y + y >= x * x {
                return R + x;
            }
        }
    }

    pub fn x_comp(&self) -> &[u64; BLOCK_COUNT] {
        &self.x_comp
    }
}

fn nonzero_float<G: Generator + ?Sized>(rng: &mut G) -> f64 {
    loop {
        let f = rng.next_float();
        if f != 0.0 {
            return f;
        }
    }
}
