//! Deterministic random number generation
//!
//! Three engines share one contract:
//!
//! - [`MtEngine`]: PHP `mt_rand`-compatible Mersenne Twister, 31-bit output
//! - [`XorShiftEngine`]: xorshift128+, 63-bit output
//! - [`HashEngine`]: MD5 over seed and counter, 63-bit output
//!
//! An [`Engine`] only knows how to initialise itself and produce raw integers.
//! Everything else (range mapping, floats, booleans, seeding, snapshots, the
//! state stack, Gaussian sampling) is written once, in [`Generator`] and
//! [`Rand`].
//!
//! # Determinism
//!
//! Same algorithm + same seed → same sequence. Restoring a [`RandState`]
//! resumes the sequence at exactly the position it was taken.

mod hash;
mod mt;
mod xorshift;

pub use hash::HashEngine;
pub use mt::MtEngine;
pub use xorshift::XorShiftEngine;

use std::fmt;

use tracing::debug;

use crate::error::RandError;
use crate::gaussian::GaussianSampler;
use crate::seed::{HashedSeed, Seed};
use crate::state::{Algorithm, EngineState, RandState};

// ============================================================================
// Engine capability
// ============================================================================

/// A concrete bit-level algorithm
pub trait Engine: Clone + fmt::Debug + Send + Sized {
    /// Identifier stored in snapshots
    const ALGORITHM: Algorithm;

    /// Inclusive upper bound of [`Engine::next_int`]
    const INT_MAX: u64;

    /// Build fresh state from a seed and its digest
    fn init(seed: &Seed, hashed: &HashedSeed) -> Self;

    /// Next raw value in `[0, INT_MAX]`
    fn next_int(&mut self) -> u64;

    fn snapshot(&self) -> EngineState;

    /// Rebuild an engine from a snapshot payload
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if the payload belongs to another algorithm or
    /// is malformed.
    fn from_snapshot(hashed: &HashedSeed, state: EngineState) -> Result<Self, RandError>;
}

// ============================================================================
// Generator contract
// ============================================================================

/// The generator contract shared by every engine
///
/// Only `int_max` and `next_int` feed the derived operations (`range`,
/// `next_float`, `next_bool`), which are provided here once for all engines.
/// The trait is object safe; see [`crate::factory::BoxedGenerator`].
pub trait Generator {
    fn algorithm(&self) -> Algorithm;

    /// Inclusive upper bound of `next_int()`
    fn int_max(&self) -> u64;

    /// Next raw value in `[0, int_max()]`
    fn next_int(&mut self) -> u64;

    fn seed(&self) -> &Seed;

    /// Replace the seed and fully re-initialise the engine
    fn set_seed(&mut self, seed: Seed);

    /// Snapshot sufficient to replay the future sequence exactly
    fn state(&self) -> RandState;

    /// Restore a snapshot taken by [`Generator::state`]
    ///
    /// # Errors
    ///
    /// - `StateAlgorithmMismatch` if the snapshot comes from another engine
    /// - `InvalidState` if the engine payload is malformed
    ///
    /// On error the generator is left untouched.
    fn set_state(&mut self, state: RandState) -> Result<(), RandError>;

    /// Push the current state onto the state stack
    fn push_state(&mut self);

    /// Restore the most recently pushed state
    ///
    /// # Errors
    ///
    /// Returns `EmptyStateStack` if nothing was pushed.
    fn pop_state(&mut self) -> Result<(), RandError>;

    /// Return to the initial state for the current seed
    fn reset(&mut self);

    /// Normally distributed value with the given mean and standard deviation
    fn gaussian(&mut self, mean: f64, sigma: f64) -> f64;

    /// Uniform integer in `[min, max]` inclusive
    ///
    /// # Errors
    ///
    /// - `InvalidRange` if `max < min`
    /// - `RangeTooLarge` if `max > int_max()`
    ///
    /// # Example
    /// ```
    /// use replay_rand_core::{Generator, XorShiftRand};
    ///
    /// let mut rng = XorShiftRand::with_seed("dice");
    /// let roll = rng.range(1, 6).unwrap();
    /// assert!((1..=6).contains(&roll));
    /// ```
    fn range(&mut self, min: i64, max: i64) -> Result<i64, RandError> {
        if max < min {
            return Err(RandError::InvalidRange { min, max });
        }
        let int_max = self.int_max();
        if max as i128 > int_max as i128 {
            return Err(RandError::RangeTooLarge { max, int_max });
        }
        let raw = self.next_int();
        Ok(scale_to_range(min, max, raw, int_max))
    }

    /// Uniform float in `[0, 1]`; 1.0 is reachable
    fn next_float(&mut self) -> f64 {
        let int_max_div = 1.0 / self.int_max() as f64;
        self.next_int() as f64 * int_max_div
    }

    fn next_bool(&mut self) -> bool {
        let half = self.int_max() >> 1;
        self.next_int() > half
    }
}

/// Map a raw draw onto `[min, max]`
///
/// Scales by `1 / int_max` rather than `1 / (int_max + 1)`, so a raw value of
/// exactly `int_max` lands on `max + 1` whenever the float product is exact.
/// The product is taken in integers while it fits an `i64` and in floats
/// beyond that. The offset is added in `i128` so spans wider than `i64::MAX`
/// stay uniform; only the final sum is clamped to `i64::MAX`.
pub(crate) fn scale_to_range(min: i64, max: i64, raw: u64, int_max: u64) -> i64 {
    let span = max as i128 - min as i128 + 1;
    let product = span * raw as i128;
    let product = if product <= i64::MAX as i128 {
        product as f64
    } else {
        span as f64 * raw as f64
    };
    let offset = (product * (1.0 / int_max as f64)) as i128;
    (min as i128 + offset).min(i64::MAX as i128) as i64
}

// ============================================================================
// Shared generator
// ============================================================================

/// Seeded generator over any [`Engine`]
///
/// Owns the seed, its digest, the engine state, the state stack and (once the
/// first Gaussian is drawn) a [`GaussianSampler`]. Cloning deep-copies all of
/// them, so a clone continues the same sequence independently.
///
/// # Example
/// ```
/// use replay_rand_core::{Generator, MtRand};
///
/// let mut rng = MtRand::with_seed(2015);
/// rng.push_state();
/// let first = rng.next_int();
/// rng.pop_state().unwrap();
/// assert_eq!(rng.next_int(), first);
/// ```
#[derive(Debug, Clone)]
pub struct Rand<E: Engine> {
    seed: Seed,
    hashed_seed: HashedSeed,
    engine: E,
    stack: Vec<RandState>,
    gaussian: Option<GaussianSampler>,
}

/// PHP `mt_rand`-compatible generator
pub type MtRand = Rand<MtEngine>;
/// xorshift128+ generator
pub type XorShiftRand = Rand<XorShiftEngine>;
/// MD5 hash-counter generator
pub type HashRand = Rand<HashEngine>;

impl<E: Engine> Rand<E> {
    /// Create a generator with an automatically chosen integer seed
    pub fn new() -> Self {
        Self::with_seed(Seed::auto())
    }

    /// Create a generator from the given seed
    pub fn with_seed(seed: impl Into<Seed>) -> Self {
        let seed = seed.into();
        let hashed_seed = HashedSeed::new(&seed);
        let engine = E::init(&seed, &hashed_seed);
        Self {
            seed,
            hashed_seed,
            engine,
            stack: Vec::new(),
            gaussian: None,
        }
    }

    /// Create a generator positioned at a snapshot
    pub fn from_state(state: RandState) -> Result<Self, RandError> {
        let mut rng = Self::with_seed(state.seed.clone());
        rng.set_state(state)?;
        Ok(rng)
    }

    pub fn hashed_seed(&self) -> &HashedSeed {
        &self.hashed_seed
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Number of snapshots currently on the state stack
    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }
}

impl<E: Engine> Default for Rand<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Engine> Generator for Rand<E> {
    fn algorithm(&self) -> Algorithm {
        E::ALGORITHM
    }

    fn int_max(&self) -> u64 {
        E::INT_MAX
    }

    fn next_int(&mut self) -> u64 {
        self.engine.next_int()
    }

    fn seed(&self) -> &Seed {
        &self.seed
    }

    fn set_seed(&mut self, seed: Seed) {
        debug!(algorithm = %E::ALGORITHM, seed = %seed, "reseeding generator");
        self.hashed_seed = HashedSeed::new(&seed);
        self.engine = E::init(&seed, &self.hashed_seed);
        self.seed = seed;
    }

    fn state(&self) -> RandState {
        RandState {
            algorithm: E::ALGORITHM,
            seed: self.seed.clone(),
            state: self.engine.snapshot(),
        }
    }

    fn set_state(&mut self, state: RandState) -> Result<(), RandError> {
        if state.algorithm != E::ALGORITHM {
            return Err(RandError::StateAlgorithmMismatch {
                expected: E::ALGORITHM,
                found: state.algorithm,
            });
        }

        // Reseed first, then overwrite the engine: both are staged so a bad
        // payload leaves the generator as it was.
        let hashed_seed = HashedSeed::new(&state.seed);
        let engine = E::from_snapshot(&hashed_seed, state.state)?;

        debug!(algorithm = %E::ALGORITHM, seed = %state.seed, "restored generator state");
        self.seed = state.seed;
        self.hashed_seed = hashed_seed;
        self.engine = engine;
        Ok(())
    }

    fn push_state(&mut self) {
        self.stack.push(self.state());
        debug!(depth = self.stack.len(), "pushed generator state");
    }

    fn pop_state(&mut self) -> Result<(), RandError> {
        let state = self.stack.pop().ok_or(RandError::EmptyStateStack)?;
        debug!(depth = self.stack.len(), "popping generator state");
        self.set_state(state)
    }

    fn reset(&mut self) {
        self.engine = E::init(&self.seed, &self.hashed_seed);
    }

    fn gaussian(&mut self, mean: f64, sigma: f64) -> f64 {
        let sampler = self
            .gaussian
            .take()
            .unwrap_or_else(|| GaussianSampler::new(E::INT_MAX));
        let sample = sampler.next_sample(self);
        self.gaussian = Some(sampler);
        mean + sample * sigma
    }
}
