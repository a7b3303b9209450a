//! xorshift128+ random number generator
//!
//! Fast generator with 128 bits of state, based on the reference
//! `xorshift128plus.c` (Vigna). Both state words and every output are kept to
//! 63 bits so sequences stay identical to the signed-integer implementation
//! this engine is compatible with.
//!
//! # Algorithm
//!
//! ```text
//! s1 ^= s1 << 23
//! s1' = s1 ^ s0 ^ (s1 >> 17) ^ (s0 >> 26)
//! out = s1' + s0
//! ```
//!
//! All shifts are logical and masked back to 63 bits.
//!
//! # Determinism
//!
//! Same seed → same sequence of random numbers. The state is seeded from the
//! MD5 digest of the seed; a zero word is never allowed (the digest is
//! rehashed until both words are non-zero).

use tracing::debug;

use crate::error::RandError;
use crate::seed::{HashedSeed, Seed};
use crate::state::{Algorithm, EngineState, XorShiftState};

use super::Engine;

const MASK: u64 = 0x7FFF_FFFF_FFFF_FFFF;

/// Upper bound on digest rehashes during init
///
/// A zero 63-bit word turns up with probability ~2^-62 per attempt, so this
/// is never reached in practice.
const MAX_REHASH: usize = 64;

/// xorshift128+ state, two non-zero 63-bit words
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XorShiftEngine {
    s0: u64,
    s1: u64,
}

impl XorShiftEngine {
    /// Seed directly from a digest, rehashing until neither word is zero
    ///
    /// # Example
    /// ```
    /// use replay_rand_core::{HashedSeed, XorShiftEngine};
    ///
    /// let engine = XorShiftEngine::from_hashed_seed(&HashedSeed::from_bytes([0; 16]));
    /// let [s0, s1] = engine.words();
    /// assert!(s0 > 0 && s1 > 0);
    /// ```
    pub fn from_hashed_seed(hashed: &HashedSeed) -> Self {
        let mut digest = *hashed;
        let mut engine = Self::from_words(digest.words());
        let mut attempts = 0;
        while (engine.s0 == 0 || engine.s1 == 0) && attempts < MAX_REHASH {
            digest = digest.rehash();
            engine = Self::from_words(digest.words());
            attempts += 1;
        }
        if attempts > 0 {
            debug!(attempts, "rehashed seed digest to avoid zero xorshift state");
        }
        engine
    }

    fn from_words([w1, w2, w3, w4]: [u32; 4]) -> Self {
        Self {
            s0: ((w2 as u64) << 32 | w1 as u64) & MASK,
            s1: ((w4 as u64) << 32 | w3 as u64) & MASK,
        }
    }

    /// Current state words `[s0, s1]`
    pub fn words(&self) -> [u64; 2] {
        [self.s0, self.s1]
    }
}

impl Engine for XorShiftEngine {
    const ALGORITHM: Algorithm = Algorithm::XorShift;
    const INT_MAX: u64 = MASK;

    fn init(_seed: &Seed, hashed: &HashedSeed) -> Self {
        Self::from_hashed_seed(hashed)
    }

    fn next_int(&mut self) -> u64 {
        let mut s1 = self.s0;
        let s0 = self.s1;
        self.s0 = s0;
        s1 ^= (s1 << 23) & MASK;
        self.s1 = s1 ^ s0 ^ ((s1 >> 17) & (MASK >> 16)) ^ ((s0 >> 26) & (MASK >> 25));
        self.s1.wrapping_add(s0) & MASK
    }

    fn snapshot(&self) -> EngineState {
        EngineState::XorShift(XorShiftState([self.s0, self.s1]))
    }

    fn from_snapshot(_hashed: &HashedSeed, state: EngineState) -> Result<Self, RandError> {
        let EngineState::XorShift(XorShiftState([s0, s1])) = state else {
            return Err(RandError::InvalidState(format!(
                "expected xorshift state, found {} state",
                state.algorithm()
            )));
        };
        // One word may reach zero mid-sequence; only an all-zero state is stuck
        if (s0 == 0 && s1 == 0) || s0 > MASK || s1 > MASK {
            return Err(RandError::InvalidState(format!(
                "xorshift words must be 63-bit and not both zero, got [{}, {}]",
                s0, s1
            )));
        }
        Ok(Self { s0, s1 })
    }
}
