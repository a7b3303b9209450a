//! Mersenne Twister, PHP `mt_rand` flavour
//!
//! Reproduces the generator behind PHP's `mt_srand()`/`mt_rand()` before
//! PHP 7.1: the twist mixes in the magic constant based on the low bit of the
//! current word, and every output is shifted right by one to give 31 bits.
//!
//! Integer seeds are bit-for-bit compatible with `mt_srand($seed)`. Text and
//! byte seeds go through the MD5 digest instead and match nothing external.

use crate::error::RandError;
use crate::seed::{HashedSeed, Seed};
use crate::state::{Algorithm, EngineState, MtState};

use super::Engine;

const N: usize = 624;
const M: usize = 397;

const MATRIX_A: u32 = 0x9908_b0df;
const UPPER_MASK: u32 = 0x8000_0000;
const LOWER_MASK: u32 = 0x7fff_ffff;

const INIT_MULTIPLIER: u32 = 1_812_433_253;

/// 624-word Mersenne Twister state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MtEngine {
    mt: [u32; N],
    left: usize,
    next: usize,
}

impl MtEngine {
    /// Seed the state array from `mt[0]` and run the first reload
    pub fn from_u32(seed: u32) -> Self {
        let mut mt = [0u32; N];
        mt[0] = seed;
        for i in 1..N {
            let r = mt[i - 1];
            mt[i] = INIT_MULTIPLIER
                .wrapping_mul(r ^ (r >> 30))
                .wrapping_add(i as u32);
        }

        let mut engine = Self { mt, left: 0, next: 0 };
        engine.reload();
        engine
    }

    /// Regenerate all 624 words in place
    fn reload(&mut self) {
        let mt = &mut self.mt;
        for p in 0..N - M {
            mt[p] = twist(mt[p + M], mt[p], mt[p + 1]);
        }
        for p in N - M..N - 1 {
            mt[p] = twist(mt[p + M - N], mt[p], mt[p + 1]);
        }
        mt[N - 1] = twist(mt[M - 1], mt[N - 1], mt[0]);

        self.left = N;
        self.next = 0;
    }
}

#[inline]
fn twist(m: u32, u: u32, v: u32) -> u32 {
    let mag = if u & 1 == 1 { MATRIX_A } else { 0 };
    m ^ (((u & UPPER_MASK) | (v & LOWER_MASK)) >> 1) ^ mag
}

impl Engine for MtEngine {
    const ALGORITHM: Algorithm = Algorithm::Mt;
    const INT_MAX: u64 = 0x7fff_ffff;

    fn init(seed: &Seed, hashed: &HashedSeed) -> Self {
        let first = match seed.as_int() {
            // Same truncation as mt_srand
            Some(value) => value as u32,
            None => {
                let [w1, w2, w3, w4] = hashed.words();
                w1 ^ w2 ^ w3 ^ w4
            }
        };
        Self::from_u32(first)
    }

    fn next_int(&mut self) -> u64 {
        if self.left == 0 {
            self.reload();
        }
        self.left -= 1;

        let mut s1 = self.mt[self.next];
        self.next = (self.next + 1) % N;

        s1 ^= s1 >> 11;
        s1 ^= (s1 << 7) & 0x9d2c_5680;
        s1 ^= (s1 << 15) & 0xefc6_0000;
        ((s1 ^ (s1 >> 18)) >> 1) as u64
    }

    fn snapshot(&self) -> EngineState {
        EngineState::Mt(MtState {
            mt: self.mt.to_vec(),
            left: self.left,
            next: self.next,
        })
    }

    fn from_snapshot(_hashed: &HashedSeed, state: EngineState) -> Result<Self, RandError> {
        let EngineState::Mt(state) = state else {
            return Err(RandError::InvalidState(format!(
                "expected mt state, found {} state",
                state.algorithm()
            )));
        };

        let mt: [u32; N] = state.mt.as_slice().try_into().map_err(|_| {
            RandError::InvalidState(format!("mt state needs {} words, got {}", N, state.mt.len()))
        })?;
        if state.left > N || state.next >= N {
            return Err(RandError::InvalidState(format!(
                "mt cursor out of bounds: left={}, next={}",
                state.left, state.next
            )));
        }

        Ok(Self {
            mt,
            left: state.left,
            next: state.next,
        })
    }
}
