//! State snapshots
//!
//! A [`RandState`] captures everything needed to resume a generator's
//! sequence at an exact position: which algorithm produced it, the seed, and
//! the engine's mutable state.
//!
//! # Critical Invariants
//!
//! - **Round-trip**: restoring a snapshot reproduces the identical future
//!   sequence of the instance that produced it
//! - **Algorithm matching**: a snapshot can only be loaded into the engine
//!   that produced it

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RandError;
use crate::seed::Seed;

// ============================================================================
// Algorithm identifier
// ============================================================================

/// Identifies a concrete engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Algorithm {
    /// PHP `mt_rand`-compatible Mersenne Twister (31-bit)
    Mt,
    /// xorshift128+ (63-bit)
    #[default]
    XorShift,
    /// MD5 hash counter (63-bit)
    Hash,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Mt, Algorithm::XorShift, Algorithm::Hash];

    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Mt => "mt",
            Algorithm::XorShift => "xorshift",
            Algorithm::Hash => "hash",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = RandError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_ascii_lowercase().as_str() {
            "mt" | "mt_rand" | "mtrand" => Ok(Algorithm::Mt),
            "xorshift" | "xor_shift" | "xorshiftrand" => Ok(Algorithm::XorShift),
            "hash" | "hashrand" => Ok(Algorithm::Hash),
            _ => Err(RandError::UnknownAlgorithm(name.to_string())),
        }
    }
}

impl TryFrom<String> for Algorithm {
    type Error = RandError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

impl From<Algorithm> for String {
    fn from(algorithm: Algorithm) -> Self {
        algorithm.as_str().to_string()
    }
}

// ============================================================================
// Engine payloads
// ============================================================================

/// Mersenne Twister state: 624 words plus the reload counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MtState {
    pub mt: Vec<u32>,
    /// Words left before the next reload
    pub left: usize,
    /// Cursor into `mt`
    pub next: usize,
}

/// xorshift128+ state, two 63-bit words
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct XorShiftState(pub [u64; 2]);

/// Hash-counter state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashState(pub u64);

/// Per-algorithm engine state
///
/// Serialized untagged: a map for MT, a two-element array for xorshift and a
/// bare number for the hash counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EngineState {
    Mt(MtState),
    XorShift(XorShiftState),
    Hash(HashState),
}

impl EngineState {
    /// Algorithm whose payload shape this is
    pub fn algorithm(&self) -> Algorithm {
        match self {
            EngineState::Mt(_) => Algorithm::Mt,
            EngineState::XorShift(_) => Algorithm::XorShift,
            EngineState::Hash(_) => Algorithm::Hash,
        }
    }
}

// ============================================================================
// Snapshot
// ============================================================================

/// Complete generator snapshot `{algorithm, seed, state}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandState {
    pub algorithm: Algorithm,
    pub seed: Seed,
    pub state: EngineState,
}

impl RandState {
    /// Serialize to a JSON string
    pub fn to_json(&self) -> Result<String, RandError> {
        serde_json::to_string(self).map_err(|e| RandError::InvalidState(e.to_string()))
    }

    /// Parse a snapshot previously produced by [`RandState::to_json`]
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if a field is missing or malformed, including an
    /// unrecognised algorithm name.
    pub fn from_json(json: &str) -> Result<Self, RandError> {
        serde_json::from_str(json).map_err(|e| RandError::InvalidState(e.to_string()))
    }
}
