//! Error taxonomy
//!
//! Every failure in this crate is a local, synchronous validation error raised
//! at the offending call. Engines never fail on their own: `next_int()` is
//! infallible.

use thiserror::Error;

use crate::state::Algorithm;

/// Errors reported by generators, the factory and the collection helpers
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RandError {
    #[error("Max is smaller than min: min={min}, max={max}")]
    InvalidRange { min: i64, max: i64 },

    #[error("Max {max} is bigger than maximum generator value {int_max}")]
    RangeTooLarge { max: i64, int_max: u64 },

    #[error("Invalid length: {0} (must be at least 1)")]
    InvalidLength(usize),

    #[error("Empty collection specified")]
    EmptyCollection,

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("State is from a different generator: expected {expected}, found {found}")]
    StateAlgorithmMismatch {
        expected: Algorithm,
        found: Algorithm,
    },

    #[error("State stack is empty")]
    EmptyStateStack,

    #[error("Negative weights not allowed: weight {weight} at index {index}")]
    NegativeWeight { index: usize, weight: i64 },

    #[error("Weights must sum to at least 1, got {0}")]
    NonPositiveWeightSum(i64),

    #[error("Unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("Invalid generator config: {0}")]
    InvalidConfig(String),
}
