//! Generator factory and configuration
//!
//! Builds a boxed generator from an algorithm name, a saved snapshot or a
//! JSON config. Callers that know the engine at compile time should use
//! [`Rand`] directly instead.
//!
//! # Example
//!
//! ```
//! use replay_rand_core::factory::{self, GeneratorConfig};
//! use replay_rand_core::{Algorithm, Generator, Seed};
//!
//! let mut rng = factory::create(Some(Seed::from("seeeedz")), Algorithm::Mt);
//! let snapshot = rng.state();
//! let first = rng.next_int();
//!
//! let mut replay = factory::create_from_state(snapshot).unwrap();
//! assert_eq!(replay.next_int(), first);
//!
//! let config = GeneratorConfig::from_json(r#"{"algorithm": "hash", "seed": 42}"#).unwrap();
//! assert_eq!(config.build().algorithm(), Algorithm::Hash);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RandError;
use crate::rng::{Generator, HashRand, MtRand, XorShiftRand};
use crate::seed::Seed;
use crate::state::{Algorithm, RandState};

/// Type-erased generator
pub type BoxedGenerator = Box<dyn Generator + Send>;

/// Create a generator for `algorithm`, seeded with `seed` or an automatic seed
pub fn create(seed: Option<Seed>, algorithm: Algorithm) -> BoxedGenerator {
    let seed = seed.unwrap_or_else(Seed::auto);
    debug!(%algorithm, %seed, "creating generator");
    match algorithm {
        Algorithm::Mt => Box::new(MtRand::with_seed(seed)),
        Algorithm::XorShift => Box::new(XorShiftRand::with_seed(seed)),
        Algorithm::Hash => Box::new(HashRand::with_seed(seed)),
    }
}

/// Create a generator from an algorithm name
///
/// # Errors
///
/// Returns `UnknownAlgorithm` if `name` does not name a supported engine.
pub fn create_named(seed: Option<Seed>, name: &str) -> Result<BoxedGenerator, RandError> {
    let algorithm: Algorithm = name.parse()?;
    Ok(create(seed, algorithm))
}

/// Create a generator positioned exactly at a snapshot
pub fn create_from_state(state: RandState) -> Result<BoxedGenerator, RandError> {
    let mut rng = create(Some(state.seed.clone()), state.algorithm);
    rng.set_state(state)?;
    Ok(rng)
}

/// Create a generator from a JSON snapshot
pub fn create_from_json(json: &str) -> Result<BoxedGenerator, RandError> {
    create_from_state(RandState::from_json(json)?)
}

/// Declarative generator configuration
///
/// Every field is optional in JSON: the algorithm defaults to xorshift and a
/// missing seed is chosen automatically at build time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub algorithm: Algorithm,
    pub seed: Option<Seed>,
}

impl GeneratorConfig {
    pub fn new(algorithm: Algorithm, seed: Option<Seed>) -> Self {
        Self { algorithm, seed }
    }

    /// Parse a config from JSON
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the JSON is malformed or names an unknown
    /// algorithm.
    pub fn from_json(json: &str) -> Result<Self, RandError> {
        serde_json::from_str(json).map_err(|e| RandError::InvalidConfig(e.to_string()))
    }

    pub fn build(&self) -> BoxedGenerator {
        create(self.seed.clone(), self.algorithm)
    }
}
