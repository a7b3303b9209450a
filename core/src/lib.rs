//! Replay Rand Core - Deterministic PRNG toolkit
//!
//! Seeded pseudo-random generators whose sequences can be checkpointed and
//! replayed exactly.
//!
//! # Architecture
//!
//! - **rng**: Engine capability, shared generator contract, the three engines
//! - **seed**: Seeds and their MD5 digests
//! - **state**: Snapshots `{algorithm, seed, state}` and their JSON form
//! - **gaussian**: Ziggurat normal sampler layered on any generator
//! - **collections**: Bytes, strings, choice, shuffles built on `range`
//! - **factory**: Name/snapshot/config driven construction
//!
//! # Critical Invariants
//!
//! 1. Same algorithm + same seed → same sequence
//! 2. A restored snapshot continues the original sequence bit for bit
//! 3. Integer seeds on the MT engine reproduce PHP `mt_rand`
//!
//! None of the engines are cryptographically secure.
//!
//! # Example
//! ```
//! use replay_rand_core::{Generator, XorShiftRand};
//!
//! let mut a = XorShiftRand::with_seed("random seed 1");
//! let mut b = XorShiftRand::with_seed("random seed 1");
//! assert_eq!(a.range(1, 100).unwrap(), b.range(1, 100).unwrap());
//! ```

// Module declarations
pub mod collections;
pub mod error;
pub mod factory;
pub mod gaussian;
pub mod rng;
pub mod seed;
pub mod state;

// Re-exports for convenience
pub use collections::RandExt;
pub use error::RandError;
pub use factory::{BoxedGenerator, GeneratorConfig};
pub use gaussian::GaussianSampler;
pub use rng::{
    Engine, Generator, HashEngine, HashRand, MtEngine, MtRand, Rand, XorShiftEngine, XorShiftRand,
};
pub use seed::{HashedSeed, Seed};
pub use state::{Algorithm, EngineState, HashState, MtState, RandState, XorShiftState};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn replay_rand_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::random::PyRandom>()?;
    Ok(())
}
