//! PyO3 wrapper for generators
//!
//! This module provides the Python interface to the Rust generators.

use pyo3::prelude::*;

use super::types::{seed_from_py, seed_to_py, to_py_err};
use crate::factory::{self, BoxedGenerator};
use crate::state::RandState;

/// Python wrapper for a seeded generator
///
/// # Example (from Python)
///
/// ```python
/// from replay_rand_core import Random
///
/// rng = Random("mt", 2015)
/// rng.push_state()
/// first = rng.range(-100, 100)
/// rng.pop_state()
/// assert rng.range(-100, 100) == first
///
/// saved = rng.get_state()          # JSON string
/// other = Random.from_state(saved)
/// ```
#[pyclass(name = "Random")]
pub struct PyRandom {
    inner: BoxedGenerator,
}

#[pymethods]
impl PyRandom {
    /// Create a generator
    ///
    /// # Arguments
    ///
    /// * `algorithm` - "mt", "xorshift" (default) or "hash"
    /// * `seed` - int, str or bytes; chosen automatically when omitted
    ///
    /// # Errors
    ///
    /// Raises ValueError for an unknown algorithm or unsupported seed type.
    #[new]
    #[pyo3(signature = (algorithm = "xorshift", seed = None))]
    fn new(algorithm: &str, seed: Option<&Bound<'_, PyAny>>) -> PyResult<Self> {
        let seed = seed.map(seed_from_py).transpose()?;
        let inner = factory::create_named(seed, algorithm).map_err(to_py_err)?;
        Ok(PyRandom { inner })
    }

    /// Create a generator from a JSON snapshot returned by `get_state()`
    #[staticmethod]
    fn from_state(state: &str) -> PyResult<Self> {
        let inner = factory::create_from_json(state).map_err(to_py_err)?;
        Ok(PyRandom { inner })
    }

    #[getter]
    fn algorithm(&self) -> String {
        self.inner.algorithm().to_string()
    }

    #[getter]
    fn int_max(&self) -> u64 {
        self.inner.int_max()
    }

    fn next_int(&mut self) -> u64 {
        self.inner.next_int()
    }

    /// Uniform integer in `[min, max]`; raises ValueError on a bad range
    fn range(&mut self, min: i64, max: i64) -> PyResult<i64> {
        self.inner.range(min, max).map_err(to_py_err)
    }

    fn next_float(&mut self) -> f64 {
        self.inner.next_float()
    }

    fn next_bool(&mut self) -> bool {
        self.inner.next_bool()
    }

    #[pyo3(signature = (mean = 0.0, sigma = 1.0))]
    fn gaussian(&mut self, mean: f64, sigma: f64) -> f64 {
        self.inner.gaussian(mean, sigma)
    }

    fn seed(&self, py: Python<'_>) -> PyObject {
        seed_to_py(py, self.inner.seed())
    }

    fn set_seed(&mut self, seed: &Bound<'_, PyAny>) -> PyResult<()> {
        self.inner.set_seed(seed_from_py(seed)?);
        Ok(())
    }

    // ========================================================================
    // State Methods
    // ========================================================================

    /// Current snapshot as a JSON string
    fn get_state(&self) -> PyResult<String> {
        self.inner.state().to_json().map_err(to_py_err)
    }

    /// Restore a JSON snapshot taken from a generator of the same algorithm
    fn set_state(&mut self, state: &str) -> PyResult<()> {
        let state = RandState::from_json(state).map_err(to_py_err)?;
        self.inner.set_state(state).map_err(to_py_err)
    }

    fn push_state(&mut self) {
        self.inner.push_state();
    }

    fn pop_state(&mut self) -> PyResult<()> {
        self.inner.pop_state().map_err(to_py_err)
    }

    fn reset(&mut self) {
        self.inner.reset();
    }
}
