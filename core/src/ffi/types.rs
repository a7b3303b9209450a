//! Type conversion utilities for FFI boundary
//!
//! Converts between Rust types and Python objects (int / str / bytes seeds,
//! error mapping).

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyBytes;

use crate::error::RandError;
use crate::seed::Seed;

/// Convert a Python seed into a [`Seed`]
///
/// `int` → `Seed::Int`, `bytes` → `Seed::Bytes`, `str` → `Seed::Text`.
///
/// # Errors
///
/// Returns PyValueError for any other type, or ints outside the i64 range.
pub fn seed_from_py(obj: &Bound<'_, PyAny>) -> PyResult<Seed> {
    if let Ok(bytes) = obj.downcast::<PyBytes>() {
        return Ok(Seed::Bytes(bytes.as_bytes().to_vec()));
    }
    if let Ok(text) = obj.extract::<String>() {
        return Ok(Seed::Text(text));
    }
    obj.extract::<i64>()
        .map(Seed::Int)
        .map_err(|_| PyValueError::new_err("seed must be int, str or bytes (ints must fit in 64 bits)"))
}

/// Convert a [`Seed`] back into the matching Python object
pub fn seed_to_py(py: Python<'_>, seed: &Seed) -> PyObject {
    match seed {
        Seed::Int(value) => value.into_py(py),
        Seed::Text(text) => text.into_py(py),
        Seed::Bytes(bytes) => PyBytes::new_bound(py, bytes).into_py(py),
    }
}

/// Map a crate error onto `ValueError`
pub fn to_py_err(err: RandError) -> PyErr {
    PyValueError::new_err(err.to_string())
}
