//! Python bindings (feature `pyo3`)
//!
//! A thin layer over the factory: Python code gets one `Random` class whose
//! engine is chosen by name, with snapshots exchanged as JSON strings.

pub mod random;
pub mod types;
