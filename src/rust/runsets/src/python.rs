use pyo3::exceptions::PyKeyError;
use pyo3::prelude::*;

use crate::disjoint_set::DisjointSet;
use crate::error::DisjointSetError;
use crate::runs::{longest_run, longest_runs_batch};

impl From<DisjointSetError> for PyErr {
    fn from(err: DisjointSetError) -> Self {
        PyErr::new::<PyKeyError, _>(err.to_string())
    }
}

/// Union-Find over Python integers.
///
/// Keys must be registered with `add` before `find`, `union`,
/// `component_size` or `connected`; otherwise a `KeyError` is raised.
///
/// Example:
///     ```python
///     ds = DisjointSet([1, 2, 3, 10])
///     ds.union(1, 2)
///     ds.union(2, 3)
///     ds.component_size(3)  # 3
///     ```
#[pyclass(name = "DisjointSet")]
#[derive(Default)]
pub struct PyDisjointSet {
    inner: DisjointSet,
}

#[pymethods]
impl PyDisjointSet {
    #[new]
    #[pyo3(signature = (keys=None))]
    pub fn new(keys: Option<Vec<i64>>) -> Self {
        let keys = keys.unwrap_or_default();
        let mut inner = DisjointSet::with_capacity(keys.len());
        for key in keys {
            inner.add(key);
        }
        Self { inner }
    }

    /// Register a key. Returns False if it was already present.
    pub fn add(&mut self, key: i64) -> bool {
        self.inner.add(key)
    }

    /// Root key of the component containing `key`.
    pub fn find(&mut self, key: i64) -> PyResult<i64> {
        Ok(self.inner.try_find(key)?)
    }

    /// Merge two components. Returns False if they were already merged.
    pub fn union(&mut self, a: i64, b: i64) -> PyResult<bool> {
        Ok(self.inner.try_union(a, b)?)
    }

    pub fn component_size(&mut self, key: i64) -> PyResult<usize> {
        Ok(self.inner.try_component_size(key)?)
    }

    pub fn connected(&mut self, a: i64, b: i64) -> PyResult<bool> {
        Ok(self.inner.try_connected(a, b)?)
    }

    pub fn max_component_size(&self) -> usize {
        self.inner.max_component_size()
    }

    /// Components as sorted lists of keys, ordered by their smallest key.
    pub fn components(&mut self) -> Vec<Vec<i64>> {
        self.inner.partition().components()
    }

    #[getter]
    pub fn num_components(&self) -> usize {
        self.inner.component_count()
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    fn __contains__(&self, key: i64) -> bool {
        self.inner.contains(key)
    }

    fn __repr__(&self) -> String {
        format!(
            "DisjointSet(keys={}, components={})",
            self.inner.len(),
            self.inner.component_count()
        )
    }
}

/// Length of the longest run of consecutive integers.
#[pyfunction]
pub fn longest_consecutive(values: Vec<i64>) -> usize {
    longest_run(&values)
}

/// Longest run for each input list, computed in parallel without the GIL.
#[pyfunction]
pub fn longest_consecutive_batch(py: Python<'_>, inputs: Vec<Vec<i64>>) -> Vec<usize> {
    py.allow_threads(|| longest_runs_batch(&inputs))
}

/// A Python module implemented in Rust.
#[pymodule]
fn _rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyDisjointSet>()?;
    m.add_function(wrap_pyfunction!(longest_consecutive, m)?)?;
    m.add_function(wrap_pyfunction!(longest_consecutive_batch, m)?)?;
    Ok(())
}
