//! rust_fdhessian — finite-difference Hessians with optional Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the Hessian engine to Python via the `_rust_fdhessian` extension
//! module when the `python-bindings` feature is enabled.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules: `finite_diff` (the engine) and
//!   `optimization` (the `argmin` adapter).
//! - Define the `#[pyfunction]` wrapper and the `#[pymodule]` initializer for
//!   the `_rust_fdhessian` Python extension. `hessian` is exposed at the top
//!   level and under the `rust_fdhessian.finite_diff` submodule so
//!   dot-notation imports work.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in `finite_diff`; this file performs only FFI
//!   glue, input conversion and error mapping.
//! - Python objectives are called with the GIL re-acquired per evaluation, so
//!   the concurrent path is safe but serialized on the interpreter.
//!
//! Conventions
//! -----------
//! - Errors from the engine are `HessError` internally and become
//!   `ValueError` at the PyO3 boundary.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code depends on `finite_diff` directly and can ignore the
//!   PyO3 items guarded by the `python-bindings` feature.

pub mod finite_diff;
pub mod optimization;
pub mod utils;

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArray2};

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    finite_diff::{HessianSettings, Point, hessian},
    utils::{call_objective, extract_f64_array},
};

/// Finite-difference Hessian of a Python callable.
///
/// Parameters
/// ----------
/// - `f`: callable taking a 1-D `numpy.ndarray` and returning a float.
/// - `x`: 1-D array-like evaluation point (not modified).
/// - `step`: finite-difference step; `None` or `0.0` selects `1e-4`.
/// - `origin`: known `f(x)`; skips the origin evaluation when given.
/// - `concurrent`: evaluate stencil points on a worker pool.
/// - `workers`: pool size; defaults to the number of logical CPUs.
///
/// Returns
/// -------
/// A dense, symmetric `(n, n)` `numpy.ndarray`.
///
/// Errors
/// ------
/// - `ValueError` for invalid settings or when `f` raises / returns a
///   non-float.
/// - `TypeError` when `x` is not a 1-D float sequence.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    name = "hessian",
    text_signature = "(f, x, /, step=None, origin=None, concurrent=False, workers=None)",
    signature = (f, x, step = None, origin = None, concurrent = false, workers = None)
)]
fn py_hessian<'py>(
    py: Python<'py>, f: &Bound<'py, PyAny>, x: &Bound<'py, PyAny>, step: Option<f64>,
    origin: Option<f64>, concurrent: bool, workers: Option<usize>,
) -> PyResult<Bound<'py, PyArray2<f64>>> {
    let point: Point = extract_f64_array(py, x)?.as_array().to_owned();
    let settings = HessianSettings::new(step, origin, concurrent, workers)?;
    let callable: Py<PyAny> = f.clone().unbind();

    let hess = py.allow_threads(|| {
        let objective = |p: &Point| call_objective(&callable, p);
        hessian(&objective, &point, Some(&settings))
    })?;

    Ok(hess.to_array2().into_pyarray(py))
}

#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_fdhessian<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py_hessian, m)?)?;
    let finite_diff_mod = PyModule::new(_py, "finite_diff")?;
    finite_diff(_py, m, &finite_diff_mod)?;

    // Manually add submodules into sys.modules to allow for dot notation.
    _py.import("sys")?.getattr("modules")?.set_item("rust_fdhessian.finite_diff", finite_diff_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn finite_diff<'py>(
    _py: Python, rust_fdhessian: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py_hessian, m)?)?;
    rust_fdhessian.add_submodule(m)?;
    Ok(())
}
