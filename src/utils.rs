//! utils — conversion helpers for the Python boundary.
//!
//! Only compiled with the `python-bindings` feature. Keeps the PyO3/numpy
//! plumbing out of the numerical modules.

#[cfg(feature = "python-bindings")]
use argmin::core::Error;

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::finite_diff::{EvalResult, Point};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Array1 / Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1,
};

/// Borrow a 1-D float64 view of `raw_data`.
///
/// Accepts a contiguous `numpy.ndarray`, anything with a `to_numpy()` method
/// (e.g. `pandas.Series`), or a plain sequence of floats, in that order.
#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        pyo3::exceptions::PyTypeError::new_err(
            "expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64",
        )
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Evaluate a Python callable at `x` and read back a float.
///
/// Re-acquires the GIL for each call so it can run on pool workers. The
/// callable receives a fresh `numpy.ndarray` copy of `x`; Python exceptions
/// become `argmin::core::Error` and therefore `HessError::EvaluationFailure`.
#[cfg(feature = "python-bindings")]
pub fn call_objective(callable: &Py<PyAny>, x: &Point) -> EvalResult {
    Python::with_gil(|py| {
        let arg = x.clone().into_pyarray(py);
        callable.call1(py, (arg,)).and_then(|value| value.extract::<f64>(py))
    })
    .map_err(Error::from)
}
