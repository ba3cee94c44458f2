//! finite_diff::errors — unified error surface for the Hessian engine.
//!
//! Purpose
//! -------
//! Collect every failure the finite-difference engine can report into a
//! single enum, [`HessError`], with a crate-wide result alias
//! [`HessResult<T>`]. Configuration problems, worker-pool construction
//! failures, and errors raised by the user-supplied objective all surface
//! through this type.
//!
//! Conventions
//! -----------
//! - Configuration errors (`DimensionMismatch`, `InvalidStep`,
//!   `InvalidWorkerCount`) are produced before any function evaluation.
//! - Objective errors arrive as `argmin::core::Error` and are mapped via
//!   `From<Error>`; a `HessError` smuggled through an argmin error is
//!   recovered unchanged.
//! - `NonFiniteHessian` is only produced by the opt-in validation helper;
//!   the engine never inspects the numeric quality of its output.
use argmin::core::Error;

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Crate-wide result alias for Hessian computations.
pub type HessResult<T> = Result<T, HessError>;

#[derive(Debug, Clone, PartialEq)]
pub enum HessError {
    // ---- Configuration ----
    /// Result sink dimensions do not match the point dimension.
    DimensionMismatch {
        expected: usize,
        found: (usize, usize),
    },

    /// Step size must be finite and non-negative (zero selects the default).
    InvalidStep {
        step: f64,
        reason: &'static str,
    },

    /// Explicit worker count must be at least 1.
    InvalidWorkerCount {
        workers: usize,
        reason: &'static str,
    },

    // ---- Execution ----
    /// The user-supplied objective returned an error.
    EvaluationFailure {
        text: String,
    },

    /// The worker pool could not be constructed.
    WorkerPool {
        text: String,
    },

    // ---- Validation ----
    /// Hessian entries need to be finite.
    NonFiniteHessian {
        row: usize,
        col: usize,
        value: f64,
    },
}

impl std::error::Error for HessError {}

impl std::fmt::Display for HessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Configuration ----
            HessError::DimensionMismatch { expected, found } => {
                write!(
                    f,
                    "Hessian dimension mismatch: expected ({expected}, {expected}), found {found:?}"
                )
            }
            HessError::InvalidStep { step, reason } => {
                write!(f, "Invalid finite-difference step {step}: {reason}")
            }
            HessError::InvalidWorkerCount { workers, reason } => {
                write!(f, "Invalid worker count {workers}: {reason}")
            }

            // ---- Execution ----
            HessError::EvaluationFailure { text } => {
                write!(f, "Function evaluation failed: {text}")
            }
            HessError::WorkerPool { text } => {
                write!(f, "Failed to build worker pool: {text}")
            }

            // ---- Validation ----
            HessError::NonFiniteHessian { row, col, value } => {
                write!(f, "Invalid Hessian at ({row}, {col}): {value}, must be finite")
            }
        }
    }
}

impl From<Error> for HessError {
    fn from(original_err: Error) -> Self {
        match original_err.downcast::<HessError>() {
            Ok(hess_err) => hess_err,
            Err(err) => HessError::EvaluationFailure { text: err.to_string() },
        }
    }
}

impl From<rayon::ThreadPoolBuildError> for HessError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        HessError::WorkerPool { text: err.to_string() }
    }
}

#[cfg(feature = "python-bindings")]
impl From<HessError> for PyErr {
    fn from(err: HessError) -> PyErr {
        PyValueError::new_err(format!("HessError: {err}"))
    }
}
