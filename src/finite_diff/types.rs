//! finite_diff::types — shared numeric aliases and constants.
//!
//! Purpose
//! -------
//! Centralize the numeric types used by the Hessian engine so the rest of the
//! module can stay agnostic to the concrete `ndarray` containers.
//!
//! Conventions
//! -----------
//! - A point is an `ndarray` vector over `f64`; its length `n` fixes the
//!   Hessian dimension `n × n`.
//! - [`DEFAULT_STEP`] is a tuning constant for the second-order central
//!   stencil, not part of the stencil's correctness.
use argmin::core::Error;
use ndarray::Array1;

/// Evaluation point `x` at which the Hessian is approximated.
///
/// Alias for `ndarray::Array1<f64>`; scratch buffers share this type so the
/// objective always sees a contiguous owned vector.
pub type Point = Array1<f64>;

/// Scalar value returned by the objective.
pub type Value = f64;

/// Outcome of a single objective evaluation.
pub type EvalResult = Result<Value, Error>;

/// Default step for the second-order central difference.
pub const DEFAULT_STEP: f64 = 1e-4;

/// Number of Hessian entries computed for an `n`-dimensional point.
///
/// Diagonal plus strict upper triangle: `n + n·(n − 1)/2`.
pub fn total_jobs(n: usize) -> usize {
    n + n * n.saturating_sub(1) / 2
}
