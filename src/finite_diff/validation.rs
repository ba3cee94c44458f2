//! Validation helpers for Hessian computations.
//!
//! This module centralizes the consistency checks run before and after the
//! finite-difference engine:
//!
//! - **Step checks**: [`validate_step`] ensures the stencil step is finite
//!   and non-negative (zero selects the default).
//! - **Pool checks**: [`validate_workers`] rejects an explicit pool of zero
//!   workers.
//! - **Sink checks**: [`validate_sink_shape`] enforces an `n × n` sink.
//! - **Output checks**: [`validate_hessian`] is an opt-in finiteness check
//!   for callers that want one; the engine never calls it.
use crate::finite_diff::{
    errors::{HessError, HessResult},
    sink::SymMatrix,
};

/// Validate a user-supplied stencil step.
///
/// # Errors
/// Returns [`HessError::InvalidStep`] if the value is non-finite or < 0.0.
pub fn validate_step(step: f64) -> HessResult<()> {
    if !step.is_finite() {
        return Err(HessError::InvalidStep { step, reason: "Step must be finite." });
    }
    if step < 0.0 {
        return Err(HessError::InvalidStep { step, reason: "Step must be positive." });
    }
    Ok(())
}

/// Validate the optional explicit worker count.
///
/// # Errors
/// Returns [`HessError::InvalidWorkerCount`] for `Some(0)`.
pub fn validate_workers(workers: Option<usize>) -> HessResult<()> {
    if let Some(0) = workers {
        return Err(HessError::InvalidWorkerCount {
            workers: 0,
            reason: "Worker count must be at least 1.",
        });
    }
    Ok(())
}

/// Validate that a result sink is `dim × dim`.
///
/// # Errors
/// Returns [`HessError::DimensionMismatch`] with the sink's actual shape.
pub fn validate_sink_shape(shape: (usize, usize), dim: usize) -> HessResult<()> {
    if shape != (dim, dim) {
        return Err(HessError::DimensionMismatch { expected: dim, found: shape });
    }
    Ok(())
}

/// Validate that every stored Hessian entry is finite.
///
/// Only the upper triangle is inspected; the lower triangle mirrors it.
///
/// # Errors
/// Returns [`HessError::NonFiniteHessian`] with the row/col/value of the
/// first offending entry in row-major upper-triangle order.
pub fn validate_hessian(hessian: &SymMatrix) -> HessResult<()> {
    let n = hessian.dim();
    for i in 0..n {
        for j in i..n {
            let value = hessian.at(i, j);
            if !value.is_finite() {
                return Err(HessError::NonFiniteHessian { row: i, col: j, value });
            }
        }
    }
    Ok(())
}
