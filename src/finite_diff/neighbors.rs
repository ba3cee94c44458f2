//! finite_diff::neighbors — forward neighbor values `f(x + h·e_i)`.
//!
//! Purpose
//! -------
//! Evaluate the objective once per dimension at the point shifted by `+h`
//! along that axis, producing the read-only [`NeighborTable`] that every
//! Hessian entry reuses.
//!
//! Key behaviors
//! -------------
//! - Serial: one loop over the dimensions, one reused scratch buffer.
//! - Concurrent: one job per dimension drained by a [`WorkerPool`]; each
//!   job produces the value of its own index only.
//!
//! Invariants & assumptions
//! ------------------------
//! - A table is built exactly once per Hessian call and holds exactly `n`
//!   values before any entry job runs.
//! - The table is immutable once built; entry jobs share it by reference.
use crate::finite_diff::{
    errors::HessResult,
    pool::WorkerPool,
    stencil::eval_at,
    types::{EvalResult, Point},
    workspace::ScratchBuffer,
};

/// NeighborTable — `neigh[i] = f(x + h·e_i)` for `i in 0..n`.
#[derive(Debug, Clone, PartialEq)]
pub struct NeighborTable {
    values: Vec<f64>,
}

impl NeighborTable {
    pub(crate) fn from_values(values: Vec<f64>) -> Self {
        NeighborTable { values }
    }

    /// Populate the table on the calling thread.
    ///
    /// Errors
    /// ------
    /// - Propagates the first objective failure; later dimensions are not
    ///   evaluated.
    pub fn evaluate_serial<F>(
        f: &F, scratch: &mut ScratchBuffer<'_>, n: usize, step: f64,
    ) -> HessResult<Self>
    where
        F: Fn(&Point) -> EvalResult,
    {
        let values = (0..n)
            .map(|i| eval_at(f, scratch.shifted(i, step)))
            .collect::<HessResult<Vec<f64>>>()?;
        Ok(Self::from_values(values))
    }

    /// Populate the table on `pool`, one job per dimension.
    ///
    /// Errors
    /// ------
    /// - Propagates the first objective failure observed by the pool.
    pub fn evaluate_concurrent<F>(
        f: &F, point: &Point, step: f64, pool: &WorkerPool,
    ) -> HessResult<Self>
    where
        F: Fn(&Point) -> EvalResult + Sync,
    {
        let dims: Vec<usize> = (0..point.len()).collect();
        let values = pool.drain(&dims, point, |scratch, &i| eval_at(f, scratch.shifted(i, step)))?;
        Ok(Self::from_values(values))
    }

    /// `f(x + h·e_i)`.
    pub fn get(&self, i: usize) -> f64 {
        self.values[i]
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
