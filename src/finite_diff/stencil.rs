//! finite_diff::stencil — second-order difference formulas and entry jobs.
//!
//! Purpose
//! -------
//! Turn the origin value, the neighbor table, and one extra objective
//! evaluation into a single Hessian entry. Both execution paths call the
//! same functions here, so an entry's floating-point operations never depend
//! on which path computed it.
//!
//! Key behaviors
//! -------------
//! - Diagonal `(i, i)`: evaluate `f(x − h·e_i)` and apply the central
//!   second difference [`diagonal_entry`].
//! - Off-diagonal `(i, j)`, `i < j`: evaluate `f(x + h·e_i + h·e_j)` and
//!   apply the mixed difference [`off_diagonal_entry`].
//! - [`produce_jobs`] emits every `(i, j)` with `i ≤ j` exactly once, row by
//!   row, diagonal first.
//!
//! Conventions
//! -----------
//! - `h` is the resolved step; `neigh[i] = f(x + h·e_i)`.
//! - The diagonal stencil is symmetric (truncation error O(h²)); the mixed
//!   stencil is one-sided (truncation error O(h)).
use crate::finite_diff::{
    errors::HessResult,
    neighbors::NeighborTable,
    types::{EvalResult, Point},
    workspace::ScratchBuffer,
};

/// HessJob — one upper-triangle Hessian entry to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HessJob {
    pub i: usize,
    pub j: usize,
}

impl HessJob {
    pub fn is_diagonal(&self) -> bool {
        self.i == self.j
    }
}

/// Emit every upper-triangle job for an `n`-dimensional point.
///
/// Order is `(0,0), (0,1), …, (0,n−1), (1,1), …, (n−1,n−1)`; the length is
/// [`crate::finite_diff::types::total_jobs`]`(n)`.
pub fn produce_jobs(n: usize) -> Vec<HessJob> {
    (0..n).flat_map(|i| (i..n).map(move |j| HessJob { i, j })).collect()
}

/// Central second difference along one axis.
///
/// `((f(x+h·e_i) − f(x))/h − (f(x) − f(x−h·e_i))/h) / h`
#[inline]
pub fn diagonal_entry(origin: f64, neigh_i: f64, fii: f64, step: f64) -> f64 {
    ((neigh_i - origin) / step - (origin - fii) / step) / step
}

/// Mixed second difference anchored on the neighbor table.
///
/// `((f(x+h·e_i+h·e_j) − f(x+h·e_j))/h − (f(x+h·e_i) − f(x))/h) / h`
#[inline]
pub fn off_diagonal_entry(origin: f64, neigh_i: f64, neigh_j: f64, fij: f64, step: f64) -> f64 {
    ((fij - neigh_j) / step - (neigh_i - origin) / step) / step
}

/// Evaluate the objective and lift its error into [`HessResult`].
#[inline]
pub fn eval_at<F>(f: &F, x: &Point) -> HessResult<f64>
where
    F: Fn(&Point) -> EvalResult,
{
    Ok(f(x)?)
}

/// StencilContext — immutable state shared by every entry job.
///
/// Fields
/// ------
/// - `origin`: `f64` — `f(x)`.
/// - `step`: `f64` — resolved stencil step `h > 0`.
/// - `neigh`: `&NeighborTable` — fully populated `f(x + h·e_i)` table.
#[derive(Debug, Clone, Copy)]
pub struct StencilContext<'t> {
    origin: f64,
    step: f64,
    neigh: &'t NeighborTable,
}

impl<'t> StencilContext<'t> {
    pub fn new(origin: f64, step: f64, neigh: &'t NeighborTable) -> Self {
        StencilContext { origin, step, neigh }
    }

    /// Compute the Hessian entry for `job` with one objective evaluation.
    ///
    /// Errors
    /// ------
    /// - `HessError::EvaluationFailure` (or a `HessError` raised by the
    ///   objective itself) when the extra evaluation fails.
    pub fn evaluate_job<F>(
        &self, f: &F, scratch: &mut ScratchBuffer<'_>, job: HessJob,
    ) -> HessResult<f64>
    where
        F: Fn(&Point) -> EvalResult,
    {
        let HessJob { i, j } = job;
        if job.is_diagonal() {
            let fii = eval_at(f, scratch.shifted(i, -self.step))?;
            Ok(diagonal_entry(self.origin, self.neigh.get(i), fii, self.step))
        } else {
            let fij = eval_at(f, scratch.shifted_pair(i, j, self.step))?;
            Ok(off_diagonal_entry(
                self.origin,
                self.neigh.get(i),
                self.neigh.get(j),
                fij,
                self.step,
            ))
        }
    }
}
