//! finite_diff::hessian — entry points and scheduling for the Hessian engine.
//!
//! Purpose
//! -------
//! Approximate the Hessian of a scalar objective `f: ℝⁿ → ℝ` at a point `x`
//! with second-order finite differences, either on the calling thread or on
//! a fixed-size worker pool, and write the upper triangle into a symmetric
//! sink.
//!
//! Key behaviors
//! -------------
//! - Validate the sink shape and the settings before any evaluation.
//! - Resolve the step ([`HessianSettings::resolved_step`]), the origin value
//!   (given, or one evaluation at `x`), and the worker count.
//! - Run two phases: the neighbor table `f(x + h·e_i)` (phase A), then one
//!   extra evaluation per upper-triangle entry (phase B).
//!
//! Invariants & assumptions
//! ------------------------
//! - The objective is deterministic and safe to call concurrently; `Sync` is
//!   required by the signature.
//! - The origin is evaluated at most once per call and not at all when
//!   `settings.origin` is `Some` or `n == 0`.
//! - Phase B never starts before every phase A job has finished.
//! - Serial and concurrent runs evaluate the objective at the same points and
//!   combine them with the same functions, so every entry is bit-identical
//!   across paths.
//!
//! Conventions
//! -----------
//! - Worker count: `1` when not concurrent, otherwise
//!   `min(workers or rayon::current_num_threads(), n + n·(n−1)/2)`. A
//!   resolved count of `1` always takes the serial path.
//! - Phase A uses `min(workers, n)` threads.
//! - Failures are surfaced as `HessError` via [`HessResult<T>`]; the sink's
//!   contents are unspecified after an error.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the analytic scenarios (quadratic, saddle, monkey
//!   saddle), serial/concurrent equality, origin handling, `n = 0`, dense
//!   sinks, and configuration and evaluation failures.
use crate::finite_diff::{
    errors::HessResult,
    neighbors::NeighborTable,
    pool::WorkerPool,
    settings::HessianSettings,
    sink::{SymMatrix, SymmetricSink},
    stencil::{StencilContext, eval_at, produce_jobs},
    types::{EvalResult, Point, total_jobs},
    validation::validate_sink_shape,
    workspace::ScratchBuffer,
};
use log::debug;

/// hessian — finite-difference Hessian into a freshly allocated matrix.
///
/// Parameters
/// ----------
/// - `f`: `&F`
///   Objective `x ↦ f(x)`. Errors it returns abort the computation.
/// - `x`: `&Point`
///   Evaluation point; its length `n` fixes the `n × n` result.
/// - `settings`: `Option<&HessianSettings>`
///   `None` selects [`HessianSettings::default`].
///
/// Returns
/// -------
/// `HessResult<SymMatrix>`
///   The approximated Hessian, or the first error encountered.
///
/// Errors
/// ------
/// - `HessError::InvalidStep` / `HessError::InvalidWorkerCount`
///   Invalid settings, reported before any evaluation.
/// - `HessError::EvaluationFailure`
///   The objective returned an error.
/// - `HessError::WorkerPool`
///   The concurrent path could not spawn its threads.
///
/// Examples
/// --------
/// ```rust
/// # use ndarray::array;
/// # use rust_fdhessian::finite_diff::{hessian, Point, EvalResult};
/// let f = |x: &Point| -> EvalResult { Ok(x[0] * x[0] - x[1] * x[1]) };
/// let h = hessian(&f, &array![1.0, 2.0], None).unwrap();
/// assert!((h.at(0, 0) - 2.0).abs() < 1e-6);
/// assert!((h.at(1, 1) + 2.0).abs() < 1e-6);
/// assert!(h.at(0, 1).abs() < 1e-6);
/// ```
pub fn hessian<F>(f: &F, x: &Point, settings: Option<&HessianSettings>) -> HessResult<SymMatrix>
where
    F: Fn(&Point) -> EvalResult + Sync,
{
    let mut dst = SymMatrix::zeros(x.len());
    hessian_into(&mut dst, f, x, settings)?;
    Ok(dst)
}

/// hessian_into — finite-difference Hessian into a caller-provided sink.
///
/// Parameters
/// ----------
/// - `dst`: `&mut S`
///   Sink of shape `(n, n)`. Every upper-triangle cell is overwritten on
///   success.
/// - `f`, `x`, `settings`: as in [`hessian`].
///
/// Errors
/// ------
/// - `HessError::DimensionMismatch`
///   Returned when `dst.shape() != (n, n)`, before any evaluation.
/// - Any error documented on [`hessian`].
///
/// Notes
/// -----
/// - On the serial path, entries computed before a failure have already
///   been written. On the concurrent path nothing is written unless every
///   entry succeeded.
pub fn hessian_into<S, F>(
    dst: &mut S, f: &F, x: &Point, settings: Option<&HessianSettings>,
) -> HessResult<()>
where
    S: SymmetricSink + ?Sized,
    F: Fn(&Point) -> EvalResult + Sync,
{
    let n = x.len();
    validate_sink_shape(dst.shape(), n)?;
    let settings = settings.copied().unwrap_or_default();
    settings.validate()?;

    let step = settings.resolved_step();
    let workers = resolve_workers(&settings, n);
    debug!(
        "finite-difference Hessian: n = {n}, step = {step:e}, workers = {workers}, origin known = {}",
        settings.origin.is_some()
    );
    if n == 0 {
        return Ok(());
    }

    let mut scratch = ScratchBuffer::new(x);
    let origin = match settings.origin {
        Some(value) => value,
        None => eval_at(f, scratch.origin())?,
    };

    if workers == 1 {
        run_serial(dst, f, &mut scratch, step, origin)
    } else {
        run_concurrent(dst, f, x, step, origin, workers)
    }
}

// ---- Helper methods ----

/// Resolve the pool size for a run over an `n`-dimensional point.
///
/// Never exceeds the number of Hessian entries and never returns 0.
fn resolve_workers(settings: &HessianSettings, n: usize) -> usize {
    if !settings.concurrent {
        return 1;
    }
    let available = settings.workers.unwrap_or_else(rayon::current_num_threads);
    available.min(total_jobs(n)).max(1)
}

/// Both phases on the calling thread with a single scratch buffer.
fn run_serial<S, F>(
    dst: &mut S, f: &F, scratch: &mut ScratchBuffer<'_>, step: f64, origin: f64,
) -> HessResult<()>
where
    S: SymmetricSink + ?Sized,
    F: Fn(&Point) -> EvalResult,
{
    let n = dst.shape().0;
    let neigh = NeighborTable::evaluate_serial(f, scratch, n, step)?;
    let ctx = StencilContext::new(origin, step, &neigh);
    for job in produce_jobs(n) {
        let value = ctx.evaluate_job(f, scratch, job)?;
        dst.set_sym(job.i, job.j, value);
    }
    Ok(())
}

/// Phase A and phase B on dedicated pools, separated by a full barrier.
fn run_concurrent<S, F>(
    dst: &mut S, f: &F, x: &Point, step: f64, origin: f64, workers: usize,
) -> HessResult<()>
where
    S: SymmetricSink + ?Sized,
    F: Fn(&Point) -> EvalResult + Sync,
{
    let n = x.len();
    let neigh = {
        let pool = WorkerPool::new(workers.min(n))?;
        NeighborTable::evaluate_concurrent(f, x, step, &pool)?
    };

    let jobs = produce_jobs(n);
    let pool = WorkerPool::new(workers)?;
    let ctx = StencilContext::new(origin, step, &neigh);
    let values = pool.drain(&jobs, x, |scratch, job| ctx.evaluate_job(f, scratch, *job))?;

    for (job, value) in jobs.iter().zip(values) {
        dst.set_sym(job.i, job.j, value);
    }
    Ok(())
}
