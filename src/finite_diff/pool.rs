//! finite_diff::pool — fixed-size worker pool for one evaluation phase.
//!
//! Purpose
//! -------
//! Drain a known-count list of independent jobs across a fixed number of
//! worker threads and return their results only once every job has
//! finished. Each call to [`WorkerPool::drain`] is one phase with its own
//! completion barrier.
//!
//! Key behaviors
//! -------------
//! - Build a dedicated `rayon` thread pool with exactly `workers` threads.
//! - Hand every worker split its own [`ScratchBuffer`] via `map_init`, so no
//!   perturbation buffer is ever aliased.
//! - Collect results in job order; the first error observed short-circuits
//!   the collection while already-running evaluations complete.
//!
//! Invariants & assumptions
//! ------------------------
//! - `ThreadPool::install` returns only after every spawned job has
//!   finished; this is the barrier between phases.
//! - Jobs only read shared state; each result belongs to exactly one job, so
//!   no locking is required.
use crate::finite_diff::{errors::HessResult, types::Point, workspace::ScratchBuffer};
use log::trace;
use rayon::{ThreadPool, ThreadPoolBuilder, prelude::*};

/// WorkerPool — `rayon` thread pool sized for one phase of work.
pub struct WorkerPool {
    pool: ThreadPool,
    workers: usize,
}

impl WorkerPool {
    /// Build a pool with exactly `workers` threads.
    ///
    /// Errors
    /// ------
    /// - `HessError::WorkerPool`
    ///   Returned when the operating system refuses to spawn the threads.
    pub fn new(workers: usize) -> HessResult<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("fdhessian-worker-{i}"))
            .build()?;
        Ok(WorkerPool { pool, workers })
    }

    /// Number of worker threads.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run `run` once per job and return the results in job order.
    ///
    /// Parameters
    /// ----------
    /// - `jobs`: `&[J]`
    ///   Complete job list for the phase; its length is the exact number of
    ///   units of work.
    /// - `point`: `&Point`
    ///   Evaluation point each worker's scratch buffer is reset from.
    /// - `run`: `Fn(&mut ScratchBuffer, &J) -> HessResult<T>`
    ///   Job body; must only read shared state.
    ///
    /// Returns
    /// -------
    /// `HessResult<Vec<T>>`
    ///   - `Ok(values)` with `values[k]` produced by `jobs[k]`.
    ///   - `Err(e)` carrying the first failure observed by the pool.
    pub fn drain<'p, J, T, F>(&self, jobs: &[J], point: &'p Point, run: F) -> HessResult<Vec<T>>
    where
        J: Sync,
        T: Send,
        F: Fn(&mut ScratchBuffer<'p>, &J) -> HessResult<T> + Sync,
    {
        trace!("draining {} jobs on {} workers", jobs.len(), self.workers);
        self.pool.install(|| {
            jobs.par_iter()
                .map_init(|| ScratchBuffer::new(point), |scratch, job| run(scratch, job))
                .collect()
        })
    }
}
