//! finite_diff::settings — configuration for a single Hessian computation.
//!
//! Purpose
//! -------
//! Collect the knobs of a Hessian run in one plain data carrier: the stencil
//! step, an optionally precomputed origin value, and the execution strategy
//! (serial or worker pool, with an optional explicit pool size).
//!
//! Key behaviors
//! -------------
//! - [`HessianSettings::new`] validates every field up front so invalid
//!   configuration is reported before any function evaluation.
//! - `with_*` methods adjust a default configuration one field at a time.
//! - [`HessianSettings::resolved_step`] maps an unset or zero step to
//!   [`DEFAULT_STEP`].
//!
//! Invariants & assumptions
//! ------------------------
//! - A step of exactly `0.0` means "use the default", mirroring `None`.
//! - Negative and non-finite steps are rejected by validation, never
//!   silently replaced.
//! - `workers = Some(0)` is rejected; `None` defers to the available
//!   parallelism reported by `rayon`.
//!
//! Testing notes
//! -------------
//! - Unit tests cover defaults, step resolution, and rejection of invalid
//!   steps and worker counts.
use crate::finite_diff::{
    errors::HessResult,
    types::DEFAULT_STEP,
    validation::{validate_step, validate_workers},
};

/// HessianSettings — configuration for [`crate::finite_diff::hessian`].
///
/// Fields
/// ------
/// - `step`: `Option<f64>`
///   Stencil step. `None` or `Some(0.0)` selects [`DEFAULT_STEP`].
/// - `origin`: `Option<f64>`
///   Precomputed `f(x)`. When `Some`, the engine skips the origin
///   evaluation and uses this value as-is.
/// - `concurrent`: `bool`
///   Selects the worker-pool execution path.
/// - `workers`: `Option<usize>`
///   Explicit pool size for the concurrent path. Still clipped to the
///   number of Hessian entries. Ignored when `concurrent` is false.
///
/// Notes
/// -----
/// - The default configuration is serial, default step, unknown origin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HessianSettings {
    pub step: Option<f64>,
    pub origin: Option<f64>,
    pub concurrent: bool,
    pub workers: Option<usize>,
}

impl HessianSettings {
    /// Construct validated settings.
    ///
    /// Errors
    /// ------
    /// - `HessError::InvalidStep`
    ///   Returned when `step` is negative or non-finite.
    /// - `HessError::InvalidWorkerCount`
    ///   Returned when `workers == Some(0)`.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use rust_fdhessian::finite_diff::HessianSettings;
    /// let settings = HessianSettings::new(Some(1e-3), None, true, Some(2)).unwrap();
    /// assert_eq!(settings.resolved_step(), 1e-3);
    /// assert!(HessianSettings::new(Some(-1.0), None, false, None).is_err());
    /// ```
    pub fn new(
        step: Option<f64>, origin: Option<f64>, concurrent: bool, workers: Option<usize>,
    ) -> HessResult<Self> {
        let settings = HessianSettings { step, origin, concurrent, workers };
        settings.validate()?;
        Ok(settings)
    }

    /// Return a copy with the stencil step replaced.
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }

    /// Return a copy carrying a precomputed origin value `f(x)`.
    pub fn with_origin(mut self, origin: f64) -> Self {
        self.origin = Some(origin);
        self
    }

    /// Return a copy that runs on the worker pool.
    pub fn with_concurrency(mut self, concurrent: bool) -> Self {
        self.concurrent = concurrent;
        self
    }

    /// Return a copy with an explicit worker-pool size.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Check the step and worker count.
    ///
    /// Settings assembled field by field (struct literal or `with_*`) are
    /// validated here before the engine starts.
    pub fn validate(&self) -> HessResult<()> {
        if let Some(step) = self.step {
            validate_step(step)?;
        }
        validate_workers(self.workers)
    }

    /// Step actually used by the stencil.
    pub fn resolved_step(&self) -> f64 {
        match self.step {
            Some(step) if step != 0.0 => step,
            _ => DEFAULT_STEP,
        }
    }
}
