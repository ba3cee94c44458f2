//! Adapter that gives an `argmin` problem a finite-difference Hessian.
//!
//! Second-order `argmin` solvers ask the problem for `Hessian::hessian`.
//! [`FdHessian`] wraps any problem whose cost is a scalar over [`Point`] and
//! answers that call with [`crate::finite_diff::hessian`], evaluating the
//! wrapped problem's `cost` at the stencil points. `CostFunction` and
//! `Gradient` are forwarded unchanged, so the adapter can stand in for the
//! original problem inside an `Executor`.
use crate::finite_diff::{EvalResult, HessianSettings, Point, hessian};
use argmin::core::{CostFunction, Error, Gradient, Hessian};
use ndarray::Array2;

/// Bridges an `argmin` cost function to a finite-difference Hessian.
///
/// - `CostFunction::cost` and `Gradient::gradient` delegate to `problem`.
/// - `Hessian::hessian` runs the finite-difference engine on
///   `problem.cost` with `settings` and returns a dense, symmetric
///   `Array2<f64>`.
///
/// The wrapped problem must be `Sync` because the concurrent engine calls
/// `cost` from several workers at once.
#[derive(Debug, Clone)]
pub struct FdHessian<'a, P> {
    pub problem: &'a P,
    pub settings: HessianSettings,
}

impl<'a, P> FdHessian<'a, P> {
    /// Wrap `problem` with default Hessian settings.
    pub fn new(problem: &'a P) -> Self {
        Self { problem, settings: HessianSettings::default() }
    }

    /// Wrap `problem` with explicit Hessian settings.
    pub fn with_settings(problem: &'a P, settings: HessianSettings) -> Self {
        Self { problem, settings }
    }
}

impl<'a, P> CostFunction for FdHessian<'a, P>
where
    P: CostFunction<Param = Point, Output = f64>,
{
    type Param = Point;
    type Output = f64;

    fn cost(&self, param: &Self::Param) -> Result<Self::Output, Error> {
        self.problem.cost(param)
    }
}

impl<'a, P> Gradient for FdHessian<'a, P>
where
    P: Gradient<Param = Point>,
{
    type Param = Point;
    type Gradient = P::Gradient;

    fn gradient(&self, param: &Self::Param) -> Result<Self::Gradient, Error> {
        self.problem.gradient(param)
    }
}

impl<'a, P> Hessian for FdHessian<'a, P>
where
    P: CostFunction<Param = Point, Output = f64> + Sync,
{
    type Param = Point;
    type Hessian = Array2<f64>;

    /// Finite-difference Hessian of the wrapped cost at `param`.
    ///
    /// # Errors
    /// - Any `HessError` from the engine (invalid settings, failed pool),
    ///   carried inside `argmin::core::Error`.
    /// - Errors raised by the wrapped `cost` surface as
    ///   `HessError::EvaluationFailure`.
    fn hessian(&self, param: &Self::Param) -> Result<Self::Hessian, Error> {
        let cost = |x: &Point| -> EvalResult { self.problem.cost(x) };
        let hess = hessian(&cost, param, Some(&self.settings))?;
        Ok(hess.to_array2())
    }
}
