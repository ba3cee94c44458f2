//! Integration tests for the finite-difference Hessian pipeline.
//!
//! Purpose
//! -------
//! - Validate the public surface end to end: settings construction, the
//!   `hessian` / `hessian_into` entry points, every sink type, and the
//!   `argmin` adapter.
//! - Exercise realistic usage (a Newton step built from the computed
//!   Hessian, pooled execution on larger points) rather than only the
//!   textbook polynomials.
//!
//! Coverage
//! --------
//! - `finite_diff`:
//!   - Analytic polynomials `x0²`, `x0² − x1²`, `x0³ − 3·x0·x1²`.
//!   - Evaluation counts and thread safety of the concurrent path.
//!   - `SymMatrix`, `Array2<f64>` and `DMatrix<f64>` sinks.
//!   - `validate_hessian` on a poisoned objective.
//! - `optimization::adapter`:
//!   - `FdHessian` inside a hand-rolled Newton iteration.
//!
//! Exclusions
//! ----------
//! - Formula-level and scheduling unit checks; those live next to the code
//!   in `finite_diff`.
//! - Python bindings; those require an interpreter and are tested from the
//!   Python package.
use approx::assert_relative_eq;
use argmin::core::{CostFunction, Error, Gradient, Hessian};
use nalgebra::{DMatrix, DVector};
use ndarray::{Array1, Array2, array};
use rand::{Rng, SeedableRng, rngs::StdRng};
use rust_fdhessian::{
    finite_diff::{
        DEFAULT_STEP, EvalResult, HessError, HessianSettings, Point, SymMatrix, hessian,
        hessian_into, validate_hessian,
    },
    optimization::adapter::FdHessian,
};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Purpose
/// -------
/// Compare every cell of a computed Hessian with an analytic one, using an
/// absolute-or-relative tolerance.
fn assert_matches(got: &SymMatrix, want: &Array2<f64>, tol: f64) {
    assert_eq!(got.dim(), want.nrows());
    for i in 0..got.dim() {
        for j in 0..got.dim() {
            assert_relative_eq!(got.at(i, j), want[[i, j]], epsilon = tol, max_relative = tol);
        }
    }
}

/// Purpose
/// -------
/// All execution configurations a caller can choose from.
fn configurations() -> Vec<HessianSettings> {
    vec![
        HessianSettings::default(),
        HessianSettings::default().with_concurrency(true),
        HessianSettings::default().with_concurrency(true).with_workers(1),
        HessianSettings::default().with_concurrency(true).with_workers(3),
    ]
}

#[test]
// Purpose
// -------
// Run the three analytic polynomials through every configuration.
//
// Given
// -----
// - `x0²` at random x0, `x0² − x1²` and `x0³ − 3·x0·x1²` at random points.
//
// Expect
// ------
// - [[2]] and [[2, 0], [0, −2]] within 1e-6.
// - [[6a, −6b], [−6b, −6a]] within 1e-4.
fn analytic_polynomials_on_all_configurations() {
    // Arrange
    let mut rng = StdRng::seed_from_u64(7);
    let square = |x: &Point| -> EvalResult { Ok(x[0] * x[0]) };
    let saddle = |x: &Point| -> EvalResult { Ok(x[0] * x[0] - x[1] * x[1]) };
    let monkey = |x: &Point| -> EvalResult { Ok(x[0].powi(3) - 3.0 * x[0] * x[1] * x[1]) };

    for settings in configurations() {
        for _ in 0..5 {
            let x1 = array![rng.gen_range(-2.0..2.0)];
            let x2 = array![rng.gen_range(-2.0..2.0), rng.gen_range(-2.0..2.0)];
            let (a, b) = (rng.gen_range(-3.0..3.0), rng.gen_range(1.0..3.0));
            let x3 = array![a, b];

            // Act
            let h1 = hessian(&square, &x1, Some(&settings)).expect("x0² should succeed");
            let h2 = hessian(&saddle, &x2, Some(&settings)).expect("saddle should succeed");
            let h3 = hessian(&monkey, &x3, Some(&settings)).expect("monkey should succeed");

            // Assert
            assert_matches(&h1, &array![[2.0]], 1e-6);
            assert_matches(&h2, &array![[2.0, 0.0], [0.0, -2.0]], 1e-6);
            assert_matches(&h3, &array![[6.0 * a, -6.0 * b], [-6.0 * b, -6.0 * a]], 1e-4);
        }
    }
}

#[test]
// Purpose
// -------
// Count objective calls on the concurrent path from many threads.
//
// Given
// -----
// - n = 5, 4 workers, unknown origin; then the same with a known origin.
//
// Expect
// ------
// - 1 + n + (n + n·(n−1)/2) = 21 calls without an origin.
// - 20 calls with a known origin.
// - Both results are identical.
fn concurrent_path_evaluates_each_stencil_point_once() {
    // Arrange
    let calls = AtomicUsize::new(0);
    let f = |x: &Point| -> EvalResult {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(x.iter().enumerate().map(|(k, v)| (k as f64 + 1.0) * v * v).sum::<f64>()
            + x[0] * x[4])
    };
    let x = array![0.3, -0.1, 1.2, 0.7, -0.4];
    let pooled = HessianSettings::default().with_concurrency(true).with_workers(4);

    // Act
    let h = hessian(&f, &x, Some(&pooled)).expect("pooled run should succeed");
    let first_calls = calls.swap(0, Ordering::SeqCst);
    let origin = f(&x).expect("origin should evaluate");
    calls.store(0, Ordering::SeqCst);
    let h_known = hessian(&f, &x, Some(&pooled.with_origin(origin))).expect("known origin");

    // Assert
    assert_eq!(first_calls, 21);
    assert_eq!(calls.load(Ordering::SeqCst), 20);
    assert_eq!(h, h_known);
    assert_relative_eq!(h.at(0, 4), 1.0, epsilon = 1e-5);
    assert_relative_eq!(h.at(2, 2), 6.0, epsilon = 1e-5);
}

#[test]
// Purpose
// -------
// Write the same Hessian into every sink type and compare.
//
// Given
// -----
// - A 3-D quadratic with cross terms, evaluated serially and concurrently.
//
// Expect
// ------
// - `Array2` and `DMatrix` sinks are symmetric and equal to the packed
//   `SymMatrix` cell for cell.
fn every_sink_receives_the_same_entries() {
    // Arrange
    let f = |x: &Point| -> EvalResult {
        Ok(2.0 * x[0] * x[0] + x[1] * x[1] + 0.5 * x[2] * x[2] + x[0] * x[1] - x[1] * x[2])
    };
    let x = array![1.0, -1.0, 0.5];

    for settings in configurations() {
        let mut dense = Array2::<f64>::zeros((3, 3));
        let mut dmat = DMatrix::<f64>::zeros(3, 3);

        // Act
        let packed = hessian(&f, &x, Some(&settings)).expect("packed should succeed");
        hessian_into(&mut dense, &f, &x, Some(&settings)).expect("Array2 should succeed");
        hessian_into(&mut dmat, &f, &x, Some(&settings)).expect("DMatrix should succeed");

        // Assert
        assert_eq!(dense, packed.to_array2());
        assert_eq!(dmat, packed.to_dmatrix());
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(dense[[i, j]], dense[[j, i]]);
            }
        }
        assert_relative_eq!(dense[[0, 1]], 1.0, epsilon = 1e-5);
        assert_relative_eq!(dense[[1, 2]], -1.0, epsilon = 1e-5);
    }
}

#[test]
// Purpose
// -------
// Reject misconfigured runs before touching the objective.
//
// Expect
// ------
// - Wrong sink shape, negative step and zero workers fail with the
//   matching variant and zero objective calls.
fn misconfiguration_is_reported_without_evaluation() {
    // Arrange
    let calls = AtomicUsize::new(0);
    let f = |x: &Point| -> EvalResult {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(x.sum())
    };
    let x = array![1.0, 2.0];
    let mut wrong = DMatrix::<f64>::zeros(3, 3);

    // Act
    let shape = hessian_into(&mut wrong, &f, &x, None);
    let step = hessian(&f, &x, Some(&HessianSettings::default().with_step(-1e-3)));
    let workers = hessian(
        &f,
        &x,
        Some(&HessianSettings { concurrent: true, workers: Some(0), ..Default::default() }),
    );

    // Assert
    assert_eq!(shape, Err(HessError::DimensionMismatch { expected: 2, found: (3, 3) }));
    assert!(matches!(step, Err(HessError::InvalidStep { .. })));
    assert!(matches!(workers, Err(HessError::InvalidWorkerCount { .. })));
    assert!(HessianSettings::new(Some(f64::INFINITY), None, false, None).is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
// Purpose
// -------
// A zero step falls back to the default and matches an explicit default.
fn zero_step_uses_default_step() {
    let f = |x: &Point| -> EvalResult { Ok(x[0].sin() * x[1].exp()) };
    let x = array![0.4, -0.2];

    let zero = hessian(&f, &x, Some(&HessianSettings::default().with_step(0.0))).unwrap();
    let explicit = hessian(&f, &x, Some(&HessianSettings::default().with_step(DEFAULT_STEP)));

    assert_eq!(zero, explicit.unwrap());
}

#[test]
// Purpose
// -------
// The engine reports non-finite entries as-is; `validate_hessian` is the
// opt-in check.
//
// Given
// -----
// - An objective returning +∞ once x1 moves above its starting value.
//
// Expect
// ------
// - `hessian` succeeds; `validate_hessian` returns `NonFiniteHessian` for
//   an entry in row or column 1.
fn poisoned_objective_is_caught_by_validation() {
    // Arrange
    let f = |x: &Point| -> EvalResult {
        if x[1] > 1.0 { Ok(f64::INFINITY) } else { Ok(x[0] * x[0] + x[1]) }
    };
    let x = array![0.5, 1.0];

    // Act
    let h = hessian(&f, &x, None).expect("engine does not inspect values");
    let verdict = validate_hessian(&h);

    // Assert
    match verdict {
        Err(HessError::NonFiniteHessian { row, col, value }) => {
            assert!(row == 1 || col == 1);
            assert!(!value.is_finite());
        }
        other => panic!("Expected NonFiniteHessian, got {other:?}"),
    }
    assert_relative_eq!(h.at(0, 0), 2.0, epsilon = 1e-6);
}

/// Convex quadratic `½·xᵀAx − bᵀx` with an analytic gradient.
struct Quadratic {
    a: Array2<f64>,
    b: Array1<f64>,
}

impl CostFunction for Quadratic {
    type Param = Point;
    type Output = f64;

    fn cost(&self, x: &Point) -> Result<f64, Error> {
        Ok(0.5 * x.dot(&self.a.dot(x)) - self.b.dot(x))
    }
}

impl Gradient for Quadratic {
    type Param = Point;
    type Gradient = Array1<f64>;

    fn gradient(&self, x: &Point) -> Result<Array1<f64>, Error> {
        Ok(self.a.dot(x) - &self.b)
    }
}

#[test]
// Purpose
// -------
// Drive a Newton iteration with the adapter's Hessian.
//
// Given
// -----
// - A 3-D convex quadratic with minimizer `A⁻¹b = (1, −1, 2)`.
// - Start at the origin; solve `H·d = −g` with nalgebra's LU.
//
// Expect
// ------
// - One step lands on the minimizer within 1e-4; a second step barely
//   moves.
fn adapter_hessian_drives_newton_to_minimizer() {
    // Arrange
    let a = array![[4.0, 1.0, 0.0], [1.0, 3.0, 0.5], [0.0, 0.5, 2.0]];
    let minimizer = array![1.0, -1.0, 2.0];
    let problem = Quadratic { b: a.dot(&minimizer), a };
    let adapter = FdHessian::with_settings(
        &problem,
        HessianSettings::default().with_concurrency(true).with_workers(2),
    );
    let mut x: Point = Array1::zeros(3);

    for _ in 0..2 {
        // Act
        let g = adapter.gradient(&x).expect("gradient should succeed");
        let h = adapter.hessian(&x).expect("hessian should succeed");
        let h = DMatrix::from_fn(3, 3, |i, j| h[[i, j]]);
        let rhs = DVector::from_iterator(3, g.iter().map(|v| -v));
        let d = h.lu().solve(&rhs).expect("Hessian should be invertible");
        x = &x + &Array1::from_iter(d.iter().copied());
    }

    // Assert
    for k in 0..3 {
        assert_relative_eq!(x[k], minimizer[k], epsilon = 1e-4);
    }
    assert_relative_eq!(adapter.cost(&x).unwrap(), problem.cost(&minimizer).unwrap(), epsilon = 1e-8);
}
