//! optimization — glue between the Hessian engine and `argmin` solvers.
//!
//! Purpose
//! -------
//! Let second-order `argmin` solvers (Newton, trust region) run on problems
//! that only provide a cost and, optionally, an analytic gradient. The
//! missing Hessian is supplied by [`crate::finite_diff`].
//!
//! Key behaviors
//! -------------
//! - [`adapter::FdHessian`] wraps a borrowed problem, forwards
//!   `CostFunction` and `Gradient`, and implements `argmin::core::Hessian`
//!   with the finite-difference engine under caller-chosen
//!   [`HessianSettings`](crate::finite_diff::HessianSettings).
//!
//! Conventions
//! -----------
//! - Parameters are `ndarray::Array1<f64>` and Hessians are dense
//!   `ndarray::Array2<f64>`, the representation `argmin`'s ndarray backend
//!   expects.
//! - Engine failures travel through `argmin::core::Error` and can be
//!   recovered with `HessError::from`.
//! - This module does no logging of its own; the engine logs each run at
//!   `debug` level.
//!
//! Downstream usage
//! ----------------
//! - Build the adapter with `FdHessian::new(&problem)` and hand it to an
//!   `Executor` in place of `problem`.

pub mod adapter;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_fdhessian::optimization::prelude::*;
//
// to import the adapter in a single line.

pub mod prelude {
    pub use super::adapter::FdHessian;
}
