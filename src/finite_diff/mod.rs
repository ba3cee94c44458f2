//! finite_diff — finite-difference Hessians with a serial and a pooled engine.
//!
//! Purpose
//! -------
//! Approximate the Hessian of a scalar objective at a point from function
//! values alone. The module decides which stencil points are needed,
//! evaluates the objective there (optionally on a worker pool), and combines
//! the values into second-derivative estimates written into a symmetric sink.
//!
//! Key behaviors
//! -------------
//! - [`hessian`] / [`hessian_into`] are the entry points; they validate the
//!   configuration, resolve step, origin and worker count, and dispatch.
//! - [`neighbors`] builds the `f(x + h·e_i)` table (phase A).
//! - [`stencil`] turns one extra evaluation per entry into a Hessian entry
//!   (phase B) using the central diagonal and forward mixed formulas.
//! - [`pool`] drains a phase's jobs on a dedicated `rayon` pool with a
//!   completion barrier.
//! - [`sink`] defines where entries go: the packed [`SymMatrix`], or dense
//!   `ndarray` / `nalgebra` matrices.
//!
//! Invariants & assumptions
//! ------------------------
//! - The objective is pure, deterministic and `Sync`.
//! - The caller's point is never mutated; perturbations happen on per-worker
//!   scratch buffers.
//! - The chosen execution path never changes the value of an entry.
//!
//! Conventions
//! -----------
//! - Objectives have the signature `Fn(&Point) -> Result<f64, argmin::core::Error>`;
//!   any error they return aborts the computation as
//!   `HessError::EvaluationFailure`.
//! - No adaptive step selection, gradients, or numerical repair are
//!   performed; `validation::validate_hessian` is available to callers
//!   who want a finiteness check.
//!
//! Testing notes
//! -------------
//! - Each submodule carries unit tests for its local concern; scheduling,
//!   analytic accuracy and path equivalence are tested in `hessian`.

pub mod errors;
pub mod hessian;
pub mod neighbors;
pub mod pool;
pub mod settings;
pub mod sink;
pub mod stencil;
pub mod types;
pub mod validation;
pub mod workspace;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::errors::{HessError, HessResult};
pub use self::hessian::{hessian, hessian_into};
pub use self::settings::HessianSettings;
pub use self::sink::{SymMatrix, SymmetricSink};
pub use self::types::{DEFAULT_STEP, EvalResult, Point};
pub use self::validation::validate_hessian;

// ---- Optional convenience prelude for downstream crates ------------------

pub mod prelude {
    pub use super::errors::{HessError, HessResult};
    pub use super::hessian::{hessian, hessian_into};
    pub use super::settings::HessianSettings;
    pub use super::sink::{SymMatrix, SymmetricSink};
    pub use super::types::{DEFAULT_STEP, EvalResult, Point};
}
