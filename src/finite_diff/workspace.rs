//! Scratch workspace — private perturbation buffer for one worker.
//!
//! Purpose
//! -------
//! Let a worker evaluate the objective at `x + step·e_i` or
//! `x + step·(e_i + e_j)` without touching the caller's point and without
//! allocating per evaluation.
//!
//! Key behaviors
//! -------------
//! - Borrow the caller's point read-only and own a single buffer of the same
//!   length.
//! - Every perturbation starts by resetting the buffer from the point, so no
//!   shift ever leaks into the next evaluation.
//!
//! Invariants & assumptions
//! ------------------------
//! - `buf.len() == point.len()` for the lifetime of the workspace.
//! - A `ScratchBuffer` is owned by exactly one worker; it is `Send` but is
//!   never shared.
//! - The returned `&Point` is only valid until the next call; the borrow
//!   checker enforces this.
use crate::finite_diff::types::Point;

/// ScratchBuffer — per-worker mutable copy of the evaluation point.
///
/// Fields
/// ------
/// - `point`: `&'a Point`
///   Caller-owned evaluation point, never mutated.
/// - `buf`: `Point`
///   Owned copy that receives the perturbations.
#[derive(Debug, Clone)]
pub struct ScratchBuffer<'a> {
    point: &'a Point,
    buf: Point,
}

impl<'a> ScratchBuffer<'a> {
    /// Allocate a scratch buffer initialized to `point`.
    pub fn new(point: &'a Point) -> Self {
        ScratchBuffer { point, buf: point.clone() }
    }

    /// Unmodified point, `x`.
    pub fn origin(&mut self) -> &Point {
        self.reset();
        &self.buf
    }

    /// Point shifted along a single axis, `x + delta·e_i`.
    pub fn shifted(&mut self, i: usize, delta: f64) -> &Point {
        self.reset();
        self.buf[i] += delta;
        &self.buf
    }

    /// Point shifted along two distinct axes, `x + delta·(e_i + e_j)`.
    pub fn shifted_pair(&mut self, i: usize, j: usize, delta: f64) -> &Point {
        self.reset();
        self.buf[i] += delta;
        self.buf[j] += delta;
        &self.buf
    }

    fn reset(&mut self) {
        self.buf.assign(self.point);
    }
}
