//! finite_diff::sink — symmetric result sinks for Hessian entries.
//!
//! Purpose
//! -------
//! Decouple the finite-difference engine from the storage of its output. The
//! engine only ever writes the upper triangle `(i, j)` with `i ≤ j` through
//! the [`SymmetricSink`] trait; implementations decide how the mirrored
//! `(j, i)` read is provided.
//!
//! Key behaviors
//! -------------
//! - [`SymMatrix`] stores the packed upper triangle and mirrors reads, so a
//!   single write per entry is sufficient.
//! - Dense `ndarray::Array2<f64>` and `nalgebra::DMatrix<f64>` sinks are
//!   supported by writing both halves on every `set_sym`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Callers of `set_sym` pass `i ≤ j` or `i ≥ j`; implementations must
//!   treat `(i, j)` and `(j, i)` as the same entry.
//! - `shape()` reports the sink's actual shape; the engine rejects any
//!   shape other than `(n, n)` before evaluating anything.
//!
//! Performance
//! -----------
//! - `SymMatrix` uses `n·(n + 1)/2` storage, row-major over the upper
//!   triangle.
use nalgebra::DMatrix;
use ndarray::Array2;

/// SymmetricSink — destination for upper-triangle Hessian writes.
pub trait SymmetricSink {
    /// Actual `(rows, cols)` of the sink.
    fn shape(&self) -> (usize, usize);

    /// Store `value` at `(i, j)`; reads at `(j, i)` must observe the same value.
    fn set_sym(&mut self, i: usize, j: usize, value: f64);
}

/// SymMatrix — owned symmetric `n × n` matrix with packed storage.
///
/// Fields
/// ------
/// - `n`: `usize`
///   Dimension of the matrix.
/// - `data`: `Vec<f64>`
///   Row-major upper triangle, length `n·(n + 1)/2`.
///
/// Invariants
/// ----------
/// - `at(i, j) == at(j, i)` for all `i, j < n`, by construction.
///
/// Examples
/// --------
/// ```rust
/// # use rust_fdhessian::finite_diff::SymMatrix;
/// let mut h = SymMatrix::zeros(3);
/// h.set_sym(0, 2, 1.5);
/// assert_eq!(h.at(2, 0), 1.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SymMatrix {
    n: usize,
    data: Vec<f64>,
}

impl SymMatrix {
    /// Allocate an `n × n` symmetric matrix filled with zeros.
    pub fn zeros(n: usize) -> Self {
        SymMatrix { n, data: vec![0.0; n * (n + 1) / 2] }
    }

    /// Dimension `n`.
    pub fn dim(&self) -> usize {
        self.n
    }

    /// Read entry `(i, j)`; `(j, i)` returns the same value.
    ///
    /// Panics
    /// ------
    /// - Panics if `i >= n` or `j >= n`.
    pub fn at(&self, i: usize, j: usize) -> f64 {
        self.data[self.offset(i, j)]
    }

    /// Write entry `(i, j)` and, implicitly, `(j, i)`.
    ///
    /// Panics
    /// ------
    /// - Panics if `i >= n` or `j >= n`.
    pub fn set_sym(&mut self, i: usize, j: usize, value: f64) {
        let idx = self.offset(i, j);
        self.data[idx] = value;
    }

    /// Overwrite every stored entry with `value`.
    pub fn fill(&mut self, value: f64) {
        self.data.fill(value);
    }

    /// Dense `ndarray` copy with both triangles populated.
    pub fn to_array2(&self) -> Array2<f64> {
        Array2::from_shape_fn((self.n, self.n), |(i, j)| self.at(i, j))
    }

    /// Dense `nalgebra` copy with both triangles populated.
    pub fn to_dmatrix(&self) -> DMatrix<f64> {
        DMatrix::from_fn(self.n, self.n, |i, j| self.at(i, j))
    }

    fn offset(&self, i: usize, j: usize) -> usize {
        let (r, c) = if i <= j { (i, j) } else { (j, i) };
        assert!(c < self.n, "index ({i}, {j}) out of bounds for {n}×{n}", n = self.n);
        // Rows 0..r hold n, n-1, ..., n-r+1 entries.
        r * self.n - r * r.saturating_sub(1) / 2 + (c - r)
    }
}

impl SymmetricSink for SymMatrix {
    fn shape(&self) -> (usize, usize) {
        (self.n, self.n)
    }

    fn set_sym(&mut self, i: usize, j: usize, value: f64) {
        SymMatrix::set_sym(self, i, j, value);
    }
}

impl SymmetricSink for Array2<f64> {
    fn shape(&self) -> (usize, usize) {
        self.dim()
    }

    fn set_sym(&mut self, i: usize, j: usize, value: f64) {
        self[[i, j]] = value;
        self[[j, i]] = value;
    }
}

impl SymmetricSink for DMatrix<f64> {
    fn shape(&self) -> (usize, usize) {
        (self.nrows(), self.ncols())
    }

    fn set_sym(&mut self, i: usize, j: usize, value: f64) {
        self[(i, j)] = value;
        self[(j, i)] = value;
    }
}
