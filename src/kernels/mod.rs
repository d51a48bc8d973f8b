//! Pure-Rust LAPACK-compatible kernels.
//!
//! Every routine works in place on a column-major buffer with an explicit
//! leading dimension and returns a LAPACK-style status code:
//!
//! - `0`: success
//! - `-k`: the `k`-th argument had an illegal value
//! - `k > 0`: a numerical failure whose meaning is routine specific
//!
//! Routines that take a workspace follow the two-phase protocol: calling
//! with `lwork == -1` only stores the optimal workspace length in
//! `work[0]`. [`invoke_with_auto_workspace`] drives both phases.

pub(crate) mod hessenberg;
pub(crate) mod hqr;
pub(crate) mod trevc;
pub(crate) mod tridiag;

use alloc::vec;

#[cfg(not(feature = "std"))]
use num_traits::Float;

use crate::linalg::LapackError;
use crate::traits::{MatrixMut, MatrixRef};

/// `lwork` value requesting a workspace size query.
pub(crate) const WORKSPACE_QUERY: isize = -1;

/// Run a workspace-taking routine twice: size query, then execution with a
/// freshly allocated workspace of the reported length.
///
/// `call(work, lwork)` must forward both arguments to the routine.
pub(crate) fn invoke_with_auto_workspace<F>(routine: &'static str, mut call: F) -> Result<(), LapackError>
where
    F: FnMut(&mut [f64], isize) -> i32,
{
    let mut query = [0.0_f64];
    check_status(routine, call(&mut query, WORKSPACE_QUERY))?;

    let lwork = (query[0] as usize).max(1);
    log::debug!(target: "eigenspan::workspace", "{}: allocating {} workspace elements", routine, lwork);
    let mut work = vec![0.0_f64; lwork];
    check_status(routine, call(&mut work, lwork as isize))
}

/// Map a raw status code to a `Result`, logging failures.
pub(crate) fn check_status(routine: &'static str, status: i32) -> Result<(), LapackError> {
    if status == 0 {
        return Ok(());
    }
    let err = LapackError::from_status(routine, status);
    log::warn!(target: "eigenspan::kernels", "{}", err);
    Err(err)
}

/// Validate an `lwork` argument against a minimum length.
///
/// Returns `Some(status)` when the call must return immediately: either
/// the query was answered (status `0`) or `lwork` is illegal.
pub(crate) fn workspace_guard(
    work: &mut [f64],
    lwork: isize,
    required: usize,
    lwork_arg: i32,
) -> Option<i32> {
    if lwork == WORKSPACE_QUERY {
        if work.is_empty() {
            return Some(-(lwork_arg - 1));
        }
        work[0] = required as f64;
        return Some(0);
    }
    if lwork < required as isize || work.len() < required {
        return Some(-lwork_arg);
    }
    None
}

/// Column-major view over a mutable buffer with leading dimension `ld`.
pub(crate) struct ColMajorMut<'a> {
    data: &'a mut [f64],
    nrows: usize,
    ncols: usize,
    ld: usize,
}

impl<'a> ColMajorMut<'a> {
    #[inline]
    pub(crate) fn new(data: &'a mut [f64], nrows: usize, ncols: usize, ld: usize) -> Self {
        debug_assert!(ld >= nrows.max(1));
        debug_assert!(ncols == 0 || data.len() >= ld * (ncols - 1) + nrows);
        Self {
            data,
            nrows,
            ncols,
            ld,
        }
    }

    /// Overwrite with the identity matrix.
    pub(crate) fn set_identity(&mut self) {
        for j in 0..self.ncols {
            for i in 0..self.nrows {
                *self.get_mut(i, j) = if i == j { 1.0 } else { 0.0 };
            }
        }
    }
}

impl MatrixRef<f64> for ColMajorMut<'_> {
    #[inline]
    fn nrows(&self) -> usize {
        self.nrows
    }

    #[inline]
    fn ncols(&self) -> usize {
        self.ncols
    }

    #[inline]
    fn get(&self, row: usize, col: usize) -> &f64 {
        &self.data[col * self.ld + row]
    }
}

impl MatrixMut<f64> for ColMajorMut<'_> {
    #[inline]
    fn get_mut(&mut self, row: usize, col: usize) -> &mut f64 {
        &mut self.data[col * self.ld + row]
    }

    #[inline]
    fn col_as_slice(&self, col: usize, row_start: usize) -> &[f64] {
        let start = col * self.ld + row_start;
        let end = col * self.ld + self.nrows;
        &self.data[start..end]
    }

    #[inline]
    fn col_as_mut_slice(&mut self, col: usize, row_start: usize) -> &mut [f64] {
        let start = col * self.ld + row_start;
        let end = col * self.ld + self.nrows;
        &mut self.data[start..end]
    }
}

/// Element read helper for calling `Float` methods on matrix entries.
#[inline]
pub(crate) fn g(m: &impl MatrixRef<f64>, i: usize, j: usize) -> f64 {
    *m.get(i, j)
}

/// Generate an elementary reflector `H = I - tau v v^T` with `v[0] = 1`
/// such that `H [alpha; x] = [beta; 0]`.
///
/// On return `x` holds `v[1..]` and the result is `(beta, tau)`. When `x`
/// is already zero the reflector is the identity (`tau = 0`).
pub(crate) fn householder(alpha: f64, x: &mut [f64]) -> (f64, f64) {
    let mut scale = 0.0_f64;
    for &v in x.iter() {
        scale = scale.max(v.abs());
    }
    if scale == 0.0 {
        return (alpha, 0.0);
    }
    // Scaled norm to avoid overflow on large entries.
    let mut ssq = 0.0_f64;
    for &v in x.iter() {
        let r = v / scale;
        ssq += r * r;
    }
    let xnorm = scale * ssq.sqrt();

    let beta = -alpha.signum() * alpha.hypot(xnorm);
    let tau = (beta - alpha) / beta;
    let inv = 1.0 / (alpha - beta);
    for v in x.iter_mut() {
        *v *= inv;
    }
    (beta, tau)
}

/// Expand the reflectors stored below the first subdiagonal of the
/// column-major `n x n` matrix `a` into the explicit orthogonal matrix
/// `Q = H(0) H(1) ... H(n-2)`, overwriting `a`.
///
/// Reflector `i` has `v[i+1] = 1` and `v[i+2..n] = a[i+2..n, i]`; this is
/// the storage left behind by both `sytrd` (lower) and `gehrd`.
/// `work` needs at least `n * n + n` elements.
pub(crate) fn expand_reflectors_in_place(
    n: usize,
    a: &mut [f64],
    lda: usize,
    tau: &[f64],
    work: &mut [f64],
) {
    if n == 0 {
        return;
    }
    let (saved, scratch) = work.split_at_mut(n * n);
    for j in 0..n {
        saved[j * n..(j + 1) * n].copy_from_slice(&a[j * lda..j * lda + n]);
    }
    let src = ColMajorMut::new(saved, n, n, n);
    let mut q = ColMajorMut::new(a, n, n, lda);
    q.set_identity();

    // Backward accumulation: before step i, q is the identity outside
    // rows/columns i+1.., so H(i) only touches q[i+1.., i+1..].
    for i in (0..n - 1).rev() {
        let t = tau[i];
        if t == 0.0 {
            continue;
        }
        let v = src.col_as_slice(i, i + 2);
        for j in (i + 1)..n {
            let qj = q.col_as_slice(j, i + 1);
            let mut dot = qj[0];
            for (vk, qk) in v.iter().zip(&qj[1..]) {
                dot += vk * qk;
            }
            scratch[j] = t * dot;
        }
        for j in (i + 1)..n {
            let s = scratch[j];
            let qj = q.col_as_mut_slice(j, i + 1);
            qj[0] -= s;
            for (qk, vk) in qj[1..].iter_mut().zip(v) {
                *qk -= s * vk;
            }
        }
    }
}

impl ColMajorMut<'_> {
    /// Plane rotation of columns `j1 < j2` over `rows`:
    /// `x <- c x + s y`, `y <- c y - s x`.
    pub(crate) fn rotate_columns(
        &mut self,
        j1: usize,
        j2: usize,
        rows: core::ops::Range<usize>,
        c: f64,
        s: f64,
    ) {
        debug_assert!(j1 < j2);
        let (x, y) = self.column_pair(j1, j2);
        for (xi, yi) in x[rows.clone()].iter_mut().zip(y[rows].iter_mut()) {
            let (a, b) = (*xi, *yi);
            *xi = c * a + s * b;
            *yi = c * b - s * a;
        }
    }

    /// Plane rotation of rows `i1 < i2` over columns `cols`.
    pub(crate) fn rotate_rows(
        &mut self,
        i1: usize,
        i2: usize,
        cols: core::ops::Range<usize>,
        c: f64,
        s: f64,
    ) {
        for j in cols {
            let a = *self.get(i1, j);
            let b = *self.get(i2, j);
            *self.get_mut(i1, j) = c * a + s * b;
            *self.get_mut(i2, j) = c * b - s * a;
        }
    }

    pub(crate) fn swap_columns(&mut self, j1: usize, j2: usize) {
        if j1 == j2 {
            return;
        }
        let (lo, hi) = if j1 < j2 { (j1, j2) } else { (j2, j1) };
        let (x, y) = self.column_pair(lo, hi);
        x.swap_with_slice(y);
    }

    /// Disjoint mutable views of two full columns, `j1 < j2`.
    fn column_pair(&mut self, j1: usize, j2: usize) -> (&mut [f64], &mut [f64]) {
        let (ld, nrows) = (self.ld, self.nrows);
        let (head, tail) = self.data.split_at_mut(j2 * ld);
        (&mut head[j1 * ld..j1 * ld + nrows], &mut tail[..nrows])
    }
}
