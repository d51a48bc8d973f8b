//! Symmetric tridiagonal reduction and the implicit-shift tridiagonal QR
//! iteration.
//!
//! Argument positions reported by negative status codes count the
//! parameters of the Rust function, starting at 1.

#[cfg(not(feature = "std"))]
use num_traits::Float;

use super::{expand_reflectors_in_place, householder, workspace_guard, ColMajorMut};
use crate::traits::{MatrixMut, MatrixRef};

/// Reduce a symmetric matrix to tridiagonal form `Q^T A Q = T`.
///
/// Only the lower triangle of the column-major `a` is referenced. On exit
/// `d` holds the diagonal of `T` and `e` its subdiagonal; the first
/// subdiagonal of `a` holds `e` and the entries below it hold the
/// reflector vectors, with scalars in `tau`, so that
/// `Q = H(0) H(1) ... H(n-2)`.
///
/// Workspace: `2n` (matrix-vector product and a copy of the reflector).
#[allow(clippy::too_many_arguments)]
pub(crate) fn sytrd(
    n: usize,
    a: &mut [f64],
    lda: usize,
    d: &mut [f64],
    e: &mut [f64],
    tau: &mut [f64],
    work: &mut [f64],
    lwork: isize,
) -> i32 {
    let nm1 = n.saturating_sub(1);
    if lda < n.max(1) {
        return -3;
    }
    if a.len() < lda * n {
        return -2;
    }
    if d.len() < n {
        return -4;
    }
    if e.len() < nm1 {
        return -5;
    }
    if tau.len() < nm1 {
        return -6;
    }
    if let Some(status) = workspace_guard(work, lwork, (2 * n).max(1), 8) {
        return status;
    }
    if n == 0 {
        return 0;
    }

    let mut m = ColMajorMut::new(a, n, n, lda);
    let (y, rest) = work.split_at_mut(n);
    let v = &mut rest[..n];

    for i in 0..nm1 {
        let alpha = *m.get(i + 1, i);
        let (beta, taui) = householder(alpha, m.col_as_mut_slice(i, i + 2));
        e[i] = beta;
        tau[i] = taui;

        if taui != 0.0 {
            // Trailing block A22 = a[i+1.., i+1..], local index 0 == row i+1.
            let len = n - i - 1;
            v[0] = 1.0;
            v[1..len].copy_from_slice(m.col_as_slice(i, i + 2));
            let v = &v[..len];
            let y = &mut y[..len];

            // y = tau * A22 * v, reading the lower triangle only.
            y.fill(0.0);
            for c in 0..len {
                let col = m.col_as_slice(i + 1 + c, i + 1 + c);
                let vc = v[c];
                let mut acc = col[0] * vc;
                for (r, &arc) in col.iter().enumerate().skip(1) {
                    y[c + r] += arc * vc;
                    acc += arc * v[c + r];
                }
                y[c] += acc;
            }

            // y -= (tau/2) (y^T v) v
            let mut dot = 0.0;
            for (yk, vk) in y.iter_mut().zip(v) {
                *yk *= taui;
                dot += *yk * vk;
            }
            let alpha2 = -0.5 * taui * dot;
            for (yk, vk) in y.iter_mut().zip(v) {
                *yk += alpha2 * vk;
            }

            // A22 -= v y^T + y v^T
            for c in 0..len {
                let (vc, yc) = (v[c], y[c]);
                let col = m.col_as_mut_slice(i + 1 + c, i + 1 + c);
                for (r, arc) in col.iter_mut().enumerate() {
                    *arc -= v[c + r] * yc + y[c + r] * vc;
                }
            }
        }

        *m.get_mut(i + 1, i) = beta;
        d[i] = *m.get(i, i);
    }
    d[n - 1] = *m.get(n - 1, n - 1);
    0
}

/// Overwrite `a` (as left by [`sytrd`]) with the explicit orthogonal `Q`.
///
/// Workspace: `n^2 + n`.
pub(crate) fn orgtr(
    n: usize,
    a: &mut [f64],
    lda: usize,
    tau: &[f64],
    work: &mut [f64],
    lwork: isize,
) -> i32 {
    if lda < n.max(1) {
        return -3;
    }
    if a.len() < lda * n {
        return -2;
    }
    if tau.len() < n.saturating_sub(1) {
        return -4;
    }
    if let Some(status) = workspace_guard(work, lwork, (n * n + n).max(1), 6) {
        return status;
    }
    expand_reflectors_in_place(n, a, lda, tau, work);
    0
}

/// Eigenvalues and eigenvectors of the symmetric tridiagonal matrix with
/// diagonal `d` and subdiagonal `e`, by implicit Wilkinson-shift QR.
///
/// `z` must hold the matrix that reduced the original problem to
/// tridiagonal form (or the identity); the rotations are accumulated into
/// it, so on exit its columns are eigenvectors of the original matrix.
/// Eigenvalues are returned in `d` in ascending order with the columns of
/// `z` permuted to match. `e` is destroyed.
///
/// At most `max_sweeps_per_eigenvalue * n` sweeps (saturating) are
/// performed. A positive status is the number of subdiagonal entries that did not
/// converge to zero.
///
/// Workspace: `2n - 2` (rotation cosines and sines of one sweep).
#[allow(clippy::too_many_arguments)]
pub(crate) fn steqr(
    n: usize,
    d: &mut [f64],
    e: &mut [f64],
    z: &mut [f64],
    ldz: usize,
    work: &mut [f64],
    lwork: isize,
    max_sweeps_per_eigenvalue: usize,
) -> i32 {
    let nm1 = n.saturating_sub(1);
    if d.len() < n {
        return -2;
    }
    if e.len() < nm1 {
        return -3;
    }
    if ldz < n.max(1) {
        return -5;
    }
    if z.len() < ldz * n {
        return -4;
    }
    if max_sweeps_per_eigenvalue == 0 {
        return -8;
    }
    if let Some(status) = workspace_guard(work, lwork, (2 * nm1).max(1), 7) {
        return status;
    }
    if n <= 1 {
        return 0;
    }

    let mut zm = ColMajorMut::new(z, n, n, ldz);
    let (cs, rest) = work.split_at_mut(nm1);
    let sn = &mut rest[..nm1];

    let eps = f64::EPSILON;
    let safmin = f64::MIN_POSITIVE;
    let max_iter = max_sweeps_per_eigenvalue.saturating_mul(n);
    let mut iter = 0usize;
    let mut hi = n - 1;

    while hi > 0 {
        let mut lo = hi;
        while lo > 0 {
            let threshold = (eps * (d[lo - 1].abs() + d[lo].abs())).max(safmin);
            if e[lo - 1].abs() <= threshold {
                e[lo - 1] = 0.0;
                break;
            }
            lo -= 1;
        }

        if lo == hi {
            log::trace!(target: "eigenspan::steqr", "eigenvalue {} converged after {} sweeps", hi, iter);
            hi -= 1;
            continue;
        }

        iter += 1;
        if iter > max_iter {
            return e[..nm1].iter().filter(|&&v| v != 0.0).count() as i32;
        }

        // Wilkinson shift from the trailing 2x2 of the active block.
        let dd = 0.5 * (d[hi - 1] - d[hi]);
        let ee = e[hi - 1];
        let r = dd.hypot(ee);
        let shift = d[hi] - ee * ee / (dd + if dd >= 0.0 { r } else { -r });

        let mut x = d[lo] - shift;
        let mut w = e[lo];

        for k in lo..hi {
            // G = [[c, s], [-s, c]] with G [x; w] = [r; 0].
            let (c, s) = givens(x, w);
            cs[k] = c;
            sn[k] = s;

            if k > lo {
                e[k - 1] = c * x + s * w;
            }

            // T <- G T G^T on rows/columns k, k+1.
            let (dk, dk1, ek) = (d[k], d[k + 1], e[k]);
            d[k] = c * c * dk + 2.0 * c * s * ek + s * s * dk1;
            d[k + 1] = s * s * dk - 2.0 * c * s * ek + c * c * dk1;
            e[k] = c * s * (dk1 - dk) + (c * c - s * s) * ek;

            if k + 1 < hi {
                // Bulge at (k, k+2).
                let e_next = e[k + 1];
                x = e[k];
                w = s * e_next;
                e[k + 1] = c * e_next;
            }
        }

        // Z <- Z G^T for every rotation of the sweep, in order.
        for k in lo..hi {
            zm.rotate_columns(k, k + 1, 0..n, cs[k], sn[k]);
        }
    }

    // Selection sort: ascending eigenvalues, columns permuted alongside.
    for i in 0..n {
        let mut min_idx = i;
        for j in (i + 1)..n {
            if d[j] < d[min_idx] {
                min_idx = j;
            }
        }
        if min_idx != i {
            d.swap(i, min_idx);
            zm.swap_columns(i, min_idx);
        }
    }
    0
}

/// Givens rotation: `(c, s)` such that `[c, s; -s, c] * [a; b] = [r; 0]`.
#[inline]
pub(crate) fn givens(a: f64, b: f64) -> (f64, f64) {
    if b == 0.0 {
        (1.0, 0.0)
    } else if b.abs() > a.abs() {
        let t = a / b;
        let s = 1.0 / (1.0 + t * t).sqrt();
        (s * t, s)
    } else {
        let t = b / a;
        let c = 1.0 / (1.0 + t * t).sqrt();
        (c, c * t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernels::invoke_with_auto_workspace;
    use alloc::vec;
    use alloc::vec::Vec;

    const TOL: f64 = 1e-14;

    fn assert_near(a: f64, b: f64, tol: f64, msg: &str) {
        assert!(
            (a - b).abs() < tol,
            "{}: {} vs {} (diff {})",
            msg,
            a,
            b,
            (a - b).abs()
        );
    }

    /// Column-major buffer from row-major literal rows.
    fn col_major(rows: &[&[f64]]) -> Vec<f64> {
        let n = rows.len();
        let mut out = vec![0.0; n * n];
        for (i, row) in rows.iter().enumerate() {
            for (j, &v) in row.iter().enumerate() {
                out[j * n + i] = v;
            }
        }
        out
    }

    fn at(a: &[f64], n: usize, i: usize, j: usize) -> f64 {
        a[j * n + i]
    }

    #[test]
    fn sytrd_orgtr_reconstruct() {
        let src = col_major(&[
            &[4.0, 1.0, -2.0, 2.0],
            &[1.0, 2.0, 0.0, 1.0],
            &[-2.0, 0.0, 3.0, -2.0],
            &[2.0, 1.0, -2.0, -1.0],
        ]);
        let n = 4;
        let mut a = src.clone();
        let mut d = vec![0.0; n];
        let mut e = vec![0.0; n - 1];
        let mut tau = vec![0.0; n - 1];
        invoke_with_auto_workspace("sytrd", |w, lw| {
            sytrd(n, &mut a, n, &mut d, &mut e, &mut tau, w, lw)
        })
        .unwrap();
        invoke_with_auto_workspace("orgtr", |w, lw| orgtr(n, &mut a, n, &tau, w, lw)).unwrap();

        // Q T Q^T == A
        for i in 0..n {
            for j in 0..n {
                let mut s = 0.0;
                for k in 0..n {
                    let mut tq = d[k] * at(&a, n, j, k);
                    if k > 0 {
                        tq += e[k - 1] * at(&a, n, j, k - 1);
                    }
                    if k + 1 < n {
                        tq += e[k] * at(&a, n, j, k + 1);
                    }
                    s += at(&a, n, i, k) * tq;
                }
                assert_near(s, at(&src, n, i, j), 1e-13, "QTQ^T");
            }
        }
    }

    #[test]
    fn sytrd_rejects_short_leading_dimension() {
        let mut a = [0.0; 4];
        let (mut d, mut e, mut tau) = ([0.0; 2], [0.0; 1], [0.0; 1]);
        let mut work = [0.0; 4];
        assert_eq!(sytrd(2, &mut a, 1, &mut d, &mut e, &mut tau, &mut work, 4), -3);
        assert_eq!(sytrd(2, &mut a, 2, &mut d, &mut e, &mut tau, &mut work, 3), -8);
    }

    #[test]
    fn steqr_two_by_two() {
        // [[2, 1], [1, 2]] -> eigenvalues 1, 3
        let mut d = [2.0, 2.0];
        let mut e = [1.0];
        let mut z = [1.0, 0.0, 0.0, 1.0];
        let mut work = [0.0; 2];
        assert_eq!(steqr(2, &mut d, &mut e, &mut z, 2, &mut work, 2, 30), 0);
        assert_near(d[0], 1.0, TOL, "lambda0");
        assert_near(d[1], 3.0, TOL, "lambda1");
        // eigenvector of 1 is +-(1, -1)/sqrt(2)
        assert_near(z[0].abs(), core::f64::consts::FRAC_1_SQRT_2, TOL, "z00");
        assert_near(z[0] + z[1], 0.0, TOL, "z0 direction");
        assert_near(z[2] - z[3], 0.0, TOL, "z1 direction");
    }

    #[test]
    fn steqr_already_diagonal_sorts() {
        let mut d = [3.0, -1.0, 2.0];
        let mut e = [0.0, 0.0];
        let mut z = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];
        let mut work = [0.0; 4];
        assert_eq!(steqr(3, &mut d, &mut e, &mut z, 3, &mut work, 4, 30), 0);
        assert_eq!(d, [-1.0, 2.0, 3.0]);
        // column 0 is old column 1
        assert_eq!(&z[0..3], &[0.0, 1.0, 0.0]);
        assert_eq!(&z[3..6], &[0.0, 0.0, 1.0]);
        assert_eq!(&z[6..9], &[1.0, 0.0, 0.0]);
    }

    #[test]
    fn steqr_trivial_sizes() {
        let mut work = [0.0; 1];
        assert_eq!(steqr(0, &mut [], &mut [], &mut [], 1, &mut work, 1, 30), 0);
        let mut d = [5.0];
        let mut z = [1.0];
        assert_eq!(steqr(1, &mut d, &mut [], &mut z, 1, &mut work, 1, 30), 0);
        assert_eq!(d, [5.0]);
    }

    #[test]
    fn givens_zeroes_second_component() {
        for &(a, b) in &[(3.0, 4.0), (-1.0, 1e-3), (1e-3, -2.0), (0.0, 1.0)] {
            let (c, s) = givens(a, b);
            assert_near(c * c + s * s, 1.0, TOL, "unit");
            assert_near(-s * a + c * b, 0.0, TOL, "zeroed");
        }
    }
}
