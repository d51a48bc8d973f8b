//! Orthogonal reduction of a general matrix to upper Hessenberg form.

use super::{expand_reflectors_in_place, householder, workspace_guard, ColMajorMut};
use crate::traits::{MatrixMut, MatrixRef};

/// Reduce the column-major `a` to upper Hessenberg form `Q^T A Q = H`.
///
/// On exit the upper triangle and first subdiagonal of `a` hold `H`; the
/// entries below the first subdiagonal hold the reflector vectors, with
/// scalars in `tau` (`Q = H(0) H(1) ... H(n-2)`, `tau[n-2] == 0`).
///
/// Workspace: `2n` (row products and a copy of the reflector).
pub(crate) fn gehrd(
    n: usize,
    a: &mut [f64],
    lda: usize,
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
    if tau.len() < nm1 {
        return -4;
    }
    if let Some(status) = workspace_guard(work, lwork, (2 * n).max(1), 6) {
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
        tau[i] = taui;

        if taui != 0.0 {
            let len = n - i - 1;
            v[0] = 1.0;
            v[1..len].copy_from_slice(m.col_as_slice(i, i + 2));
            let v = &v[..len];

            // Right: A[.., i+1..] <- A[.., i+1..] (I - tau v v^T).
            y.fill(0.0);
            for (k, &vk) in v.iter().enumerate() {
                for (yr, &ar) in y.iter_mut().zip(m.col_as_slice(i + 1 + k, 0)) {
                    *yr += ar * vk;
                }
            }
            for (k, &vk) in v.iter().enumerate() {
                let s = taui * vk;
                for (ar, &yr) in m.col_as_mut_slice(i + 1 + k, 0).iter_mut().zip(y.iter()) {
                    *ar -= s * yr;
                }
            }

            // Left: A[i+1.., i+1..] <- (I - tau v v^T) A[i+1.., i+1..].
            for j in (i + 1)..n {
                let col = m.col_as_mut_slice(j, i + 1);
                let mut dot = 0.0;
                for (ar, vk) in col.iter().zip(v) {
                    dot += ar * vk;
                }
                let s = taui * dot;
                for (ar, vk) in col.iter_mut().zip(v) {
                    *ar -= s * vk;
                }
            }
        }

        *m.get_mut(i + 1, i) = beta;
    }
    0
}

/// Overwrite `a` (as left by [`gehrd`]) with the explicit orthogonal `Q`.
///
/// Workspace: `n^2 + n`.
pub(crate) fn orghr(
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
