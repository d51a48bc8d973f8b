//! Real Schur form of an upper Hessenberg matrix by Francis double-shift QR.

#[cfg(not(feature = "std"))]
use num_traits::Float;

use super::{g, workspace_guard, ColMajorMut};
use crate::traits::{MatrixMut, MatrixRef};

/// Reduce the column-major upper Hessenberg `h` to real Schur form
/// `T = Z^T H Z`, accumulating the transform into `z`.
///
/// `z` must be seeded by the caller (identity, or the Hessenberg reducer
/// to get Schur vectors of the original matrix). Entries of `h` below the
/// first subdiagonal are ignored and cleared.
///
/// On success `h` holds `T` in standard form: 1x1 blocks for real
/// eigenvalues, 2x2 blocks `[[a, b], [c, a]]` with `b c < 0` for complex
/// pairs, and every other subdiagonal entry exactly zero. `wr`/`wi` hold
/// the eigenvalues in diagonal order; a conjugate pair is stored with the
/// positive imaginary part first.
///
/// At most `max_sweeps_per_eigenvalue * n` sweeps (saturating) are
/// performed. A positive status `k` means the iteration stalled with the leading
/// `k x k` block unreduced; eigenvalues `k+1..=n` (1-based) converged.
///
/// Workspace: `n`.
#[allow(clippy::too_many_arguments)]
pub(crate) fn hseqr(
    n: usize,
    h: &mut [f64],
    ldh: usize,
    wr: &mut [f64],
    wi: &mut [f64],
    z: &mut [f64],
    ldz: usize,
    work: &mut [f64],
    lwork: isize,
    max_sweeps_per_eigenvalue: usize,
) -> i32 {
    if ldh < n.max(1) {
        return -3;
    }
    if h.len() < ldh * n {
        return -2;
    }
    if wr.len() < n {
        return -4;
    }
    if wi.len() < n {
        return -5;
    }
    if ldz < n.max(1) {
        return -7;
    }
    if z.len() < ldz * n {
        return -6;
    }
    if max_sweeps_per_eigenvalue == 0 {
        return -10;
    }
    if let Some(status) = workspace_guard(work, lwork, n.max(1), 9) {
        return status;
    }
    if n == 0 {
        return 0;
    }

    let mut hm = ColMajorMut::new(h, n, n, ldh);
    let mut zm = ColMajorMut::new(z, n, n, ldz);

    for j in 0..n {
        for i in (j + 2)..n {
            *hm.get_mut(i, j) = 0.0;
        }
    }

    let max_iter = max_sweeps_per_eigenvalue.saturating_mul(n);
    if let Err(active) = francis_qr(&mut hm, &mut zm, work, max_iter) {
        return active as i32;
    }
    standardize_blocks(&mut hm, &mut zm, wr, wi);
    0
}

/// Is `h[i, i-1]` negligible next to its diagonal neighbours?
fn negligible(h: &ColMajorMut<'_>, i: usize) -> bool {
    let n = h.nrows();
    let sub = g(h, i, i - 1).abs();
    let mut tst = g(h, i - 1, i - 1).abs() + g(h, i, i).abs();
    if tst == 0.0 {
        if i >= 2 {
            tst += g(h, i - 1, i - 2).abs();
        }
        if i + 1 < n {
            tst += g(h, i + 1, i).abs();
        }
    }
    let smlnum = f64::MIN_POSITIVE * (n as f64 / f64::EPSILON);
    sub <= (f64::EPSILON * tst).max(smlnum)
}

/// Double-shift sweeps until every diagonal block is at most 2x2.
///
/// `Err(p)` when the sweep budget runs out with `h[0..p, 0..p]` active.
fn francis_qr(
    h: &mut ColMajorMut<'_>,
    q: &mut ColMajorMut<'_>,
    work: &mut [f64],
    max_iter: usize,
) -> Result<(), usize> {
    let n = h.nrows();
    let mut total = 0usize;
    let mut its = 0usize;
    let mut p = n; // active submatrix is h[0..p, 0..p]

    while p > 2 {
        if negligible(h, p - 1) {
            *h.get_mut(p - 1, p - 2) = 0.0;
            log::trace!(target: "eigenspan::hseqr", "deflated 1x1 at {} after {} sweeps", p - 1, its);
            p -= 1;
            its = 0;
            continue;
        }
        if negligible(h, p - 2) {
            *h.get_mut(p - 2, p - 3) = 0.0;
            log::trace!(target: "eigenspan::hseqr", "deflated 2x2 at {} after {} sweeps", p - 2, its);
            p -= 2;
            its = 0;
            continue;
        }

        total += 1;
        if total > max_iter {
            return Err(p);
        }
        its += 1;

        // Start of the unreduced block ending at p-1.
        let mut lo = p - 1;
        while lo > 0 {
            if negligible(h, lo) {
                *h.get_mut(lo, lo - 1) = 0.0;
                break;
            }
            lo -= 1;
        }

        let (s, t) = if its % 10 == 0 {
            // Exceptional shift to break cycles.
            let w = g(h, p - 1, p - 2).abs() + g(h, p - 2, p - 3).abs();
            let h11 = 0.75 * w + g(h, p - 1, p - 1);
            (2.0 * h11, h11 * h11 + 0.4375 * w * w)
        } else {
            // Eigenvalues of the trailing 2x2 block.
            let a11 = g(h, p - 2, p - 2);
            let a12 = g(h, p - 2, p - 1);
            let a21 = g(h, p - 1, p - 2);
            let a22 = g(h, p - 1, p - 1);
            (a11 + a22, a11 * a22 - a12 * a21)
        };

        // First column of (H^2 - s H + t I).
        let h00 = g(h, lo, lo);
        let h10 = g(h, lo + 1, lo);
        let h01 = g(h, lo, lo + 1);
        let h11 = g(h, lo + 1, lo + 1);
        let mut x = h00 * h00 + h01 * h10 - s * h00 + t;
        let mut y = h10 * (h00 + h11 - s);
        let mut zz = h10 * g(h, lo + 2, lo + 1);

        // Chase the bulge down the diagonal.
        for k in lo..(p - 1) {
            let use3 = k + 2 < p;
            let (v1, v2, tau) = if use3 {
                householder3(x, y, zz)
            } else {
                let (v1, tau) = householder2(x, y);
                (v1, 0.0, tau)
            };

            if tau != 0.0 {
                // Left, across the full width so T stays a Schur form of A.
                let col_start = if k > lo { k - 1 } else { k };
                for j in col_start..n {
                    let mut dot = g(h, k, j) + v1 * g(h, k + 1, j);
                    if use3 {
                        dot += v2 * g(h, k + 2, j);
                    }
                    dot *= tau;
                    *h.get_mut(k, j) -= dot;
                    *h.get_mut(k + 1, j) -= dot * v1;
                    if use3 {
                        *h.get_mut(k + 2, j) -= dot * v2;
                    }
                }

                // Right.
                let row_end = if use3 { (k + 4).min(p) } else { p };
                apply_right(h, k, row_end, v1, use3.then_some(v2), tau, work);
                apply_right(q, k, n, v1, use3.then_some(v2), tau, work);
            }

            if k > lo {
                *h.get_mut(k + 1, k - 1) = 0.0;
                if use3 {
                    *h.get_mut(k + 2, k - 1) = 0.0;
                }
            }

            // Next bulge, from the fill-in below column k.
            if k + 3 < p {
                x = g(h, k + 1, k);
                y = g(h, k + 2, k);
                zz = g(h, k + 3, k);
            } else if k + 2 < p {
                x = g(h, k + 1, k);
                y = g(h, k + 2, k);
                zz = 0.0;
            }
        }
    }
    Ok(())
}

/// `m[0..rows, k..k+len] <- m[0..rows, k..k+len] (I - tau v v^T)` with
/// `v = [1, v1, v2?]`, column-oriented through `work`.
fn apply_right(
    m: &mut ColMajorMut<'_>,
    k: usize,
    rows: usize,
    v1: f64,
    v2: Option<f64>,
    tau: f64,
    work: &mut [f64],
) {
    let w = &mut work[..rows];
    w.copy_from_slice(&m.col_as_slice(k, 0)[..rows]);
    for (wr, &a) in w.iter_mut().zip(m.col_as_slice(k + 1, 0)) {
        *wr += v1 * a;
    }
    if let Some(v2) = v2 {
        for (wr, &a) in w.iter_mut().zip(m.col_as_slice(k + 2, 0)) {
            *wr += v2 * a;
        }
    }

    for (a, &wr) in m.col_as_mut_slice(k, 0).iter_mut().zip(w.iter()) {
        *a -= tau * wr;
    }
    let s1 = tau * v1;
    for (a, &wr) in m.col_as_mut_slice(k + 1, 0).iter_mut().zip(w.iter()) {
        *a -= s1 * wr;
    }
    if let Some(v2) = v2 {
        let s2 = tau * v2;
        for (a, &wr) in m.col_as_mut_slice(k + 2, 0).iter_mut().zip(w.iter()) {
            *a -= s2 * wr;
        }
    }
}

/// 3-element Householder: `(v1, v2, tau)` with implicit `v0 = 1`.
#[inline]
fn householder3(x: f64, y: f64, z: f64) -> (f64, f64, f64) {
    let norm = (x * x + y * y + z * z).sqrt();
    if norm == 0.0 {
        return (0.0, 0.0, 0.0);
    }
    let u0 = x + norm.copysign(x);
    let v1 = y / u0;
    let v2 = z / u0;
    (v1, v2, 2.0 / (1.0 + v1 * v1 + v2 * v2))
}

/// 2-element Householder: `(v1, tau)` with implicit `v0 = 1`.
#[inline]
fn householder2(x: f64, y: f64) -> (f64, f64) {
    let norm = x.hypot(y);
    if norm == 0.0 {
        return (0.0, 0.0);
    }
    let u0 = x + norm.copysign(x);
    let v1 = y / u0;
    (v1, 2.0 / (1.0 + v1 * v1))
}

/// Put every 2x2 diagonal block in standard form, splitting those with
/// real eigenvalues, and read off the eigenvalues.
fn standardize_blocks(
    h: &mut ColMajorMut<'_>,
    z: &mut ColMajorMut<'_>,
    wr: &mut [f64],
    wi: &mut [f64],
) {
    let n = h.nrows();
    let mut i = 0;
    while i < n {
        if i + 1 == n || g(h, i + 1, i) == 0.0 {
            wr[i] = g(h, i, i);
            wi[i] = 0.0;
            i += 1;
            continue;
        }

        let ([a, b, c, d], cs, sn) =
            lanv2(g(h, i, i), g(h, i, i + 1), g(h, i + 1, i), g(h, i + 1, i + 1));
        *h.get_mut(i, i) = a;
        *h.get_mut(i, i + 1) = b;
        *h.get_mut(i + 1, i) = c;
        *h.get_mut(i + 1, i + 1) = d;

        h.rotate_rows(i, i + 1, (i + 2)..n, cs, sn);
        h.rotate_columns(i, i + 1, 0..i, cs, sn);
        z.rotate_columns(i, i + 1, 0..n, cs, sn);

        wr[i] = a;
        wr[i + 1] = d;
        if c == 0.0 {
            wi[i] = 0.0;
            wi[i + 1] = 0.0;
        } else {
            let im = b.abs().sqrt() * c.abs().sqrt();
            wi[i] = im;
            wi[i + 1] = -im;
        }
        i += 2;
    }
}

/// Schur factorization of a real 2x2 block in standard form.
///
/// Returns `[a, b, c, d]` and `(cs, sn)` with
/// `[[a0, b0], [c0, d0]] = R [[a, b], [c, d]] R^T`, `R = [[cs, -sn], [sn, cs]]`.
/// Either `c == 0` (real eigenvalues `a`, `d`) or `a == d` and `b c < 0`.
fn lanv2(a0: f64, b0: f64, c0: f64, d0: f64) -> ([f64; 4], f64, f64) {
    let (mut a, mut b, mut c, mut d) = (a0, b0, c0, d0);
    let (mut cs, mut sn);
    let sign = |v: f64| 1.0_f64.copysign(v);

    if c == 0.0 {
        cs = 1.0;
        sn = 0.0;
    } else if b == 0.0 {
        // Swap rows and columns.
        cs = 0.0;
        sn = 1.0;
        core::mem::swap(&mut a, &mut d);
        b = -c;
        c = 0.0;
    } else if a - d == 0.0 && sign(b) != sign(c) {
        cs = 1.0;
        sn = 0.0;
    } else {
        let temp = a - d;
        let p = 0.5 * temp;
        let bcmax = b.abs().max(c.abs());
        let bcmis = b.abs().min(c.abs()) * sign(b) * sign(c);
        let scale = p.abs().max(bcmax);
        let mut zr = p / scale * p + bcmax / scale * bcmis;

        if zr >= 4.0 * f64::EPSILON {
            // Real eigenvalues: make the block upper triangular.
            zr = p + (scale.sqrt() * zr.sqrt()).copysign(p);
            a = d + zr;
            d -= bcmax / zr * bcmis;
            let tau = c.hypot(zr);
            cs = zr / tau;
            sn = c / tau;
            b -= c;
            c = 0.0;
        } else {
            // Complex or nearly equal real eigenvalues: equalize the diagonal.
            let sigma = b + c;
            let tau = sigma.hypot(temp);
            cs = (0.5 * (1.0 + sigma.abs() / tau)).sqrt();
            sn = -(p / (tau * cs)) * sign(sigma);

            let aa = a * cs + b * sn;
            let bb = -a * sn + b * cs;
            let cc = c * cs + d * sn;
            let dd = -c * sn + d * cs;
            a = aa * cs + cc * sn;
            b = bb * cs + dd * sn;
            c = -aa * sn + cc * cs;
            d = -bb * sn + dd * cs;

            let mid = 0.5 * (a + d);
            a = mid;
            d = mid;

            if c != 0.0 {
                if b == 0.0 {
                    b = -c;
                    c = 0.0;
                    let t = cs;
                    cs = -sn;
                    sn = t;
                } else if sign(b) == sign(c) {
                    // Real after all.
                    let sab = b.abs().sqrt();
                    let sac = c.abs().sqrt();
                    let pp = (sab * sac).copysign(c);
                    let tau = 1.0 / (b + c).abs().sqrt();
                    a = mid + pp;
                    d = mid - pp;
                    b -= c;
                    c = 0.0;
                    let cs1 = sab * tau;
                    let sn1 = sac * tau;
                    let t = cs * cs1 - sn * sn1;
                    sn = cs * sn1 + sn * cs1;
                    cs = t;
                }
            }
        }
    }
    ([a, b, c, d], cs, sn)
}
