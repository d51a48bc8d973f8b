//! Right eigenvectors of a real upper quasi-triangular matrix.

#[cfg(not(feature = "std"))]
use num_traits::Float;
use num_complex::Complex;

use super::{workspace_guard, ColMajorMut};
use crate::traits::{MatrixMut, MatrixRef};

/// Right eigenvectors of the Schur form `t`, back-transformed by `vr`.
///
/// `t` must be in the standard form produced by [`hseqr`](super::hqr::hseqr):
/// a 2x2 diagonal block with nonzero subdiagonal is a conjugate pair. On
/// entry `vr` holds the Schur vectors `Q`; on exit column `j` holds the
/// eigenvector `Q x` for eigenvalue `j`. A conjugate pair at `(j, j+1)`
/// (positive imaginary part at `j`) is stored as real part in column `j`
/// and imaginary part in column `j+1`. Each vector is scaled so its largest
/// component has `|re| + |im| == 1`.
///
/// Near-singular diagonal solves are perturbed to keep the result finite,
/// so repeated eigenvalues still produce usable vectors.
///
/// Workspace: `2n` (real and imaginary parts of the triangular solve).
pub(crate) fn trevc(
    n: usize,
    t: &[f64],
    ldt: usize,
    vr: &mut [f64],
    ldvr: usize,
    work: &mut [f64],
    lwork: isize,
) -> i32 {
    if ldt < n.max(1) {
        return -3;
    }
    if t.len() < ldt * n {
        return -2;
    }
    if ldvr < n.max(1) {
        return -5;
    }
    if vr.len() < ldvr * n {
        return -4;
    }
    if let Some(status) = workspace_guard(work, lwork, (2 * n).max(1), 7) {
        return status;
    }
    if n == 0 {
        return 0;
    }

    let tt = |i: usize, j: usize| t[j * ldt + i];
    let mut v = ColMajorMut::new(vr, n, n, ldvr);
    let (xr, rest) = work.split_at_mut(n);
    let xi = &mut rest[..n];

    let ulp = f64::EPSILON;
    let smlnum = f64::MIN_POSITIVE * (n as f64 / ulp);
    let bignum = (1.0 - ulp) / smlnum;

    let mut ki = n;
    while ki > 0 {
        ki -= 1;

        if ki > 0 && tt(ki, ki - 1) != 0.0 {
            // Conjugate pair on rows/columns (k0, ki).
            let k0 = ki - 1;
            let wr = tt(ki, ki);
            let wi = tt(k0, ki).abs().sqrt() * tt(ki, k0).abs().sqrt();
            let smin = (ulp * (wr.abs() + wi)).max(smlnum);

            xr[..=ki].fill(0.0);
            xi[..=ki].fill(0.0);
            if tt(k0, ki).abs() >= tt(ki, k0).abs() {
                xr[k0] = 1.0;
                xi[ki] = wi / tt(k0, ki);
            } else {
                xr[k0] = -wi / tt(ki, k0);
                xi[ki] = 1.0;
            }
            for k in 0..k0 {
                xr[k] = -xr[k0] * tt(k, k0);
                xi[k] = -xi[ki] * tt(k, ki);
            }
            solve_shifted(
                &tt,
                k0,
                Complex::new(wr, wi),
                smin,
                bignum,
                &mut xr[..=ki],
                &mut xi[..=ki],
            );

            for r in 0..n {
                let (mut re, mut im) = (0.0, 0.0);
                for k in 0..k0 {
                    let vrk = *v.get(r, k);
                    re += vrk * xr[k];
                    im += vrk * xi[k];
                }
                re += *v.get(r, k0) * xr[k0];
                im += *v.get(r, ki) * xi[ki];
                *v.get_mut(r, k0) = re;
                *v.get_mut(r, ki) = im;
            }

            let emax = (0..n)
                .map(|r| v.get(r, k0).abs() + v.get(r, ki).abs())
                .fold(0.0, f64::max);
            if emax > 0.0 {
                let scale = 1.0 / emax;
                v.col_as_mut_slice(k0, 0).iter_mut().for_each(|x| *x *= scale);
                v.col_as_mut_slice(ki, 0).iter_mut().for_each(|x| *x *= scale);
            }

            ki -= 1;
        } else {
            let wr = tt(ki, ki);
            let smin = (ulp * wr.abs()).max(smlnum);

            xr[ki] = 1.0;
            for k in 0..ki {
                xr[k] = -tt(k, ki);
            }
            xi[..=ki].fill(0.0);
            solve_shifted(
                &tt,
                ki,
                Complex::new(wr, 0.0),
                smin,
                bignum,
                &mut xr[..=ki],
                &mut xi[..=ki],
            );

            for r in 0..n {
                let mut s = *v.get(r, ki) * xr[ki];
                for k in 0..ki {
                    s += *v.get(r, k) * xr[k];
                }
                *v.get_mut(r, ki) = s;
            }

            let col = v.col_as_mut_slice(ki, 0);
            let emax = col.iter().fold(0.0, |m: f64, x| m.max(x.abs()));
            if emax > 0.0 {
                let scale = 1.0 / emax;
                col.iter_mut().for_each(|x| *x *= scale);
            }
        }
    }
    0
}

/// Solve `(T[0..m, 0..m] - lambda I) x = b` in place, `b = xr + i xi`,
/// by back substitution over the 1x1 and 2x2 diagonal blocks of `T`.
///
/// Pivots smaller than `smin` are replaced by `smin`. Whenever a division
/// or the following right-hand side update could exceed `bignum`, the whole
/// of `xr`/`xi` is rescaled first, so the result stays finite and only its
/// scale changes.
fn solve_shifted(
    t: &impl Fn(usize, usize) -> f64,
    m: usize,
    lambda: Complex<f64>,
    smin: f64,
    bignum: f64,
    xr: &mut [f64],
    xi: &mut [f64],
) {
    let mut j = m;
    while j > 0 {
        j -= 1;
        if j > 0 && t(j, j - 1) != 0.0 {
            let j0 = j - 1;
            let a11 = Complex::new(t(j0, j0), 0.0) - lambda;
            let a12 = t(j0, j);
            let a21 = t(j, j0);
            let a22 = Complex::new(t(j, j), 0.0) - lambda;
            let mut det = a11 * a22 - a12 * a21;
            if det.l1_norm() < smin {
                det = Complex::new(smin, 0.0);
            }

            let bnorm = (xr[j0].abs() + xi[j0].abs()).max(xr[j].abs() + xi[j].abs());
            let dnorm = det.l1_norm();
            if dnorm < 1.0 && bnorm > 1.0 && bnorm > bignum * dnorm {
                rescale(xr, xi, 1.0 / bnorm);
            }

            let r0 = Complex::new(xr[j0], xi[j0]);
            let r1 = Complex::new(xr[j], xi[j]);
            let mut x0 = scaled_div(r0 * a22 - r1 * a12, det);
            let mut x1 = scaled_div(a11 * r1 - r0 * a21, det);

            let xnorm = x0.l1_norm().max(x1.l1_norm());
            let colnorm: f64 = (0..j0).map(|k| t(k, j0).abs() + t(k, j).abs()).sum();
            if xnorm > 1.0 && colnorm > bignum / xnorm {
                let s = 1.0 / xnorm;
                rescale(xr, xi, s);
                x0 = x0 * s;
                x1 = x1 * s;
            }

            xr[j0] = x0.re;
            xi[j0] = x0.im;
            xr[j] = x1.re;
            xi[j] = x1.im;
            for k in 0..j0 {
                let upd = x0 * t(k, j0) + x1 * t(k, j);
                xr[k] -= upd.re;
                xi[k] -= upd.im;
            }
            j = j0;
        } else {
            let mut den = Complex::new(t(j, j), 0.0) - lambda;
            if den.l1_norm() < smin {
                den = Complex::new(smin, 0.0);
            }

            let bnorm = xr[j].abs() + xi[j].abs();
            let dnorm = den.l1_norm();
            if dnorm < 1.0 && bnorm > 1.0 && bnorm > bignum * dnorm {
                rescale(xr, xi, 1.0 / bnorm);
            }

            let mut x = scaled_div(Complex::new(xr[j], xi[j]), den);

            let xnorm = x.l1_norm();
            let colnorm: f64 = (0..j).map(|k| t(k, j).abs()).sum();
            if xnorm > 1.0 && colnorm > bignum / xnorm {
                let s = 1.0 / xnorm;
                rescale(xr, xi, s);
                x = x * s;
            }

            xr[j] = x.re;
            xi[j] = x.im;
            for k in 0..j {
                let tkj = t(k, j);
                xr[k] -= x.re * tkj;
                xi[k] -= x.im * tkj;
            }
        }
    }
}

#[inline]
fn rescale(xr: &mut [f64], xi: &mut [f64], s: f64) {
    xr.iter_mut().chain(xi.iter_mut()).for_each(|x| *x *= s);
}

/// `a / b` without forming `|b|^2` (Smith's algorithm), so tiny pivots do
/// not underflow. A real `b` divides both parts directly.
fn scaled_div(a: Complex<f64>, b: Complex<f64>) -> Complex<f64> {
    if b.im == 0.0 {
        Complex::new(a.re / b.re, a.im / b.re)
    } else if b.re.abs() >= b.im.abs() {
        let r = b.im / b.re;
        let d = b.re + b.im * r;
        Complex::new((a.re + a.im * r) / d, (a.im - a.re * r) / d)
    } else {
        let r = b.re / b.im;
        let d = b.im + b.re * r;
        Complex::new((a.re * r + a.im) / d, (a.im * r - a.re) / d)
    }
}
