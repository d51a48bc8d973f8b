use alloc::vec;
use alloc::vec::Vec;

use crate::dense::{DenseMatrix, MatrixLayout};
use crate::kernels::{invoke_with_auto_workspace, tridiag};

use super::{require_square, EigenParams, EigenvectorDecomposition, MatrixError};

/// Householder reduction of a symmetric matrix to tridiagonal form.
///
/// `A = Q T Q^T` with `T` symmetric tridiagonal (diagonal `d`,
/// off-diagonal `e`) and `Q` orthogonal. Only the lower triangle of `A`
/// is read.
///
/// ```
/// use eigenspan::DenseMatrix;
///
/// let a = DenseMatrix::from_vec(3, 3, vec![
///     4.0, 1.0, 2.0,
///     1.0, 3.0, 0.0,
///     2.0, 0.0, 5.0,
/// ]).unwrap();
/// let h = a.tridiagonalize().unwrap();
/// assert_eq!(h.diagonal().len(), 3);
/// assert_eq!(h.off_diagonal().len(), 2);
///
/// // Q T Q^T == A
/// let q = h.orthogonal_matrix();
/// let r = q.multiply(&h.build_tridiagonal_matrix()).unwrap()
///     .multiply(&q.transpose()).unwrap();
/// for i in 0..3 {
///     for j in 0..3 {
///         assert!((r[(i, j)] - a[(i, j)]).abs() < 1e-12);
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct HouseholderDecomposition {
    diagonal: Vec<f64>,
    off_diagonal: Vec<f64>,
    householder_scalars: Vec<f64>,
    orthogonal_matrix: DenseMatrix<f64>,
}

impl DenseMatrix<f64> {
    /// Reduce a symmetric matrix to tridiagonal form.
    ///
    /// Fails with `InvalidDimension` if the matrix is not square. Symmetry
    /// is assumed, not checked.
    pub fn tridiagonalize(&self) -> Result<HouseholderDecomposition, MatrixError> {
        require_square("tridiagonalize", self.nrows(), self.ncols())?;
        let n = self.nrows();
        let lda = n.max(1);
        let mut a = self.to_vec_in(MatrixLayout::ColumnMajor);
        let mut diagonal = vec![0.0; n];
        let mut off_diagonal = vec![0.0; n.saturating_sub(1)];
        let mut householder_scalars = vec![0.0; n.saturating_sub(1)];

        invoke_with_auto_workspace("sytrd", |work, lwork| {
            tridiag::sytrd(
                n,
                &mut a,
                lda,
                &mut diagonal,
                &mut off_diagonal,
                &mut householder_scalars,
                work,
                lwork,
            )
        })?;
        invoke_with_auto_workspace("orgtr", |work, lwork| {
            tridiag::orgtr(n, &mut a, lda, &householder_scalars, work, lwork)
        })?;

        let orthogonal_matrix =
            DenseMatrix::from_column_major(n, n, a)?.to_layout(MatrixLayout::RowMajor);
        Ok(HouseholderDecomposition {
            diagonal,
            off_diagonal,
            householder_scalars,
            orthogonal_matrix,
        })
    }
}

impl HouseholderDecomposition {
    /// Matrix dimension `n`.
    #[inline]
    pub fn size(&self) -> usize {
        self.diagonal.len()
    }

    /// Diagonal of `T` (length `n`).
    #[inline]
    pub fn diagonal(&self) -> &[f64] {
        &self.diagonal
    }

    /// Sub/super-diagonal of `T` (length `n - 1`).
    #[inline]
    pub fn off_diagonal(&self) -> &[f64] {
        &self.off_diagonal
    }

    /// Reflector scalars `tau` (length `n - 1`).
    #[inline]
    pub fn householder_scalars(&self) -> &[f64] {
        &self.householder_scalars
    }

    /// Orthogonal `Q`, row-major.
    #[inline]
    pub fn orthogonal_matrix(&self) -> &DenseMatrix<f64> {
        &self.orthogonal_matrix
    }

    /// Dense `T` from the diagonal and off-diagonal.
    pub fn build_tridiagonal_matrix(&self) -> DenseMatrix<f64> {
        let (d, e) = (&self.diagonal, &self.off_diagonal);
        DenseMatrix::from_fn(self.size(), self.size(), |i, j| {
            if i == j {
                d[i]
            } else if i == j + 1 {
                e[j]
            } else if j == i + 1 {
                e[i]
            } else {
                0.0
            }
        })
    }

    /// Eigen-decomposition of the original symmetric matrix with default
    /// parameters.
    pub fn eigenvector_decomposition(&self) -> Result<EigenvectorDecomposition, MatrixError> {
        self.eigenvector_decomposition_with(&EigenParams::default())
    }

    /// Eigen-decomposition of the original symmetric matrix.
    ///
    /// Implicit QL/QR iteration on `T`, accumulating rotations into `Q`
    /// so the eigenvectors belong to `A`. Eigenvalues come back ascending.
    /// Fails with a `Lapack` error if the iteration does not converge within
    /// `params.iterations_per_eigenvalue * n` sweeps.
    pub fn eigenvector_decomposition_with(
        &self,
        params: &EigenParams,
    ) -> Result<EigenvectorDecomposition, MatrixError> {
        let n = self.size();
        let ldz = n.max(1);
        let mut d = self.diagonal.clone();
        let mut e = self.off_diagonal.clone();
        let mut z = self.orthogonal_matrix.to_vec_in(MatrixLayout::ColumnMajor);

        invoke_with_auto_workspace("steqr", |work, lwork| {
            tridiag::steqr(
                n,
                &mut d,
                &mut e,
                &mut z,
                ldz,
                work,
                lwork,
                params.iterations_per_eigenvalue,
            )
        })?;

        let eigenvectors =
            DenseMatrix::from_column_major(n, n, z)?.to_layout(MatrixLayout::RowMajor);
        Ok(EigenvectorDecomposition::new(eigenvectors, d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linalg::{DimensionMismatch, LapackFailure};

    const TOL: f64 = 1e-12;

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

    fn sym4() -> DenseMatrix<f64> {
        DenseMatrix::from_vec(
            4,
            4,
            vec![
                4.0, 1.0, -2.0, 2.0, //
                1.0, 2.0, 0.0, 1.0, //
                -2.0, 0.0, 3.0, -2.0, //
                2.0, 1.0, -2.0, -1.0,
            ],
        )
        .unwrap()
    }

    #[test]
    fn tridiagonal_reconstructs_input() {
        let a = sym4();
        let h = a.tridiagonalize().unwrap();
        let q = h.orthogonal_matrix();
        assert_eq!(q.layout(), MatrixLayout::RowMajor);

        let r = q
            .multiply(&h.build_tridiagonal_matrix())
            .unwrap()
            .multiply(&q.transpose())
            .unwrap();
        for i in 0..4 {
            for j in 0..4 {
                assert_near(r[(i, j)], a[(i, j)], 1e-13, "QTQ^T");
            }
        }

        let qtq = q.transpose().multiply(q).unwrap();
        for i in 0..4 {
            for j in 0..4 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_near(qtq[(i, j)], expected, 1e-14, "Q^TQ");
            }
        }
    }

    #[test]
    fn build_tridiagonal_shape() {
        let h = sym4().tridiagonalize().unwrap();
        let t = h.build_tridiagonal_matrix();
        for i in 0..4 {
            assert_eq!(t[(i, i)], h.diagonal()[i]);
            for j in 0..4 {
                if i.abs_diff(j) > 1 {
                    assert_eq!(t[(i, j)], 0.0);
                }
            }
        }
        for i in 0..3 {
            assert_eq!(t[(i + 1, i)], h.off_diagonal()[i]);
            assert_eq!(t[(i, i + 1)], h.off_diagonal()[i]);
        }
        assert_eq!(h.householder_scalars().len(), 3);
    }

    #[test]
    fn symmetric_eigenpairs() {
        let a = sym4();
        let eig = a.tridiagonalize().unwrap().eigenvector_decomposition().unwrap();
        let w = eig.eigenvalues();
        for k in 1..4 {
            assert!(w[k - 1] <= w[k], "ascending");
        }

        let trace = 4.0 + 2.0 + 3.0 - 1.0;
        assert_near(w.iter().sum::<f64>(), trace, TOL, "trace");

        let v = eig.eigenvectors();
        let av = a.multiply(v).unwrap();
        for k in 0..4 {
            let norm: f64 = v.column(k).iter().map(|x| x * x).sum();
            assert_near(norm, 1.0, TOL, "unit");
            for r in 0..4 {
                assert_near(av[(r, k)], w[k] * v[(r, k)], TOL, "Av");
            }
        }
    }

    #[test]
    fn diagonal_input_sorted() {
        let a = DenseMatrix::from_fn(3, 3, |i, j| if i == j { [5.0, -1.0, 2.0][i] } else { 0.0 });
        let eig = a.tridiagonalize().unwrap().eigenvector_decomposition().unwrap();
        assert_eq!(eig.eigenvalues(), &[-1.0, 2.0, 5.0]);
        assert_eq!(eig.eigenvector(0).iter().map(|x| x.abs()).collect::<Vec<_>>(), vec![0.0, 1.0, 0.0]);
    }

    #[test]
    fn empty_and_scalar() {
        let h = DenseMatrix::<f64>::zeros(0, 0).tridiagonalize().unwrap();
        assert_eq!(h.size(), 0);
        let eig = h.eigenvector_decomposition().unwrap();
        assert!(eig.eigenvalues().is_empty());

        let a = DenseMatrix::from_vec(1, 1, vec![7.0]).unwrap();
        let eig = a.tridiagonalize().unwrap().eigenvector_decomposition().unwrap();
        assert_eq!(eig.eigenvalues(), &[7.0]);
        assert_eq!(eig.eigenvectors()[(0, 0)].abs(), 1.0);
    }

    #[test]
    fn non_square_rejected() {
        let a = DenseMatrix::<f64>::zeros(3, 2);
        match a.tridiagonalize() {
            Err(MatrixError::InvalidDimension {
                operation,
                mismatch: DimensionMismatch::NotSquare { rows: 3, cols: 2 },
            }) => assert_eq!(operation, "tridiagonalize"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn zero_sweep_budget_is_reported() {
        let h = sym4().tridiagonalize().unwrap();
        let params = EigenParams {
            iterations_per_eigenvalue: 0,
        };
        match h.eigenvector_decomposition_with(&params) {
            Err(MatrixError::Lapack(err)) => {
                assert_eq!(err.routine, "steqr");
                assert_eq!(err.failure, LapackFailure::IllegalArgument(8));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn huge_sweep_budget_saturates() {
        let a = sym4();
        let params = EigenParams {
            iterations_per_eigenvalue: usize::MAX,
        };
        let eig = a
            .tridiagonalize()
            .unwrap()
            .eigenvector_decomposition_with(&params)
            .unwrap();
        let reference = a.tridiagonalize().unwrap().eigenvector_decomposition().unwrap();
        assert_eq!(eig.eigenvalues(), reference.eigenvalues());
    }

    #[test]
    fn nan_input_reports_no_convergence() {
        let a = DenseMatrix::from_vec(
            3,
            3,
            vec![f64::NAN, 1.0, 0.0, 1.0, 2.0, 1.0, 0.0, 1.0, 3.0],
        )
        .unwrap();
        let h = a.tridiagonalize().unwrap();
        match h.eigenvector_decomposition() {
            Err(MatrixError::Lapack(err)) => {
                assert_eq!(err.routine, "steqr");
                assert_eq!(err.failure, LapackFailure::NoConvergence(2));
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
