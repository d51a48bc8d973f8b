use alloc::vec;

use crate::dense::{DenseMatrix, MatrixLayout, SplitComplexArray};
use crate::kernels::{hessenberg, hqr, invoke_with_auto_workspace};

use super::schur::compute_eigenvectors_from_schur;
use super::{require_square, ComplexEigenvectorDecomposition, EigenParams, MatrixError};

/// Orthogonal similarity reduction to upper Hessenberg form, `A = P H P^T`.
///
/// ```
/// use eigenspan::DenseMatrix;
///
/// let a = DenseMatrix::from_vec(4, 4, vec![
///     4.0, 1.0, -2.0, 2.0,
///     1.0, 2.0,  0.0, 1.0,
///     -2.0, 0.0, 3.0, -2.0,
///     2.0, 1.0, -2.0, -1.0,
/// ]).unwrap();
/// let hd = a.hessenberg_reduce().unwrap();
/// let h = hd.hessenberg_matrix();
/// for i in 2..4 {
///     for j in 0..i - 1 {
///         assert_eq!(h[(i, j)], 0.0);
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct HessenbergDecomposition {
    hessenberg_matrix: DenseMatrix<f64>,
    reducer_matrix: DenseMatrix<f64>,
}

impl DenseMatrix<f64> {
    /// Reduce a square matrix to upper Hessenberg form.
    ///
    /// Entries of `H` below the first subdiagonal are exactly zero.
    /// Fails with `InvalidDimension` if the matrix is not square.
    pub fn hessenberg_reduce(&self) -> Result<HessenbergDecomposition, MatrixError> {
        require_square("hessenberg_reduce", self.nrows(), self.ncols())?;
        let n = self.nrows();
        let lda = n.max(1);
        let mut h = self.to_vec_in(MatrixLayout::ColumnMajor);
        let mut tau = vec![0.0; n.saturating_sub(1)];

        invoke_with_auto_workspace("gehrd", |work, lwork| {
            hessenberg::gehrd(n, &mut h, lda, &mut tau, work, lwork)
        })?;

        let mut p = h.clone();
        invoke_with_auto_workspace("orghr", |work, lwork| {
            hessenberg::orghr(n, &mut p, lda, &tau, work, lwork)
        })?;

        // Reflector storage.
        for j in 0..n {
            for i in (j + 2)..n {
                h[j * lda + i] = 0.0;
            }
        }

        Ok(HessenbergDecomposition {
            hessenberg_matrix: DenseMatrix::from_column_major(n, n, h)?
                .to_layout(MatrixLayout::RowMajor),
            reducer_matrix: DenseMatrix::from_column_major(n, n, p)?
                .to_layout(MatrixLayout::RowMajor),
        })
    }
}

impl HessenbergDecomposition {
    /// Matrix dimension `n`.
    #[inline]
    pub fn size(&self) -> usize {
        self.hessenberg_matrix.nrows()
    }

    /// Upper Hessenberg `H`.
    #[inline]
    pub fn hessenberg_matrix(&self) -> &DenseMatrix<f64> {
        &self.hessenberg_matrix
    }

    /// Orthogonal `P` with `A = P H P^T`.
    #[inline]
    pub fn reducer_matrix(&self) -> &DenseMatrix<f64> {
        &self.reducer_matrix
    }

    /// Always [`MatrixLayout::RowMajor`].
    #[inline]
    pub fn layout(&self) -> MatrixLayout {
        MatrixLayout::RowMajor
    }

    /// Eigen-decomposition of the original matrix with default parameters.
    pub fn eigenvector_decomposition(
        &self,
    ) -> Result<ComplexEigenvectorDecomposition, MatrixError> {
        self.eigenvector_decomposition_with(&EigenParams::default())
    }

    /// Eigen-decomposition of the original matrix.
    ///
    /// Runs the Francis double-shift QR iteration on `H` to reach the real
    /// Schur form `H = Z T Z^T`, then back-substitutes on `T` and maps the
    /// vectors through `P Z`. Complex eigenvalues appear as adjacent
    /// conjugate pairs, positive imaginary part first.
    ///
    /// Fails with a `Lapack` error (routine `"hseqr"`, `NoConvergence(k)`)
    /// if the leading `k x k` block did not converge within
    /// `params.iterations_per_eigenvalue * n` sweeps.
    ///
    /// ```
    /// use eigenspan::DenseMatrix;
    ///
    /// // Rotation by 90 degrees: eigenvalues +-i.
    /// let a = DenseMatrix::from_vec(2, 2, vec![0.0, -1.0, 1.0, 0.0]).unwrap();
    /// let eig = a.hessenberg_reduce().unwrap().eigenvector_decomposition().unwrap();
    /// let w = eig.eigenvalues();
    /// assert!(w.real()[0].abs() < 1e-15);
    /// assert!((w.imag()[0] - 1.0).abs() < 1e-15);
    /// assert!((w.imag()[1] + 1.0).abs() < 1e-15);
    /// ```
    pub fn eigenvector_decomposition_with(
        &self,
        params: &EigenParams,
    ) -> Result<ComplexEigenvectorDecomposition, MatrixError> {
        let n = self.size();
        let ld = n.max(1);
        let mut t = self.hessenberg_matrix.to_vec_in(MatrixLayout::ColumnMajor);
        let mut z = DenseMatrix::<f64>::identity(n).to_vec_in(MatrixLayout::ColumnMajor);
        let mut wr = vec![0.0; n];
        let mut wi = vec![0.0; n];

        invoke_with_auto_workspace("hseqr", |work, lwork| {
            hqr::hseqr(
                n,
                &mut t,
                ld,
                &mut wr,
                &mut wi,
                &mut z,
                ld,
                work,
                lwork,
                params.iterations_per_eigenvalue,
            )
        })?;

        let schur_form = DenseMatrix::from_column_major(n, n, t)?;
        let schur_vectors = self
            .reducer_matrix
            .multiply(&DenseMatrix::from_column_major(n, n, z)?)?;
        let eigenvalues = SplitComplexArray::new(wr, wi)?;
        let eigenvectors =
            compute_eigenvectors_from_schur(&schur_form, &schur_vectors, &eigenvalues)?;

        Ok(ComplexEigenvectorDecomposition::new(eigenvectors, eigenvalues))
    }
}
