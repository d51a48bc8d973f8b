use alloc::vec::Vec;

use crate::dense::{DenseComplexMatrix, DenseMatrix, MatrixLayout, SplitComplexArray};

/// Eigenvalues and eigenvectors of a real symmetric matrix.
///
/// Eigenvalues are in ascending order; eigenvector `i` is column `i` of
/// [`eigenvectors`](Self::eigenvectors), normalized to unit length.
///
/// ```
/// use eigenspan::DenseMatrix;
///
/// let a = DenseMatrix::from_vec(3, 3, vec![
///     4.0, 2.0, 1.0,
///     2.0, 5.0, 3.0,
///     1.0, 3.0, 6.0,
/// ]).unwrap();
/// let eig = a.tridiagonalize().unwrap().eigenvector_decomposition().unwrap();
///
/// // A v = lambda v
/// let av = a.multiply(eig.eigenvectors()).unwrap();
/// for (i, &lambda) in eig.eigenvalues().iter().enumerate() {
///     for r in 0..3 {
///         assert!((av[(r, i)] - lambda * eig.eigenvectors()[(r, i)]).abs() < 1e-12);
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct EigenvectorDecomposition {
    eigenvectors: DenseMatrix<f64>,
    eigenvalues: Vec<f64>,
}

impl EigenvectorDecomposition {
    pub(crate) fn new(eigenvectors: DenseMatrix<f64>, eigenvalues: Vec<f64>) -> Self {
        Self {
            eigenvectors,
            eigenvalues,
        }
    }

    /// Eigenvectors as columns, row-major storage.
    #[inline]
    pub fn eigenvectors(&self) -> &DenseMatrix<f64> {
        &self.eigenvectors
    }

    #[inline]
    pub fn eigenvalues(&self) -> &[f64] {
        &self.eigenvalues
    }

    /// Copy of eigenvector `i`.
    pub fn eigenvector(&self, i: usize) -> Vec<f64> {
        self.eigenvectors.column(i)
    }

    /// Always [`MatrixLayout::RowMajor`].
    #[inline]
    pub fn layout(&self) -> MatrixLayout {
        MatrixLayout::RowMajor
    }
}

/// Eigenvalues and eigenvectors of a general real matrix.
///
/// Column `i` of [`eigenvectors`](Self::eigenvectors) belongs to
/// eigenvalue `i`. Complex eigenvalues come in adjacent conjugate pairs,
/// positive imaginary part first, with conjugate eigenvectors. Each
/// eigenvector is scaled so its largest component has `|re| + |im| == 1`.
#[derive(Debug, Clone)]
pub struct ComplexEigenvectorDecomposition {
    eigenvectors: DenseComplexMatrix,
    eigenvalues: SplitComplexArray,
}

impl ComplexEigenvectorDecomposition {
    pub(crate) fn new(eigenvectors: DenseComplexMatrix, eigenvalues: SplitComplexArray) -> Self {
        Self {
            eigenvectors,
            eigenvalues,
        }
    }

    #[inline]
    pub fn eigenvectors(&self) -> &DenseComplexMatrix {
        &self.eigenvectors
    }

    #[inline]
    pub fn eigenvalues(&self) -> &SplitComplexArray {
        &self.eigenvalues
    }

    /// Copy of eigenvector `i`.
    pub fn eigenvector(&self, i: usize) -> SplitComplexArray {
        self.eigenvectors.column(i)
    }

    /// Always [`MatrixLayout::RowMajor`].
    #[inline]
    pub fn layout(&self) -> MatrixLayout {
        MatrixLayout::RowMajor
    }
}
