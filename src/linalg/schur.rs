use alloc::vec;
use alloc::vec::Vec;

use crate::dense::{DenseComplexMatrix, DenseMatrix, MatrixLayout, SplitComplexArray};
use crate::kernels::{invoke_with_auto_workspace, trevc};

use super::{require_square, DimensionMismatch, MatrixError};

/// Subdiagonal magnitude above which a 2x2 diagonal block of a real Schur
/// form is read as a complex-conjugate pair.
pub const COMPLEX_PAIR_THRESHOLD: f64 = 1e-10;

/// A diagonal block of a real Schur form, by starting index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchurBlock {
    /// 1x1 block: real eigenvalue at `i`.
    Real(usize),
    /// 2x2 block at `(i, i+1)`: eigenvalues `i` and `i+1` are conjugates.
    ConjugatePair(usize),
}

impl SchurBlock {
    /// Partition the diagonal of a quasi-triangular matrix, left to right.
    ///
    /// ```
    /// use eigenspan::{DenseMatrix, SchurBlock};
    ///
    /// let t = DenseMatrix::from_vec(3, 3, vec![
    ///     1.0, -2.0, 0.5,
    ///     2.0,  1.0, 0.0,
    ///     0.0,  1e-12, 3.0,
    /// ]).unwrap();
    /// assert_eq!(
    ///     SchurBlock::scan(&t),
    ///     vec![SchurBlock::ConjugatePair(0), SchurBlock::Real(2)]
    /// );
    /// ```
    pub fn scan(schur_form: &DenseMatrix<f64>) -> Vec<SchurBlock> {
        let n = schur_form.nrows();
        let mut blocks = Vec::with_capacity(n);
        let mut i = 0;
        while i < n {
            if i + 1 < n && schur_form[(i + 1, i)].abs() > COMPLEX_PAIR_THRESHOLD {
                blocks.push(SchurBlock::ConjugatePair(i));
                i += 2;
            } else {
                blocks.push(SchurBlock::Real(i));
                i += 1;
            }
        }
        blocks
    }

    /// First diagonal index covered by the block.
    #[inline]
    pub fn start(&self) -> usize {
        match *self {
            SchurBlock::Real(i) | SchurBlock::ConjugatePair(i) => i,
        }
    }
}

/// Eigenvectors of the original matrix from its real Schur decomposition
/// `A = V T V^T`.
///
/// `schur_form` must be in standard form (2x2 blocks with equal diagonal
/// entries, as produced by the Hessenberg path). Column `i` of the result
/// pairs positionally with `eigenvalues[i]`. For a conjugate pair at
/// `(i, i+1)`, column `i` is `re + i im` and column `i+1` its conjugate.
///
/// Fails with `InvalidDimension` unless both matrices are square of the
/// same size and `eigenvalues` has one entry per row.
///
/// # Limitations
///
/// Blocks are classified by [`COMPLEX_PAIR_THRESHOLD`] alone. A 2x2 block
/// whose subdiagonal is nonzero but at most the threshold is solved as two
/// real 1x1 blocks and packed as real vectors, even though `eigenvalues`
/// may carry a nonzero imaginary part for it. Such columns are finite but
/// do not satisfy `A v = lambda v` for the complex `lambda`.
pub fn compute_eigenvectors_from_schur(
    schur_form: &DenseMatrix<f64>,
    schur_vectors: &DenseMatrix<f64>,
    eigenvalues: &SplitComplexArray,
) -> Result<DenseComplexMatrix, MatrixError> {
    const OPERATION: &str = "compute eigenvectors from schur";
    require_square(OPERATION, schur_form.nrows(), schur_form.ncols())?;
    require_square(OPERATION, schur_vectors.nrows(), schur_vectors.ncols())?;
    let n = schur_form.nrows();
    if schur_vectors.nrows() != n {
        return Err(MatrixError::InvalidDimension {
            operation: OPERATION,
            mismatch: DimensionMismatch::Incompatible {
                lhs: (n, n),
                rhs: (schur_vectors.nrows(), schur_vectors.ncols()),
            },
        });
    }
    if eigenvalues.len() != n {
        return Err(MatrixError::InvalidDimension {
            operation: OPERATION,
            mismatch: DimensionMismatch::BufferLength {
                expected: n,
                got: eigenvalues.len(),
            },
        });
    }

    let blocks = SchurBlock::scan(schur_form);

    // Column-major upper triangle; subdiagonal entries survive only
    // inside conjugate pairs so the solver sees the same blocks.
    let mut t = vec![0.0; n * n];
    for j in 0..n {
        for i in 0..=j {
            t[j * n + i] = schur_form[(i, j)];
        }
    }
    for block in &blocks {
        if let SchurBlock::ConjugatePair(i) = *block {
            t[i * n + i + 1] = schur_form[(i + 1, i)];
        }
    }

    let ld = n.max(1);
    let mut vr = schur_vectors.to_vec_in(MatrixLayout::ColumnMajor);
    invoke_with_auto_workspace("trevc", |work, lwork| {
        trevc::trevc(n, &t, ld, &mut vr, ld, work, lwork)
    })?;

    let mut re = vec![0.0; n * n];
    let mut im = vec![0.0; n * n];
    for block in blocks {
        match block {
            SchurBlock::Real(i) => {
                for r in 0..n {
                    re[r * n + i] = vr[i * n + r];
                }
            }
            SchurBlock::ConjugatePair(i) => {
                for r in 0..n {
                    let x = vr[i * n + r];
                    let y = vr[(i + 1) * n + r];
                    re[r * n + i] = x;
                    im[r * n + i] = y;
                    re[r * n + i + 1] = x;
                    im[r * n + i + 1] = -y;
                }
            }
        }
    }

    DenseComplexMatrix::new(SplitComplexArray::new(re, im)?, n, n)
}
