use alloc::vec;
use alloc::vec::Vec;

use crate::linalg::{DimensionMismatch, MatrixError};
use crate::traits::Scalar;

use super::{DenseMatrix, MatrixLayout};

// ── Transpose ───────────────────────────────────────────────────────

impl<T: Scalar> DenseMatrix<T> {
    /// Transpose into freshly allocated row-major storage.
    ///
    /// Pure data movement: `m.transpose().transpose() == m` holds exactly.
    ///
    /// ```
    /// use eigenspan::DenseMatrix;
    /// let a = DenseMatrix::from_vec(2, 3, vec![4.0, 2.0, 1.0, 2.0, 5.0, 3.0]).unwrap();
    /// let t = a.transpose();
    /// for i in 0..2 {
    ///     for j in 0..3 {
    ///         assert_eq!(a[(i, j)], t[(j, i)]);
    ///     }
    /// }
    /// ```
    pub fn transpose(&self) -> Self {
        let (m, n) = (self.nrows, self.ncols);
        let data = match self.layout {
            // A column-major buffer read row-major is already the transpose.
            MatrixLayout::ColumnMajor => self.data.clone(),
            MatrixLayout::RowMajor => {
                let mut out = Vec::with_capacity(m * n);
                for j in 0..n {
                    for i in 0..m {
                        out.push(self.data[i * n + j]);
                    }
                }
                out
            }
        };
        DenseMatrix {
            data,
            nrows: n,
            ncols: m,
            layout: MatrixLayout::RowMajor,
        }
    }
}

// ── Multiply ────────────────────────────────────────────────────────

impl<T: Scalar> DenseMatrix<T> {
    /// Matrix product `self * rhs` into a new row-major matrix.
    ///
    /// Fails with `InvalidDimension` when `self.ncols() != rhs.nrows()`.
    ///
    /// ```
    /// use eigenspan::DenseMatrix;
    /// let a = DenseMatrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    /// let b = DenseMatrix::from_vec(2, 1, vec![1.0, 1.0]).unwrap();
    /// let c = a.multiply(&b).unwrap();
    /// assert_eq!(c.column(0), vec![3.0, 7.0]);
    ///
    /// assert!(b.multiply(&b).is_err());
    /// ```
    pub fn multiply(&self, rhs: &DenseMatrix<T>) -> Result<DenseMatrix<T>, MatrixError> {
        if self.ncols != rhs.nrows {
            return Err(MatrixError::InvalidDimension {
                operation: "multiply",
                mismatch: DimensionMismatch::Incompatible {
                    lhs: (self.nrows, self.ncols),
                    rhs: (rhs.nrows, rhs.ncols),
                },
            });
        }
        let (m, k, n) = (self.nrows, self.ncols, rhs.ncols);
        let a = self.to_vec_in(MatrixLayout::RowMajor);
        let b = rhs.to_vec_in(MatrixLayout::RowMajor);

        // i-k-j order keeps the inner loop on contiguous rows of b and c.
        let mut c = vec![T::zero(); m * n];
        for i in 0..m {
            let c_row = &mut c[i * n..(i + 1) * n];
            for p in 0..k {
                let aip = a[i * k + p];
                let b_row = &b[p * n..(p + 1) * n];
                for (cij, &bpj) in c_row.iter_mut().zip(b_row) {
                    *cij = *cij + aip * bpj;
                }
            }
        }

        Ok(DenseMatrix {
            data: c,
            nrows: m,
            ncols: n,
            layout: MatrixLayout::RowMajor,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transpose_rectangular() {
        let a = DenseMatrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let t = a.transpose();
        assert_eq!((t.nrows(), t.ncols()), (3, 2));
        assert_eq!(t.row(0), vec![1.0, 4.0]);
        assert_eq!(t.row(2), vec![3.0, 6.0]);
        assert_eq!(t.layout(), MatrixLayout::RowMajor);
    }

    #[test]
    fn transpose_of_column_major() {
        let a = DenseMatrix::from_column_major(2, 3, vec![1, 4, 2, 5, 3, 6]).unwrap();
        let t = a.transpose();
        assert_eq!(t.as_slice(), &[1, 4, 2, 5, 3, 6]);
        assert_eq!(t[(2, 1)], 6);
        assert_eq!(t.transpose(), a);
    }

    #[test]
    fn double_transpose_is_exact() {
        let a = DenseMatrix::from_fn(4, 7, |i, j| 1.0 / (i as f64 + 3.0 * j as f64 + 1.0));
        let back = a.transpose().transpose();
        assert_eq!(back.as_slice(), a.as_slice());
    }

    #[test]
    fn multiply_identity() {
        let a = DenseMatrix::from_vec(3, 3, vec![4.0, 2.0, 1.0, 2.0, 5.0, 3.0, 1.0, 3.0, 6.0])
            .unwrap();
        let id = DenseMatrix::identity(3);
        assert_eq!(a.multiply(&id).unwrap(), a);
        assert_eq!(id.multiply(&a).unwrap(), a);
    }

    #[test]
    fn multiply_rectangular() {
        let a = DenseMatrix::from_vec(2, 3, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let b = DenseMatrix::from_vec(3, 2, vec![7, 8, 9, 10, 11, 12]).unwrap();
        let c = a.multiply(&b).unwrap();
        assert_eq!(c.as_slice(), &[58, 64, 139, 154]);
    }

    #[test]
    fn multiply_mixed_layouts() {
        let a = DenseMatrix::from_vec(2, 2, vec![1, 2, 3, 4]).unwrap();
        let b = a.to_layout(MatrixLayout::ColumnMajor);
        assert_eq!(a.multiply(&b).unwrap(), a.multiply(&a).unwrap());
    }

    #[test]
    fn multiply_dimension_mismatch() {
        let a = DenseMatrix::<f64>::zeros(3, 2);
        let b = DenseMatrix::<f64>::zeros(3, 3);
        let err = a.multiply(&b).unwrap_err();
        assert_eq!(
            err,
            MatrixError::InvalidDimension {
                operation: "multiply",
                mismatch: DimensionMismatch::Incompatible {
                    lhs: (3, 2),
                    rhs: (3, 3),
                },
            }
        );
    }
}
