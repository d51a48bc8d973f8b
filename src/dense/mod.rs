mod complex;
mod display;
mod ops;

pub use complex::{DenseComplexMatrix, SplitComplexArray};

use alloc::vec;
use alloc::vec::Vec;
use core::ops::Index;

use crate::linalg::{DimensionMismatch, MatrixError};
use crate::traits::{MatrixRef, Scalar};

/// Mapping from logical `(row, col)` to the flat storage buffer.
///
/// Every [`DenseMatrix`] carries its layout; indexing always resolves
/// through it, so two matrices with the same logical entries compare equal
/// regardless of how they are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MatrixLayout {
    /// `data[row * ncols + col]`
    #[default]
    RowMajor,
    /// `data[col * nrows + row]`, the Fortran convention used by the kernels.
    ColumnMajor,
}

impl MatrixLayout {
    /// Flat offset of `(row, col)` in an `nrows x ncols` buffer.
    #[inline]
    pub fn offset(self, nrows: usize, ncols: usize, row: usize, col: usize) -> usize {
        match self {
            MatrixLayout::RowMajor => row * ncols + col,
            MatrixLayout::ColumnMajor => col * nrows + row,
        }
    }
}

/// Dense heap-allocated matrix with runtime dimensions.
///
/// Owns a contiguous `Vec<T>` of exactly `nrows * ncols` elements. Row-major
/// unless built with [`DenseMatrix::from_column_major`]. Dimensions never
/// change after construction and there are no public mutators: every
/// operation returns freshly allocated storage.
///
/// # Examples
///
/// ```
/// use eigenspan::DenseMatrix;
///
/// let a = DenseMatrix::from_vec(2, 3, vec![1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
/// assert_eq!(a[(0, 2)], 3.0);
/// assert_eq!(a[(1, 0)], 4.0);
///
/// let t = a.transpose();
/// assert_eq!(t.nrows(), 3);
/// assert_eq!(t[(2, 1)], 6.0);
/// ```
#[derive(Debug, Clone)]
pub struct DenseMatrix<T = f64> {
    data: Vec<T>,
    nrows: usize,
    ncols: usize,
    layout: MatrixLayout,
}

// ── Constructors ────────────────────────────────────────────────────

impl<T: Scalar> DenseMatrix<T> {
    /// Wrap a row-major buffer.
    ///
    /// Fails with `InvalidDimension` if `data.len() != nrows * ncols`.
    pub fn from_vec(nrows: usize, ncols: usize, data: Vec<T>) -> Result<Self, MatrixError> {
        Self::with_layout(nrows, ncols, data, MatrixLayout::RowMajor)
    }

    /// Wrap a column-major buffer.
    ///
    /// ```
    /// use eigenspan::{DenseMatrix, MatrixLayout};
    /// // col0 = [1, 3], col1 = [2, 4]
    /// let m = DenseMatrix::from_column_major(2, 2, vec![1.0, 3.0, 2.0, 4.0]).unwrap();
    /// assert_eq!(m.layout(), MatrixLayout::ColumnMajor);
    /// assert_eq!(m[(0, 1)], 2.0);
    /// assert_eq!(m[(1, 0)], 3.0);
    /// ```
    pub fn from_column_major(
        nrows: usize,
        ncols: usize,
        data: Vec<T>,
    ) -> Result<Self, MatrixError> {
        Self::with_layout(nrows, ncols, data, MatrixLayout::ColumnMajor)
    }

    /// Wrap a buffer stored with the given layout.
    pub fn with_layout(
        nrows: usize,
        ncols: usize,
        data: Vec<T>,
        layout: MatrixLayout,
    ) -> Result<Self, MatrixError> {
        if data.len() != nrows * ncols {
            return Err(MatrixError::InvalidDimension {
                operation: "construct matrix",
                mismatch: DimensionMismatch::BufferLength {
                    expected: nrows * ncols,
                    got: data.len(),
                },
            });
        }
        Ok(Self {
            data,
            nrows,
            ncols,
            layout,
        })
    }

    /// Create an `nrows x ncols` matrix of zeros.
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self {
            data: vec![T::zero(); nrows * ncols],
            nrows,
            ncols,
            layout: MatrixLayout::RowMajor,
        }
    }

    /// Create an `n x n` identity matrix.
    ///
    /// ```
    /// use eigenspan::DenseMatrix;
    /// let id = DenseMatrix::<f64>::identity(3);
    /// assert_eq!(id[(1, 1)], 1.0);
    /// assert_eq!(id[(1, 2)], 0.0);
    /// ```
    pub fn identity(n: usize) -> Self {
        let mut data = vec![T::zero(); n * n];
        for i in 0..n {
            data[i * n + i] = T::one();
        }
        Self {
            data,
            nrows: n,
            ncols: n,
            layout: MatrixLayout::RowMajor,
        }
    }

    /// Create a matrix by calling `f(row, col)` for each element.
    pub fn from_fn(nrows: usize, ncols: usize, f: impl Fn(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(nrows * ncols);
        for i in 0..nrows {
            for j in 0..ncols {
                data.push(f(i, j));
            }
        }
        Self {
            data,
            nrows,
            ncols,
            layout: MatrixLayout::RowMajor,
        }
    }
}

impl<T> DenseMatrix<T> {
    /// Number of rows.
    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Number of columns.
    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Whether the matrix is square.
    #[inline]
    pub fn is_square(&self) -> bool {
        self.nrows == self.ncols
    }

    /// Physical layout of the backing buffer.
    #[inline]
    pub fn layout(&self) -> MatrixLayout {
        self.layout
    }

    /// Read-only view of the backing buffer, in [`layout`](Self::layout) order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.nrows && col < self.ncols,
            "index ({}, {}) out of bounds for {}x{} matrix",
            row,
            col,
            self.nrows,
            self.ncols,
        );
        self.layout.offset(self.nrows, self.ncols, row, col)
    }
}

impl<T: Scalar> DenseMatrix<T> {
    /// Copy of the backing data laid out as requested.
    ///
    /// This is the defensive copy handed to kernels that overwrite their
    /// input in place.
    pub fn to_vec_in(&self, layout: MatrixLayout) -> Vec<T> {
        if layout == self.layout {
            return self.data.clone();
        }
        let mut out = Vec::with_capacity(self.data.len());
        match layout {
            MatrixLayout::RowMajor => {
                for i in 0..self.nrows {
                    for j in 0..self.ncols {
                        out.push(self[(i, j)]);
                    }
                }
            }
            MatrixLayout::ColumnMajor => {
                for j in 0..self.ncols {
                    for i in 0..self.nrows {
                        out.push(self[(i, j)]);
                    }
                }
            }
        }
        out
    }

    /// Same logical matrix, physically relaid out.
    ///
    /// ```
    /// use eigenspan::{DenseMatrix, MatrixLayout};
    /// let a = DenseMatrix::from_vec(2, 2, vec![1, 2, 3, 4]).unwrap();
    /// let c = a.to_layout(MatrixLayout::ColumnMajor);
    /// assert_eq!(c.as_slice(), &[1, 3, 2, 4]);
    /// assert_eq!(c, a);
    /// ```
    pub fn to_layout(&self, layout: MatrixLayout) -> Self {
        Self {
            data: self.to_vec_in(layout),
            nrows: self.nrows,
            ncols: self.ncols,
            layout,
        }
    }

    /// Contiguous copy of row `i`.
    pub fn row(&self, i: usize) -> Vec<T> {
        (0..self.ncols).map(|j| self[(i, j)]).collect()
    }

    /// Contiguous copy of logical column `k`, whatever the physical layout.
    ///
    /// ```
    /// use eigenspan::DenseMatrix;
    /// let a = DenseMatrix::from_vec(3, 3, vec![4.0, 2.0, 1.0, 2.0, 5.0, 3.0, 1.0, 3.0, 6.0]).unwrap();
    /// assert_eq!(a.column(1), vec![2.0, 5.0, 3.0]);
    /// ```
    pub fn column(&self, k: usize) -> Vec<T> {
        (0..self.nrows).map(|i| self[(i, k)]).collect()
    }
}

// ── MatrixRef ───────────────────────────────────────────────────────

impl<T> MatrixRef<T> for DenseMatrix<T> {
    #[inline]
    fn nrows(&self) -> usize {
        self.nrows
    }

    #[inline]
    fn ncols(&self) -> usize {
        self.ncols
    }

    #[inline]
    fn get(&self, row: usize, col: usize) -> &T {
        &self.data[self.offset(row, col)]
    }
}

// ── Index ───────────────────────────────────────────────────────────

impl<T> Index<(usize, usize)> for DenseMatrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        &self.data[self.offset(row, col)]
    }
}

/// Logical equality: same dimensions and same entries, layout ignored.
impl<T: PartialEq> PartialEq for DenseMatrix<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.nrows != other.nrows || self.ncols != other.ncols {
            return false;
        }
        if self.layout == other.layout {
            return self.data == other.data;
        }
        (0..self.nrows).all(|i| (0..self.ncols).all(|j| self[(i, j)] == other[(i, j)]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeros() {
        let m = DenseMatrix::<f64>::zeros(3, 4);
        assert_eq!(m.nrows(), 3);
        assert_eq!(m.ncols(), 4);
        for i in 0..3 {
            for j in 0..4 {
                assert_eq!(m[(i, j)], 0.0);
            }
        }
    }

    #[test]
    fn identity() {
        let m = DenseMatrix::<f64>::identity(3);
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_eq!(m[(i, j)], expected);
            }
        }
    }

    #[test]
    fn from_vec_wrong_length() {
        let err = DenseMatrix::from_vec(2, 2, vec![1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(
            err,
            MatrixError::InvalidDimension {
                operation: "construct matrix",
                mismatch: DimensionMismatch::BufferLength { expected: 4, got: 3 },
            }
        );
    }

    #[test]
    fn column_major_indexing() {
        let m = DenseMatrix::from_column_major(2, 3, vec![1, 4, 2, 5, 3, 6]).unwrap();
        assert_eq!(m.row(0), vec![1, 2, 3]);
        assert_eq!(m.row(1), vec![4, 5, 6]);
        assert_eq!(m.column(2), vec![3, 6]);
        assert_eq!(*m.get(1, 0), 4);
    }

    #[test]
    fn relayout_round_trip() {
        let a = DenseMatrix::from_fn(3, 2, |i, j| (i * 2 + j) as f64);
        let c = a.to_layout(MatrixLayout::ColumnMajor);
        assert_eq!(c.as_slice(), &[0.0, 2.0, 4.0, 1.0, 3.0, 5.0]);
        let r = c.to_layout(MatrixLayout::RowMajor);
        assert_eq!(r.as_slice(), a.as_slice());
        assert_eq!(c, a);
    }

    #[test]
    fn equality_respects_dimensions() {
        let a = DenseMatrix::from_vec(2, 3, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let b = DenseMatrix::from_vec(3, 2, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn index_out_of_bounds() {
        let m = DenseMatrix::<f64>::zeros(2, 2);
        let _ = m[(2, 0)];
    }
}
