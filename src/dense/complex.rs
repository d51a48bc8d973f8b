use alloc::vec;
use alloc::vec::Vec;
use core::iter::FusedIterator;

use num_complex::Complex;

use crate::linalg::{DimensionMismatch, MatrixError};

use super::{DenseMatrix, MatrixLayout};

/// Complex vector stored as two parallel real buffers.
///
/// Element `i` is `re[i] + i·im[i]`. Both buffers always have the same
/// length.
///
/// ```
/// use eigenspan::SplitComplexArray;
/// use num_complex::Complex;
///
/// let z = SplitComplexArray::new(vec![1.0, 2.0], vec![0.5, -1.0]).unwrap();
/// assert_eq!(z.get(1), Complex::new(2.0, -1.0));
/// assert_eq!(z.conj().get(1), Complex::new(2.0, 1.0));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SplitComplexArray {
    re: Vec<f64>,
    im: Vec<f64>,
}

impl SplitComplexArray {
    /// Pair a real-part and an imaginary-part buffer.
    pub fn new(re: Vec<f64>, im: Vec<f64>) -> Result<Self, MatrixError> {
        if re.len() != im.len() {
            return Err(MatrixError::InvalidDimension {
                operation: "split complex array",
                mismatch: DimensionMismatch::BufferLength {
                    expected: re.len(),
                    got: im.len(),
                },
            });
        }
        Ok(Self { re, im })
    }

    /// `len` zeros.
    pub fn zeros(len: usize) -> Self {
        Self {
            re: vec![0.0; len],
            im: vec![0.0; len],
        }
    }

    /// Purely real array.
    pub fn from_real(re: Vec<f64>) -> Self {
        let im = vec![0.0; re.len()];
        Self { re, im }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.re.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.re.is_empty()
    }

    #[inline]
    pub fn get(&self, i: usize) -> Complex<f64> {
        Complex::new(self.re[i], self.im[i])
    }

    /// Real parts.
    #[inline]
    pub fn real(&self) -> &[f64] {
        &self.re
    }

    /// Imaginary parts.
    #[inline]
    pub fn imag(&self) -> &[f64] {
        &self.im
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter { array: self, pos: 0 }
    }

    /// Element-wise complex conjugate.
    pub fn conj(&self) -> Self {
        Self {
            re: self.re.clone(),
            im: self.im.iter().map(|&v| -v).collect(),
        }
    }

    /// Every `stride`-th element starting at `offset`.
    ///
    /// ```
    /// use eigenspan::SplitComplexArray;
    /// let z = SplitComplexArray::from_real(vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
    /// assert_eq!(z.take_samples(3, 1).real(), &[1.0, 4.0]);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `stride` is zero. An `offset` past the end yields an
    /// empty array.
    pub fn take_samples(&self, stride: usize, offset: usize) -> Self {
        assert!(stride > 0, "stride must be positive");
        Self {
            re: self.re.iter().skip(offset).step_by(stride).copied().collect(),
            im: self.im.iter().skip(offset).step_by(stride).copied().collect(),
        }
    }
}

impl FromIterator<Complex<f64>> for SplitComplexArray {
    fn from_iter<I: IntoIterator<Item = Complex<f64>>>(iter: I) -> Self {
        let (re, im) = iter.into_iter().map(|z| (z.re, z.im)).unzip();
        Self { re, im }
    }
}

/// Iterator over the elements of a [`SplitComplexArray`].
pub struct Iter<'a> {
    array: &'a SplitComplexArray,
    pos: usize,
}

impl Iterator for Iter<'_> {
    type Item = Complex<f64>;

    fn next(&mut self) -> Option<Complex<f64>> {
        if self.pos < self.array.len() {
            let z = self.array.get(self.pos);
            self.pos += 1;
            Some(z)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.array.len() - self.pos;
        (rest, Some(rest))
    }
}

impl ExactSizeIterator for Iter<'_> {}
impl FusedIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a SplitComplexArray {
    type Item = Complex<f64>;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// Dense complex matrix in split (real buffer, imaginary buffer) form.
///
/// Row-major, `nrows * ncols` entries in each buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseComplexMatrix {
    values: SplitComplexArray,
    nrows: usize,
    ncols: usize,
}

impl DenseComplexMatrix {
    /// Wrap row-major split storage.
    pub fn new(values: SplitComplexArray, nrows: usize, ncols: usize) -> Result<Self, MatrixError> {
        if values.len() != nrows * ncols {
            return Err(MatrixError::InvalidDimension {
                operation: "construct complex matrix",
                mismatch: DimensionMismatch::BufferLength {
                    expected: nrows * ncols,
                    got: values.len(),
                },
            });
        }
        Ok(Self {
            values,
            nrows,
            ncols,
        })
    }

    /// Promote a real matrix (imaginary part zero).
    pub fn from_real(m: &DenseMatrix<f64>) -> Self {
        Self {
            values: SplitComplexArray::from_real(m.to_vec_in(MatrixLayout::RowMajor)),
            nrows: m.nrows(),
            ncols: m.ncols(),
        }
    }

    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Always [`MatrixLayout::RowMajor`].
    #[inline]
    pub fn layout(&self) -> MatrixLayout {
        MatrixLayout::RowMajor
    }

    /// Row-major backing storage.
    #[inline]
    pub fn values(&self) -> &SplitComplexArray {
        &self.values
    }

    /// Entry `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Complex<f64> {
        assert!(
            row < self.nrows && col < self.ncols,
            "index ({}, {}) out of bounds for {}x{} matrix",
            row,
            col,
            self.nrows,
            self.ncols,
        );
        self.values.get(row * self.ncols + col)
    }

    /// Copy of row `i`.
    pub fn row(&self, i: usize) -> SplitComplexArray {
        (0..self.ncols).map(|j| self.get(i, j)).collect()
    }

    /// Copy of column `k`.
    pub fn column(&self, k: usize) -> SplitComplexArray {
        assert!(k < self.ncols, "column {} out of bounds", k);
        self.values.take_samples(self.ncols, k)
    }

    /// Plain (non-conjugating) transpose into new storage.
    pub fn transpose(&self) -> Self {
        let mut re = Vec::with_capacity(self.values.len());
        let mut im = Vec::with_capacity(self.values.len());
        for j in 0..self.ncols {
            for i in 0..self.nrows {
                let z = self.get(i, j);
                re.push(z.re);
                im.push(z.im);
            }
        }
        Self {
            values: SplitComplexArray { re, im },
            nrows: self.ncols,
            ncols: self.nrows,
        }
    }

    /// Matrix product `self * rhs`.
    ///
    /// Fails with `InvalidDimension` when `self.ncols() != rhs.nrows()`.
    pub fn multiply(&self, rhs: &DenseComplexMatrix) -> Result<DenseComplexMatrix, MatrixError> {
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
        let mut out = vec![Complex::new(0.0, 0.0); m * n];
        for i in 0..m {
            for p in 0..k {
                let aip = self.get(i, p);
                for j in 0..n {
                    out[i * n + j] += aip * rhs.get(p, j);
                }
            }
        }
        Ok(Self {
            values: out.into_iter().collect(),
            nrows: m,
            ncols: n,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: f64, im: f64) -> Complex<f64> {
        Complex::new(re, im)
    }

    #[test]
    fn split_mismatched_lengths() {
        assert!(SplitComplexArray::new(vec![1.0, 2.0], vec![0.0]).is_err());
    }

    #[test]
    fn take_samples_offsets() {
        let z: SplitComplexArray = (0..7).map(|k| c(k as f64, -(k as f64))).collect();
        let s = z.take_samples(3, 0);
        assert_eq!(s.real(), &[0.0, 3.0, 6.0]);
        assert_eq!(s.imag(), &[0.0, -3.0, -6.0]);
        assert!(z.take_samples(2, 9).is_empty());
    }

    #[test]
    #[should_panic(expected = "stride must be positive")]
    fn take_samples_zero_stride_panics() {
        let z = SplitComplexArray::from_real(vec![1.0, 2.0]);
        let _ = z.take_samples(0, 0);
    }

    #[test]
    fn column_extraction() {
        let m = DenseComplexMatrix::new(
            vec![c(1.0, 1.0), c(2.0, 0.0), c(3.0, -1.0), c(4.0, 2.0)]
                .into_iter()
                .collect(),
            2,
            2,
        )
        .unwrap();
        let col = m.column(1);
        assert_eq!(col.len(), 2);
        assert_eq!(col.get(0), c(2.0, 0.0));
        assert_eq!(col.get(1), c(4.0, 2.0));
        assert_eq!(m.row(1).get(0), c(3.0, -1.0));
    }

    #[test]
    fn complex_multiply() {
        // [[i, 1]] * [[1], [i]] = [[2i]]
        let a = DenseComplexMatrix::new(vec![c(0.0, 1.0), c(1.0, 0.0)].into_iter().collect(), 1, 2)
            .unwrap();
        let b = a.transpose();
        let b = DenseComplexMatrix::new(
            vec![b.get(1, 0), b.get(0, 0)].into_iter().collect(),
            2,
            1,
        )
        .unwrap();
        let p = a.multiply(&b).unwrap();
        assert_eq!(p.get(0, 0), c(0.0, 2.0));
        assert!(a.multiply(&a).is_err());
    }

    #[test]
    fn from_real_matrix() {
        let r = DenseMatrix::from_column_major(2, 2, vec![1.0, 3.0, 2.0, 4.0]).unwrap();
        let z = DenseComplexMatrix::from_real(&r);
        assert_eq!(z.get(0, 1), c(2.0, 0.0));
        assert_eq!(z.get(1, 0), c(3.0, 0.0));
    }
}
