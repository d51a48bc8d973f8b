use core::fmt::Debug;
use num_traits::{Num, One, Zero};

/// Trait for types that can be used as dense matrix elements.
///
/// Blanket-implemented for all types satisfying the bounds.
/// Covers `f32`, `f64`, `Complex<f64>` and all integer types.
pub trait Scalar: Copy + PartialEq + Debug + Zero + One + Num {}

impl<T: Copy + PartialEq + Debug + Zero + One + Num> Scalar for T {}

/// Read-only access to a matrix-like type.
///
/// Indices are always logical `(row, col)`; implementors resolve them
/// through their own storage layout.
pub trait MatrixRef<T> {
    fn nrows(&self) -> usize;
    fn ncols(&self) -> usize;
    fn get(&self, row: usize, col: usize) -> &T;
}

/// Mutable access to a column-major matrix-like type.
///
/// Extends `MatrixRef` with mutable element access and contiguous column
/// slices, enabling the in-place kernels to work generically.
pub trait MatrixMut<T>: MatrixRef<T> {
    fn get_mut(&mut self, row: usize, col: usize) -> &mut T;

    /// Contiguous slice `m[row_start..nrows, col]`.
    fn col_as_slice(&self, col: usize, row_start: usize) -> &[T];

    /// Mutable contiguous slice `m[row_start..nrows, col]`.
    fn col_as_mut_slice(&mut self, col: usize, row_start: usize) -> &mut [T];
}
