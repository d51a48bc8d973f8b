pub(crate) mod eigen;
pub(crate) mod hessenberg;
pub(crate) mod householder;
pub(crate) mod schur;

pub use eigen::{ComplexEigenvectorDecomposition, EigenvectorDecomposition};
pub use hessenberg::HessenbergDecomposition;
pub use householder::HouseholderDecomposition;
pub use schur::{compute_eigenvectors_from_schur, SchurBlock, COMPLEX_PAIR_THRESHOLD};

use core::fmt;

/// Tuning knobs for the iterative eigenvalue kernels.
///
/// ```
/// use eigenspan::{DenseMatrix, EigenParams};
///
/// let a = DenseMatrix::from_vec(2, 2, vec![2.0, 1.0, 1.0, 2.0]).unwrap();
/// let params = EigenParams { iterations_per_eigenvalue: 60 };
/// let eig = a.tridiagonalize().unwrap().eigenvector_decomposition_with(&params).unwrap();
/// assert!((eig.eigenvalues()[0] - 1.0).abs() < 1e-14);
/// assert!((eig.eigenvalues()[1] - 3.0).abs() < 1e-14);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EigenParams {
    /// QR sweeps allowed per eigenvalue before reporting non-convergence.
    pub iterations_per_eigenvalue: usize,
}

impl Default for EigenParams {
    fn default() -> Self {
        Self {
            iterations_per_eigenvalue: 30,
        }
    }
}

/// Shape problem behind an [`MatrixError::InvalidDimension`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionMismatch {
    /// A square matrix was required.
    NotSquare { rows: usize, cols: usize },
    /// Operand shapes do not line up (`lhs.1 != rhs.0` for a product).
    Incompatible {
        lhs: (usize, usize),
        rhs: (usize, usize),
    },
    /// A buffer did not have the length its shape implies.
    BufferLength { expected: usize, got: usize },
}

impl fmt::Display for DimensionMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            DimensionMismatch::NotSquare { rows, cols } => {
                write!(f, "expected a square matrix, got {}x{}", rows, cols)
            }
            DimensionMismatch::Incompatible { lhs, rhs } => write!(
                f,
                "incompatible shapes {}x{} and {}x{}",
                lhs.0, lhs.1, rhs.0, rhs.1
            ),
            DimensionMismatch::BufferLength { expected, got } => {
                write!(f, "expected {} elements, got {}", expected, got)
            }
        }
    }
}

/// What a kernel status code reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LapackFailure {
    /// Negative status: the argument at this 1-based position was illegal.
    /// A contract violation inside this crate, never caused by input values.
    IllegalArgument(usize),
    /// Positive status: the iteration did not converge. The index is
    /// routine specific (see the decomposition docs).
    NoConvergence(usize),
}

/// A kernel reported a nonzero status.
///
/// ```
/// use eigenspan::{LapackError, LapackFailure};
///
/// let err = LapackError::from_status("hseqr", 3);
/// assert_eq!(err.failure, LapackFailure::NoConvergence(3));
/// assert_eq!(err.to_string(), "hseqr failed to converge (status 3)");
///
/// let err = LapackError::from_status("gehrd", -4);
/// assert_eq!(err.failure, LapackFailure::IllegalArgument(4));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LapackError {
    pub routine: &'static str,
    pub failure: LapackFailure,
}

impl LapackError {
    /// Classify a nonzero status code.
    pub fn from_status(routine: &'static str, status: i32) -> Self {
        let failure = if status < 0 {
            LapackFailure::IllegalArgument(status.unsigned_abs() as usize)
        } else {
            LapackFailure::NoConvergence(status as usize)
        };
        Self { routine, failure }
    }
}

impl fmt::Display for LapackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.failure {
            LapackFailure::IllegalArgument(k) => {
                write!(f, "{}: illegal value in argument {}", self.routine, k)
            }
            LapackFailure::NoConvergence(k) => {
                write!(f, "{} failed to converge (status {})", self.routine, k)
            }
        }
    }
}

/// Errors from matrix construction, arithmetic and decompositions.
///
/// ```
/// use eigenspan::{DenseMatrix, DimensionMismatch, MatrixError};
///
/// let a = DenseMatrix::<f64>::zeros(3, 2);
/// assert_eq!(
///     a.tridiagonalize().unwrap_err(),
///     MatrixError::InvalidDimension {
///         operation: "tridiagonalize",
///         mismatch: DimensionMismatch::NotSquare { rows: 3, cols: 2 },
///     }
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixError {
    /// Caller supplied inputs of the wrong shape.
    InvalidDimension {
        operation: &'static str,
        mismatch: DimensionMismatch,
    },
    /// A numerical kernel failed.
    Lapack(LapackError),
}

impl From<LapackError> for MatrixError {
    fn from(err: LapackError) -> Self {
        MatrixError::Lapack(err)
    }
}

impl fmt::Display for MatrixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixError::InvalidDimension {
                operation,
                mismatch,
            } => write!(f, "{}: invalid dimension: {}", operation, mismatch),
            MatrixError::Lapack(err) => err.fmt(f),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LapackError {}

#[cfg(feature = "std")]
impl std::error::Error for MatrixError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MatrixError::Lapack(err) => Some(err),
            MatrixError::InvalidDimension { .. } => None,
        }
    }
}

/// Shorthand for the square-input check every decomposition starts with.
pub(crate) fn require_square(
    operation: &'static str,
    nrows: usize,
    ncols: usize,
) -> Result<(), MatrixError> {
    if nrows != ncols {
        return Err(MatrixError::InvalidDimension {
            operation,
            mismatch: DimensionMismatch::NotSquare {
                rows: nrows,
                cols: ncols,
            },
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn failure_causes_are_distinguishable() {
        let illegal = MatrixError::from(LapackError::from_status("trevc", -7)).to_string();
        let stalled = MatrixError::from(LapackError::from_status("trevc", 7)).to_string();
        assert!(illegal.contains("illegal value in argument 7"));
        assert!(stalled.contains("failed to converge"));
        assert_ne!(illegal, stalled);
    }

    #[test]
    fn invalid_dimension_message() {
        let err = MatrixError::InvalidDimension {
            operation: "multiply",
            mismatch: DimensionMismatch::Incompatible {
                lhs: (3, 2),
                rhs: (3, 3),
            },
        };
        assert_eq!(
            err.to_string(),
            "multiply: invalid dimension: incompatible shapes 3x2 and 3x3"
        );
    }

    #[test]
    fn require_square_rejects() {
        assert!(require_square("op", 2, 2).is_ok());
        assert!(matches!(
            require_square("op", 2, 3),
            Err(MatrixError::InvalidDimension {
                mismatch: DimensionMismatch::NotSquare { rows: 2, cols: 3 },
                ..
            })
        ));
    }

    #[test]
    fn default_params() {
        assert_eq!(EigenParams::default().iterations_per_eigenvalue, 30);
    }
}
