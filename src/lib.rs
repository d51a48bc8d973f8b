//! # eigenspan
//!
//! Dense real eigen-decomposition in pure Rust, no-std compatible (with
//! `alloc`). Householder reduction to tridiagonal or Hessenberg form,
//! Francis double-shift QR to real Schur form, and eigenvector
//! reconstruction including complex-conjugate pairs.
//!
//! ## Quick start
//!
//! ```
//! use eigenspan::DenseMatrix;
//!
//! // Symmetric path: real eigenvalues, ascending.
//! let a = DenseMatrix::from_vec(3, 3, vec![
//!     2.0, 1.0, 0.0,
//!     1.0, 2.0, 0.0,
//!     0.0, 0.0, 5.0,
//! ]).unwrap();
//! let eig = a.tridiagonalize().unwrap().eigenvector_decomposition().unwrap();
//! assert!((eig.eigenvalues()[0] - 1.0).abs() < 1e-12);
//! assert!((eig.eigenvalues()[2] - 5.0).abs() < 1e-12);
//!
//! // General path: complex eigenvalues come in conjugate pairs.
//! let b = DenseMatrix::from_vec(2, 2, vec![1.0, -2.0, 2.0, 1.0]).unwrap();
//! let eig = b.hessenberg_reduce().unwrap().eigenvector_decomposition().unwrap();
//! let w = eig.eigenvalues();
//! assert!((w.get(0).re - 1.0).abs() < 1e-12);
//! assert!((w.get(0).im - 2.0).abs() < 1e-12);
//! assert_eq!(w.get(1), w.get(0).conj());
//! ```
//!
//! ## Modules
//!
//! - [`dense`] — `DenseMatrix<T>` with a layout tag (row-major by default),
//!   plus split real/imaginary `SplitComplexArray` and `DenseComplexMatrix`.
//!   Indexing always resolves through the matrix's own layout.
//!
//! - [`linalg`] — the decompositions:
//!   - [`DenseMatrix::tridiagonalize`] → [`HouseholderDecomposition`]
//!     (`A = Q T Q^T`), whose `eigenvector_decomposition()` yields an
//!     [`EigenvectorDecomposition`];
//!   - [`DenseMatrix::hessenberg_reduce`] → [`HessenbergDecomposition`]
//!     (`A = P H P^T`), whose `eigenvector_decomposition()` yields a
//!     [`ComplexEigenvectorDecomposition`];
//!   - [`compute_eigenvectors_from_schur`] for a real Schur form computed
//!     elsewhere.
//!
//! - [`traits`] — [`Scalar`] and the [`MatrixRef`] / [`MatrixMut`] access
//!   traits shared by the numerical kernels.
//!
//! Every decomposition returns its matrices in row-major storage.
//!
//! ## Logging
//!
//! Diagnostics go through the [`log`](https://docs.rs/log) facade under
//! `eigenspan::*` targets: workspace sizes at `debug`, QR deflation
//! progress at `trace`, kernel failures at `warn`. No logger is installed.
//!
//! ## Cargo features
//!
//! | Feature | Default  | Description |
//! |---------|----------|-------------|
//! | `std`   | yes      | Hardware FPU via system libm, `std::error::Error` impls |
//! | (none)  | baseline | `no_std` + `alloc`, pure-Rust `libm` float fallback |

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod dense;
pub(crate) mod kernels;
pub mod linalg;
pub mod traits;

pub use dense::{DenseComplexMatrix, DenseMatrix, MatrixLayout, SplitComplexArray};
pub use linalg::{
    compute_eigenvectors_from_schur, ComplexEigenvectorDecomposition, DimensionMismatch,
    EigenParams, EigenvectorDecomposition, HessenbergDecomposition, HouseholderDecomposition,
    LapackError, LapackFailure, MatrixError, SchurBlock, COMPLEX_PAIR_THRESHOLD,
};
pub use traits::{MatrixMut, MatrixRef, Scalar};

pub use num_complex::Complex;
