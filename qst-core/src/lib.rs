//! Core types for single-qubit quantum state tomography
//!
//! This crate provides the value types shared by the tomography pipeline:
//! - [`DensityMatrix`]: validated Hermitian, PSD, unit-trace 2x2 matrix
//! - [`PauliBasis`] / [`MeasurementOutcome`]: measurement axes and eigenvalues
//! - [`MeasurementRecord`]: ordered (basis, outcome) shots
//! - [`linalg`]: closed-form Hermitian eigendecomposition and matrix square root
//! - [`Tolerances`]: numerical tolerances used throughout
//!
//! # Example
//! ```
//! use qst_core::{linalg, matrix, DensityMatrix};
//!
//! let rho = DensityMatrix::maximally_mixed();
//! let root = linalg::hermitian_sqrt(rho.matrix());
//! let squared = matrix::multiply(&root, &root);
//! assert!(matrix::approx_eq(&squared, rho.matrix(), 1e-12));
//! ```

pub mod config;
pub mod density_matrix;
pub mod error;
pub mod linalg;
pub mod matrix;
pub mod pauli;
pub mod record;

// Re-exports for convenience
pub use config::Tolerances;
pub use density_matrix::DensityMatrix;
pub use error::{InstabilityKind, Result, TomographyError};
pub use linalg::{checked_hermitian_sqrt, hermitian_sqrt, hermitian_sqrt_batch, HermitianEigen};
pub use matrix::Matrix2;
pub use num_complex::Complex64;
pub use pauli::{MeasurementOutcome, PauliBasis};
pub use record::{Measurement, MeasurementRecord};
