//! Error types for state tomography

use thiserror::Error;

/// Errors raised by the tomography core
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TomographyError {
    /// Basis label outside {X, Y, Z}
    #[error("Invalid Pauli basis label '{label}', expected one of X, Y, Z")]
    InvalidBasis { label: String },

    /// Measurement outcome outside {+1, -1}
    #[error("Invalid measurement outcome {value}, expected +1 or -1")]
    InvalidOutcome { value: i64 },

    /// Sampled state vector has (numerically) zero norm
    #[error("Degenerate state vector with norm {norm:e}")]
    DegenerateState { norm: f64 },

    /// A computation produced a result that is not a valid quantum state
    #[error("Numerical instability: {0}")]
    NumericalInstability(InstabilityKind),

    /// Born-rule probability left [0, 1] by more than the tolerance
    #[error("Born-rule probability {probability} outside [0, 1]")]
    ProbabilityRange { probability: f64 },
}

/// What went wrong when a [`TomographyError::NumericalInstability`] is raised
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InstabilityKind {
    /// Reconstruction parameters contain NaN or infinity
    #[error("non-finite reconstruction parameters {parameters:?}")]
    NonFiniteParameters { parameters: [f64; 4] },

    /// Normalization trace vanished or is not finite
    #[error("normalization trace {trace:e} is not strictly positive")]
    VanishingTrace { trace: f64 },

    /// Matrix is not Hermitian within tolerance
    #[error("matrix is not Hermitian (defect {defect:e})")]
    NotHermitian { defect: f64 },

    /// Trace differs from one by more than the tolerance
    #[error("trace {trace} is not unit")]
    TraceNotUnit { trace: f64 },

    /// Eigenvalue below the negative tolerance
    #[error("eigenvalue {eigenvalue:e} is negative")]
    NegativeEigenvalue { eigenvalue: f64 },

    /// Eigenvalue is NaN or infinite
    #[error("eigenvalue is not finite")]
    NonFiniteEigenvalue,

    /// Fidelity trace carries an imaginary part above tolerance
    #[error("fidelity trace has imaginary part {imaginary:e}")]
    ComplexFidelity { imaginary: f64 },

    /// Fidelity above one by more than the tolerance
    #[error("fidelity {fidelity} exceeds 1")]
    FidelityOutOfRange { fidelity: f64 },
}

impl TomographyError {
    /// Create an invalid basis error
    pub fn invalid_basis(label: impl Into<String>) -> Self {
        Self::InvalidBasis {
            label: label.into(),
        }
    }

    /// Create a numerical instability error
    pub fn instability(kind: InstabilityKind) -> Self {
        Self::NumericalInstability(kind)
    }
}

/// Result type for tomography operations
pub type Result<T> = std::result::Result<T, TomographyError>;
