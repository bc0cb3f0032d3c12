//! Validated single-qubit density matrix
//!
//! A density matrix ρ is a Hermitian, positive semi-definite 2x2 matrix with
//! Tr(ρ) = 1. Every [`DensityMatrix`] is checked against these invariants when
//! it is built, so downstream code can rely on them without re-checking.
//!
//! # Bloch representation
//!
//! Any single-qubit state can be written ρ = (I + xX + yY + zZ)/2 with
//! `|(x, y, z)| ≤ 1`; pure states lie on the unit sphere, the maximally mixed
//! state I/2 at the origin.
//!
//! # Example
//!
//! ```
//! use qst_core::{DensityMatrix, PauliBasis};
//!
//! let zero = DensityMatrix::zero();
//! assert_eq!(zero.expectation(PauliBasis::Z), 1.0);
//! assert!((zero.purity() - 1.0).abs() < 1e-12);
//!
//! let mixed = DensityMatrix::maximally_mixed();
//! assert!((mixed.purity() - 0.5).abs() < 1e-12);
//! ```

use crate::config::Tolerances;
use crate::error::{InstabilityKind, Result, TomographyError};
use crate::linalg::hermitian_eigenvalues;
use crate::matrix::{self, Matrix2};
use crate::pauli::{PauliBasis, PAULI_X, PAULI_Y, PAULI_Z};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::fmt;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const HALF: Complex64 = Complex64::new(0.5, 0.0);

/// Density matrix of one qubit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[[f64; 2]; 4]", into = "[[f64; 2]; 4]")]
pub struct DensityMatrix {
    matrix: Matrix2,
}

impl DensityMatrix {
    /// Validate a matrix with the default tolerance
    ///
    /// # Errors
    /// Returns [`TomographyError::NumericalInstability`] if the matrix is not
    /// Hermitian, does not have unit trace, or has an eigenvalue below the
    /// negative tolerance.
    pub fn new(matrix: Matrix2) -> Result<Self> {
        Self::with_tolerance(matrix, Tolerances::default().validity)
    }

    /// Validate a matrix with an explicit tolerance
    pub fn with_tolerance(matrix: Matrix2, tolerance: f64) -> Result<Self> {
        validate(&matrix, tolerance)?;
        Ok(Self { matrix })
    }

    /// Pure state ρ = |ψ⟩⟨ψ| from normalized amplitudes
    pub fn from_state_vector(amplitudes: [Complex64; 2]) -> Result<Self> {
        let mut matrix = [[ZERO; 2]; 2];
        for i in 0..2 {
            for j in 0..2 {
                matrix[i][j] = amplitudes[i] * amplitudes[j].conj();
            }
        }
        Self::new(matrix)
    }

    /// State with Bloch vector `r`, ρ = (I + r·σ)/2
    ///
    /// # Errors
    /// Fails with a negative eigenvalue if `|r|` exceeds one by more than the
    /// default tolerance.
    pub fn from_bloch_vector(r: [f64; 3]) -> Result<Self> {
        let mut matrix = [[HALF, ZERO], [ZERO, HALF]];
        for (component, pauli) in r.iter().zip([&PAULI_X, &PAULI_Y, &PAULI_Z]) {
            for i in 0..2 {
                for j in 0..2 {
                    matrix[i][j] += pauli[i][j] * (0.5 * component);
                }
            }
        }
        Self::new(matrix)
    }

    /// Computational basis state |0⟩⟨0|
    pub fn zero() -> Self {
        Self {
            matrix: [[ONE, ZERO], [ZERO, ZERO]],
        }
    }

    /// Computational basis state |1⟩⟨1|
    pub fn one() -> Self {
        Self {
            matrix: [[ZERO, ZERO], [ZERO, ONE]],
        }
    }

    /// Maximally mixed state I/2
    pub fn maximally_mixed() -> Self {
        Self {
            matrix: [[HALF, ZERO], [ZERO, HALF]],
        }
    }

    /// Underlying row-major matrix
    #[inline]
    pub fn matrix(&self) -> &Matrix2 {
        &self.matrix
    }

    /// Matrix element ρᵢⱼ
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Complex64 {
        self.matrix[row][col]
    }

    /// Real part of Tr(ρ)
    pub fn trace(&self) -> f64 {
        matrix::trace(&self.matrix).re
    }

    /// Purity Tr(ρ²), 1 for pure states and 1/2 for I/2
    pub fn purity(&self) -> f64 {
        matrix::trace(&matrix::multiply(&self.matrix, &self.matrix)).re
    }

    /// Eigenvalues in ascending order
    pub fn eigenvalues(&self) -> [f64; 2] {
        hermitian_eigenvalues(&self.matrix)
    }

    /// Expectation value Re Tr(ρP) of a Pauli operator
    pub fn expectation(&self, basis: PauliBasis) -> f64 {
        matrix::trace(&matrix::multiply(&self.matrix, basis.matrix())).re
    }

    /// Bloch vector (⟨X⟩, ⟨Y⟩, ⟨Z⟩)
    pub fn bloch_vector(&self) -> [f64; 3] {
        [
            self.expectation(PauliBasis::X),
            self.expectation(PauliBasis::Y),
            self.expectation(PauliBasis::Z),
        ]
    }

    /// Row-major elements as (re, im) pairs
    pub fn to_pairs(&self) -> [[f64; 2]; 4] {
        matrix::to_row_major(&self.matrix).map(|z| [z.re, z.im])
    }
}

/// Check the density matrix invariants for an arbitrary matrix
pub fn validate(matrix: &Matrix2, tolerance: f64) -> Result<()> {
    let defect = matrix::hermiticity_defect(matrix);
    if !(defect <= tolerance) {
        return Err(TomographyError::instability(InstabilityKind::NotHermitian {
            defect,
        }));
    }

    let trace = matrix::trace(matrix).re;
    if !((trace - 1.0).abs() <= tolerance) {
        return Err(TomographyError::instability(InstabilityKind::TraceNotUnit {
            trace,
        }));
    }

    let [min, _] = hermitian_eigenvalues(matrix);
    if !min.is_finite() {
        return Err(TomographyError::instability(
            InstabilityKind::NonFiniteEigenvalue,
        ));
    }
    if min < -tolerance {
        return Err(TomographyError::instability(
            InstabilityKind::NegativeEigenvalue { eigenvalue: min },
        ));
    }

    Ok(())
}

impl TryFrom<[[f64; 2]; 4]> for DensityMatrix {
    type Error = TomographyError;

    fn try_from(pairs: [[f64; 2]; 4]) -> Result<Self> {
        let elems = pairs.map(|[re, im]| Complex64::new(re, im));
        Self::new(matrix::from_row_major(elems))
    }
}

impl From<DensityMatrix> for [[f64; 2]; 4] {
    fn from(rho: DensityMatrix) -> Self {
        rho.to_pairs()
    }
}

impl fmt::Display for DensityMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = &self.matrix;
        writeln!(f, "[[{:.4}, {:.4}],", m[0][0], m[0][1])?;
        write!(f, " [{:.4}, {:.4}]]", m[1][0], m[1][1])
    }
}
