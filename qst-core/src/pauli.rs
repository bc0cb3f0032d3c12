//! Pauli measurement bases and outcomes
//!
//! The three single-qubit Pauli operators used as measurement axes:
//! - X: [[0, 1], [1, 0]]
//! - Y: [[0, -i], [i, 0]]
//! - Z: [[1, 0], [0, -1]]
//!
//! Each is Hermitian, traceless and unitary with eigenvalues ±1, so a
//! projective measurement along any of them yields an outcome in {+1, -1}.

use crate::error::{Result, TomographyError};
use crate::matrix::Matrix2;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);
const NEG_I: Complex64 = Complex64::new(0.0, -1.0);
const NEG_ONE: Complex64 = Complex64::new(-1.0, 0.0);

/// Pauli-X matrix
/// X = [[0, 1],
///      [1, 0]]
pub const PAULI_X: Matrix2 = [[ZERO, ONE], [ONE, ZERO]];

/// Pauli-Y matrix
/// Y = [[0, -i],
///      [i,  0]]
pub const PAULI_Y: Matrix2 = [[ZERO, NEG_I], [I, ZERO]];

/// Pauli-Z matrix
/// Z = [[1,  0],
///      [0, -1]]
pub const PAULI_Z: Matrix2 = [[ONE, ZERO], [ZERO, NEG_ONE]];

/// Measurement axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PauliBasis {
    /// Pauli X
    X,
    /// Pauli Y
    Y,
    /// Pauli Z
    Z,
}

impl PauliBasis {
    /// All bases in X, Y, Z order
    pub const ALL: [PauliBasis; 3] = [PauliBasis::X, PauliBasis::Y, PauliBasis::Z];

    /// Operator matrix for this basis
    #[inline]
    pub fn matrix(self) -> &'static Matrix2 {
        match self {
            PauliBasis::X => &PAULI_X,
            PauliBasis::Y => &PAULI_Y,
            PauliBasis::Z => &PAULI_Z,
        }
    }

    /// Position in [`PauliBasis::ALL`]
    #[inline]
    pub fn index(self) -> usize {
        match self {
            PauliBasis::X => 0,
            PauliBasis::Y => 1,
            PauliBasis::Z => 2,
        }
    }

    /// Parse a basis from a character
    pub fn from_char(c: char) -> Result<Self> {
        match c.to_ascii_uppercase() {
            'X' => Ok(PauliBasis::X),
            'Y' => Ok(PauliBasis::Y),
            'Z' => Ok(PauliBasis::Z),
            _ => Err(TomographyError::invalid_basis(c.to_string())),
        }
    }

    /// Parse a basis from its label ("X", "Y" or "Z")
    pub fn from_label(label: &str) -> Result<Self> {
        let mut chars = label.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => Err(TomographyError::invalid_basis(label)),
        }
    }

    /// Label used in the dataset format
    pub fn label(self) -> &'static str {
        match self {
            PauliBasis::X => "X",
            PauliBasis::Y => "Y",
            PauliBasis::Z => "Z",
        }
    }
}

impl fmt::Display for PauliBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PauliBasis {
    type Err = TomographyError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_label(s)
    }
}

impl TryFrom<String> for PauliBasis {
    type Error = TomographyError;

    fn try_from(value: String) -> Result<Self> {
        Self::from_label(&value)
    }
}

impl From<PauliBasis> for String {
    fn from(basis: PauliBasis) -> Self {
        basis.label().to_string()
    }
}

/// Eigenvalue observed by a Pauli measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum MeasurementOutcome {
    /// +1 eigenvalue
    Plus,
    /// -1 eigenvalue
    Minus,
}

impl MeasurementOutcome {
    /// Outcome as a signed eigenvalue
    #[inline]
    pub fn value(self) -> i64 {
        match self {
            MeasurementOutcome::Plus => 1,
            MeasurementOutcome::Minus => -1,
        }
    }

    /// Outcome as a real eigenvalue
    #[inline]
    pub fn as_f64(self) -> f64 {
        self.value() as f64
    }

    /// Check if this is the +1 outcome
    #[inline]
    pub fn is_plus(self) -> bool {
        matches!(self, MeasurementOutcome::Plus)
    }
}

impl TryFrom<i64> for MeasurementOutcome {
    type Error = TomographyError;

    fn try_from(value: i64) -> Result<Self> {
        match value {
            1 => Ok(MeasurementOutcome::Plus),
            -1 => Ok(MeasurementOutcome::Minus),
            _ => Err(TomographyError::InvalidOutcome { value }),
        }
    }
}

impl From<MeasurementOutcome> for i64 {
    fn from(outcome: MeasurementOutcome) -> Self {
        outcome.value()
    }
}

impl fmt::Display for MeasurementOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeasurementOutcome::Plus => f.write_str("+1"),
            MeasurementOutcome::Minus => f.write_str("-1"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{adjoint, approx_eq, multiply, trace, IDENTITY};

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_pauli_operators_hermitian_traceless_unitary() {
        for basis in PauliBasis::ALL {
            let p = basis.matrix();
            assert!(approx_eq(&adjoint(p), p, EPSILON), "{} not Hermitian", basis);
            assert!(trace(p).norm() < EPSILON, "{} not traceless", basis);
            assert!(approx_eq(&multiply(p, &adjoint(p)), &IDENTITY, EPSILON));
        }
    }

    #[test]
    fn test_xy_product_is_iz() {
        // XY = iZ
        let xy = multiply(&PAULI_X, &PAULI_Y);
        let iz = [[I, ZERO], [ZERO, NEG_I]];
        assert!(approx_eq(&xy, &iz, EPSILON));
    }

    #[test]
    fn test_parse_labels() {
        assert_eq!("X".parse::<PauliBasis>().unwrap(), PauliBasis::X);
        assert_eq!(PauliBasis::from_char('y').unwrap(), PauliBasis::Y);
        assert_eq!(PauliBasis::from_label("Z").unwrap(), PauliBasis::Z);
    }

    #[test]
    fn test_invalid_labels() {
        for label in ["W", "", "XY", "I"] {
            assert_eq!(
                PauliBasis::from_label(label),
                Err(TomographyError::invalid_basis(label))
            );
        }
    }

    #[test]
    fn test_index_matches_all() {
        for (i, basis) in PauliBasis::ALL.iter().enumerate() {
            assert_eq!(basis.index(), i);
        }
    }

    #[test]
    fn test_outcome_conversion() {
        assert_eq!(MeasurementOutcome::try_from(1).unwrap(), MeasurementOutcome::Plus);
        assert_eq!(MeasurementOutcome::try_from(-1).unwrap(), MeasurementOutcome::Minus);
        assert_eq!(
            MeasurementOutcome::try_from(0),
            Err(TomographyError::InvalidOutcome { value: 0 })
        );
        assert_eq!(MeasurementOutcome::Minus.as_f64(), -1.0);
        assert_eq!(MeasurementOutcome::Plus.to_string(), "+1");
    }

    #[test]
    fn test_serde_format() {
        let json = serde_json::to_string(&(PauliBasis::Y, MeasurementOutcome::Minus)).unwrap();
        assert_eq!(json, r#"["Y",-1]"#);

        let back: (PauliBasis, MeasurementOutcome) = serde_json::from_str(r#"["Z",1]"#).unwrap();
        assert_eq!(back, (PauliBasis::Z, MeasurementOutcome::Plus));

        let err = serde_json::from_str::<PauliBasis>(r#""Q""#).unwrap_err();
        assert!(err.to_string().contains("Invalid Pauli basis"));
        assert!(serde_json::from_str::<MeasurementOutcome>("2").is_err());
    }
}
