//! Hermitian eigendecomposition and matrix square root
//!
//! For a 2x2 Hermitian matrix
//!
//! ```text
//! M = [[a,  b ],
//!      [b*, d ]]      a, d real
//! ```
//!
//! the eigenvalues are `μ ± r` with `μ = (a + d)/2` and
//! `r = hypot((a - d)/2, |b|)`. They are real by construction, so no complex
//! eigenvalue solver is involved and no spurious imaginary parts appear.
//!
//! The eigenvector of `μ + r` is taken from whichever of the two null-space
//! candidates `(r + (a-d)/2, b*)` and `(b, r - (a-d)/2)` has the larger leading
//! component; the second eigenvector is its orthogonal complement. The
//! eigenvector matrix is therefore unitary up to rounding even when the
//! eigenvalues nearly coincide.
//!
//! # Square root
//!
//! `sqrt(M) = V · diag(sqrt(max(λ, 0))) · V†`. Negative eigenvalues of a PSD
//! input can only be rounding noise and are clamped to zero before the square
//! root; [`checked_hermitian_sqrt`] rejects eigenvalues below a tolerance
//! instead of clamping them away.

use crate::error::{InstabilityKind, Result, TomographyError};
use crate::matrix::{Matrix2, IDENTITY};
use num_complex::Complex64;
use rayon::prelude::*;

/// Eigendecomposition of a 2x2 Hermitian matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HermitianEigen {
    /// Eigenvalues in ascending order
    pub eigenvalues: [f64; 2],

    /// Unitary matrix whose columns are the matching eigenvectors
    pub eigenvectors: Matrix2,
}

impl HermitianEigen {
    /// Decompose a Hermitian matrix
    ///
    /// Only the real parts of the diagonal and the Hermitian part of the
    /// off-diagonal, `(m01 + conj(m10)) / 2`, are read.
    pub fn new(m: &Matrix2) -> Self {
        let a = m[0][0].re;
        let d = m[1][1].re;
        let b = (m[0][1] + m[1][0].conj()) * 0.5;

        let mean = 0.5 * (a + d);
        let half_diff = 0.5 * (a - d);
        let radius = half_diff.hypot(b.norm());
        let eigenvalues = [mean - radius, mean + radius];

        let (x, y) = if half_diff >= 0.0 {
            (Complex64::new(radius + half_diff, 0.0), b.conj())
        } else {
            (b, Complex64::new(radius - half_diff, 0.0))
        };
        let norm = x.norm().hypot(y.norm());

        // Scalar multiple of the identity: every basis diagonalizes it
        let eigenvectors = if norm.is_finite() && norm >= f64::MIN_POSITIVE {
            let (x, y) = (x / norm, y / norm);
            [[-y.conj(), x], [x.conj(), y]]
        } else {
            IDENTITY
        };

        Self {
            eigenvalues,
            eigenvectors,
        }
    }

    /// Smallest eigenvalue
    #[inline]
    pub fn min_eigenvalue(&self) -> f64 {
        self.eigenvalues[0]
    }

    /// Largest eigenvalue
    #[inline]
    pub fn max_eigenvalue(&self) -> f64 {
        self.eigenvalues[1]
    }

    /// Rebuild `V · diag(values) · V†` with the stored eigenvectors
    pub fn recompose(&self, values: [f64; 2]) -> Matrix2 {
        let v = &self.eigenvectors;
        let mut out = [[Complex64::new(0.0, 0.0); 2]; 2];
        for i in 0..2 {
            for j in 0..2 {
                let mut sum = Complex64::new(0.0, 0.0);
                for (k, &value) in values.iter().enumerate() {
                    sum += v[i][k] * v[j][k].conj() * value;
                }
                out[i][j] = sum;
            }
        }
        out
    }

    /// Apply a real function to the spectrum, `f(M) = V · diag(f(λ)) · V†`
    pub fn map<F>(&self, f: F) -> Matrix2
    where
        F: Fn(f64) -> f64,
    {
        self.recompose([f(self.eigenvalues[0]), f(self.eigenvalues[1])])
    }
}

/// Eigenvalues of a 2x2 Hermitian matrix in ascending order
#[inline]
pub fn hermitian_eigenvalues(m: &Matrix2) -> [f64; 2] {
    HermitianEigen::new(m).eigenvalues
}

/// Clamp rounding noise below zero; NaN passes through untouched
#[inline]
fn clamp_non_negative(value: f64) -> f64 {
    if value < 0.0 {
        0.0
    } else {
        value
    }
}

/// Principal square root of a Hermitian positive semi-definite matrix
///
/// The input is assumed PSD up to small negative noise. Negative eigenvalues
/// are clamped to zero.
pub fn hermitian_sqrt(m: &Matrix2) -> Matrix2 {
    HermitianEigen::new(m).map(|lambda| clamp_non_negative(lambda).sqrt())
}

/// Principal square root that rejects inputs which are not PSD
///
/// Eigenvalues in `[-tolerance, 0)` are clamped as in [`hermitian_sqrt`].
/// Eigenvalues below `-tolerance` or non-finite eigenvalues return
/// [`TomographyError::NumericalInstability`].
pub fn checked_hermitian_sqrt(m: &Matrix2, tolerance: f64) -> Result<Matrix2> {
    let eig = HermitianEigen::new(m);

    if !eig.eigenvalues.iter().all(|v| v.is_finite()) {
        return Err(TomographyError::instability(
            InstabilityKind::NonFiniteEigenvalue,
        ));
    }
    if eig.min_eigenvalue() < -tolerance {
        return Err(TomographyError::instability(
            InstabilityKind::NegativeEigenvalue {
                eigenvalue: eig.min_eigenvalue(),
            },
        ));
    }

    Ok(eig.map(|lambda| clamp_non_negative(lambda).sqrt()))
}

/// Square roots of a batch of Hermitian PSD matrices, in input order
pub fn hermitian_sqrt_batch(matrices: &[Matrix2]) -> Vec<Matrix2> {
    matrices.par_iter().map(hermitian_sqrt).collect()
}
