//! Constrained density matrix reconstruction
//!
//! A predictor emits four unconstrained reals `(a, b, c, d)`. They are mapped
//! to a valid state through a Cholesky-style factorization:
//!
//! ```text
//! L = [[softplus(a),   0          ],
//!      [b + i·c,       softplus(d)]]
//!
//! ρ = L·L† / Tr(L·L†)
//! ```
//!
//! `L·L†` is a Gram matrix and therefore Hermitian PSD for any `L`; softplus
//! keeps both diagonal entries strictly positive so the trace never vanishes
//! mathematically. Validity is a property of the parameterization, not of
//! the predictor.
//!
//! # Scale invariance
//!
//! ρ does not change when `L` is multiplied by a positive constant. `L` is
//! built pre-scaled so its largest entry has magnitude one, working from
//! `ln softplus` for the diagonal. This keeps `Tr(L·L†) ≥ 1` and avoids the
//! underflow that `softplus(a), softplus(d) → 0` would otherwise cause for
//! very negative `a` and `d`.

use num_complex::Complex64;
use qst_core::matrix::{self, Matrix2};
use qst_core::{DensityMatrix, InstabilityKind, Result, Tolerances, TomographyError};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Smallest Cholesky diagonal used when inverting a rank-deficient state
pub const MIN_CHOLESKY_DIAGONAL: f64 = 1e-8;

/// Below this, `ln softplus(x)` equals `x` to machine precision
const LOG_SOFTPLUS_LINEAR_BELOW: f64 = -35.0;

/// Numerically stable softplus, ln(1 + eˣ)
#[inline]
pub fn softplus(x: f64) -> f64 {
    x.max(0.0) + (-x.abs()).exp().ln_1p()
}

/// Inverse of softplus, ln(eʸ - 1), defined for y > 0
#[inline]
pub fn inverse_softplus(y: f64) -> f64 {
    y + (-(-y).exp_m1()).ln()
}

/// ln(softplus(x)) without underflow for very negative x
#[inline]
fn log_softplus(x: f64) -> f64 {
    if x < LOG_SOFTPLUS_LINEAR_BELOW {
        x
    } else {
        softplus(x).ln()
    }
}

/// Predictor output: four unconstrained reals `(a, b, c, d)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct ReconstructionParameters {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl ReconstructionParameters {
    pub fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self { a, b, c, d }
    }

    /// Parameters as `[a, b, c, d]`
    pub fn to_array(self) -> [f64; 4] {
        [self.a, self.b, self.c, self.d]
    }

    /// Check that every parameter is finite
    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|p| p.is_finite())
    }

    /// Parameters that reconstruct (approximately) the given state
    ///
    /// Computes the Cholesky factor of ρ and inverts softplus on its
    /// diagonal. Pure states have a zero Cholesky diagonal entry, which is
    /// floored at [`MIN_CHOLESKY_DIAGONAL`]; the reconstruction then matches
    /// ρ to within roughly that floor squared.
    pub fn from_density_matrix(rho: &DensityMatrix) -> Self {
        let m = rho.matrix();

        let l00 = m[0][0].re.max(0.0).sqrt().max(MIN_CHOLESKY_DIAGONAL);
        let l10 = m[1][0] / l00;
        let l11 = (m[1][1].re - l10.norm_sqr())
            .max(0.0)
            .sqrt()
            .max(MIN_CHOLESKY_DIAGONAL);

        Self {
            a: inverse_softplus(l00),
            b: l10.re,
            c: l10.im,
            d: inverse_softplus(l11),
        }
    }
}

impl From<[f64; 4]> for ReconstructionParameters {
    fn from([a, b, c, d]: [f64; 4]) -> Self {
        Self { a, b, c, d }
    }
}

impl From<ReconstructionParameters> for [f64; 4] {
    fn from(params: ReconstructionParameters) -> Self {
        params.to_array()
    }
}

/// Maps reconstruction parameters to valid density matrices
#[derive(Debug, Clone, Copy, Default)]
pub struct DensityMatrixReconstructor {
    tolerances: Tolerances,
}

impl DensityMatrixReconstructor {
    /// Create a reconstructor with default tolerances
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a reconstructor with custom tolerances
    pub fn with_tolerances(tolerances: Tolerances) -> Self {
        Self { tolerances }
    }

    /// Lower-triangular factor `L`, rescaled so its largest entry is one
    pub fn cholesky_factor(&self, params: &ReconstructionParameters) -> Result<Matrix2> {
        if !params.is_finite() {
            return Err(TomographyError::instability(
                InstabilityKind::NonFiniteParameters {
                    parameters: params.to_array(),
                },
            ));
        }

        let log_l00 = log_softplus(params.a);
        let log_l11 = log_softplus(params.d);
        let log_b = params.b.abs().ln();
        let log_c = params.c.abs().ln();

        // ln|0| = -inf never wins the max since the diagonal logs are finite
        let log_scale = log_l00.max(log_l11).max(log_b).max(log_c);
        let rescale = |log_magnitude: f64| (log_magnitude - log_scale).exp();

        let l00 = rescale(log_l00);
        let l11 = rescale(log_l11);
        let b = params.b.signum() * rescale(log_b);
        let c = params.c.signum() * rescale(log_c);

        Ok([
            [Complex64::new(l00, 0.0), Complex64::new(0.0, 0.0)],
            [Complex64::new(b, c), Complex64::new(l11, 0.0)],
        ])
    }

    /// Reconstruct one density matrix
    ///
    /// # Errors
    /// Returns [`TomographyError::NumericalInstability`] for non-finite
    /// parameters, a trace that is not strictly positive, or a result that
    /// fails the density matrix invariants.
    pub fn reconstruct(&self, params: &ReconstructionParameters) -> Result<DensityMatrix> {
        let l = self.cholesky_factor(params)?;
        let gram = matrix::multiply(&l, &matrix::adjoint(&l));

        let trace = matrix::trace(&gram).re;
        if !(trace > 0.0 && trace.is_finite()) {
            return Err(TomographyError::instability(
                InstabilityKind::VanishingTrace { trace },
            ));
        }

        DensityMatrix::with_tolerance(matrix::scale(&gram, 1.0 / trace), self.tolerances.validity)
    }

    /// Reconstruct a batch in parallel, preserving order
    ///
    /// Fails with the first error encountered.
    pub fn reconstruct_batch(&self, batch: &[ReconstructionParameters]) -> Result<Vec<DensityMatrix>> {
        batch.par_iter().map(|params| self.reconstruct(params)).collect()
    }
}
