//! Quantum state distance metrics
//!
//! - **Fidelity** (Uhlmann): `F(ρ, σ) = (Tr √(√ρ σ √ρ))²`, 1 for identical
//!   states, 0 for orthogonal ones.
//! - **Trace distance**: `D(ρ, σ) = ½ Σ|λᵢ(ρ − σ)|`, a metric bounded by 1.
//! - **Hilbert–Schmidt loss**: `‖ρ − σ‖²_F`, the squared Frobenius distance
//!   used as a training signal.
//!
//! Fidelity is the numerically delicate one: it takes two matrix square roots
//! and the trace of the second must come out real. An imaginary part above
//! tolerance indicates a non-Hermitian intermediate and is reported rather
//! than discarded.

use qst_core::linalg::{checked_hermitian_sqrt, hermitian_eigenvalues};
use qst_core::matrix;
use qst_core::{DensityMatrix, InstabilityKind, Result, Tolerances, TomographyError};
use rayon::prelude::*;

/// Fidelity and distance computations with configurable tolerances
#[derive(Debug, Clone, Copy, Default)]
pub struct QuantumMetrics {
    tolerances: Tolerances,
}

impl QuantumMetrics {
    /// Create metrics with default tolerances
    pub fn new() -> Self {
        Self::default()
    }

    /// Create metrics with custom tolerances
    pub fn with_tolerances(tolerances: Tolerances) -> Self {
        Self { tolerances }
    }

    /// Tolerances in use
    pub fn tolerances(&self) -> &Tolerances {
        &self.tolerances
    }

    /// Uhlmann fidelity between two states
    ///
    /// # Errors
    /// Returns [`TomographyError::NumericalInstability`] if an intermediate
    /// matrix is not PSD within tolerance, if `Tr √(√ρ σ √ρ)` has an
    /// imaginary part above [`Tolerances::imaginary`], or if the fidelity
    /// exceeds [`Tolerances::fidelity_ceiling`].
    pub fn fidelity(&self, rho: &DensityMatrix, sigma: &DensityMatrix) -> Result<f64> {
        let eps = self.tolerances.validity;

        let sqrt_rho = checked_hermitian_sqrt(rho.matrix(), eps)?;
        let inner = matrix::multiply(&matrix::multiply(&sqrt_rho, sigma.matrix()), &sqrt_rho);
        let sqrt_inner = checked_hermitian_sqrt(&inner, eps)?;

        let trace = matrix::trace(&sqrt_inner);
        if !(trace.im.abs() <= self.tolerances.imaginary) {
            return Err(TomographyError::instability(
                InstabilityKind::ComplexFidelity {
                    imaginary: trace.im,
                },
            ));
        }

        let fidelity = trace.re * trace.re;
        if !(fidelity <= self.tolerances.fidelity_ceiling()) {
            return Err(TomographyError::instability(
                InstabilityKind::FidelityOutOfRange { fidelity },
            ));
        }

        Ok(fidelity.clamp(0.0, 1.0))
    }

    /// Trace distance between two states
    ///
    /// `ρ − σ` is Hermitian, so its eigenvalues come from the Hermitian
    /// solver and are exactly real.
    pub fn trace_distance(&self, rho: &DensityMatrix, sigma: &DensityMatrix) -> f64 {
        let diff = matrix::sub(rho.matrix(), sigma.matrix());
        let [low, high] = hermitian_eigenvalues(&diff);
        0.5 * (low.abs() + high.abs())
    }

    /// Squared Frobenius distance ‖ρ − σ‖²_F
    pub fn hilbert_schmidt_distance(&self, rho: &DensityMatrix, sigma: &DensityMatrix) -> f64 {
        let norm = matrix::frobenius_norm(&matrix::sub(rho.matrix(), sigma.matrix()));
        norm * norm
    }

    /// Fidelities of a batch of state pairs, in input order
    pub fn fidelity_batch(&self, pairs: &[(DensityMatrix, DensityMatrix)]) -> Result<Vec<f64>> {
        pairs
            .par_iter()
            .map(|(rho, sigma)| self.fidelity(rho, sigma))
            .collect()
    }

    /// Trace distances of a batch of state pairs, in input order
    pub fn trace_distance_batch(&self, pairs: &[(DensityMatrix, DensityMatrix)]) -> Vec<f64> {
        pairs
            .par_iter()
            .map(|(rho, sigma)| self.trace_distance(rho, sigma))
            .collect()
    }

    /// Mean Hilbert–Schmidt loss between predictions and targets
    ///
    /// Returns `None` when the slices differ in length or are empty.
    pub fn mean_hilbert_schmidt_loss(
        &self,
        predicted: &[DensityMatrix],
        target: &[DensityMatrix],
    ) -> Option<f64> {
        if predicted.is_empty() || predicted.len() != target.len() {
            return None;
        }

        let total: f64 = predicted
            .par_iter()
            .zip(target.par_iter())
            .map(|(p, t)| self.hilbert_schmidt_distance(p, t))
            .sum();
        Some(total / predicted.len() as f64)
    }
}

/// Fidelity with default tolerances
pub fn fidelity(rho: &DensityMatrix, sigma: &DensityMatrix) -> Result<f64> {
    QuantumMetrics::default().fidelity(rho, sigma)
}

/// Trace distance
pub fn trace_distance(rho: &DensityMatrix, sigma: &DensityMatrix) -> f64 {
    QuantumMetrics::default().trace_distance(rho, sigma)
}
