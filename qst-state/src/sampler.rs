//! Random pure-state sampling
//!
//! A uniformly (Haar) distributed pure qubit state is obtained by drawing a
//! complex 2-vector with independent standard-normal real and imaginary
//! parts, normalizing it, and taking the outer product ρ = |ψ⟩⟨ψ|. The result
//! is Hermitian, unit trace and rank one by construction.

use num_complex::Complex64;
use qst_core::{DensityMatrix, Result, Tolerances, TomographyError};
use rand::Rng;
use rand_distr::StandardNormal;

/// Consecutive degenerate draws tolerated before the error is surfaced
///
/// A degenerate draw has probability zero for a working generator, so
/// exhausting this budget means the random source itself is broken.
pub const MAX_RESAMPLE_ATTEMPTS: usize = 64;

/// Sampler of random pure density matrices
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomStateSampler {
    tolerances: Tolerances,
}

impl RandomStateSampler {
    /// Create a sampler with default tolerances
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sampler with custom tolerances
    pub fn with_tolerances(tolerances: Tolerances) -> Self {
        Self { tolerances }
    }

    /// Draw one state, failing on a degenerate vector
    ///
    /// # Errors
    /// Returns [`TomographyError::DegenerateState`] if the sampled vector's
    /// norm is below [`Tolerances::degenerate_norm`].
    pub fn try_sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<DensityMatrix> {
        let psi = [gaussian_amplitude(rng), gaussian_amplitude(rng)];

        let norm = psi[0].norm().hypot(psi[1].norm());
        if !(norm >= self.tolerances.degenerate_norm) {
            return Err(TomographyError::DegenerateState { norm });
        }
        let psi = psi.map(|z| z / norm);

        // ρᵢⱼ = ψᵢ ψⱼ*
        let mut matrix = [[Complex64::new(0.0, 0.0); 2]; 2];
        for i in 0..2 {
            for j in 0..2 {
                matrix[i][j] = psi[i] * psi[j].conj();
            }
        }

        DensityMatrix::with_tolerance(matrix, self.tolerances.validity)
    }

    /// Draw one state, resampling degenerate vectors
    ///
    /// # Errors
    /// Surfaces [`TomographyError::DegenerateState`] only after
    /// [`MAX_RESAMPLE_ATTEMPTS`] consecutive degenerate draws.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<DensityMatrix> {
        let mut attempt = 1;
        loop {
            match self.try_sample(rng) {
                Err(TomographyError::DegenerateState { norm }) if attempt < MAX_RESAMPLE_ATTEMPTS => {
                    tracing::debug!(norm, attempt, "degenerate state vector, resampling");
                    attempt += 1;
                }
                result => return result,
            }
        }
    }

    /// Draw `count` states from one stream
    pub fn sample_many<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Result<Vec<DensityMatrix>> {
        (0..count).map(|_| self.sample(rng)).collect()
    }
}

fn gaussian_amplitude<R: Rng + ?Sized>(rng: &mut R) -> Complex64 {
    Complex64::new(rng.sample(StandardNormal), rng.sample(StandardNormal))
}
