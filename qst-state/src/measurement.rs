//! Born-rule Pauli measurement
//!
//! Measuring a single qubit in state ρ along Pauli axis P yields +1 with
//! probability
//!
//! ```text
//! p₊ = (1 + Re Tr(ρP)) / 2
//! ```
//!
//! and −1 otherwise. For a valid density matrix `Re Tr(ρP) ∈ [-1, 1]`;
//! rounding can push it marginally outside, so the probability is clamped to
//! [0, 1] after checking that the excursion stays within tolerance.

use qst_core::{
    DensityMatrix, Measurement, MeasurementOutcome, MeasurementRecord, PauliBasis, Result,
    Tolerances, TomographyError,
};
use rand::Rng;

/// Simulator of projective Pauli measurements
///
/// # Example
///
/// ```
/// use qst_core::{DensityMatrix, MeasurementOutcome, PauliBasis};
/// use qst_state::PauliMeasurementSimulator;
/// use rand::SeedableRng;
///
/// let simulator = PauliMeasurementSimulator::new();
/// let mut rng = rand::rngs::StdRng::seed_from_u64(7);
///
/// let outcome = simulator
///     .measure(&DensityMatrix::zero(), PauliBasis::Z, &mut rng)
///     .unwrap();
/// assert_eq!(outcome, MeasurementOutcome::Plus);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PauliMeasurementSimulator {
    tolerances: Tolerances,
}

impl PauliMeasurementSimulator {
    /// Create a simulator with default tolerances
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a simulator with custom tolerances
    pub fn with_tolerances(tolerances: Tolerances) -> Self {
        Self { tolerances }
    }

    /// Probability of the +1 outcome, clamped to [0, 1]
    ///
    /// # Errors
    /// Returns [`TomographyError::ProbabilityRange`] if the raw probability
    /// is not finite or lies outside [0, 1] by more than
    /// [`Tolerances::probability_band`].
    pub fn probability_plus(&self, rho: &DensityMatrix, basis: PauliBasis) -> Result<f64> {
        let expectation = rho.expectation(basis);
        let probability = 0.5 * (1.0 + expectation);

        let slack = self.tolerances.probability_band();
        if !(probability >= -slack && probability <= 1.0 + slack) {
            return Err(TomographyError::ProbabilityRange { probability });
        }

        Ok(probability.clamp(0.0, 1.0))
    }

    /// Measure once in the given basis
    pub fn measure<R: Rng + ?Sized>(
        &self,
        rho: &DensityMatrix,
        basis: PauliBasis,
        rng: &mut R,
    ) -> Result<MeasurementOutcome> {
        let probability = self.probability_plus(rho, basis)?;
        Ok(sample_outcome(probability, rng))
    }

    /// Measure `shots` times in a fixed basis
    pub fn measure_shots<R: Rng + ?Sized>(
        &self,
        rho: &DensityMatrix,
        basis: PauliBasis,
        shots: usize,
        rng: &mut R,
    ) -> Result<Vec<MeasurementOutcome>> {
        let probability = self.probability_plus(rho, basis)?;
        Ok((0..shots).map(|_| sample_outcome(probability, rng)).collect())
    }

    /// Measure `shots` times, drawing the basis uniformly from {X, Y, Z}
    /// before every shot
    pub fn measure_random_bases<R: Rng + ?Sized>(
        &self,
        rho: &DensityMatrix,
        shots: usize,
        rng: &mut R,
    ) -> Result<MeasurementRecord> {
        let mut probabilities = [0.0; 3];
        for basis in PauliBasis::ALL {
            probabilities[basis.index()] = self.probability_plus(rho, basis)?;
        }

        let mut record = MeasurementRecord::with_capacity(shots);
        for _ in 0..shots {
            let basis = PauliBasis::ALL[rng.gen_range(0..PauliBasis::ALL.len())];
            let outcome = sample_outcome(probabilities[basis.index()], rng);
            record.push(Measurement::new(basis, outcome));
        }
        Ok(record)
    }
}

/// +1 iff a uniform draw from [0, 1) falls below `probability`
#[inline]
fn sample_outcome<R: Rng + ?Sized>(probability: f64, rng: &mut R) -> MeasurementOutcome {
    if rng.gen::<f64>() < probability {
        MeasurementOutcome::Plus
    } else {
        MeasurementOutcome::Minus
    }
}
