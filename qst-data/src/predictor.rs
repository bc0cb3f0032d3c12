//! Predictor interface between measurement records and reconstruction parameters
//!
//! A predictor is any model that maps a measurement record to the four
//! unconstrained reals consumed by
//! [`DensityMatrixReconstructor`](qst_state::DensityMatrixReconstructor).
//! Learned models plug in by implementing [`Predictor`]; plain closures work
//! through the blanket implementation.

use crate::error::{DatasetError, Result};
use qst_core::{DensityMatrix, MeasurementRecord, PauliBasis};
use qst_state::ReconstructionParameters;

/// Maps a measurement record to reconstruction parameters
pub trait Predictor: Send + Sync {
    /// Predict reconstruction parameters for one record
    fn predict(&self, record: &MeasurementRecord) -> Result<ReconstructionParameters>;
}

impl<F> Predictor for F
where
    F: Fn(&MeasurementRecord) -> ReconstructionParameters + Send + Sync,
{
    fn predict(&self, record: &MeasurementRecord) -> Result<ReconstructionParameters> {
        Ok(self(record))
    }
}

/// Baseline predictor based on linear inversion of Pauli expectations
///
/// The empirical mean of each basis estimates one Bloch vector component
/// (zero for a basis that was never measured). The estimate is shrunk into a
/// ball of radius `max_bloch_radius` so it always describes a mixed state,
/// then inverted through the Cholesky parameterization.
#[derive(Debug, Clone, Copy)]
pub struct LinearInversionPredictor {
    max_bloch_radius: f64,
}

impl Default for LinearInversionPredictor {
    fn default() -> Self {
        Self {
            max_bloch_radius: 0.999,
        }
    }
}

impl LinearInversionPredictor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the largest Bloch radius an estimate may reach
    pub fn with_max_bloch_radius(mut self, radius: f64) -> Self {
        self.max_bloch_radius = radius.clamp(0.0, 1.0);
        self
    }

    pub fn max_bloch_radius(&self) -> f64 {
        self.max_bloch_radius
    }

    /// Bloch vector estimated from empirical expectations, shrunk into the radius
    pub fn estimate_bloch_vector(&self, record: &MeasurementRecord) -> [f64; 3] {
        let mut r = PauliBasis::ALL.map(|basis| record.expectation(basis).unwrap_or(0.0));
        let norm = r.iter().map(|x| x * x).sum::<f64>().sqrt();
        if norm > self.max_bloch_radius {
            let scale = self.max_bloch_radius / norm;
            r.iter_mut().for_each(|x| *x *= scale);
        }
        r
    }
}

impl Predictor for LinearInversionPredictor {
    fn predict(&self, record: &MeasurementRecord) -> Result<ReconstructionParameters> {
        if record.is_empty() {
            return Err(DatasetError::EmptyRecord);
        }
        let rho = DensityMatrix::from_bloch_vector(self.estimate_bloch_vector(record))?;
        Ok(ReconstructionParameters::from_density_matrix(&rho))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use qst_core::{Measurement, MeasurementOutcome};
    use qst_state::DensityMatrixReconstructor;

    fn shots(outcomes: &[(PauliBasis, MeasurementOutcome)]) -> MeasurementRecord {
        outcomes.iter().copied().map(Measurement::from).collect()
    }

    #[test]
    fn test_empty_record_rejected() {
        let predictor = LinearInversionPredictor::new();
        assert!(matches!(
            predictor.predict(&MeasurementRecord::new()),
            Err(DatasetError::EmptyRecord)
        ));
    }

    #[test]
    fn test_estimate_uses_empirical_means() {
        use MeasurementOutcome::*;
        use PauliBasis::*;
        let record = shots(&[(X, Plus), (X, Minus), (Z, Minus), (Z, Minus), (Z, Plus), (Z, Minus)]);
        let r = LinearInversionPredictor::new().estimate_bloch_vector(&record);
        assert_relative_eq!(r[0], 0.0);
        assert_relative_eq!(r[1], 0.0);
        assert_relative_eq!(r[2], -0.5);
    }

    #[test]
    fn test_estimate_is_shrunk_into_radius() {
        use MeasurementOutcome::*;
        use PauliBasis::*;
        let record = shots(&[(X, Plus), (Y, Plus), (Z, Plus)]);
        let predictor = LinearInversionPredictor::new().with_max_bloch_radius(0.9);
        let r = predictor.estimate_bloch_vector(&record);
        let norm = r.iter().map(|x| x * x).sum::<f64>().sqrt();
        assert_relative_eq!(norm, 0.9, epsilon = 1e-12);
        assert_relative_eq!(r[0], r[2], epsilon = 1e-12);
    }

    #[test]
    fn test_prediction_reconstructs_estimate() {
        use MeasurementOutcome::*;
        use PauliBasis::*;
        let record = shots(&[(Z, Plus), (Z, Plus), (Z, Plus), (Z, Minus), (X, Plus), (X, Minus)]);
        let params = LinearInversionPredictor::new().predict(&record).unwrap();
        assert!(params.is_finite());

        let rho = DensityMatrixReconstructor::new().reconstruct(&params).unwrap();
        let r = rho.bloch_vector();
        assert_relative_eq!(r[0], 0.0, epsilon = 1e-9);
        assert_relative_eq!(r[1], 0.0, epsilon = 1e-9);
        assert_relative_eq!(r[2], 0.5, epsilon = 1e-9);
    }

    #[test]
    fn test_closure_predictor() {
        let constant = |_: &MeasurementRecord| ReconstructionParameters::new(0.0, 0.0, 0.0, 0.0);
        let params = constant.predict(&MeasurementRecord::new()).unwrap();
        assert_eq!(params, ReconstructionParameters::new(0.0, 0.0, 0.0, 0.0));
    }
}
