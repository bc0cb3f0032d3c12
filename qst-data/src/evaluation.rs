//! Evaluation of predictors against labeled datasets
//!
//! For every record the predictor runs on the measurements, its output is
//! reconstructed into a density matrix, and that estimate is compared with
//! the ground truth by fidelity and trace distance. Latency covers the
//! prediction and the reconstruction.

use crate::dataset::{Dataset, DatasetRecord};
use crate::error::{DatasetError, Result};
use crate::predictor::Predictor;
use qst_core::{DensityMatrix, Tolerances};
use qst_state::{DensityMatrixReconstructor, QuantumMetrics};
use std::fmt;
use std::time::{Duration, Instant};

/// Metrics for one evaluated record
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordEvaluation {
    pub estimate: DensityMatrix,
    pub fidelity: f64,
    pub trace_distance: f64,
    pub latency: Duration,
}

/// Aggregate metrics over a dataset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluationReport {
    pub samples: usize,
    pub mean_fidelity: f64,
    pub mean_trace_distance: f64,
    pub mean_latency: Duration,
}

impl EvaluationReport {
    /// Aggregate per-record evaluations, `None` if there are none
    pub fn from_records(records: &[RecordEvaluation]) -> Option<Self> {
        if records.is_empty() {
            return None;
        }
        let n = records.len() as f64;
        let total_latency: Duration = records.iter().map(|r| r.latency).sum();
        Some(Self {
            samples: records.len(),
            mean_fidelity: records.iter().map(|r| r.fidelity).sum::<f64>() / n,
            mean_trace_distance: records.iter().map(|r| r.trace_distance).sum::<f64>() / n,
            mean_latency: total_latency.div_f64(n),
        })
    }

    /// Mean latency in milliseconds
    pub fn mean_latency_ms(&self) -> f64 {
        self.mean_latency.as_secs_f64() * 1e3
    }
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "===== Evaluation Results =====")?;
        writeln!(f, "Mean Fidelity       : {:.4}", self.mean_fidelity)?;
        writeln!(f, "Mean Trace Distance : {:.4}", self.mean_trace_distance)?;
        write!(f, "Inference Latency   : {:.2} ms", self.mean_latency_ms())
    }
}

/// Runs predictors over datasets and scores their reconstructions
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator {
    reconstructor: DensityMatrixReconstructor,
    metrics: QuantumMetrics,
}

impl Evaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tolerances(tolerances: Tolerances) -> Self {
        Self {
            reconstructor: DensityMatrixReconstructor::with_tolerances(tolerances),
            metrics: QuantumMetrics::with_tolerances(tolerances),
        }
    }

    /// Evaluate a predictor on one record
    pub fn evaluate_record<P>(&self, predictor: &P, record: &DatasetRecord) -> Result<RecordEvaluation>
    where
        P: Predictor + ?Sized,
    {
        if record.measurements.is_empty() {
            return Err(DatasetError::EmptyRecord);
        }

        let start = Instant::now();
        let params = predictor.predict(&record.measurements)?;
        let estimate = self.reconstructor.reconstruct(&params)?;
        let latency = start.elapsed();

        Ok(RecordEvaluation {
            estimate,
            fidelity: self.metrics.fidelity(&estimate, &record.rho)?,
            trace_distance: self.metrics.trace_distance(&estimate, &record.rho),
            latency,
        })
    }

    /// Evaluate a predictor on every record of a dataset
    ///
    /// Records are processed one at a time in dataset order so latency is
    /// measured without contention. The first failing record aborts the run.
    pub fn evaluate<P>(&self, predictor: &P, dataset: &Dataset) -> Result<EvaluationReport>
    where
        P: Predictor + ?Sized,
    {
        let evaluations = dataset
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let evaluation = self
                    .evaluate_record(predictor, record)
                    .map_err(|err| DatasetError::at_record(index, err))?;
                tracing::debug!(
                    index,
                    fidelity = evaluation.fidelity,
                    trace_distance = evaluation.trace_distance,
                    "evaluated record"
                );
                Ok(evaluation)
            })
            .collect::<Result<Vec<_>>>()?;

        let report = EvaluationReport::from_records(&evaluations).ok_or(DatasetError::EmptyDataset)?;
        tracing::info!(
            samples = report.samples,
            mean_fidelity = report.mean_fidelity,
            mean_trace_distance = report.mean_trace_distance,
            mean_latency_ms = report.mean_latency_ms(),
            "evaluation finished"
        );
        Ok(report)
    }

    /// Mean Hilbert–Schmidt loss of a predictor's reconstructions
    ///
    /// This is the training objective: squared Frobenius distance between
    /// the reconstruction and the ground truth, averaged over the dataset.
    pub fn mean_loss<P>(&self, predictor: &P, dataset: &Dataset) -> Result<f64>
    where
        P: Predictor + ?Sized,
    {
        let mut predicted = Vec::with_capacity(dataset.len());
        let mut target = Vec::with_capacity(dataset.len());
        for (index, record) in dataset.iter().enumerate() {
            let params = predictor
                .predict(&record.measurements)
                .map_err(|err| DatasetError::at_record(index, err))?;
            let estimate = self
                .reconstructor
                .reconstruct(&params)
                .map_err(|err| DatasetError::at_record(index, err))?;
            predicted.push(estimate);
            target.push(record.rho);
        }

        self.metrics
            .mean_hilbert_schmidt_loss(&predicted, &target)
            .ok_or(DatasetError::EmptyDataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use qst_core::{Measurement, MeasurementOutcome, MeasurementRecord, PauliBasis};
    use qst_state::ReconstructionParameters;

    fn mixed_guess(_: &MeasurementRecord) -> ReconstructionParameters {
        ReconstructionParameters::new(0.0, 0.0, 0.0, 0.0)
    }

    fn zero_state_dataset(records: usize) -> Dataset {
        let shots: MeasurementRecord = (0..10)
            .map(|_| Measurement::new(PauliBasis::Z, MeasurementOutcome::Plus))
            .collect();
        (0..records)
            .map(|_| DatasetRecord::new(DensityMatrix::zero(), shots.clone()))
            .collect()
    }

    #[test]
    fn test_mixed_guess_scores() {
        let report = Evaluator::new()
            .evaluate(&mixed_guess, &zero_state_dataset(4))
            .unwrap();
        assert_eq!(report.samples, 4);
        assert_relative_eq!(report.mean_fidelity, 0.5, epsilon = 1e-9);
        assert_relative_eq!(report.mean_trace_distance, 0.5, epsilon = 1e-9);
    }

    #[test]
    fn test_empty_dataset() {
        let err = Evaluator::new()
            .evaluate(&mixed_guess, &Dataset::new())
            .unwrap_err();
        assert!(matches!(err, DatasetError::EmptyDataset));
    }

    #[test]
    fn test_empty_record_is_reported_with_index() {
        let mut dataset = zero_state_dataset(2);
        dataset.push(DatasetRecord::new(DensityMatrix::zero(), MeasurementRecord::new()));

        let err = Evaluator::new().evaluate(&mixed_guess, &dataset).unwrap_err();
        match err {
            DatasetError::Record { index, source } => {
                assert_eq!(index, 2);
                assert!(matches!(*source, DatasetError::EmptyRecord));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_finite_prediction_aborts() {
        let broken = |_: &MeasurementRecord| ReconstructionParameters::new(f64::NAN, 0.0, 0.0, 0.0);
        let err = Evaluator::new()
            .evaluate(&broken, &zero_state_dataset(3))
            .unwrap_err();
        assert!(matches!(err, DatasetError::Record { index: 0, .. }));
    }

    #[test]
    fn test_mean_loss() {
        // ||I/2 - |0><0|||_F^2 = 0.25 + 0.25
        let loss = Evaluator::new()
            .mean_loss(&mixed_guess, &zero_state_dataset(3))
            .unwrap();
        assert_relative_eq!(loss, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_report_display() {
        let report = EvaluationReport {
            samples: 200,
            mean_fidelity: 0.91234,
            mean_trace_distance: 0.20001,
            mean_latency: Duration::from_micros(1250),
        };
        assert_eq!(
            report.to_string(),
            "===== Evaluation Results =====\n\
             Mean Fidelity       : 0.9123\n\
             Mean Trace Distance : 0.2000\n\
             Inference Latency   : 1.25 ms"
        );
    }

    #[test]
    fn test_report_aggregation() {
        let records = [
            RecordEvaluation {
                estimate: DensityMatrix::zero(),
                fidelity: 1.0,
                trace_distance: 0.0,
                latency: Duration::from_millis(2),
            },
            RecordEvaluation {
                estimate: DensityMatrix::one(),
                fidelity: 0.5,
                trace_distance: 0.4,
                latency: Duration::from_millis(4),
            },
        ];
        let report = EvaluationReport::from_records(&records).unwrap();
        assert_relative_eq!(report.mean_fidelity, 0.75);
        assert_relative_eq!(report.mean_trace_distance, 0.2);
        assert_eq!(report.mean_latency, Duration::from_millis(3));
        assert!(EvaluationReport::from_records(&[]).is_none());
    }

    #[test]
    fn test_report_latency_mean_over_many_records() {
        let record = RecordEvaluation {
            estimate: DensityMatrix::zero(),
            fidelity: 1.0,
            trace_distance: 0.0,
            latency: Duration::from_micros(10),
        };
        let records = vec![record; 70_000];
        let report = EvaluationReport::from_records(&records).unwrap();
        assert_eq!(report.samples, 70_000);
        let micros = report.mean_latency.as_secs_f64() * 1e6;
        assert!((micros - 10.0).abs() < 1e-6, "mean latency {micros} us");
    }
}
