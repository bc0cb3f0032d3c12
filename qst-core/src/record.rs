//! Measurement records
//!
//! A record is the ordered list of (basis, outcome) shots taken on one
//! unknown state. Order carries no meaning for reconstruction but is kept so
//! that a persisted dataset replays exactly.

use crate::pauli::{MeasurementOutcome, PauliBasis};
use serde::{Deserialize, Serialize};

/// A single shot: the basis measured and the eigenvalue observed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(
    from = "(PauliBasis, MeasurementOutcome)",
    into = "(PauliBasis, MeasurementOutcome)"
)]
pub struct Measurement {
    pub basis: PauliBasis,
    pub outcome: MeasurementOutcome,
}

impl Measurement {
    pub fn new(basis: PauliBasis, outcome: MeasurementOutcome) -> Self {
        Self { basis, outcome }
    }
}

impl From<(PauliBasis, MeasurementOutcome)> for Measurement {
    fn from((basis, outcome): (PauliBasis, MeasurementOutcome)) -> Self {
        Self { basis, outcome }
    }
}

impl From<Measurement> for (PauliBasis, MeasurementOutcome) {
    fn from(m: Measurement) -> Self {
        (m.basis, m.outcome)
    }
}

/// Ordered sequence of measurement shots
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeasurementRecord {
    measurements: Vec<Measurement>,
}

impl MeasurementRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty record with room for `shots` measurements
    pub fn with_capacity(shots: usize) -> Self {
        Self {
            measurements: Vec::with_capacity(shots),
        }
    }

    /// Append a shot
    pub fn push(&mut self, measurement: Measurement) {
        self.measurements.push(measurement);
    }

    /// Number of shots
    pub fn len(&self) -> usize {
        self.measurements.len()
    }

    /// Check if the record holds no shots
    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }

    /// Shots in recorded order
    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    /// Iterate over shots in recorded order
    pub fn iter(&self) -> std::slice::Iter<'_, Measurement> {
        self.measurements.iter()
    }

    /// Shots per basis, indexed by [`PauliBasis::index`]
    pub fn basis_counts(&self) -> [usize; 3] {
        let mut counts = [0; 3];
        for m in &self.measurements {
            counts[m.basis.index()] += 1;
        }
        counts
    }

    /// Number of +1 outcomes per basis, indexed by [`PauliBasis::index`]
    pub fn plus_counts(&self) -> [usize; 3] {
        let mut counts = [0; 3];
        for m in self.measurements.iter().filter(|m| m.outcome.is_plus()) {
            counts[m.basis.index()] += 1;
        }
        counts
    }

    /// Empirical mean outcome for one basis, `None` if it was never measured
    pub fn expectation(&self, basis: PauliBasis) -> Option<f64> {
        let (sum, count) = self
            .measurements
            .iter()
            .filter(|m| m.basis == basis)
            .fold((0.0, 0usize), |(sum, count), m| (sum + m.outcome.as_f64(), count + 1));

        if count == 0 {
            None
        } else {
            Some(sum / count as f64)
        }
    }
}

impl From<Vec<Measurement>> for MeasurementRecord {
    fn from(measurements: Vec<Measurement>) -> Self {
        Self { measurements }
    }
}

impl FromIterator<Measurement> for MeasurementRecord {
    fn from_iter<I: IntoIterator<Item = Measurement>>(iter: I) -> Self {
        Self {
            measurements: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a MeasurementRecord {
    type Item = &'a Measurement;
    type IntoIter = std::slice::Iter<'a, Measurement>;

    fn into_iter(self) -> Self::IntoIter {
        self.measurements.iter()
    }
}
