//! Dataset generation
//!
//! Each record is produced by sampling a Haar-random pure state and taking
//! `shots` Pauli measurements on it, with the basis of every shot drawn
//! uniformly from {X, Y, Z}.
//!
//! # Reproducibility
//!
//! With `workers == 1` a single `StdRng` seeded from `seed` generates every
//! record in order. With more workers, worker `w` owns a contiguous range of
//! records and its own `StdRng` seeded with `seed + w`; results are
//! concatenated in worker order. A fixed `(seed, workers)` pair therefore
//! always yields the same dataset, and one worker matches the sequential
//! stream exactly.

use crate::dataset::{Dataset, DatasetRecord};
use crate::error::{DatasetError, Result};
use qst_core::Tolerances;
use qst_state::{PauliMeasurementSimulator, RandomStateSampler};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::ops::Range;

/// Shots per record unless configured otherwise
pub const DEFAULT_SHOTS: usize = 50;

/// Records in a default training set
pub const DEFAULT_TRAINING_RECORDS: usize = 1000;

/// Records in a default test set
pub const DEFAULT_TEST_RECORDS: usize = 200;

/// Configuration for dataset generation
#[derive(Debug, Clone)]
pub struct DatasetConfig {
    /// Number of records to generate
    ///
    /// Default: 1000
    pub num_records: usize,

    /// Measurement shots per record
    ///
    /// Default: 50
    pub shots: usize,

    /// Root seed for reproducible generation
    ///
    /// If None, a root seed is drawn from the thread-local generator.
    ///
    /// Default: None
    pub seed: Option<u64>,

    /// Number of independent random streams generated in parallel
    ///
    /// Default: 1
    pub workers: usize,

    /// Tolerances for sampling and Born-rule probabilities
    pub tolerances: Tolerances,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            num_records: DEFAULT_TRAINING_RECORDS,
            shots: DEFAULT_SHOTS,
            seed: None,
            workers: 1,
            tolerances: Tolerances::default(),
        }
    }
}

impl DatasetConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default training set: 1000 records of 50 shots
    pub fn training() -> Self {
        Self::default()
    }

    /// Default test set: 200 records of 50 shots
    pub fn test() -> Self {
        Self {
            num_records: DEFAULT_TEST_RECORDS,
            ..Default::default()
        }
    }

    pub fn with_num_records(mut self, num_records: usize) -> Self {
        self.num_records = num_records;
        self
    }

    pub fn with_shots(mut self, shots: usize) -> Self {
        self.shots = shots;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_tolerances(mut self, tolerances: Tolerances) -> Self {
        self.tolerances = tolerances;
        self
    }

    /// Check the configuration for values that cannot produce a dataset
    pub fn validate(&self) -> Result<()> {
        if self.shots == 0 {
            return Err(DatasetError::invalid_config(
                "shots must be at least 1; the predictor needs a non-empty record",
            ));
        }
        if self.workers == 0 {
            return Err(DatasetError::invalid_config("workers must be at least 1"));
        }
        Ok(())
    }
}

/// Generator of labeled measurement datasets
#[derive(Debug, Clone)]
pub struct DatasetBuilder {
    config: DatasetConfig,
    sampler: RandomStateSampler,
    simulator: PauliMeasurementSimulator,
}

impl DatasetBuilder {
    /// Create a builder after validating its configuration
    pub fn new(config: DatasetConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            sampler: RandomStateSampler::with_tolerances(config.tolerances),
            simulator: PauliMeasurementSimulator::with_tolerances(config.tolerances),
            config,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &DatasetConfig {
        &self.config
    }

    /// Generate one record from the given stream
    pub fn generate_record<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<DatasetRecord> {
        let rho = self.sampler.sample(rng)?;
        let measurements = self
            .simulator
            .measure_random_bases(&rho, self.config.shots, rng)?;
        Ok(DatasetRecord::new(rho, measurements))
    }

    /// Generate the configured number of records from a caller-owned stream
    pub fn build_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Dataset> {
        self.generate_range(0..self.config.num_records, rng)
            .map(Dataset::from)
    }

    /// Generate the dataset as configured
    pub fn build(&self) -> Result<Dataset> {
        let root_seed = self
            .config
            .seed
            .unwrap_or_else(|| rand::thread_rng().gen());

        let records = if self.config.workers == 1 {
            let mut rng = StdRng::seed_from_u64(root_seed);
            self.generate_range(0..self.config.num_records, &mut rng)?
        } else {
            let ranges = partition(self.config.num_records, self.config.workers);
            let chunks = ranges
                .into_par_iter()
                .enumerate()
                .map(|(worker, range)| {
                    let mut rng = StdRng::seed_from_u64(root_seed.wrapping_add(worker as u64));
                    tracing::debug!(worker, start = range.start, end = range.end, "generating records");
                    self.generate_range(range, &mut rng)
                })
                .collect::<Result<Vec<_>>>()?;
            chunks.into_iter().flatten().collect()
        };

        tracing::info!(
            records = records.len(),
            shots = self.config.shots,
            workers = self.config.workers,
            seed = root_seed,
            "generated dataset"
        );
        Ok(Dataset::from(records))
    }

    fn generate_range<R: Rng + ?Sized>(
        &self,
        range: Range<usize>,
        rng: &mut R,
    ) -> Result<Vec<DatasetRecord>> {
        range
            .map(|index| {
                self.generate_record(rng)
                    .map_err(|err| DatasetError::at_record(index, err))
            })
            .collect()
    }
}

/// Split `0..total` into `parts` contiguous ranges whose sizes differ by at most one
fn partition(total: usize, parts: usize) -> Vec<Range<usize>> {
    let base = total / parts;
    let extra = total % parts;
    let mut start = 0;
    (0..parts)
        .map(|i| {
            let len = base + usize::from(i < extra);
            let range = start..start + len;
            start += len;
            range
        })
        .collect()
}
