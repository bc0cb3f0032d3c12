//! Labeled tomography datasets and their JSON persistence
//!
//! A dataset is an ordered list of records, each pairing a ground-truth
//! density matrix with the measurement shots taken on it. On disk it is a
//! JSON array:
//!
//! ```text
//! [
//!   {
//!     "rho": [[re, im], [re, im], [re, im], [re, im]],   // row-major 2x2
//!     "measurements": [["X", 1], ["Z", -1], ...]
//!   },
//!   ...
//! ]
//! ```
//!
//! Loading validates every matrix against the density matrix invariants and
//! every basis label and outcome, so a loaded dataset is as trustworthy as a
//! freshly generated one.

use crate::error::Result;
use qst_core::{DensityMatrix, MeasurementRecord};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Ground-truth state together with its measurement record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetRecord {
    pub rho: DensityMatrix,
    pub measurements: MeasurementRecord,
}

impl DatasetRecord {
    pub fn new(rho: DensityMatrix, measurements: MeasurementRecord) -> Self {
        Self { rho, measurements }
    }
}

/// Ordered collection of dataset records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    records: Vec<DatasetRecord>,
}

impl Dataset {
    /// Create an empty dataset
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the dataset holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a record
    pub fn push(&mut self, record: DatasetRecord) {
        self.records.push(record);
    }

    /// Records in stable order
    pub fn records(&self) -> &[DatasetRecord] {
        &self.records
    }

    /// Iterate over records in stable order
    pub fn iter(&self) -> std::slice::Iter<'_, DatasetRecord> {
        self.records.iter()
    }

    /// Consecutive batches of `batch_size` records; the last may be shorter
    ///
    /// # Panics
    /// Panics if `batch_size` is zero.
    pub fn batches(&self, batch_size: usize) -> std::slice::Chunks<'_, DatasetRecord> {
        self.records.chunks(batch_size)
    }

    /// Serialize as JSON into a writer
    pub fn to_writer<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer(writer, self)?;
        Ok(())
    }

    /// Deserialize and validate from a JSON reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Write the dataset to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        self.to_writer(&mut writer)?;
        writer.flush()?;
        tracing::info!(path = %path.display(), records = self.len(), "saved dataset");
        Ok(())
    }

    /// Read and validate a dataset from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let dataset = Self::from_reader(BufReader::new(File::open(path)?))?;
        tracing::info!(path = %path.display(), records = dataset.len(), "loaded dataset");
        Ok(dataset)
    }
}

impl From<Vec<DatasetRecord>> for Dataset {
    fn from(records: Vec<DatasetRecord>) -> Self {
        Self { records }
    }
}

impl FromIterator<DatasetRecord> for Dataset {
    fn from_iter<I: IntoIterator<Item = DatasetRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a DatasetRecord;
    type IntoIter = std::slice::Iter<'a, DatasetRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl IntoIterator for Dataset {
    type Item = DatasetRecord;
    type IntoIter = std::vec::IntoIter<DatasetRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}
