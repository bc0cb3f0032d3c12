//! Error types for dataset handling and evaluation

use qst_core::TomographyError;
use thiserror::Error;

/// Errors raised while building, persisting or evaluating datasets
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Reading or writing a dataset file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Dataset file is not valid JSON or violates the record layout
    #[error("Malformed dataset: {0}")]
    Json(#[from] serde_json::Error),

    /// Failure inside the tomography core
    #[error(transparent)]
    Tomography(#[from] TomographyError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Predictor was handed a record without shots
    #[error("Measurement record is empty")]
    EmptyRecord,

    /// Operation needs at least one record
    #[error("Dataset is empty")]
    EmptyDataset,

    /// Failure pinned to one record
    #[error("Record {index}: {source}")]
    Record {
        index: usize,
        #[source]
        source: Box<DatasetError>,
    },
}

impl DatasetError {
    /// Attach a record index to an error
    pub fn at_record(index: usize, source: impl Into<DatasetError>) -> Self {
        Self::Record {
            index,
            source: Box::new(source.into()),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

/// Result type for dataset operations
pub type Result<T> = std::result::Result<T, DatasetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_error_message() {
        let err = DatasetError::at_record(7, TomographyError::ProbabilityRange { probability: 2.0 });
        let msg = err.to_string();
        assert!(msg.starts_with("Record 7"));
        assert!(msg.contains("probability"));
    }

    #[test]
    fn test_tomography_error_is_transparent() {
        let err: DatasetError = TomographyError::invalid_basis("Q").into();
        assert_eq!(err.to_string(), TomographyError::invalid_basis("Q").to_string());
    }
}
