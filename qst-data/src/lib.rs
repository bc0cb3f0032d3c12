//! Datasets, predictors and evaluation for single-qubit tomography
//!
//! - [`DatasetBuilder`]: seeded generation of (state, measurements) records
//! - [`Dataset`]: ordered records with JSON persistence
//! - [`Predictor`]: measurement record → reconstruction parameters
//! - [`Evaluator`]: fidelity, trace distance and latency of a predictor
//!
//! # Example
//!
//! ```
//! use qst_data::{DatasetBuilder, DatasetConfig, Evaluator, LinearInversionPredictor};
//!
//! let config = DatasetConfig::test().with_num_records(10).with_seed(7);
//! let dataset = DatasetBuilder::new(config)?.build()?;
//!
//! let report = Evaluator::new().evaluate(&LinearInversionPredictor::new(), &dataset)?;
//! assert_eq!(report.samples, 10);
//! assert!(report.mean_fidelity > 0.5);
//! println!("{report}");
//! # Ok::<(), qst_data::DatasetError>(())
//! ```

pub mod builder;
pub mod dataset;
pub mod error;
pub mod evaluation;
pub mod predictor;

pub use builder::{DatasetBuilder, DatasetConfig};
pub use dataset::{Dataset, DatasetRecord};
pub use error::{DatasetError, Result};
pub use evaluation::{EvaluationReport, Evaluator, RecordEvaluation};
pub use predictor::{LinearInversionPredictor, Predictor};
