//! Example: Evaluate the linear-inversion baseline on a test dataset
//!
//! Loads a dataset written by `generate_dataset` (or generates a fresh test
//! set when no path is given) and prints the evaluation report.
//!
//! Usage: cargo run --example evaluate_baseline -- [TEST_DATASET_JSON]

use qst_data::{Dataset, DatasetBuilder, DatasetConfig, Evaluator, LinearInversionPredictor, Result};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let dataset = match std::env::args().nth(1) {
        Some(path) => Dataset::load(path)?,
        None => DatasetBuilder::new(DatasetConfig::test().with_seed(7))?.build()?,
    };

    let predictor = LinearInversionPredictor::new();
    let evaluator = Evaluator::new();

    let report = evaluator.evaluate(&predictor, &dataset)?;
    println!("{report}");

    let loss = evaluator.mean_loss(&predictor, &dataset)?;
    println!("Hilbert-Schmidt Loss: {loss:.4}");

    Ok(())
}
