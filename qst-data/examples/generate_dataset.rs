//! Example: Generate training and test datasets
//!
//! Writes `train_dataset.json` (1000 records) and `test_dataset.json`
//! (200 records) of 50-shot Pauli measurements on Haar-random pure states.
//!
//! Usage: cargo run --example generate_dataset -- [OUTPUT_DIR] [SEED] [WORKERS]
//!
//! The same SEED and WORKERS always produce the same files. Set
//! `RUST_LOG=debug` to see per-worker progress.

use qst_data::{DatasetBuilder, DatasetConfig, DatasetError, Result};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const DEFAULT_WORKERS: usize = 4;

fn parse_arg<T>(raw: Option<String>, name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(raw) => raw
            .parse()
            .map_err(|err| DatasetError::invalid_config(format!("{name} {raw:?}: {err}"))),
        None => Ok(default),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| ".".to_string()));
    let seed = parse_arg(args.next(), "seed", 42)?;
    let workers = parse_arg(args.next(), "workers", DEFAULT_WORKERS)?;
    std::fs::create_dir_all(&out_dir)?;

    println!("=== Tomography Dataset Generation ===\n");

    for (name, config) in [
        ("train_dataset.json", DatasetConfig::training().with_seed(seed)),
        ("test_dataset.json", DatasetConfig::test().with_seed(seed.wrapping_add(1_000_003))),
    ] {
        let builder = DatasetBuilder::new(config.with_workers(workers))?;
        let dataset = builder.build()?;
        let path = out_dir.join(name);
        dataset.save(&path)?;

        println!(
            "{}: {} records x {} shots -> {}",
            name,
            dataset.len(),
            builder.config().shots,
            path.display()
        );
    }

    Ok(())
}
