//! Measurement simulation, constrained reconstruction and quantum metrics
//!
//! This crate implements the numerical core of single-qubit state tomography:
//!
//! - [`RandomStateSampler`]: Haar-random pure states for data generation
//! - [`PauliMeasurementSimulator`]: Born-rule sampling of Pauli outcomes
//! - [`DensityMatrixReconstructor`]: unconstrained 4-vector → valid state
//! - [`QuantumMetrics`]: fidelity, trace distance, Hilbert–Schmidt loss
//!
//! Randomness is always injected as a `rand::Rng`, so a seeded generator makes
//! the whole pipeline reproducible.
//!
//! # Example
//!
//! ```
//! use qst_state::{
//!     fidelity, DensityMatrixReconstructor, PauliMeasurementSimulator,
//!     RandomStateSampler, ReconstructionParameters,
//! };
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//! let truth = RandomStateSampler::new().sample(&mut rng).unwrap();
//! let record = PauliMeasurementSimulator::new()
//!     .measure_random_bases(&truth, 50, &mut rng)
//!     .unwrap();
//! assert_eq!(record.len(), 50);
//!
//! let guess = DensityMatrixReconstructor::new()
//!     .reconstruct(&ReconstructionParameters::new(0.0, 0.0, 0.0, 0.0))
//!     .unwrap();
//! let f = fidelity(&guess, &truth).unwrap();
//! assert!((f - 0.5).abs() < 1e-9);
//! ```

pub mod measurement;
pub mod metrics;
pub mod reconstruction;
pub mod sampler;

pub use measurement::PauliMeasurementSimulator;
pub use metrics::{fidelity, trace_distance, QuantumMetrics};
pub use reconstruction::{softplus, DensityMatrixReconstructor, ReconstructionParameters};
pub use sampler::RandomStateSampler;
