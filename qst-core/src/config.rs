//! Numerical tolerance configuration

/// Tolerances shared by validation, sampling and metrics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    /// Density matrix validity tolerance
    ///
    /// Bounds the Hermiticity defect, the deviation of the trace from one and
    /// how far below zero an eigenvalue may fall.
    ///
    /// Default: 1e-6
    pub validity: f64,

    /// Allowed excursion of a Born-rule probability outside [0, 1], on top
    /// of what the validity tolerance already permits
    ///
    /// Probabilities within [`Tolerances::probability_band`] are clamped;
    /// anything further out is a
    /// [`ProbabilityRange`](crate::TomographyError::ProbabilityRange) error.
    ///
    /// Default: 1e-6
    pub probability: f64,

    /// Largest imaginary part tolerated in a quantity that must be real
    ///
    /// Default: 1e-6
    pub imaginary: f64,

    /// Norm below which a sampled state vector counts as degenerate
    ///
    /// Default: 1e-12
    pub degenerate_norm: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            validity: 1e-6,
            probability: 1e-6,
            imaginary: 1e-6,
            degenerate_norm: 1e-12,
        }
    }
}

impl Tolerances {
    /// Create tolerances with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Tight tolerances for inputs known to be exact
    pub fn strict() -> Self {
        Self {
            validity: 1e-10,
            probability: 1e-10,
            imaginary: 1e-10,
            ..Default::default()
        }
    }

    /// Half-width of the band a Born-rule probability may leave [0, 1] by
    ///
    /// A state admitted under `validity` has trace at most `1 + validity` and
    /// eigenvalues at least `-validity`, so `|Tr(ρP)| ≤ 1 + 3·validity` and
    /// the probability `(1 + Tr(ρP))/2` overshoots by at most `1.5·validity`.
    pub fn probability_band(&self) -> f64 {
        self.probability + 1.5 * self.validity
    }

    /// Largest fidelity accepted before clamping to one
    ///
    /// Fidelity is bounded by the product of the traces, which reaches
    /// `(1 + validity)²` for states admitted under `validity`.
    pub fn fidelity_ceiling(&self) -> f64 {
        (1.0 + self.validity).powi(2) + self.validity
    }

    /// Set the validity tolerance
    pub fn with_validity(mut self, tolerance: f64) -> Self {
        self.validity = tolerance;
        self
    }

    /// Set the probability clamping tolerance
    pub fn with_probability(mut self, tolerance: f64) -> Self {
        self.probability = tolerance;
        self
    }

    /// Set the imaginary-part tolerance
    pub fn with_imaginary(mut self, tolerance: f64) -> Self {
        self.imaginary = tolerance;
        self
    }

    /// Set the degenerate norm threshold
    pub fn with_degenerate_norm(mut self, threshold: f64) -> Self {
        self.degenerate_norm = threshold;
        self
    }
}
