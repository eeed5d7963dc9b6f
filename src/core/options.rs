//! Fit options and configuration.

use serde::Serialize;
use thiserror::Error;

/// Strategy used to solve the normal equations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SolverType {
    /// Invert X'X explicitly and multiply by X'y.
    #[default]
    Inverse,
    /// Solve from a QR factorization of X; (X'X)⁻¹ is recovered as R⁻¹R⁻ᵀ.
    Qr,
}

/// Formula used for the residual sum of squares.
///
/// Existing results files use `ScaledSquaredResidualVariance`, which is not
/// the textbook quantity. It equals `Σr²` only when the squared
/// residuals have zero mean, so the two formulas generally disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RssFormula {
    /// `variance(r²) · n`, with the sample (`n - 1`) variance.
    #[default]
    ScaledSquaredResidualVariance,
    /// `Σ r²`.
    SumOfSquares,
}

/// Configuration options for a treatment-effect fit.
#[derive(Debug, Clone)]
pub struct FitOptions {
    /// Normal-equations solver (default: explicit inverse).
    pub solver: SolverType,
    /// RSS formula used by the inference engine.
    pub rss_formula: RssFormula,
    /// Relative pivot tolerance for declaring a matrix singular.
    pub rank_tolerance: f64,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            solver: SolverType::Inverse,
            rss_formula: RssFormula::ScaledSquaredResidualVariance,
            rank_tolerance: 1e-10,
        }
    }
}

/// Errors that can occur when validating fit options.
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("rank_tolerance must be in (0, 1), got {0}")]
    InvalidRankTolerance(f64),
}

impl FitOptions {
    /// Create a new builder for fit options.
    pub fn builder() -> FitOptionsBuilder {
        FitOptionsBuilder::default()
    }

    /// Validate the options and return an error if invalid.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if !(self.rank_tolerance > 0.0 && self.rank_tolerance < 1.0) {
            return Err(OptionsError::InvalidRankTolerance(self.rank_tolerance));
        }
        Ok(())
    }
}

/// Builder for `FitOptions`.
#[derive(Debug, Clone, Default)]
pub struct FitOptionsBuilder {
    options: FitOptions,
}

impl FitOptionsBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the normal-equations solver.
    pub fn solver(mut self, solver: SolverType) -> Self {
        self.options.solver = solver;
        self
    }

    /// Set the RSS formula.
    pub fn rss_formula(mut self, formula: RssFormula) -> Self {
        self.options.rss_formula = formula;
        self
    }

    /// Set the relative pivot tolerance.
    pub fn rank_tolerance(mut self, tol: f64) -> Self {
        self.options.rank_tolerance = tol;
        self
    }

    /// Build and validate the options.
    pub fn build(self) -> Result<FitOptions, OptionsError> {
        self.options.validate()?;
        Ok(self.options)
    }

    /// Build without validation.
    pub fn build_unchecked(self) -> FitOptions {
        self.options
    }
}
