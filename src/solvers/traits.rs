//! Errors and the normal-equations solver seam.

use crate::core::OptionsError;
use faer::{Col, Mat};
use thiserror::Error;

/// Errors that can occur while fitting or analyzing a model.
#[derive(Debug, Error)]
pub enum RegressionError {
    #[error(
        "dimension mismatch: treatment has {treatment}, outcome has {outcome}, \
         covariate has {covariate} elements"
    )]
    DimensionMismatch {
        treatment: usize,
        outcome: usize,
        covariate: usize,
    },

    #[error("length mismatch: {what} has {got} elements, expected {expected}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("insufficient observations: need at least {needed}, got {got}")]
    InsufficientObservations { needed: usize, got: usize },

    #[error("{matrix} is singular: pivot {pivot} has magnitude {magnitude:e}")]
    SingularMatrix {
        matrix: &'static str,
        pivot: usize,
        magnitude: f64,
    },

    #[error("degenerate input: {quantity} is {value}")]
    DegenerateInput { quantity: &'static str, value: f64 },

    #[error("invalid options: {0}")]
    InvalidOptions(#[from] OptionsError),

    #[error("distribution error: {0}")]
    Distribution(String),
}

/// Coefficients and the inverse Gram matrix produced by a solver.
#[derive(Debug, Clone)]
pub struct NormalSolution {
    /// `β`, one entry per design-matrix column.
    pub coefficients: Col<f64>,
    /// `(X'X)⁻¹`.
    pub gram_inverse: Mat<f64>,
}

/// Solves the least-squares normal equations `X'X β = X'y`.
///
/// Implementations must return `(X'X)⁻¹` alongside `β`, since the standard
/// errors are read off its diagonal.
pub trait NormalEquationSolver {
    /// Short name used in log events.
    fn name(&self) -> &'static str;

    /// Solve for `β` given the design matrix and the outcome vector.
    fn solve(&self, x: &Mat<f64>, y: &Col<f64>) -> Result<NormalSolution, RegressionError>;
}
