//! Coefficient inference calculations.

use crate::core::N_PARAMETERS;
use crate::distributions::students_t;
use crate::solvers::RegressionError;
use faer::{Col, Mat};
use statrs::distribution::ContinuousCDF;

/// Computes inference statistics for regression coefficients.
pub struct CoefficientInference;

impl CoefficientInference {
    /// Compute standard errors from the inverse Gram matrix.
    ///
    /// SE(β_j) = sqrt((X'X)^(-1)_{jj}) · σ̂
    pub fn standard_errors(
        gram_inverse: &Mat<f64>,
        residual_std_error: f64,
    ) -> [f64; N_PARAMETERS] {
        std::array::from_fn(|j| {
            let diag = gram_inverse[(j, j)];
            if diag >= 0.0 {
                diag.sqrt() * residual_std_error
            } else {
                f64::NAN
            }
        })
    }

    /// Compute t-statistics for coefficients.
    ///
    /// t_j = β_j / SE(β_j). A zero standard error yields `±∞` following the
    /// sign of the coefficient, or NaN when the coefficient is zero too.
    pub fn t_statistics(
        coefficients: &Col<f64>,
        std_errors: &[f64; N_PARAMETERS],
    ) -> [f64; N_PARAMETERS] {
        std::array::from_fn(|j| {
            let beta = coefficients[j];
            let se = std_errors[j];

            if se.is_nan() {
                f64::NAN
            } else if se == 0.0 {
                if beta == 0.0 {
                    f64::NAN
                } else {
                    f64::INFINITY.copysign(beta)
                }
            } else {
                beta / se
            }
        })
    }

    /// Compute p-values from t-statistics.
    ///
    /// p_j = 2 * (1 - P(T ≤ |t_j|)) where T ~ t(df)
    pub fn p_values(
        t_statistics: &[f64; N_PARAMETERS],
        df: usize,
    ) -> Result<[f64; N_PARAMETERS], RegressionError> {
        let t_dist = students_t(df as f64)?;

        Ok(std::array::from_fn(|j| {
            let t = t_statistics[j];
            if t.is_nan() {
                f64::NAN
            } else if t.is_infinite() {
                0.0
            } else {
                // Two-tailed test
                2.0 * (1.0 - t_dist.cdf(t.abs()))
            }
        }))
    }
}
