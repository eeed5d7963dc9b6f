//! Goodness-of-fit statistics for the three-parameter design.

use crate::core::{RssFormula, MODEL_DF, N_PARAMETERS};
use crate::distributions::FisherSnedecorBeta;
use crate::solvers::RegressionError;
use crate::utils::{mean, variance};
use faer::Col;

/// Residual sum of squares.
///
/// With `ScaledSquaredResidualVariance` this is `variance(r²) · n`, which is
/// the value existing results files were produced with.
pub fn residual_sum_of_squares(residuals: &Col<f64>, formula: RssFormula) -> f64 {
    let squared: Vec<f64> = residuals.iter().map(|&r| r * r).collect();

    match formula {
        RssFormula::ScaledSquaredResidualVariance => {
            // Compensated variance can round a hair below zero
            (variance(&squared) * squared.len() as f64).max(0.0)
        }
        RssFormula::SumOfSquares => squared.iter().sum(),
    }
}

/// Total sum of squares `Σ(yᵢ − ȳ)²`.
pub fn total_sum_of_squares(y: &Col<f64>) -> f64 {
    let values: Vec<f64> = y.iter().copied().collect();
    let y_mean = mean(&values);
    values.iter().map(|&v| (v - y_mean) * (v - y_mean)).sum()
}

/// `1 − RSS/TSS`.
pub fn r_squared(rss: f64, tss: f64) -> f64 {
    1.0 - rss / tss
}

/// `1 − (1 − R²) · n / (n − 3)`.
///
/// The scaling uses `n` rather than `n − 1` in the numerator.
pub fn adjusted_r_squared(r_squared: f64, n: usize) -> f64 {
    let n = n as f64;
    1.0 - (1.0 - r_squared) * (n / (n - N_PARAMETERS as f64))
}

/// `(R²/2) / ((1 − R²)/2)`.
pub fn f_statistic(r_squared: f64) -> f64 {
    let df = MODEL_DF as f64;
    (r_squared / df) / ((1.0 - r_squared) / df)
}

/// `P(F > f)` for `F ~ F(2, residual_df)`.
pub fn f_pvalue(f_statistic: f64, residual_df: usize) -> Result<f64, RegressionError> {
    let dist = FisherSnedecorBeta::new(MODEL_DF as f64, residual_df as f64)?;
    Ok(dist.sf(f_statistic))
}

/// Fit statistics computed from the outcome and the residuals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitStatistics {
    pub rss: f64,
    pub tss: f64,
    pub residual_std_error: f64,
    pub r_squared: f64,
    pub adj_r_squared: f64,
    pub f_statistic: f64,
    pub f_pvalue: f64,
}

impl FitStatistics {
    /// Compute every fit statistic in dependency order.
    ///
    /// Returns `DegenerateInput` when the outcome has zero total variance.
    pub fn compute(
        y: &Col<f64>,
        residuals: &Col<f64>,
        formula: RssFormula,
    ) -> Result<Self, RegressionError> {
        let n = y.nrows();
        let residual_df = n.saturating_sub(N_PARAMETERS);

        let rss = residual_sum_of_squares(residuals, formula);
        let residual_std_error = (rss / residual_df as f64).sqrt();

        let tss = total_sum_of_squares(y);
        if !(tss > 0.0) {
            return Err(RegressionError::DegenerateInput {
                quantity: "total sum of squares of the outcome",
                value: tss,
            });
        }

        let r_squared = r_squared(rss, tss);
        let adj_r_squared = adjusted_r_squared(r_squared, n);
        let f_statistic = f_statistic(r_squared);
        let f_pvalue = f_pvalue(f_statistic, residual_df)?;

        Ok(Self {
            rss,
            tss,
            residual_std_error,
            r_squared,
            adj_r_squared,
            f_statistic,
            f_pvalue,
        })
    }
}
