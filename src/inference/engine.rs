//! Inference engine: turns a fitted model into a statistics report.

use crate::core::{FitOptions, InferenceWarning, RssFormula, StatisticsReport, N_PARAMETERS};
use crate::inference::coefficient::CoefficientInference;
use crate::inference::counterfactual::CounterfactualMeans;
use crate::inference::fit_statistics::{residual_sum_of_squares, FitStatistics};
use crate::solvers::{FittedModel, RegressionError, MIN_OBSERVATIONS};
use faer::{Col, Mat};

/// Ratio `Σr² / TSS` at or below which a fit is reported as perfect.
pub const PERFECT_FIT_TOLERANCE: f64 = 1e-20;

/// Computes standard errors, tests and counterfactual means for a fit.
#[derive(Debug, Clone, Copy, Default)]
pub struct InferenceEngine {
    rss_formula: RssFormula,
}

impl InferenceEngine {
    pub fn new(rss_formula: RssFormula) -> Self {
        Self { rss_formula }
    }

    pub fn from_options(options: &FitOptions) -> Self {
        Self::new(options.rss_formula)
    }

    pub fn rss_formula(&self) -> RssFormula {
        self.rss_formula
    }

    /// Analyze a model produced by [`RegressionFitter`](crate::solvers::RegressionFitter).
    pub fn analyze_fit(&self, fitted: &FittedModel) -> Result<StatisticsReport, RegressionError> {
        self.analyze(
            fitted.design(),
            fitted.outcome(),
            fitted.coefficients(),
            fitted.gram_inverse(),
            fitted.residuals(),
            fitted.covariate(),
        )
    }

    /// Build the statistics report from the fitter's outputs.
    ///
    /// # Arguments
    /// * `x` - Design matrix `[1 | treatment | covariate]`
    /// * `y` - Observed outcome
    /// * `coefficients` - `[β₀, β₁, β₂]`
    /// * `gram_inverse` - `(X'X)⁻¹`
    /// * `residuals` - `y − Xβ`
    /// * `covariate` - Covariate column used for the counterfactual predictions
    pub fn analyze(
        &self,
        x: &Mat<f64>,
        y: &Col<f64>,
        coefficients: &Col<f64>,
        gram_inverse: &Mat<f64>,
        residuals: &Col<f64>,
        covariate: &[f64],
    ) -> Result<StatisticsReport, RegressionError> {
        let n = y.nrows();
        validate_shapes(x, n, coefficients, gram_inverse, residuals, covariate)?;

        let stats = FitStatistics::compute(y, residuals, self.rss_formula)?;
        let residual_df = n - N_PARAMETERS;

        let mut warnings = Vec::new();
        let sum_sq = residual_sum_of_squares(residuals, RssFormula::SumOfSquares);
        if sum_sq <= PERFECT_FIT_TOLERANCE * stats.tss {
            tracing::warn!(sum_sq, tss = stats.tss, "residuals vanish; t-values are unbounded");
            warnings.push(InferenceWarning::PerfectFit);
        } else if stats.rss <= PERFECT_FIT_TOLERANCE * stats.tss {
            // Squared residuals of equal magnitude have zero variance
            tracing::warn!(
                rss = stats.rss,
                sum_sq,
                formula = ?self.rss_formula,
                "selected RSS formula vanishes; t-values are unbounded"
            );
            warnings.push(InferenceWarning::VanishingRss);
        }

        let std_errors =
            CoefficientInference::standard_errors(gram_inverse, stats.residual_std_error);
        let t_values = CoefficientInference::t_statistics(coefficients, &std_errors);
        let p_values = CoefficientInference::p_values(&t_values, residual_df)?;

        let outcome: Vec<f64> = y.iter().copied().collect();
        let means = CounterfactualMeans::compute(coefficients, &outcome, covariate);

        tracing::debug!(
            r_squared = stats.r_squared,
            f_statistic = stats.f_statistic,
            residual_df,
            "inference complete"
        );

        Ok(StatisticsReport {
            coefficients: std::array::from_fn(|j| coefficients[j]),
            std_errors,
            t_values,
            p_values,
            residual_std_error: stats.residual_std_error,
            r_squared: stats.r_squared,
            adj_r_squared: stats.adj_r_squared,
            f_statistic: stats.f_statistic,
            f_pvalue: stats.f_pvalue,
            rss: stats.rss,
            rss_formula: self.rss_formula,
            tss: stats.tss,
            mean_observed: means.observed,
            mean_cf_treatment1: means.treated,
            mean_cf_treatment0: means.control,
            n_observations: n,
            warnings,
        })
    }
}

fn validate_shapes(
    x: &Mat<f64>,
    n: usize,
    coefficients: &Col<f64>,
    gram_inverse: &Mat<f64>,
    residuals: &Col<f64>,
    covariate: &[f64],
) -> Result<(), RegressionError> {
    let checks = [
        ("design matrix rows", n, x.nrows()),
        ("design matrix columns", N_PARAMETERS, x.ncols()),
        ("coefficients", N_PARAMETERS, coefficients.nrows()),
        ("inverse Gram matrix rows", N_PARAMETERS, gram_inverse.nrows()),
        ("inverse Gram matrix columns", N_PARAMETERS, gram_inverse.ncols()),
        ("residuals", n, residuals.nrows()),
        ("covariate", n, covariate.len()),
    ];

    for (what, expected, got) in checks {
        if expected != got {
            return Err(RegressionError::LengthMismatch {
                what,
                expected,
                got,
            });
        }
    }

    if n < MIN_OBSERVATIONS {
        return Err(RegressionError::InsufficientObservations {
            needed: MIN_OBSERVATIONS,
            got: n,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solvers::RegressionFitter;

    fn noisy_fit() -> FittedModel {
        let t = [0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0];
        let c = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let noise = [0.3, -0.2, 0.1, 0.4, -0.5, 0.2, -0.1, -0.3];
        let y: Vec<f64> = (0..8).map(|i| 1.0 + 2.0 * t[i] + 0.5 * c[i] + noise[i]).collect();

        RegressionFitter::default().fit(&t, &y, &c).unwrap()
    }

    #[test]
    fn test_report_is_consistent() {
        let fitted = noisy_fit();
        let report = InferenceEngine::default().analyze_fit(&fitted).unwrap();

        assert_eq!(report.n_observations, 8);
        assert_eq!(report.residual_df(), 5);
        for j in 0..3 {
            let recovered = report.t_values[j] * report.std_errors[j];
            assert!((recovered - report.coefficients[j]).abs() < 1e-10);
            assert!(report.p_values[j] >= 0.0 && report.p_values[j] <= 1.0);
        }
        assert!((report.average_treatment_effect() - report.coefficients[1]).abs() < 1e-10);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_rss_formula_is_recorded() {
        let fitted = noisy_fit();
        let scaled = InferenceEngine::default().analyze_fit(&fitted).unwrap();
        let textbook = InferenceEngine::new(RssFormula::SumOfSquares)
            .analyze_fit(&fitted)
            .unwrap();

        assert_eq!(scaled.rss_formula, RssFormula::ScaledSquaredResidualVariance);
        assert_eq!(textbook.rss_formula, RssFormula::SumOfSquares);
        assert!((scaled.rss - textbook.rss).abs() > 1e-6);
        assert_eq!(scaled.coefficients, textbook.coefficients);
    }

    #[test]
    fn test_perfect_fit_is_flagged() {
        let t = [0.0, 1.0, 0.0, 1.0, 0.0];
        let c = [1.0, 2.0, 4.0, 3.0, 6.0];
        let y: Vec<f64> = (0..5).map(|i| 1.0 + 2.0 * t[i] + 3.0 * c[i]).collect();

        let fitted = RegressionFitter::default().fit(&t, &y, &c).unwrap();
        let report = InferenceEngine::default().analyze_fit(&fitted).unwrap();

        assert!(report.is_perfect_fit());
        for j in 0..3 {
            assert!(!report.t_values[j].is_finite() || report.t_values[j].abs() > 1e6);
            assert!(report.p_values[j] < 1e-6);
        }
    }

    #[test]
    fn test_equal_magnitude_residuals_are_flagged() {
        // Balanced 2x2 design; the ±1 pattern is orthogonal to 1, t and c
        let t = [0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 1.0];
        let c = [0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0];
        let r = [1.0, -1.0, -1.0, 1.0, 1.0, -1.0, -1.0, 1.0];
        let y: Vec<f64> = (0..8).map(|i| 1.0 + 2.0 * t[i] + 3.0 * c[i] + r[i]).collect();

        let fitted = RegressionFitter::default().fit(&t, &y, &c).unwrap();
        let report = InferenceEngine::default().analyze_fit(&fitted).unwrap();

        assert_eq!(report.warnings, vec![InferenceWarning::VanishingRss]);
        assert!(!report.is_perfect_fit());

        let textbook = InferenceEngine::new(RssFormula::SumOfSquares)
            .analyze_fit(&fitted)
            .unwrap();
        assert!(textbook.warnings.is_empty());
    }

    #[test]
    fn test_shape_mismatch() {
        let fitted = noisy_fit();
        let short_covariate = &fitted.covariate()[..5];

        let err = InferenceEngine::default()
            .analyze(
                fitted.design(),
                fitted.outcome(),
                fitted.coefficients(),
                fitted.gram_inverse(),
                fitted.residuals(),
                short_covariate,
            )
            .unwrap_err();

        assert!(matches!(
            err,
            RegressionError::LengthMismatch { what: "covariate", expected: 8, got: 5 }
        ));
    }
}
