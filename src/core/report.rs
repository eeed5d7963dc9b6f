//! Statistics report produced by the inference engine.

use super::options::RssFormula;
use serde::Serialize;

/// Number of estimated parameters: intercept, treatment, covariate.
pub const N_PARAMETERS: usize = 3;

/// Model degrees of freedom (treatment and covariate).
pub const MODEL_DF: usize = N_PARAMETERS - 1;

/// A term of the fixed three-parameter design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Term {
    Intercept,
    Treatment,
    Covariate,
}

impl Term {
    /// All terms in design-matrix column order.
    pub const ALL: [Term; N_PARAMETERS] = [Term::Intercept, Term::Treatment, Term::Covariate];

    /// Column of the design matrix holding this term.
    pub fn index(self) -> usize {
        match self {
            Term::Intercept => 0,
            Term::Treatment => 1,
            Term::Covariate => 2,
        }
    }

    /// Row label used in the coefficient table.
    pub fn label(self) -> &'static str {
        match self {
            Term::Intercept => "(Intercept)",
            Term::Treatment => "treatment",
            Term::Covariate => "covariate",
        }
    }
}

/// One row of the coefficient table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CoefficientRow {
    pub term: Term,
    pub estimate: f64,
    pub std_error: f64,
    pub t_value: f64,
    pub p_value: f64,
}

/// Conditions worth reporting that do not prevent a report from being built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InferenceWarning {
    /// Residuals vanish: standard errors are zero and t-values are infinite.
    PerfectFit,
    /// The selected RSS formula is zero although the residuals are not, so
    /// standard errors collapse the same way.
    VanishingRss,
}

/// Complete result of a fit plus inference.
#[derive(Debug, Clone, Serialize)]
pub struct StatisticsReport {
    // ========== Coefficient Table ==========
    /// `[β₀, β₁, β₂]` for intercept, treatment, covariate.
    pub coefficients: [f64; N_PARAMETERS],

    /// Standard errors `sqrt((X'X)⁻¹_ii) · σ̂`.
    pub std_errors: [f64; N_PARAMETERS],

    pub t_values: [f64; N_PARAMETERS],

    /// Two-sided p-values on `n - 3` degrees of freedom.
    pub p_values: [f64; N_PARAMETERS],

    // ========== Fit Statistics ==========
    pub residual_std_error: f64,
    pub r_squared: f64,
    pub adj_r_squared: f64,
    pub f_statistic: f64,
    pub f_pvalue: f64,

    /// Residual sum of squares, computed with `rss_formula`.
    pub rss: f64,
    pub rss_formula: RssFormula,

    /// Total sum of squares around the outcome mean.
    pub tss: f64,

    // ========== Counterfactual Means ==========
    pub mean_observed: f64,
    /// Mean predicted outcome with every unit treated.
    pub mean_cf_treatment1: f64,
    /// Mean predicted outcome with no unit treated.
    pub mean_cf_treatment0: f64,

    pub n_observations: usize,
    pub warnings: Vec<InferenceWarning>,
}

impl StatisticsReport {
    /// Residual degrees of freedom (n - 3).
    pub fn residual_df(&self) -> usize {
        self.n_observations.saturating_sub(N_PARAMETERS)
    }

    /// Model degrees of freedom, fixed at 2.
    pub fn model_df(&self) -> usize {
        MODEL_DF
    }

    /// Coefficient table row for one term.
    pub fn row(&self, term: Term) -> CoefficientRow {
        let i = term.index();
        CoefficientRow {
            term,
            estimate: self.coefficients[i],
            std_error: self.std_errors[i],
            t_value: self.t_values[i],
            p_value: self.p_values[i],
        }
    }

    /// Coefficient table in design order.
    pub fn rows(&self) -> [CoefficientRow; N_PARAMETERS] {
        Term::ALL.map(|term| self.row(term))
    }

    /// Difference between the all-treated and none-treated counterfactual means.
    pub fn average_treatment_effect(&self) -> f64 {
        self.mean_cf_treatment1 - self.mean_cf_treatment0
    }

    pub fn is_perfect_fit(&self) -> bool {
        self.warnings.contains(&InferenceWarning::PerfectFit)
    }
}
