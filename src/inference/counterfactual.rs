//! Counterfactual predictions under a fixed treatment assignment.

use crate::utils::mean;
use faer::Col;
use serde::Serialize;

/// Predict every unit's outcome with treatment forced to `treatment`.
///
/// `ŷ_cf(i) = β₀ + β₁·τ + β₂·covariate[i]`
pub fn predict_counterfactuals(
    coefficients: &Col<f64>,
    covariate: &[f64],
    treatment: f64,
) -> Vec<f64> {
    let base = coefficients[0] + coefficients[1] * treatment;
    covariate
        .iter()
        .map(|&c| base + coefficients[2] * c)
        .collect()
}

/// Observed and counterfactual outcome means.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CounterfactualMeans {
    pub observed: f64,
    /// Every unit treated (τ = 1).
    pub treated: f64,
    /// No unit treated (τ = 0).
    pub control: f64,
}

impl CounterfactualMeans {
    pub fn compute(coefficients: &Col<f64>, outcome: &[f64], covariate: &[f64]) -> Self {
        Self {
            observed: mean(outcome),
            treated: mean(&predict_counterfactuals(coefficients, covariate, 1.0)),
            control: mean(&predict_counterfactuals(coefficients, covariate, 0.0)),
        }
    }

    /// `treated − control`; equals `β₁` up to rounding.
    pub fn average_treatment_effect(&self) -> f64 {
        self.treated - self.control
    }
}
