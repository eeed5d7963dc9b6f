//! Statistical inference (standard errors, p-values, fit statistics, counterfactuals).

mod coefficient;
mod counterfactual;
mod engine;
mod fit_statistics;

pub use coefficient::CoefficientInference;
pub use counterfactual::{predict_counterfactuals, CounterfactualMeans};
pub use engine::{InferenceEngine, PERFECT_FIT_TOLERANCE};
pub use fit_statistics::{
    adjusted_r_squared, f_pvalue, f_statistic, r_squared, residual_sum_of_squares,
    total_sum_of_squares, FitStatistics,
};
