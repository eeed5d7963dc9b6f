//! Treatment-effect regression with full statistical inference.
//!
//! Fits `outcome ~ 1 + treatment + covariate` by ordinary least squares and
//! reports standard errors, t-statistics, p-values, R², adjusted R², the
//! F-test and the mean outcome under counterfactual treatment assignment.
//!
//! # Example
//!
//! ```rust,ignore
//! use counterfactual_ols::prelude::*;
//!
//! let fitted = RegressionFitter::builder()
//!     .solver(SolverType::Inverse)
//!     .build()
//!     .fit(&treatment, &outcome, &covariate)?;
//!
//! let report = InferenceEngine::from_options(fitted.options()).analyze_fit(&fitted)?;
//! println!("β₁ = {} (p = {})", report.coefficients[1], report.p_values[1]);
//! println!("ATE = {}", report.average_treatment_effect());
//! ```

pub mod core;
pub mod distributions;
pub mod inference;
pub mod io;
pub mod solvers;
pub mod utils;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::core::{
        CoefficientRow, FitOptions, FitOptionsBuilder, InferenceWarning, Observation,
        ObservationSet, RssFormula, SolverType, StatisticsReport, Term,
    };
    pub use crate::inference::{predict_counterfactuals, CounterfactualMeans, InferenceEngine};
    pub use crate::io::{load_observations, read_observations, render_json, render_summary};
    pub use crate::solvers::{
        ExplicitInverseSolver, FittedModel, NormalEquationSolver, QrSolver, RegressionError,
        RegressionFitter,
    };
}

pub use crate::core::{FitOptions, ObservationSet, RssFormula, SolverType, StatisticsReport};
pub use crate::inference::InferenceEngine;
pub use crate::solvers::{FittedModel, RegressionError, RegressionFitter};

/// Fit the model and run inference in one call.
pub fn analyze(
    options: FitOptions,
    data: &ObservationSet,
) -> Result<StatisticsReport, RegressionError> {
    let engine = InferenceEngine::from_options(&options);
    let fitted = RegressionFitter::new(options).fit_observations(data)?;
    engine.analyze_fit(&fitted)
}
