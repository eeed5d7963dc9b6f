//! Treatment-effect regression fitter.

use crate::core::{
    FitOptions, FitOptionsBuilder, ObservationSet, RssFormula, SolverType, N_PARAMETERS,
};
use crate::solvers::inverse::ExplicitInverseSolver;
use crate::solvers::qr::QrSolver;
use crate::solvers::traits::{NormalEquationSolver, RegressionError};
use crate::utils::{design_matrix, detect_constant_columns};
use faer::{Col, Mat};

/// Smallest dataset with a positive residual degree of freedom.
pub const MIN_OBSERVATIONS: usize = N_PARAMETERS + 1;

/// Fits `outcome ~ 1 + treatment + covariate` by least squares.
///
/// # Example
///
/// ```rust,ignore
/// use counterfactual_ols::solvers::RegressionFitter;
///
/// let fitted = RegressionFitter::builder()
///     .build()
///     .fit(&treatment, &outcome, &covariate)?;
///
/// println!("treatment effect = {}", fitted.coefficients()[1]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RegressionFitter {
    options: FitOptions,
}

impl RegressionFitter {
    /// Create a new fitter with the given options.
    pub fn new(options: FitOptions) -> Self {
        Self { options }
    }

    /// Create a builder for configuring the fitter.
    pub fn builder() -> RegressionFitterBuilder {
        RegressionFitterBuilder::default()
    }

    pub fn options(&self) -> &FitOptions {
        &self.options
    }

    /// Fit the model with the solver selected in the options.
    pub fn fit(
        &self,
        treatment: &[f64],
        outcome: &[f64],
        covariate: &[f64],
    ) -> Result<FittedModel, RegressionError> {
        self.options.validate()?;

        let tol = self.options.rank_tolerance;
        match self.options.solver {
            SolverType::Inverse => self.fit_with_solver(
                &ExplicitInverseSolver::new(tol),
                treatment,
                outcome,
                covariate,
            ),
            SolverType::Qr => {
                self.fit_with_solver(&QrSolver::new(tol), treatment, outcome, covariate)
            }
        }
    }

    /// Fit the columns of an observation set.
    pub fn fit_observations(&self, data: &ObservationSet) -> Result<FittedModel, RegressionError> {
        let columns = data.columns();
        self.fit(&columns.treatment, &columns.outcome, &columns.covariate)
    }

    /// Fit the model with an explicit solver.
    pub fn fit_with_solver<S: NormalEquationSolver + ?Sized>(
        &self,
        solver: &S,
        treatment: &[f64],
        outcome: &[f64],
        covariate: &[f64],
    ) -> Result<FittedModel, RegressionError> {
        let n = outcome.len();

        if treatment.len() != n || covariate.len() != n {
            return Err(RegressionError::DimensionMismatch {
                treatment: treatment.len(),
                outcome: n,
                covariate: covariate.len(),
            });
        }

        if n < MIN_OBSERVATIONS {
            return Err(RegressionError::InsufficientObservations {
                needed: MIN_OBSERVATIONS,
                got: n,
            });
        }

        let x = design_matrix(treatment, covariate);
        let y = Col::from_fn(n, |i| outcome[i]);

        // A constant predictor duplicates the intercept column
        let constant = detect_constant_columns(&x, self.options.rank_tolerance);
        if constant[1] || constant[2] {
            tracing::warn!(
                treatment_constant = constant[1],
                covariate_constant = constant[2],
                "predictor column is constant; the Gram matrix will be singular"
            );
        }

        tracing::debug!(n, solver = solver.name(), "solving normal equations");
        let solution = solver.solve(&x, &y)?;

        let fitted_values = &x * &solution.coefficients;
        let residuals = Col::from_fn(n, |i| y[i] - fitted_values[i]);

        Ok(FittedModel {
            options: self.options.clone(),
            x,
            y,
            covariate: covariate.to_vec(),
            coefficients: solution.coefficients,
            gram_inverse: solution.gram_inverse,
            fitted_values,
            residuals,
        })
    }
}

/// A fitted treatment-effect model.
#[derive(Debug, Clone)]
pub struct FittedModel {
    options: FitOptions,
    x: Mat<f64>,
    y: Col<f64>,
    covariate: Vec<f64>,
    coefficients: Col<f64>,
    /// (X'X)⁻¹, the unscaled coefficient covariance
    gram_inverse: Mat<f64>,
    fitted_values: Col<f64>,
    residuals: Col<f64>,
}

impl FittedModel {
    /// Get the options used to fit this model.
    pub fn options(&self) -> &FitOptions {
        &self.options
    }

    pub fn rss_formula(&self) -> RssFormula {
        self.options.rss_formula
    }

    /// Design matrix `[1 | treatment | covariate]`.
    pub fn design(&self) -> &Mat<f64> {
        &self.x
    }

    pub fn outcome(&self) -> &Col<f64> {
        &self.y
    }

    pub fn covariate(&self) -> &[f64] {
        &self.covariate
    }

    /// `[β₀, β₁, β₂]`.
    pub fn coefficients(&self) -> &Col<f64> {
        &self.coefficients
    }

    pub fn gram_inverse(&self) -> &Mat<f64> {
        &self.gram_inverse
    }

    pub fn fitted_values(&self) -> &Col<f64> {
        &self.fitted_values
    }

    pub fn residuals(&self) -> &Col<f64> {
        &self.residuals
    }

    pub fn n_observations(&self) -> usize {
        self.y.nrows()
    }

    /// Predicted outcome for a single unit.
    pub fn predict(&self, treatment: f64, covariate: f64) -> f64 {
        self.coefficients[0] + self.coefficients[1] * treatment + self.coefficients[2] * covariate
    }
}

/// Builder for `RegressionFitter`.
#[derive(Debug, Clone, Default)]
pub struct RegressionFitterBuilder {
    builder: FitOptionsBuilder,
}

impl RegressionFitterBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the normal-equations solver.
    pub fn solver(mut self, solver: SolverType) -> Self {
        self.builder = self.builder.solver(solver);
        self
    }

    /// Set the RSS formula carried to the inference engine.
    pub fn rss_formula(mut self, formula: RssFormula) -> Self {
        self.builder = self.builder.rss_formula(formula);
        self
    }

    /// Set the relative pivot tolerance.
    pub fn rank_tolerance(mut self, tol: f64) -> Self {
        self.builder = self.builder.rank_tolerance(tol);
        self
    }

    /// Build the fitter. Options are validated when `fit` is called.
    pub fn build(self) -> RegressionFitter {
        RegressionFitter::new(self.builder.build_unchecked())
    }
}
