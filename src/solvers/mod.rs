//! Normal-equations solvers and the treatment-effect fitter.

mod fitter;
mod inverse;
mod qr;
mod traits;

pub use fitter::{FittedModel, RegressionFitter, RegressionFitterBuilder, MIN_OBSERVATIONS};
pub use inverse::ExplicitInverseSolver;
pub use qr::QrSolver;
pub use traits::{NormalEquationSolver, NormalSolution, RegressionError};
