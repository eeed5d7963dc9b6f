//! Explicit normal-equations solve: `β = (X'X)⁻¹ X'y`.

use crate::solvers::traits::{NormalEquationSolver, NormalSolution, RegressionError};
use crate::utils::{check_pivots, invert, SingularPivot};
use faer::{Col, Mat};

/// Forms the Gram matrix, inverts it and multiplies by `X'y`.
///
/// Rank is judged on the R factor of `X`, since `X'X` has the squared
/// condition number and a relative test on its pivots would reject designs
/// that are ill-conditioned but invertible. The inversion itself only fails
/// on an exactly vanishing pivot.
///
/// Forming `X'X` still loses roughly twice the digits that a factorization of
/// `X` would; see [`QrSolver`](crate::solvers::QrSolver).
#[derive(Debug, Clone, Copy)]
pub struct ExplicitInverseSolver {
    rank_tolerance: f64,
}

impl ExplicitInverseSolver {
    pub fn new(rank_tolerance: f64) -> Self {
        Self { rank_tolerance }
    }
}

impl Default for ExplicitInverseSolver {
    fn default() -> Self {
        Self::new(1e-10)
    }
}

impl NormalEquationSolver for ExplicitInverseSolver {
    fn name(&self) -> &'static str {
        "inverse"
    }

    fn solve(&self, x: &Mat<f64>, y: &Col<f64>) -> Result<NormalSolution, RegressionError> {
        let singular = |p: SingularPivot| RegressionError::SingularMatrix {
            matrix: "X'X",
            pivot: p.index,
            magnitude: p.magnitude,
        };

        let qr: faer::linalg::solvers::Qr<f64> = x.qr();
        check_pivots(&qr.R().to_owned(), x.ncols(), self.rank_tolerance).map_err(singular)?;

        let xtx = x.transpose() * x;
        let gram_inverse = invert(&xtx, 0.0).map_err(singular)?;

        let xty = x.transpose() * y;
        let coefficients = &gram_inverse * &xty;

        Ok(NormalSolution {
            coefficients,
            gram_inverse,
        })
    }
}
