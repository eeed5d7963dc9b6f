//! QR-based least-squares solve.

use crate::solvers::traits::{NormalEquationSolver, NormalSolution, RegressionError};
use crate::utils::{back_substitute, check_pivots};
use faer::{Col, Mat};

/// Solves `R β = Q'y` from `X = QR` without forming `X'X`.
///
/// The inverse Gram matrix is recovered as `(X'X)⁻¹ = R⁻¹R⁻ᵀ`.
#[derive(Debug, Clone, Copy)]
pub struct QrSolver {
    rank_tolerance: f64,
}

impl QrSolver {
    pub fn new(rank_tolerance: f64) -> Self {
        Self { rank_tolerance }
    }
}

impl Default for QrSolver {
    fn default() -> Self {
        Self::new(1e-10)
    }
}

impl NormalEquationSolver for QrSolver {
    fn name(&self) -> &'static str {
        "qr"
    }

    fn solve(&self, x: &Mat<f64>, y: &Col<f64>) -> Result<NormalSolution, RegressionError> {
        let p = x.ncols();

        let qr: faer::linalg::solvers::Qr<f64> = x.qr();
        // n × p; the full Q is n × n
        let q = qr.compute_thin_Q();
        let r = qr.R().to_owned();

        check_pivots(&r, p, self.rank_tolerance).map_err(|pivot| {
            RegressionError::SingularMatrix {
                matrix: "R factor of X",
                pivot: pivot.index,
                magnitude: pivot.magnitude,
            }
        })?;

        let qty = q.transpose() * y;
        let coefficients = back_substitute(&r, &qty, p);

        // R⁻¹, one column per unit vector
        let mut r_inv = Mat::zeros(p, p);
        for col in 0..p {
            let unit = Col::from_fn(p, |i| if i == col { 1.0 } else { 0.0 });
            let solved = back_substitute(&r, &unit, p);
            for i in 0..p {
                r_inv[(i, col)] = solved[i];
            }
        }
        let gram_inverse = r_inv.as_ref() * r_inv.transpose();

        Ok(NormalSolution {
            coefficients,
            gram_inverse,
        })
    }
}
