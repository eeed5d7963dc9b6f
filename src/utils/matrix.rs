//! Matrix and vector utility functions.

use faer::{Col, Mat};

/// Pivot that failed the rank check while inverting a matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SingularPivot {
    /// Row of the triangular factor whose diagonal vanished.
    pub index: usize,
    /// Absolute value of that diagonal entry.
    pub magnitude: f64,
}

/// Assemble the `n × 3` design matrix `[1 | treatment | covariate]`.
///
/// Callers are responsible for passing equal-length slices.
pub fn design_matrix(treatment: &[f64], covariate: &[f64]) -> Mat<f64> {
    debug_assert_eq!(treatment.len(), covariate.len());
    Mat::from_fn(treatment.len(), 3, |i, j| match j {
        0 => 1.0,
        1 => treatment[i],
        _ => covariate[i],
    })
}

/// Detect columns that are constant (zero variance).
pub fn detect_constant_columns(x: &Mat<f64>, tolerance: f64) -> Vec<bool> {
    let n_cols = x.ncols();
    let n_rows = x.nrows();

    if n_rows == 0 {
        return vec![true; n_cols];
    }

    (0..n_cols)
        .map(|j| {
            let first = x[(0, j)];
            (1..n_rows).all(|i| (x[(i, j)] - first).abs() < tolerance)
        })
        .collect()
}

/// Solve `R * b = rhs` for the leading `size × size` upper-triangular block of `r`.
pub fn back_substitute(r: &Mat<f64>, rhs: &Col<f64>, size: usize) -> Col<f64> {
    let mut b = Col::zeros(size);
    for i in (0..size).rev() {
        let mut sum = rhs[i];
        for j in (i + 1)..size {
            sum -= r[(i, j)] * b[j];
        }
        b[i] = sum / r[(i, i)];
    }
    b
}

/// Check the diagonal of an upper-triangular factor against a relative tolerance.
///
/// A pivot is rejected when `|r_ii| <= tolerance * max_j |r_jj|`, so the test
/// does not depend on the scale of the data.
pub fn check_pivots(r: &Mat<f64>, size: usize, tolerance: f64) -> Result<(), SingularPivot> {
    let largest = (0..size).map(|i| r[(i, i)].abs()).fold(0.0_f64, f64::max);

    for i in 0..size {
        let magnitude = r[(i, i)].abs();
        if !magnitude.is_finite() || magnitude <= tolerance * largest || largest == 0.0 {
            return Err(SingularPivot { index: i, magnitude });
        }
    }
    Ok(())
}

/// Invert a square matrix using QR decomposition.
///
/// Solves `R * X = Q'` column by column, so `X = R⁻¹Q' = A⁻¹`.
pub fn invert(matrix: &Mat<f64>, tolerance: f64) -> Result<Mat<f64>, SingularPivot> {
    let n = matrix.nrows();
    debug_assert_eq!(n, matrix.ncols());

    let qr: faer::linalg::solvers::Qr<f64> = matrix.qr();
    let q = qr.compute_Q();
    let r = qr.R().to_owned();

    check_pivots(&r, n, tolerance)?;

    let qt = q.transpose();
    let mut inv = Mat::zeros(n, n);

    for col in 0..n {
        let rhs = Col::from_fn(n, |i| qt[(i, col)]);
        let solved = back_substitute(&r, &rhs, n);
        for i in 0..n {
            inv[(i, col)] = solved[i];
        }
    }

    Ok(inv)
}

/// Arithmetic mean. Returns NaN for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    let sum: f64 = values.iter().sum();
    sum / values.len() as f64
}

/// Unbiased sample variance (`n - 1` denominator).
///
/// Uses the compensated two-pass form: the squared deviations are corrected by
/// the (ideally zero) sum of deviations to absorb rounding in the mean.
pub fn variance(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let m = mean(values);

    let (ss, compensation) = values.iter().fold((0.0, 0.0), |(ss, comp), &v| {
        let d = v - m;
        (ss + d * d, comp + d)
    });

    (ss - compensation * compensation / n) / (n - 1.0)
}
