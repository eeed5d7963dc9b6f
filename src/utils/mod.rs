//! Numeric helpers shared by the solvers and the inference engine.

mod matrix;

pub use matrix::{
    back_substitute, check_pivots, design_matrix, detect_constant_columns, invert, mean,
    variance, SingularPivot,
};
