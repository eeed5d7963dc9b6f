//! Core types for treatment-effect regression.

mod observation;
mod options;
mod report;

pub use observation::{Columns, Observation, ObservationSet};
pub use options::{FitOptions, FitOptionsBuilder, OptionsError, RssFormula, SolverType};
pub use report::{
    CoefficientRow, InferenceWarning, StatisticsReport, Term, MODEL_DF, N_PARAMETERS,
};
