//! Observation records.

use serde::{Deserialize, Serialize};

/// A single row of the input dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Row identifier. Carried through for reference, never used in the fit.
    pub id: i64,
    pub treatment: f64,
    pub outcome: f64,
    pub covariate: f64,
}

/// Column-major view of an observation set, ready for the fitter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Columns {
    pub treatment: Vec<f64>,
    pub outcome: Vec<f64>,
    pub covariate: Vec<f64>,
}

/// Ordered sequence of observations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObservationSet {
    observations: Vec<Observation>,
}

impl ObservationSet {
    pub fn new(observations: Vec<Observation>) -> Self {
        Self { observations }
    }

    pub fn push(&mut self, observation: Observation) {
        self.observations.push(observation);
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Observation> {
        self.observations.iter()
    }

    pub fn ids(&self) -> Vec<i64> {
        self.observations.iter().map(|o| o.id).collect()
    }

    /// Split the rows into treatment, outcome and covariate columns.
    pub fn columns(&self) -> Columns {
        let n = self.observations.len();
        let mut columns = Columns {
            treatment: Vec::with_capacity(n),
            outcome: Vec::with_capacity(n),
            covariate: Vec::with_capacity(n),
        };

        for o in &self.observations {
            columns.treatment.push(o.treatment);
            columns.outcome.push(o.outcome);
            columns.covariate.push(o.covariate);
        }

        columns
    }
}

impl FromIterator<Observation> for ObservationSet {
    fn from_iter<I: IntoIterator<Item = Observation>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
