//! CSV ingestion.

use crate::core::{Observation, ObservationSet};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Positional column order expected in the input file.
pub const COLUMNS: [&str; 4] = ["id", "treatment", "outcome", "covariate"];

/// Errors raised while reading an observation file.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: missing {column} column")]
    MissingColumn { line: u64, column: &'static str },

    #[error("line {line}: cannot parse {column} value {value:?}")]
    Parse {
        line: u64,
        column: &'static str,
        value: String,
    },
}

/// Load observations from a CSV file with a header row.
pub fn load_observations(path: impl AsRef<Path>) -> Result<ObservationSet, DataError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_observations(file)
}

/// Read observations from any CSV source with a header row.
///
/// Columns are positional: `id` (integer), then `treatment`, `outcome` and
/// `covariate` (floating point). Header names are not checked.
pub fn read_observations<R: Read>(reader: R) -> Result<ObservationSet, DataError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut set = ObservationSet::default();

    for record in rdr.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line());

        let field = |index: usize| -> Result<&str, DataError> {
            record.get(index).ok_or(DataError::MissingColumn {
                line,
                column: COLUMNS[index],
            })
        };

        let id_raw = field(0)?;
        let id = id_raw.parse::<i64>().map_err(|_| DataError::Parse {
            line,
            column: COLUMNS[0],
            value: id_raw.to_string(),
        })?;

        let mut values = [0.0_f64; 3];
        for (k, value) in values.iter_mut().enumerate() {
            let raw = field(k + 1)?;
            *value = raw.parse::<f64>().map_err(|_| DataError::Parse {
                line,
                column: COLUMNS[k + 1],
                value: raw.to_string(),
            })?;
        }

        set.push(Observation {
            id,
            treatment: values[0],
            outcome: values[1],
            covariate: values[2],
        });
    }

    tracing::debug!(rows = set.len(), "observations loaded");
    Ok(set)
}
