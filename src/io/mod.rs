//! Input and output around the core: CSV ingestion and report rendering.

mod loader;
mod summary;

pub use loader::{load_observations, read_observations, DataError, COLUMNS};
pub use summary::{render_json, render_summary};
