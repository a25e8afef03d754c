use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading input files.
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A cell that must hold one of a fixed set of values (or a bounded
    /// index) did not. `row` is 1-based; the header is row 0.
    #[error("invalid {column} '{value}' on row {row}")]
    InvalidValue {
        column: &'static str,
        value: String,
        row: usize,
    },
}
