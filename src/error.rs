use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("source table could not be read at {path:?}: {source}")]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("expected {expected} header rows, found {found}")]
    MissingHeader { expected: usize, found: usize },

    #[error("column {column} does not look like '{expected}' in the header rows; the table layout may have shifted")]
    LayoutMismatch { column: usize, expected: String },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("artifact i/o failed at {path:?}: {source}")]
    Artifact {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DatasetError>;
