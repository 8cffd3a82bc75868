use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidateError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to serialize rules: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Model(#[from] ctdoc_model::ModelError),
}

pub type Result<T> = std::result::Result<T, ValidateError>;
