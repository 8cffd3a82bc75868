use std::path::PathBuf;

use thiserror::Error;

use ctdoc_ingest::IngestError;
use ctdoc_model::ModelError;
use ctdoc_output::OutputError;
use ctdoc_standards::StandardsError;
use ctdoc_validate::ValidateError;

/// Errors raised by the orchestrator itself.
///
/// Construction failures are returned from [`Automation::new`]; everything
/// else surfaces only when run bookkeeping or report persistence breaks.
///
/// [`Automation::new`]: crate::Automation::new
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("protocol file does not exist: {path}")]
    MissingInput { path: PathBuf },

    #[error("parser '{parser}' requires an API credential")]
    MissingCredential { parser: &'static str },

    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// A generation step failure, recorded on the task rather than raised.
#[derive(Debug, Error)]
pub enum StepError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Standards(#[from] StandardsError),

    #[error(transparent)]
    Validate(#[from] ValidateError),

    #[error(transparent)]
    Output(#[from] OutputError),
}

pub type Result<T> = std::result::Result<T, WorkflowError>;
