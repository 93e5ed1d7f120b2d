use std::path::PathBuf;

use redsift_reddit::SourceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("external service error: {0}")]
    ExternalService(#[source] SourceError),

    #[error("persistence error for {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl From<SourceError> for PipelineError {
    fn from(error: SourceError) -> Self {
        match error {
            SourceError::InvalidArgument(e) => PipelineError::InvalidArgument(e.to_string()),
            other => PipelineError::ExternalService(other),
        }
    }
}

impl PipelineError {
    pub(crate) fn persistence(path: &std::path::Path, source: impl Into<csv::Error>) -> Self {
        PipelineError::Persistence {
            path: path.to_path_buf(),
            source: source.into(),
        }
    }
}
