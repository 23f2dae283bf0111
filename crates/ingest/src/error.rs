use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("unrecognized symbol graph file: {0}")]
    Classification(#[from] ClassificationError),
    #[error("failed to decode symbol graph {}: {cause}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        cause: DecodeCause,
    },
    #[error("consolidation failed: {0}")]
    Consolidation(String),
    #[error("execution failed: {0}")]
    Execution(String),
}

impl IngestError {
    pub fn decode(path: impl Into<PathBuf>, cause: impl Into<DecodeCause>) -> Self {
        Self::Decode {
            path: path.into(),
            cause: cause.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum DecodeCause {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassificationError {
    #[error("{0}: expected a `.symbols.json` file name")]
    MissingExtension(String),
    #[error("{0}: empty module name segment")]
    EmptyModuleName(String),
    #[error("{0}: file name is not valid UTF-8")]
    NotUtf8(String),
}
