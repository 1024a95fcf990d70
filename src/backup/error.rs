use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("snapshot i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed snapshot {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode snapshot: {0}")]
    Encode(#[source] serde_json::Error),
}

impl SnapshotError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type SnapshotResult<T> = Result<T, SnapshotError>;
