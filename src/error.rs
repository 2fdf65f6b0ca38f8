use std::path::PathBuf;

use thiserror::Error;

/// Failures of the persistence and import/export layer.
///
/// The layout engines are infallible; only file work reports errors.
#[derive(Debug, Error)]
pub enum TimelineError {
    #[error("failed to access `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid plan file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV is missing required columns (found {found:?}); need a title and a month column")]
    MissingColumns { found: Vec<String> },
    #[error("no valid tasks found in CSV ({skipped} rows skipped)")]
    EmptyCatalog { skipped: usize },
}

impl TimelineError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, TimelineError>;
