use thiserror::Error;

use crate::{ArtifactKind, BoxError};

/// Result type for generation.
pub type Result<T> = std::result::Result<T, Error>;

/// Hard generation failures. Any of these aborts the whole batch.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to serialize swagger document for '{file}'")]
    Swagger {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to render {kind} file for '{file}'")]
    Render {
        kind: ArtifactKind,
        file: String,
        #[source]
        source: BoxError,
    },

    #[error("failed to format {kind} file for '{file}'")]
    Format {
        kind: ArtifactKind,
        file: String,
        #[source]
        source: BoxError,
    },
}

impl Error {
    /// Name of the input file the failure belongs to.
    pub fn file(&self) -> &str {
        match self {
            Error::Swagger { file, .. } | Error::Render { file, .. } | Error::Format { file, .. } => {
                file
            }
        }
    }
}
