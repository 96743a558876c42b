//! Error taxonomy for an extraction run.
//!
//! Only archive-open and output-write failures are fatal. Markup problems are
//! scoped to a single document and the pipeline recovers from them.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("{} is not an EPUB archive: {reason}", path.display())]
    NotAnArchive { path: PathBuf, reason: String },

    #[error("malformed markup in {document}: {reason}")]
    MalformedMarkup { document: String, reason: String },

    #[error("failed to write {}: {source}", path.display())]
    WriteError {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Coarse category used in user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    FileNotFound,
    NotAnArchive,
    MalformedMarkup,
    WriteError,
}

impl ExtractError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExtractError::FileNotFound { .. } => ErrorKind::FileNotFound,
            ExtractError::NotAnArchive { .. } => ErrorKind::NotAnArchive,
            ExtractError::MalformedMarkup { .. } => ErrorKind::MalformedMarkup,
            ExtractError::WriteError { .. } => ErrorKind::WriteError,
        }
    }

    /// Whether the run has to stop. Markup errors only cost one document.
    pub fn is_fatal(&self) -> bool {
        !matches!(self.kind(), ErrorKind::MalformedMarkup)
    }

    pub(crate) fn write(
        path: impl Into<PathBuf>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        ExtractError::WriteError {
            path: path.into(),
            source: source.into(),
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorKind::FileNotFound => "FileNotFound",
            ErrorKind::NotAnArchive => "NotAnArchive",
            ErrorKind::MalformedMarkup => "MalformedMarkup",
            ErrorKind::WriteError => "WriteError",
        };
        write!(f, "{}", label)
    }
}
