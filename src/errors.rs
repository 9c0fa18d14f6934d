use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::DocumentId;

/// Error type for document classification, extraction, corpus storage, and configuration.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("document '{document}' is not valid UTF-8")]
    WrongEncoding { document: DocumentId },
    #[error("document '{document}' is not EAD XML")]
    NotFindingAid { document: DocumentId },
    #[error("document '{document}' has no valid date (value: {value:?})")]
    MalformedDate {
        document: DocumentId,
        value: Option<String>,
    },
    #[error("corpus storage failure at '{}': {source}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ArchiveError {
    /// True for per-document outcomes that skip the document without aborting the run.
    pub fn is_skippable(&self) -> bool {
        matches!(self, Self::WrongEncoding { .. } | Self::NotFindingAid { .. })
    }

    pub(crate) fn storage(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }
}
