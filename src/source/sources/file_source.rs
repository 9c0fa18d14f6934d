use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::classify::RawDocument;
use crate::constants::messages::SKIP_UNREADABLE_MSG;
use crate::errors::ArchiveError;
use crate::source::{DocumentSource, DocumentStream};
use crate::transport::fs::{FileStream, is_xml_file};
use crate::types::{DocumentId, SourceId};

/// Configuration for a directory-backed document source.
#[derive(Clone, Debug)]
pub struct DirectorySourceConfig {
    /// Stable source identifier used in logs.
    pub source_id: SourceId,
    /// Root directory containing finding-aid files (searched recursively).
    pub root: PathBuf,
    /// Whether to follow symlinks while walking.
    pub follow_links: bool,
}

impl DirectorySourceConfig {
    /// Create a config with explicit id and root.
    pub fn new(source_id: impl Into<SourceId>, root: impl Into<PathBuf>) -> Self {
        Self {
            source_id: source_id.into(),
            root: root.into(),
            follow_links: false,
        }
    }

    /// Override whether symlinks are followed during the walk.
    pub fn with_follow_links(mut self, follow_links: bool) -> Self {
        self.follow_links = follow_links;
        self
    }
}

/// Source that yields every `.xml` file under a root, in sorted path order.
///
/// Document ids are paths relative to the root.
#[derive(Clone, Debug)]
pub struct DirectorySource {
    config: DirectorySourceConfig,
}

impl DirectorySource {
    /// Create a directory source from configuration.
    pub fn new(config: DirectorySourceConfig) -> Self {
        Self { config }
    }

    /// Root directory being walked.
    pub fn root(&self) -> &Path {
        &self.config.root
    }

    /// Paths of every candidate document.
    pub fn document_paths(&self) -> Vec<PathBuf> {
        FileStream::new(&self.config.root)
            .with_follow_symlinks(self.config.follow_links)
            .list_files(is_xml_file)
    }

    fn document_id(&self, path: &Path) -> DocumentId {
        path.strip_prefix(&self.config.root)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/")
    }

    fn read_document(&self, path: &Path) -> Option<RawDocument> {
        match fs::read(path) {
            Ok(bytes) => Some(RawDocument::new(self.document_id(path), bytes)),
            Err(err) => {
                warn!(
                    source_id = %self.config.source_id,
                    path = %path.display(),
                    error = %err,
                    SKIP_UNREADABLE_MSG
                );
                None
            }
        }
    }
}

impl DocumentSource for DirectorySource {
    fn id(&self) -> &str {
        &self.config.source_id
    }

    fn documents(&self) -> Result<DocumentStream<'_>, ArchiveError> {
        if !self.config.root.is_dir() {
            return Err(ArchiveError::Configuration(format!(
                "source '{}' root '{}' is not a directory",
                self.config.source_id,
                self.config.root.display()
            )));
        }
        let paths = self.document_paths();
        debug!(
            source_id = %self.config.source_id,
            documents = paths.len(),
            "listed source documents"
        );
        Ok(Box::new(
            paths.into_iter().filter_map(|path| self.read_document(&path)),
        ))
    }
}
