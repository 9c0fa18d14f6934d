//! Document source interfaces.
//!
//! Acquisition (remote fetch, repository sync) happens elsewhere. A source only
//! hands raw document bytes to the ingestion run, in a stable order:
//! - `DocumentSource` is the ingestion-facing interface.
//! - `DirectorySource` walks a local root for `.xml` files.
//! - `InMemorySource` serves documents held in memory (tests, embedding callers).

use crate::classify::RawDocument;
use crate::errors::ArchiveError;

/// Source implementation modules.
pub mod sources;

pub use sources::file_source::{DirectorySource, DirectorySourceConfig};
pub use sources::memory_source::InMemorySource;

/// Boxed document stream returned by [`DocumentSource::documents`].
pub type DocumentStream<'a> = Box<dyn Iterator<Item = RawDocument> + 'a>;

/// Provider of raw finding-aid documents.
///
/// For a fixed backing state, `documents` must yield the same documents in the
/// same order on every call.
pub trait DocumentSource: Send + Sync {
    /// Stable source identifier used in logs.
    fn id(&self) -> &str;
    /// Stream every document. Per-document read failures are skipped by the
    /// source; an `Err` means the source as a whole is unavailable.
    fn documents(&self) -> Result<DocumentStream<'_>, ArchiveError>;
}
