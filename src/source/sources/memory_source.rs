use crate::classify::RawDocument;
use crate::errors::ArchiveError;
use crate::source::{DocumentSource, DocumentStream};
use crate::types::{DocumentId, SourceId};

/// Source backed by documents held in memory, yielded in insertion order.
#[derive(Clone, Debug, Default)]
pub struct InMemorySource {
    id: SourceId,
    documents: Vec<RawDocument>,
}

impl InMemorySource {
    /// Create an empty source.
    pub fn new(id: impl Into<SourceId>) -> Self {
        Self {
            id: id.into(),
            documents: Vec::new(),
        }
    }

    /// Append a document.
    pub fn with_document(mut self, id: impl Into<DocumentId>, bytes: impl Into<Vec<u8>>) -> Self {
        self.push(RawDocument::new(id, bytes));
        self
    }

    /// Append a document in place.
    pub fn push(&mut self, document: RawDocument) {
        self.documents.push(document);
    }

    /// Number of held documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// True if no documents are held.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl DocumentSource for InMemorySource {
    fn id(&self) -> &str {
        &self.id
    }

    fn documents(&self) -> Result<DocumentStream<'_>, ArchiveError> {
        Ok(Box::new(self.documents.iter().cloned()))
    }
}
