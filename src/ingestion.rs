use tracing::{debug, info};

use crate::classify::{RawDocument, validate_document};
use crate::config::HarvestConfig;
use crate::constants::messages::{SKIP_NOT_EAD_MSG, SKIP_WRONG_ENCODING_MSG};
use crate::corpus::CorpusStore;
use crate::errors::ArchiveError;
use crate::extract::ElementExtractor;
use crate::metrics::{ArchivalYears, TagStatistics};
use crate::source::DocumentSource;
use crate::types::UnitId;

/// Totals of a finished ingestion run.
#[derive(Clone, Debug, PartialEq)]
pub struct IngestionSummary {
    /// Documents that became text units.
    pub processed: u64,
    /// Documents skipped as undecodable or not EAD.
    pub skipped: u64,
    /// Per-tag totals over every processed document.
    pub stats: TagStatistics,
    /// Archival years in processing order.
    pub years: ArchivalYears,
}

/// One batch pass over every document: classify, extract, persist.
///
/// Owns the unit-id counter and the run-level accumulators. The counter advances
/// once per processed document (even when it yields no text) and never for a
/// skipped one, so unit ids stay dense.
#[derive(Debug)]
pub struct IngestionRun {
    extractor: ElementExtractor,
    store: CorpusStore,
    next_unit: UnitId,
    skipped: u64,
    stats: TagStatistics,
    years: ArchivalYears,
}

impl IngestionRun {
    /// Create a run writing into `store`.
    pub fn new(extractor: ElementExtractor, store: CorpusStore) -> Self {
        let stats = extractor.empty_statistics();
        Self {
            extractor,
            store,
            next_unit: 0,
            skipped: 0,
            stats,
            years: ArchivalYears::default(),
        }
    }

    /// Create a run from harvest settings.
    pub fn from_config(config: &HarvestConfig) -> Self {
        Self::new(
            ElementExtractor::new(&config.tags),
            CorpusStore::new(&config.corpus_dir).with_tokenizer(config.tokenizer),
        )
    }

    /// Create the corpus directory and drop units from earlier runs.
    pub fn prepare(&self) -> Result<(), ArchiveError> {
        self.store.prepare()
    }

    /// Process one document.
    ///
    /// Returns the new unit id, or `None` when the document was skipped. Only
    /// storage failures are returned as errors.
    pub fn process(&mut self, document: &RawDocument) -> Result<Option<UnitId>, ArchiveError> {
        match self.try_process(document) {
            Ok(id) => Ok(Some(id)),
            Err(err) if err.is_skippable() => {
                self.skipped += 1;
                match &err {
                    ArchiveError::WrongEncoding { .. } => {
                        info!(document = %document.id, error = %err, SKIP_WRONG_ENCODING_MSG)
                    }
                    _ => info!(document = %document.id, SKIP_NOT_EAD_MSG),
                }
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    fn try_process(&mut self, document: &RawDocument) -> Result<UnitId, ArchiveError> {
        let content = validate_document(document)?;
        let text = self.extractor.extract_into(
            &document.id,
            &content,
            &mut self.stats,
            &mut self.years,
        );
        let id = self.next_unit;
        self.store.write(id, &text)?;
        self.next_unit += 1;
        debug!(document = %document.id, unit_id = id, "stored text unit");
        Ok(id)
    }

    /// Process every document of `source`.
    pub fn ingest_source(&mut self, source: &dyn DocumentSource) -> Result<(), ArchiveError> {
        let before = self.next_unit;
        for document in source.documents()? {
            self.process(&document)?;
        }
        info!(
            source_id = source.id(),
            processed = self.next_unit - before,
            "finished source"
        );
        Ok(())
    }

    /// Prepare the store and process every source in order.
    pub fn run(
        mut self,
        sources: &[Box<dyn DocumentSource>],
    ) -> Result<IngestionSummary, ArchiveError> {
        self.prepare()?;
        for source in sources {
            self.ingest_source(source.as_ref())?;
        }
        Ok(self.finish())
    }

    /// Documents processed so far (also the next unit id).
    pub fn processed(&self) -> u64 {
        self.next_unit
    }

    /// Documents skipped so far.
    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    /// Per-tag totals so far.
    pub fn stats(&self) -> &TagStatistics {
        &self.stats
    }

    /// Archival years so far.
    pub fn years(&self) -> &ArchivalYears {
        &self.years
    }

    /// Corpus being written.
    pub fn store(&self) -> &CorpusStore {
        &self.store
    }

    /// Consume the run and return its totals.
    pub fn finish(self) -> IngestionSummary {
        IngestionSummary {
            processed: self.next_unit,
            skipped: self.skipped,
            stats: self.stats,
            years: self.years,
        }
    }
}
