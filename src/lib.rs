#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Corpus-wide phrase ranking.
pub mod analysis;
/// Command-line runner and end-to-end harvest.
pub mod app;
/// Finding-aid decoding and detection.
pub mod classify;
/// N-gram counting and log-likelihood ranking.
pub mod collocation;
/// Harvest configuration.
pub mod config;
/// Centralized constants used across extraction, corpus, and ranking.
pub mod constants;
/// Persisted text units and token streams.
pub mod corpus;
/// Archival date parsing.
pub mod dates;
/// Element text extraction.
pub mod extract;
/// Batch ingestion over document sources.
pub mod ingestion;
/// Token lemmatization.
pub mod lemmatize;
/// Per-tag totals, averages, and archival years.
pub mod metrics;
/// Report rendering and side artifacts.
pub mod report;
/// Document source traits and built-in sources.
pub mod source;
/// Stop-word filtering.
pub mod stopwords;
/// Input transports used by sources (local filesystem).
pub mod transport;
/// Shared type aliases.
pub mod types;
/// Text normalization helpers.
pub mod utils;

mod errors;
mod markup;

pub use analysis::{AnalysisSettings, PhraseRanking, rank_phrases};
pub use app::{HarvestReport, harvest};
pub use classify::{RawDocument, classify, decode_document, validate_document};
pub use collocation::{Collocation, CollocationIndex, find_collocations};
pub use config::{HarvestConfig, SourceRoot};
pub use corpus::{CorpusStore, CorpusTokens, TextUnit, TokenizerMode};
pub use errors::ArchiveError;
pub use extract::{ElementExtractor, Extraction};
pub use ingestion::{IngestionRun, IngestionSummary};
pub use lemmatize::{IdentityNormalizer, Lemmatizer, TokenNormalizer, lemmatize};
pub use metrics::{ArchivalYears, TagAverage, TagStatistics, TagTally, tag_averages};
pub use report::write_years;
pub use source::{DirectorySource, DirectorySourceConfig, DocumentSource, InMemorySource};
pub use stopwords::StopwordFilter;
pub use types::{ArchivalYear, DocumentId, LogMessage, SourceId, TagName, Token, UnitId};
