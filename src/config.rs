use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::constants::collocation::{DEFAULT_MIN_FREQUENCY, DEFAULT_TOP_K, MAX_ORDER, MIN_ORDER};
use crate::constants::corpus::{DEFAULT_CORPUS_DIR, DEFAULT_YEARS_PATH};
use crate::constants::extraction::DEFAULT_TARGET_TAGS;
use crate::constants::stopwords::{DEFAULT_IGNORED_WORDS, DEFAULT_LANGUAGE};
use crate::corpus::TokenizerMode;
use crate::errors::ArchiveError;
use crate::stopwords::StopwordFilter;
use crate::types::{SourceId, TagName};

/// A local directory of finding aids to harvest.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SourceRoot {
    /// Source id used in logs; defaults to the directory name.
    #[serde(default)]
    pub id: Option<SourceId>,
    /// Directory walked recursively for `.xml` files.
    pub path: PathBuf,
}

impl SourceRoot {
    /// Root with an id derived from the directory name.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            id: None,
            path: path.into(),
        }
    }

    /// Effective source id.
    pub fn source_id(&self) -> SourceId {
        match &self.id {
            Some(id) => id.clone(),
            None => self
                .path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| self.path.display().to_string()),
        }
    }
}

/// Settings for one harvest run.
///
/// Every field has a default, so a JSON config file may set any subset.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HarvestConfig {
    /// Directories to harvest, processed in order.
    pub sources: Vec<SourceRoot>,
    /// Whether source walks follow symlinks.
    pub follow_links: bool,
    /// Target tags, visited in order for every document.
    pub tags: Vec<TagName>,
    /// Directory of persisted text units.
    pub corpus_dir: PathBuf,
    /// Where to write the archival-year list; `None` skips the artifact.
    pub years_path: Option<PathBuf>,
    /// Words excluded from phrases on top of the standard stop-word list.
    pub ignored_words: Vec<String>,
    /// Language of the standard stop-word list.
    pub language: String,
    /// Tokenizer applied when reading the corpus back.
    pub tokenizer: TokenizerMode,
    /// Whether tokens are lemmatized before counting.
    pub lemmatize: bool,
    /// Phrase orders to report.
    pub orders: Vec<usize>,
    /// Phrases seen fewer times are dropped.
    pub min_frequency: u64,
    /// Number of ranked phrases kept per order.
    pub top_k: usize,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            sources: Vec::new(),
            follow_links: false,
            tags: DEFAULT_TARGET_TAGS.iter().map(|tag| tag.to_string()).collect(),
            corpus_dir: PathBuf::from(DEFAULT_CORPUS_DIR),
            years_path: Some(PathBuf::from(DEFAULT_YEARS_PATH)),
            ignored_words: DEFAULT_IGNORED_WORDS.iter().map(|w| w.to_string()).collect(),
            language: DEFAULT_LANGUAGE.to_string(),
            tokenizer: TokenizerMode::default(),
            lemmatize: true,
            orders: (MIN_ORDER..=MAX_ORDER).collect(),
            min_frequency: DEFAULT_MIN_FREQUENCY,
            top_k: DEFAULT_TOP_K,
        }
    }
}

impl HarvestConfig {
    /// Load a JSON config file. Missing fields keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ArchiveError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|err| {
            ArchiveError::Configuration(format!("cannot read '{}': {err}", path.display()))
        })?;
        Self::from_json_str(&raw).map_err(|err| match err {
            ArchiveError::Configuration(reason) => {
                ArchiveError::Configuration(format!("'{}': {reason}", path.display()))
            }
            other => other,
        })
    }

    /// Parse JSON config text.
    pub fn from_json_str(raw: &str) -> Result<Self, ArchiveError> {
        serde_json::from_str(raw).map_err(|err| ArchiveError::Configuration(err.to_string()))
    }

    /// Add a source directory.
    pub fn with_source(mut self, root: SourceRoot) -> Self {
        self.sources.push(root);
        self
    }

    /// Override symlink traversal for every source.
    pub fn with_follow_links(mut self, follow_links: bool) -> Self {
        self.follow_links = follow_links;
        self
    }

    /// Replace the target tags.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<TagName>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Override the corpus directory.
    pub fn with_corpus_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.corpus_dir = dir.into();
        self
    }

    /// Override (or disable) the years artifact.
    pub fn with_years_path(mut self, path: Option<PathBuf>) -> Self {
        self.years_path = path;
        self
    }

    /// Add ignored words.
    pub fn with_ignored_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_words.extend(words.into_iter().map(Into::into));
        self
    }

    /// Override the corpus tokenizer.
    pub fn with_tokenizer(mut self, tokenizer: TokenizerMode) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    /// Enable or disable lemmatization.
    pub fn with_lemmatize(mut self, lemmatize: bool) -> Self {
        self.lemmatize = lemmatize;
        self
    }

    /// Override the reported phrase orders.
    pub fn with_orders(mut self, orders: Vec<usize>) -> Self {
        self.orders = orders;
        self
    }

    /// Override the minimum phrase frequency.
    pub fn with_min_frequency(mut self, min_frequency: u64) -> Self {
        self.min_frequency = min_frequency;
        self
    }

    /// Override the number of phrases kept per order.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Stop words in effect: the language list plus the ignored words.
    pub fn stopword_filter(&self) -> StopwordFilter {
        let mut filter = StopwordFilter::new(&self.language);
        filter.add_stopwords(&self.ignored_words);
        filter
    }

    /// Reject settings that cannot produce a report.
    pub fn validate(&self) -> Result<(), ArchiveError> {
        if self.tags.iter().all(|tag| tag.trim().is_empty()) {
            return Err(ArchiveError::Configuration(
                "at least one target tag is required".to_string(),
            ));
        }
        if self.orders.is_empty() {
            return Err(ArchiveError::Configuration(
                "at least one phrase order is required".to_string(),
            ));
        }
        if let Some(order) = self
            .orders
            .iter()
            .find(|order| !(MIN_ORDER..=MAX_ORDER).contains(*order))
        {
            return Err(ArchiveError::Configuration(format!(
                "phrase order {order} is outside {MIN_ORDER}..={MAX_ORDER}"
            )));
        }
        if self.top_k == 0 {
            return Err(ArchiveError::Configuration(
                "top_k must be at least 1".to_string(),
            ));
        }
        if self.corpus_dir.as_os_str().is_empty() {
            return Err(ArchiveError::Configuration(
                "corpus_dir must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
