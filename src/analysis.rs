//! Corpus-wide phrase ranking.

use serde::Serialize;
use tracing::info;

use crate::collocation::{Collocation, CollocationIndex};
use crate::config::HarvestConfig;
use crate::constants::collocation::MIN_ORDER;
use crate::corpus::CorpusStore;
use crate::errors::ArchiveError;
use crate::lemmatize::{IdentityNormalizer, Lemmatizer, TokenNormalizer};
use crate::stopwords::StopwordFilter;

/// Ranked phrases of one order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PhraseRanking {
    /// Words per phrase.
    pub order: usize,
    /// Best phrases first.
    pub phrases: Vec<Collocation>,
}

/// Settings for ranking a corpus.
#[derive(Clone, Debug)]
pub struct AnalysisSettings {
    /// Phrase orders to rank, reported in this order.
    pub orders: Vec<usize>,
    /// Phrases seen fewer times are dropped.
    pub min_frequency: u64,
    /// Phrases kept per order.
    pub top_k: usize,
    /// Whether tokens are lemmatized before counting.
    pub lemmatize: bool,
}

impl From<&HarvestConfig> for AnalysisSettings {
    fn from(config: &HarvestConfig) -> Self {
        Self {
            orders: config.orders.clone(),
            min_frequency: config.min_frequency,
            top_k: config.top_k,
            lemmatize: config.lemmatize,
        }
    }
}

/// Read the corpus once and rank phrases for every configured order.
///
/// Every token goes through the normalizer before counting, so the word filter
/// sees lemma forms: "does" is counted and filtered as "doe".
pub fn rank_phrases(
    store: &CorpusStore,
    stopwords: &StopwordFilter,
    settings: &AnalysisSettings,
) -> Result<Vec<PhraseRanking>, ArchiveError> {
    let normalizer: &dyn TokenNormalizer = if settings.lemmatize {
        &Lemmatizer
    } else {
        &IdentityNormalizer
    };
    let max_order = settings.orders.iter().copied().max().unwrap_or(MIN_ORDER);

    let mut index = CollocationIndex::new(max_order);
    for token in store.tokens()? {
        index.push(normalizer.normalize(&token?));
    }
    info!(
        tokens = index.total_tokens(),
        corpus = %store.dir().display(),
        "counted corpus n-grams"
    );

    settings
        .orders
        .iter()
        .map(|order| {
            Ok(PhraseRanking {
                order: *order,
                phrases: index.find(*order, stopwords, settings.min_frequency, settings.top_k)?,
            })
        })
        .collect()
}
