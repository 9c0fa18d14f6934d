//! Collocation discovery
//!
//! Counts n-grams over a token stream and ranks the frequent ones by how strongly
//! their words attract each other (log-likelihood ratio). One counting pass serves
//! every phrase order up to [`MAX_ORDER`].

use std::cmp::Ordering;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::collocation::{MAX_ORDER, MIN_ORDER, MIN_TOKEN_CHARS};
use crate::errors::ArchiveError;
use crate::stopwords::StopwordFilter;
use crate::types::Token;
use crate::utils::is_alphabetic_word;

mod index;
pub mod measures;

use index::{Pattern, PatternCounts, WordId};

/// A ranked phrase.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Collocation {
    /// Phrase words in stream order.
    pub words: Vec<Token>,
    /// Number of times the phrase occurs contiguously.
    pub frequency: u64,
    /// Log-likelihood ratio score.
    pub score: f64,
}

impl Collocation {
    /// Words joined with single spaces.
    pub fn phrase(&self) -> String {
        self.words.join(" ")
    }
}

/// N-gram counts over a full token stream.
#[derive(Clone, Debug)]
pub struct CollocationIndex {
    counts: PatternCounts,
}

impl Default for CollocationIndex {
    fn default() -> Self {
        Self::new(MAX_ORDER)
    }
}

impl CollocationIndex {
    /// Empty index able to score phrases up to `max_order` words (at most [`MAX_ORDER`]).
    pub fn new(max_order: usize) -> Self {
        Self {
            counts: PatternCounts::new(max_order),
        }
    }

    /// Count every token of an in-memory stream.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Token>,
    {
        let mut index = Self::default();
        index.extend(tokens);
        index
    }

    /// Count a fallible stream, stopping at the first error.
    pub fn try_from_tokens<I, E>(tokens: I) -> Result<Self, E>
    where
        I: IntoIterator<Item = Result<Token, E>>,
    {
        let mut index = Self::default();
        for token in tokens {
            index.push(token?);
        }
        Ok(index)
    }

    /// Count one more token.
    pub fn push(&mut self, token: impl Into<Token>) {
        self.counts.push(token.into());
    }

    /// Count more tokens.
    pub fn extend<I, S>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<Token>,
    {
        for token in tokens {
            self.push(token);
        }
    }

    /// Total tokens counted.
    pub fn total_tokens(&self) -> u64 {
        self.counts.total()
    }

    /// Longest phrase order this index can score.
    pub fn max_order(&self) -> usize {
        self.counts.max_order()
    }

    /// Number of contiguous occurrences of `words`.
    pub fn frequency<S: AsRef<str>>(&self, words: &[S]) -> u64 {
        if words.is_empty() || words.len() > self.max_order() {
            return 0;
        }
        let mut ids = Vec::with_capacity(words.len());
        for word in words {
            match self.counts.id_of(word.as_ref()) {
                Some(id) => ids.push(id),
                None => return 0,
            }
        }
        self.counts.count(&Pattern::contiguous(&ids))
    }

    /// Ranked `n`-word phrases.
    ///
    /// Phrases seen fewer than `min_frequency` times are dropped, as are phrases with
    /// any word shorter than three characters, in `stopwords`, or not purely
    /// alphabetic. Results are sorted by descending score (ties by phrase) and
    /// truncated to `top_k`.
    pub fn find(
        &self,
        n: usize,
        stopwords: &StopwordFilter,
        min_frequency: u64,
        top_k: usize,
    ) -> Result<Vec<Collocation>, ArchiveError> {
        if !(MIN_ORDER..=self.max_order()).contains(&n) {
            return Err(ArchiveError::Configuration(format!(
                "phrase order {n} is outside {MIN_ORDER}..={}",
                self.max_order()
            )));
        }
        let accepted: Vec<bool> = self
            .counts
            .vocabulary()
            .iter()
            .map(|word| accepts_word(word, stopwords))
            .collect();

        let candidates: Vec<(&Pattern, u64)> = self
            .counts
            .patterns()
            .filter(|(pattern, count)| {
                pattern.len() == n
                    && pattern.is_contiguous()
                    && **count >= min_frequency
                    && pattern.words[..n].iter().all(|id| accepted[*id as usize])
            })
            .map(|(pattern, count)| (pattern, *count))
            .collect();
        debug!(n, candidates = candidates.len(), "scoring collocation candidates");

        let mut ranked: Vec<Collocation> = candidates
            .par_iter()
            .map(|(pattern, frequency)| Collocation {
                words: pattern.words[..n]
                    .iter()
                    .map(|id| self.counts.word(*id).to_string())
                    .collect(),
                frequency: *frequency,
                score: self.likelihood_ratio(&pattern.words[..n]),
            })
            .collect();
        ranked.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.words.cmp(&b.words))
        });
        ranked.truncate(top_k);
        Ok(ranked)
    }

    fn likelihood_ratio(&self, phrase: &[WordId]) -> f64 {
        let table = measures::contingency(phrase.len(), |mask| {
            match Pattern::select(phrase, mask) {
                Some(pattern) => self.counts.count(&pattern),
                None => self.counts.total(),
            }
        });
        measures::likelihood_ratio(phrase.len(), &table)
    }
}

fn accepts_word(word: &str, stopwords: &StopwordFilter) -> bool {
    word.chars().count() >= MIN_TOKEN_CHARS
        && is_alphabetic_word(word)
        && !stopwords.is_stopword(word)
}

/// Rank the `n`-word collocations of `tokens` in one call.
pub fn find_collocations<I, S>(
    tokens: I,
    n: usize,
    stopwords: &StopwordFilter,
    min_frequency: u64,
    top_k: usize,
) -> Result<Vec<Collocation>, ArchiveError>
where
    I: IntoIterator<Item = S>,
    S: Into<Token>,
{
    let mut index = CollocationIndex::new(n.min(MAX_ORDER));
    index.extend(tokens);
    index.find(n, stopwords, min_frequency, top_k)
}
