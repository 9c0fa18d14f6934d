//! Stop-word filtering
//!
//! The NLTK language lists shipped by the `stop-words` crate, extended with the
//! configurable set of ignored archival words.

use rustc_hash::FxHashSet;
use stop_words::{LANGUAGE, get};

use crate::constants::stopwords::{DEFAULT_IGNORED_WORDS, DEFAULT_LANGUAGE};

/// Lowercase stop-word set consulted by the collocation word filter.
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    stopwords: FxHashSet<String>,
}

impl Default for StopwordFilter {
    /// English list plus the default ignored words.
    fn default() -> Self {
        let mut filter = Self::new(DEFAULT_LANGUAGE);
        filter.add_stopwords(DEFAULT_IGNORED_WORDS);
        filter
    }
}

impl StopwordFilter {
    /// Standard stop words for `language` (unknown languages fall back to English).
    pub fn new(language: &str) -> Self {
        Self {
            stopwords: Self::load_stopwords(language),
        }
    }

    /// An empty filter (no stop words).
    pub fn empty() -> Self {
        Self {
            stopwords: FxHashSet::default(),
        }
    }

    /// A filter holding exactly `words`.
    pub fn from_list<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut filter = Self::empty();
        filter.add_stopwords(words);
        filter
    }

    /// Add words (lowercased, blanks ignored).
    pub fn add_stopwords<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            let word = word.as_ref().trim();
            if !word.is_empty() {
                self.stopwords.insert(word.to_lowercase());
            }
        }
    }

    /// Case-insensitive membership test.
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word) || self.stopwords.contains(&word.to_lowercase())
    }

    /// Number of stop words.
    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    /// True if the filter holds no words.
    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }

    fn load_stopwords(language: &str) -> FxHashSet<String> {
        let lang = match language.to_lowercase().as_str() {
            "de" | "german" => LANGUAGE::German,
            "fr" | "french" => LANGUAGE::French,
            "es" | "spanish" => LANGUAGE::Spanish,
            "it" | "italian" => LANGUAGE::Italian,
            "pt" | "portuguese" => LANGUAGE::Portuguese,
            "nl" | "dutch" => LANGUAGE::Dutch,
            _ => LANGUAGE::English,
        };

        get(lang)
            .into_iter()
            .filter(|word| !word.is_empty())
            .collect()
    }
}

/// Parse an ignored-words file: one word per line, `#` starts a comment.
pub fn parse_word_list(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(|line| line.split('#').next().unwrap_or("").trim())
        .filter(|line| !line.is_empty())
        .map(str::to_lowercase)
        .collect()
}
