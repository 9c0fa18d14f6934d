//! Streaming gapped-pattern counts.
//!
//! Every token closes a set of windows ending at that token. For a window spanning
//! `span` tokens the first and last positions are always kept and each interior
//! position is either kept or left as a gap, so one pass over the stream counts
//! every contiguous n-gram and every gapped pattern (`w1 _ w3`, `w1 _ _ w4`, ...)
//! that the contingency tables of phrases up to `max_order` need.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;

use crate::constants::collocation::MAX_ORDER;
use crate::types::Token;

/// Interned word id.
pub(crate) type WordId = u32;

const EMPTY_SLOT: WordId = WordId::MAX;

/// A gapped pattern: bit `i` of `mask` is set when offset `i` (from the first kept
/// position) is kept. Kept words are packed into `words` in offset order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct Pattern {
    pub(crate) mask: u8,
    pub(crate) words: [WordId; MAX_ORDER],
}

impl Pattern {
    /// Pattern selecting the offsets in `mask` (relative to the phrase start) of `phrase`.
    pub(crate) fn select(phrase: &[WordId], mask: usize) -> Option<Self> {
        if mask == 0 {
            return None;
        }
        let shift = mask.trailing_zeros() as usize;
        let mut words = [EMPTY_SLOT; MAX_ORDER];
        let mut slot = 0;
        for (position, word) in phrase.iter().enumerate() {
            if mask & (1 << position) != 0 {
                words[slot] = *word;
                slot += 1;
            }
        }
        Some(Self {
            mask: (mask >> shift) as u8,
            words,
        })
    }

    /// Contiguous pattern of every word in `phrase`.
    pub(crate) fn contiguous(phrase: &[WordId]) -> Self {
        let mut words = [EMPTY_SLOT; MAX_ORDER];
        words[..phrase.len()].copy_from_slice(phrase);
        Self {
            mask: ((1usize << phrase.len()) - 1) as u8,
            words,
        }
    }

    /// Number of kept words.
    pub(crate) fn len(&self) -> usize {
        self.mask.count_ones() as usize
    }

    /// True if the pattern has no gaps.
    pub(crate) fn is_contiguous(&self) -> bool {
        (self.mask as usize + 1).is_power_of_two()
    }
}

/// Interned token stream statistics.
#[derive(Clone, Debug, Default)]
pub(crate) struct PatternCounts {
    vocabulary: Vec<Token>,
    lookup: FxHashMap<Token, WordId>,
    patterns: FxHashMap<Pattern, u64>,
    window: VecDeque<WordId>,
    total: u64,
    max_order: usize,
}

impl PatternCounts {
    pub(crate) fn new(max_order: usize) -> Self {
        Self {
            max_order: max_order.clamp(1, MAX_ORDER),
            ..Self::default()
        }
    }

    pub(crate) fn max_order(&self) -> usize {
        self.max_order
    }

    pub(crate) fn total(&self) -> u64 {
        self.total
    }

    pub(crate) fn word(&self, id: WordId) -> &str {
        &self.vocabulary[id as usize]
    }

    pub(crate) fn id_of(&self, word: &str) -> Option<WordId> {
        self.lookup.get(word).copied()
    }

    pub(crate) fn vocabulary(&self) -> &[Token] {
        &self.vocabulary
    }

    pub(crate) fn patterns(&self) -> impl Iterator<Item = (&Pattern, &u64)> {
        self.patterns.iter()
    }

    pub(crate) fn count(&self, pattern: &Pattern) -> u64 {
        self.patterns.get(pattern).copied().unwrap_or(0)
    }

    fn intern(&mut self, token: Token) -> WordId {
        if let Some(id) = self.lookup.get(&token) {
            return *id;
        }
        let id = self.vocabulary.len() as WordId;
        self.vocabulary.push(token.clone());
        self.lookup.insert(token, id);
        id
    }

    /// Add one token, counting every pattern that ends on it.
    pub(crate) fn push(&mut self, token: Token) {
        let id = self.intern(token);
        if self.window.len() == self.max_order {
            self.window.pop_front();
        }
        self.window.push_back(id);
        self.total += 1;

        let available = self.window.len();
        for span in 1..=available {
            let start = available - span;
            let interior = span.saturating_sub(2);
            for gaps in 0..(1usize << interior) {
                let mut mask = 1usize | (1 << (span - 1));
                mask |= gaps << 1;
                let mut words = [EMPTY_SLOT; MAX_ORDER];
                let mut slot = 0;
                for offset in 0..span {
                    if mask & (1 << offset) != 0 {
                        words[slot] = self.window[start + offset];
                        slot += 1;
                    }
                }
                *self
                    .patterns
                    .entry(Pattern {
                        mask: mask as u8,
                        words,
                    })
                    .or_insert(0) += 1;
            }
        }
    }
}
