use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::types::{ArchivalYear, TagName};

/// Running totals for one target tag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagTally {
    /// Occurrences that had a qualifying paragraph.
    pub occurrences: u64,
    /// Total characters of normalized paragraph text.
    pub chars: u64,
    /// Total space-separated words of normalized paragraph text.
    pub words: u64,
}

impl TagTally {
    /// Record one processed occurrence.
    pub fn record(&mut self, chars: usize, words: usize) {
        self.occurrences += 1;
        self.chars += chars as u64;
        self.words += words as u64;
    }

    fn absorb(&mut self, other: &TagTally) {
        self.occurrences += other.occurrences;
        self.chars += other.chars;
        self.words += other.words;
    }
}

/// Per-tag extraction totals, kept in configured tag order.
///
/// Each extraction produces its own instance; the ingestion run folds them with
/// [`TagStatistics::merge`], which is associative and commutative on the totals.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagStatistics {
    tags: IndexMap<TagName, TagTally>,
}

impl TagStatistics {
    /// Empty statistics with a zeroed entry for every tag.
    pub fn for_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<TagName>,
    {
        Self {
            tags: tags
                .into_iter()
                .map(|tag| (tag.into(), TagTally::default()))
                .collect(),
        }
    }

    /// Mutable tally for `tag`, created on first use.
    pub fn tally_mut(&mut self, tag: &str) -> &mut TagTally {
        self.tags.entry(tag.to_string()).or_default()
    }

    /// Tally for `tag`, if the tag is tracked.
    pub fn get(&self, tag: &str) -> Option<&TagTally> {
        self.tags.get(tag)
    }

    /// Add every tally from `other` into `self`.
    pub fn merge(&mut self, other: &TagStatistics) {
        for (tag, tally) in &other.tags {
            self.tally_mut(tag).absorb(tally);
        }
    }

    /// Iterate tags and tallies in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&TagName, &TagTally)> {
        self.tags.iter()
    }

    /// Number of tracked tags.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// True if no tags are tracked.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// Average paragraph length for one tag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TagAverage {
    /// Target tag.
    pub tag: TagName,
    /// Mean characters per counted paragraph.
    pub avg_chars: u64,
    /// Mean words per counted paragraph.
    pub avg_words: u64,
}

/// Compute per-tag averages in tag order.
///
/// Tags with no occurrences report zero rather than dividing by zero.
pub fn tag_averages(stats: &TagStatistics) -> Vec<TagAverage> {
    stats
        .iter()
        .map(|(tag, tally)| TagAverage {
            tag: tag.clone(),
            avg_chars: rounded_mean(tally.chars, tally.occurrences),
            avg_words: rounded_mean(tally.words, tally.occurrences),
        })
        .collect()
}

/// `round(total / max(count, 1))` with ties going to the even integer.
fn rounded_mean(total: u64, count: u64) -> u64 {
    (total as f64 / count.max(1) as f64).round_ties_even() as u64
}

/// Archival years in processing order, at most one per document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArchivalYears {
    years: Vec<ArchivalYear>,
}

impl ArchivalYears {
    /// Append a parsed year.
    pub fn push(&mut self, year: ArchivalYear) {
        self.years.push(year);
    }

    /// Append all years from `other`, keeping their order.
    pub fn merge(&mut self, other: &ArchivalYears) {
        self.years.extend_from_slice(&other.years);
    }

    /// Collected years.
    pub fn as_slice(&self) -> &[ArchivalYear] {
        &self.years
    }

    /// Number of collected years.
    pub fn len(&self) -> usize {
        self.years.len()
    }

    /// True if no year has been collected.
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// One year per line, without a trailing newline.
    pub fn to_lines(&self) -> String {
        self.years
            .iter()
            .map(|year| year.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_averages_guard_zero_occurrences() {
        let stats = TagStatistics::for_tags(["scopecontent", "processinfo"]);
        let averages = tag_averages(&stats);
        assert_eq!(averages.len(), 2);
        assert!(
            averages
                .iter()
                .all(|entry| entry.avg_chars == 0 && entry.avg_words == 0)
        );
    }

    #[test]
    fn tag_averages_round_half_to_even() {
        let mut stats = TagStatistics::for_tags(["arrangement"]);
        let tally = stats.tally_mut("arrangement");
        tally.record(10, 2);
        tally.record(15, 3);
        tally.record(10, 2);
        tally.record(10, 3);
        // chars 45/4 = 11.25, words 10/4 = 2.5
        let averages = tag_averages(&stats);
        assert_eq!(averages[0].avg_chars, 11);
        assert_eq!(averages[0].avg_words, 2);
    }

    #[test]
    fn tag_averages_keep_configured_order() {
        let stats = TagStatistics::for_tags(["b", "a", "c"]);
        let tags: Vec<_> = tag_averages(&stats).into_iter().map(|a| a.tag).collect();
        assert_eq!(tags, vec!["b", "a", "c"]);
    }

    #[test]
    fn merge_is_order_independent() {
        let mut left = TagStatistics::for_tags(["scopecontent"]);
        left.tally_mut("scopecontent").record(5, 1);
        let mut right = TagStatistics::default();
        right.tally_mut("scopecontent").record(7, 2);
        right.tally_mut("arrangement").record(3, 1);

        let mut a = TagStatistics::default();
        a.merge(&left);
        a.merge(&right);
        let mut b = TagStatistics::default();
        b.merge(&right);
        b.merge(&left);

        for tag in ["scopecontent", "arrangement"] {
            assert_eq!(a.get(tag), b.get(tag));
        }
        assert_eq!(
            a.get("scopecontent"),
            Some(&TagTally {
                occurrences: 2,
                chars: 12,
                words: 3
            })
        );
    }

    #[test]
    fn archival_years_render_one_per_line() {
        let mut years = ArchivalYears::default();
        assert_eq!(years.to_lines(), "");
        years.push(1950);
        years.push(1872);
        assert_eq!(years.to_lines(), "1950\n1872");
    }
}
