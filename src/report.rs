//! Plain-text rendering of a finished harvest.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::analysis::PhraseRanking;
use crate::errors::ArchiveError;
use crate::metrics::{ArchivalYears, TagAverage};

/// `Most common {n}-word phrases:` followed by one `phrase<TAB>score` line per phrase.
pub fn format_ranking(ranking: &PhraseRanking) -> String {
    let mut out = format!("Most common {}-word phrases:\n", ranking.order);
    for found in &ranking.phrases {
        let _ = writeln!(out, "{}\t{:.4}", found.phrase(), found.score);
    }
    out
}

/// `{count} valid EAD XML files. Excluded words: a, b, ...`
pub fn format_summary<S: AsRef<str>>(processed: u64, ignored_words: &[S]) -> String {
    let words: Vec<&str> = ignored_words.iter().map(AsRef::as_ref).collect();
    format!(
        "{processed} valid EAD XML files. Excluded words: {}",
        words.join(", ")
    )
}

/// One `Average length of <p> in {tag} tag: ...` line per tag.
pub fn format_averages(averages: &[TagAverage]) -> String {
    averages
        .iter()
        .map(|average| {
            format!(
                "Average length of <p> in {} tag: {} characters, {} words",
                average.tag, average.avg_chars, average.avg_words
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write the archival years, one per line without a trailing newline.
pub fn write_years(path: impl AsRef<Path>, years: &ArchivalYears) -> Result<(), ArchiveError> {
    let path = path.as_ref();
    fs::write(path, years.to_lines()).map_err(|err| ArchiveError::storage(path, err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collocation::Collocation;
    use tempfile::tempdir;

    #[test]
    fn ranking_lists_phrase_and_score() {
        let ranking = PhraseRanking {
            order: 2,
            phrases: vec![Collocation {
                words: vec!["family".into(), "papers".into()],
                frequency: 4,
                score: 12.5,
            }],
        };
        assert_eq!(
            format_ranking(&ranking),
            "Most common 2-word phrases:\nfamily papers\t12.5000\n"
        );
    }

    #[test]
    fn summary_and_averages_lines() {
        assert_eq!(
            format_summary(3, &["york", "united"]),
            "3 valid EAD XML files. Excluded words: york, united"
        );
        let averages = vec![
            TagAverage {
                tag: "scopecontent".into(),
                avg_chars: 11,
                avg_words: 2,
            },
            TagAverage {
                tag: "arrangement".into(),
                avg_chars: 0,
                avg_words: 0,
            },
        ];
        assert_eq!(
            format_averages(&averages),
            "Average length of <p> in scopecontent tag: 11 characters, 2 words\n\
             Average length of <p> in arrangement tag: 0 characters, 0 words"
        );
    }

    #[test]
    fn years_file_has_no_trailing_newline() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("dates.txt");
        let mut years = ArchivalYears::default();
        years.push(1932);
        years.push(1875);
        write_years(&path, &years).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "1932\n1875");

        let missing = temp.path().join("no/such/dir/dates.txt");
        assert!(matches!(
            write_years(&missing, &years),
            Err(ArchiveError::Storage { .. })
        ));
    }
}
