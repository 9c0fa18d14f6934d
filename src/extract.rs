//! Element text extraction from validated finding aids.

use tracing::{debug, info};

use crate::constants::extraction::{
    DATE_NORMAL_ATTR, DATE_TAG, DEFAULT_TARGET_TAGS, PARAGRAPH_TAG,
};
use crate::constants::messages::NO_VALID_DATE_MSG;
use crate::dates::parse_archival_year;
use crate::errors::ArchiveError;
use crate::markup::{ElementRef, MarkupTree};
use crate::metrics::{ArchivalYears, TagStatistics};
use crate::types::{ArchivalYear, DocumentId, TagName};
use crate::utils::{char_count, normalize_element_text, push_spaced, word_count};

/// Result of extracting one document.
#[derive(Clone, Debug, PartialEq)]
pub struct Extraction {
    /// Normalized text from every target tag, space-joined in tag order.
    pub text: String,
    /// Totals contributed by this document only.
    pub stats: TagStatistics,
    /// Year of the first `<date>` element, when it could be parsed.
    pub year: Option<ArchivalYear>,
}

/// Extracts the first paragraph under each occurrence of the configured tags.
#[derive(Clone, Debug)]
pub struct ElementExtractor {
    tags: Vec<TagName>,
}

impl Default for ElementExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET_TAGS)
    }
}

impl ElementExtractor {
    /// Create an extractor for `tags`, visited in the given order.
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            tags: tags
                .into_iter()
                .map(|tag| tag.as_ref().trim().to_ascii_lowercase())
                .filter(|tag| !tag.is_empty())
                .collect(),
        }
    }

    /// Target tags in visiting order.
    pub fn tags(&self) -> &[TagName] {
        &self.tags
    }

    /// Zeroed statistics covering every target tag.
    pub fn empty_statistics(&self) -> TagStatistics {
        TagStatistics::for_tags(self.tags.iter().cloned())
    }

    /// Extract normalized text and per-tag totals from a validated document.
    ///
    /// Markup is parsed leniently, so extraction never fails: undeclared
    /// entities, unclosed elements, and truncated input yield whatever text is
    /// recoverable. Occurrences without a descendant `<p>` contribute nothing.
    /// A missing or unparsable date is logged and leaves `year` empty.
    pub fn extract(&self, document: &DocumentId, content: &str) -> Extraction {
        let markup = MarkupTree::parse(document, content);

        let mut stats = self.empty_statistics();
        let mut text = String::new();
        for tag in &self.tags {
            let mut tag_text = String::new();
            for occurrence in markup.elements().filter(|element| element.is_named(tag)) {
                let Some(paragraph) = first_paragraph(occurrence) else {
                    continue;
                };
                let normalized = normalize_element_text(paragraph.text());
                stats
                    .tally_mut(tag)
                    .record(char_count(&normalized), word_count(&normalized));
                push_spaced(&mut tag_text, &normalized);
            }
            push_spaced(&mut text, &tag_text);
        }

        let year = match archival_year(document, &markup) {
            Ok(year) => Some(year),
            Err(err) => {
                info!(document = %document, error = %err, NO_VALID_DATE_MSG);
                None
            }
        };
        debug!(
            document = %document,
            bytes = text.len(),
            year = ?year,
            "extracted finding aid text"
        );

        Extraction { text, stats, year }
    }

    /// Extract `content` and fold its totals and year into run-level accumulators.
    ///
    /// Returns the document's text.
    pub fn extract_into(
        &self,
        document: &DocumentId,
        content: &str,
        stats: &mut TagStatistics,
        years: &mut ArchivalYears,
    ) -> String {
        let extraction = self.extract(document, content);
        stats.merge(&extraction.stats);
        if let Some(year) = extraction.year {
            years.push(year);
        }
        extraction.text
    }
}

/// First `<p>` below `occurrence` in document order.
fn first_paragraph(occurrence: ElementRef<'_>) -> Option<ElementRef<'_>> {
    occurrence
        .descendants()
        .find(|element| element.is_named(PARAGRAPH_TAG))
}

fn archival_year(document: &DocumentId, markup: &MarkupTree) -> Result<ArchivalYear, ArchiveError> {
    let malformed = |value: Option<String>| ArchiveError::MalformedDate {
        document: document.clone(),
        value,
    };
    let date = markup
        .elements()
        .find(|element| element.is_named(DATE_TAG))
        .ok_or_else(|| malformed(None))?;
    let value = match date.attribute(DATE_NORMAL_ATTR) {
        Some(normal) => normal.to_string(),
        None => date.text(),
    };
    parse_archival_year(&value).ok_or_else(|| malformed(Some(value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::TagTally;

    fn ead(body: &str) -> String {
        format!(r#"<ead xmlns="urn:isbn:1-931666-22-9"><eadheader/><archdesc>{body}</archdesc></ead>"#)
    }

    fn id() -> DocumentId {
        "fixture.xml".to_string()
    }

    #[test]
    fn extracts_and_normalizes_single_paragraph() {
        let doc = ead("<scopecontent><p>Hello   World\n\n</p></scopecontent>");
        let out = ElementExtractor::default().extract(&id(), &doc);
        assert_eq!(out.text, "hello world");
        assert_eq!(
            out.stats.get("scopecontent"),
            Some(&TagTally {
                occurrences: 1,
                chars: 11,
                words: 2
            })
        );
    }

    #[test]
    fn only_first_paragraph_per_occurrence_counts() {
        let doc = ead(
            "<scopecontent><head>Scope</head><p>First <emph>para</emph></p><p>Second</p></scopecontent>",
        );
        let out = ElementExtractor::default().extract(&id(), &doc);
        assert_eq!(out.text, "first para");
        assert_eq!(out.stats.get("scopecontent").unwrap().occurrences, 1);
    }

    #[test]
    fn occurrences_without_paragraph_are_skipped() {
        let doc = ead(
            "<scopecontent><list><item>no p</item></list></scopecontent>\
             <scopecontent><p>Kept</p></scopecontent>",
        );
        let out = ElementExtractor::default().extract(&id(), &doc);
        assert_eq!(out.text, "kept");
        assert_eq!(out.stats.get("scopecontent").unwrap().occurrences, 1);
    }

    #[test]
    fn counts_every_qualifying_occurrence() {
        let body: String = (0..5)
            .map(|i| format!("<arrangement><p>Series {i}</p></arrangement>"))
            .collect();
        let out = ElementExtractor::default()
            .extract(&id(), &ead(&body));
        let tally = out.stats.get("arrangement").unwrap();
        assert_eq!(tally.occurrences, 5);
        assert_eq!(tally.words, 10);
        assert_eq!(out.text, "series 0 series 1 series 2 series 3 series 4");
    }

    #[test]
    fn joins_tags_in_configured_order() {
        let doc = ead(
            "<arrangement><p>Arranged</p></arrangement>\
             <processinfo><p>Processed</p></processinfo>\
             <scopecontent><p>Scope</p></scopecontent>",
        );
        let out = ElementExtractor::default().extract(&id(), &doc);
        assert_eq!(out.text, "scope processed arranged");

        let custom = ElementExtractor::new(["Arrangement", "scopecontent"]);
        let out = custom.extract(&id(), &doc);
        assert_eq!(out.text, "arranged scope");
        assert!(out.stats.get("processinfo").is_none());
    }

    #[test]
    fn empty_paragraph_counts_without_words() {
        let doc = ead("<processinfo><p>   </p></processinfo>");
        let out = ElementExtractor::default().extract(&id(), &doc);
        assert_eq!(out.text, "");
        assert_eq!(
            out.stats.get("processinfo"),
            Some(&TagTally {
                occurrences: 1,
                chars: 0,
                words: 0
            })
        );
    }

    #[test]
    fn nested_paragraph_is_found_in_document_order() {
        let doc = ead(
            "<scopecontent><odd><p>Deep one</p></odd><p>Shallow</p></scopecontent>",
        );
        let out = ElementExtractor::default().extract(&id(), &doc);
        assert_eq!(out.text, "deep one");
    }

    #[test]
    fn records_year_from_first_date() {
        let doc = ead(
            r#"<did><unitdate normal="1901/1950">1901-1950</unitdate><date normal="1932/1940">1932</date><date>1999</date></did>"#,
        );
        let out = ElementExtractor::default().extract(&id(), &doc);
        assert_eq!(out.year, Some(1932));

        let doc = ead("<did><date>March 4, 1911</date></did>");
        let out = ElementExtractor::default().extract(&id(), &doc);
        assert_eq!(out.year, Some(1911));
    }

    #[test]
    fn malformed_date_does_not_block_extraction() {
        let doc = ead("<did><date>undated</date></did><scopecontent><p>Text</p></scopecontent>");
        let out = ElementExtractor::default().extract(&id(), &doc);
        assert_eq!(out.year, None);
        assert_eq!(out.text, "text");
    }

    #[test]
    fn accepts_doctype_declarations() {
        let doc = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE ead PUBLIC "+//ISBN 1-931666-00-8//DTD ead.dtd (Encoded Archival Description (EAD) Version 2002)//EN" "ead.dtd">
<ead audience="external"><eadheader/><archdesc><scopecontent><p>Letters</p></scopecontent></archdesc></ead>"#;
        let out = ElementExtractor::default().extract(&id(), doc);
        assert_eq!(out.text, "letters");
    }

    #[test]
    fn extract_into_accumulates_across_documents() {
        let extractor = ElementExtractor::default();
        let mut stats = extractor.empty_statistics();
        let mut years = ArchivalYears::default();
        for i in 0..3 {
            let doc = ead(&format!(
                "<did><date>19{i}0</date></did><processinfo><p>Processed by staff</p></processinfo>"
            ));
            extractor.extract_into(&id(), &doc, &mut stats, &mut years);
        }
        assert_eq!(stats.get("processinfo").unwrap().occurrences, 3);
        assert_eq!(stats.get("processinfo").unwrap().words, 9);
        assert_eq!(years.as_slice(), &[1900, 1910, 1920]);

        let text = extractor.extract_into(&id(), "<ead ", &mut stats, &mut years);
        assert_eq!(text, "");
        assert_eq!(stats.get("processinfo").unwrap().occurrences, 3);
        assert_eq!(years.len(), 3);
    }

    #[test]
    fn dtd_entities_and_unclosed_line_breaks_are_tolerated() {
        let doc = ead(
            r#"<did><date normal="1900/1950">1900&ndash;1950</date></did>
             <scopecontent><p>Smith &amp; Sons papers&nbsp;1900&mdash;1950</p></scopecontent>
             <arrangement><p>Letters <lb> and diaries</p></arrangement>"#,
        );
        let out = ElementExtractor::default().extract(&id(), &doc);
        assert_eq!(
            out.text,
            "smith & sons papers\u{a0}1900\u{2014}1950 letters and diaries"
        );
        assert_eq!(out.stats.get("scopecontent").unwrap().occurrences, 1);
        assert_eq!(out.stats.get("arrangement").unwrap().words, 3);
        assert_eq!(out.year, Some(1900));
    }

    #[test]
    fn truncated_markup_keeps_recoverable_text() {
        let out = ElementExtractor::default()
            .extract(&id(), "<ead id=\"x\"><scopecontent><p>Kept</p></scopecontent><processinfo><p>open");
        assert_eq!(out.text, "kept open");
        assert_eq!(out.stats.get("processinfo").unwrap().occurrences, 1);
    }
}
