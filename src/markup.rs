//! Lenient element tree for finding-aid markup.
//!
//! Finding aids often carry DTD entities (`&nbsp;`, `&mdash;`), SGML-style
//! empty elements such as `<lb>`, and stray end tags. The tree is built from a
//! `quick-xml` event stream with end-name checks turned off:
//! - an end tag closes the nearest open element of the same name,
//! - an end tag with no open match is dropped,
//! - elements still open at end of input close there.
//!
//! A syntax error ends the read and keeps everything parsed before it.

use quick_xml::Reader;
use quick_xml::escape::unescape_with;
use quick_xml::events::{BytesStart, Event};
use tracing::warn;

use crate::constants::extraction::NAMED_ENTITIES;
use crate::constants::messages::RECOVERED_MARKUP_MSG;
use crate::types::DocumentId;

#[derive(Clone, Debug)]
enum Content {
    Element(usize),
    Text(String),
}

#[derive(Clone, Debug)]
struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    content: Vec<Content>,
    /// One past the index of the last descendant.
    end: usize,
}

/// Elements of one document, stored in document order.
#[derive(Clone, Debug, Default)]
pub(crate) struct MarkupTree {
    elements: Vec<Element>,
}

impl MarkupTree {
    /// Parse `content`, recovering from malformed markup instead of failing.
    pub(crate) fn parse(document: &DocumentId, content: &str) -> Self {
        let mut builder = TreeBuilder::default();
        let mut reader = Reader::from_str(content);
        let config = reader.config_mut();
        config.check_end_names = false;
        config.allow_unmatched_ends = true;

        loop {
            match reader.read_event() {
                Ok(Event::Start(start)) => builder.open(&start),
                Ok(Event::Empty(start)) => {
                    builder.open(&start);
                    builder.close_innermost();
                }
                Ok(Event::End(end)) => builder.close(&element_name(end.local_name().as_ref())),
                Ok(Event::Text(text)) => builder.text(resolve_text(&text)),
                Ok(Event::CData(data)) => builder.text(String::from_utf8_lossy(&data).into_owned()),
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(err) => {
                    warn!(
                        document = %document,
                        position = reader.buffer_position(),
                        error = %err,
                        RECOVERED_MARKUP_MSG
                    );
                    break;
                }
            }
        }
        builder.finish()
    }

    /// Every element in document order.
    pub(crate) fn elements(&self) -> impl Iterator<Item = ElementRef<'_>> {
        (0..self.elements.len()).map(move |index| ElementRef { tree: self, index })
    }
}

/// Borrowed handle to one element of a [`MarkupTree`].
#[derive(Clone, Copy, Debug)]
pub(crate) struct ElementRef<'a> {
    tree: &'a MarkupTree,
    index: usize,
}

impl<'a> ElementRef<'a> {
    fn element(&self) -> &'a Element {
        &self.tree.elements[self.index]
    }

    /// ASCII case-insensitive comparison against the local element name.
    pub(crate) fn is_named(&self, name: &str) -> bool {
        self.element().name.eq_ignore_ascii_case(name)
    }

    /// Value of the attribute with local name `name`.
    pub(crate) fn attribute(&self, name: &str) -> Option<&'a str> {
        self.element()
            .attributes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Elements below this one in document order, excluding itself.
    pub(crate) fn descendants(&self) -> impl Iterator<Item = ElementRef<'a>> {
        let tree = self.tree;
        (self.index + 1..self.element().end).map(move |index| ElementRef { tree, index })
    }

    /// Concatenated text of this element and everything below it.
    pub(crate) fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for content in &self.element().content {
            match content {
                Content::Text(text) => out.push_str(text),
                Content::Element(index) => ElementRef {
                    tree: self.tree,
                    index: *index,
                }
                .collect_text(out),
            }
        }
    }
}

#[derive(Default)]
struct TreeBuilder {
    elements: Vec<Element>,
    open: Vec<usize>,
}

impl TreeBuilder {
    fn open(&mut self, start: &BytesStart<'_>) {
        let index = self.elements.len();
        let attributes = start
            .html_attributes()
            .with_checks(false)
            .flatten()
            .map(|attribute| {
                (
                    element_name(attribute.key.local_name().as_ref()),
                    resolve_entities(&String::from_utf8_lossy(&attribute.value)),
                )
            })
            .collect();
        self.elements.push(Element {
            name: element_name(start.local_name().as_ref()),
            attributes,
            content: Vec::new(),
            end: index + 1,
        });
        if let Some(&parent) = self.open.last() {
            self.elements[parent].content.push(Content::Element(index));
        }
        self.open.push(index);
    }

    fn close_innermost(&mut self) {
        if let Some(index) = self.open.pop() {
            self.elements[index].end = self.elements.len();
        }
    }

    fn close(&mut self, name: &str) {
        let matching = self
            .open
            .iter()
            .rposition(|&index| self.elements[index].name == name);
        if let Some(position) = matching {
            while self.open.len() > position {
                self.close_innermost();
            }
        }
    }

    fn text(&mut self, text: String) {
        if let Some(&parent) = self.open.last() {
            self.elements[parent].content.push(Content::Text(text));
        }
    }

    fn finish(mut self) -> MarkupTree {
        while !self.open.is_empty() {
            self.close_innermost();
        }
        MarkupTree {
            elements: self.elements,
        }
    }
}

fn element_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).to_ascii_lowercase()
}

fn resolve_text(raw: &[u8]) -> String {
    resolve_entities(&String::from_utf8_lossy(raw))
}

/// Resolve character references and known named entities. An unknown or
/// unterminated reference is kept as written.
fn resolve_entities(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let reference = match tail.find(';') {
            Some(end) => &tail[..=end],
            None => tail,
        };
        match unescape_with(reference, named_entity) {
            Ok(resolved) => out.push_str(&resolved),
            Err(_) => out.push_str(reference),
        }
        rest = &tail[reference.len()..];
    }
    out.push_str(rest);
    out
}

fn named_entity(name: &str) -> Option<&'static str> {
    NAMED_ENTITIES
        .iter()
        .find(|(entity, _)| *entity == name)
        .map(|(_, value)| *value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> MarkupTree {
        MarkupTree::parse(&"fixture.xml".to_string(), content)
    }

    fn first<'a>(tree: &'a MarkupTree, name: &str) -> ElementRef<'a> {
        tree.elements().find(|element| element.is_named(name)).unwrap()
    }

    #[test]
    fn well_formed_markup_keeps_nesting_and_text() {
        let tree = parse(r#"<ead><did><date normal="1901">1901</date></did><p>One <emph>two</emph> three</p></ead>"#);
        let names: Vec<&str> = tree
            .elements()
            .map(|element| element.element().name.as_str())
            .collect();
        assert_eq!(names, vec!["ead", "did", "date", "p", "emph"]);
        assert_eq!(first(&tree, "p").text(), "One two three");
        assert_eq!(first(&tree, "date").attribute("NORMAL"), Some("1901"));
        assert_eq!(first(&tree, "did").descendants().count(), 1);
        assert_eq!(first(&tree, "ead").descendants().count(), 4);
    }

    #[test]
    fn html_entities_are_resolved() {
        let tree = parse("<p>Smith &amp; Sons papers&nbsp;1900&mdash;1950 &#169; &bogus; AT&T</p>");
        assert_eq!(
            first(&tree, "p").text(),
            "Smith & Sons papers\u{a0}1900\u{2014}1950 \u{a9} &bogus; AT&T"
        );
    }

    #[test]
    fn unclosed_elements_close_at_their_parent_end_tag() {
        let tree = parse("<scopecontent><p>Letters <lb> and diaries</p><p>Second</p></scopecontent>");
        let paragraph = first(&tree, "p");
        assert_eq!(paragraph.text(), "Letters  and diaries");
        assert_eq!(paragraph.descendants().count(), 1);
        assert_eq!(
            first(&tree, "scopecontent")
                .descendants()
                .filter(|element| element.is_named("p"))
                .count(),
            2
        );
    }

    #[test]
    fn stray_end_tags_are_ignored() {
        let tree = parse("<ead></lb><p>Text</emph></p></ead>");
        assert_eq!(first(&tree, "p").text(), "Text");
        assert_eq!(first(&tree, "ead").descendants().count(), 1);
    }

    #[test]
    fn truncated_input_keeps_what_was_read() {
        let tree = parse("<ead><scopecontent><p>Kept text</p><p>open");
        assert_eq!(first(&tree, "p").text(), "Kept text");
        assert!(tree.elements().any(|element| element.is_named("scopecontent")));
    }

    #[test]
    fn prefixed_names_match_by_local_name() {
        let tree = parse(r#"<ead:ead xmlns:ead="urn:isbn:1-931666-22-9"><ead:P>Body</ead:P></ead:ead>"#);
        assert_eq!(first(&tree, "p").text(), "Body");
    }
}
