//! SVG parsing - read just enough of an SVG document to serialize shards.
//!
//! Shard drawings are flat: one root `<svg>` with a `viewBox` and a list
//! of `<path>` elements. We don't need a fully resolved render tree, only
//! attribute lookup and a document-order query for `<path>` elements, so
//! quick-xml streams the text into a tiny element tree.
//!
//! Anything that can answer those two questions can be serialized:
//! implement [`SvgElement`] for your own DOM handle.

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::{ShardError, ShardResult};

/// What the serializer needs from a document element.
///
/// ## Rust Lesson #14: Traits
///
/// A trait is like a TypeScript interface: it lists the methods a type
/// must provide. `serialize_scene` takes `&impl SvgElement`, so it works
/// with our quick-xml tree or any other DOM that implements these two.
pub trait SvgElement {
    /// Local tag name, e.g. `svg` or `path`.
    fn tag(&self) -> &str;

    /// Attribute value by name, `None` when absent.
    fn attribute(&self, name: &str) -> Option<&str>;

    /// All descendants with this tag name, in document order.
    fn query_all(&self, tag: &str) -> Vec<&Self>;
}

/// One element of a parsed document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    /// Builder-style attribute setter, handy for tests and callers that
    /// assemble documents in code.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    fn collect_named<'a>(&'a self, tag: &str, found: &mut Vec<&'a Element>) {
        for child in &self.children {
            if child.name == tag {
                found.push(child);
            }
            child.collect_named(tag, found);
        }
    }
}

impl SvgElement for Element {
    fn tag(&self) -> &str {
        &self.name
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn query_all(&self, tag: &str) -> Vec<&Self> {
        let mut found = Vec::new();
        self.collect_named(tag, &mut found);
        found
    }
}

/// A parsed SVG document.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgDocument {
    root: Element,
}

impl SvgDocument {
    /// Parse SVG text.
    ///
    /// Fails with [`ShardError::InvalidInput`] on malformed XML, when there
    /// is no root element, or when the root element is not `<svg>`.
    pub fn parse(text: &str) -> ShardResult<Self> {
        let mut reader = Reader::from_str(text);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => {
                    stack.push(start_element(e)?);
                }
                Ok(Event::Empty(ref e)) => {
                    let element = start_element(e)?;
                    attach(element, &mut stack, &mut root);
                }
                Ok(Event::End(_)) => {
                    if let Some(element) = stack.pop() {
                        attach(element, &mut stack, &mut root);
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(ShardError::invalid_input(format!(
                        "XML parse error at position {}: {}",
                        reader.error_position(),
                        e
                    )));
                }
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(ShardError::invalid_input(format!("unclosed <{}> element", open.name)));
        }

        let root = root.ok_or_else(|| ShardError::invalid_input("no root element found"))?;
        Self::from_root(root)
    }

    /// Wrap an already-built element tree.
    pub fn from_root(root: Element) -> ShardResult<Self> {
        if root.name != "svg" {
            return Err(ShardError::invalid_input(format!(
                "root element is <{}>, expected <svg>",
                root.name
            )));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Element {
        &self.root
    }
}

/// Put a finished element under its parent, or make it the root.
///
/// Only the first top-level element counts as the document root.
fn attach(element: Element, stack: &mut [Element], root: &mut Option<Element>) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => {
            if root.is_none() {
                *root = Some(element);
            }
        }
    }
}

fn start_element(e: &BytesStart) -> ShardResult<Element> {
    let local = e.local_name();
    let name = std::str::from_utf8(local.as_ref())
        .map_err(|err| ShardError::invalid_input(format!("element name is not UTF-8: {}", err)))?;

    let mut element = Element::new(name);
    for attr in e.attributes() {
        let attr = attr.map_err(|err| ShardError::invalid_input(format!("bad attribute: {}", err)))?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|err| ShardError::invalid_input(format!("attribute name is not UTF-8: {}", err)))?
            .to_string();
        let value = attr
            .unescape_value()
            .map_err(|err| ShardError::invalid_input(format!("bad value for {}: {}", key, err)))?
            .into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_root_attributes() {
        let doc = SvgDocument::parse(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 68 87" fill="none"></svg>"#,
        )
        .unwrap();
        assert_eq!(doc.root().tag(), "svg");
        assert_eq!(doc.root().attribute("viewBox"), Some("0 0 68 87"));
        assert_eq!(doc.root().attribute("width"), None);
    }

    #[test]
    fn paths_in_document_order_including_nested() {
        let doc = SvgDocument::parse(
            r##"<?xml version="1.0" encoding="UTF-8"?>
            <svg viewBox="0 0 10 10">
                <path id="a" d="M0 0L1 1"/>
                <g>
                    <path id="b" d="M1 1L2 2"/>
                    <rect width="1" height="1"/>
                </g>
                <path id="c" d="M2 2L3 3"></path>
            </svg>"##,
        )
        .unwrap();

        let ids: Vec<_> = doc
            .root()
            .query_all("path")
            .iter()
            .map(|p| p.attribute("id").unwrap())
            .collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn attribute_entities_are_unescaped() {
        let doc = SvgDocument::parse(r#"<svg viewBox="0 0 1 1"><path d="M0&#32;0L1 1"/></svg>"#).unwrap();
        let paths = doc.root().query_all("path");
        assert_eq!(paths[0].attribute("d"), Some("M0 0L1 1"));
    }

    #[test]
    fn namespaced_tags_use_local_name() {
        let doc = SvgDocument::parse(
            r#"<svg:svg xmlns:svg="http://www.w3.org/2000/svg" viewBox="0 0 1 1"><svg:path d=""/></svg:svg>"#,
        )
        .unwrap();
        assert_eq!(doc.root().query_all("path").len(), 1);
    }

    #[test]
    fn empty_text_is_invalid() {
        let result = SvgDocument::parse("");
        assert!(matches!(result, Err(ShardError::InvalidInput(_))));
    }

    #[test]
    fn non_svg_root_is_invalid() {
        let result = SvgDocument::parse("<html><body/></html>");
        assert!(matches!(result, Err(ShardError::InvalidInput(_))));
    }

    #[test]
    fn malformed_xml_is_invalid() {
        let result = SvgDocument::parse(r#"<svg viewBox="0 0 1 1"><path></svg>"#);
        assert!(matches!(result, Err(ShardError::InvalidInput(_))));
    }

    #[test]
    fn built_tree_can_be_wrapped() {
        let root = Element::new("svg")
            .with_attribute("viewBox", "0 0 1 1")
            .with_child(Element::new("path").with_attribute("d", "M0 0"));
        let doc = SvgDocument::from_root(root).unwrap();
        assert_eq!(doc.root().query_all("path").len(), 1);
        assert!(SvgDocument::from_root(Element::new("div")).is_err());
    }
}
