//! Markup parsers building a `Document`.
//!
//! - XML (`.svg`, `.xml`, `.xhtml`): streamed with quick-xml
//! - HTML: parsed with tl, then converted node by node; the doctype and
//!   `<script>`/`<style>` bodies are taken from the source verbatim

use std::path::Path;
use std::sync::LazyLock;

use quick_xml::{Reader, events::BytesStart, events::Event};
use regex::Regex;
use rustc_hash::FxHashMap;
use thiserror::Error;

use super::{Document, Element, MarkupFormat, NodeData, NodeId};
use crate::utils::html::{is_raw_text_element, unescape};

/// Markup parsing errors
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed XML at byte {position}")]
    Xml {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    #[error("malformed attribute: {0}")]
    Attribute(String),

    #[error("malformed HTML: {0}")]
    Html(String),
}

/// Parse a document, choosing the syntax from the file extension.
pub fn parse(input: &str, path: &Path) -> Result<Document, ParseError> {
    match MarkupFormat::from_path(path) {
        MarkupFormat::Xml => parse_xml(input),
        MarkupFormat::Html => parse_html(input),
    }
}

// ============================================================================
// XML
// ============================================================================

/// Parse XML markup.
///
/// Every event keeps its exact source slice, so declarations, comments
/// and text survive a parse/render cycle unchanged.
pub fn parse_xml(input: &str) -> Result<Document, ParseError> {
    let mut doc = Document::new(MarkupFormat::Xml);
    let mut reader = Reader::from_str(input);
    reader.config_mut().trim_text(false);

    let mut stack = vec![doc.root()];

    loop {
        let start = reader.buffer_position() as usize;
        let event = reader.read_event().map_err(|source| ParseError::Xml {
            position: reader.error_position(),
            source,
        })?;
        let end = reader.buffer_position() as usize;
        let parent = stack.last().copied().unwrap_or(doc.root());

        match event {
            Event::Start(e) => {
                let node = push_element(&mut doc, parent, element_from_xml(&e)?);
                stack.push(node);
            }
            Event::Empty(e) => {
                push_element(&mut doc, parent, element_from_xml(&e)?);
            }
            Event::End(_) => {
                if stack.len() > 1 {
                    stack.pop();
                }
            }
            // Entity references arrive as their own event; keep them raw
            Event::Text(_) | Event::GeneralRef(_) => doc.append_text(parent, &input[start..end]),
            Event::Eof => break,
            _ => doc.append_raw(parent, input[start..end].to_string()),
        }
    }

    Ok(doc)
}

fn element_from_xml(start: &BytesStart<'_>) -> Result<Element, ParseError> {
    let mut elem = Element::new(String::from_utf8_lossy(start.name().as_ref()));
    for attr in start.attributes() {
        let attr = attr.map_err(|e| ParseError::Attribute(e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let raw = String::from_utf8_lossy(&attr.value);
        elem.attrs.push((key, unescape(&raw).into_owned()));
    }
    Ok(elem)
}

fn push_element(doc: &mut Document, parent: NodeId, elem: Element) -> NodeId {
    let node = doc.alloc(NodeData::Element(elem));
    doc.append_child(parent, node);
    node
}

// ============================================================================
// HTML
// ============================================================================

/// `<` followed by a tag name, or a comment opener.
static MARKUP_OPEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<!--|<([A-Za-z][A-Za-z0-9-]*)").expect("markup open pattern is valid")
});

/// One attribute in a start tag, with an optional quoted or bare value.
static ATTRIBUTE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([^ \t\n\r\f"'<>/=]+)(?:[ \t\n\r\f]*=[ \t\n\r\f]*(?:"[^"]*"|'[^']*'|[^ \t\n\r\f>]*))?"#)
        .expect("attribute pattern is valid")
});

/// Parse HTML markup.
///
/// tl drops the doctype and tokenizes inside `<script>`/`<style>`, so the
/// doctype prolog is kept from the source and raw-text bodies are blanked
/// before tl sees them, then restored verbatim from the source.
pub fn parse_html(input: &str) -> Result<Document, ParseError> {
    let mut doc = Document::new(MarkupFormat::Html);
    let root = doc.root();

    let prolog_end = doctype_end(input).unwrap_or(0);
    if prolog_end > 0 {
        doc.append_raw(root, input[..prolog_end].to_string());
    }
    let source = &input[prolog_end..];

    let bodies = raw_text_bodies(source);
    let masked = mask_ranges(source, bodies.values());

    let dom = tl::parse(&masked, tl::ParserOptions::default())
        .map_err(|e| ParseError::Html(format!("{e:?}")))?;
    let html = HtmlSource {
        source,
        bodies: &bodies,
        parser: dom.parser(),
    };
    for handle in dom.children() {
        html.convert(&mut doc, root, *handle);
    }
    Ok(doc)
}

/// End offset of a `<!DOCTYPE ...>` preceded only by whitespace.
fn doctype_end(input: &str) -> Option<usize> {
    let start = input.len() - input.trim_start_matches(['\u{feff}', ' ', '\t', '\n', '\r']).len();
    let head = input.get(start..start + "<!doctype".len())?;
    if !head.eq_ignore_ascii_case("<!doctype") {
        return None;
    }
    input[start..].find('>').map(|gt| start + gt + 1)
}

/// Body range of every `<script>`/`<style>`, keyed by its start tag offset.
fn raw_text_bodies(source: &str) -> FxHashMap<usize, (usize, usize)> {
    let lower = source.to_ascii_lowercase();
    let mut bodies = FxHashMap::default();
    let mut pos = 0;

    while let Some(caps) = MARKUP_OPEN_RE.captures_at(source, pos) {
        let Some(open) = caps.get(0) else { break };
        let Some(name) = caps.get(1) else {
            pos = lower[open.end()..]
                .find("-->")
                .map_or(source.len(), |i| open.end() + i + 3);
            continue;
        };
        if !is_raw_text_element(name.as_str()) {
            pos = name.end();
            continue;
        }

        let Some(gt) = source[name.end()..].find('>') else {
            break;
        };
        let body_start = name.end() + gt + 1;
        let close = format!("</{}", name.as_str().to_ascii_lowercase());
        let body_end = lower[body_start..]
            .find(&close)
            .map_or(source.len(), |i| body_start + i);
        bodies.insert(open.start(), (body_start, body_end));
        pos = body_end;
    }
    bodies
}

/// Replace each range with spaces, keeping byte offsets intact.
fn mask_ranges<'a>(source: &str, ranges: impl Iterator<Item = &'a (usize, usize)>) -> String {
    let mut ranges: Vec<_> = ranges.copied().collect();
    ranges.sort_unstable();

    let mut masked = String::with_capacity(source.len());
    let mut last = 0;
    for (start, end) in ranges {
        masked.push_str(&source[last..start]);
        masked.extend(std::iter::repeat_n(' ', end - start));
        last = end;
    }
    masked.push_str(&source[last..]);
    masked
}

/// Attribute names of a start tag, in source order.
fn attribute_order(raw: &str, tag_name: &str) -> Vec<String> {
    let after_lt = raw.strip_prefix('<').unwrap_or(raw).trim_start();
    let Some(rest) = after_lt.get(tag_name.len()..) else {
        return Vec::new();
    };

    let mut names = Vec::new();
    let mut last = 0;
    for caps in ATTRIBUTE_RE.captures_iter(rest) {
        let Some(whole) = caps.get(0) else { continue };
        // The start tag ends at the first `>` between attributes
        if rest[last..whole.start()].contains('>') {
            break;
        }
        if let Some(name) = caps.get(1) {
            names.push(name.as_str().to_string());
        }
        last = whole.end();
    }
    names
}

/// tl output plus the unmasked source it was parsed from.
struct HtmlSource<'s, 'p, 'm> {
    source: &'s str,
    bodies: &'s FxHashMap<usize, (usize, usize)>,
    parser: &'p tl::Parser<'m>,
}

impl HtmlSource<'_, '_, '_> {
    /// Convert a tl node handle (and its subtree) into the arena.
    fn convert(&self, doc: &mut Document, parent: NodeId, handle: tl::NodeHandle) {
        let Some(node) = handle.get(self.parser) else {
            return;
        };

        match node {
            tl::Node::Tag(tag) => {
                let tag_name = tag.name().as_utf8_str();
                let mut elem = Element::new(&*tag_name);

                let tag_attrs = tag.attributes();
                for (key, value) in tag_attrs.iter() {
                    let key_str: &str = key.as_ref();
                    let value = value
                        .map(|v| unescape(&v).into_owned())
                        .unwrap_or_default();
                    elem.attrs.push((key_str.to_string(), value));
                }
                for (name, value) in [("id", tag_attrs.id()), ("class", tag_attrs.class())] {
                    if let Some(value) = value
                        && elem.attr(name).is_none()
                    {
                        elem.attrs
                            .push((name.to_string(), unescape(&value.as_utf8_str()).into_owned()));
                    }
                }
                let order = attribute_order(&tag.raw().as_utf8_str(), &tag_name);
                elem.attrs.sort_by_key(|(key, _)| {
                    order.iter().position(|name| name == key).unwrap_or(usize::MAX)
                });

                let id = push_element(doc, parent, elem);
                if is_raw_text_element(&tag_name) {
                    let (start, _) = tag.boundaries(self.parser);
                    if let Some(&(body_start, body_end)) = self.bodies.get(&start)
                        && body_end > body_start
                    {
                        doc.append_text(id, &self.source[body_start..body_end]);
                    }
                    return;
                }
                for child in tag.children().top().iter() {
                    self.convert(doc, id, *child);
                }
            }
            tl::Node::Raw(bytes) => doc.append_text(parent, &bytes.as_utf8_str()),
            tl::Node::Comment(bytes) => {
                let text = bytes.as_utf8_str();
                let raw = if text.starts_with("<!--") {
                    text.into_owned()
                } else {
                    format!("<!--{text}-->")
                };
                doc.append_raw(parent, raw);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_xml_structure() {
        let doc = parse_xml(
            r#"<?xml version="1.0"?>
<svg xmlns="http://www.w3.org/2000/svg"><rect id="r"><animate attributeName="x" from="0" to="10" dur="1s"/></rect></svg>"#,
        )
        .unwrap();

        let svg = doc.first_element_by_tag("svg").unwrap();
        let rect = doc.element_by_id("r").unwrap();
        assert_eq!(doc.parent(rect), Some(svg));
        let animate = doc.first_element_by_tag("animate").unwrap();
        assert_eq!(doc.parent(animate), Some(rect));
        assert_eq!(doc.attr(animate, "attributeName"), Some("x"));
        assert!(matches!(doc.data(doc.children(doc.root())[0]), NodeData::Raw(_)));
    }

    #[test]
    fn test_parse_xml_decodes_attributes_keeps_text_raw() {
        let doc = parse_xml(r#"<svg><text title="a &amp; b">x &lt; y</text></svg>"#).unwrap();
        let text = doc.first_element_by_tag("text").unwrap();
        assert_eq!(doc.attr(text, "title"), Some("a & b"));
        assert_eq!(doc.text_content(text), "x &lt; y");
        assert_eq!(doc.children(text).len(), 1);
    }

    #[test]
    fn test_parse_xml_preserves_case_and_prefixes() {
        let doc = parse_xml(
            r##"<svg xmlns:xlink="http://www.w3.org/1999/xlink"><animateMotion dur="1s"><mpath xlink:href="#p"/></animateMotion></svg>"##,
        )
        .unwrap();
        let mpath = doc.first_element_by_tag("mpath").unwrap();
        assert_eq!(doc.attr(mpath, "xlink:href"), Some("#p"));
        assert!(doc.first_element_by_tag("animateMotion").is_some());
    }

    #[test]
    fn test_parse_xml_mismatched_end_fails() {
        let err = parse_xml("<svg><g></svg>").unwrap_err();
        assert!(matches!(err, ParseError::Xml { .. }));
    }

    #[test]
    fn test_parse_html_structure() {
        let doc = parse_html(
            r#"<!DOCTYPE html><html><head><title>t</title></head><body><svg><rect id="r" width="10"><set attributeName="fill" to="red" dur="1s"/></rect></svg></body></html>"#,
        )
        .unwrap();

        let head = doc.first_element_by_tag("head").unwrap();
        assert!(doc.is_tag(head, "head"));
        let rect = doc.element_by_id("r").unwrap();
        assert_eq!(doc.attr(rect, "width"), Some("10"));
        let set = doc.first_element_by_tag("set").unwrap();
        assert_eq!(doc.parent(set), Some(rect));
        assert_eq!(doc.attr(set, "attributeName"), Some("fill"));
    }

    #[test]
    fn test_parse_dispatches_on_extension() {
        let doc = parse("<svg/>", Path::new("image.svg")).unwrap();
        assert_eq!(doc.format(), MarkupFormat::Xml);
        let doc = parse("<p>hi</p>", Path::new("page.html")).unwrap();
        assert_eq!(doc.format(), MarkupFormat::Html);
    }

    #[test]
    fn test_doctype_end() {
        assert_eq!(doctype_end("<!DOCTYPE html><html>"), Some(15));
        assert_eq!(doctype_end("\n <!doctype html>\n<html>"), Some(17));
        assert_eq!(doctype_end("<html><!DOCTYPE html>"), None);
        assert_eq!(doctype_end("<!-- c --><html>"), None);
    }

    #[test]
    fn test_raw_text_bodies_skip_comments() {
        let source = "<!-- <script> --><SCRIPT type=\"x\">a < b</SCRIPT><style></style>";
        let bodies = raw_text_bodies(source);
        assert_eq!(bodies.len(), 2);
        let (start, end) = bodies[&17];
        assert_eq!(&source[start..end], "a < b");
        let (start, end) = bodies[&48];
        assert_eq!(start, end);
    }

    #[test]
    fn test_attribute_order() {
        assert_eq!(
            attribute_order(r#"<p class="a > b" id=x data-n='1' hidden>text</p>"#, "p"),
            vec!["class", "id", "data-n", "hidden"]
        );
        assert!(attribute_order("<br>", "br").is_empty());
    }

    #[test]
    fn test_parse_html_script_does_not_swallow_body() {
        let doc = parse_html(
            "<html><head><script>if (a < b) {}</script></head><body><svg id=\"s\"></svg></body></html>",
        )
        .unwrap();
        let body = doc.first_element_by_tag("body").unwrap();
        let svg = doc.element_by_id("s").unwrap();
        assert_eq!(doc.parent(svg), Some(body));
        let script = doc.first_element_by_tag("script").unwrap();
        assert_eq!(doc.text_content(script), "if (a < b) {}");
    }
}

