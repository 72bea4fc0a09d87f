//! Document serialization.

use super::{Document, MarkupFormat, NodeData, NodeId};
use crate::utils::html::{escape_attr, is_void_element};

/// Serialize a document back to markup text.
pub fn render(doc: &Document) -> String {
    let mut out = String::with_capacity(4096);
    for child in doc.children(doc.root()) {
        write_node(doc, *child, &mut out);
    }
    out
}

fn write_node(doc: &Document, id: NodeId, out: &mut String) {
    match doc.data(id) {
        NodeData::Document => {
            for child in doc.children(id) {
                write_node(doc, *child, out);
            }
        }
        NodeData::Text(text) | NodeData::Raw(text) => out.push_str(text),
        NodeData::Element(elem) => {
            out.push('<');
            out.push_str(&elem.tag);
            for (key, value) in &elem.attrs {
                out.push(' ');
                out.push_str(key);
                out.push_str("=\"");
                out.push_str(&escape_attr(value));
                out.push('"');
            }

            let children = doc.children(id);
            if children.is_empty() {
                match doc.format() {
                    MarkupFormat::Xml => {
                        out.push_str("/>");
                        return;
                    }
                    MarkupFormat::Html if is_void_element(&elem.tag) => {
                        out.push('>');
                        return;
                    }
                    MarkupFormat::Html => {}
                }
            }

            out.push('>');
            for child in children {
                write_node(doc, *child, out);
            }
            out.push_str("</");
            out.push_str(&elem.tag);
            out.push('>');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{parse_html, parse_xml};

    #[test]
    fn test_xml_roundtrip_is_verbatim() {
        let source = "<?xml version=\"1.0\"?>\n<!-- art -->\n<svg viewBox=\"0 0 10 10\">\n  <rect id=\"r\" title=\"a &amp; b\"/>\n  <text>x &lt; y</text>\n</svg>\n";
        let doc = parse_xml(source).unwrap();
        assert_eq!(render(&doc), source);
    }

    #[test]
    fn test_xml_detached_child_leaves_empty_tag() {
        let mut doc = parse_xml("<svg><rect><animate/></rect></svg>").unwrap();
        let animate = doc.first_element_by_tag("animate").unwrap();
        doc.detach(animate);
        assert_eq!(render(&doc), "<svg><rect/></svg>");
    }

    #[test]
    fn test_html_void_and_empty_elements() {
        let doc = parse_html("<html><head><meta charset=\"utf-8\"></head><body><div></div></body></html>").unwrap();
        let out = render(&doc);
        assert!(out.contains("<meta charset=\"utf-8\">"));
        assert!(!out.contains("</meta>"));
        assert!(out.contains("<div></div>"));
    }

    #[test]
    fn test_html_roundtrip_keeps_doctype() {
        let source = "<!DOCTYPE html>\n<html><head></head><body><p>hi</p></body></html>";
        assert_eq!(render(&parse_html(source).unwrap()), source);
    }

    #[test]
    fn test_html_roundtrip_keeps_script_body() {
        let source = "<html><head><script>if (a < b) { x(\"</p>\"); }</script><style>a > b { color: red; }</style></head><body><script src=\"a.js\"></script></body></html>";
        assert_eq!(render(&parse_html(source).unwrap()), source);
    }

    #[test]
    fn test_html_roundtrip_keeps_attribute_order() {
        let source = "<html><body><p class=\"a b\" id=\"x\" title=\"t\">hi</p></body></html>";
        assert_eq!(render(&parse_html(source).unwrap()), source);
    }
}
