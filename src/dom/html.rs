//! HTML import (via `scraper`) and serialization for [`Document`].

use crate::dom::document::{Document, NodeData, NodeId};
use crate::dom::element::DomElement;
use crate::errors::{LazyLoadError, Result};
use scraper::{Html, Node as HtmlNode, Selector};
use std::collections::{HashMap, HashSet};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

// Parsed with scripting enabled, so <noscript> content is text too.
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "style", "script", "xmp", "iframe", "noembed", "noframes", "plaintext", "noscript",
];

impl Document {
    /// Parse a full page (when it has a doctype or `<html>`) or a fragment
    pub fn parse(html: &str) -> Document {
        let (document, _) = import(&parse_markup(html), is_full_document(html), None);
        document
    }

    /// Parse and return the elements matching `selector`, in document order
    pub fn parse_selecting(html: &str, selector: &str) -> Result<(Document, Vec<NodeId>)> {
        let parsed = parse_selector(selector)?;
        Ok(import(
            &parse_markup(html),
            is_full_document(html),
            Some(&parsed),
        ))
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for root in self.roots() {
            self.write_node(*root, &mut out);
        }
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        let Ok(node) = self.node(id) else {
            return;
        };
        match &node.data {
            NodeData::Doctype(name) => {
                out.push_str("<!DOCTYPE ");
                out.push_str(name);
                out.push('>');
            }
            NodeData::Comment(text) => {
                out.push_str("<!--");
                out.push_str(text);
                out.push_str("-->");
            }
            NodeData::Text(text) => {
                let raw = node
                    .parent
                    .and_then(|parent| self.element(parent).ok())
                    .map(|parent| RAW_TEXT_ELEMENTS.contains(&parent.tag_name.as_str()))
                    .unwrap_or(false);
                if raw {
                    out.push_str(text);
                } else {
                    escape_into(text, false, out);
                }
            }
            NodeData::Element(element) => {
                write_start_tag(element, out);
                if VOID_ELEMENTS.contains(&element.tag_name.as_str()) {
                    return;
                }
                for child in &node.children {
                    self.write_node(*child, out);
                }
                out.push_str("</");
                out.push_str(&element.tag_name);
                out.push('>');
            }
        }
    }
}

pub fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector)
        .map_err(|e| LazyLoadError::InvalidSelector(format!("{}: {:?}", selector, e)))
}

// Only the leading tag counts; comments before it are skipped.
fn is_full_document(html: &str) -> bool {
    let mut rest = html.trim_start();
    while let Some(comment) = rest.strip_prefix("<!--") {
        match comment.find("-->") {
            Some(end) => rest = comment[end + 3..].trim_start(),
            None => return false,
        }
    }
    let lower = rest
        .get(..rest.len().min(9))
        .unwrap_or_default()
        .to_ascii_lowercase();
    lower.starts_with("<!doctype") || lower.starts_with("<html")
}

fn parse_markup(html: &str) -> Html {
    if is_full_document(html) {
        Html::parse_document(html)
    } else {
        Html::parse_fragment(html)
    }
}

fn import(html: &Html, full_document: bool, selector: Option<&Selector>) -> (Document, Vec<NodeId>) {
    let mut matched = HashSet::new();
    if let Some(selector) = selector {
        for element in html.select(selector) {
            matched.insert(element.id());
        }
    }

    let root = html.tree.root();
    let mut document = Document::new();
    let mut ids = HashMap::new();
    let mut selected = Vec::new();
    let mut skipped = HashSet::new();

    for node in root.descendants() {
        let Some(parent) = node.parent() else {
            continue;
        };
        if skipped.contains(&parent.id()) {
            skipped.insert(node.id());
            continue;
        }
        let data = match node.value() {
            HtmlNode::Element(element) => {
                // Fragments come wrapped in a synthetic <html> element
                if !full_document && parent.id() == root.id() && element.name() == "html" {
                    continue;
                }
                let mut dom_element = DomElement::new(element.name());
                for (name, value) in element.attrs() {
                    dom_element.set_attribute(name, value);
                }
                NodeData::Element(dom_element)
            }
            HtmlNode::Text(text) => {
                let text: &str = text;
                NodeData::Text(text.to_string())
            }
            HtmlNode::Comment(comment) => {
                let comment: &str = comment;
                NodeData::Comment(comment.to_string())
            }
            HtmlNode::Doctype(doctype) => NodeData::Doctype(doctype.name().to_string()),
            _ => {
                skipped.insert(node.id());
                continue;
            }
        };

        let id = document.push_node(ids.get(&parent.id()).copied(), data);
        ids.insert(node.id(), id);
        if matched.contains(&node.id()) {
            selected.push(id);
        }
    }

    (document, selected)
}

fn write_start_tag(element: &DomElement, out: &mut String) {
    out.push('<');
    out.push_str(&element.tag_name);
    for attr in &element.attributes {
        out.push(' ');
        out.push_str(&attr.name);
        out.push_str("=\"");
        escape_into(&attr.value, true, out);
        out.push('"');
    }
    out.push('>');
}

fn escape_into(text: &str, attribute: bool, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            '"' if attribute => out.push_str("&quot;"),
            '<' if !attribute => out.push_str("&lt;"),
            '>' if !attribute => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
}
