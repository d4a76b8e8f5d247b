//! XML serialization of the output tree.
//!
//! Elements holding only elements are written one per line, indented.
//! Elements holding text are written inline, without added whitespace, since
//! whitespace there is content. Embedded structures and authorial notes found
//! inside inline content switch back to indented mode for their children.

use quick_xml::escape::escape;

use super::tree::{Element, Node};

const INDENT: &str = "  ";

/// Elements whose content is always inline.
const INLINE_CONTAINERS: &[&str] = &[
    "p", "num", "heading", "span", "a", "sup", "sub", "docTitle", "neutralCitation", "docketNumber",
    "courtType", "party", "judge", "lawyer", "docDate", "docJurisdiction", "quotedText", "def",
    "tocItem", "block", "mod", "uk:court", "uk:year", "uk:number", "uk:cite", "uk:hash", "uk:parser",
];

/// Elements that return to indented mode inside inline content.
const BLOCK_ISLANDS: &[&str] = &["embeddedStructure", "authorialNote"];

/// Serialize an element tree to an XML document string.
pub fn to_xml(root: &Element, pretty: bool) -> String {
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>");
    if pretty {
        out.push('\n');
        write_block(&mut out, root, 0);
    } else {
        write_compact(&mut out, root);
    }
    out
}

fn is_block_mode(element: &Element) -> bool {
    !INLINE_CONTAINERS.contains(&element.name.as_str())
        && element.children.iter().all(|n| matches!(n, Node::Element(_)))
}

fn write_start(out: &mut String, element: &Element, empty: bool) {
    out.push('<');
    out.push_str(&element.name);
    for (name, value) in &element.attributes {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape(value.as_str()));
        out.push('"');
    }
    out.push_str(if empty { "/>" } else { ">" });
}

fn write_end(out: &mut String, element: &Element) {
    out.push_str("</");
    out.push_str(&element.name);
    out.push('>');
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

/// Write an element on its own line(s) at `depth`.
fn write_block(out: &mut String, element: &Element, depth: usize) {
    indent(out, depth);
    if element.is_empty() {
        write_start(out, element, true);
        out.push('\n');
        return;
    }
    write_start(out, element, false);
    if is_block_mode(element) {
        out.push('\n');
        for child in element.elements() {
            write_block(out, child, depth + 1);
        }
        indent(out, depth);
    } else {
        for child in &element.children {
            write_inline(out, child, depth);
        }
    }
    write_end(out, element);
    out.push('\n');
}

/// Write a node inside inline content; `depth` is that of the enclosing block.
fn write_inline(out: &mut String, node: &Node, depth: usize) {
    match node {
        Node::Text(text) => out.push_str(&escape(text.as_str())),
        Node::Raw(markup) => out.push_str(markup),
        Node::Element(element) if element.is_empty() => write_start(out, element, true),
        Node::Element(element) if BLOCK_ISLANDS.contains(&element.name.as_str()) && is_block_mode(element) => {
            write_start(out, element, false);
            out.push('\n');
            for child in element.elements() {
                write_block(out, child, depth + 1);
            }
            indent(out, depth);
            write_end(out, element);
        }
        Node::Element(element) => {
            write_start(out, element, false);
            for child in &element.children {
                write_inline(out, child, depth);
            }
            write_end(out, element);
        }
    }
}

fn write_compact(out: &mut String, element: &Element) {
    if element.is_empty() {
        write_start(out, element, true);
        return;
    }
    write_start(out, element, false);
    for child in &element.children {
        match child {
            Node::Text(text) => out.push_str(&escape(text.as_str())),
            Node::Raw(markup) => out.push_str(markup),
            Node::Element(el) => write_compact(out, el),
        }
    }
    write_end(out, element);
}
