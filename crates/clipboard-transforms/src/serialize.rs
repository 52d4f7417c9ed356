//! Body serializer for parsed rich-text fragments.
//!
//! Output is normalized: attributes sorted by name and double-quoted, void
//! elements self-closed, text and attribute values escaped. Only the
//! children of the fragment's `<html>` root are written, never the wrapper.

use std::borrow::Cow;
use std::collections::HashMap;

use ego_tree::{NodeId, NodeRef};
use scraper::{Html, Node};

use clipboard_utils::html::{
    is_raw_text_element, is_void_element, push_escaped_attr, push_escaped_text,
    skips_leading_newline,
};

/// Replacement `src` values keyed by element node.
pub type SrcOverrides = HashMap<NodeId, String>;

/// Serialize the body content of `fragment`, substituting `src` attributes
/// of the elements listed in `overrides`.
pub fn serialize_body(fragment: &Html, overrides: &SrcOverrides) -> String {
    let mut output = String::new();
    for child in fragment.root_element().children() {
        serialize_node(child, overrides, false, &mut output);
    }
    output
}

fn serialize_node(
    node: NodeRef<'_, Node>,
    overrides: &SrcOverrides,
    in_raw_text: bool,
    output: &mut String,
) {
    match node.value() {
        Node::Text(text) => {
            if in_raw_text {
                output.push_str(text);
            } else {
                push_escaped_text(output, text);
            }
        }
        Node::Comment(comment) => {
            output.push_str("<!--");
            output.push_str(comment);
            output.push_str("-->");
        }
        Node::Element(element) => {
            let name = element.name();
            let src_override = overrides.get(&node.id());

            output.push('<');
            output.push_str(name);

            // Foreign attributes (`xlink:href`, `xml:lang`) keep their prefix
            let mut attrs: Vec<(Cow<'_, str>, &str)> = element
                .attrs
                .iter()
                .map(|(name, value)| {
                    let qualified = match &name.prefix {
                        Some(prefix) => Cow::Owned(format!("{}:{}", prefix, name.local)),
                        None => Cow::Borrowed(&*name.local),
                    };
                    (qualified, &**value)
                })
                .collect();
            attrs.sort_by(|a, b| a.0.cmp(&b.0));
            for (attr, value) in attrs {
                let value = match src_override {
                    Some(src) if attr == "src" => src.as_str(),
                    _ => value,
                };
                output.push(' ');
                output.push_str(&attr);
                output.push_str("=\"");
                push_escaped_attr(output, value);
                output.push('"');
            }

            if is_void_element(name) {
                output.push_str("/>");
                return;
            }
            output.push('>');

            // The parser drops the first newline after these start tags
            if skips_leading_newline(name) {
                if let Some(Node::Text(text)) = node.first_child().map(|child| child.value()) {
                    if text.starts_with('\n') {
                        output.push('\n');
                    }
                }
            }

            let raw = is_raw_text_element(name);
            for child in node.children() {
                serialize_node(child, overrides, raw, output);
            }

            output.push_str("</");
            output.push_str(name);
            output.push('>');
        }
        Node::Document | Node::Fragment => {
            for child in node.children() {
                serialize_node(child, overrides, in_raw_text, output);
            }
        }
        // Doctype, processing instructions
        _ => {}
    }
}
