//! `filter:` values: structural matches on markdown (mdast) nodes.
//!
//! Two forms are understood:
//! - `code` matches any node of a known type
//! - `code[lang="sql"]` matches nodes of that type with one attribute value

use std::collections::BTreeMap;

use super::model::NodeMatch;

/// Node types a filter may name without attributes.
///
/// <https://github.com/syntax-tree/mdast#nodes>
pub const NODE_TYPES: &[&str] = &[
    "paragraph",
    "heading",
    "blockquote",
    "list",
    "listItem",
    "table",
    "tableRow",
    "tableCell",
    "html",
    "code",
    "definition",
    "footnoteDefinition",
    "text",
    "emphasis",
    "strong",
    "delete",
    "inlineCode",
    "break",
    "link",
    "image",
    "linkReference",
    "imageReference",
    "footnote",
    "footnoteReference",
];

pub fn parse_node_match(raw: &str) -> Option<NodeMatch> {
    if let Some(open) = raw.find('[') {
        return parse_attribute_match(&raw[..open], &raw[open + 1..]);
    }

    if is_word(raw) && NODE_TYPES.contains(&raw) {
        return Some(NodeMatch {
            node_type: raw.to_string(),
            attributes: None,
            text: None,
        });
    }

    log::debug!("search dropped filter term with unknown node type value={raw}");
    None
}

/// Parses `attr="value"]`, the part after `node_type[`.
fn parse_attribute_match(node_type: &str, rest: &str) -> Option<NodeMatch> {
    if !is_word(node_type) {
        return None;
    }

    let body = rest.strip_suffix("\"]")?;
    let split = body.rfind("=\"")?;
    let attribute = &body[..split];
    let value = &body[split + 2..];
    if attribute.is_empty() || value.is_empty() {
        log::debug!("search dropped filter term with incomplete attribute node_type={node_type}");
        return None;
    }

    let mut attributes = BTreeMap::new();
    attributes.insert(attribute.to_string(), value.to_string());
    Some(NodeMatch {
        node_type: node_type.to_string(),
        attributes: Some(attributes),
        text: None,
    })
}

/// Formats a node match the way [`parse_node_match`] reads it.
///
/// Only the first attribute is written; filters carry at most one.
pub fn format_node_match(node: &NodeMatch) -> String {
    match node
        .attributes
        .as_ref()
        .and_then(|attributes| attributes.iter().next())
    {
        Some((key, value)) => format!("{}[{key}=\"{value}\"]", node.node_type),
        None => node.node_type.clone(),
    }
}

fn is_word(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}
