//! `focus:` values: restrict a search to a markdown heading.

use super::model::{FocusTarget, HeadingDepth};

const HEADING_NODE: &str = "heading";

/// Parses heading search text.
///
/// `## weekly review` keeps its content and gets depth `h2`. Text without a
/// `#` run followed by a space is treated as a top-level heading and gains a
/// `# ` prefix.
pub fn parse_heading(text: &str) -> FocusTarget {
    let level = text.bytes().take_while(|byte| *byte == b'#').count();
    let is_heading = level > 0 && text[level..].starts_with(' ');

    if !is_heading {
        return FocusTarget {
            node_type: HEADING_NODE.to_string(),
            content: format!("# {text}"),
            depth: HeadingDepth::H1,
        };
    }

    let depth = HeadingDepth::from_level(level).unwrap_or_else(|| {
        log::warn!("search focus heading has {level} markers, expected 1-6; using h1");
        HeadingDepth::H1
    });
    FocusTarget {
        node_type: HEADING_NODE.to_string(),
        content: text.to_string(),
        depth,
    }
}
