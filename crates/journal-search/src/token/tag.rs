//! Tag normalization.
//!
//! Tags are persisted in URLs and compared by value, so every spelling of the
//! same tag has to converge: `#My Tag` and `my_tag` are the same token.

/// Maximum tag length, in characters, after normalization.
pub const MAX_TAG_LENGTH: usize = 20;

/// Normalizes raw tag input.
///
/// - leading `#` markers are stripped
/// - spaces and commas become `_`
/// - the result is lower-cased
/// - `:` is removed (reserved as the prefix separator)
/// - the result is truncated to [`MAX_TAG_LENGTH`] characters
///
/// Returns `None` when nothing is left.
pub fn normalize_tag(raw: &str) -> Option<String> {
    let normalized = raw
        .trim_start_matches('#')
        .chars()
        .filter(|ch| *ch != ':')
        .map(|ch| if matches!(ch, ' ' | ',') { '_' } else { ch })
        .flat_map(char::to_lowercase)
        .take(MAX_TAG_LENGTH)
        .collect::<String>();

    if normalized.is_empty() {
        None
    } else {
        Some(normalized)
    }
}
