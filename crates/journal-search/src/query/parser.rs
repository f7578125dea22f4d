//! Token grammar and collection operations.
//!
//! A raw term is `[-]prefix:value`. The prefix is the text before the first
//! `:` and must name a known token kind, so values may themselves contain
//! colons (`title:10:30 standup`). A term without a colon is free text.

use crate::token::{SearchToken, TokenKind};

use super::input::split_search_input;

// ---------------------------------------------------------------------------
// Grammar
// ---------------------------------------------------------------------------

/// A raw term split into its parts, before the value is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RawTerm<'a> {
    kind: TokenKind,
    excluded: bool,
    value: &'a str,
}

fn split_term(raw: &str) -> Option<RawTerm<'_>> {
    let Some(split) = raw.find(':') else {
        return Some(RawTerm {
            kind: TokenKind::Text,
            excluded: false,
            value: raw,
        });
    };

    let prefix = &raw[..split];
    let (excluded, name) = match prefix.strip_prefix('-') {
        Some(name) => (true, name),
        None => (false, prefix),
    };
    let Some(kind) = TokenKind::from_prefix(name) else {
        log::debug!("search dropped term with unknown prefix prefix={prefix}");
        return None;
    };

    Some(RawTerm {
        kind,
        excluded,
        value: &raw[split + 1..],
    })
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parses one raw term into a token.
///
/// Returns `None` for empty input, unknown prefixes, empty or invalid values,
/// and exclusion of a singleton kind (`-before:x`).
pub fn parse_token(raw: &str) -> Option<SearchToken> {
    if raw.is_empty() {
        return None;
    }

    let term = split_term(raw)?;
    let token = term.kind.parse(term.value)?;
    if term.excluded {
        let excluded = token.excluded();
        if excluded.is_none() {
            log::debug!(
                "search dropped excluded singleton term kind={}",
                term.kind.prefix()
            );
        }
        return excluded;
    }
    Some(token)
}

/// Parses raw terms in order, dropping the ones that do not parse.
pub fn parse_tokens<S: AsRef<str>>(raws: &[S]) -> Vec<SearchToken> {
    raws.iter()
        .filter_map(|raw| parse_token(raw.as_ref()))
        .collect()
}

/// Parses a whole search line into a merged token collection.
///
/// `in:work tag:#urgent budget report` yields an `in`, a `tag` and two `text`
/// tokens; duplicates collapse and later singletons win.
pub fn parse_search_input(input: &str) -> Vec<SearchToken> {
    parse_tokens(&split_search_input(input))
        .into_iter()
        .fold(Vec::new(), merge_token)
}

// ---------------------------------------------------------------------------
// Collection operations
// ---------------------------------------------------------------------------

/// Merges `token` into `tokens` using its kind's merge policy.
pub fn merge_token(tokens: Vec<SearchToken>, token: SearchToken) -> Vec<SearchToken> {
    token.kind().add(tokens, token)
}

/// Removes the token `raw` parses to.
///
/// Unparseable input and absent tokens leave the collection unchanged.
pub fn remove_token(tokens: Vec<SearchToken>, raw: &str) -> Vec<SearchToken> {
    match parse_token(raw) {
        Some(token) => token.kind().remove(tokens, &token),
        None => tokens,
    }
}

pub fn serialize_token(token: &SearchToken) -> String {
    token.kind().serialize(token)
}

pub fn serialize_tokens(tokens: &[SearchToken]) -> Vec<String> {
    tokens.iter().map(serialize_token).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{HeadingDepth, NodeMatch};

    fn tokens(raws: &[&str]) -> Vec<SearchToken> {
        parse_tokens(raws)
    }

    #[test]
    fn parses_in_token() {
        assert_eq!(
            parse_token("in:chronicles"),
            Some(SearchToken::journal("chronicles"))
        );
    }

    #[test]
    fn free_text_becomes_text_token() {
        assert_eq!(
            parse_token("banana pudding"),
            Some(SearchToken::text("banana pudding"))
        );
    }

    #[test]
    fn parses_tokens_in_order() {
        assert_eq!(
            tokens(&["in:chronicles", "text:javascript", "title:status update"]),
            vec![
                SearchToken::journal("chronicles"),
                SearchToken::text("javascript"),
                SearchToken::title("status update"),
            ]
        );
    }

    #[test]
    fn unknown_prefix_and_empty_value_are_dropped() {
        assert_eq!(parse_token("color:red"), None);
        assert_eq!(parse_token("in:"), None);
        assert_eq!(parse_token(":value"), None);
        assert_eq!(parse_token(""), None);
        assert_eq!(tokens(&["color:red", "in:work", "date:invalid"]).len(), 1);
    }

    #[test]
    fn values_may_contain_colons() {
        assert_eq!(parse_token("title:a:b"), Some(SearchToken::title("a:b")));
        assert_eq!(
            parse_token("text:10:30 standup"),
            Some(SearchToken::text("10:30 standup"))
        );
    }

    #[test]
    fn prefixes_are_case_insensitive() {
        assert_eq!(parse_token("IN:work"), Some(SearchToken::journal("work")));
    }

    #[test]
    fn negated_in_token_round_trips() {
        let token = parse_token("-in:work").expect("token");
        assert_eq!(
            token,
            SearchToken::In {
                value: "work".to_string(),
                excluded: true,
            }
        );
        assert_eq!(serialize_token(&token), "-in:work");
    }

    #[test]
    fn negated_singletons_are_dropped() {
        assert_eq!(parse_token("-before:doc-1"), None);
        assert_eq!(parse_token("-date:2024"), None);
    }

    #[test]
    fn tag_values_are_normalized() {
        assert_eq!(parse_token("tag:#javascript"), Some(SearchToken::tag("javascript")));
        assert_eq!(
            parse_token("tag:#My Tag, Extra"),
            Some(SearchToken::tag("my_tag__extra"))
        );
    }

    #[test]
    fn date_values_are_validated() {
        assert_eq!(parse_token("date:2025"), Some(SearchToken::date("2025")));
        assert_eq!(parse_token("date:2025-02"), Some(SearchToken::date("2025-02")));
        assert_eq!(
            parse_token("date:2025-02-05"),
            Some(SearchToken::date("2025-02-05"))
        );
        assert_eq!(parse_token("date:invalid"), None);
    }

    #[test]
    fn parses_legacy_filter_and_focus() {
        assert_eq!(
            parse_token("filter:code"),
            Some(SearchToken::Filter {
                value: NodeMatch {
                    node_type: "code".to_string(),
                    attributes: None,
                    text: None,
                },
            })
        );

        let Some(SearchToken::Focus { value }) = parse_token("focus:## another token") else {
            panic!("expected focus token");
        };
        assert_eq!(value.depth, HeadingDepth::H2);
    }

    #[test]
    fn merge_adds_new_journal() {
        let merged = merge_token(
            tokens(&["in:chronicles", "text:javascript", "title:status update"]),
            SearchToken::journal("work"),
        );
        assert_eq!(merged.len(), 4);
    }

    #[test]
    fn merge_drops_duplicate_journal() {
        let merged = merge_token(tokens(&["in:work"]), SearchToken::journal("work"));
        assert_eq!(merged, vec![SearchToken::journal("work")]);
    }

    #[test]
    fn merge_keeps_included_and_excluded_tags() {
        let merged = merge_token(tokens(&["tag:alpha"]), parse_token("-tag:alpha").unwrap());
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn merge_replaces_before_token() {
        let merged = merge_token(tokens(&["before:2022-01-01"]), SearchToken::before("2022-01-03"));
        assert_eq!(merged, vec![SearchToken::before("2022-01-03")]);

        let same = merge_token(merged.clone(), SearchToken::before("2022-01-03"));
        assert_eq!(same, merged);
    }

    #[test]
    fn merge_replaces_date_token() {
        let merged = merge_token(tokens(&["date:2025"]), SearchToken::date("2025-02"));
        assert_eq!(merged, vec![SearchToken::date("2025-02")]);
    }

    #[test]
    fn remove_deletes_matching_token_only() {
        let before = tokens(&["in:chronicles", "text:javascript", "in:work"]);
        let removed = remove_token(before, "in:work");
        assert_eq!(removed, tokens(&["in:chronicles", "text:javascript"]));
    }

    #[test]
    fn remove_of_absent_or_invalid_token_is_a_no_op() {
        let original = tokens(&["in:chronicles", "tag:alpha"]);
        assert_eq!(remove_token(original.clone(), "in:doesnotexist"), original);
        assert_eq!(remove_token(original.clone(), "color:red"), original);
        assert_eq!(remove_token(original.clone(), ""), original);
    }

    #[test]
    fn remove_respects_exclusion() {
        let original = vec![
            SearchToken::tag("alpha"),
            SearchToken::tag("beta").excluded().unwrap(),
            SearchToken::tag("gamma"),
        ];

        let removed = remove_token(original.clone(), "-tag:beta");
        assert_eq!(removed, vec![SearchToken::tag("alpha"), SearchToken::tag("gamma")]);

        let untouched = remove_token(original.clone(), "tag:beta");
        assert_eq!(untouched, original);
    }

    #[test]
    fn remove_singleton_ignores_value() {
        let removed = remove_token(tokens(&["in:work", "before:doc-9"]), "before:anything");
        assert_eq!(removed, tokens(&["in:work"]));
    }

    #[test]
    fn serialized_tokens_reparse_to_the_same_token() {
        let raws = [
            "in:work",
            "-in:home",
            "tag:#My Tag",
            "-tag:draft",
            "title:a:b",
            "text:my favorite restaurant",
            "-text:lunch",
            "before:doc123",
            "date:2024-06",
            "filter:code",
            "filter:code[lang=\"sql\"]",
            "focus:todo list",
            "focus:### notes",
        ];
        for raw in raws {
            let token = parse_token(raw).unwrap_or_else(|| panic!("{raw} should parse"));
            let serialized = serialize_token(&token);
            assert_eq!(parse_token(&serialized), Some(token), "round trip of {raw}");
        }
    }

    #[test]
    fn serialization_applies_normalization() {
        let token = parse_token("tag:#My Tag").unwrap();
        assert_eq!(serialize_token(&token), "tag:my_tag");

        let token = parse_token("focus:todo list").unwrap();
        assert_eq!(serialize_token(&token), "focus:# todo list");
    }

    #[test]
    fn parses_a_whole_search_line() {
        let parsed = parse_search_input(
            "in:work tag:#urgent before:doc123 budget report budget before:doc456",
        );
        assert_eq!(
            serialize_tokens(&parsed),
            vec![
                "in:work",
                "tag:urgent",
                "text:budget",
                "text:report",
                "before:doc456",
            ]
        );
    }
}
