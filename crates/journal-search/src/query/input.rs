//! Splitting a free-form search line into raw terms.

/// Splits a search line on whitespace.
///
/// Double quotes group a run of text into one term and are removed:
/// `title:"status update" budget` yields `title:status update` and `budget`.
/// Inside quotes, `\"` and `\\` escape the next character. An unterminated
/// quote extends to the end of the line. Never fails; empty terms are skipped.
pub fn split_search_input(input: &str) -> Vec<String> {
    let mut terms = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut escaped = false;

    for ch in input.chars() {
        if escaped {
            current.push(ch);
            escaped = false;
            continue;
        }

        match ch {
            '\\' if quoted => escaped = true,
            '"' => quoted = !quoted,
            ch if ch.is_whitespace() && !quoted => {
                if !current.is_empty() {
                    terms.push(std::mem::take(&mut current));
                }
            }
            ch => current.push(ch),
        }
    }

    if quoted {
        log::debug!("search input has an unterminated quote; using rest of line");
    }
    if !current.is_empty() {
        terms.push(current);
    }

    terms
}
