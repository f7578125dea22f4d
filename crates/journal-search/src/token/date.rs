//! ISO-8601 date values for `date:` tokens.
//!
//! Only three shapes are accepted: `YYYY`, `YYYY-MM` and `YYYY-MM-DD`. The
//! check is purely lexical; [`date_bounds`] is where calendar validity matters.

use chrono::{Datelike, NaiveDate};

/// Returns true when `value` is exactly `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
pub fn is_iso_date(value: &str) -> bool {
    let bytes = value.as_bytes();
    let digits = |range: std::ops::Range<usize>| bytes[range].iter().all(u8::is_ascii_digit);

    match bytes.len() {
        4 => digits(0..4),
        7 => digits(0..4) && bytes[4] == b'-' && digits(5..7),
        10 => {
            digits(0..4)
                && bytes[4] == b'-'
                && digits(5..7)
                && bytes[7] == b'-'
                && digits(8..10)
        }
        _ => false,
    }
}

/// Inclusive first and last calendar day covered by a date value.
///
/// `2024` covers the whole year, `2024-02` the whole month. Returns `None` for
/// values that are not real dates (e.g. `2024-13`).
pub fn date_bounds(value: &str) -> Option<(NaiveDate, NaiveDate)> {
    if !is_iso_date(value) {
        return None;
    }

    let year = value.get(0..4)?.parse::<i32>().ok()?;
    match value.len() {
        4 => Some((
            NaiveDate::from_ymd_opt(year, 1, 1)?,
            NaiveDate::from_ymd_opt(year, 12, 31)?,
        )),
        7 => {
            let month = value.get(5..7)?.parse::<u32>().ok()?;
            let start = NaiveDate::from_ymd_opt(year, month, 1)?;
            let next_month = if month == 12 {
                NaiveDate::from_ymd_opt(year + 1, 1, 1)?
            } else {
                NaiveDate::from_ymd_opt(year, month + 1, 1)?
            };
            let end = next_month.pred_opt()?;
            debug_assert_eq!(end.month(), month);
            Some((start, end))
        }
        _ => {
            let day = NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()?;
            Some((day, day))
        }
    }
}
