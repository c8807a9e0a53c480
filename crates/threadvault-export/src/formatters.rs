//! Display formatters shared by the static pages

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::LazyLock;
use threadvault_core::escape_html;

static LINE_BREAK_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br>").expect("valid line break pattern"));

/// Twitter archive style, e.g. `Wed Oct 10 20:19:24 +0000 2018`
const TWITTER_DATE_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// Shown for dates that cannot be parsed
pub const INVALID_DATE: &str = "Invalid Date";

/// Display name with `<br>` tags removed (any case); empty when absent
pub fn format_display_name(name: Option<&str>) -> String {
    name.map(|n| LINE_BREAK_TAG.replace_all(n, "").into_owned())
        .unwrap_or_default()
}

/// Date as `YYYY/MM/DD`.
///
/// Accepts RFC 3339, RFC 2822, Twitter archive timestamps and plain
/// `YYYY-MM-DD` / `YYYY-MM-DDTHH:MM:SS`. Timestamps with an offset keep the
/// calendar date of that offset.
pub fn format_date(date: &str) -> String {
    let date = date.trim();
    let parsed = DateTime::parse_from_rfc3339(date)
        .or_else(|_| DateTime::parse_from_rfc2822(date))
        .or_else(|_| DateTime::parse_from_str(date, TWITTER_DATE_FORMAT))
        .map(|dt| dt.date_naive())
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S%.f").ok().map(|dt| dt.date()))
        .or_else(|| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok());

    match parsed {
        Some(day) => day.format("%Y/%m/%d").to_string(),
        None => INVALID_DATE.to_string(),
    }
}

/// Escaped text with newlines turned into `<br>`; empty when absent
pub fn format_text(text: Option<&str>) -> String {
    match text {
        Some(text) if !text.is_empty() => escape_html(text).replace('\n', "<br>"),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_display_name() {
        assert_eq!(format_display_name(Some("Alice<br>Smith")), "AliceSmith");
        assert_eq!(format_display_name(Some("A<BR>B<Br>C")), "ABC");
        assert_eq!(format_display_name(Some("<br/>kept")), "<br/>kept");
        assert_eq!(format_display_name(None), "");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-01-02T03:04:05Z"), "2024/01/02");
        assert_eq!(format_date("2024-01-02T23:30:00+09:00"), "2024/01/02");
        assert_eq!(format_date("2018-10-10"), "2018/10/10");
        assert_eq!(format_date("2018-10-10T08:00:00"), "2018/10/10");
        assert_eq!(format_date("Wed Oct 10 20:19:24 +0000 2018"), "2018/10/10");
        assert_eq!(format_date("Tue, 1 Jul 2003 10:52:37 +0200"), "2003/07/01");
        assert_eq!(format_date("yesterday"), INVALID_DATE);
    }

    #[test]
    fn test_format_text() {
        assert_eq!(format_text(Some("a\nb")), "a<br>b");
        assert_eq!(format_text(Some("<i>\n&")), "&lt;i&gt;<br>&amp;");
        assert_eq!(format_text(Some("")), "");
        assert_eq!(format_text(None), "");
    }
}
