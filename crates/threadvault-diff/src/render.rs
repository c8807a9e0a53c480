//! HTML rendering of diffs.
//!
//! Removed runs are wrapped in `<span class="diff-removed">`, added runs in
//! `<span class="diff-added">`. All text is HTML-escaped.

use crate::segments::char_segments;
use crate::value::{Difference, find_differences, format_value};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use threadvault_core::escape_html;

const REMOVED_NULL: &str = r#"<span class="diff-removed">null</span>"#;

fn removed_span(text: &str) -> String {
    format!(r#"<span class="diff-removed">{}</span>"#, escape_html(text))
}

fn added_span(text: &str) -> String {
    format!(r#"<span class="diff-added">{}</span>"#, escape_html(text))
}

/// Present and not JSON `null`
fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

/// Render the bundled side: unchanged text plus removed runs.
///
/// An absent or `null` bundled value renders as a removed `null`; when the
/// local counterpart is absent the whole bundled value is removed.
pub fn format_bundled_diff(bundled: Option<&Value>, local: Option<&Value>) -> String {
    let Some(bundled) = present(bundled) else {
        return REMOVED_NULL.to_string();
    };
    let bundled_str = format_value(Some(bundled));
    let Some(local) = present(local) else {
        return removed_span(&bundled_str);
    };
    let local_str = format_value(Some(local));

    char_segments(&bundled_str, &local_str)
        .iter()
        .filter(|segment| !segment.added)
        .map(|segment| {
            if segment.removed {
                removed_span(&segment.value)
            } else {
                escape_html(&segment.value)
            }
        })
        .collect()
}

/// Render the local side: unchanged text plus added runs.
///
/// An absent or `null` local value renders as a removed `null`; when the
/// bundled counterpart is absent the whole local value is added.
pub fn format_local_diff(local: Option<&Value>, bundled: Option<&Value>) -> String {
    let Some(local) = present(local) else {
        return REMOVED_NULL.to_string();
    };
    let local_str = format_value(Some(local));
    let Some(bundled) = present(bundled) else {
        return added_span(&local_str);
    };
    let bundled_str = format_value(Some(bundled));

    char_segments(&bundled_str, &local_str)
        .iter()
        .filter(|segment| !segment.removed)
        .map(|segment| {
            if segment.added {
                added_span(&segment.value)
            } else {
                escape_html(&segment.value)
            }
        })
        .collect()
}

/// Render both sides of a text change in one string
pub fn format_text_diff(before: &str, after: &str) -> String {
    match (before.is_empty(), after.is_empty()) {
        (true, true) => String::new(),
        (true, false) => added_span(after),
        (false, true) => removed_span(before),
        (false, false) => char_segments(before, after)
            .iter()
            .map(|segment| {
                if segment.added {
                    added_span(&segment.value)
                } else if segment.removed {
                    removed_span(&segment.value)
                } else {
                    escape_html(&segment.value)
                }
            })
            .collect(),
    }
}

/// One difference with both sides rendered for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedDifference {
    #[serde(flatten)]
    pub difference: Difference,
    pub bundled_html: String,
    pub local_html: String,
}

impl From<Difference> for RenderedDifference {
    fn from(difference: Difference) -> Self {
        let bundled_html = format_bundled_diff(difference.bundled.as_ref(), difference.local.as_ref());
        let local_html = format_local_diff(difference.local.as_ref(), difference.bundled.as_ref());
        Self {
            difference,
            bundled_html,
            local_html,
        }
    }
}

/// Find and render every difference between a bundled document and its
/// local revision
pub fn render_differences(bundled: &Value, local: &Value) -> Vec<RenderedDifference> {
    let differences = find_differences(Some(bundled), Some(local), "");
    log::debug!("Rendering {} differences", differences.len());
    differences.into_iter().map(RenderedDifference::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bundled_diff_marks_removed_runs() {
        let html = format_bundled_diff(Some(&json!("cat")), Some(&json!("cut")));
        assert_eq!(html, r#"&quot;c<span class="diff-removed">a</span>t&quot;"#);
    }

    #[test]
    fn test_local_diff_marks_added_runs() {
        let html = format_local_diff(Some(&json!("cut")), Some(&json!("cat")));
        assert_eq!(html, r#"&quot;c<span class="diff-added">u</span>t&quot;"#);
    }

    #[test]
    fn test_missing_sides() {
        assert_eq!(format_bundled_diff(None, Some(&json!(1))), REMOVED_NULL);
        assert_eq!(format_bundled_diff(Some(&Value::Null), Some(&json!(1))), REMOVED_NULL);
        assert_eq!(
            format_bundled_diff(Some(&json!(5)), None),
            r#"<span class="diff-removed">5</span>"#
        );

        assert_eq!(format_local_diff(None, Some(&json!(1))), REMOVED_NULL);
        assert_eq!(
            format_local_diff(Some(&json!("new")), Some(&Value::Null)),
            r#"<span class="diff-added">&quot;new&quot;</span>"#
        );
    }

    #[test]
    fn test_text_diff() {
        assert_eq!(format_text_diff("", ""), "");
        assert_eq!(format_text_diff("", "<b>"), r#"<span class="diff-added">&lt;b&gt;</span>"#);
        assert_eq!(format_text_diff("gone", ""), r#"<span class="diff-removed">gone</span>"#);
        assert_eq!(
            format_text_diff("abc", "abd"),
            r#"ab<span class="diff-removed">c</span><span class="diff-added">d</span>"#
        );
    }

    #[test]
    fn test_text_diff_escapes_unchanged_text() {
        let html = format_text_diff("a & b", "a & c");
        assert!(html.starts_with("a &amp; "));
        assert!(!html.contains("a & "));
    }

    #[test]
    fn test_render_differences() {
        let rendered = render_differences(
            &json!({"tweets": [{"text": "hi"}]}),
            &json!({"tweets": [{"text": "ho"}]}),
        );
        assert_eq!(rendered.len(), 1);
        assert_eq!(rendered[0].difference.path, "tweets.0.text");
        assert!(rendered[0].bundled_html.contains(r#"<span class="diff-removed">i</span>"#));
        assert!(rendered[0].local_html.contains(r#"<span class="diff-added">o</span>"#));

        let value = serde_json::to_value(&rendered[0]).unwrap();
        assert_eq!(value["path"], json!("tweets.0.text"));
        assert!(value["bundledHtml"].is_string());
        assert!(value["localHtml"].is_string());
    }
}
