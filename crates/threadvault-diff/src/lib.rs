//! # threadvault Diff
//!
//! Compares bundled documents against locally edited revisions and renders
//! the result as HTML for the diff viewer.
//!
//! - [`segments`] - character-level diff runs over `similar`
//! - [`value`] - structural comparison and leaf difference discovery
//! - [`render`] - HTML rendering with `diff-removed` / `diff-added` spans
//!
//! ```
//! use serde_json::json;
//! use threadvault_diff::{find_differences, format_text_diff};
//!
//! let differences = find_differences(
//!     Some(&json!({"text": "hi"})),
//!     Some(&json!({"text": "ho"})),
//!     "",
//! );
//! assert_eq!(differences[0].path, "text");
//!
//! assert_eq!(
//!     format_text_diff("ab", "ac"),
//!     r#"a<span class="diff-removed">b</span><span class="diff-added">c</span>"#
//! );
//! ```

pub mod render;
pub mod segments;
pub mod value;

pub use render::{
    RenderedDifference, format_bundled_diff, format_local_diff, format_text_diff,
    render_differences,
};
pub use segments::{DiffSegment, char_segments};
pub use threadvault_core::escape_html;
pub use value::{Difference, compare_values, find_differences, format_value};
