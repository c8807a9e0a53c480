//! Shared utilities for operations across threadvault crates.
//!
//! Provides helpers for:
//! - Serialization with consistent error handling
//! - HTML escaping
//! - Path validation under an output root

use crate::{Error, Result};
use std::path::{Component, Path, PathBuf};

/// Generic JSON serialization with consistent error handling
/// Works with any type that implements Serialize (including slices)
pub fn to_json_string<T: serde::Serialize + ?Sized>(data: &T, context: &str) -> Result<String> {
    serde_json::to_string_pretty(data)
        .map_err(|e| Error::parse_error(format!("Failed to serialize {} as JSON: {}", context, e)))
}

/// Escape text for inclusion in HTML.
///
/// Replaces `&`, `<`, `>`, `"` and `'` (as `&#039;`).
pub fn escape_html(unsafe_text: &str) -> String {
    let mut out = String::with_capacity(unsafe_text.len());
    for ch in unsafe_text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Path validation helpers
pub struct PathValidator;

impl PathValidator {
    /// Join `path` under `root`, refusing anything that would escape it.
    ///
    /// Works for paths that do not exist yet (static export targets), so the
    /// check is lexical rather than via canonicalization.
    pub fn validate_path_in_root(root: &Path, path: &Path) -> Result<PathBuf> {
        let mut normalized = PathBuf::new();
        for component in path.components() {
            match component {
                Component::Normal(name) => normalized.push(name),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(Error::path_traversal(root.join(path)));
                }
            }
        }
        Ok(root.join(normalized))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize)]
    struct TestData {
        name: String,
        value: i32,
    }

    #[test]
    fn test_to_json_string() {
        let data = TestData {
            name: "test".to_string(),
            value: 42,
        };
        let json = to_json_string(&data, "test_data").unwrap();
        assert!(json.contains("test"));
        assert!(json.contains("42"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#039;Jerry&#039;&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_path_validator_valid() {
        let root = PathBuf::from("/public");
        let result = PathValidator::validate_path_in_root(&root, Path::new("document/docA"));
        assert_eq!(result.unwrap(), PathBuf::from("/public/document/docA"));
    }

    #[test]
    fn test_path_validator_traversal() {
        let root = PathBuf::from("/public");
        let result = PathValidator::validate_path_in_root(&root, Path::new("../../etc/passwd"));
        assert!(result.is_err());

        let result = PathValidator::validate_path_in_root(&root, Path::new("/etc"));
        assert!(result.is_err());
    }
}
