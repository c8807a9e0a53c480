//! Character-level diff segments

use serde::{Deserialize, Serialize};
use similar::{ChangeTag, TextDiff};

/// A run of characters that is unchanged, added or removed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSegment {
    pub value: String,
    #[serde(default)]
    pub added: bool,
    #[serde(default)]
    pub removed: bool,
}

impl DiffSegment {
    fn new(value: &str, tag: ChangeTag) -> Self {
        Self {
            value: value.to_string(),
            added: tag == ChangeTag::Insert,
            removed: tag == ChangeTag::Delete,
        }
    }

    fn tag(&self) -> ChangeTag {
        if self.added {
            ChangeTag::Insert
        } else if self.removed {
            ChangeTag::Delete
        } else {
            ChangeTag::Equal
        }
    }

    /// Whether the segment is present in both inputs
    pub fn is_unchanged(&self) -> bool {
        !self.added && !self.removed
    }
}

/// Diff two strings character by character.
///
/// Consecutive changes with the same tag are merged into one segment. Within
/// a replaced region the removed run comes before the added one.
pub fn char_segments(before: &str, after: &str) -> Vec<DiffSegment> {
    let diff = TextDiff::from_chars(before, after);
    let mut segments: Vec<DiffSegment> = Vec::new();

    for change in diff.iter_all_changes() {
        let tag = change.tag();
        match segments.last_mut() {
            Some(last) if last.tag() == tag => last.value.push_str(change.value()),
            _ => segments.push(DiffSegment::new(change.value(), tag)),
        }
    }

    segments
}
