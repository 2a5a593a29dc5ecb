//! Line eligibility.
//!
//! The chain runs in order and stops at the first rejection:
//! 1. blank lines
//! 2. lines shorter than [`MIN_LINE_LENGTH`] once trimmed
//! 3. lines starting with a comment marker
//! 4. lines the selector's gate rejects
//!
//! Comment detection only looks at the first characters of the trimmed
//! line. A line that starts with `#` or `*` for any other reason (a
//! preprocessor directive, a dereference, markdown) is skipped too.

use serde::Serialize;

use super::LineRecord;
use crate::select::{ChancePercent, Selector};

/// Minimum trimmed length, in characters, for a line to be considered.
pub const MIN_LINE_LENGTH: usize = 10;

/// Prefixes treated as the start of a comment.
pub const COMMENT_PREFIXES: &[&str] = &["//", "#", "/*", "*", "<!--"];

/// Why a line produced no annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    Blank,
    TooShort,
    Comment,
    NotChosen,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::Blank => "blank",
            SkipReason::TooShort => "too_short",
            SkipReason::Comment => "comment",
            SkipReason::NotChosen => "not_chosen",
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Check whether a trimmed line starts with a comment marker.
pub fn is_comment(trimmed: &str) -> bool {
    COMMENT_PREFIXES
        .iter()
        .any(|prefix| trimmed.starts_with(prefix))
}

/// Run the eligibility chain, returning the chosen message.
pub fn classify(
    selector: &Selector,
    record: &LineRecord<'_>,
    chance: ChancePercent,
) -> Result<&'static str, SkipReason> {
    if record.trimmed.is_empty() {
        return Err(SkipReason::Blank);
    }
    if record.trimmed.chars().count() < MIN_LINE_LENGTH {
        return Err(SkipReason::TooShort);
    }
    if is_comment(record.trimmed) {
        return Err(SkipReason::Comment);
    }
    selector
        .select(record.trimmed, chance)
        .ok_or(SkipReason::NotChosen)
}
