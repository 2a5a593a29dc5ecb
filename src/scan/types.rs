//! Core types for scan results.

use serde::{Deserialize, Serialize};

use crate::select::ChancePercent;

/// Configuration read by every scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    pub enabled: bool,
    pub chance: ChancePercent,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            chance: ChancePercent::default(),
        }
    }
}

impl ScanConfig {
    pub fn new(enabled: bool, chance: ChancePercent) -> Self {
        Self { enabled, chance }
    }
}

/// A line as seen by the eligibility filter. Recomputed on every scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRecord<'a> {
    pub index: usize,
    pub raw: &'a str,
    pub trimmed: &'a str,
    /// Column of the first non-whitespace character (or the line length).
    pub start_column: usize,
    /// Length of the raw line; trailing whitespace is included.
    pub end_column: usize,
}

impl<'a> LineRecord<'a> {
    /// Columns are counted in characters, not bytes.
    pub fn from_raw(index: usize, raw: &'a str) -> Self {
        let trimmed = raw.trim();
        let end_column = raw.chars().count();
        let start_column = raw
            .chars()
            .position(|c| !c.is_whitespace())
            .unwrap_or(end_column);
        Self {
            index,
            raw,
            trimmed,
            start_column,
            end_column,
        }
    }
}

/// One message attached to one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// Zero-based line index.
    pub line: usize,
    pub start_column: usize,
    pub end_column: usize,
    pub message: String,
}

/// Annotations produced for a single file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileAnnotations {
    pub file: String,
    pub annotations: Vec<Annotation>,
}

/// Results of scanning a set of files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanResult {
    pub files: Vec<FileAnnotations>,
    /// Number of files scanned
    pub scanned: usize,
    /// Files that could not be read
    #[serde(default)]
    pub skipped: Vec<String>,
}

impl ScanResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge another result into this one.
    pub fn merge(&mut self, other: ScanResult) {
        self.files.extend(other.files);
        self.skipped.extend(other.skipped);
        self.scanned += other.scanned;
    }

    /// Total number of annotations across all files.
    pub fn total(&self) -> usize {
        self.files.iter().map(|f| f.annotations.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_record_columns() {
        let record = LineRecord::from_raw(3, "    const x = 1;  ");
        assert_eq!(record.index, 3);
        assert_eq!(record.trimmed, "const x = 1;");
        assert_eq!(record.start_column, 4);
        assert_eq!(record.end_column, 18);
    }

    #[test]
    fn test_line_record_counts_chars() {
        let record = LineRecord::from_raw(0, "\tlet é = \"ü\";");
        assert_eq!(record.start_column, 1);
        assert_eq!(record.end_column, 13);
    }

    #[test]
    fn test_line_record_blank() {
        let record = LineRecord::from_raw(0, "   ");
        assert_eq!(record.trimmed, "");
        assert_eq!(record.start_column, 3);
        assert_eq!(record.end_column, 3);
    }

    #[test]
    fn test_scan_result_merge() {
        let mut a = ScanResult {
            files: vec![FileAnnotations {
                file: "a.rs".to_string(),
                annotations: vec![Annotation {
                    line: 0,
                    start_column: 0,
                    end_column: 12,
                    message: "m".to_string(),
                }],
            }],
            scanned: 1,
            skipped: vec![],
        };
        let b = ScanResult {
            files: vec![],
            scanned: 2,
            skipped: vec!["b.rs".to_string()],
        };
        a.merge(b);
        assert_eq!(a.scanned, 3);
        assert_eq!(a.total(), 1);
        assert_eq!(a.skipped.len(), 1);
        assert!(!a.is_empty());
    }
}
