//! Buffer scanning.

use tracing::debug;

use super::{classify, Annotation, LineRecord, ScanConfig, SkipReason};
use crate::buffer::TextBuffer;
use crate::select::Selector;

/// Turns a buffer into a complete annotation set.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scanner {
    selector: Selector,
}

impl Scanner {
    pub fn new(selector: Selector) -> Self {
        Self { selector }
    }

    /// Scan every line of the buffer.
    ///
    /// Annotations come back in ascending line order, at most one per line.
    /// When `config.enabled` is false nothing is hashed and the result is
    /// empty.
    pub fn scan<B: TextBuffer + ?Sized>(&self, buffer: &B, config: &ScanConfig) -> Vec<Annotation> {
        if !config.enabled {
            return Vec::new();
        }

        let mut annotations = Vec::new();
        let mut skipped = [0usize; 4];

        for index in 0..buffer.line_count() {
            if buffer.is_empty_or_whitespace(index) {
                skipped[0] += 1;
                continue;
            }

            let record = LineRecord::from_raw(index, buffer.line_text(index));
            match classify(&self.selector, &record, config.chance) {
                Ok(message) => annotations.push(Annotation {
                    line: index,
                    start_column: record.start_column,
                    end_column: record.end_column,
                    message: message.to_string(),
                }),
                Err(reason) => {
                    let slot = match reason {
                        SkipReason::Blank => 0,
                        SkipReason::TooShort => 1,
                        SkipReason::Comment => 2,
                        SkipReason::NotChosen => 3,
                    };
                    skipped[slot] += 1;
                }
            }
        }

        debug!(
            lines = buffer.line_count(),
            annotations = annotations.len(),
            blank = skipped[0],
            too_short = skipped[1],
            comment = skipped[2],
            not_chosen = skipped[3],
            chance = config.chance.get(),
            "scan complete"
        );

        annotations
    }
}

/// Scan a buffer with the built-in catalog.
pub fn scan<B: TextBuffer + ?Sized>(buffer: &B, config: &ScanConfig) -> Vec<Annotation> {
    Scanner::default().scan(buffer, config)
}

/// Scan raw text, splitting it into lines first.
pub fn scan_text(text: &str, config: &ScanConfig) -> Vec<Annotation> {
    let lines: Vec<&str> = text.lines().collect();
    scan(&lines, config)
}
