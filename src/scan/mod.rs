//! Scanning buffers and files for lines that receive a message.

mod filter;
mod runner;
mod scanner;
mod types;

pub use filter::{classify, is_comment, SkipReason, COMMENT_PREFIXES, MIN_LINE_LENGTH};
pub use runner::{collect_files, Runner};
pub use scanner::{scan, scan_text, Scanner};
pub use types::{Annotation, FileAnnotations, LineRecord, ScanConfig, ScanResult};
