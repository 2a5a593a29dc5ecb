//! Syntax Zaz - deterministic joke tooltips for lines of source code.
//!
//! Each eligible line of a buffer is hashed. One slice of the digest decides
//! whether the line gets a message at the configured chance, a disjoint slice
//! decides which message from a fixed catalog. Nothing random is involved:
//! the same line gets the same message on every scan, in every process.
//!
//! # Architecture
//!
//! - `select`: message catalog, chance percentage, the selector itself
//! - `scan`: line eligibility, buffer scanning, multi-file runner
//! - `buffer`: the read-only buffer view a host provides
//! - `debounce`: trailing-edge debounce timer
//! - `session`: host binding, change notifications and user commands
//! - `settings`: YAML settings file
//! - `report`: output formatting (pretty, JSON, SARIF)

pub mod buffer;
pub mod cli;
pub mod debounce;
pub mod logging;
pub mod report;
pub mod scan;
pub mod select;
pub mod session;
pub mod settings;

pub use buffer::{Document, TextBuffer};
pub use debounce::Debouncer;
pub use scan::{scan, scan_text, Annotation, Runner, ScanConfig, ScanResult, Scanner};
pub use select::{select_message, Catalog, ChanceError, ChancePercent, Selector, MESSAGES};
pub use session::{Host, Session};
pub use settings::Settings;
