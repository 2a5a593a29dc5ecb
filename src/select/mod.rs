//! Message selection: which lines get a message, and which message.

mod catalog;
mod chance;
mod selector;

pub use catalog::{Catalog, MESSAGES};
pub use chance::{ChanceError, ChancePercent, DEFAULT_CHANCE};
pub use selector::{digest_values, evaluate, select_message, Selector, Verdict};
