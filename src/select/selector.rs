//! Deterministic message selection.
//!
//! A line's SHA-256 digest is split into two disjoint slices:
//! - gate: bytes 0..4, decides *whether* the line gets a message
//! - pick: bytes 28..32, decides *which* message it gets
//!
//! Because the pick never depends on the chance percentage, a line that is
//! eligible at some chance gets the same message at every higher chance.

use serde::Serialize;
use sha2::{Digest, Sha256};

use super::{Catalog, ChancePercent};

/// The full decision for one line, for callers that want to see why.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub gate: u32,
    pub pick: u32,
    /// `gate % 100 < chance`
    pub eligible: bool,
    /// Catalog index chosen by the pick value, whether or not eligible.
    pub index: usize,
}

/// Compute the gate and pick values of a line.
pub fn digest_values(line: &str) -> (u32, u32) {
    let digest = Sha256::digest(line.as_bytes());
    let gate = u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]);
    let pick = u32::from_be_bytes([digest[28], digest[29], digest[30], digest[31]]);
    (gate, pick)
}

/// Selects messages from a catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct Selector {
    catalog: Catalog,
}

impl Selector {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> Catalog {
        self.catalog
    }

    pub fn evaluate(&self, line: &str, chance: ChancePercent) -> Verdict {
        let (gate, pick) = digest_values(line);
        Verdict {
            gate,
            pick,
            eligible: gate % 100 < u32::from(chance.get()),
            index: pick as usize % self.catalog.len(),
        }
    }

    pub fn select(&self, line: &str, chance: ChancePercent) -> Option<&'static str> {
        let verdict = self.evaluate(line, chance);
        if !verdict.eligible {
            return None;
        }
        self.catalog.get(verdict.index)
    }
}

/// Evaluate a line against the built-in catalog.
pub fn evaluate(line: &str, chance: ChancePercent) -> Verdict {
    Selector::default().evaluate(line, chance)
}

/// Pick the built-in message for a line, or `None` if the gate rejects it.
pub fn select_message(line: &str, chance: ChancePercent) -> Option<&'static str> {
    Selector::default().select(line, chance)
}
