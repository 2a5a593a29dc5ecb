//! The fixed message catalog.
//!
//! Order matters: the pick value of a line indexes into this list, so
//! reordering or inserting entries changes which message every line gets.

/// Built-in messages, indexed 0..N-1.
pub const MESSAGES: &[&str] = &[
    "Surely you can't be serious? I am serious, and don't call me Shirley 👧",
    "Can you fly this airplane and land it? ✈️",
    "Don't you tell me which zone is for loading, and which zone is for stopping! 🔴",
    "Johnny, what can you make out of this?  This? Why, I can make a hat or a brooch or a pterodactyl 🐔",
    "Get me Rex Kramer! 💂‍♂️",
    "The tower, the tower! Rapunzel, Rapunzel! 🗼",
    "Chicago, this is flight two-zero-niner.  We're in trouble. 🔥",
    "Cold got to be! Y'know? ✊🏿",
    "I say hey, sky. Subba say I wan' see... 😰",
    "I just want to tell you both good luck. We're all counting on you... 🙈",
    "Looks like I picked the wrong week to quit sniffing glue... 😬",
];

/// An immutable, non-empty, ordered list of messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Catalog {
    messages: &'static [&'static str],
}

impl Catalog {
    /// Wrap a message list. Returns `None` for an empty list, since the
    /// pick step divides by the catalog size.
    pub fn new(messages: &'static [&'static str]) -> Option<Self> {
        if messages.is_empty() {
            None
        } else {
            Some(Self { messages })
        }
    }

    /// The built-in catalog.
    pub fn builtin() -> Self {
        Self { messages: MESSAGES }
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Always false; kept for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'static str> {
        self.messages.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.messages.iter().copied()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
