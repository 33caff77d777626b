//! Symmetric dictionary search.
//!
//! A translation query matches either side of an entry, ignoring ASCII
//! case: a word equal to a key yields the value, a word equal to a value
//! yields the key. Entries are visited in key-ascending order; within one
//! entry the key side is checked before the value side, and the first match
//! wins.

use crate::store::DictStore;

/// Reply text for a word with no dictionary match. A normal result, not an
/// error.
pub const UNKNOWN_TEXT: &str = "Unknown word... Retry!";

/// Look `word` up on both sides of every entry, returning the opposite
/// side of the first match.
pub fn translate<'a>(store: &'a DictStore, word: &str) -> Option<&'a str> {
    for (key, value) in store.iter() {
        if key.eq_ignore_ascii_case(word) {
            return Some(value);
        }
        if value.eq_ignore_ascii_case(word) {
            return Some(key);
        }
    }
    None
}

/// [`translate`], substituting [`UNKNOWN_TEXT`] when nothing matches.
pub fn translate_or_unknown<'a>(store: &'a DictStore, word: &str) -> &'a str {
    translate(store, word).unwrap_or(UNKNOWN_TEXT)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
