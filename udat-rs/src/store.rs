//! Ordered word dictionary.
//!
//! The store is a plain key-to-word mapping. Keys are unique (inserting an
//! existing key overwrites) and enumeration is always key-ascending, which
//! is what `:log` and the file saver print.

use std::collections::BTreeMap;

/// Lookup result text for a key that is not present. A normal result, not
/// an error.
pub const NULL_TEXT: &str = "<null>";

/// Ordered key/value word store.
#[derive(Debug, Default)]
pub struct DictStore {
    entries: BTreeMap<String, String>,
}

impl DictStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or overwrite) an entry. Key and value are trimmed before
    /// storage.
    pub fn set(&mut self, key: &str, value: &str) {
        self.entries
            .insert(key.trim_ascii().to_owned(), value.trim_ascii().to_owned());
    }

    /// Remove an entry. Returns `true` if it existed; removing an absent
    /// key is not an error.
    pub fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Exact, case-sensitive lookup.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Exact lookup, substituting [`NULL_TEXT`] for an absent key.
    pub fn get_or_null(&self, key: &str) -> &str {
        self.get(key).unwrap_or(NULL_TEXT)
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterate over all entries in key-ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
