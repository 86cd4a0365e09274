//! Normalized row type shared by the parsers, validator, and formatter.
use crate::normalize::normalize_key;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// One input row: normalized field key mapped to a trimmed value.
///
/// Entries keep insertion order so contains-based lookups resolve
/// deterministically. Keys are normalized on the way in and on lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    entries: Vec<(String, String)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field, normalizing the key and trimming the value.
    ///
    /// Keys that normalize to nothing are dropped. An existing key keeps its
    /// position and takes the new value.
    pub(crate) fn insert(&mut self, raw_key: &str, value: &str) -> bool {
        let key = normalize_key(raw_key);
        if key.is_empty() {
            return false;
        }
        let value = value.trim().to_string();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
        true
    }

    /// Look up a field by any spelling of its key.
    pub fn get(&self, key: &str) -> Option<&str> {
        let key = normalize_key(key);
        self.entries
            .iter()
            .find(|(existing, _)| *existing == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: AsRef<str>, V: AsRef<str>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (key, value) in iter {
            row.insert(key.as_ref(), value.as_ref());
        }
        row
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
