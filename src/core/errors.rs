//! Ordered error map accumulated by validation passes.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// Key used when an error is reported as a plain message.
pub const GENERIC_KEY: &str = "error";

/// Ordered key → message map.
///
/// Insertion order is preserved. Re-inserting an existing key replaces its
/// message in place, so the key keeps its original position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ErrorMap {
    entries: Vec<(String, String)>,
}

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the message stored under `key`.
    pub fn insert(&mut self, key: impl Into<String>, message: impl Into<String>) {
        let key = key.into();
        let message = message.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = message,
            None => self.entries.push((key, message)),
        }
    }

    /// Merge every entry of `other` into this map, last write wins.
    pub fn merge(&mut self, other: ErrorMap) {
        for (key, message) in other.entries {
            self.insert(key, message);
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, message)| message.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, m)| (k.as_str(), m.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    /// Concatenate every `key: message` pair in insertion order with no
    /// delimiter between entries.
    ///
    /// This is the payload carried by a strict validation failure. Use
    /// [`ErrorMap::joined`] or [`ErrorMap::to_json`] for a rendering that can
    /// be split back apart.
    pub fn concatenated(&self) -> String {
        self.joined("")
    }

    /// Render every `key: message` pair in insertion order, separated by
    /// `separator`.
    pub fn joined(&self, separator: &str) -> String {
        self.entries
            .iter()
            .map(|(key, message)| format!("{key}: {message}"))
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Render the map as an ordered JSON object.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl fmt::Display for ErrorMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.concatenated())
    }
}

impl Serialize for ErrorMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, message) in &self.entries {
            map.serialize_entry(key, message)?;
        }
        map.end()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ErrorMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = ErrorMap::new();
        for (key, message) in iter {
            map.insert(key, message);
        }
        map
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for ErrorMap {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// An error as reported by a check or by `add_error`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorEntry {
    /// Plain message, stored under [`GENERIC_KEY`].
    Message(String),

    /// Structured entries merged into the error map as-is.
    Map(ErrorMap),
}

impl ErrorEntry {
    /// Convert into the map that gets merged into the validation state.
    pub fn into_map(self) -> ErrorMap {
        match self {
            ErrorEntry::Message(message) => ErrorMap::from([(GENERIC_KEY, message)]),
            ErrorEntry::Map(map) => map,
        }
    }
}

impl From<&str> for ErrorEntry {
    fn from(message: &str) -> Self {
        ErrorEntry::Message(message.to_string())
    }
}

impl From<String> for ErrorEntry {
    fn from(message: String) -> Self {
        ErrorEntry::Message(message)
    }
}

impl From<ErrorMap> for ErrorEntry {
    fn from(map: ErrorMap) -> Self {
        ErrorEntry::Map(map)
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for ErrorEntry {
    fn from(pairs: [(K, V); N]) -> Self {
        ErrorEntry::Map(ErrorMap::from(pairs))
    }
}
