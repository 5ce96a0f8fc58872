//! Keys and key-value mappings

use std::fmt;

use crate::error::DomainError;
use crate::value::Value;

/// A validated, non-empty store key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key(String);

impl Key {
    pub fn new(key: impl Into<String>) -> std::result::Result<Self, DomainError> {
        let key = key.into();
        if key.is_empty() {
            return Err(DomainError::EmptyKey);
        }
        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Key {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Validate a non-empty list of keys
pub(crate) fn keys(
    command: &'static str,
    keys: &[&str],
) -> std::result::Result<Vec<Key>, DomainError> {
    if keys.is_empty() {
        return Err(DomainError::NoKeys(command));
    }
    keys.iter().map(|k| Key::new(*k)).collect()
}

/// Key-to-value mapping for MSET / MSETNX
///
/// Keys are unique; insertion order is kept so the emitted command is
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyValueMapping {
    entries: Vec<(Key, Value)>,
}

impl KeyValueMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a mapping; a key that is already present is rejected
    pub fn insert(
        &mut self,
        key: &str,
        value: impl Into<Value>,
    ) -> std::result::Result<&mut Self, DomainError> {
        let key = Key::new(key)?;
        if self.contains_key(key.as_str()) {
            return Err(DomainError::DuplicateKey(key.into_string()));
        }
        self.entries.push((key, value.into()));
        Ok(self)
    }

    /// Build a mapping from pairs, failing on the first duplicate key
    pub fn from_pairs<K, V, I>(pairs: I) -> std::result::Result<Self, DomainError>
    where
        K: AsRef<str>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut mapping = Self::new();
        for (key, value) in pairs {
            mapping.insert(key.as_ref(), value)?;
        }
        Ok(mapping)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k.as_str() == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Value)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub(crate) fn into_entries(self) -> Vec<(Key, Value)> {
        self.entries
    }
}
