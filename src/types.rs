//! Introspection records and key types

use std::collections::BTreeMap;
use std::fmt;

/// Type of the value stored at a key, as reported by TYPE
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RedisType {
    /// Key does not exist
    None,
    String,
    List,
    Set,
    ZSet,
    Hash,
}

impl RedisType {
    /// Parse the TYPE status reply
    pub fn from_reply(name: &str) -> Option<Self> {
        let ty = match name {
            "none" => RedisType::None,
            "string" => RedisType::String,
            "list" => RedisType::List,
            "set" => RedisType::Set,
            "zset" => RedisType::ZSet,
            "hash" => RedisType::Hash,
            _ => return None,
        };
        Some(ty)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RedisType::None => "none",
            RedisType::String => "string",
            RedisType::List => "list",
            RedisType::Set => "set",
            RedisType::ZSet => "zset",
            RedisType::Hash => "hash",
        }
    }
}

impl fmt::Display for RedisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// DEBUG OBJECT output for one key
///
/// The server reply is a line of `field:value` tokens, e.g.
/// `Value at:0xb6838d20 refcount:1 encoding:raw serializedlength:5`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectInfo {
    raw: String,
    fields: BTreeMap<String, String>,
}

impl ObjectInfo {
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let fields = raw
            .split_whitespace()
            .filter_map(|token| token.split_once(':'))
            .map(|(field, value)| (field.to_string(), value.to_string()))
            .collect();
        Self { raw, fields }
    }

    /// The unparsed reply line
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn refcount(&self) -> Option<u64> {
        self.get("refcount")?.parse().ok()
    }

    pub fn encoding(&self) -> Option<&str> {
        self.get("encoding")
    }

    pub fn serialized_length(&self) -> Option<u64> {
        self.get("serializedlength")?.parse().ok()
    }
}

/// INFO output
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerInfo {
    fields: BTreeMap<String, String>,
}

impl ServerInfo {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn version(&self) -> Option<&str> {
        self.get("redis_version")
    }

    /// `master` or `slave`
    pub fn role(&self) -> Option<&str> {
        self.get("role")
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for ServerInfo {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
