//! Value Module
//!
//! Caller-facing value variants and their binding to the canonical byte form.
//!
//! ## Variants
//! - `Bytes`  - raw bytes, sent as-is
//! - `Text`   - UTF-8 encoded
//! - `Number` - canonical decimal text, so INCR/DECR interoperate with SET
//! - `Object` - codec-encoded and wrapped in a self-describing frame
//!
//! ## Object Frame
//! ```text
//! ┌──────────┬─────────┬──────────┬──────────┬─────────────────┐
//! │Magic (4) │ Tag (1) │ CRC (4)  │ Len (4)  │      Body       │
//! └──────────┴─────────┴──────────┴──────────┴─────────────────┘
//! ```

mod binder;
mod codec;

pub use binder::Binder;
pub use codec::{is_object_frame, BincodeCodec, CodecResult, JsonCodec, ObjectCodec, OBJECT_MAGIC};

use std::fmt;

use bytes::Bytes;

use crate::error::DomainError;

/// A value in one of the four caller-facing variants
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bytes(Bytes),
    Text(String),
    Number(Number),
    Object(ObjectPayload),
}

/// A numeric value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    UInt(u64),
    Float(f64),
}

impl Number {
    /// Canonical decimal text for the wire
    ///
    /// Floats use the shortest round-trip decimal representation and never
    /// exponent notation; infinities are `inf` / `-inf`. NaN has no wire form.
    pub fn to_canonical(&self) -> std::result::Result<String, DomainError> {
        match *self {
            Number::Int(n) => Ok(n.to_string()),
            Number::UInt(n) => Ok(n.to_string()),
            Number::Float(f) if f.is_nan() => Err(DomainError::InvalidNumber(f)),
            Number::Float(f) if f.is_infinite() => {
                Ok(if f > 0.0 { "inf" } else { "-inf" }.to_string())
            }
            Number::Float(f) => Ok(f.to_string()),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_canonical() {
            Ok(text) => f.write_str(&text),
            Err(_) => f.write_str("NaN"),
        }
    }
}

/// Codec output for an object value, before framing
///
/// Only a [`Binder`] creates these, so the tag always names the codec that
/// produced the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectPayload {
    tag: u8,
    body: Vec<u8>,
}

impl ObjectPayload {
    pub(crate) fn new(tag: u8, body: Vec<u8>) -> Self {
        Self { tag, body }
    }

    /// Tag of the codec that encoded this payload
    pub fn tag(&self) -> u8 {
        self.tag
    }

    /// Encoded body, without the frame
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<Bytes> for Value {
    fn from(bytes: Bytes) -> Self {
        Value::Bytes(bytes)
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Value::Bytes(Bytes::from(bytes))
    }
}

impl From<&[u8]> for Value {
    fn from(bytes: &[u8]) -> Self {
        Value::Bytes(Bytes::copy_from_slice(bytes))
    }
}

impl<const N: usize> From<&[u8; N]> for Value {
    fn from(bytes: &[u8; N]) -> Self {
        Value::Bytes(Bytes::copy_from_slice(bytes))
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl From<&String> for Value {
    fn from(text: &String) -> Self {
        Value::Text(text.clone())
    }
}

impl From<Number> for Value {
    fn from(number: Number) -> Self {
        Value::Number(number)
    }
}

impl From<ObjectPayload> for Value {
    fn from(payload: ObjectPayload) -> Self {
        Value::Object(payload)
    }
}

macro_rules! number_from {
    ($variant:ident as $target:ty: $($source:ty),*) => {
        $(
            impl From<$source> for Number {
                fn from(n: $source) -> Self {
                    Number::$variant(n as $target)
                }
            }

            impl From<$source> for Value {
                fn from(n: $source) -> Self {
                    Value::Number(Number::from(n))
                }
            }
        )*
    };
}

number_from!(Int as i64: i8, i16, i32, i64, isize);
number_from!(UInt as u64: u8, u16, u32, u64, usize);
number_from!(Float as f64: f32, f64);
