//! Value Binder
//!
//! Converts every value variant into the canonical byte form.

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::codec::{self, BincodeCodec, ObjectCodec};
use super::{ObjectPayload, Value};
use crate::error::{ProviderError, Result};

/// Binds values to bytes, holding the object codec configured for a client
#[derive(Debug, Clone, Default)]
pub struct Binder<S = BincodeCodec> {
    codec: S,
}

impl<S: ObjectCodec> Binder<S> {
    pub fn new(codec: S) -> Self {
        Self { codec }
    }

    pub fn codec(&self) -> &S {
        &self.codec
    }

    /// Bind a value to its canonical bytes
    ///
    /// Fails for numbers with no wire form (NaN) and objects too large to frame.
    pub fn bind(&self, value: Value) -> Result<Bytes> {
        let bytes = match value {
            Value::Bytes(bytes) => bytes,
            Value::Text(text) => Bytes::from(text.into_bytes()),
            Value::Number(number) => Bytes::from(number.to_canonical()?.into_bytes()),
            Value::Object(payload) => codec::frame(&payload)?,
        };
        Ok(bytes)
    }

    /// Encode an object with the configured codec
    pub fn object<T: Serialize + ?Sized>(&self, object: &T) -> Result<Value> {
        let body = self
            .codec
            .encode(object)
            .map_err(|e| ProviderError::Serialization(format!("{}: {}", self.codec.name(), e)))?;
        Ok(Value::Object(ObjectPayload::new(self.codec.tag(), body)))
    }

    /// Decode bytes previously bound from an object
    ///
    /// Bytes that are not an intact frame, or that were framed by a different
    /// codec, are rejected rather than decoded.
    pub fn decode_object<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        let (tag, body) = codec::unframe(bytes).ok_or_else(|| {
            ProviderError::Serialization("value is not a framed object".to_string())
        })?;

        if tag != self.codec.tag() {
            return Err(ProviderError::Serialization(format!(
                "object was framed by codec tag 0x{:02x}, {} expects 0x{:02x}",
                tag,
                self.codec.name(),
                self.codec.tag()
            ))
            .into());
        }

        self.codec
            .decode(body)
            .map_err(|e| ProviderError::Serialization(format!("{}: {}", self.codec.name(), e)).into())
    }
}
