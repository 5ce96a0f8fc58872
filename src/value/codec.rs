//! Object codecs and framing
//!
//! The codec turns a serde value into a body; the frame makes the stored
//! bytes self-describing so a plain string is never mistaken for an object.

use bytes::{BufMut, Bytes, BytesMut};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::ObjectPayload;
use crate::error::ProviderError;

/// Frame magic. A leading NUL keeps it out of ordinary text values.
pub const OBJECT_MAGIC: [u8; 4] = *b"\0AKO";

/// Magic (4) + tag (1) + crc (4) + body length (4)
const FRAME_HEADER_SIZE: usize = 13;

/// Result type returned by codec implementations
pub type CodecResult<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Pluggable serializer for structured objects
pub trait ObjectCodec {
    /// Tag written into every frame this codec produces
    fn tag(&self) -> u8;

    /// Human-readable codec name for diagnostics
    fn name(&self) -> &'static str;

    fn encode<T: Serialize + ?Sized>(&self, object: &T) -> CodecResult<Vec<u8>>;

    fn decode<T: DeserializeOwned>(&self, body: &[u8]) -> CodecResult<T>;
}

/// Compact binary codec (default)
#[derive(Debug, Clone, Copy, Default)]
pub struct BincodeCodec;

impl ObjectCodec for BincodeCodec {
    fn tag(&self) -> u8 {
        0x01
    }

    fn name(&self) -> &'static str {
        "bincode"
    }

    fn encode<T: Serialize + ?Sized>(&self, object: &T) -> CodecResult<Vec<u8>> {
        Ok(bincode::serialize(object)?)
    }

    fn decode<T: DeserializeOwned>(&self, body: &[u8]) -> CodecResult<T> {
        Ok(bincode::deserialize(body)?)
    }
}

/// JSON codec, readable by non-Rust consumers of the same keys
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl ObjectCodec for JsonCodec {
    fn tag(&self) -> u8 {
        0x02
    }

    fn name(&self) -> &'static str {
        "json"
    }

    fn encode<T: Serialize + ?Sized>(&self, object: &T) -> CodecResult<Vec<u8>> {
        Ok(serde_json::to_vec(object)?)
    }

    fn decode<T: DeserializeOwned>(&self, body: &[u8]) -> CodecResult<T> {
        Ok(serde_json::from_slice(body)?)
    }
}

// =============================================================================
// Framing
// =============================================================================

/// Wrap a payload in the object frame
pub(crate) fn frame(payload: &ObjectPayload) -> Result<Bytes, ProviderError> {
    let body = payload.body();
    let len = frame_len(body.len())?;
    let mut buf = BytesMut::with_capacity(FRAME_HEADER_SIZE + body.len());
    buf.put_slice(&OBJECT_MAGIC);
    buf.put_u8(payload.tag());
    buf.put_u32(crc32fast::hash(body));
    buf.put_u32(len);
    buf.put_slice(body);
    Ok(buf.freeze())
}

/// Body length as stored in the frame header
fn frame_len(len: usize) -> Result<u32, ProviderError> {
    u32::try_from(len).map_err(|_| {
        ProviderError::Serialization(format!("object body of {} bytes exceeds frame limit", len))
    })
}

/// Split a frame into (tag, body), or None if the bytes are not a valid frame
pub(crate) fn unframe(bytes: &[u8]) -> Option<(u8, &[u8])> {
    if bytes.len() < FRAME_HEADER_SIZE || bytes[..4] != OBJECT_MAGIC {
        return None;
    }

    let tag = bytes[4];
    let crc = u32::from_be_bytes([bytes[5], bytes[6], bytes[7], bytes[8]]);
    let len = u32::from_be_bytes([bytes[9], bytes[10], bytes[11], bytes[12]]) as usize;
    let body = &bytes[FRAME_HEADER_SIZE..];

    if body.len() != len || crc32fast::hash(body) != crc {
        return None;
    }
    Some((tag, body))
}

/// Whether the bytes hold a complete, intact object frame
pub fn is_object_frame(bytes: &[u8]) -> bool {
    unframe(bytes).is_some()
}
