//! Response definitions
//!
//! `Reply` is a RESP frame as it arrives on the wire. `RawResult` is what a
//! Connector hands back: a reply tagged by response shape.

use bytes::Bytes;

use super::ResponseShape;
use crate::range::ScoredEntry;

/// A decoded RESP reply
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// `+OK`
    Status(String),

    /// `-ERR message`
    Error(String),

    /// `:42`
    Integer(i64),

    /// `$5\r\nhello` or `$-1` (nil)
    Bulk(Option<Bytes>),

    /// `*2\r\n...` or `*-1` (nil)
    Multi(Option<Vec<Reply>>),
}

/// A raw connector result, tagged by response shape
#[derive(Debug, Clone, PartialEq)]
pub enum RawResult {
    None,
    Boolean(bool),
    Integer(i64),
    Bulk(Option<Bytes>),
    MultiBulk(Option<Vec<Option<Bytes>>>),
    ScoredMultiBulk(Vec<ScoredEntry>),
    Status(String),
    Mapping(Vec<(String, String)>),

    /// Error reported by the server
    Error(String),

    /// A well-framed reply no shape can hold (e.g. nested multi-bulk)
    Malformed(String),
}

impl RawResult {
    /// Shape of this result; `None` for a remote error or malformed reply
    pub fn shape(&self) -> Option<ResponseShape> {
        let shape = match self {
            RawResult::None => ResponseShape::None,
            RawResult::Boolean(_) => ResponseShape::Boolean,
            RawResult::Integer(_) => ResponseShape::Integer,
            RawResult::Bulk(_) => ResponseShape::Bulk,
            RawResult::MultiBulk(_) => ResponseShape::MultiBulk,
            RawResult::ScoredMultiBulk(_) => ResponseShape::ScoredMultiBulk,
            RawResult::Status(_) => ResponseShape::Status,
            RawResult::Mapping(_) => ResponseShape::Mapping,
            RawResult::Error(_) | RawResult::Malformed(_) => return None,
        };
        Some(shape)
    }
}
