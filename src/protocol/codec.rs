//! Protocol codec
//!
//! Encoding and decoding functions for the RESP wire protocol, and the
//! lifting of wire replies into shape-tagged results.

use std::io::{BufRead, Read, Write};

use bytes::Bytes;

use super::{CommandDescriptor, RawResult, Reply, ResponseShape};
use crate::error::ConnectorError;
use crate::range::ScoredEntry;

type Result<T> = std::result::Result<T, ConnectorError>;

/// Default bulk payload limit (512 MB)
pub const DEFAULT_MAX_BULK_SIZE: usize = 512 * 1024 * 1024;

/// Deepest multi-bulk nesting accepted
const MAX_DEPTH: usize = 32;

/// Longest header line accepted (type byte + digits or status text)
const MAX_LINE_SIZE: usize = 64 * 1024;

const CRLF: &[u8] = b"\r\n";

// =============================================================================
// Command Encoding
// =============================================================================

/// Encode a command to bytes
///
/// Format: array header, then the command token and each argument as bulk strings
pub fn encode_command(descriptor: &CommandDescriptor) -> Vec<u8> {
    let name = descriptor.name().as_bytes();
    let args = descriptor.args();

    let payload_len: usize = args.iter().map(|a| a.len() + 16).sum();
    let mut message = Vec::with_capacity(16 + name.len() + payload_len);

    message.push(b'*');
    message.extend_from_slice((args.len() + 1).to_string().as_bytes());
    message.extend_from_slice(CRLF);

    write_bulk(&mut message, name);
    for arg in args {
        write_bulk(&mut message, arg);
    }

    message
}

fn write_bulk(buf: &mut Vec<u8>, data: &[u8]) {
    buf.push(b'$');
    buf.extend_from_slice(data.len().to_string().as_bytes());
    buf.extend_from_slice(CRLF);
    buf.extend_from_slice(data);
    buf.extend_from_slice(CRLF);
}

// =============================================================================
// Reply Encoding/Decoding
// =============================================================================

/// Encode a reply to bytes
pub fn encode_reply(reply: &Reply) -> Vec<u8> {
    let mut message = Vec::new();
    encode_reply_into(&mut message, reply);
    message
}

fn encode_reply_into(buf: &mut Vec<u8>, reply: &Reply) {
    match reply {
        Reply::Status(status) => {
            buf.push(b'+');
            buf.extend_from_slice(status.as_bytes());
            buf.extend_from_slice(CRLF);
        }
        Reply::Error(message) => {
            buf.push(b'-');
            buf.extend_from_slice(message.as_bytes());
            buf.extend_from_slice(CRLF);
        }
        Reply::Integer(n) => {
            buf.push(b':');
            buf.extend_from_slice(n.to_string().as_bytes());
            buf.extend_from_slice(CRLF);
        }
        Reply::Bulk(None) => buf.extend_from_slice(b"$-1\r\n"),
        Reply::Bulk(Some(data)) => write_bulk(buf, data),
        Reply::Multi(None) => buf.extend_from_slice(b"*-1\r\n"),
        Reply::Multi(Some(items)) => {
            buf.push(b'*');
            buf.extend_from_slice(items.len().to_string().as_bytes());
            buf.extend_from_slice(CRLF);
            for item in items {
                encode_reply_into(buf, item);
            }
        }
    }
}

/// Decode a reply from bytes
///
/// Returns the reply and the number of bytes consumed, or `None` if the
/// buffer does not yet hold a complete reply.
pub fn decode_reply(bytes: &[u8]) -> Result<Option<(Reply, usize)>> {
    decode_at(bytes, 0, DEFAULT_MAX_BULK_SIZE, 0)
}

fn decode_at(bytes: &[u8], pos: usize, max_bulk: usize, depth: usize) -> Result<Option<(Reply, usize)>> {
    let (line, mut pos) = match find_line(bytes, pos)? {
        Some(found) => found,
        None => return Ok(None),
    };

    let (kind, body) = split_header(line)?;
    let reply = match kind {
        b'+' => Reply::Status(line_text(body)?),
        b'-' => Reply::Error(line_text(body)?),
        b':' => Reply::Integer(parse_int(body)?),
        b'$' => match bulk_len(body, max_bulk)? {
            None => Reply::Bulk(None),
            Some(len) => {
                if bytes.len() < pos + len + 2 {
                    return Ok(None);
                }
                if &bytes[pos + len..pos + len + 2] != CRLF {
                    return Err(ConnectorError::Protocol(
                        "Bulk payload not terminated by CRLF".to_string(),
                    ));
                }
                let data = Bytes::copy_from_slice(&bytes[pos..pos + len]);
                pos += len + 2;
                Reply::Bulk(Some(data))
            }
        },
        b'*' => match multi_len(body, depth)? {
            None => Reply::Multi(None),
            Some(count) => {
                let mut items = Vec::with_capacity(count.min(1024));
                for _ in 0..count {
                    match decode_at(bytes, pos, max_bulk, depth + 1)? {
                        Some((item, next)) => {
                            items.push(item);
                            pos = next;
                        }
                        None => return Ok(None),
                    }
                }
                Reply::Multi(Some(items))
            }
        },
        other => return Err(unknown_type(other)),
    };

    Ok(Some((reply, pos)))
}

/// Locate the CRLF-terminated line starting at `pos`
fn find_line(bytes: &[u8], pos: usize) -> Result<Option<(&[u8], usize)>> {
    let rest = &bytes[pos..];
    match rest.windows(2).position(|w| w == CRLF) {
        Some(end) => Ok(Some((&rest[..end], pos + end + 2))),
        None if rest.len() > MAX_LINE_SIZE => Err(ConnectorError::Protocol(format!(
            "Reply line exceeds {} bytes",
            MAX_LINE_SIZE
        ))),
        None => Ok(None),
    }
}

fn split_header(line: &[u8]) -> Result<(u8, &[u8])> {
    match line.split_first() {
        Some((kind, body)) => Ok((*kind, body)),
        None => Err(ConnectorError::Protocol("Empty reply line".to_string())),
    }
}

fn unknown_type(byte: u8) -> ConnectorError {
    ConnectorError::Protocol(format!("Unknown reply type: 0x{:02x}", byte))
}

fn line_text(body: &[u8]) -> Result<String> {
    String::from_utf8(body.to_vec())
        .map_err(|_| ConnectorError::Protocol("Reply line is not valid UTF-8".to_string()))
}

fn parse_int(body: &[u8]) -> Result<i64> {
    std::str::from_utf8(body)
        .ok()
        .and_then(|s| s.parse::<i64>().ok())
        .ok_or_else(|| {
            ConnectorError::Protocol(format!(
                "Invalid integer in reply: {:?}",
                String::from_utf8_lossy(body)
            ))
        })
}

/// Bulk length; `None` for nil
fn bulk_len(body: &[u8], max_bulk: usize) -> Result<Option<usize>> {
    match parse_int(body)? {
        -1 => Ok(None),
        n if n < 0 => Err(ConnectorError::Protocol(format!("Invalid bulk length: {}", n))),
        n if n as u64 > max_bulk as u64 => Err(ConnectorError::Protocol(format!(
            "Bulk payload too large: {} bytes (max {})",
            n, max_bulk
        ))),
        n => Ok(Some(n as usize)),
    }
}

/// Element count; `None` for nil
fn multi_len(body: &[u8], depth: usize) -> Result<Option<usize>> {
    if depth >= MAX_DEPTH {
        return Err(ConnectorError::Protocol(format!(
            "Multi-bulk nesting exceeds {} levels",
            MAX_DEPTH
        )));
    }
    match parse_int(body)? {
        -1 => Ok(None),
        n if n < 0 => Err(ConnectorError::Protocol(format!("Invalid multi-bulk length: {}", n))),
        n => Ok(Some(n as usize)),
    }
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Write a command to a stream
pub fn write_command<W: Write>(writer: &mut W, descriptor: &CommandDescriptor) -> Result<()> {
    let bytes = encode_command(descriptor);
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

/// Read a complete reply from a stream
///
/// Blocks until a complete reply is received or an error occurs
pub fn read_reply<R: BufRead>(reader: &mut R, max_bulk: usize) -> Result<Reply> {
    read_reply_at(reader, max_bulk, 0)
}

fn read_reply_at<R: BufRead>(reader: &mut R, max_bulk: usize, depth: usize) -> Result<Reply> {
    let line = read_line(reader)?;
    let (kind, body) = split_header(&line)?;

    let reply = match kind {
        b'+' => Reply::Status(line_text(body)?),
        b'-' => Reply::Error(line_text(body)?),
        b':' => Reply::Integer(parse_int(body)?),
        b'$' => match bulk_len(body, max_bulk)? {
            None => Reply::Bulk(None),
            Some(len) => {
                let mut data = vec![0u8; len + 2];
                reader.read_exact(&mut data)?;
                if &data[len..] != CRLF {
                    return Err(ConnectorError::Protocol(
                        "Bulk payload not terminated by CRLF".to_string(),
                    ));
                }
                data.truncate(len);
                Reply::Bulk(Some(Bytes::from(data)))
            }
        },
        b'*' => match multi_len(body, depth)? {
            None => Reply::Multi(None),
            Some(count) => {
                let mut items = Vec::with_capacity(count.min(1024));
                for _ in 0..count {
                    items.push(read_reply_at(reader, max_bulk, depth + 1)?);
                }
                Reply::Multi(Some(items))
            }
        },
        other => return Err(unknown_type(other)),
    };

    Ok(reply)
}

/// Read one CRLF-terminated line, without the terminator
fn read_line<R: BufRead>(reader: &mut R) -> Result<Vec<u8>> {
    let mut line = Vec::new();
    let read = reader
        .by_ref()
        .take(MAX_LINE_SIZE as u64 + 2)
        .read_until(b'\n', &mut line)?;

    if read == 0 {
        return Err(std::io::Error::from(std::io::ErrorKind::UnexpectedEof).into());
    }
    if !line.ends_with(CRLF) {
        return Err(ConnectorError::Protocol(
            "Reply line not terminated by CRLF".to_string(),
        ));
    }
    line.truncate(line.len() - 2);
    Ok(line)
}

// =============================================================================
// Shape Lifting
// =============================================================================

/// Convert a wire reply into the declared response shape
///
/// When the reply cannot take the declared shape it is returned in its
/// natural shape, leaving the mismatch for the classifier to report.
pub fn lift(reply: Reply, shape: ResponseShape) -> Result<RawResult> {
    match (shape, reply) {
        (_, Reply::Error(message)) => Ok(RawResult::Error(message)),
        (ResponseShape::None, _) => Ok(RawResult::None),
        (ResponseShape::Boolean, Reply::Integer(n)) => Ok(RawResult::Boolean(n != 0)),
        (ResponseShape::ScoredMultiBulk, Reply::Multi(Some(items))) => match scored(&items) {
            Some(entries) => Ok(RawResult::ScoredMultiBulk(entries)),
            None => natural(Reply::Multi(Some(items))),
        },
        (ResponseShape::Mapping, Reply::Bulk(Some(text))) => match info_fields(&text) {
            Some(fields) => Ok(RawResult::Mapping(fields)),
            None => natural(Reply::Bulk(Some(text))),
        },
        (_, reply) => natural(reply),
    }
}

fn natural(reply: Reply) -> Result<RawResult> {
    let raw = match reply {
        Reply::Status(status) => RawResult::Status(status),
        Reply::Error(message) => RawResult::Error(message),
        Reply::Integer(n) => RawResult::Integer(n),
        Reply::Bulk(data) => RawResult::Bulk(data),
        Reply::Multi(None) => RawResult::MultiBulk(None),
        Reply::Multi(Some(items)) => multi_bulk(items),
    };
    Ok(raw)
}

/// Flatten multi-bulk elements; nested or error elements have no shape here
fn multi_bulk(items: Vec<Reply>) -> RawResult {
    let mut elements = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Reply::Bulk(data) => elements.push(data),
            Reply::Integer(n) => elements.push(Some(Bytes::from(n.to_string()))),
            Reply::Status(status) => elements.push(Some(Bytes::from(status))),
            Reply::Error(message) => {
                return RawResult::Malformed(format!(
                    "error element inside multi-bulk reply: {}",
                    message
                ))
            }
            Reply::Multi(_) => {
                return RawResult::Malformed("nested multi-bulk reply".to_string())
            }
        }
    }
    RawResult::MultiBulk(Some(elements))
}

/// Pair up member/score elements of a WITHSCORES reply
fn scored(items: &[Reply]) -> Option<Vec<ScoredEntry>> {
    if items.len() % 2 != 0 {
        return None;
    }
    items
        .chunks(2)
        .map(|pair| match pair {
            [Reply::Bulk(Some(member)), Reply::Bulk(Some(score))] => {
                let score = std::str::from_utf8(score).ok()?.parse::<f64>().ok()?;
                Some(ScoredEntry::new(member.clone(), score))
            }
            _ => None,
        })
        .collect()
}

/// Parse INFO text into `field:value` pairs, skipping blanks and `#` sections
fn info_fields(text: &[u8]) -> Option<Vec<(String, String)>> {
    let text = std::str::from_utf8(text).ok()?;
    let fields = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once(':'))
        .map(|(field, value)| (field.to_string(), value.to_string()))
        .collect();
    Some(fields)
}
