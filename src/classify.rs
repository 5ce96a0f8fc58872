//! Error Classifier
//!
//! Every connector outcome passes through [`classify`] before a typed value
//! is built from it:
//! - connector failure      -> Runtime, unchanged
//! - server error reply     -> Domain
//! - reply of another shape -> Provider
//! - reply of no shape      -> Provider
//!
//! The extractors below then read the typed value out of a classified
//! result. Content the declared shape allows but the command cannot mean
//! (a negative count, an unparsable score) is a Provider failure too.

use bytes::Bytes;

use crate::error::{ConnectorError, DomainError, ProviderError, Result};
use crate::protocol::{CommandDescriptor, RawResult, ResponseShape};
use crate::range::ScoredEntry;

/// Classify a connector outcome against the descriptor that produced it
pub fn classify(
    descriptor: &CommandDescriptor,
    outcome: std::result::Result<RawResult, ConnectorError>,
) -> Result<RawResult> {
    let raw = outcome?;
    let expected = descriptor.shape();

    match raw {
        RawResult::Error(message) => {
            tracing::debug!("{} rejected by server: {}", descriptor.name(), message);
            Err(DomainError::Remote(message).into())
        }
        RawResult::Malformed(detail) => {
            tracing::warn!("{} reply malformed: {}", descriptor.name(), detail);
            Err(malformed(descriptor.name(), detail))
        }
        raw if raw.shape() == Some(expected) => Ok(raw),
        raw => {
            let actual = raw.shape().unwrap_or(ResponseShape::None);
            tracing::warn!(
                "{} reply shape mismatch: expected {}, got {}",
                descriptor.name(),
                expected,
                actual
            );
            Err(ProviderError::ShapeMismatch {
                command: descriptor.name(),
                expected,
                actual,
            }
            .into())
        }
    }
}

// =============================================================================
// Typed Extraction
// =============================================================================

fn malformed(command: &'static str, detail: impl Into<String>) -> crate::error::ClientError {
    ProviderError::MalformedReply {
        command,
        detail: detail.into(),
    }
    .into()
}

fn unexpected(command: &'static str, raw: &RawResult) -> crate::error::ClientError {
    let found = raw
        .shape()
        .map(|shape| shape.to_string())
        .unwrap_or_else(|| "unshaped".to_string());
    malformed(command, format!("unexpected {} result", found))
}

pub(crate) fn unit(command: &'static str, raw: RawResult) -> Result<()> {
    match raw {
        RawResult::None | RawResult::Status(_) => Ok(()),
        other => Err(unexpected(command, &other)),
    }
}

pub(crate) fn status(command: &'static str, raw: RawResult) -> Result<String> {
    match raw {
        RawResult::Status(status) => Ok(status),
        other => Err(unexpected(command, &other)),
    }
}

pub(crate) fn boolean(command: &'static str, raw: RawResult) -> Result<bool> {
    match raw {
        RawResult::Boolean(flag) => Ok(flag),
        other => Err(unexpected(command, &other)),
    }
}

pub(crate) fn integer(command: &'static str, raw: RawResult) -> Result<i64> {
    match raw {
        RawResult::Integer(n) => Ok(n),
        other => Err(unexpected(command, &other)),
    }
}

/// A count or length; negative values are malformed
pub(crate) fn count(command: &'static str, raw: RawResult) -> Result<u64> {
    let n = integer(command, raw)?;
    u64::try_from(n).map_err(|_| malformed(command, format!("negative count {}", n)))
}

pub(crate) fn bulk(command: &'static str, raw: RawResult) -> Result<Option<Bytes>> {
    match raw {
        RawResult::Bulk(data) => Ok(data),
        other => Err(unexpected(command, &other)),
    }
}

/// Multi-bulk elements, nil elements kept; a nil reply is empty
pub(crate) fn elements(command: &'static str, raw: RawResult) -> Result<Vec<Option<Bytes>>> {
    match raw {
        RawResult::MultiBulk(items) => Ok(items.unwrap_or_default()),
        other => Err(unexpected(command, &other)),
    }
}

/// Multi-bulk members; collections never hold nil, so one is malformed
pub(crate) fn members(command: &'static str, raw: RawResult) -> Result<Vec<Bytes>> {
    elements(command, raw)?
        .into_iter()
        .map(|item| item.ok_or_else(|| malformed(command, "nil element in collection reply")))
        .collect()
}

pub(crate) fn scored(command: &'static str, raw: RawResult) -> Result<Vec<ScoredEntry>> {
    match raw {
        RawResult::ScoredMultiBulk(entries) => Ok(entries),
        other => Err(unexpected(command, &other)),
    }
}

pub(crate) fn mapping(command: &'static str, raw: RawResult) -> Result<Vec<(String, String)>> {
    match raw {
        RawResult::Mapping(fields) => Ok(fields),
        other => Err(unexpected(command, &other)),
    }
}

pub(crate) fn text(command: &'static str, data: Bytes) -> Result<String> {
    String::from_utf8(data.to_vec()).map_err(|_| malformed(command, "reply is not valid UTF-8"))
}

pub(crate) fn float(command: &'static str, data: &[u8]) -> Result<f64> {
    std::str::from_utf8(data)
        .ok()
        .and_then(|s| s.parse::<f64>().ok())
        .ok_or_else(|| {
            malformed(
                command,
                format!("not a number: {:?}", String::from_utf8_lossy(data)),
            )
        })
}
