//! Error types for atlasredis
//!
//! Every operation outcome lands in exactly one of three disjoint kinds:
//! - **Domain**: caller-correctable (remote error replies, local validation)
//! - **Provider**: the client or its protocol mapping is defective
//! - **Runtime**: connector failures (I/O, timeout, framing), passed through unchanged

use std::time::Duration;

use thiserror::Error;

use crate::protocol::ResponseShape;

/// Result type alias using ClientError
pub type Result<T> = std::result::Result<T, ClientError>;

/// The three disjoint error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Domain,
    Provider,
    Runtime,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::Domain => "domain",
            ErrorKind::Provider => "provider",
            ErrorKind::Runtime => "runtime",
        };
        f.write_str(name)
    }
}

/// Unified error type for client operations
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Runtime(#[from] ConnectorError),
}

impl ClientError {
    /// Which of the three kinds this error belongs to
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Domain(_) => ErrorKind::Domain,
            ClientError::Provider(_) => ErrorKind::Provider,
            ClientError::Runtime(_) => ErrorKind::Runtime,
        }
    }

    /// The server-supplied message, if this is a remote error reply
    pub fn remote_message(&self) -> Option<&str> {
        match self {
            ClientError::Domain(DomainError::Remote(message)) => Some(message),
            _ => None,
        }
    }
}

/// Caller-correctable failures
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    // -------------------------------------------------------------------------
    // Remote Errors
    // -------------------------------------------------------------------------
    #[error("redis error: {0}")]
    Remote(String),

    // -------------------------------------------------------------------------
    // Local Validation Errors
    // -------------------------------------------------------------------------
    #[error("key must not be empty")]
    EmptyKey,

    #[error("{0} requires at least one key")]
    NoKeys(&'static str),

    #[error("duplicate key in mapping: {0}")]
    DuplicateKey(String),

    #[error("key-value mapping is empty")]
    EmptyMapping,

    #[error("number is not representable on the wire: {0}")]
    InvalidNumber(f64),

    #[error("score bound must be finite, got {0}")]
    InvalidScore(f64),

    #[error("{0} must not be empty")]
    EmptyArgument(&'static str),

    #[error("sort clause {clause} already set to a different value")]
    ConflictingClause { clause: &'static str },
}

/// Defects in the client or its protocol mapping
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error("{command}: expected {expected} reply, got {actual}")]
    ShapeMismatch {
        command: &'static str,
        expected: ResponseShape,
        actual: ResponseShape,
    },

    #[error("{command}: malformed reply: {detail}")]
    MalformedReply { command: &'static str, detail: String },

    #[error("sort query on {key} was already executed")]
    SortReused { key: String },
}

/// Failures surfaced by a Connector
#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Connection closed")]
    Closed,

    #[error("Configuration error: {0}")]
    Config(String),
}
