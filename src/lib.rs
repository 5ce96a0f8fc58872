//! # AtlasRedis
//!
//! A typed client command layer for Redis-protocol servers:
//! - Typed operations for strings, keys, lists, sets and sorted sets
//! - Local validation before anything reaches the wire
//! - A staged SORT query builder
//! - Three error kinds: domain, provider and runtime
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         Client                               │
//! │              (typed operations, Sort builder)                │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │  keys, values
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                 Key / Binder / Range                         │
//! │            (validation, canonical byte forms)                │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │  CommandDescriptor
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      Connector                               │
//! │               (TcpConnector: RESP over TCP)                  │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │  RawResult
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                     Classifier                               │
//! │           (Domain / Provider / Runtime errors)               │
//! └─────────────────────────────────────────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod value;
pub mod key;
pub mod range;
pub mod types;
pub mod protocol;
pub mod classify;
pub mod network;
pub mod sort;
pub mod client;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{ClientError, ConnectorError, DomainError, ErrorKind, ProviderError, Result};
pub use config::Config;
pub use client::Client;
pub use key::{Key, KeyValueMapping};
pub use network::{Connector, SharedConnector, TcpConnector};
pub use protocol::{CommandDescriptor, CommandType, RawResult, ResponseShape};
pub use range::{RangeSpec, ScoreRange, ScoredEntry};
pub use sort::{Sort, SortOrder, SortResults, SortSpec};
pub use types::{ObjectInfo, RedisType, ServerInfo};
pub use value::{BincodeCodec, Binder, JsonCodec, Number, ObjectCodec, Value};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of AtlasRedis
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
