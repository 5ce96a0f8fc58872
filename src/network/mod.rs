//! Network Module
//!
//! The Connector seam between the typed command layer and a transport.
//!
//! ## Architecture
//! - `Connector` executes one descriptor and returns a shape-tagged result
//! - `TcpConnector` speaks RESP over a blocking TCP stream
//! - `SharedConnector` lets several clients share one transport

mod connector;
mod connection;

pub use connector::{Connector, SharedConnector};
pub use connection::TcpConnector;
