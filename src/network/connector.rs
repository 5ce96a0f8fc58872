//! Connector trait
//!
//! A Connector owns the transport: it sends a descriptor, reads the reply
//! and tags it with a response shape. Retries, reconnection and timeouts are
//! its own business; the command layer never retries.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::ConnectorError;
use crate::protocol::{CommandDescriptor, RawResult};

/// Executes command descriptors against a server
pub trait Connector {
    fn execute(&mut self, descriptor: &CommandDescriptor) -> Result<RawResult, ConnectorError>;
}

impl<C: Connector + ?Sized> Connector for &mut C {
    fn execute(&mut self, descriptor: &CommandDescriptor) -> Result<RawResult, ConnectorError> {
        (**self).execute(descriptor)
    }
}

impl<C: Connector + ?Sized> Connector for Box<C> {
    fn execute(&mut self, descriptor: &CommandDescriptor) -> Result<RawResult, ConnectorError> {
        (**self).execute(descriptor)
    }
}

/// A connector shared between clients
///
/// Each descriptor runs under the lock, so replies never interleave.
pub struct SharedConnector<C> {
    inner: Arc<Mutex<C>>,
}

impl<C> SharedConnector<C> {
    pub fn new(connector: C) -> Self {
        Self {
            inner: Arc::new(Mutex::new(connector)),
        }
    }

    /// Run a closure with exclusive access to the wrapped connector
    pub fn with<R>(&self, f: impl FnOnce(&mut C) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

impl<C> Clone for SharedConnector<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: Connector> Connector for SharedConnector<C> {
    fn execute(&mut self, descriptor: &CommandDescriptor) -> Result<RawResult, ConnectorError> {
        self.inner.lock().execute(descriptor)
    }
}
