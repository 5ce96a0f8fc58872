//! TCP Connector
//!
//! Blocking RESP connection to a single server.

use std::io::{BufReader, BufWriter, ErrorKind};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::config::Config;
use crate::error::ConnectorError;
use crate::protocol::{lift, read_reply, write_command, CommandDescriptor, CommandType, RawResult};

use super::Connector;

/// RESP connector over a TCP stream
pub struct TcpConnector {
    /// TCP stream reader (buffered for efficiency)
    reader: BufReader<TcpStream>,

    /// TCP stream writer (buffered for efficiency)
    writer: BufWriter<TcpStream>,

    /// Peer address for logging
    peer_addr: String,

    /// Read timeout, reported in timeout errors
    read_timeout: Option<Duration>,

    max_reply_size: usize,

    /// Set after QUIT or a fatal stream error
    closed: bool,
}

impl TcpConnector {
    /// Connect to the server named in the config
    pub fn connect(config: &Config) -> Result<Self, ConnectorError> {
        let mut last_err = None;
        for addr in config.server_addr.to_socket_addrs()? {
            let attempt = match config.connect_timeout() {
                Some(timeout) => TcpStream::connect_timeout(&addr, timeout),
                None => TcpStream::connect(addr),
            };
            match attempt {
                Ok(stream) => {
                    tracing::debug!("Connected to {}", addr);
                    return Self::from_stream(stream, config);
                }
                Err(e) => {
                    tracing::debug!("Connect to {} failed: {}", addr, e);
                    last_err = Some(e);
                }
            }
        }

        Err(match last_err {
            Some(e) => ConnectorError::Io(e),
            None => ConnectorError::Config(format!("no address for {}", config.server_addr)),
        })
    }

    /// Wrap an already-connected stream
    ///
    /// Sets up buffered I/O and configures timeouts
    pub fn from_stream(stream: TcpStream, config: &Config) -> Result<Self, ConnectorError> {
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        stream.set_nodelay(config.tcp_nodelay)?;
        stream.set_read_timeout(config.read_timeout())?;
        stream.set_write_timeout(config.write_timeout())?;

        // Clone stream for separate read/write handles
        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(write_stream),
            peer_addr,
            read_timeout: config.read_timeout(),
            max_reply_size: config.max_reply_size,
            closed: false,
        })
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn round_trip(&mut self, descriptor: &CommandDescriptor) -> Result<RawResult, ConnectorError> {
        write_command(&mut self.writer, descriptor)?;
        let reply = read_reply(&mut self.reader, self.max_reply_size)?;
        tracing::trace!("Reply from {}: {:?}", self.peer_addr, reply);
        lift(reply, descriptor.shape())
    }

    /// Map stream errors onto connector errors, closing on anything fatal
    fn fail(&mut self, error: ConnectorError) -> ConnectorError {
        let error = match error {
            ConnectorError::Io(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
                // Windows uses TimedOut instead of WouldBlock
                ConnectorError::Timeout(self.read_timeout.unwrap_or_default())
            }
            ConnectorError::Io(e)
                if matches!(
                    e.kind(),
                    ErrorKind::UnexpectedEof
                        | ErrorKind::ConnectionReset
                        | ErrorKind::ConnectionAborted
                        | ErrorKind::BrokenPipe
                ) =>
            {
                tracing::debug!("Connection to {} lost: {}", self.peer_addr, e);
                ConnectorError::Closed
            }
            other => other,
        };

        // A timed-out or corrupt stream may hold a stray reply; never reuse it
        self.closed = true;
        tracing::warn!("Connector for {} closed: {}", self.peer_addr, error);
        error
    }
}

impl Connector for TcpConnector {
    fn execute(&mut self, descriptor: &CommandDescriptor) -> Result<RawResult, ConnectorError> {
        if self.closed {
            return Err(ConnectorError::Closed);
        }

        tracing::trace!("Sending to {}: {}", self.peer_addr, descriptor.name());

        let result = match self.round_trip(descriptor) {
            Ok(raw) => Ok(raw),
            Err(e) => Err(self.fail(e)),
        };

        if descriptor.command() == CommandType::Quit {
            tracing::debug!("Disconnected from {}", self.peer_addr);
            self.closed = true;
        }
        result
    }
}
