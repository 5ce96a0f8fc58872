//! Command descriptors
//!
//! A descriptor is one fully-resolved command invocation: token, canonical
//! arguments and the reply shape the command is expected to produce.

use std::fmt;

use bytes::Bytes;

use super::CommandType;
use crate::key::Key;

/// Expected reply shape of a command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseShape {
    /// Reply is read and discarded
    None,
    Boolean,
    Integer,
    Bulk,
    MultiBulk,
    ScoredMultiBulk,
    Status,
    Mapping,
}

impl fmt::Display for ResponseShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResponseShape::None => "none",
            ResponseShape::Boolean => "boolean",
            ResponseShape::Integer => "integer",
            ResponseShape::Bulk => "bulk",
            ResponseShape::MultiBulk => "multi-bulk",
            ResponseShape::ScoredMultiBulk => "scored multi-bulk",
            ResponseShape::Status => "status",
            ResponseShape::Mapping => "mapping",
        };
        f.write_str(name)
    }
}

/// An immutable, ready-to-send command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDescriptor {
    command: CommandType,
    args: Vec<Bytes>,
    shape: ResponseShape,
}

impl CommandDescriptor {
    /// Start building a descriptor
    pub fn builder(command: CommandType, shape: ResponseShape) -> DescriptorBuilder {
        DescriptorBuilder {
            command,
            args: Vec::new(),
            shape,
        }
    }

    pub fn command(&self) -> CommandType {
        self.command
    }

    /// Wire token of the command
    pub fn name(&self) -> &'static str {
        self.command.as_str()
    }

    /// Arguments after the command token, in order
    pub fn args(&self) -> &[Bytes] {
        &self.args
    }

    pub fn shape(&self) -> ResponseShape {
        self.shape
    }
}

impl fmt::Display for CommandDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())?;
        for arg in &self.args {
            write!(f, " {}", String::from_utf8_lossy(arg))?;
        }
        Ok(())
    }
}

/// Builder for CommandDescriptor
pub struct DescriptorBuilder {
    command: CommandType,
    args: Vec<Bytes>,
    shape: ResponseShape,
}

impl DescriptorBuilder {
    /// Append a key argument
    pub fn key(mut self, key: &Key) -> Self {
        self.args.push(Bytes::copy_from_slice(key.as_bytes()));
        self
    }

    /// Append several key arguments
    pub fn keys<'a>(mut self, keys: impl IntoIterator<Item = &'a Key>) -> Self {
        self.args
            .extend(keys.into_iter().map(|k| Bytes::copy_from_slice(k.as_bytes())));
        self
    }

    /// Append an argument already in canonical byte form
    pub fn arg(mut self, arg: impl Into<Bytes>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append a protocol keyword (e.g. `WITHSCORES`)
    pub fn token(mut self, token: &'static str) -> Self {
        self.args.push(Bytes::from_static(token.as_bytes()));
        self
    }

    /// Append an integer argument in decimal text
    pub fn int(mut self, n: i64) -> Self {
        self.args.push(Bytes::from(n.to_string()));
        self
    }

    pub fn build(self) -> CommandDescriptor {
        CommandDescriptor {
            command: self.command,
            args: self.args,
            shape: self.shape,
        }
    }
}
