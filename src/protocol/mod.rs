//! Protocol Module
//!
//! Command descriptors and the RESP wire encoding.
//!
//! ## Request Format
//! Every command is an array of bulk strings, the command token first:
//! ```text
//! *3\r\n $3\r\nSET\r\n $3\r\nkey\r\n $5\r\nvalue\r\n
//! ```
//!
//! ## Reply Types
//! - `+` status line
//! - `-` error line
//! - `:` integer
//! - `$` bulk string (`$-1` = nil)
//! - `*` multi-bulk (`*-1` = nil)

mod command;
mod descriptor;
mod response;
mod codec;

pub use command::CommandType;
pub use descriptor::{CommandDescriptor, DescriptorBuilder, ResponseShape};
pub use response::{RawResult, Reply};
pub use codec::{
    decode_reply, encode_command, encode_reply, lift, read_reply, write_command,
    DEFAULT_MAX_BULK_SIZE,
};
