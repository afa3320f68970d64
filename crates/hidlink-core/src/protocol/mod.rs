//! Protocol module containing command types and the text-line codec.

pub mod codec;
pub mod command;

pub use codec::{encode_line, parse_line, WireError, COMMAND_PREFIX, LINE_TERMINATOR};
pub use command::{HidCommand, MouseButton};
