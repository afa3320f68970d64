//! # hidlink-core
//!
//! Shared library for the serial HID command link: command types, the
//! text-line codec, the key token vocabulary, and the scancode dialect
//! tables.
//!
//! This crate is pure data and arithmetic. It has zero dependencies on
//! serial ports, timers, or any OS API; the transport session that actually
//! moves lines lives in `hidlink-session`.
//!
//! # Protocol overview (for beginners)
//!
//! The link turns a host computer into a fake USB keyboard and mouse: a
//! small board sits on a serial line and replays whatever commands it is
//! sent. Commands are single ASCII lines such as
//!
//! ```text
//! HID:KEY:PRESS:ENTER
//! HID:MOUSE:MOVE:4,-2
//! ```
//!
//! each terminated by a newline. There is no acknowledgement and no reply
//! channel; the sender fires lines and paces itself with fixed delays.
//!
//! This crate defines:
//!
//! - **`protocol`** – The [`HidCommand`] type (one variant per wire line),
//!   [`encode_line`] to format it, and [`parse_line`], a reference parser
//!   used to prove that every emitted line means what the sender intended.
//!
//! - **`keymap`** – The approved key token set with the validation rule
//!   every key argument passes before transmission, plus the older scancode
//!   dialect: USB HID position codes packed into control-byte chords.

pub mod keymap;
pub mod protocol;

pub use keymap::scancode::{ascii_to_chord, chords_for_string, KeyChord, ModifierMask};
pub use keymap::tokens::{Key, Modifier, SpecialKey};
pub use protocol::codec::{encode_line, parse_line, WireError, COMMAND_PREFIX, LINE_TERMINATOR};
pub use protocol::command::{HidCommand, MouseButton};
