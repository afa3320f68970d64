//! hidlink-session: the transport session and command encoder families.
//!
//! This crate owns everything between a caller ("type this", "move the
//! pointer") and bytes on a serial link:
//!
//! 1. [`Session`] guards the link lifecycle (one automatic `HID:INIT:SYSTEM`
//!    handshake, never repeated), frames each command as `line + '\n'`, and
//!    paces every write because the receiver has no way to push back.
//! 2. The encoder families validate and format commands:
//!    [`keyboard`] and [`mouse`] speak the readable text dialect,
//!    [`rawkeys`] speaks the control-byte scancode dialect.
//! 3. [`transport`] is the byte boundary: a real serial port in production,
//!    a recording mock in tests.
//!
//! # Error philosophy
//!
//! Two failure classes, handled oppositely. Invalid caller input (a bogus
//! key name, text with an embedded newline, a command family that does not
//! match the session dialect) is dropped silently and logged at debug level;
//! the protocol favors a missed keystroke over a crashed sender. Transport
//! failures are the opposite: every encoder returns `Result` and propagates
//! [`LinkError`] up, because a broken link is fatal to the hosting program.

pub mod config;
pub mod keyboard;
pub mod mouse;
pub mod rawkeys;
pub mod session;
pub mod transport;

pub use config::{BaudRate, Dialect, SessionConfig, TypeTextMode, INIT_SETTLE, LINE_PACING};
pub use mouse::DOUBLE_CLICK_GAP;
pub use session::{BlockingPacer, Pacer, Session};
pub use transport::mock::{MockTransport, PauseLog, RecordingPacer, TransportLog};
pub use transport::serial::SerialTransport;
pub use transport::{LinkError, LinkTransport};
