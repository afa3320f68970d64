//! Link transports: the byte-writing boundary under the session.
//!
//! A [`LinkTransport`] is owned exclusively by one [`crate::Session`]; the
//! protocol has a single logical sender, so the trait takes `&mut self` and
//! no transport is ever shared. The production implementation talks to a
//! real serial port; the mock records frames for tests.

use thiserror::Error;

use crate::config::BaudRate;

pub mod mock;
pub mod serial;

/// Error type for link transport operations.
///
/// Any of these is fatal to the session: the protocol has no retry or
/// reconnect story, so callers propagate the error up and let the hosting
/// program decide (typically by exiting).
#[derive(Debug, Error)]
pub enum LinkError {
    /// The serial port could not be opened.
    #[error("failed to open serial port {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: serialport::Error,
    },

    /// The open port rejected a settings change.
    #[error("failed to reconfigure serial link: {0}")]
    Configure(#[source] serialport::Error),

    /// A write or flush on the underlying device failed.
    #[error("link write failed: {0}")]
    Io(#[from] std::io::Error),

    /// The transport refused the operation because it is no longer usable.
    #[error("link closed")]
    Closed,
}

/// Byte-level link under the session.
///
/// Implementations must deliver `write_all` bytes in order and make them
/// visible to the device on `flush`; the session relies on this for its
/// one-command-one-line framing.
pub trait LinkTransport: Send {
    /// Applies the baud rate to the open link.
    fn configure(&mut self, baud: BaudRate) -> Result<(), LinkError>;

    /// Writes the whole buffer.
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), LinkError>;

    /// Pushes any buffered bytes out to the device.
    fn flush(&mut self) -> Result<(), LinkError>;
}
