//! The transport session: link lifecycle, framing, and pacing.
//!
//! One [`Session`] owns one link for the life of the process. It guards the
//! uninitialized → initialized transition, frames every outgoing line, and
//! self-throttles after each write because the wire has no flow control.
//!
//! # The lifecycle (for beginners)
//!
//! A freshly constructed session has written nothing. The first emission,
//! whichever encoder triggers it, runs the init handshake automatically:
//! apply the baud rate, send `HID:INIT:SYSTEM`, and wait 200 ms for the
//! receiver to settle. Callers may also run [`Session::initialize`]
//! explicitly up front; calling it again later is a no-op. There is no
//! shutdown: the session lives until the program exits.
//!
//! Encoders in [`crate::keyboard`], [`crate::mouse`], and [`crate::rawkeys`]
//! layer validation and command formatting on top; everything they emit
//! funnels through [`Session::send_line`], the single emission primitive.

use std::time::Duration;

use tracing::{debug, info};

use hidlink_core::{encode_line, HidCommand, LINE_TERMINATOR};

use crate::config::{Dialect, SessionConfig};
use crate::transport::{LinkError, LinkTransport};

// ── Pacing ────────────────────────────────────────────────────────────────────

/// Post-write suspension point.
///
/// Production sessions block the calling thread; tests substitute a recording
/// implementation so suites stay fast and timing-exact.
pub trait Pacer: Send {
    /// Suspends the caller for `duration`.
    fn pause(&mut self, duration: Duration);
}

/// The production pacer: a plain blocking sleep.
#[derive(Debug, Default)]
pub struct BlockingPacer;

impl Pacer for BlockingPacer {
    fn pause(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

// ── Session ───────────────────────────────────────────────────────────────────

/// Stateful handle over one serial HID link.
///
/// The session is the only mutable state in the protocol stack and has
/// exactly one owner; all methods take `&mut self`, so initialization cannot
/// race and lines cannot interleave.
pub struct Session {
    transport: Box<dyn LinkTransport>,
    pacer: Box<dyn Pacer>,
    config: SessionConfig,
    initialized: bool,
}

impl Session {
    /// Creates a session over `transport` with the production blocking pacer.
    ///
    /// Nothing is written to the wire until the first emission or an explicit
    /// [`Session::initialize`].
    pub fn new(transport: Box<dyn LinkTransport>, config: SessionConfig) -> Session {
        Session::with_pacer(transport, config, Box::new(BlockingPacer))
    }

    /// Creates a session with a caller-supplied pacer.
    pub fn with_pacer(
        transport: Box<dyn LinkTransport>,
        config: SessionConfig,
        pacer: Box<dyn Pacer>,
    ) -> Session {
        Session {
            transport,
            pacer,
            config,
            initialized: false,
        }
    }

    /// Runs the init handshake once; later calls are no-ops.
    ///
    /// Applies the configured baud rate, forces the line padding to 0 for
    /// exact framing, emits `HID:INIT:SYSTEM`, and pauses for the settle
    /// delay before marking the session initialized.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError`] when the transport rejects the baud rate or the
    /// write fails. The session stays uninitialized in that case; the hosting
    /// program is expected to treat the error as fatal.
    pub fn initialize(&mut self) -> Result<(), LinkError> {
        if self.initialized {
            return Ok(());
        }

        self.transport.configure(self.config.baud)?;
        if self.config.line_padding != 0 {
            debug!(
                padding = self.config.line_padding,
                "clearing configured line padding for exact framing"
            );
            self.config.line_padding = 0;
        }

        self.write_frame(&encode_line(&HidCommand::Init))?;
        self.pacer.pause(self.config.init_settle);
        self.initialized = true;
        info!(baud = %self.config.baud, dialect = ?self.config.dialect, "HID link session initialized");
        Ok(())
    }

    /// Emits one raw line: the sole emission primitive.
    ///
    /// Lazily initializes on first use, frames `raw` with the line
    /// terminator, writes and flushes it, then pauses for the pacing delay
    /// so the receiver's read buffer cannot be overrun.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError`] when the write or flush fails.
    pub fn send_line(&mut self, raw: &str) -> Result<(), LinkError> {
        self.initialize()?;
        self.write_frame(raw)?;
        self.pacer.pause(self.config.line_pacing);
        debug!(line = raw, "line sent");
        Ok(())
    }

    /// Encodes `command` with the wire codec and emits it.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError`] when the underlying write fails; encoding itself
    /// is total and cannot fail.
    pub fn send_command(&mut self, command: &HidCommand) -> Result<(), LinkError> {
        let line = encode_line(command);
        self.send_line(&line)
    }

    /// Emits the `HID:PING` liveness probe.
    ///
    /// Fire-and-forget: no reply is awaited, the link being one-directional.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError`] when the underlying write fails.
    pub fn ping(&mut self) -> Result<(), LinkError> {
        self.send_command(&HidCommand::Ping)
    }

    /// Whether the init handshake has completed. Pure read, no side effect.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// The configuration this session was constructed with.
    ///
    /// `line_padding` reads as 0 once the session is initialized.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Diagnostic pass-through: logs `message` and emits nothing on the wire.
    pub fn debug(&self, message: &str) {
        debug!("{message}");
    }

    /// Dialect gate used by the encoder families. A command family invoked
    /// on a session speaking the other dialect is dropped like any other
    /// invalid input.
    pub(crate) fn permits(&self, dialect: Dialect, operation: &'static str) -> bool {
        if self.config.dialect == dialect {
            return true;
        }
        tracing::warn!(
            operation,
            configured = ?self.config.dialect,
            "command family does not match the session dialect, dropping"
        );
        false
    }

    /// Extra suspension used by encoders with timing contracts of their own
    /// (the double-click gap).
    pub(crate) fn pause(&mut self, duration: Duration) {
        self.pacer.pause(duration);
    }

    fn write_frame(&mut self, raw: &str) -> Result<(), LinkError> {
        let mut frame = String::with_capacity(raw.len() + self.config.line_padding + 1);
        frame.push_str(raw);
        for _ in 0..self.config.line_padding {
            frame.push(' ');
        }
        frame.push(LINE_TERMINATOR);
        self.transport.write_all(frame.as_bytes())?;
        self.transport.flush()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
