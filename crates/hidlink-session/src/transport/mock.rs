//! Mock transport and pacer for unit testing.
//!
//! # Why a mock transport?
//!
//! The real transport (`SerialTransport`) needs a physical device node and
//! actually transmits bytes to whatever is plugged in. The `MockTransport`
//! replaces the device with in-memory recording: every frame handed to
//! `write_all` is pushed into a shared log so test assertions can inspect
//! exactly what was emitted, byte for byte, in order.
//!
//! The session also pauses between frames through its pacer. Sleeping for
//! real in tests would make the suite slow and timing-flaky, so the
//! [`RecordingPacer`] records each requested pause instead of blocking;
//! tests assert on the recorded durations.
//!
//! # Usage in tests
//!
//! ```ignore
//! let (transport, log) = MockTransport::new();
//! let (pacer, pauses) = RecordingPacer::new();
//! let mut session = Session::with_pacer(Box::new(transport), SessionConfig::default(), Box::new(pacer));
//!
//! keyboard::press_key(&mut session, "a").unwrap();
//!
//! assert_eq!(log.lines(), vec!["HID:INIT:SYSTEM", "HID:KEY:PRESS:A"]);
//! ```
//!
//! # Simulating link failure
//!
//! Flip `log.set_fail_writes(true)` and every subsequent write returns
//! [`LinkError::Closed`], exercising the fatal-propagation path in callers.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::config::BaudRate;
use crate::session::Pacer;
use crate::transport::{LinkError, LinkTransport};

// ── Transport log ─────────────────────────────────────────────────────────────

/// Shared handle onto everything a [`MockTransport`] has seen.
///
/// Cloning the handle is cheap; all clones observe the same log.
#[derive(Clone, Default)]
pub struct TransportLog {
    inner: Arc<Mutex<LogInner>>,
}

#[derive(Default)]
struct LogInner {
    frames: Vec<Vec<u8>>,
    baud_changes: Vec<BaudRate>,
    flushes: usize,
    fail_writes: bool,
}

impl TransportLog {
    /// Every frame written, raw bytes including the line terminator.
    pub fn frames(&self) -> Vec<Vec<u8>> {
        self.inner.lock().unwrap().frames.clone()
    }

    /// Every frame as text with the one trailing `'\n'` stripped.
    ///
    /// Frame-shape assertions (terminator present, padding absent) should use
    /// [`TransportLog::frames`] instead.
    pub fn lines(&self) -> Vec<String> {
        self.inner
            .lock()
            .unwrap()
            .frames
            .iter()
            .map(|frame| {
                let text = String::from_utf8_lossy(frame);
                text.strip_suffix('\n').unwrap_or(&text).to_string()
            })
            .collect()
    }

    /// Baud rates passed to `configure`, in call order.
    pub fn baud_changes(&self) -> Vec<BaudRate> {
        self.inner.lock().unwrap().baud_changes.clone()
    }

    /// Number of `flush` calls observed.
    pub fn flush_count(&self) -> usize {
        self.inner.lock().unwrap().flushes
    }

    /// When set, every subsequent `write_all` fails with [`LinkError::Closed`].
    pub fn set_fail_writes(&self, fail: bool) {
        self.inner.lock().unwrap().fail_writes = fail;
    }
}

// ── Mock transport ────────────────────────────────────────────────────────────

/// A transport that records all frames without touching any device.
#[derive(Default)]
pub struct MockTransport {
    log: TransportLog,
}

impl MockTransport {
    /// Creates the transport and the log handle tests keep for assertions.
    pub fn new() -> (MockTransport, TransportLog) {
        let log = TransportLog::default();
        let transport = MockTransport { log: log.clone() };
        (transport, log)
    }
}

impl LinkTransport for MockTransport {
    /// Records the baud rate; configuration never fails on the mock.
    fn configure(&mut self, baud: BaudRate) -> Result<(), LinkError> {
        self.log.inner.lock().unwrap().baud_changes.push(baud);
        Ok(())
    }

    /// Records the frame, or fails with [`LinkError::Closed`] when the
    /// failure switch is set.
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), LinkError> {
        let mut inner = self.log.inner.lock().unwrap();
        if inner.fail_writes {
            return Err(LinkError::Closed);
        }
        inner.frames.push(bytes.to_vec());
        Ok(())
    }

    /// Counts the flush; flushing never fails on the mock.
    fn flush(&mut self) -> Result<(), LinkError> {
        self.log.inner.lock().unwrap().flushes += 1;
        Ok(())
    }
}

// ── Recording pacer ───────────────────────────────────────────────────────────

/// Shared handle onto the pauses a [`RecordingPacer`] was asked for.
#[derive(Clone, Default)]
pub struct PauseLog {
    inner: Arc<Mutex<Vec<Duration>>>,
}

impl PauseLog {
    /// Every requested pause, in request order.
    pub fn pauses(&self) -> Vec<Duration> {
        self.inner.lock().unwrap().clone()
    }

    /// Sum of all requested pauses.
    pub fn total(&self) -> Duration {
        self.inner.lock().unwrap().iter().sum()
    }
}

/// A pacer that records requested pauses instead of sleeping.
#[derive(Default)]
pub struct RecordingPacer {
    log: PauseLog,
}

impl RecordingPacer {
    /// Creates the pacer and the log handle tests keep for assertions.
    pub fn new() -> (RecordingPacer, PauseLog) {
        let log = PauseLog::default();
        let pacer = RecordingPacer { log: log.clone() };
        (pacer, log)
    }
}

impl Pacer for RecordingPacer {
    fn pause(&mut self, duration: Duration) {
        self.log.inner.lock().unwrap().push(duration);
    }
}
