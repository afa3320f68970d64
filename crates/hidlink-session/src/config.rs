//! Session configuration: baud rate, wire dialect, typing mode, and pacing.
//!
//! All of these are fixed at session construction. The host-side receiver has
//! no way to negotiate settings back (the link is one-directional), so a
//! mismatch between this configuration and the receiver simply produces
//! garbage on the host; pick the values the receiver was flashed with.
//!
//! # Why fixed pacing delays? (for beginners)
//!
//! The serial protocol has no acknowledgments and no flow control.  The only
//! way the sender avoids overrunning the receiver's read buffer is to wait a
//! fixed interval after every line (`line_pacing`) and a longer one after the
//! init handshake (`init_settle`), giving the receiver time to drain.  These
//! delays are part of the protocol contract, not tuning knobs: receivers are
//! written against them.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Settle delay after the init handshake line.
pub const INIT_SETTLE: Duration = Duration::from_millis(200);

/// Pacing delay after every emitted line.
pub const LINE_PACING: Duration = Duration::from_millis(10);

// ── Link options ──────────────────────────────────────────────────────────────

/// Supported link baud rates.
///
/// 9600 is the canonical default; 115200 exists for receivers flashed with
/// the fast variant. Arbitrary rates are deliberately not representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BaudRate {
    #[default]
    #[serde(rename = "9600")]
    Baud9600,
    #[serde(rename = "115200")]
    Baud115200,
}

impl BaudRate {
    /// The numeric rate handed to the serial layer.
    pub fn as_u32(&self) -> u32 {
        match self {
            BaudRate::Baud9600 => 9_600,
            BaudRate::Baud115200 => 115_200,
        }
    }

    /// Maps a numeric rate back to the enum; unsupported rates yield `None`.
    pub fn from_u32(rate: u32) -> Option<BaudRate> {
        match rate {
            9_600 => Some(BaudRate::Baud9600),
            115_200 => Some(BaudRate::Baud115200),
            _ => None,
        }
    }
}

impl std::fmt::Display for BaudRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_u32())
    }
}

/// Wire vocabulary the session speaks.
///
/// A session speaks exactly one dialect for its whole lifetime. Encoder
/// families check this before emitting; a mismatched call is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Human-readable `HID:`-prefixed token lines.
    #[default]
    Text,
    /// Control-byte chord lines for scancode receivers.
    Scancode,
}

/// How `keyboard::type_text` puts a string on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TypeTextMode {
    /// One `HID:KEY:TYPE:<text>` line carrying the whole string.
    #[default]
    WholeString,
    /// One canonical key press per character; the per-line pacing delay
    /// doubles as the inter-character delay.
    PerKey,
}

// ── Session config ────────────────────────────────────────────────────────────

/// Everything a [`crate::Session`] needs to know about its link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Link baud rate, applied to the transport during initialization.
    #[serde(default)]
    pub baud: BaudRate,
    /// Wire dialect, fixed for the session lifetime.
    #[serde(default)]
    pub dialect: Dialect,
    /// Typing mode for `keyboard::type_text`.
    #[serde(default)]
    pub type_mode: TypeTextMode,
    /// Trailing padding bytes appended to each line. Initialization forces
    /// this to 0 so every frame is exactly `line + '\n'`.
    #[serde(default)]
    pub line_padding: usize,
    /// Settle delay after the init handshake.
    #[serde(default = "default_init_settle")]
    pub init_settle: Duration,
    /// Pacing delay after every emitted line.
    #[serde(default = "default_line_pacing")]
    pub line_pacing: Duration,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_init_settle() -> Duration {
    INIT_SETTLE
}
fn default_line_pacing() -> Duration {
    LINE_PACING
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            baud: BaudRate::default(),
            dialect: Dialect::default(),
            type_mode: TypeTextMode::default(),
            line_padding: 0,
            init_settle: default_init_settle(),
            line_pacing: default_line_pacing(),
        }
    }
}

impl SessionConfig {
    /// Default configuration with the scancode dialect selected.
    pub fn scancode() -> Self {
        Self {
            dialect: Dialect::Scancode,
            ..Self::default()
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
