//! Dry-run transport that prints frames to stdout.
//!
//! Lets the demo and tilt loop run with no hardware attached: every frame
//! that would have gone out the serial port is printed instead, one line per
//! frame, with control bytes escaped so scancode-dialect output stays
//! readable in a terminal.

use std::io::Write;

use tracing::info;

use hidlink_session::config::BaudRate;
use hidlink_session::transport::{LinkError, LinkTransport};

/// Transport that renders frames to stdout instead of a device.
#[derive(Debug, Default)]
pub struct ConsoleTransport;

impl ConsoleTransport {
    pub fn new() -> ConsoleTransport {
        ConsoleTransport
    }
}

impl LinkTransport for ConsoleTransport {
    /// Nothing to configure; the requested rate is only logged.
    fn configure(&mut self, baud: BaudRate) -> Result<(), LinkError> {
        info!(%baud, "dry run, no serial port opened");
        Ok(())
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<(), LinkError> {
        println!("{}", render_frame(bytes));
        Ok(())
    }

    fn flush(&mut self) -> Result<(), LinkError> {
        std::io::stdout().flush()?;
        Ok(())
    }
}

/// Renders one frame for the terminal: printable ASCII verbatim, the frame's
/// own terminator dropped (println adds one), everything else as `\xNN`.
fn render_frame(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for &b in bytes {
        match b {
            b'\n' => {}
            0x20..=0x7E => out.push(b as char),
            _ => out.push_str(&format!("\\x{b:02X}")),
        }
    }
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_frames_render_verbatim() {
        assert_eq!(render_frame(b"HID:KEY:PRESS:A\n"), "HID:KEY:PRESS:A");
    }

    #[test]
    fn test_control_bytes_are_escaped() {
        // A shift+'s' chord line: mask 0x02, escape 0x10, code 0x16.
        assert_eq!(render_frame(b"\x02\x10\x16\n"), "\\x02\\x10\\x16");
    }

    #[test]
    fn test_empty_frame_renders_empty() {
        assert_eq!(render_frame(b"\n"), "");
    }
}
