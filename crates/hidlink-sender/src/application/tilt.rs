//! The tilt-to-pointer loop and its input boundary.
//!
//! [`PointerSource`] is where motion hardware would plug in: something that
//! yields acceleration samples and discrete button/gesture events. The core
//! never reads sensors itself. This crate ships only a synthetic source (see
//! `infrastructure::wave`); a real board-side implementation would sample an
//! accelerometer behind the same trait.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info};

use hidlink_core::MouseButton;
use hidlink_session::transport::LinkError;
use hidlink_session::{mouse, Session};

use crate::domain::TiltMapper;

/// One event from the input side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceEvent {
    /// An acceleration sample, milli-g per axis. `scroll_chord` is true while
    /// the scroll chord (both buttons held) is active: the Y axis then drives
    /// the wheel instead of the pointer.
    Tilt {
        ax: i32,
        ay: i32,
        scroll_chord: bool,
    },
    /// Primary button: left click.
    ButtonA,
    /// Secondary button: right click.
    ButtonB,
    /// Shake gesture: double click.
    Shake,
}

/// Blocking source of motion/button events.
///
/// `next_event` may block for the source's own sampling interval; returning
/// `None` ends the loop. Implementations own their pacing, the loop adds
/// none of its own.
pub trait PointerSource: Send {
    fn next_event(&mut self) -> Option<SourceEvent>;
}

/// Drains `source`, translating events into mouse commands until the source
/// ends or `running` is cleared. Returns the number of command lines the
/// loop emitted; the automatic handshake, if the first event triggers it, is
/// not counted.
///
/// Tilt samples inside the mapper's dead zone emit nothing, so an idle board
/// keeps the wire quiet.
///
/// # Errors
///
/// Returns [`LinkError`] when a write fails; the loop stops at the first
/// failure.
pub fn run_tilt_loop(
    session: &mut Session,
    source: &mut dyn PointerSource,
    mapper: &TiltMapper,
    running: &AtomicBool,
) -> Result<u64, LinkError> {
    let mut lines: u64 = 0;

    info!("tilt loop started");
    while running.load(Ordering::Relaxed) {
        let event = match source.next_event() {
            Some(event) => event,
            None => break,
        };
        match event {
            SourceEvent::Tilt {
                ax,
                ay,
                scroll_chord,
            } => {
                if scroll_chord {
                    if let Some(amount) = mapper.scroll_delta(ay) {
                        mouse::scroll(session, amount)?;
                        lines += 1;
                    }
                } else if let Some((dx, dy)) = mapper.pointer_delta(ax, ay) {
                    mouse::move_by(session, dx, dy)?;
                    lines += 1;
                }
            }
            SourceEvent::ButtonA => {
                mouse::click(session, MouseButton::Left)?;
                lines += 1;
            }
            SourceEvent::ButtonB => {
                mouse::click(session, MouseButton::Right)?;
                lines += 1;
            }
            SourceEvent::Shake => {
                mouse::double_click(session)?;
                lines += 2;
            }
        }
    }
    debug!(lines, "tilt loop finished");
    Ok(lines)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
