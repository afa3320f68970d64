//! Mouse encoder: relative movement, button lifecycle, and scrolling.
//!
//! Movement and scroll magnitudes pass through verbatim. The nominal wire
//! range is a signed byte, but this layer does not clamp or validate: range
//! enforcement belongs to the receiver, and several deployed receivers accept
//! wider values. No axis inversion happens here either; sign conventions are
//! receiver-defined, and callers that need a flipped axis (tilt-to-pointer
//! mappings usually do) flip it before calling in.

use std::time::Duration;

use hidlink_core::{HidCommand, MouseButton};

use crate::config::Dialect;
use crate::session::Session;
use crate::transport::LinkError;

/// Gap between the two clicks of [`double_click`]. The receiver recognizes a
/// double click purely from timing, so this interval is a protocol contract.
pub const DOUBLE_CLICK_GAP: Duration = Duration::from_millis(50);

/// Moves the pointer by a relative delta: `HID:MOUSE:MOVE:<dx>,<dy>`.
///
/// Each call is an independent command; deltas do not accumulate or cancel
/// on the sender.
///
/// # Errors
///
/// Returns [`LinkError`] when the link write fails.
pub fn move_by(session: &mut Session, dx: i32, dy: i32) -> Result<(), LinkError> {
    if !session.permits(Dialect::Text, "move_by") {
        return Ok(());
    }
    session.send_command(&HidCommand::MouseMove { dx, dy })
}

/// Clicks a button: `HID:MOUSE:CLICK:<BUTTON>`.
///
/// # Errors
///
/// Returns [`LinkError`] when the link write fails.
pub fn click(session: &mut Session, button: MouseButton) -> Result<(), LinkError> {
    if !session.permits(Dialect::Text, "click") {
        return Ok(());
    }
    session.send_command(&HidCommand::MouseClick(button))
}

/// Presses and holds a button: `HID:MOUSE:PRESS:<BUTTON>`.
///
/// # Errors
///
/// Returns [`LinkError`] when the link write fails.
pub fn press(session: &mut Session, button: MouseButton) -> Result<(), LinkError> {
    if !session.permits(Dialect::Text, "press") {
        return Ok(());
    }
    session.send_command(&HidCommand::MousePress(button))
}

/// Releases a held button: `HID:MOUSE:RELEASE:<BUTTON>`.
///
/// # Errors
///
/// Returns [`LinkError`] when the link write fails.
pub fn release(session: &mut Session, button: MouseButton) -> Result<(), LinkError> {
    if !session.permits(Dialect::Text, "release") {
        return Ok(());
    }
    session.send_command(&HidCommand::MouseRelease(button))
}

/// Releases every held button: `HID:MOUSE:RELEASE:ALL`.
///
/// # Errors
///
/// Returns [`LinkError`] when the link write fails.
pub fn release_all(session: &mut Session) -> Result<(), LinkError> {
    if !session.permits(Dialect::Text, "release_all") {
        return Ok(());
    }
    session.send_command(&HidCommand::MouseReleaseAll)
}

/// Scrolls the wheel: `HID:MOUSE:SCROLL:<amount>`. Positive direction is
/// receiver-defined.
///
/// # Errors
///
/// Returns [`LinkError`] when the link write fails.
pub fn scroll(session: &mut Session, amount: i32) -> Result<(), LinkError> {
    if !session.permits(Dialect::Text, "scroll") {
        return Ok(());
    }
    session.send_command(&HidCommand::MouseScroll(amount))
}

/// Double-clicks the left button: two `HID:MOUSE:CLICK:LEFT` lines separated
/// by [`DOUBLE_CLICK_GAP`] on top of the usual per-line pacing. Not a single
/// wire command; the receiver infers the double click from the interval.
///
/// # Errors
///
/// Returns [`LinkError`] when the link write fails; a failure after the
/// first click leaves a plain single click behind.
pub fn double_click(session: &mut Session) -> Result<(), LinkError> {
    if !session.permits(Dialect::Text, "double_click") {
        return Ok(());
    }
    session.send_command(&HidCommand::MouseClick(MouseButton::Left))?;
    session.pause(DOUBLE_CLICK_GAP);
    session.send_command(&HidCommand::MouseClick(MouseButton::Left))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
