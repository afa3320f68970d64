//! The scripted protocol walkthrough.
//!
//! Exercises one of everything against a live session: the handshake, text
//! typing, discrete and special keys, a deliberately invalid key (which must
//! vanish without a trace), a combo, a composite shortcut, pointer motion,
//! double click, scrolling, and the release-all commands. Useful both as a
//! smoke test against a real receiver and, over the mock transport, as the
//! reference transcript for integration tests.

use tracing::info;

use hidlink_session::transport::LinkError;
use hidlink_session::{keyboard, mouse, Session};
use hidlink_core::Modifier;

/// Runs the walkthrough and returns the number of lines put on the wire.
///
/// The counts next to each step track what actually reaches the link; the
/// invalid press contributes nothing.
///
/// # Errors
///
/// Returns [`LinkError`] as soon as any write fails; the script does not
/// continue past a dead link.
pub fn run_demo(session: &mut Session) -> Result<u64, LinkError> {
    let mut lines: u64 = 0;

    session.debug("walkthrough started");
    session.initialize()?;
    lines += 1; // HID:INIT:SYSTEM
    session.ping()?;
    lines += 1;

    keyboard::type_text(session, "Hello World!")?;
    lines += 1;
    keyboard::press_key(session, "A")?;
    lines += 1;
    keyboard::press_key(session, "ENTER")?;
    lines += 1;
    keyboard::press_key(session, "SPACE")?;
    lines += 1;
    keyboard::press_key(session, "INVALID_KEY")?; // dropped, no line
    keyboard::send_combo(session, &[Modifier::Ctrl], "c")?;
    lines += 1;
    keyboard::press_key(session, "H")?;
    lines += 1;
    keyboard::press_key(session, "i")?;
    lines += 1;
    keyboard::copy(session)?;
    lines += 3; // hold, press, release

    for (dx, dy) in [(10, 0), (0, 10), (-10, 0), (0, -10)] {
        mouse::move_by(session, dx, dy)?;
        lines += 1;
    }
    mouse::double_click(session)?;
    lines += 2;
    mouse::scroll(session, 1)?;
    lines += 1;
    mouse::scroll(session, -1)?;
    lines += 1;

    mouse::release_all(session)?;
    lines += 1;
    keyboard::release_all(session)?;
    lines += 1;

    session.debug("walkthrough complete");
    info!(lines, "walkthrough finished");
    Ok(lines)
}
