//! Raw scancode encoder: the control-byte chord dialect.
//!
//! This family serves receivers that consume USB-style scancodes instead of
//! readable tokens. It shares the session lifecycle (the init handshake and
//! pacing are dialect-independent) but its payload lines are chord-encoded:
//! modifier prefix bytes, then an escaped scancode, with the empty line
//! meaning release-all. A session speaks either this dialect or the text
//! dialect, never both; the two vocabularies must not interleave mid-line.

use hidlink_core::{chords_for_string, HidCommand, KeyChord};

use crate::config::Dialect;
use crate::session::Session;
use crate::transport::LinkError;

/// Types a whole string as chord lines.
///
/// The input may mix printable characters with control bytes `0x01..=0x08`
/// (modifier prefixes for the next key) and `0x10` (raw scancode escape).
/// Characters without a table entry are skipped. An empty string emits the
/// single release-all line.
///
/// # Errors
///
/// Returns [`LinkError`] when the link write fails.
pub fn send_string(session: &mut Session, text: &str) -> Result<(), LinkError> {
    if !session.permits(Dialect::Scancode, "send_string") {
        return Ok(());
    }
    for chord in chords_for_string(text) {
        session.send_line(&chord.to_line())?;
    }
    Ok(())
}

/// Emits one chord line.
///
/// # Errors
///
/// Returns [`LinkError`] when the link write fails.
pub fn send_chord(session: &mut Session, chord: KeyChord) -> Result<(), LinkError> {
    if !session.permits(Dialect::Scancode, "send_chord") {
        return Ok(());
    }
    session.send_line(&chord.to_line())
}

/// Emits a single raw scancode via the escape form, no modifiers.
///
/// # Errors
///
/// Returns [`LinkError`] when the link write fails.
pub fn press_raw(session: &mut Session, code: u8) -> Result<(), LinkError> {
    if !session.permits(Dialect::Scancode, "press_raw") {
        return Ok(());
    }
    session.send_command(&HidCommand::RawScancode(code))
}

/// Releases everything: the empty chord line.
///
/// # Errors
///
/// Returns [`LinkError`] when the link write fails.
pub fn release_all(session: &mut Session) -> Result<(), LinkError> {
    if !session.permits(Dialect::Scancode, "release_all") {
        return Ok(());
    }
    session.send_line(&KeyChord::release_all().to_line())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
