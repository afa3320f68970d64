//! Keyboard encoder: typed text, discrete presses, holds, and combos.
//!
//! Every function validates its arguments, then hands a formatted line to the
//! session. Invalid keys are dropped without error (fail open): the caller is
//! typically an unattended input loop on an embedded board, and aborting it
//! over a typo'd key name would be worse than a missing keystroke. Dropped
//! input is visible on the `debug` log level.
//!
//! Validation rule: a key string is valid iff it is non-empty and either
//! exactly one character or a case-insensitive match against the approved
//! special-key set. Upper-casing happens at transmission, never against the
//! caller's string.

use tracing::debug;

use hidlink_core::{HidCommand, Key, Modifier, SpecialKey};

use crate::config::{Dialect, TypeTextMode};
use crate::session::Session;
use crate::transport::LinkError;

/// Types a string on the host.
///
/// In `WholeString` mode the text travels as one `HID:KEY:TYPE:` line,
/// pass-through unescaped, embedded colons included. In `PerKey` mode each
/// character becomes its own canonical press line, the pacing delay acting as
/// the inter-character delay. Text containing a line terminator would break
/// the one-command-one-line framing and is dropped whole.
///
/// # Errors
///
/// Returns [`LinkError`] when the link write fails.
pub fn type_text(session: &mut Session, text: &str) -> Result<(), LinkError> {
    if !session.permits(Dialect::Text, "type_text") {
        return Ok(());
    }
    if text.contains(['\n', '\r']) {
        debug!("text contains a line terminator, dropped");
        return Ok(());
    }
    match session.config().type_mode {
        TypeTextMode::WholeString => session.send_command(&HidCommand::KeyType(text.to_string())),
        TypeTextMode::PerKey => {
            for c in text.chars() {
                session.send_command(&HidCommand::KeyPress(Key::from_char(c)))?;
            }
            Ok(())
        }
    }
}

/// Taps one key: `HID:KEY:PRESS:<KEY>`.
///
/// # Errors
///
/// Returns [`LinkError`] when the link write fails.
pub fn press_key(session: &mut Session, raw: &str) -> Result<(), LinkError> {
    if !session.permits(Dialect::Text, "press_key") {
        return Ok(());
    }
    match parse_or_drop(raw, "press_key") {
        Some(key) => session.send_command(&HidCommand::KeyPress(key)),
        None => Ok(()),
    }
}

/// Holds a key down until released: `HID:KEY:HOLD:<KEY>`.
///
/// # Errors
///
/// Returns [`LinkError`] when the link write fails.
pub fn hold_key(session: &mut Session, raw: &str) -> Result<(), LinkError> {
    if !session.permits(Dialect::Text, "hold_key") {
        return Ok(());
    }
    match parse_or_drop(raw, "hold_key") {
        Some(key) => session.send_command(&HidCommand::KeyHold(key)),
        None => Ok(()),
    }
}

/// Releases a held key: `HID:KEY:RELEASE:<KEY>`.
///
/// # Errors
///
/// Returns [`LinkError`] when the link write fails.
pub fn release_key(session: &mut Session, raw: &str) -> Result<(), LinkError> {
    if !session.permits(Dialect::Text, "release_key") {
        return Ok(());
    }
    match parse_or_drop(raw, "release_key") {
        Some(key) => session.send_command(&HidCommand::KeyRelease(key)),
        None => Ok(()),
    }
}

/// Releases every held key: `HID:KEY:RELEASE:ALL`. Takes no argument and
/// never drops.
///
/// # Errors
///
/// Returns [`LinkError`] when the link write fails.
pub fn release_all(session: &mut Session) -> Result<(), LinkError> {
    if !session.permits(Dialect::Text, "release_all") {
        return Ok(());
    }
    session.send_command(&HidCommand::KeyReleaseAll)
}

/// Sends a simultaneous combination: `HID:KEY:COMBO:<MOD+...+KEY>`.
///
/// Modifiers keep the caller's order and are not de-duplicated. An invalid
/// key drops the whole combo.
///
/// # Errors
///
/// Returns [`LinkError`] when the link write fails.
pub fn send_combo(
    session: &mut Session,
    modifiers: &[Modifier],
    raw_key: &str,
) -> Result<(), LinkError> {
    if !session.permits(Dialect::Text, "send_combo") {
        return Ok(());
    }
    match parse_or_drop(raw_key, "send_combo") {
        Some(key) => session.send_command(&HidCommand::KeyCombo {
            modifiers: modifiers.to_vec(),
            key,
        }),
        None => Ok(()),
    }
}

// ── Composite shortcuts ───────────────────────────────────────────────────────
//
// Each composite is three separate lines (hold CTRL, press the letter,
// release CTRL), individually paced. Not atomic: a link failure after the
// hold leaves CTRL held on the host until a later release-all.

/// Ctrl+C.
///
/// # Errors
///
/// Returns [`LinkError`] when the link write fails; CTRL may be left held.
pub fn copy(session: &mut Session) -> Result<(), LinkError> {
    ctrl_shortcut(session, 'c')
}

/// Ctrl+V.
///
/// # Errors
///
/// Returns [`LinkError`] when the link write fails; CTRL may be left held.
pub fn paste(session: &mut Session) -> Result<(), LinkError> {
    ctrl_shortcut(session, 'v')
}

/// Ctrl+X.
///
/// # Errors
///
/// Returns [`LinkError`] when the link write fails; CTRL may be left held.
pub fn cut(session: &mut Session) -> Result<(), LinkError> {
    ctrl_shortcut(session, 'x')
}

/// Ctrl+A.
///
/// # Errors
///
/// Returns [`LinkError`] when the link write fails; CTRL may be left held.
pub fn select_all(session: &mut Session) -> Result<(), LinkError> {
    ctrl_shortcut(session, 'a')
}

/// Ctrl+Z.
///
/// # Errors
///
/// Returns [`LinkError`] when the link write fails; CTRL may be left held.
pub fn undo(session: &mut Session) -> Result<(), LinkError> {
    ctrl_shortcut(session, 'z')
}

fn ctrl_shortcut(session: &mut Session, letter: char) -> Result<(), LinkError> {
    if !session.permits(Dialect::Text, "ctrl_shortcut") {
        return Ok(());
    }
    session.send_command(&HidCommand::KeyHold(Key::Special(SpecialKey::Ctrl)))?;
    session.send_command(&HidCommand::KeyPress(Key::from_char(letter)))?;
    session.send_command(&HidCommand::KeyRelease(Key::Special(SpecialKey::Ctrl)))
}

fn parse_or_drop(raw: &str, operation: &'static str) -> Option<Key> {
    match Key::parse(raw) {
        Some(key) => Some(key),
        None => {
            debug!(operation, raw, "invalid key, dropped");
            None
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use crate::transport::mock::{MockTransport, TransportLog};

    fn make_session(config: SessionConfig) -> (Session, TransportLog) {
        let (transport, log) = MockTransport::new();
        let (pacer, _) = crate::transport::mock::RecordingPacer::new();
        let session = Session::with_pacer(Box::new(transport), config, Box::new(pacer));
        (session, log)
    }

    /// Lines after the automatic `HID:INIT:SYSTEM`.
    fn sent(log: &TransportLog) -> Vec<String> {
        let mut lines = log.lines();
        assert_eq!(lines.first().map(String::as_str), Some("HID:INIT:SYSTEM"));
        lines.remove(0);
        lines
    }

    // ── press / hold / release ────────────────────────────────────────────────

    #[test]
    fn test_press_key_uppercases_single_character() {
        let (mut session, log) = make_session(SessionConfig::default());
        press_key(&mut session, "a").unwrap();
        assert_eq!(sent(&log), vec!["HID:KEY:PRESS:A"]);
    }

    #[test]
    fn test_press_key_accepts_special_tokens_case_insensitively() {
        let (mut session, log) = make_session(SessionConfig::default());
        press_key(&mut session, "enter").unwrap();
        press_key(&mut session, "Page_Up").unwrap();
        press_key(&mut session, "f11").unwrap();
        assert_eq!(
            sent(&log),
            vec!["HID:KEY:PRESS:ENTER", "HID:KEY:PRESS:PAGE_UP", "HID:KEY:PRESS:F11"]
        );
    }

    #[test]
    fn test_invalid_keys_drop_silently() {
        let (mut session, log) = make_session(SessionConfig::default());
        press_key(&mut session, "").unwrap();
        press_key(&mut session, "NOT_A_KEY").unwrap();
        press_key(&mut session, "F13").unwrap();
        hold_key(&mut session, "ab").unwrap();
        release_key(&mut session, "").unwrap();
        assert!(log.frames().is_empty(), "nothing may be emitted, not even init");
    }

    #[test]
    fn test_hold_and_release_lifecycle() {
        let (mut session, log) = make_session(SessionConfig::default());
        hold_key(&mut session, "shift").unwrap();
        release_key(&mut session, "shift").unwrap();
        release_all(&mut session).unwrap();
        assert_eq!(
            sent(&log),
            vec![
                "HID:KEY:HOLD:SHIFT",
                "HID:KEY:RELEASE:SHIFT",
                "HID:KEY:RELEASE:ALL"
            ]
        );
    }

    // ── type_text ─────────────────────────────────────────────────────────────

    #[test]
    fn test_type_text_whole_string_is_one_line_verbatim() {
        let (mut session, log) = make_session(SessionConfig::default());
        type_text(&mut session, "user:pass, plus+more").unwrap();
        assert_eq!(sent(&log), vec!["HID:KEY:TYPE:user:pass, plus+more"]);
    }

    #[test]
    fn test_type_text_per_key_presses_each_character() {
        let mut config = SessionConfig::default();
        config.type_mode = TypeTextMode::PerKey;
        let (mut session, log) = make_session(config);
        type_text(&mut session, "hi").unwrap();
        assert_eq!(sent(&log), vec!["HID:KEY:PRESS:H", "HID:KEY:PRESS:I"]);
    }

    #[test]
    fn test_type_text_drops_text_with_line_terminators() {
        let (mut session, log) = make_session(SessionConfig::default());
        type_text(&mut session, "line one\nline two").unwrap();
        type_text(&mut session, "cr\rtext").unwrap();
        assert!(log.frames().is_empty());
    }

    #[test]
    fn test_type_text_empty_string_is_a_valid_command() {
        let (mut session, log) = make_session(SessionConfig::default());
        type_text(&mut session, "").unwrap();
        assert_eq!(sent(&log), vec!["HID:KEY:TYPE:"]);
    }

    // ── combos ────────────────────────────────────────────────────────────────

    #[test]
    fn test_combo_joins_in_caller_order() {
        let (mut session, log) = make_session(SessionConfig::default());
        send_combo(&mut session, &[Modifier::Ctrl, Modifier::Shift], "s").unwrap();
        assert_eq!(sent(&log), vec!["HID:KEY:COMBO:CTRL+SHIFT+S"]);
    }

    #[test]
    fn test_combo_does_not_deduplicate_modifiers() {
        let (mut session, log) = make_session(SessionConfig::default());
        send_combo(&mut session, &[Modifier::Ctrl, Modifier::Ctrl], "c").unwrap();
        assert_eq!(sent(&log), vec!["HID:KEY:COMBO:CTRL+CTRL+C"]);
    }

    #[test]
    fn test_combo_with_invalid_key_drops_whole_command() {
        let (mut session, log) = make_session(SessionConfig::default());
        send_combo(&mut session, &[Modifier::Ctrl], "bogus").unwrap();
        assert!(log.frames().is_empty());
    }

    #[test]
    fn test_combo_without_modifiers_is_just_the_key() {
        let (mut session, log) = make_session(SessionConfig::default());
        send_combo(&mut session, &[], "tab").unwrap();
        assert_eq!(sent(&log), vec!["HID:KEY:COMBO:TAB"]);
    }

    // ── composites ────────────────────────────────────────────────────────────

    #[test]
    fn test_copy_is_hold_press_release() {
        let (mut session, log) = make_session(SessionConfig::default());
        copy(&mut session).unwrap();
        assert_eq!(
            sent(&log),
            vec!["HID:KEY:HOLD:CTRL", "HID:KEY:PRESS:C", "HID:KEY:RELEASE:CTRL"]
        );
    }

    #[test]
    fn test_each_composite_presses_its_letter() {
        let (mut session, log) = make_session(SessionConfig::default());
        paste(&mut session).unwrap();
        cut(&mut session).unwrap();
        select_all(&mut session).unwrap();
        undo(&mut session).unwrap();

        let lines = sent(&log);
        let presses: Vec<&String> = lines.iter().filter(|l| l.contains(":PRESS:")).collect();
        assert_eq!(
            presses,
            vec![
                "HID:KEY:PRESS:V",
                "HID:KEY:PRESS:X",
                "HID:KEY:PRESS:A",
                "HID:KEY:PRESS:Z"
            ]
        );
    }

    #[test]
    fn test_composite_failure_can_leave_ctrl_held() {
        let (mut session, log) = make_session(SessionConfig::default());
        session.initialize().unwrap();
        log.set_fail_writes(true);

        assert!(copy(&mut session).is_err());

        // The hold never reached the wire either, but had the failure come
        // one line later the host would keep CTRL held. Callers recover with
        // release_all once the link returns.
        log.set_fail_writes(false);
        release_all(&mut session).unwrap();
        assert_eq!(log.lines().last().map(String::as_str), Some("HID:KEY:RELEASE:ALL"));
    }

    // ── dialect guard ─────────────────────────────────────────────────────────

    #[test]
    fn test_keyboard_functions_drop_on_scancode_session() {
        let (mut session, log) = make_session(SessionConfig::scancode());
        press_key(&mut session, "a").unwrap();
        type_text(&mut session, "hello").unwrap();
        send_combo(&mut session, &[Modifier::Ctrl], "c").unwrap();
        release_all(&mut session).unwrap();
        copy(&mut session).unwrap();
        assert!(log.frames().is_empty());
    }
}
