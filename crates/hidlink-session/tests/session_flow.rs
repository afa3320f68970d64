//! End-to-end session flow over the mock transport.
//!
//! Drives a realistic command script through the public API and checks the
//! byte stream a receiver would observe: exact golden lines in order, one
//! init handshake no matter who triggers it, the pacing schedule, and a
//! re-parse of every text frame through the reference parser.

use hidlink_core::{parse_line, KeyChord, Modifier, MouseButton};
use hidlink_session::{
    keyboard, mouse, rawkeys, MockTransport, PauseLog, RecordingPacer, Session, SessionConfig,
    TransportLog, DOUBLE_CLICK_GAP, INIT_SETTLE, LINE_PACING,
};

fn make_session(config: SessionConfig) -> (Session, TransportLog, PauseLog) {
    let (transport, log) = MockTransport::new();
    let (pacer, pauses) = RecordingPacer::new();
    let session = Session::with_pacer(Box::new(transport), config, Box::new(pacer));
    (session, log, pauses)
}

/// The demo script: a bit of everything, including input that must drop.
fn run_script(session: &mut Session) {
    session.ping().expect("ping");
    keyboard::type_text(session, "Hello from the board").expect("type");
    keyboard::press_key(session, "enter").expect("press enter");
    keyboard::press_key(session, "").expect("empty key");
    keyboard::press_key(session, "VOLUME_UP").expect("unknown key");
    keyboard::send_combo(session, &[Modifier::Ctrl, Modifier::Shift], "s").expect("combo");
    keyboard::copy(session).expect("copy");
    for (dx, dy) in [(40, 0), (0, 40), (-40, 0), (0, -40)] {
        mouse::move_by(session, dx, dy).expect("move");
    }
    mouse::double_click(session).expect("double click");
    mouse::scroll(session, 5).expect("scroll up");
    mouse::scroll(session, -5).expect("scroll down");
    mouse::release_all(session).expect("mouse release all");
    keyboard::release_all(session).expect("key release all");
}

const EXPECTED_SCRIPT_LINES: &[&str] = &[
    "HID:INIT:SYSTEM",
    "HID:PING",
    "HID:KEY:TYPE:Hello from the board",
    "HID:KEY:PRESS:ENTER",
    "HID:KEY:COMBO:CTRL+SHIFT+S",
    "HID:KEY:HOLD:CTRL",
    "HID:KEY:PRESS:C",
    "HID:KEY:RELEASE:CTRL",
    "HID:MOUSE:MOVE:40,0",
    "HID:MOUSE:MOVE:0,40",
    "HID:MOUSE:MOVE:-40,0",
    "HID:MOUSE:MOVE:0,-40",
    "HID:MOUSE:CLICK:LEFT",
    "HID:MOUSE:CLICK:LEFT",
    "HID:MOUSE:SCROLL:5",
    "HID:MOUSE:SCROLL:-5",
    "HID:MOUSE:RELEASE:ALL",
    "HID:KEY:RELEASE:ALL",
];

#[test]
fn test_script_produces_exact_wire_log() {
    let (mut session, log, _) = make_session(SessionConfig::default());
    run_script(&mut session);
    assert_eq!(log.lines(), EXPECTED_SCRIPT_LINES);
}

#[test]
fn test_invalid_presses_leave_no_trace() {
    let (mut session, log, _) = make_session(SessionConfig::default());
    run_script(&mut session);

    // The two dropped presses sit between ENTER and the combo; nothing may
    // appear there and the line count must match the valid commands exactly.
    assert_eq!(log.lines().len(), EXPECTED_SCRIPT_LINES.len());
}

#[test]
fn test_every_frame_reparses_through_the_reference_parser() {
    let (mut session, log, _) = make_session(SessionConfig::default());
    run_script(&mut session);

    for frame in log.frames() {
        let text = std::str::from_utf8(&frame).expect("frames are UTF-8");
        let command = parse_line(text).unwrap_or_else(|e| panic!("frame {text:?}: {e}"));
        // Re-encoding must reproduce the frame minus its terminator.
        assert_eq!(
            hidlink_core::encode_line(&command),
            text.trim_end_matches('\n')
        );
    }
}

#[test]
fn test_init_happens_once_regardless_of_entry_point() {
    let (mut session, log, _) = make_session(SessionConfig::default());

    session.initialize().expect("explicit init");
    run_script(&mut session);
    session.initialize().expect("re-init");

    let inits = log
        .lines()
        .iter()
        .filter(|line| *line == "HID:INIT:SYSTEM")
        .count();
    assert_eq!(inits, 1);
}

#[test]
fn test_pacing_schedule_accounts_for_every_line() {
    let (mut session, _, pauses) = make_session(SessionConfig::default());
    run_script(&mut session);

    let recorded = pauses.pauses();
    // The init frame gets the settle delay instead of line pacing; every
    // line after it gets one pacing delay, and the double click adds its gap.
    let paced_lines = EXPECTED_SCRIPT_LINES.len() - 1;
    assert_eq!(recorded.len(), 1 + paced_lines + 1);
    assert_eq!(recorded[0], INIT_SETTLE);
    assert_eq!(recorded.iter().filter(|d| **d == DOUBLE_CLICK_GAP).count(), 1);
    assert_eq!(
        recorded.iter().filter(|d| **d == LINE_PACING).count(),
        paced_lines
    );
}

#[test]
fn test_scancode_flow_shares_lifecycle_and_reparses() {
    let (mut session, log, _) = make_session(SessionConfig::scancode());

    rawkeys::send_string(&mut session, "Hi!").expect("send string");
    rawkeys::press_raw(&mut session, 0x46).expect("print screen");
    rawkeys::release_all(&mut session).expect("release");

    let lines = log.lines();
    assert_eq!(lines[0], "HID:INIT:SYSTEM");
    assert_eq!(
        lines[1..],
        [
            "\u{2}\u{10}\u{b}",  // H: shift prefix + 'h' code
            "\u{10}\u{c}",       // i
            "\u{2}\u{10}\u{1e}", // !: shift prefix + '1' code
            "",                  // release ending the string
            "\u{10}\u{46}",      // press_raw(0x46)
            "",                  // release_all
        ]
    );

    // Every payload line re-parses as a chord.
    for line in &lines[1..] {
        KeyChord::parse_line(line).unwrap_or_else(|e| panic!("chord line {line:?}: {e}"));
    }
}

#[test]
fn test_text_functions_drop_on_scancode_session_and_vice_versa() {
    let (mut session, log, _) = make_session(SessionConfig::scancode());
    keyboard::press_key(&mut session, "a").expect("press");
    mouse::click(&mut session, MouseButton::Left).expect("click");
    assert!(log.frames().is_empty());

    let (mut session, log, _) = make_session(SessionConfig::default());
    rawkeys::send_string(&mut session, "hi").expect("send string");
    assert!(log.frames().is_empty());
}

#[test]
fn test_link_failure_stops_the_stream() {
    let (mut session, log, _) = make_session(SessionConfig::default());
    session.ping().expect("ping");

    log.set_fail_writes(true);
    assert!(keyboard::press_key(&mut session, "a").is_err());

    // Nothing after the failure point.
    assert_eq!(log.lines(), vec!["HID:INIT:SYSTEM", "HID:PING"]);
}
