//! All serial HID link command types.
//!
//! One command is one line on the wire. The canonical text dialect spells
//! every command as colon-separated upper-case ASCII fields behind the
//! `HID:` prefix; the exact line grammar lives in
//! [`crate::protocol::codec`].

use crate::keymap::tokens::{Key, Modifier};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    /// Canonical wire spelling of this button.
    pub fn as_token(&self) -> &'static str {
        match self {
            MouseButton::Left => "LEFT",
            MouseButton::Right => "RIGHT",
            MouseButton::Middle => "MIDDLE",
        }
    }

    /// Looks up a button token case-insensitively.
    pub fn from_token(token: &str) -> Option<MouseButton> {
        match token.to_uppercase().as_str() {
            "LEFT" => Some(MouseButton::Left),
            "RIGHT" => Some(MouseButton::Right),
            "MIDDLE" => Some(MouseButton::Middle),
            _ => None,
        }
    }
}

impl fmt::Display for MouseButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

/// All valid link commands, one wire line each.
///
/// Move and scroll magnitudes are carried verbatim: the receiver's nominal
/// range is a signed byte, but values are passed through unclamped and
/// unvalidated, matching the loose contract of the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HidCommand {
    /// `HID:INIT:SYSTEM` – one-time handshake after opening the link.
    Init,
    /// `HID:PING` – fire-and-forget liveness probe.
    Ping,
    /// `HID:KEY:TYPE:<text>` – type a literal string; passed through unescaped.
    KeyType(String),
    /// `HID:KEY:PRESS:<KEY>` – tap a key (press and release).
    KeyPress(Key),
    /// `HID:KEY:HOLD:<KEY>` – press a key and leave it held.
    KeyHold(Key),
    /// `HID:KEY:RELEASE:<KEY>` – release one held key.
    KeyRelease(Key),
    /// `HID:KEY:RELEASE:ALL` – release every held key.
    KeyReleaseAll,
    /// `HID:KEY:COMBO:<MOD+…+KEY>` – modifiers in caller order, then the key.
    KeyCombo {
        modifiers: Vec<Modifier>,
        key: Key,
    },
    /// `HID:MOUSE:MOVE:<dx>,<dy>` – relative pointer move.
    MouseMove { dx: i32, dy: i32 },
    /// `HID:MOUSE:CLICK:<BUTTON>` – press and release a button.
    MouseClick(MouseButton),
    /// `HID:MOUSE:PRESS:<BUTTON>` – press a button and leave it held.
    MousePress(MouseButton),
    /// `HID:MOUSE:RELEASE:<BUTTON>` – release one held button.
    MouseRelease(MouseButton),
    /// `HID:MOUSE:RELEASE:ALL` – release every held button.
    MouseReleaseAll,
    /// `HID:MOUSE:SCROLL:<amount>` – vertical scroll, sign passed through.
    MouseScroll(i32),
    /// Scancode-dialect raw key press: a 2-byte DLE escape, the one line form
    /// without the `HID:` prefix.
    RawScancode(u8),
}
