//! Key and modifier token vocabulary for the text dialect.
//!
//! The wire names keys with upper-case ASCII tokens (`ENTER`, `PAGE_UP`, `F5`).
//! This module owns the approved token set and the validation rule that gates
//! every key argument before it can reach the wire.
//!
//! # The validation rule
//!
//! A caller-supplied key string is valid when it is non-empty and either
//!
//! 1. exactly one character long (any printable character is a key), or
//! 2. its upper-cased form is a member of the approved special-key set.
//!
//! Everything else is invalid and the encoders drop it without emitting a
//! line.  Validation never mutates the caller's string; canonicalization to
//! upper-case happens only when the token is placed into a command.
//!
//! Note that `ESC` and `ESCAPE` are both approved and stay distinct on the
//! wire, and that the modifier names (`SHIFT`, `CTRL`, `ALT`, `WIN`, `CMD`)
//! double as discrete pressable keys.

use serde::{Deserialize, Serialize};
use std::fmt;

// ── Special keys ──────────────────────────────────────────────────────────────

/// A named key from the approved token set.
///
/// The variant order mirrors the approved list; the wire token for each
/// variant comes from [`SpecialKey::as_token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecialKey {
    Enter,
    Space,
    Tab,
    Esc,
    Escape,
    Delete,
    Backspace,
    Shift,
    Ctrl,
    Alt,
    Win,
    Cmd,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
}

impl SpecialKey {
    /// Canonical wire spelling of this key.
    pub fn as_token(&self) -> &'static str {
        match self {
            SpecialKey::Enter => "ENTER",
            SpecialKey::Space => "SPACE",
            SpecialKey::Tab => "TAB",
            SpecialKey::Esc => "ESC",
            SpecialKey::Escape => "ESCAPE",
            SpecialKey::Delete => "DELETE",
            SpecialKey::Backspace => "BACKSPACE",
            SpecialKey::Shift => "SHIFT",
            SpecialKey::Ctrl => "CTRL",
            SpecialKey::Alt => "ALT",
            SpecialKey::Win => "WIN",
            SpecialKey::Cmd => "CMD",
            SpecialKey::Up => "UP",
            SpecialKey::Down => "DOWN",
            SpecialKey::Left => "LEFT",
            SpecialKey::Right => "RIGHT",
            SpecialKey::Home => "HOME",
            SpecialKey::End => "END",
            SpecialKey::PageUp => "PAGE_UP",
            SpecialKey::PageDown => "PAGE_DOWN",
            SpecialKey::F1 => "F1",
            SpecialKey::F2 => "F2",
            SpecialKey::F3 => "F3",
            SpecialKey::F4 => "F4",
            SpecialKey::F5 => "F5",
            SpecialKey::F6 => "F6",
            SpecialKey::F7 => "F7",
            SpecialKey::F8 => "F8",
            SpecialKey::F9 => "F9",
            SpecialKey::F10 => "F10",
            SpecialKey::F11 => "F11",
            SpecialKey::F12 => "F12",
        }
    }

    /// Looks up a token case-insensitively. Returns `None` for anything
    /// outside the approved set.
    pub fn from_token(token: &str) -> Option<SpecialKey> {
        match token.to_uppercase().as_str() {
            "ENTER" => Some(SpecialKey::Enter),
            "SPACE" => Some(SpecialKey::Space),
            "TAB" => Some(SpecialKey::Tab),
            "ESC" => Some(SpecialKey::Esc),
            "ESCAPE" => Some(SpecialKey::Escape),
            "DELETE" => Some(SpecialKey::Delete),
            "BACKSPACE" => Some(SpecialKey::Backspace),
            "SHIFT" => Some(SpecialKey::Shift),
            "CTRL" => Some(SpecialKey::Ctrl),
            "ALT" => Some(SpecialKey::Alt),
            "WIN" => Some(SpecialKey::Win),
            "CMD" => Some(SpecialKey::Cmd),
            "UP" => Some(SpecialKey::Up),
            "DOWN" => Some(SpecialKey::Down),
            "LEFT" => Some(SpecialKey::Left),
            "RIGHT" => Some(SpecialKey::Right),
            "HOME" => Some(SpecialKey::Home),
            "END" => Some(SpecialKey::End),
            "PAGE_UP" => Some(SpecialKey::PageUp),
            "PAGE_DOWN" => Some(SpecialKey::PageDown),
            "F1" => Some(SpecialKey::F1),
            "F2" => Some(SpecialKey::F2),
            "F3" => Some(SpecialKey::F3),
            "F4" => Some(SpecialKey::F4),
            "F5" => Some(SpecialKey::F5),
            "F6" => Some(SpecialKey::F6),
            "F7" => Some(SpecialKey::F7),
            "F8" => Some(SpecialKey::F8),
            "F9" => Some(SpecialKey::F9),
            "F10" => Some(SpecialKey::F10),
            "F11" => Some(SpecialKey::F11),
            "F12" => Some(SpecialKey::F12),
            _ => None,
        }
    }
}

impl fmt::Display for SpecialKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

// ── Keys ──────────────────────────────────────────────────────────────────────

/// A validated, canonical key: a single character or an approved special key.
///
/// A `Key` only ever exists in transmission form (characters upper-cased,
/// special tokens resolved), so formatting one is infallible and re-parsing a
/// formatted key yields an equal value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Any single printable character.
    Char(char),
    /// A member of the approved special-key set.
    Special(SpecialKey),
}

impl Key {
    /// Validates a raw caller string and returns the canonical key.
    ///
    /// Implements the rule from the module docs: one-character strings are
    /// always keys (upper-cased for transmission); longer strings must match
    /// the approved set case-insensitively. Returns `None` for everything
    /// else, including the empty string.
    pub fn parse(raw: &str) -> Option<Key> {
        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (None, _) => None,
            (Some(c), None) => Some(Key::Char(canonical_char(c))),
            _ => SpecialKey::from_token(raw).map(Key::Special),
        }
    }

    /// Canonical character key. Single characters are always valid, so this
    /// needs no `Option`.
    pub fn from_char(c: char) -> Key {
        Key::Char(canonical_char(c))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(c) => write!(f, "{c}"),
            Key::Special(s) => f.write_str(s.as_token()),
        }
    }
}

/// Upper-cases a single character for transmission. Characters whose
/// upper-case form expands to multiple characters (e.g. `ß`) are kept
/// unchanged so a key stays a single character.
fn canonical_char(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

// ── Modifiers ─────────────────────────────────────────────────────────────────

/// A combo modifier token.
///
/// Left/right-specific modifiers exist only in the scancode dialect's mask
/// (see [`crate::keymap::scancode::ModifierMask`]); the text dialect names
/// the neutral form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modifier {
    Ctrl,
    Shift,
    Alt,
    Win,
    Cmd,
}

impl Modifier {
    /// Canonical wire spelling of this modifier.
    pub fn as_token(&self) -> &'static str {
        match self {
            Modifier::Ctrl => "CTRL",
            Modifier::Shift => "SHIFT",
            Modifier::Alt => "ALT",
            Modifier::Win => "WIN",
            Modifier::Cmd => "CMD",
        }
    }

    /// Looks up a modifier token case-insensitively.
    pub fn from_token(token: &str) -> Option<Modifier> {
        match token.to_uppercase().as_str() {
            "CTRL" => Some(Modifier::Ctrl),
            "SHIFT" => Some(Modifier::Shift),
            "ALT" => Some(Modifier::Alt),
            "WIN" => Some(Modifier::Win),
            "CMD" => Some(Modifier::Cmd),
            _ => None,
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
