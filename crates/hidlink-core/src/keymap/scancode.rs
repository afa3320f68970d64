//! Scancode dialect: key chords as control-byte sequences.
//!
//! The text dialect names keys with readable tokens; this older dialect ships
//! USB HID scancodes instead. One wire line carries one *chord*:
//!
//! ```text
//! [modifier mask byte] [0x10] [scancode byte]
//! ```
//!
//! Both parts are optional; the empty line is the release-all chord. The
//! `0x10` (DLE) byte escapes the scancode that follows it, and a leading byte
//! other than `0x10` is the combined modifier mask.
//!
//! # What is a scancode? (for beginners)
//!
//! USB keyboards do not send characters; they send *scancodes*, position
//! numbers from the USB HID usage table (page 0x07). Letter keys start at
//! 0x04 (`A`), digits `1`..`9` run from 0x1E, and a shifted symbol such as
//! `!` is the digit key's scancode plus the shift bit in the modifier mask.
//! [`ascii_to_chord`] holds the full printable-ASCII table; characters with
//! no entry (control characters, anything beyond `~`) have no chord.
//!
//! [`chords_for_string`] compiles a caller string into the chord sequence the
//! original firmware produced: embedded prefix bytes `0x01..=0x08` accumulate
//! modifiers for the next key, an embedded `0x10` escapes a raw scancode, a
//! repeated identical scancode gets a release chord between the presses, and
//! every sequence ends with a release chord.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// DLE escape introducing a raw scancode byte, both inside caller strings and
/// on the wire.
pub const RAW_ESCAPE: char = '\u{10}';

// ── Modifier mask ─────────────────────────────────────────────────────────────

/// USB HID boot-report modifier bitmask.
///
/// Bit layout (the wire's prefix byte `n` sets bit `n - 1`):
/// - Bit 0: Left Ctrl
/// - Bit 1: Left Shift
/// - Bit 2: Left Alt
/// - Bit 3: Left GUI (Windows/Command)
/// - Bit 4: Right Ctrl
/// - Bit 5: Right Shift
/// - Bit 6: Right Alt
/// - Bit 7: Right GUI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ModifierMask(pub u8);

impl ModifierMask {
    pub const LEFT_CTRL: u8 = 1 << 0;
    pub const LEFT_SHIFT: u8 = 1 << 1;
    pub const LEFT_ALT: u8 = 1 << 2;
    pub const LEFT_GUI: u8 = 1 << 3;
    pub const RIGHT_CTRL: u8 = 1 << 4;
    pub const RIGHT_SHIFT: u8 = 1 << 5;
    pub const RIGHT_ALT: u8 = 1 << 6;
    pub const RIGHT_GUI: u8 = 1 << 7;

    /// Returns `true` if no modifier bit is set.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if either Ctrl modifier is active.
    pub fn ctrl(&self) -> bool {
        self.0 & (Self::LEFT_CTRL | Self::RIGHT_CTRL) != 0
    }

    /// Returns `true` if either Shift modifier is active.
    pub fn shift(&self) -> bool {
        self.0 & (Self::LEFT_SHIFT | Self::RIGHT_SHIFT) != 0
    }

    /// Returns `true` if either Alt modifier is active.
    pub fn alt(&self) -> bool {
        self.0 & (Self::LEFT_ALT | Self::RIGHT_ALT) != 0
    }

    /// Returns `true` if either GUI (Windows/Command) modifier is active.
    pub fn gui(&self) -> bool {
        self.0 & (Self::LEFT_GUI | Self::RIGHT_GUI) != 0
    }
}

// ── Chords ────────────────────────────────────────────────────────────────────

/// Errors raised when parsing a chord line.
#[derive(Debug, Error, PartialEq)]
pub enum ChordError {
    /// A `0x10` escape was not followed by a scancode byte.
    #[error("raw-scancode escape with no scancode byte")]
    MissingScancode,

    /// A mask or scancode position held a character above `0xFF`.
    #[error("chord byte out of range: U+{0:04X}")]
    ByteOutOfRange(u32),

    /// Extra characters after a complete chord.
    #[error("trailing input after chord")]
    TrailingInput,
}

/// One line of the scancode dialect: held modifiers plus at most one key.
///
/// The empty chord (`release_all`) clears every held key and modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KeyChord {
    /// Modifiers held for this chord.
    pub modifiers: ModifierMask,
    /// Scancode pressed, if any.
    pub code: Option<u8>,
}

impl KeyChord {
    /// The empty chord: release every held key and modifier.
    pub fn release_all() -> KeyChord {
        KeyChord::default()
    }

    /// A bare key press with no modifiers.
    pub fn pressed(code: u8) -> KeyChord {
        KeyChord {
            modifiers: ModifierMask::default(),
            code: Some(code),
        }
    }

    /// A key press with held modifiers.
    pub fn with_modifiers(modifiers: ModifierMask, code: u8) -> KeyChord {
        KeyChord {
            modifiers,
            code: Some(code),
        }
    }

    /// Returns `true` for the release-all chord.
    pub fn is_release(&self) -> bool {
        self.modifiers.is_empty() && self.code.is_none()
    }

    /// Formats this chord as one wire line (without the terminator).
    ///
    /// A mask of exactly `0x10` with no scancode collides with the raw
    /// escape on this wire format; the collision is inherited from the
    /// original byte layout.
    pub fn to_line(&self) -> String {
        let mut line = String::new();
        if !self.modifiers.is_empty() {
            line.push(char::from(self.modifiers.0));
        }
        if let Some(code) = self.code {
            line.push(RAW_ESCAPE);
            line.push(char::from(code));
        }
        line
    }

    /// Parses one chord line (terminator already stripped or still attached).
    pub fn parse_line(line: &str) -> Result<KeyChord, ChordError> {
        let line = line.strip_suffix('\n').unwrap_or(line);
        let line = line.strip_suffix('\r').unwrap_or(line);

        let mut chars = line.chars().peekable();
        let mut chord = KeyChord::default();

        if let Some(&c) = chars.peek() {
            if c != RAW_ESCAPE {
                let value = c as u32;
                if value > 0xFF {
                    return Err(ChordError::ByteOutOfRange(value));
                }
                chord.modifiers = ModifierMask(value as u8);
                chars.next();
            }
        }
        if let Some(&c) = chars.peek() {
            if c != RAW_ESCAPE {
                return Err(ChordError::TrailingInput);
            }
            chars.next();
            let code = chars.next().ok_or(ChordError::MissingScancode)?;
            let value = code as u32;
            if value > 0xFF {
                return Err(ChordError::ByteOutOfRange(value));
            }
            chord.code = Some(value as u8);
        }
        if chars.next().is_some() {
            return Err(ChordError::TrailingInput);
        }
        Ok(chord)
    }
}

// ── ASCII translation table ───────────────────────────────────────────────────

/// Translates one printable ASCII character into its chord.
///
/// Returns `None` for characters with no scancode (control characters, DEL,
/// anything outside ASCII).
pub fn ascii_to_chord(c: char) -> Option<KeyChord> {
    let (code, shift) = match c {
        ' ' => (0x2C, false),
        '!' => (0x1E, true),
        '"' => (0x34, true),
        '#' => (0x20, true),
        '$' => (0x21, true),
        '%' => (0x22, true),
        '&' => (0x24, true),
        '\'' => (0x34, false),
        '(' => (0x26, true),
        ')' => (0x27, true),
        '*' => (0x25, true),
        '+' => (0x2E, true),
        ',' => (0x36, false),
        '-' => (0x2D, false),
        '.' => (0x37, false),
        '/' => (0x38, false),
        '0' => (0x27, false),
        '1'..='9' => (0x1E + (c as u8 - b'1'), false),
        ':' => (0x33, true),
        ';' => (0x33, false),
        '<' => (0x36, true),
        '=' => (0x2E, false),
        '>' => (0x37, true),
        '?' => (0x38, true),
        '@' => (0x1F, true),
        'A'..='Z' => (0x04 + (c as u8 - b'A'), true),
        '[' => (0x2F, false),
        '\\' => (0x31, false),
        ']' => (0x30, false),
        '^' => (0x23, true),
        '_' => (0x2D, true),
        '`' => (0x35, false),
        'a'..='z' => (0x04 + (c as u8 - b'a'), false),
        '{' => (0x2F, true),
        '|' => (0x31, true),
        '}' => (0x30, true),
        '~' => (0x35, true),
        _ => return None,
    };
    let modifiers = if shift {
        ModifierMask(ModifierMask::LEFT_SHIFT)
    } else {
        ModifierMask::default()
    };
    Some(KeyChord {
        modifiers,
        code: Some(code),
    })
}

// ── String compilation ────────────────────────────────────────────────────────

/// Compiles a caller string into the chord sequence to transmit.
///
/// Embedded bytes `0x01..=0x08` accumulate modifier bits (byte `n` sets bit
/// `n - 1`) for the key that follows; an embedded [`RAW_ESCAPE`] takes the
/// next character as a raw scancode. A repeated identical scancode gets a
/// release chord inserted so the receiver registers two presses, and the
/// sequence always ends with a release chord. The empty string compiles to a
/// single release chord.
pub fn chords_for_string(text: &str) -> Vec<KeyChord> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return vec![KeyChord::release_all()];
    }

    let mut out = Vec::new();
    let mut last_code: u8 = 0;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c >= ' ' {
            let (modifiers, code) = match ascii_to_chord(c) {
                Some(chord) => (chord.modifiers, chord.code.unwrap_or(0)),
                None => (ModifierMask::default(), 0),
            };
            // Same scancode twice in a row would read as one long press.
            if code == last_code {
                out.push(KeyChord::release_all());
            }
            out.push(KeyChord {
                modifiers,
                code: (code != 0).then_some(code),
            });
            last_code = code;
            i += 1;
        } else {
            let mut modifiers = ModifierMask::default();
            while i < chars.len() {
                let b = chars[i] as u32;
                if (1..=8).contains(&b) {
                    modifiers.0 |= 1 << (b - 1);
                    i += 1;
                } else {
                    break;
                }
            }
            let mut code: u8 = 0;
            if i < chars.len() {
                if chars[i] == RAW_ESCAPE {
                    i += 1;
                    if i < chars.len() {
                        code = (chars[i] as u32).min(0xFF) as u8;
                        i += 1;
                    }
                } else {
                    if let Some(chord) = ascii_to_chord(chars[i]) {
                        modifiers.0 |= chord.modifiers.0;
                        code = chord.code.unwrap_or(0);
                    }
                    i += 1;
                }
                out.push(KeyChord {
                    modifiers,
                    code: (code != 0).then_some(code),
                });
            }
            last_code = code;
        }
    }

    out.push(KeyChord::release_all());
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_chords() {
        assert_eq!(ascii_to_chord('a'), Some(KeyChord::pressed(0x04)));
        assert_eq!(ascii_to_chord('z'), Some(KeyChord::pressed(0x1D)));
        assert_eq!(
            ascii_to_chord('A'),
            Some(KeyChord::with_modifiers(
                ModifierMask(ModifierMask::LEFT_SHIFT),
                0x04
            ))
        );
    }

    #[test]
    fn test_digit_chords() {
        assert_eq!(ascii_to_chord('1'), Some(KeyChord::pressed(0x1E)));
        assert_eq!(ascii_to_chord('9'), Some(KeyChord::pressed(0x26)));
        assert_eq!(ascii_to_chord('0'), Some(KeyChord::pressed(0x27)));
    }

    #[test]
    fn test_symbol_chords_use_shift_table() {
        // '!' is shift + the '1' key; '\'' shares the quote key unshifted.
        assert_eq!(
            ascii_to_chord('!'),
            Some(KeyChord::with_modifiers(
                ModifierMask(ModifierMask::LEFT_SHIFT),
                0x1E
            ))
        );
        assert_eq!(ascii_to_chord('\''), Some(KeyChord::pressed(0x34)));
        assert_eq!(
            ascii_to_chord('~'),
            Some(KeyChord::with_modifiers(
                ModifierMask(ModifierMask::LEFT_SHIFT),
                0x35
            ))
        );
        assert_eq!(ascii_to_chord(';'), Some(KeyChord::pressed(0x33)));
    }

    #[test]
    fn test_unmapped_characters_have_no_chord() {
        assert_eq!(ascii_to_chord('\u{7}'), None);
        assert_eq!(ascii_to_chord('\u{7f}'), None);
        assert_eq!(ascii_to_chord('€'), None);
    }

    #[test]
    fn test_chord_line_encoding() {
        let shift_s = KeyChord::with_modifiers(ModifierMask(ModifierMask::LEFT_SHIFT), 0x16);
        assert_eq!(shift_s.to_line(), "\u{2}\u{10}\u{16}");
        assert_eq!(KeyChord::pressed(0x04).to_line(), "\u{10}\u{4}");
        assert_eq!(KeyChord::release_all().to_line(), "");
    }

    #[test]
    fn test_chord_line_round_trip() {
        let chords = [
            KeyChord::release_all(),
            KeyChord::pressed(0x28),
            KeyChord::with_modifiers(ModifierMask(ModifierMask::LEFT_SHIFT), 0x16),
            KeyChord::with_modifiers(
                ModifierMask(ModifierMask::LEFT_CTRL | ModifierMask::LEFT_ALT),
                0x4C,
            ),
            KeyChord {
                modifiers: ModifierMask(ModifierMask::LEFT_GUI),
                code: None,
            },
        ];
        for chord in chords {
            assert_eq!(KeyChord::parse_line(&chord.to_line()), Ok(chord));
        }
    }

    #[test]
    fn test_chord_parse_rejects_dangling_escape() {
        assert_eq!(
            KeyChord::parse_line("\u{10}"),
            Err(ChordError::MissingScancode)
        );
    }

    #[test]
    fn test_chord_parse_rejects_trailing_input() {
        assert_eq!(
            KeyChord::parse_line("\u{2}\u{10}\u{16}x"),
            Err(ChordError::TrailingInput)
        );
    }

    #[test]
    fn test_empty_string_compiles_to_release_all() {
        assert_eq!(chords_for_string(""), vec![KeyChord::release_all()]);
    }

    #[test]
    fn test_simple_string_ends_with_release() {
        let chords = chords_for_string("hi");
        assert_eq!(
            chords,
            vec![
                KeyChord::pressed(0x0B),
                KeyChord::pressed(0x0C),
                KeyChord::release_all(),
            ]
        );
    }

    #[test]
    fn test_repeated_key_gets_release_between_presses() {
        let chords = chords_for_string("oo");
        assert_eq!(
            chords,
            vec![
                KeyChord::pressed(0x12),
                KeyChord::release_all(),
                KeyChord::pressed(0x12),
                KeyChord::release_all(),
            ]
        );
    }

    #[test]
    fn test_modifier_prefix_applies_to_next_key() {
        // 0x01 = Left Ctrl prefix, then 'c'.
        let chords = chords_for_string("\u{1}c");
        assert_eq!(
            chords,
            vec![
                KeyChord::with_modifiers(ModifierMask(ModifierMask::LEFT_CTRL), 0x06),
                KeyChord::release_all(),
            ]
        );
    }

    #[test]
    fn test_shifted_key_merges_shift_into_prefix_mask() {
        let chords = chords_for_string("\u{1}C");
        assert_eq!(
            chords[0],
            KeyChord::with_modifiers(
                ModifierMask(ModifierMask::LEFT_CTRL | ModifierMask::LEFT_SHIFT),
                0x06
            )
        );
    }

    #[test]
    fn test_raw_escape_takes_literal_scancode() {
        let chords = chords_for_string("\u{10}\u{46}");
        assert_eq!(
            chords,
            vec![KeyChord::pressed(0x46), KeyChord::release_all()]
        );
    }

    #[test]
    fn test_stacked_modifier_prefixes_accumulate() {
        // Ctrl (0x01) + Alt (0x03) prefixes before 'd'.
        let chords = chords_for_string("\u{1}\u{3}d");
        assert_eq!(
            chords[0],
            KeyChord::with_modifiers(
                ModifierMask(ModifierMask::LEFT_CTRL | ModifierMask::LEFT_ALT),
                0x07
            )
        );
    }

    #[test]
    fn test_modifier_mask_predicates() {
        let mask = ModifierMask(ModifierMask::LEFT_CTRL | ModifierMask::RIGHT_SHIFT);
        assert!(mask.ctrl());
        assert!(mask.shift());
        assert!(!mask.alt());
        assert!(!mask.gui());
        assert!(ModifierMask::default().is_empty());
    }
}
