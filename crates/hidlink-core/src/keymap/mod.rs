//! Key vocabulary tables for both wire dialects.
//!
//! The text dialect names keys with upper-case tokens ([`tokens`]); the
//! scancode dialect ships USB HID position codes as control-byte chords
//! ([`scancode`]). The two never mix within a line.

pub mod scancode;
pub mod tokens;

pub use scancode::{ascii_to_chord, chords_for_string, KeyChord, ModifierMask};
pub use tokens::{Key, Modifier, SpecialKey};
