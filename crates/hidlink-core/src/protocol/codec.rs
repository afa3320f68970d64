//! Line codec for the text dialect of the serial HID link.
//!
//! Wire format, one command per newline-terminated line:
//!
//! ```text
//! HID:<FAMILY>:<ACTION>[:<payload>]
//! ```
//!
//! Fields are separated by `:`, move deltas by `,`, and combo tokens are
//! joined with `+`. The payload of `KEY:TYPE` is literal text, so everything
//! after its third field is kept verbatim, embedded colons included. The one
//! line without the prefix is the scancode-dialect raw press: a DLE escape
//! (`0x10`) followed by the scancode byte.
//!
//! [`encode_line`] is total: every [`HidCommand`] formats to exactly one line
//! of valid UTF-8 with no embedded terminator, because argument validation
//! happened before the command was built. [`parse_line`] is the reference
//! parser; every encoded line re-parses to an equal command.

use crate::keymap::scancode::RAW_ESCAPE;
use crate::keymap::tokens::{Key, Modifier};
use crate::protocol::command::{HidCommand, MouseButton};
use thiserror::Error;

/// Prefix carried by every text-dialect line.
pub const COMMAND_PREFIX: &str = "HID:";

/// Terminator appended to each emitted line.
pub const LINE_TERMINATOR: char = '\n';

/// Errors raised by the reference parser.
#[derive(Debug, Error, PartialEq)]
pub enum WireError {
    /// The line does not start with [`COMMAND_PREFIX`].
    #[error("line does not start with the HID: prefix")]
    MissingPrefix,

    /// The first field names no known command family.
    #[error("unknown command family: {0:?}")]
    UnknownFamily(String),

    /// The second field names no action within its family.
    #[error("unknown {family} action: {action:?}")]
    UnknownAction {
        family: &'static str,
        action: String,
    },

    /// A key token failed validation.
    #[error("invalid key token: {0:?}")]
    InvalidKey(String),

    /// A combo field names no known modifier.
    #[error("invalid modifier token: {0:?}")]
    InvalidModifier(String),

    /// A button field names no known mouse button.
    #[error("invalid mouse button token: {0:?}")]
    InvalidButton(String),

    /// The payload could not be parsed (missing field, bad integer, etc.).
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
}

// ── Encoding ──────────────────────────────────────────────────────────────────

/// Formats a command as one wire line, without the terminator.
pub fn encode_line(command: &HidCommand) -> String {
    match command {
        HidCommand::Init => "HID:INIT:SYSTEM".to_string(),
        HidCommand::Ping => "HID:PING".to_string(),
        HidCommand::KeyType(text) => format!("HID:KEY:TYPE:{text}"),
        HidCommand::KeyPress(key) => format!("HID:KEY:PRESS:{key}"),
        HidCommand::KeyHold(key) => format!("HID:KEY:HOLD:{key}"),
        HidCommand::KeyRelease(key) => format!("HID:KEY:RELEASE:{key}"),
        HidCommand::KeyReleaseAll => "HID:KEY:RELEASE:ALL".to_string(),
        HidCommand::KeyCombo { modifiers, key } => {
            let mut line = String::from("HID:KEY:COMBO:");
            for modifier in modifiers {
                line.push_str(modifier.as_token());
                line.push('+');
            }
            match key {
                Key::Char(c) => line.push(*c),
                Key::Special(s) => line.push_str(s.as_token()),
            }
            line
        }
        HidCommand::MouseMove { dx, dy } => format!("HID:MOUSE:MOVE:{dx},{dy}"),
        HidCommand::MouseClick(button) => format!("HID:MOUSE:CLICK:{button}"),
        HidCommand::MousePress(button) => format!("HID:MOUSE:PRESS:{button}"),
        HidCommand::MouseRelease(button) => format!("HID:MOUSE:RELEASE:{button}"),
        HidCommand::MouseReleaseAll => "HID:MOUSE:RELEASE:ALL".to_string(),
        HidCommand::MouseScroll(amount) => format!("HID:MOUSE:SCROLL:{amount}"),
        HidCommand::RawScancode(code) => {
            let mut line = String::with_capacity(2);
            line.push(RAW_ESCAPE);
            line.push(char::from(*code));
            line
        }
    }
}

// ── Parsing ───────────────────────────────────────────────────────────────────

/// Parses one wire line back into its command.
///
/// Accepts the line with or without its terminator. This is the inverse of
/// [`encode_line`] over every encodable command; lines no encoder produces
/// are rejected rather than guessed at.
///
/// # Errors
///
/// Returns [`WireError`] describing the first field that failed.
pub fn parse_line(line: &str) -> Result<HidCommand, WireError> {
    let line = line.strip_suffix('\n').unwrap_or(line);
    let line = line.strip_suffix('\r').unwrap_or(line);

    if line.starts_with(RAW_ESCAPE) {
        return parse_raw_scancode(line);
    }

    let rest = line
        .strip_prefix(COMMAND_PREFIX)
        .ok_or(WireError::MissingPrefix)?;
    let mut fields = rest.splitn(3, ':');
    let family = fields.next().unwrap_or_default();
    let action = fields.next();
    let payload = fields.next();

    match family {
        "INIT" => match (action, payload) {
            (Some("SYSTEM"), None) => Ok(HidCommand::Init),
            (Some("SYSTEM"), Some(extra)) => Err(WireError::MalformedPayload(format!(
                "unexpected field after INIT:SYSTEM: {extra:?}"
            ))),
            (Some(other), _) => Err(WireError::UnknownAction {
                family: "INIT",
                action: other.to_string(),
            }),
            (None, _) => Err(WireError::MalformedPayload("INIT without target".into())),
        },
        "PING" => match action {
            None => Ok(HidCommand::Ping),
            Some(extra) => Err(WireError::MalformedPayload(format!(
                "unexpected field after PING: {extra:?}"
            ))),
        },
        "KEY" => parse_key_action(action, payload),
        "MOUSE" => parse_mouse_action(action, payload),
        other => Err(WireError::UnknownFamily(other.to_string())),
    }
}

fn parse_raw_scancode(line: &str) -> Result<HidCommand, WireError> {
    let mut chars = line.chars();
    chars.next(); // the escape itself
    let code = chars
        .next()
        .ok_or_else(|| WireError::MalformedPayload("raw-scancode escape with no scancode".into()))?;
    if chars.next().is_some() {
        return Err(WireError::MalformedPayload(
            "trailing input after raw scancode".into(),
        ));
    }
    let value = code as u32;
    if value > 0xFF {
        return Err(WireError::MalformedPayload(format!(
            "scancode out of range: U+{value:04X}"
        )));
    }
    Ok(HidCommand::RawScancode(value as u8))
}

fn parse_key_action(
    action: Option<&str>,
    payload: Option<&str>,
) -> Result<HidCommand, WireError> {
    let action = action.ok_or_else(|| WireError::MalformedPayload("KEY without action".into()))?;
    let payload = match payload {
        Some(p) => p,
        None => {
            return Err(WireError::MalformedPayload(format!(
                "KEY:{action} without payload"
            )))
        }
    };
    match action {
        "TYPE" => Ok(HidCommand::KeyType(payload.to_string())),
        "PRESS" => parse_key_token(payload).map(HidCommand::KeyPress),
        "HOLD" => parse_key_token(payload).map(HidCommand::KeyHold),
        "RELEASE" => {
            if payload == "ALL" {
                Ok(HidCommand::KeyReleaseAll)
            } else {
                parse_key_token(payload).map(HidCommand::KeyRelease)
            }
        }
        "COMBO" => parse_combo(payload),
        other => Err(WireError::UnknownAction {
            family: "KEY",
            action: other.to_string(),
        }),
    }
}

fn parse_mouse_action(
    action: Option<&str>,
    payload: Option<&str>,
) -> Result<HidCommand, WireError> {
    let action =
        action.ok_or_else(|| WireError::MalformedPayload("MOUSE without action".into()))?;
    let payload = match payload {
        Some(p) => p,
        None => {
            return Err(WireError::MalformedPayload(format!(
                "MOUSE:{action} without payload"
            )))
        }
    };
    match action {
        "MOVE" => {
            let (dx, dy) = payload.split_once(',').ok_or_else(|| {
                WireError::MalformedPayload(format!("MOVE payload without comma: {payload:?}"))
            })?;
            let dx = parse_delta(dx)?;
            let dy = parse_delta(dy)?;
            Ok(HidCommand::MouseMove { dx, dy })
        }
        "CLICK" => parse_button_token(payload).map(HidCommand::MouseClick),
        "PRESS" => parse_button_token(payload).map(HidCommand::MousePress),
        "RELEASE" => {
            if payload == "ALL" {
                Ok(HidCommand::MouseReleaseAll)
            } else {
                parse_button_token(payload).map(HidCommand::MouseRelease)
            }
        }
        "SCROLL" => parse_delta(payload).map(HidCommand::MouseScroll),
        other => Err(WireError::UnknownAction {
            family: "MOUSE",
            action: other.to_string(),
        }),
    }
}

/// Splits a combo payload into its modifier list and final key token.
///
/// The key is everything after the last separator, with one wrinkle: a key
/// that is itself the `+` character leaves the payload ending in `+`, so a
/// trailing separator pair (`…++`) or a lone `+` resolves to that key.
fn parse_combo(payload: &str) -> Result<HidCommand, WireError> {
    let (mods_str, key_token): (&str, &str) = if let Some(head) = payload.strip_suffix('+') {
        if head.is_empty() {
            ("", "+")
        } else if let Some(mods) = head.strip_suffix('+') {
            if mods.is_empty() {
                return Err(WireError::MalformedPayload(format!(
                    "malformed combo: {payload:?}"
                )));
            }
            (mods, "+")
        } else {
            return Err(WireError::MalformedPayload(format!(
                "combo ends with separator: {payload:?}"
            )));
        }
    } else if let Some((mods, key)) = payload.rsplit_once('+') {
        (mods, key)
    } else {
        ("", payload)
    };

    let mut modifiers = Vec::new();
    if !mods_str.is_empty() {
        for token in mods_str.split('+') {
            let modifier = Modifier::from_token(token)
                .ok_or_else(|| WireError::InvalidModifier(token.to_string()))?;
            modifiers.push(modifier);
        }
    }
    let key = parse_key_token(key_token)?;
    Ok(HidCommand::KeyCombo { modifiers, key })
}

fn parse_key_token(token: &str) -> Result<Key, WireError> {
    Key::parse(token).ok_or_else(|| WireError::InvalidKey(token.to_string()))
}

fn parse_button_token(token: &str) -> Result<MouseButton, WireError> {
    MouseButton::from_token(token).ok_or_else(|| WireError::InvalidButton(token.to_string()))
}

fn parse_delta(field: &str) -> Result<i32, WireError> {
    field
        .parse::<i32>()
        .map_err(|e| WireError::MalformedPayload(format!("bad integer {field:?}: {e}")))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
