//! TOML configuration for the sender binary.
//!
//! Loads `SenderConfig` from a TOML file, falling back to defaults when the
//! file does not exist so the demo runs out of the box. CLI flags override
//! individual fields afterwards (see `main.rs`); the file is never written
//! back.
//!
//! # Example config
//!
//! ```toml
//! [link]
//! port = "/dev/ttyACM0"
//! baud = 9600
//! dialect = "text"
//! type_mode = "whole-string"
//!
//! [motion]
//! speed = 4
//! move_threshold = 150
//! scroll_threshold = 200
//! sample_interval_ms = 50
//! ```
//!
//! Fields annotated with `#[serde(default = "...")]` fall back to their
//! defaults when absent, so a partial file (or none at all) still yields a
//! complete configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use hidlink_session::{BaudRate, Dialect, SessionConfig, TypeTextMode};

use crate::domain::TiltMapper;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A file system error other than "not found".
    #[error("I/O error reading config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configured baud rate is not one the protocol supports.
    #[error("unsupported baud rate {0} (supported: 9600, 115200)")]
    UnsupportedBaud(u32),
}

// ── Config schema ─────────────────────────────────────────────────────────────

/// Top-level sender configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SenderConfig {
    #[serde(default)]
    pub link: LinkConfig,
    #[serde(default)]
    pub motion: MotionConfig,
}

/// Serial link settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinkConfig {
    /// Serial device path of the receiver link.
    #[serde(default = "default_port")]
    pub port: String,
    /// Link baud rate; must be 9600 or 115200.
    #[serde(default = "default_baud")]
    pub baud: u32,
    /// Wire dialect: `"text"` or `"scancode"`.
    #[serde(default)]
    pub dialect: Dialect,
    /// Typing mode: `"whole-string"` or `"per-key"`.
    #[serde(default)]
    pub type_mode: TypeTextMode,
}

/// Tilt loop settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MotionConfig {
    /// Maximum pointer delta per sample.
    #[serde(default = "default_speed")]
    pub speed: i32,
    /// Dead zone for pointer movement, milli-g.
    #[serde(default = "default_move_threshold")]
    pub move_threshold: i32,
    /// Dead zone for scrolling, milli-g.
    #[serde(default = "default_scroll_threshold")]
    pub scroll_threshold: i32,
    /// Interval between synthetic samples.
    #[serde(default = "default_sample_interval_ms")]
    pub sample_interval_ms: u64,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_port() -> String {
    "/dev/ttyACM0".to_string()
}
fn default_baud() -> u32 {
    9_600
}
fn default_speed() -> i32 {
    4
}
fn default_move_threshold() -> i32 {
    150
}
fn default_scroll_threshold() -> i32 {
    200
}
fn default_sample_interval_ms() -> u64 {
    50
}

impl Default for SenderConfig {
    fn default() -> Self {
        Self {
            link: LinkConfig::default(),
            motion: MotionConfig::default(),
        }
    }
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            baud: default_baud(),
            dialect: Dialect::default(),
            type_mode: TypeTextMode::default(),
        }
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            speed: default_speed(),
            move_threshold: default_move_threshold(),
            scroll_threshold: default_scroll_threshold(),
            sample_interval_ms: default_sample_interval_ms(),
        }
    }
}

impl SenderConfig {
    /// Builds the session configuration, validating the baud rate.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedBaud`] for rates the protocol does
    /// not define.
    pub fn session_config(&self) -> Result<SessionConfig, ConfigError> {
        let baud = BaudRate::from_u32(self.link.baud)
            .ok_or(ConfigError::UnsupportedBaud(self.link.baud))?;
        Ok(SessionConfig {
            baud,
            dialect: self.link.dialect,
            type_mode: self.link.type_mode,
            ..SessionConfig::default()
        })
    }

    /// The tilt mapper configured by `[motion]`.
    pub fn mapper(&self) -> TiltMapper {
        TiltMapper::new(
            self.motion.speed,
            self.motion.move_threshold,
            self.motion.scroll_threshold,
        )
    }

    /// The synthetic source's sampling interval.
    pub fn sample_interval(&self) -> Duration {
        Duration::from_millis(self.motion.sample_interval_ms)
    }
}

/// Loads the sender config from `path`, returning defaults if the file does
/// not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_sender_config(path: &Path) -> Result<SenderConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let cfg: SenderConfig = toml::from_str(&content)?;
            Ok(cfg)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(SenderConfig::default()),
        Err(e) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
