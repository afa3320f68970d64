//! Infrastructure layer for hidlink-sender.
//!
//! Everything that touches the outside world: the TOML config file, the
//! stdout dry-run transport, and the synthetic motion source. The real
//! serial transport lives in `hidlink-session`; this layer only decides
//! which transport to hand the session.

pub mod config;
pub mod console;
pub mod wave;

pub use config::{load_sender_config, ConfigError, SenderConfig};
pub use console::ConsoleTransport;
pub use wave::WaveSource;
