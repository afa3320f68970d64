//! Application layer for hidlink-sender.
//!
//! Orchestration over the session: the scripted walkthrough and the
//! tilt-to-pointer loop. Both consume a [`hidlink_session::Session`] by
//! mutable reference and know nothing about where its bytes go; the
//! infrastructure layer decides that (real serial port, console dry-run, or
//! recording mock in tests).

pub mod demo;
pub mod tilt;

pub use demo::run_demo;
pub use tilt::{run_tilt_loop, PointerSource, SourceEvent};
