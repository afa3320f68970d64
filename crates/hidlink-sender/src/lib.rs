//! hidlink-sender library crate.
//!
//! This crate drives a `hidlink-session` from the sending side: it maps raw
//! motion samples to pointer commands and runs scripted walkthroughs of the
//! whole command set, over either a real serial port or a stdout dry run.
//!
//! # Architecture (clean architecture)
//!
//! ```text
//! Motion source (tilt samples, buttons, shake)
//!         ↓
//! [hidlink-sender]
//!   ├── domain/           Pure types: TiltMapper (dead zones, axis inversion)
//!   ├── application/      Loops: demo script, tilt loop over PointerSource
//!   └── infrastructure/
//!         ├── config/     TOML config file (serde + toml)
//!         ├── console/    Dry-run transport printing frames to stdout
//!         └── wave/       Synthetic motion source for demos and tests
//!         ↓
//! hidlink-session (Session, SerialTransport)
//!         ↓
//! Serial HID adapter
//! ```
//!
//! # Layer rules
//!
//! - `domain` has no external dependencies (no I/O, no async, no frameworks).
//! - `application` depends on `domain` and `hidlink-session` only.
//! - `infrastructure` depends on all other layers plus `serde` and `toml`.
//!
//! # For beginners: why this structure?
//!
//! Clean architecture separates *what the program does* (domain + application)
//! from *how it does it* (infrastructure).  The tilt mapping and the command
//! loops can be tested against a recording transport without any hardware,
//! and the motion source can be swapped (synthetic wave today, an
//! accelerometer feed tomorrow) without touching the loop logic.

/// Domain layer: pure motion-to-command mapping (no I/O).
pub mod domain;

/// Application layer: the demo script and the tilt event loop.
pub mod application;

/// Infrastructure layer: config file, dry-run transport, synthetic source.
pub mod infrastructure;
