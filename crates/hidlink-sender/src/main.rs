//! HID link sender entry point.
//!
//! This binary drives a serial HID adapter: a microcontroller that presents
//! itself to the target machine as a USB keyboard and mouse, and accepts
//! `HID:`-prefixed command lines on its serial side.  The sender opens the
//! serial link, runs the protocol handshake, and then either walks through
//! the whole command set (`demo`) or streams pointer commands derived from a
//! synthetic motion source (`tilt`).
//!
//! # Why a separate sender process?
//!
//! The adapter firmware is deliberately dumb: it parses one line at a time
//! and forwards keystrokes to USB.  Everything that requires judgement, such
//! as pacing, dead zones, and tilt-to-pointer mapping, lives on the sending
//! side where it can be reconfigured without reflashing hardware.
//!
//! # Usage
//!
//! ```text
//! hidlink-sender [OPTIONS] <COMMAND>
//!
//! Commands:
//!   demo  Scripted walkthrough of the whole command set
//!   tilt  Drive the pointer from the synthetic wave source
//!
//! Options:
//!   --config <PATH>      Config file [default: hidlink.toml]
//!   --port <PATH>        Serial device path (overrides the config file)
//!   --baud <RATE>        Link baud rate, 9600 or 115200 (overrides config)
//!   --dialect <NAME>     Wire dialect, text or scancode (overrides config)
//!   --type-mode <NAME>   Typing mode, whole-string or per-key (overrides config)
//!   --dry-run            Print frames to stdout instead of opening a port
//! ```
//!
//! # Environment variable overrides
//!
//! Every override flag can also be set through an environment variable.
//! CLI args take precedence over environment variables, which take
//! precedence over the config file.
//!
//! | Variable            | Overrides     | Description                        |
//! |---------------------|---------------|------------------------------------|
//! | `HIDLINK_CONFIG`    | `--config`    | Config file path                   |
//! | `HIDLINK_PORT`      | `--port`      | Serial device path                 |
//! | `HIDLINK_BAUD`      | `--baud`      | Link baud rate (9600 or 115200)    |
//! | `HIDLINK_DIALECT`   | `--dialect`   | Wire dialect (text or scancode)    |
//! | `HIDLINK_TYPE_MODE` | `--type-mode` | Typing mode                        |
//!
//! # Architecture overview
//!
//! ```text
//! hidlink-sender  <- this process
//!   domain/        TiltMapper (dead zones, axis inversion)
//!   application/   demo script, tilt event loop
//!   infrastructure/
//!     config/      hidlink.toml loading
//!     console/     dry-run stdout transport
//!     wave/        synthetic motion source
//!       |
//! hidlink-session  (Session over SerialTransport)
//!       |
//! Serial HID adapter  (USB keyboard/mouse on the target machine)
//! ```

use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use hidlink_sender::application::{run_demo, run_tilt_loop};
use hidlink_sender::infrastructure::{load_sender_config, ConsoleTransport, SenderConfig, WaveSource};
use hidlink_session::{Dialect, LinkTransport, SerialTransport, Session, TypeTextMode};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Sender for the serial HID command protocol.
///
/// Opens the serial link to a HID adapter board and sends keyboard and mouse
/// command lines, either from the scripted demo or from the tilt loop.
///
/// The `#[derive(Parser)]` macro from `clap` generates the argument parser
/// automatically from the struct fields and their `#[arg(...)]` attributes.
#[derive(Debug, Parser)]
#[command(
    name = "hidlink-sender",
    about = "Keyboard and mouse sender for serial HID adapter boards",
    version
)]
struct Cli {
    /// Path to the TOML config file.
    ///
    /// A missing file is not an error; the built-in defaults apply and the
    /// override flags below still work.
    #[arg(long, default_value = "hidlink.toml", env = "HIDLINK_CONFIG")]
    config: PathBuf,

    /// Serial device path of the adapter, e.g. `/dev/ttyACM0` or `COM3`.
    ///
    /// Overrides `[link] port` from the config file.
    #[arg(long, env = "HIDLINK_PORT")]
    port: Option<String>,

    /// Link baud rate.
    ///
    /// The protocol defines 9600 and 115200; anything else is rejected at
    /// startup.  Overrides `[link] baud`.
    #[arg(long, env = "HIDLINK_BAUD")]
    baud: Option<u32>,

    /// Wire dialect: `text` or `scancode`.
    ///
    /// Must match the firmware flashed on the adapter.  Overrides
    /// `[link] dialect`.
    #[arg(long, env = "HIDLINK_DIALECT")]
    dialect: Option<String>,

    /// Typing mode: `whole-string` or `per-key`.
    ///
    /// Overrides `[link] type_mode`.
    #[arg(long, env = "HIDLINK_TYPE_MODE")]
    type_mode: Option<String>,

    /// Print frames to stdout instead of opening a serial port.
    ///
    /// Useful for checking what a command sequence puts on the wire without
    /// hardware attached.
    #[arg(long)]
    dry_run: bool,

    #[command(subcommand)]
    command: Command,
}

/// What the sender should do once the link is up.
#[derive(Debug, Subcommand)]
enum Command {
    /// Scripted walkthrough of the whole command set.
    Demo,
    /// Drive the pointer from the synthetic wave source.
    Tilt {
        /// Number of motion samples to play before exiting.
        #[arg(long, default_value_t = 160)]
        steps: u32,
    },
}

impl Cli {
    /// Applies the override flags on top of the file config.
    ///
    /// # Errors
    ///
    /// Returns an error if `--dialect` or `--type-mode` is not a recognised
    /// spelling.
    fn apply_overrides(&self, config: &mut SenderConfig) -> anyhow::Result<()> {
        if let Some(port) = &self.port {
            config.link.port = port.clone();
        }
        if let Some(baud) = self.baud {
            config.link.baud = baud;
        }
        if let Some(raw) = &self.dialect {
            config.link.dialect = parse_dialect(raw)?;
        }
        if let Some(raw) = &self.type_mode {
            config.link.type_mode = parse_type_mode(raw)?;
        }
        Ok(())
    }
}

/// Parses the `--dialect` spelling, matching the config-file spellings.
fn parse_dialect(raw: &str) -> anyhow::Result<Dialect> {
    match raw {
        "text" => Ok(Dialect::Text),
        "scancode" => Ok(Dialect::Scancode),
        other => anyhow::bail!("unknown dialect '{other}' (expected 'text' or 'scancode')"),
    }
}

/// Parses the `--type-mode` spelling, matching the config-file spellings.
fn parse_type_mode(raw: &str) -> anyhow::Result<TypeTextMode> {
    match raw {
        "whole-string" => Ok(TypeTextMode::WholeString),
        "per-key" => Ok(TypeTextMode::PerKey),
        other => anyhow::bail!("unknown type mode '{other}' (expected 'whole-string' or 'per-key')"),
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Program entry point.
///
/// The `#[tokio::main]` attribute sets up the Tokio multi-threaded async
/// runtime.  The serial work itself is blocking, so it runs on a dedicated
/// `spawn_blocking` thread; the async runtime only handles the Ctrl+C signal.
///
/// # What happens at startup
///
/// 1. `tracing_subscriber` is initialised to format log output.  The log
///    level is controlled by the `RUST_LOG` environment variable (e.g.,
///    `RUST_LOG=debug` shows every line put on the wire and every dropped
///    input).
/// 2. CLI arguments are parsed with `clap` into a [`Cli`] struct.
/// 3. The config file is loaded and the override flags applied.
/// 4. A Ctrl+C handler is spawned; it clears a shared `AtomicBool` when the
///    user presses Ctrl+C, which stops the tilt loop at the next sample.
/// 5. The serial port (or the stdout dry-run transport) is opened on a
///    blocking worker thread, a [`Session`] is built, and the chosen
///    subcommand runs to completion.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── Logging setup ─────────────────────────────────────────────────────────
    //
    // `EnvFilter::try_from_default_env()` reads the `RUST_LOG` environment
    // variable.  If it is absent or invalid, we fall back to `info` level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // ── Parse CLI arguments ───────────────────────────────────────────────────
    //
    // `Cli::parse()` reads from `std::env::args()` and exits with a usage
    // message if required arguments are missing or values are invalid.
    let cli = Cli::parse();

    // Load the config file, then let CLI flags and environment variables win.
    let mut config = load_sender_config(&cli.config)
        .with_context(|| format!("failed to load config from {}", cli.config.display()))?;
    cli.apply_overrides(&mut config)?;

    // Baud validation happens here, before any port is touched.
    let session_config = config.session_config()?;

    info!(
        "HID link sender starting: port={}, baud={}, dialect={:?}, dry_run={}",
        config.link.port, session_config.baud, session_config.dialect, cli.dry_run
    );

    // ── Graceful shutdown flag ────────────────────────────────────────────────
    //
    // `AtomicBool` is a thread-safe boolean that can be read and written from
    // multiple threads without a Mutex.  We use `Relaxed` ordering because we
    // only need the value to eventually propagate; precise ordering is not
    // required here.
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = Arc::clone(&running);

    // Spawn a task that listens for Ctrl+C (SIGINT on Unix).
    // When received, it clears `running`.  The tilt loop checks the flag
    // before every sample and exits cleanly; the demo script is short enough
    // to just finish.
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("received Ctrl+C, initiating graceful shutdown");
                running_clone.store(false, Ordering::Relaxed);
            }
            Err(e) => {
                tracing::error!("failed to listen for Ctrl+C signal: {e}");
            }
        }
    });

    // ── Run the chosen command on a blocking worker ───────────────────────────
    //
    // Serial writes and pacing sleeps block the calling thread, so the whole
    // session lives on a `spawn_blocking` thread instead of the async runtime.
    let dry_run = cli.dry_run;
    let command = cli.command;
    let port = config.link.port.clone();
    let mapper = config.mapper();
    let interval = config.sample_interval();

    let lines = tokio::task::spawn_blocking(move || -> anyhow::Result<u64> {
        let transport: Box<dyn LinkTransport> = if dry_run {
            Box::new(ConsoleTransport::new())
        } else {
            Box::new(SerialTransport::open(&port, session_config.baud)?)
        };
        let mut session = Session::new(transport, session_config);

        match command {
            Command::Demo => Ok(run_demo(&mut session)?),
            Command::Tilt { steps } => {
                let mut source = WaveSource::new(steps, interval);
                Ok(run_tilt_loop(&mut session, &mut source, &mapper, &running)?)
            }
        }
    })
    .await
    .context("link worker thread panicked")??;

    info!(lines, "HID link sender stopped");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
