//! Console logging for fiche.
//!
//! Every diagnostic of a run (directory counts, ignored files, unreadable
//! files, written artifacts, the summary) goes through the `log` facade and
//! is printed to stderr by `env_logger`.
//!
//! The level is chosen by, in priority order:
//!
//! 1. `RUST_LOG` (if set)
//! 2. `--quiet` (errors only)
//! 3. `-v` (debug) or `-vv` (trace)
//! 4. info
//!
//! When a progress display is active, records are printed with its bars
//! suspended ([`init_logging_with_progress`]).
//!
//! At info level, info records print as bare messages and only warnings and
//! errors carry a level tag. With `-v` every record carries its level and
//! the module that emitted it.
//!
//! # Example
//!
//! ```rust,no_run
//! use fiche::logging::init_logging;
//!
//! init_logging(0, false);
//! log::info!("Directory ./data has: 3 files, 1 directories");
//! ```

use env_logger::{Builder, Target, WriteStyle};
use indicatif::MultiProgress;
use log::{Level, LevelFilter};
use std::env;
use std::io::{self, IsTerminal, Write};

/// Install the global logger.
///
/// # Arguments
///
/// * `verbose` - Verbosity count from CLI (0=info, 1=debug, 2+=trace)
/// * `quiet` - If true, only show errors (overridden by `RUST_LOG`)
///
/// Only the first call in a process installs a logger; later calls are
/// ignored.
pub fn init_logging(verbose: u8, quiet: bool) {
    install(verbose, quiet, None);
}

/// Install the global logger, printing around the bars of `multi`.
///
/// Each record is written while the bars are hidden, so progress output
/// and log lines never share a terminal row.
pub fn init_logging_with_progress(verbose: u8, quiet: bool, multi: &MultiProgress) {
    install(verbose, quiet, Some(multi));
}

fn install(verbose: u8, quiet: bool, multi: Option<&MultiProgress>) {
    let from_env = env::var("RUST_LOG").is_ok();

    let mut builder = Builder::new();
    if from_env {
        builder.parse_default_env();
    } else {
        builder.filter_level(determine_level(verbose, quiet));
    }
    configure_format(&mut builder, verbose > 0);

    if let Some(multi) = multi {
        let style = if io::stderr().is_terminal() {
            WriteStyle::Always
        } else {
            WriteStyle::Never
        };
        builder
            .target(Target::Pipe(Box::new(SuspendingWriter::new(multi.clone()))))
            .write_style(style);
    }

    if builder.try_init().is_err() {
        return;
    }

    log::debug!(
        "Logging initialized at level {} ({})",
        current_level_name(),
        if from_env { "RUST_LOG" } else { "command line" }
    );
}

/// Writes to stderr with the progress bars of `multi` suspended.
struct SuspendingWriter {
    multi: MultiProgress,
}

impl SuspendingWriter {
    fn new(multi: MultiProgress) -> Self {
        Self { multi }
    }
}

impl Write for SuspendingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.multi.suspend(|| io::stderr().write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

/// Map the CLI flags to a level filter. `quiet` wins over `verbose`.
#[must_use]
pub fn determine_level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn configure_format(builder: &mut Builder, detailed: bool) {
    builder.format(move |buf, record| {
        let level = record.level();
        let style = buf.default_level_style(level);

        if detailed {
            writeln!(
                buf,
                "{style}{:<5}{style:#} [{}] {}",
                level,
                record.module_path().unwrap_or("fiche"),
                record.args()
            )
        } else if level <= Level::Warn {
            writeln!(buf, "{style}{level}{style:#}: {}", record.args())
        } else {
            writeln!(buf, "{}", record.args())
        }
    });
}

/// Name of the currently active maximum level.
#[must_use]
pub fn current_level_name() -> &'static str {
    match log::max_level() {
        LevelFilter::Off => "off",
        LevelFilter::Error => "error",
        LevelFilter::Warn => "warn",
        LevelFilter::Info => "info",
        LevelFilter::Debug => "debug",
        LevelFilter::Trace => "trace",
    }
}
