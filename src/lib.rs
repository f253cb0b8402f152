//! fiche - file inventory, duplicate finder and tree comparator
//!
//! fiche hashes every regular file under one or two directory trees and
//! exports tables of what it found:
//!
//! - `left` / `right`: every file with its digest
//! - `left_duplicates` / `right_duplicates`: files whose content was already
//!   seen earlier in the same tree (with `--duplicates`)
//! - `left_only` / `right_only`: files whose content does not exist anywhere
//!   in the other tree (when two trees are given)
//!
//! Tables are written as CSV, and optionally as one XLSX workbook.
//!
//! # Example
//!
//! ```no_run
//! use fiche::config::RunConfig;
//!
//! let config = RunConfig::new("photos")
//!     .with_right(Some("backup/photos".into()))
//!     .with_duplicates(true);
//! let outcome = fiche::run(&config);
//! println!("{} tables written", outcome.report.tables().count());
//! ```

pub mod cli;
pub mod compare;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;
pub mod report;
pub mod scanner;

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use indicatif::MultiProgress;

use crate::cli::Cli;
use crate::config::{Config, RunConfig};
use crate::duplicates::find_duplicates;
use crate::error::ExitCode;
use crate::output::{export, CsvSink, TableSink, WriteError, XlsxSink};
use crate::progress::Progress;
use crate::report::{Report, TreeResult};
use crate::scanner::{ScanError, TreeScanner};

/// What a run produced and what went wrong along the way.
#[derive(Debug)]
pub struct RunOutcome {
    /// Tables produced by the run
    pub report: Report,
    /// Failed roots and files that could not be read or walked
    pub scan_errors: Vec<ScanError>,
    /// Artifacts that could not be written
    pub write_errors: Vec<WriteError>,
}

impl RunOutcome {
    /// `true` when nothing failed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.scan_errors.is_empty() && self.write_errors.is_empty()
    }
}

/// Scan, analyze and export according to `config`.
///
/// Nothing here is fatal: a side whose root cannot be scanned produces no
/// tables (and neither do the comparison tables), and an artifact that
/// cannot be written does not stop the others. Every failure is logged and
/// returned in the outcome.
pub fn run(config: &RunConfig) -> RunOutcome {
    log::info!("Welcome to fiche v{}", env!("CARGO_PKG_VERSION"));

    let scanner = TreeScanner::new(config.scan.clone());
    let mut scan_errors = Vec::new();

    let left = scan_side(&scanner, config, "left", &config.left, &mut scan_errors);
    let right = config
        .right
        .as_deref()
        .and_then(|root| scan_side(&scanner, config, "right", root, &mut scan_errors));

    let report = Report::assemble(left, right);
    let write_errors = write_report(&report, config);

    RunOutcome {
        report,
        scan_errors,
        write_errors,
    }
}

fn scan_side(
    scanner: &TreeScanner,
    config: &RunConfig,
    side: &str,
    root: &Path,
    errors: &mut Vec<ScanError>,
) -> Option<TreeResult> {
    if let Some(cb) = &config.scan.progress_callback {
        cb.on_message(side);
    }

    let scan = match scanner.scan(root) {
        Ok(scan) => scan,
        Err(e) => {
            log::error!("{}", e);
            log::error!("Error while execution, please check your path(s)!");
            errors.push(e);
            return None;
        }
    };

    log::info!(
        "{} file(s) scanned in {}_directory, {} unreadable",
        scan.records.len(),
        side,
        scan.unreadable_count()
    );

    let duplicates = config.duplicates.then(|| find_duplicates(&scan.records));
    if let Some(found) = &duplicates {
        log::info!("{} duplicated file(s) found in {}_directory!", found.len(), side);
    }

    errors.extend(scan.errors);
    Some(TreeResult {
        records: scan.records,
        duplicates,
    })
}

fn write_report(report: &Report, config: &RunConfig) -> Vec<WriteError> {
    if report.is_empty() {
        log::debug!("No tables produced, nothing to write");
        return Vec::new();
    }

    if let Err(source) = fs::create_dir_all(&config.output_dir) {
        let err = WriteError::Io {
            path: config.output_dir.clone(),
            source,
        };
        log::error!("{}", err);
        return vec![err];
    }

    let mut sinks: Vec<Box<dyn TableSink>> = vec![Box::new(CsvSink::new(&config.output_dir))];
    if let Some(path) = &config.xlsx {
        sinks.push(Box::new(XlsxSink::new(path)));
    }

    export(report, &mut sinks)
}

/// Run the application from parsed command-line arguments.
///
/// # Errors
///
/// Returns an error only when the run cannot start, i.e. the configuration
/// cannot be loaded. Scan and write failures are logged and the run still
/// completes with [`ExitCode::Success`].
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    run_app_with_progress(cli, MultiProgress::new())
}

/// Like [`run_app`], drawing progress into `multi`.
///
/// Pass the same `multi` given to
/// [`logging::init_logging_with_progress`] so log lines and bars share
/// the terminal cleanly.
///
/// # Errors
///
/// Same as [`run_app`].
pub fn run_app_with_progress(cli: Cli, multi: MultiProgress) -> Result<ExitCode> {
    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let mut run_config = RunConfig::resolve(&cli, config);
    log::debug!("Resolved configuration: {:?}", run_config);

    let progress = Arc::new(Progress::with_multi(multi, cli.quiet));
    run_config.scan = run_config.scan.with_progress_callback(progress);

    let outcome = run(&run_config);
    if !outcome.is_clean() {
        log::debug!(
            "Run completed with {} scan error(s) and {} write error(s)",
            outcome.scan_errors.len(),
            outcome.write_errors.len()
        );
    }

    Ok(ExitCode::Success)
}
