//! Output sinks for result tables.
//!
//! This module provides the export formats for a [`Report`]:
//! - CSV, one file per table (always written)
//! - XLSX, one workbook with a sheet per table (with `--xlsx`)
//!
//! Every format implements [`TableSink`]. [`export`] feeds each produced
//! table to each sink and keeps going after a failure, so one unwritable
//! artifact never stops the others.
//!
//! # Example
//!
//! ```no_run
//! use fiche::output::{export, CsvSink, TableSink};
//! use fiche::report::Report;
//!
//! let report = Report::default();
//! let mut sinks: Vec<Box<dyn TableSink>> = vec![Box::new(CsvSink::new("."))];
//! for err in export(&report, &mut sinks) {
//!     eprintln!("{}", err);
//! }
//! ```

pub mod csv;
pub mod xlsx;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::report::{Report, ResultTable};

// Re-export main types
pub use self::csv::CsvSink;
pub use self::xlsx::{workbook_file_name, XlsxSink};

/// Errors that can occur while writing an artifact.
#[derive(Debug, Error)]
pub enum WriteError {
    /// I/O error while creating or writing the artifact.
    #[error("I/O error writing {}: {source}", path.display())]
    Io {
        /// Artifact path
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Error during CSV serialization.
    #[error("CSV error writing {}: {source}", path.display())]
    Csv {
        /// Artifact path
        path: PathBuf,
        /// The underlying CSV error
        #[source]
        source: ::csv::Error,
    },

    /// Error while building or saving the workbook.
    #[error("Spreadsheet error writing {}: {source}", path.display())]
    Xlsx {
        /// Artifact path
        path: PathBuf,
        /// The underlying workbook error
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },
}

impl WriteError {
    /// The artifact that failed.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Io { path, .. } | Self::Csv { path, .. } | Self::Xlsx { path, .. } => path,
        }
    }
}

/// A destination for result tables.
pub trait TableSink {
    /// Write one table.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError`] naming the artifact that could not be written.
    fn write(&mut self, table: &ResultTable) -> Result<(), WriteError>;

    /// Flush whatever the sink buffered. Called once, after every table.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError`] naming the artifact that could not be written.
    fn finish(&mut self) -> Result<(), WriteError> {
        Ok(())
    }
}

/// Write every produced table of `report` to every sink.
///
/// Absent tables are skipped. Failures are logged and returned; they do
/// not stop the remaining writes.
pub fn export(report: &Report, sinks: &mut [Box<dyn TableSink>]) -> Vec<WriteError> {
    let mut errors = Vec::new();

    for sink in sinks.iter_mut() {
        for table in report.tables() {
            if let Err(e) = sink.write(table) {
                log::error!("{}", e);
                errors.push(e);
            }
        }
        if let Err(e) = sink.finish() {
            log::error!("{}", e);
            errors.push(e);
        }
    }

    errors
}
