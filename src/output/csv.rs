//! CSV sink for result tables.
//!
//! Each table goes to its own `<table_name>.csv` in the output directory.
//! There is no header row; columns follow the record field order:
//!
//! - file tables: `path`, `digest`
//! - duplicate tables: `path`, `digest`, `original_path`, `original_digest`
//!
//! # Example
//!
//! ```no_run
//! use fiche::output::csv::CsvSink;
//! use fiche::report::{ResultTable, TableName};
//!
//! let table = ResultTable::files(TableName::Left, Vec::new());
//! CsvSink::write_to(&table, std::io::stdout()).unwrap();
//! ```

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use super::{TableSink, WriteError};
use crate::report::ResultTable;

/// Writes one CSV file per table into a directory.
#[derive(Debug, Clone)]
pub struct CsvSink {
    dir: PathBuf,
}

impl CsvSink {
    /// Create a sink writing into `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Where the CSV for `table` goes.
    #[must_use]
    pub fn path_for(&self, table: &ResultTable) -> PathBuf {
        self.dir.join(format!("{}.csv", table.name))
    }

    /// Write `table` as header-less CSV to `writer`.
    ///
    /// # Errors
    ///
    /// Returns the CSV error if serialization or flushing fails.
    pub fn write_to<W: io::Write>(table: &ResultTable, writer: W) -> Result<(), ::csv::Error> {
        let mut csv_writer = ::csv::WriterBuilder::new()
            .has_headers(false)
            .flexible(false)
            .from_writer(writer);

        for row in table.cells() {
            csv_writer.write_record(&row)?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Render `table` as a CSV string.
    ///
    /// # Errors
    ///
    /// Returns the CSV error if serialization fails.
    pub fn to_string(table: &ResultTable) -> Result<String, ::csv::Error> {
        let mut buffer = Vec::new();
        Self::write_to(table, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).to_string())
    }
}

impl TableSink for CsvSink {
    fn write(&mut self, table: &ResultTable) -> Result<(), WriteError> {
        let path = self.path_for(table);
        log::info!("Writing results in {}", path.display());

        let file = File::create(&path).map_err(|source| io_error(&path, source))?;
        Self::write_to(table, file).map_err(|source| WriteError::Csv {
            path: path.clone(),
            source,
        })
    }
}

fn io_error(path: &Path, source: io::Error) -> WriteError {
    WriteError::Io {
        path: path.to_path_buf(),
        source,
    }
}
