//! Spreadsheet sink: one workbook, one worksheet per table.
//!
//! Sheets are named after their table and hold the same cells as the CSV
//! output, one record per row, starting at A1 with no header. The workbook
//! is kept in memory and saved once, in [`TableSink::finish`].

use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Workbook, XlsxError};

use super::{TableSink, WriteError};
use crate::report::ResultTable;

/// Append `.xlsx` unless `name` already ends with it.
///
/// # Examples
///
/// ```
/// use fiche::output::workbook_file_name;
/// use std::path::PathBuf;
///
/// assert_eq!(workbook_file_name("results"), PathBuf::from("results.xlsx"));
/// assert_eq!(workbook_file_name("results.xlsx"), PathBuf::from("results.xlsx"));
/// ```
#[must_use]
pub fn workbook_file_name(name: &str) -> PathBuf {
    if name.ends_with(".xlsx") {
        PathBuf::from(name)
    } else {
        PathBuf::from(format!("{name}.xlsx"))
    }
}

/// Collects tables as worksheets and saves them as one workbook.
pub struct XlsxSink {
    path: PathBuf,
    workbook: Workbook,
    sheets: usize,
}

impl std::fmt::Debug for XlsxSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XlsxSink")
            .field("path", &self.path)
            .field("sheets", &self.sheets)
            .finish()
    }
}

impl XlsxSink {
    /// Create a sink saving to `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            workbook: Workbook::new(),
            sheets: 0,
        }
    }

    /// Where the workbook is saved.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn add_sheet(&mut self, table: &ResultTable) -> Result<(), XlsxError> {
        let worksheet = self.workbook.add_worksheet();
        worksheet.set_name(table.name.as_str())?;

        for (row, cells) in table.cells().enumerate() {
            let row = u32::try_from(row).map_err(|_| XlsxError::RowColumnLimitError)?;
            for (col, value) in cells.iter().enumerate() {
                let col = u16::try_from(col).map_err(|_| XlsxError::RowColumnLimitError)?;
                worksheet.write_string(row, col, value)?;
            }
        }
        Ok(())
    }

    fn xlsx_error(&self, source: XlsxError) -> WriteError {
        WriteError::Xlsx {
            path: self.path.clone(),
            source,
        }
    }
}

impl TableSink for XlsxSink {
    fn write(&mut self, table: &ResultTable) -> Result<(), WriteError> {
        self.sheets += 1;
        self.add_sheet(table).map_err(|e| self.xlsx_error(e))
    }

    fn finish(&mut self) -> Result<(), WriteError> {
        if self.sheets == 0 {
            log::debug!("No tables for {}, workbook not written", self.path.display());
            return Ok(());
        }

        log::info!("Writing results in {}", self.path.display());
        let path = self.path.clone();
        self.workbook.save(&path).map_err(|e| self.xlsx_error(e))
    }
}
