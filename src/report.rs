//! Result assembly: the named tables a run produces.
//!
//! A run can produce up to six tables, always considered in this order:
//! `left`, `left_duplicates`, `right`, `right_duplicates`, `left_only`,
//! `right_only`. A table whose precondition was not met is absent, which
//! is different from present with zero rows: absent tables are never
//! exported.

use std::fmt;

use crate::compare::diff;
use crate::duplicates::DuplicateRecord;
use crate::scanner::FileRecord;

/// Name of a result table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableName {
    /// Every file of the left tree
    Left,
    /// Duplicate pairs within the left tree
    LeftDuplicates,
    /// Every file of the right tree
    Right,
    /// Duplicate pairs within the right tree
    RightDuplicates,
    /// Left files whose content is not in the right tree
    LeftOnly,
    /// Right files whose content is not in the left tree
    RightOnly,
}

impl TableName {
    /// All tables in export order.
    pub const ALL: [TableName; 6] = [
        TableName::Left,
        TableName::LeftDuplicates,
        TableName::Right,
        TableName::RightDuplicates,
        TableName::LeftOnly,
        TableName::RightOnly,
    ];

    /// Name used for artifacts and sheets.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TableName::Left => "left",
            TableName::LeftDuplicates => "left_duplicates",
            TableName::Right => "right",
            TableName::RightDuplicates => "right_duplicates",
            TableName::LeftOnly => "left_only",
            TableName::RightOnly => "right_only",
        }
    }

    fn slot(self) -> usize {
        match self {
            TableName::Left => 0,
            TableName::LeftDuplicates => 1,
            TableName::Right => 2,
            TableName::RightDuplicates => 3,
            TableName::LeftOnly => 4,
            TableName::RightOnly => 5,
        }
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rows of one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableRows {
    /// `(path, digest)` rows
    Files(Vec<FileRecord>),
    /// `(path, digest, original_path, original_digest)` rows
    Duplicates(Vec<DuplicateRecord>),
}

/// A named, ordered table ready for export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultTable {
    /// Table name
    pub name: TableName,
    /// Table rows
    pub rows: TableRows,
}

impl ResultTable {
    /// Table of file records.
    #[must_use]
    pub fn files(name: TableName, records: Vec<FileRecord>) -> Self {
        Self {
            name,
            rows: TableRows::Files(records),
        }
    }

    /// Table of duplicate records.
    #[must_use]
    pub fn duplicates(name: TableName, records: Vec<DuplicateRecord>) -> Self {
        Self {
            name,
            rows: TableRows::Duplicates(records),
        }
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.rows {
            TableRows::Files(rows) => rows.len(),
            TableRows::Duplicates(rows) => rows.len(),
        }
    }

    /// `true` when the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rows as text cells, in column order.
    pub fn cells(&self) -> Box<dyn Iterator<Item = Vec<String>> + '_> {
        match &self.rows {
            TableRows::Files(rows) => Box::new(rows.iter().map(|r| {
                vec![r.path.to_string_lossy().into_owned(), r.digest.to_string()]
            })),
            TableRows::Duplicates(rows) => Box::new(rows.iter().map(|r| {
                vec![
                    r.path.to_string_lossy().into_owned(),
                    r.digest.to_string(),
                    r.original_path.to_string_lossy().into_owned(),
                    r.original_digest.to_string(),
                ]
            })),
        }
    }
}

/// Everything one scanned tree contributes to the report.
#[derive(Debug, Clone, Default)]
pub struct TreeResult {
    /// Scanned files, in discovery order
    pub records: Vec<FileRecord>,
    /// Duplicate pairs, `None` when detection was not requested
    pub duplicates: Option<Vec<DuplicateRecord>>,
}

/// The assembled tables of one run.
#[derive(Debug, Clone, Default)]
pub struct Report {
    slots: [Option<ResultTable>; 6],
}

impl Report {
    /// Assemble tables from the sides that produced data.
    ///
    /// A side is `None` when it was not supplied or failed to scan. The
    /// `*_only` tables are computed only when both sides are present.
    #[must_use]
    pub fn assemble(left: Option<TreeResult>, right: Option<TreeResult>) -> Self {
        let mut report = Self::default();

        if let (Some(l), Some(r)) = (&left, &right) {
            report.put(ResultTable::files(
                TableName::LeftOnly,
                diff(&l.records, &r.records),
            ));
            report.put(ResultTable::files(
                TableName::RightOnly,
                diff(&r.records, &l.records),
            ));
        }

        if let Some(side) = left {
            report.put_side(side, TableName::Left, TableName::LeftDuplicates);
        }
        if let Some(side) = right {
            report.put_side(side, TableName::Right, TableName::RightDuplicates);
        }

        report
    }

    fn put_side(&mut self, side: TreeResult, files: TableName, duplicates: TableName) {
        self.put(ResultTable::files(files, side.records));
        if let Some(records) = side.duplicates {
            self.put(ResultTable::duplicates(duplicates, records));
        }
    }

    /// Store `table` in its slot, replacing any previous one.
    pub fn put(&mut self, table: ResultTable) {
        let slot = table.name.slot();
        self.slots[slot] = Some(table);
    }

    /// The table named `name`, if it was produced.
    #[must_use]
    pub fn get(&self, name: TableName) -> Option<&ResultTable> {
        self.slots[name.slot()].as_ref()
    }

    /// Produced tables, in export order.
    pub fn tables(&self) -> impl Iterator<Item = &ResultTable> {
        self.slots.iter().flatten()
    }

    /// Every slot in export order, absent ones included.
    pub fn slots(&self) -> impl Iterator<Item = (TableName, Option<&ResultTable>)> {
        TableName::ALL
            .into_iter()
            .zip(self.slots.iter().map(Option::as_ref))
    }

    /// `true` when no table was produced.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables().next().is_none()
    }
}
