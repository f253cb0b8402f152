//! Pairwise duplicate detection over one tree's records.
//!
//! # Overview
//!
//! Records are folded in discovery order. Each record is checked against
//! every record already seen; each match yields one [`DuplicateRecord`].
//! A file whose content appears twice before it therefore produces two
//! records, one per earlier file, in the order those were discovered.
//!
//! # Example
//!
//! ```
//! use fiche::duplicates::find_duplicates;
//! use fiche::scanner::{Digest, FileRecord};
//! use std::path::PathBuf;
//!
//! let records = vec![
//!     FileRecord::new(PathBuf::from("x.txt"), Digest::from_hex("aa")),
//!     FileRecord::new(PathBuf::from("y.txt"), Digest::from_hex("aa")),
//! ];
//! let duplicates = find_duplicates(&records);
//! assert_eq!(duplicates.len(), 1);
//! assert_eq!(duplicates[0].original_path, PathBuf::from("x.txt"));
//! ```

use std::collections::HashMap;

use super::DuplicateRecord;
use crate::scanner::{Digest, FileRecord};

/// Fold state: every record seen so far, indexed by digest.
#[derive(Debug, Default)]
pub struct DuplicateIndex<'a> {
    seen: HashMap<&'a Digest, Vec<&'a FileRecord>>,
}

impl<'a> DuplicateIndex<'a> {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check `record` against everything seen so far, then remember it.
    ///
    /// Returns one [`DuplicateRecord`] per earlier record with the same
    /// digest, oldest first.
    pub fn observe(&mut self, record: &'a FileRecord) -> Vec<DuplicateRecord> {
        let earlier = self.seen.entry(&record.digest).or_default();
        let found = earlier
            .iter()
            .map(|original| DuplicateRecord::new(record, original))
            .collect();
        earlier.push(record);
        found
    }

    /// Number of distinct digests seen.
    #[must_use]
    pub fn distinct(&self) -> usize {
        self.seen.len()
    }
}

/// Find every duplicate pair in `records`, in discovery order.
#[must_use]
pub fn find_duplicates(records: &[FileRecord]) -> Vec<DuplicateRecord> {
    let mut index = DuplicateIndex::new();
    let duplicates: Vec<DuplicateRecord> = records
        .iter()
        .flat_map(|record| index.observe(record))
        .collect();

    log::debug!(
        "{} records, {} distinct digests, {} duplicate pairs",
        records.len(),
        index.distinct(),
        duplicates.len()
    );
    duplicates
}
