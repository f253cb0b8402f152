//! Tree comparison by content.
//!
//! Two files are "the same" here when their digests are equal, wherever
//! they live. [`diff`] keeps the left records whose digest never occurs on
//! the right; call it twice with the arguments swapped for both sides.

use std::collections::HashSet;

use crate::scanner::{Digest, FileRecord};

/// Left records whose digest does not appear anywhere in `right`.
///
/// Left order is preserved.
///
/// # Example
///
/// ```
/// use fiche::compare::diff;
/// use fiche::scanner::{Digest, FileRecord};
/// use std::path::PathBuf;
///
/// let left = vec![
///     FileRecord::new(PathBuf::from("l/a.txt"), Digest::from_hex("11")),
///     FileRecord::new(PathBuf::from("l/b.txt"), Digest::from_hex("22")),
/// ];
/// let right = vec![FileRecord::new(PathBuf::from("r/renamed.txt"), Digest::from_hex("11"))];
///
/// let only = diff(&left, &right);
/// assert_eq!(only.len(), 1);
/// assert_eq!(only[0].path, PathBuf::from("l/b.txt"));
/// ```
#[must_use]
pub fn diff(left: &[FileRecord], right: &[FileRecord]) -> Vec<FileRecord> {
    let right_digests: HashSet<&Digest> = right.iter().map(|r| &r.digest).collect();

    left.iter()
        .filter(|record| !right_digests.contains(&record.digest))
        .cloned()
        .collect()
}
