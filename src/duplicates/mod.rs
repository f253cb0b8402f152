//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Pairwise duplicate records within one tree ([`find_duplicates`])
//! - The fold state behind it ([`DuplicateIndex`])

pub mod detector;

use std::path::PathBuf;

use crate::scanner::{Digest, FileRecord};

pub use detector::{find_duplicates, DuplicateIndex};

/// A later-seen file whose content matches an earlier-seen file of the same tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateRecord {
    /// The later file
    pub path: PathBuf,
    /// Its digest
    pub digest: Digest,
    /// The earlier file it matches
    pub original_path: PathBuf,
    /// The earlier file's digest; always equal to `digest`
    pub original_digest: Digest,
}

impl DuplicateRecord {
    /// Pair `duplicate` with the earlier `original`.
    #[must_use]
    pub fn new(duplicate: &FileRecord, original: &FileRecord) -> Self {
        debug_assert_eq!(duplicate.digest, original.digest);
        Self {
            path: duplicate.path.clone(),
            digest: duplicate.digest.clone(),
            original_path: original.path.clone(),
            original_digest: original.digest.clone(),
        }
    }
}
