//! Scanner module for directory traversal and file hashing.
//!
//! This module provides functionality for:
//! - Ordered directory walking using jwalk
//! - Streaming content hashing (MD5 by default, BLAKE3 on request)
//! - Base-name ignore patterns
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`walker`]: Directory traversal and file discovery
//! - [`hasher`]: Block-wise file hashing
//! - [`patterns`]: Glob matching of file names to skip
//! - [`tree`]: Ties the above together into one [`TreeScan`] per root
//!
//! # Example
//!
//! ```no_run
//! use fiche::scanner::{ScanConfig, TreeScanner};
//! use std::path::Path;
//!
//! let config = ScanConfig::default().with_ignore_patterns(vec!["*.tmp".to_string()]);
//! let scanner = TreeScanner::new(config);
//!
//! match scanner.scan(Path::new(".")) {
//!     Ok(scan) => {
//!         for record in &scan.records {
//!             println!("{}  {}", record.digest, record.path.display());
//!         }
//!     }
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```

pub mod hasher;
pub mod patterns;
pub mod tree;
pub mod walker;

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::progress::ProgressCallback;

// Re-export main types
pub use hasher::{DigestAlgorithm, Hasher, DEFAULT_BLOCK_SIZE};
pub use patterns::IgnoreSet;
pub use tree::{TreeScan, TreeScanner};
pub use walker::{WalkEvent, Walker};

/// Hex-encoded content digest of one file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digest(String);

impl Digest {
    /// Wrap an already hex-encoded digest.
    #[must_use]
    pub fn from_hex(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    /// The digest as a lowercase hex string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One scanned file: where it was found and what its content hashes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Directory path joined with the file name, as walked
    pub path: PathBuf,
    /// Digest of the file content at scan time
    pub digest: Digest,
}

impl FileRecord {
    /// Create a new FileRecord.
    #[must_use]
    pub fn new(path: PathBuf, digest: Digest) -> Self {
        Self { path, digest }
    }
}

/// What to do with a file whose content cannot be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnreadablePolicy {
    /// Record the file with the digest of empty content.
    #[default]
    HashAsEmpty,
    /// Leave the file out of every table.
    Exclude,
}

/// Configuration for scanning a tree.
///
/// Built once per run and shared, read-only, by every scan of that run.
#[derive(Clone)]
pub struct ScanConfig {
    /// Read buffer size used by the hasher, in bytes.
    pub block_size: usize,
    /// Content hash algorithm.
    pub algorithm: DigestAlgorithm,
    /// Glob patterns matched against file base names.
    pub ignore_patterns: Vec<String>,
    /// Descend into symlinked directories.
    /// Warning: symlink cycles are not detected.
    pub follow_symlinks: bool,
    /// Recovery policy for files that fail to hash.
    pub unreadable: UnreadablePolicy,
    /// Number of hashing workers. 1 hashes on the calling thread.
    pub jobs: usize,
    /// Optional progress callback.
    pub progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl fmt::Debug for ScanConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScanConfig")
            .field("block_size", &self.block_size)
            .field("algorithm", &self.algorithm)
            .field("ignore_patterns", &self.ignore_patterns)
            .field("follow_symlinks", &self.follow_symlinks)
            .field("unreadable", &self.unreadable)
            .field("jobs", &self.jobs)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            algorithm: DigestAlgorithm::default(),
            ignore_patterns: Vec::new(),
            follow_symlinks: false,
            unreadable: UnreadablePolicy::default(),
            jobs: 1,
            progress_callback: None,
        }
    }
}

impl ScanConfig {
    /// Set the hasher read buffer size (at least one byte).
    #[must_use]
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size.max(1);
        self
    }

    /// Set the digest algorithm.
    #[must_use]
    pub fn with_algorithm(mut self, algorithm: DigestAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Set the ignore patterns.
    #[must_use]
    pub fn with_ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.ignore_patterns = patterns;
        self
    }

    /// Follow symbolic links to directories.
    #[must_use]
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Set the unreadable-file policy.
    #[must_use]
    pub fn with_unreadable(mut self, policy: UnreadablePolicy) -> Self {
        self.unreadable = policy;
        self
    }

    /// Set the number of hashing workers (at least one).
    #[must_use]
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    /// Set the progress callback.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }
}

/// Errors that can occur during directory scanning.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// The specified root is not an existing directory.
    #[error("\"{}\" is not a directory!", .0.display())]
    NotADirectory(PathBuf),

    /// A directory could not be read while walking.
    #[error("I/O error for {}: {source}", path.display())]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A file could not be hashed.
    #[error(transparent)]
    Hash(#[from] HashError),
}

/// Errors that can occur during file hashing.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The specified file was not found.
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Permission was denied when reading the file.
    #[error("Permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {}: {source}", path.display())]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl HashError {
    /// The file the error refers to.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::NotFound(path) | Self::PermissionDenied(path) => path,
            Self::Io { path, .. } => path,
        }
    }
}
