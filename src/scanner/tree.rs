//! Tree scanning: walk a root, hash what was found, keep discovery order.
//!
//! # Overview
//!
//! [`TreeScanner`] validates the root, collects the file paths from the
//! [`Walker`], then hashes them. Hashing is sequential by default; with
//! `jobs > 1` it runs on a bounded rayon pool, and the results are still
//! collected in discovery order before any [`FileRecord`] is built.
//!
//! Files that fail to hash are handled by the configured
//! [`UnreadablePolicy`] and always reported in [`TreeScan::errors`].

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;

use super::hasher::Hasher;
use super::patterns::IgnoreSet;
use super::walker::Walker;
use super::{Digest, FileRecord, HashError, ScanConfig, ScanError, UnreadablePolicy};

/// Result of scanning one tree.
#[derive(Debug)]
pub struct TreeScan {
    /// Root as given by the caller
    pub root: PathBuf,
    /// Scanned files, in discovery order
    pub records: Vec<FileRecord>,
    /// Non-fatal problems met while walking or hashing
    pub errors: Vec<ScanError>,
}

impl TreeScan {
    /// Number of files that could not be hashed.
    #[must_use]
    pub fn unreadable_count(&self) -> usize {
        self.errors
            .iter()
            .filter(|e| matches!(e, ScanError::Hash(_)))
            .count()
    }
}

/// Scanner for directory trees.
///
/// # Example
///
/// ```no_run
/// use fiche::scanner::{ScanConfig, TreeScanner};
/// use std::path::Path;
///
/// let scanner = TreeScanner::new(ScanConfig::default());
/// let scan = scanner.scan(Path::new(".")).unwrap();
/// println!("{} files", scan.records.len());
/// ```
#[derive(Debug)]
pub struct TreeScanner {
    config: ScanConfig,
    hasher: Hasher,
    ignore: IgnoreSet,
}

impl TreeScanner {
    /// Create a scanner. Ignore patterns are compiled once here.
    #[must_use]
    pub fn new(config: ScanConfig) -> Self {
        let hasher = Hasher::new()
            .with_algorithm(config.algorithm)
            .with_block_size(config.block_size);
        let ignore = IgnoreSet::new(&config.ignore_patterns);
        Self {
            config,
            hasher,
            ignore,
        }
    }

    /// Create a scanner with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(ScanConfig::default())
    }

    /// The hasher used for file content.
    #[must_use]
    pub fn hasher(&self) -> &Hasher {
        &self.hasher
    }

    /// Scan every regular file under `root`.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::NotADirectory`] if `root` is not an existing
    /// directory. Every other problem is collected in [`TreeScan::errors`].
    pub fn scan(&self, root: &Path) -> Result<TreeScan, ScanError> {
        if !root.is_dir() {
            return Err(ScanError::NotADirectory(root.to_path_buf()));
        }

        let mut errors = Vec::new();
        let paths = self.collect_paths(root, &mut errors);
        log::debug!("Found {} files under {}", paths.len(), root.display());

        let hashed = self.hash_all(paths);

        let mut records = Vec::with_capacity(hashed.len());
        for (path, result) in hashed {
            match result {
                Ok(digest) => records.push(FileRecord::new(path, digest)),
                Err(e) => {
                    log::warn!("Could not read {}: {}", path.display(), e);
                    if self.config.unreadable == UnreadablePolicy::HashAsEmpty {
                        records.push(FileRecord::new(path, self.hasher.empty_digest()));
                    }
                    errors.push(ScanError::Hash(e));
                }
            }
        }

        Ok(TreeScan {
            root: root.to_path_buf(),
            records,
            errors,
        })
    }

    /// Walk `root`, keeping walk errors aside.
    fn collect_paths(&self, root: &Path, errors: &mut Vec<ScanError>) -> Vec<PathBuf> {
        let walker = Walker::new(root, self.ignore.clone())
            .with_follow_symlinks(self.config.follow_symlinks);
        let progress = self.config.progress_callback.as_ref();

        if let Some(cb) = progress {
            cb.on_phase_start("walking", 0);
        }

        let mut paths = Vec::new();
        for entry in walker.walk() {
            match entry {
                Ok(path) => {
                    paths.push(path);
                    if let Some(cb) = progress {
                        cb.on_progress(paths.len(), &paths[paths.len() - 1].to_string_lossy());
                    }
                }
                Err(e) => errors.push(e),
            }
        }

        if let Some(cb) = progress {
            cb.on_phase_end("walking");
        }
        paths
    }

    /// Hash every path, returning results in input order.
    fn hash_all(&self, paths: Vec<PathBuf>) -> Vec<(PathBuf, Result<Digest, HashError>)> {
        let progress = self.config.progress_callback.as_ref();
        if let Some(cb) = progress {
            cb.on_phase_start("hashing", paths.len());
        }

        let done = AtomicUsize::new(0);
        let hash_one = |path: PathBuf| {
            let result = self.hasher.digest(&path);
            if let Some(cb) = progress {
                let current = done.fetch_add(1, Ordering::Relaxed) + 1;
                cb.on_progress(current, &path.to_string_lossy());
            }
            (path, result)
        };

        let results: Vec<_> = if self.config.jobs <= 1 {
            paths.into_iter().map(hash_one).collect()
        } else {
            match rayon::ThreadPoolBuilder::new()
                .num_threads(self.config.jobs)
                .build()
            {
                // Indexed collect keeps discovery order
                Ok(pool) => pool.install(|| paths.into_par_iter().map(hash_one).collect()),
                Err(e) => {
                    log::warn!("Failed to create hashing thread pool, hashing sequentially: {}", e);
                    paths.into_iter().map(hash_one).collect()
                }
            }
        };

        if let Some(cb) = progress {
            cb.on_phase_end("hashing");
        }
        results
    }
}
