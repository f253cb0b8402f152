//! Directory walker implementation using jwalk.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct, which traverses a directory
//! tree and yields the paths of the files to hash, in discovery order.
//!
//! # Ordering
//!
//! Children of every directory are sorted before they are yielded: files
//! first, then subdirectories, each group by file name. All files of a
//! directory therefore come before anything found beneath it, and the
//! order is the same on every run over an unchanged tree.
//!
//! # Diagnostics
//!
//! Each directory read logs one info line with its file and subdirectory
//! counts. Ignored files are logged at info level as they are skipped.
//!
//! # Example
//!
//! ```no_run
//! use fiche::scanner::{IgnoreSet, Walker};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("/home/user/Downloads"), IgnoreSet::empty());
//! for entry in walker.walk() {
//!     match entry {
//!         Ok(path) => println!("{}", path.display()),
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! ```

use std::ffi::OsStr;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use jwalk::{DirEntry, Parallelism, WalkDirGeneric};

use super::patterns::IgnoreSet;
use super::ScanError;

/// Per-entry state filled in when a directory is read: `true` for
/// directories and links that resolve to directories.
type WalkState = ((), bool);
type Entry = DirEntry<WalkState>;

/// Something the walk reports besides the files it yields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkEvent {
    /// A directory was read. Counts cover every child, ignored files and
    /// links to directories included.
    Directory {
        /// Directory path
        path: PathBuf,
        /// Non-directory children
        files: usize,
        /// Subdirectories and links to directories
        dirs: usize,
    },
    /// A file was skipped by an ignore pattern.
    Ignored(String),
}

impl fmt::Display for WalkEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WalkEvent::Directory { path, files, dirs } => write!(
                f,
                "Directory {} has: {} files, {} directories",
                path.display(),
                files,
                dirs
            ),
            WalkEvent::Ignored(name) => write!(f, "Ignore file {}", name),
        }
    }
}

/// Directory walker for ordered file discovery.
#[derive(Debug)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// File names to skip
    ignore: IgnoreSet,
    /// Descend into symlinked directories
    follow_symlinks: bool,
}

impl Walker {
    /// Create a new walker for the given path.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use fiche::scanner::{IgnoreSet, Walker};
    /// use std::path::Path;
    ///
    /// let walker = Walker::new(Path::new("."), IgnoreSet::empty());
    /// ```
    #[must_use]
    pub fn new(path: &Path, ignore: IgnoreSet) -> Self {
        Self {
            root: path.to_path_buf(),
            ignore,
            follow_symlinks: false,
        }
    }

    /// Follow symbolic links to directories.
    ///
    /// Warning: symlink cycles are not detected.
    #[must_use]
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Walk the directory tree, yielding file paths.
    ///
    /// Errors are yielded as [`ScanError`] values rather than stopping
    /// iteration. Directory counts and ignored files are logged at info
    /// level.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use fiche::scanner::{IgnoreSet, Walker};
    /// use std::path::Path;
    ///
    /// let walker = Walker::new(Path::new("."), IgnoreSet::empty());
    /// let files: Vec<_> = walker.walk().filter_map(Result::ok).collect();
    /// println!("Found {} files", files.len());
    /// ```
    pub fn walk(&self) -> impl Iterator<Item = Result<PathBuf, ScanError>> + '_ {
        self.walk_with(|event| log::info!("{}", event))
    }

    /// Walk the directory tree, handing every [`WalkEvent`] to `report`.
    ///
    /// The walk is single-threaded, so events arrive in walk order.
    pub fn walk_with<F>(&self, report: F) -> impl Iterator<Item = Result<PathBuf, ScanError>> + '_
    where
        F: Fn(&WalkEvent) + Clone + Send + Sync + 'static,
    {
        let on_read = report.clone();
        let walk_dir = WalkDirGeneric::<WalkState>::new(&self.root)
            .follow_links(self.follow_symlinks)
            .skip_hidden(false)
            .parallelism(Parallelism::Serial)
            .process_read_dir(move |depth, path, _read_dir_state, children| {
                for entry in children.iter_mut().flatten() {
                    entry.client_state = is_dir_like(entry);
                }
                children.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));

                // The first call lists the root as the only child of its
                // parent, which is not part of the walk
                if depth.is_some() {
                    on_read(&summarize(path, children));
                }
            });

        walk_dir
            .into_iter()
            .filter_map(move |entry_result| match entry_result {
                Ok(entry) => {
                    // Skip the root directory itself
                    if entry.depth == 0 {
                        return None;
                    }
                    self.classify(&entry, &report)
                }
                Err(e) => self.handle_jwalk_error(e, &report),
            })
    }

    /// Decide whether an entry is a file to hash.
    fn classify<F: Fn(&WalkEvent)>(
        &self,
        entry: &Entry,
        report: &F,
    ) -> Option<Result<PathBuf, ScanError>> {
        let file_type = entry.file_type();
        if file_type.is_dir() {
            return None;
        }

        let path = entry.path();

        if entry.client_state {
            log::trace!("Not descending into symlinked directory: {}", path.display());
            return None;
        }

        if file_type.is_symlink() {
            // A dangling link is left for the hasher to report
            if fs::metadata(&path).is_ok_and(|target| !target.is_file()) {
                log::debug!("Skipping link to non-regular file: {}", path.display());
                return None;
            }
        } else if !file_type.is_file() {
            log::debug!("Skipping non-regular file: {}", path.display());
            return None;
        }

        self.keep_unless_ignored(path, report)
    }

    fn keep_unless_ignored<F: Fn(&WalkEvent)>(
        &self,
        path: PathBuf,
        report: &F,
    ) -> Option<Result<PathBuf, ScanError>> {
        if self.ignore.is_ignored(&path) {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            report(&WalkEvent::Ignored(name));
            return None;
        }
        Some(Ok(path))
    }

    /// Handle jwalk errors.
    ///
    /// When links are followed, jwalk reports a dangling link as an error.
    /// It is still a file of the tree and goes to the hasher like any other.
    fn handle_jwalk_error<F: Fn(&WalkEvent)>(
        &self,
        error: jwalk::Error,
        report: &F,
    ) -> Option<Result<PathBuf, ScanError>> {
        if let Some(link) = dangling_link(&error) {
            return self.keep_unless_ignored(link.to_path_buf(), report);
        }

        let path = error
            .path()
            .map_or_else(|| self.root.clone(), Path::to_path_buf);
        log::warn!("Walker error for {}: {}", path.display(), error);
        Some(Err(ScanError::Io {
            path,
            source: std::io::Error::other(error.to_string()),
        }))
    }
}

/// Directories, and symlinks that resolve to directories.
fn is_dir_like(entry: &Entry) -> bool {
    let file_type = entry.file_type();
    file_type.is_dir()
        || (file_type.is_symlink() && fs::metadata(entry.path()).is_ok_and(|m| m.is_dir()))
}

/// The path of a symlink whose target cannot be resolved.
fn dangling_link(error: &jwalk::Error) -> Option<&Path> {
    error.path().filter(|path| {
        fs::symlink_metadata(path).is_ok_and(|m| m.file_type().is_symlink())
            && fs::metadata(path).is_err()
    })
}

/// Files first, then directories, each by name. Dangling links sort as files.
fn sort_key(child: &jwalk::Result<Entry>) -> (bool, Option<&OsStr>) {
    match child {
        Ok(entry) => (entry.client_state, Some(entry.file_name())),
        Err(e) => (false, e.path().and_then(Path::file_name)),
    }
}

/// Count the children of one directory read.
fn summarize(path: &Path, children: &[jwalk::Result<Entry>]) -> WalkEvent {
    let mut files = 0;
    let mut dirs = 0;
    for child in children {
        match child {
            Ok(entry) if entry.client_state => dirs += 1,
            Ok(_) => files += 1,
            Err(e) if dangling_link(e).is_some() => files += 1,
            Err(_) => {}
        }
    }
    WalkEvent::Directory {
        path: path.to_path_buf(),
        files,
        dirs,
    }
}
