//! Command-line interface definitions for fiche.
//!
//! This module defines all CLI arguments and options using the clap derive API.
//!
//! # Example
//!
//! ```bash
//! # List a tree and export left.csv
//! fiche ~/Photos
//!
//! # Duplicates on both sides, plus the comparison, into a workbook
//! fiche ~/Photos /mnt/backup/Photos -d -x photos
//!
//! # Skip temporary files
//! fiche ~/Projects -i '*.tmp' '*.swp'
//! ```

use clap::Parser;
use std::path::PathBuf;

use crate::scanner::DigestAlgorithm;

/// Workbook name used when `--xlsx` is given without a value.
pub const DEFAULT_WORKBOOK: &str = "fiche";

/// Find duplicated files and compare two directories by content hash.
///
/// Every regular file is hashed. With one directory, fiche lists it (and
/// its duplicates with -d). With two, it also lists the files whose
/// content exists only on one side.
#[derive(Debug, Parser)]
#[command(name = "fiche")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Left (source) directory
    #[arg(value_name = "LEFT_DIRECTORY")]
    pub left_directory: PathBuf,

    /// Right (target) directory
    #[arg(value_name = "RIGHT_DIRECTORY")]
    pub right_directory: Option<PathBuf>,

    /// Also write every table into one Excel workbook
    ///
    /// `.xlsx` is appended when missing. Without a value, `fiche.xlsx` is used.
    #[arg(
        short = 'x',
        long = "xlsx",
        value_name = "NAME",
        num_args = 0..=1,
        default_missing_value = DEFAULT_WORKBOOK
    )]
    pub xlsx: Option<String>,

    /// Find duplicated files on each side (left_duplicates, right_duplicates)
    #[arg(short, long)]
    pub duplicates: bool,

    /// Glob patterns of file names to leave out of the analysis
    #[arg(short, long = "ignore", value_name = "PATTERN", num_args = 0..)]
    pub ignore_patterns: Vec<String>,

    /// Directory the result files are written to
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Configuration file (TOML)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Read buffer size used while hashing, in bytes
    #[arg(long, value_name = "BYTES")]
    pub block_size: Option<usize>,

    /// Content hash algorithm
    #[arg(long, value_enum)]
    pub algorithm: Option<DigestAlgorithm>,

    /// Number of files hashed in parallel
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Descend into symlinked directories
    ///
    /// Warning: May cause infinite loops if symlinks form cycles.
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Leave unreadable files out of all tables instead of hashing them as empty
    #[arg(long)]
    pub skip_unreadable: bool,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}
