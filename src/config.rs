//! Layered configuration.
//!
//! Settings are merged with `figment`, lowest priority first:
//!
//! 1. compiled defaults
//! 2. a TOML file (`--config`, or `config.toml` in the platform config dir)
//! 3. `FICHE_*` environment variables
//! 4. command-line flags
//!
//! The first three layers produce a [`Config`]. [`RunConfig::resolve`] folds
//! the command line on top and yields the single immutable value a run is
//! driven by.
//!
//! ```toml
//! # ~/.config/fiche/config.toml
//! algorithm = "md5"
//! block_size = 65536
//! jobs = 4
//! duplicates = true
//! ignore = ["*.tmp", ".DS_Store"]
//! output_dir = "reports"
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cli::Cli;
use crate::output::workbook_file_name;
use crate::scanner::{DigestAlgorithm, ScanConfig, UnreadablePolicy, DEFAULT_BLOCK_SIZE};

/// Prefix of the environment variables read as configuration.
pub const ENV_PREFIX: &str = "FICHE_";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested configuration file does not exist.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// A layer could not be parsed or holds a value of the wrong type.
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] Box<figment::Error>),
}

/// Settings that can come from a file or the environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Hasher read buffer size, in bytes.
    pub block_size: usize,
    /// Content hash algorithm.
    pub algorithm: DigestAlgorithm,
    /// Number of hashing workers.
    pub jobs: usize,
    /// Descend into symlinked directories.
    pub follow_symlinks: bool,
    /// Leave unreadable files out instead of hashing them as empty.
    pub skip_unreadable: bool,
    /// Always run duplicate detection.
    pub duplicates: bool,
    /// Ignore patterns applied before the ones given on the command line.
    pub ignore: Vec<String>,
    /// Directory artifacts are written to.
    pub output_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            algorithm: DigestAlgorithm::default(),
            jobs: 1,
            follow_symlinks: false,
            skip_unreadable: false,
            duplicates: false,
            ignore: Vec::new(),
            output_dir: None,
        }
    }
}

impl Config {
    /// Load the configuration.
    ///
    /// With `explicit`, that file must exist. Without it, the platform
    /// default file is used when present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the explicit file is missing or any layer
    /// fails to parse.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match explicit {
            Some(path) if !path.is_file() => {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Some(path) => Some(path.to_path_buf()),
            None => Self::default_path(),
        };

        if let Some(path) = &file {
            log::debug!("Reading configuration from {}", path.display());
        }
        Self::extract(Self::layered(file.as_deref(), Env::prefixed(ENV_PREFIX)))
    }

    /// Load defaults merged with one TOML file, ignoring the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the file fails to parse.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        Self::extract(Figment::from(Serialized::defaults(Self::default())).merge(Toml::file(path)))
    }

    /// `config.toml` in the platform configuration directory.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "fiche").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    fn layered(file: Option<&Path>, env: Env) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = file {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(env)
    }

    fn extract(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract().map_err(Box::new)?;
        Ok(config.sanitized())
    }

    fn sanitized(mut self) -> Self {
        self.block_size = self.block_size.max(1);
        self.jobs = self.jobs.max(1);
        self
    }
}

/// Everything one run needs, resolved once and read-only afterwards.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Left (source) tree.
    pub left: PathBuf,
    /// Right (target) tree, if any.
    pub right: Option<PathBuf>,
    /// Run duplicate detection on each tree.
    pub duplicates: bool,
    /// Directory the CSV files go to.
    pub output_dir: PathBuf,
    /// Workbook path, when spreadsheet export was requested.
    pub xlsx: Option<PathBuf>,
    /// Hide progress output.
    pub quiet: bool,
    /// Scanner settings shared by both trees.
    pub scan: ScanConfig,
}

impl RunConfig {
    /// A run over `left` with default settings, writing to the current directory.
    #[must_use]
    pub fn new(left: impl Into<PathBuf>) -> Self {
        Self {
            left: left.into(),
            right: None,
            duplicates: false,
            output_dir: PathBuf::from("."),
            xlsx: None,
            quiet: false,
            scan: ScanConfig::default(),
        }
    }

    /// Fold the command line over the loaded configuration.
    #[must_use]
    pub fn resolve(cli: &Cli, config: Config) -> Self {
        let output_dir = cli
            .output_dir
            .clone()
            .or(config.output_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        let mut ignore = config.ignore;
        ignore.extend(cli.ignore_patterns.iter().cloned());

        let unreadable = if cli.skip_unreadable || config.skip_unreadable {
            UnreadablePolicy::Exclude
        } else {
            UnreadablePolicy::HashAsEmpty
        };

        let scan = ScanConfig::default()
            .with_block_size(cli.block_size.unwrap_or(config.block_size))
            .with_algorithm(cli.algorithm.unwrap_or(config.algorithm))
            .with_jobs(cli.jobs.unwrap_or(config.jobs))
            .with_follow_symlinks(cli.follow_symlinks || config.follow_symlinks)
            .with_unreadable(unreadable)
            .with_ignore_patterns(ignore);

        let mut run = Self::new(cli.left_directory.clone())
            .with_right(cli.right_directory.clone())
            .with_duplicates(cli.duplicates || config.duplicates)
            .with_output_dir(output_dir)
            .with_scan(scan);
        run.quiet = cli.quiet;
        if let Some(name) = &cli.xlsx {
            run = run.with_xlsx(name);
        }
        run
    }

    /// Set the right tree.
    #[must_use]
    pub fn with_right(mut self, right: Option<PathBuf>) -> Self {
        self.right = right;
        self
    }

    /// Enable or disable duplicate detection.
    #[must_use]
    pub fn with_duplicates(mut self, enabled: bool) -> Self {
        self.duplicates = enabled;
        self
    }

    /// Set the output directory. A workbook already set keeps its path.
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Request a workbook named `name`, resolved against the output directory.
    #[must_use]
    pub fn with_xlsx(mut self, name: &str) -> Self {
        self.xlsx = Some(self.output_dir.join(workbook_file_name(name)));
        self
    }

    /// Set the scanner settings.
    #[must_use]
    pub fn with_scan(mut self, scan: ScanConfig) -> Self {
        self.scan = scan;
        self
    }
}
