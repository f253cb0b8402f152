//! Streaming file hasher.
//!
//! # Overview
//! This module provides the [`Hasher`] struct for computing content digests
//! of files. Files are read in fixed-size blocks so memory use stays flat
//! regardless of file size. MD5 is the default algorithm; it identifies
//! content, it does not protect it.

use std::fs::File;
use std::io::{self, ErrorKind, Read};
use std::path::Path;

use clap::ValueEnum;
use md5::{Digest as _, Md5};
use serde::{Deserialize, Serialize};

use super::{Digest, HashError};

/// Default read buffer size in bytes.
pub const DEFAULT_BLOCK_SIZE: usize = 1024;

/// Content hash algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    /// MD5, 32 hex characters
    #[default]
    Md5,
    /// BLAKE3, 64 hex characters
    Blake3,
}

impl std::fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DigestAlgorithm::Md5 => write!(f, "md5"),
            DigestAlgorithm::Blake3 => write!(f, "blake3"),
        }
    }
}

/// Running hash state for one file.
enum State {
    Md5(Md5),
    Blake3(Box<blake3::Hasher>),
}

impl State {
    fn new(algorithm: DigestAlgorithm) -> Self {
        match algorithm {
            DigestAlgorithm::Md5 => State::Md5(Md5::new()),
            DigestAlgorithm::Blake3 => State::Blake3(Box::new(blake3::Hasher::new())),
        }
    }

    fn update(&mut self, data: &[u8]) {
        match self {
            State::Md5(md5) => md5.update(data),
            State::Blake3(b3) => {
                b3.update(data);
            }
        }
    }

    fn finish(self) -> Digest {
        match self {
            State::Md5(md5) => Digest::from_hex(format!("{:x}", md5.finalize())),
            State::Blake3(b3) => Digest::from_hex(b3.finalize().to_hex().to_string()),
        }
    }
}

/// Block-wise content hasher.
///
/// # Example
///
/// ```no_run
/// use fiche::scanner::Hasher;
/// use std::path::Path;
///
/// let hasher = Hasher::new();
/// let digest = hasher.digest(Path::new("Cargo.toml")).unwrap();
/// println!("{}", digest);
/// ```
#[derive(Debug, Clone)]
pub struct Hasher {
    algorithm: DigestAlgorithm,
    block_size: usize,
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher {
    /// Create an MD5 hasher reading 1024-byte blocks.
    #[must_use]
    pub fn new() -> Self {
        Self {
            algorithm: DigestAlgorithm::default(),
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }

    /// Use a different algorithm.
    #[must_use]
    pub fn with_algorithm(mut self, algorithm: DigestAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Use a different read buffer size (at least one byte).
    #[must_use]
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size.max(1);
        self
    }

    /// The configured algorithm.
    #[must_use]
    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    /// The configured block size.
    #[must_use]
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Digest of zero-length input.
    #[must_use]
    pub fn empty_digest(&self) -> Digest {
        State::new(self.algorithm).finish()
    }

    /// Hash the full content of the file at `path`.
    ///
    /// The file is closed before this returns, on success and on failure.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] if the file cannot be opened or a read fails.
    pub fn digest(&self, path: &Path) -> Result<Digest, HashError> {
        let file = File::open(path).map_err(|e| map_io_error(path, e))?;
        self.digest_reader(file).map_err(|e| map_io_error(path, e))
    }

    /// Hash everything readable from `reader`.
    ///
    /// # Errors
    ///
    /// Returns the first non-interrupt I/O error from the reader.
    pub fn digest_reader<R: Read>(&self, mut reader: R) -> io::Result<Digest> {
        let mut state = State::new(self.algorithm);
        let mut buffer = vec![0u8; self.block_size];

        loop {
            match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => state.update(&buffer[..n]),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }

        Ok(state.finish())
    }
}

fn map_io_error(path: &Path, error: io::Error) -> HashError {
    match error.kind() {
        ErrorKind::NotFound => HashError::NotFound(path.to_path_buf()),
        ErrorKind::PermissionDenied => HashError::PermissionDenied(path.to_path_buf()),
        _ => HashError::Io {
            path: path.to_path_buf(),
            source: error,
        },
    }
}
