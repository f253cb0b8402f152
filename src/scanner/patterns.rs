//! Ignore patterns matched against file base names.
//!
//! Patterns are shell-style globs (`*`, `?`, `[abc]`, `[!abc]`) and are
//! tested against the file name only, never against the directory part of
//! the path. A backslash is a literal character, not an escape.

use std::path::Path;

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

/// Compiled set of ignore patterns.
#[derive(Debug, Clone)]
pub struct IgnoreSet {
    glob_set: GlobSet,
    patterns: Vec<String>,
}

impl Default for IgnoreSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl IgnoreSet {
    /// A set that ignores nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            glob_set: GlobSet::empty(),
            patterns: Vec::new(),
        }
    }

    /// Compile `patterns`.
    ///
    /// A pattern that does not compile is logged and left out; the rest of
    /// the set still applies.
    #[must_use]
    pub fn new(patterns: &[String]) -> Self {
        let mut builder = GlobSetBuilder::new();
        let mut accepted = Vec::new();

        for pattern in patterns {
            match GlobBuilder::new(pattern).backslash_escape(false).build() {
                Ok(glob) => {
                    builder.add(glob);
                    accepted.push(pattern.clone());
                }
                Err(e) => log::warn!("Invalid ignore pattern '{}': {}", pattern, e),
            }
        }

        match builder.build() {
            Ok(glob_set) => Self {
                glob_set,
                patterns: accepted,
            },
            Err(e) => {
                log::warn!("Failed to build ignore patterns: {}", e);
                Self::empty()
            }
        }
    }

    /// Patterns that compiled.
    #[must_use]
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// `true` when no pattern is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.glob_set.is_empty()
    }

    /// Check a bare file name.
    #[must_use]
    pub fn is_ignored_name(&self, name: &str) -> bool {
        !self.glob_set.is_empty() && self.glob_set.is_match(name)
    }

    /// Check the base name of `path`.
    #[must_use]
    pub fn is_ignored(&self, path: &Path) -> bool {
        path.file_name()
            .is_some_and(|name| self.is_ignored_name(&name.to_string_lossy()))
    }
}
