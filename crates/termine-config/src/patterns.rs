//! Include pattern compilation and matching.

use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::ConfigError;

/// Compiled include patterns selecting corpus files inside input directories.
#[derive(Debug, Clone)]
pub struct IncludePatterns {
    /// All include patterns as one set.
    set: GlobSet,
}

impl IncludePatterns {
    /// Compiles include patterns.
    pub fn compile<S: AsRef<str>>(patterns: &[S]) -> Result<Self, ConfigError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            builder.add(compile_glob(pattern.as_ref())?);
        }
        let set = builder.build().map_err(|e| ConfigError::InvalidPattern {
            pattern: String::from("<combined include patterns>"),
            source: e,
        })?;
        Ok(Self { set })
    }

    /// Checks whether a path, relative to the input directory, is included.
    pub fn matches(&self, path: &Path) -> bool {
        self.set.is_match(path)
    }
}

/// Compiles a single glob pattern.
pub fn compile_glob(pattern: &str) -> Result<Glob, ConfigError> {
    Glob::new(pattern).map_err(|e| ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        source: e,
    })
}
