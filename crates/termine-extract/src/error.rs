//! Error types for terminology extraction.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that can occur when loading a stopword table.
///
/// Malformed lines inside a stopword file are not errors: they are reported as
/// [`StopwordWarning`](crate::StopwordWarning)s and end parsing of that file.
#[derive(Debug, Error)]
pub enum StopwordError {
    /// Failed to read the stopword file.
    #[error("failed to read stopword file {path}: {source}")]
    ReadFile {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}

/// A sort key name that is not one of `frequency`, `dictionary` or `length`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort order: {0}")]
pub struct UnknownSortOrder(pub String);
