//! Corpus input: locating JSON Lines files and reading translation units.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use termine_config::IncludePatterns;
use termine_extract::TranslationUnit;
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Errors reading a corpus file.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// File being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A line is not a valid translation unit.
    #[error("{path}:{line}: invalid translation unit: {source}")]
    Parse {
        /// File being read.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

/// Reads every translation unit in a JSON Lines file. Blank lines are skipped.
pub fn read_units(path: &Path) -> Result<Vec<TranslationUnit>, CorpusError> {
    let contents = fs::read_to_string(path).map_err(|source| CorpusError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    contents
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str(line).map_err(|source| CorpusError::Parse {
                path: path.to_path_buf(),
                line: index + 1,
                source,
            })
        })
        .collect()
}

/// Expands the command line inputs into a sorted list of corpus files.
///
/// Files are taken as given. Directories are walked and their files kept when
/// the path relative to the directory matches `include`.
pub fn collect_inputs(inputs: &[PathBuf], include: &IncludePatterns) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for input in inputs {
        if !input.is_dir() {
            files.push(input.clone());
            continue;
        }

        for entry in WalkDir::new(input).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(
                        target: "termine",
                        input = %input.display(),
                        "skipping unreadable entry: {e}"
                    );
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry.path().strip_prefix(input).unwrap_or(entry.path());
            if include.matches(relative) {
                files.push(entry.into_path());
            } else {
                debug!(target: "termine", path = %relative.display(), "not included");
            }
        }
    }

    files.sort();
    files.dedup();
    files
}

/// Default file threshold: a lone corpus file only needs itself, anything
/// else needs a term to recur across files.
pub fn default_inputs_needed(inputs: &[PathBuf]) -> usize {
    match inputs {
        [single] if !single.is_dir() => 1,
        _ => 2,
    }
}
