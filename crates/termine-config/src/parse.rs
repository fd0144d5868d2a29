//! Configuration file parsing.
//!
//! Parses individual `.termine.toml` files into intermediate `RawConfig`
//! structures that keep every field optional until merging.

use std::{fs, path::Path};

use serde::Deserialize;
use serde_with::{OneOrMany, serde_as};
#[cfg(test)]
use toml::de::Error as TomlError;

use crate::ConfigError;

/// Raw configuration as parsed directly from a TOML file.
///
/// All fields are optional to support partial configs that will be merged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// When true, stop discovery here and ignore parent and global configs.
    pub root: Option<bool>,
    /// Extraction settings section.
    pub extract: Option<RawExtractSettings>,
    /// Threshold settings section.
    pub thresholds: Option<RawThresholdSettings>,
    /// Corpus input section.
    pub input: Option<RawInputSettings>,
    /// Output section.
    pub output: Option<RawOutputSettings>,
}

/// Raw extraction settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawExtractSettings {
    /// Lowercase words written in Title Case.
    pub fold_titlecase: Option<bool>,
    /// Lowercase every word.
    pub ignore_case: Option<bool>,
    /// Accelerator characters to strip.
    pub accelerators: Option<String>,
    /// Maximum words per phrase.
    pub term_words: Option<usize>,
    /// Source language code.
    pub source_language: Option<String>,
    /// Extract from the target side.
    pub invert: Option<bool>,
    /// Stopword file, relative to the config file.
    pub stopword_list: Option<String>,
}

/// Raw threshold settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawThresholdSettings {
    /// Minimum corpus files containing a term.
    pub inputs_needed: Option<usize>,
    /// Minimum non-stopwords in a term.
    pub nonstop_needed: Option<usize>,
    /// Minimum distinct sources for whole-message terms.
    pub fullmsg_needed: Option<usize>,
    /// Minimum distinct sources for substring terms.
    pub substr_needed: Option<usize>,
    /// Minimum distinct source code locations.
    pub locs_needed: Option<usize>,
}

/// Raw corpus input settings.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawInputSettings {
    /// Glob pattern(s) selecting corpus files inside input directories.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub include: Option<Vec<String>>,
}

/// Raw output settings.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawOutputSettings {
    /// Sort key(s). Accepts either a single string or an array of strings.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub sort: Option<Vec<String>>,
    /// Maximum terms shown in table output.
    pub limit: Option<usize>,
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses configuration from a TOML string without path context.
#[cfg(test)]
pub fn parse_config(contents: &str) -> Result<RawConfig, TomlError> {
    toml::from_str(contents)
}

/// Checks if a config file has `root = true` set.
///
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    toml::from_str::<RawConfig>(&contents).is_ok_and(|config| config.root == Some(true))
}
