//! Configuration system for termine.
//!
//! termine uses TOML configuration files named `.termine.toml`. Configuration is
//! resolved by walking up the directory tree from the current working directory,
//! collecting any `.termine.toml` files found, then loading `~/.termine.toml` as
//! the global config with lowest precedence.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod patterns;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::path::{Path, PathBuf};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawConfig, RawExtractSettings, RawInputSettings, RawOutputSettings, RawThresholdSettings,
    parse_config_file, parse_config_str,
};
pub use patterns::IncludePatterns;
use serde::Serialize;
pub use templates::{global_template, local_template};
use termine_extract::{
    CaseFold, DEFAULT_SORT_ORDER, DEFAULT_TERM_LENGTH, ExtractorConfig, Thresholds,
};
pub use validate::ConfigWarning;
use validate::validate_config;

/// Include patterns used when none are configured.
pub const DEFAULT_INCLUDE_PATTERNS: &[&str] = &["**/*.jsonl"];

/// Top-level merged configuration for termine.
///
/// This represents the fully resolved configuration after merging all
/// discovered `.termine.toml` files according to precedence rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Extraction settings.
    pub extract: ExtractSettings,
    /// Support thresholds.
    pub thresholds: ThresholdSettings,
    /// Corpus input settings.
    pub input: InputSettings,
    /// Output settings.
    pub output: OutputSettings,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant
    /// `.termine.toml` files, closest to `cwd` winning.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths, highest
    /// precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        let parsed = files
            .iter()
            .map(|path| {
                Ok(ParsedConfig {
                    path: path.clone(),
                    config: parse_config_file(path)?,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(merge_configs(&parsed))
    }

    /// Compiles the corpus include patterns.
    pub fn compile_includes(&self) -> Result<IncludePatterns, ConfigError> {
        IncludePatterns::compile(&self.input.include)
    }

    /// Validates the configuration and returns any warnings.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Builds the extraction engine settings.
    pub fn extractor_config(&self) -> ExtractorConfig {
        ExtractorConfig {
            case: self.extract.case_fold(),
            accelerators: self.extract.accelerators.clone(),
            term_length: self.extract.term_words,
            source_language: self.extract.source_language.clone(),
            invert: self.extract.invert,
        }
    }

    /// Builds the filtering thresholds.
    ///
    /// `inputs_needed` applies when the configuration leaves it unset.
    pub fn thresholds(&self, inputs_needed: usize) -> Thresholds {
        Thresholds {
            inputs_needed: self.thresholds.inputs_needed.unwrap_or(inputs_needed),
            fullmsg_needed: self.thresholds.fullmsg_needed,
            substr_needed: self.thresholds.substr_needed,
            locs_needed: self.thresholds.locs_needed,
        }
    }

    /// Serializes the effective settings to TOML format.
    ///
    /// The output uses the same layout as a `.termine.toml` file.
    pub fn settings_to_toml(&self) -> String {
        let serializable = SerializableSettings {
            extract: &self.extract,
            thresholds: &self.thresholds,
            input: &self.input,
            output: &self.output,
        };
        toml::to_string_pretty(&serializable).expect("settings serialization should not fail")
    }
}

/// Settings for the extraction engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractSettings {
    /// Lowercase words written in Title Case.
    pub fold_titlecase: bool,
    /// Lowercase every word.
    pub ignore_case: bool,
    /// Accelerator characters to strip.
    pub accelerators: String,
    /// Maximum words per phrase, not counting skip words.
    pub term_words: usize,
    /// Source language code, also used to pick the built-in stopword list.
    pub source_language: String,
    /// Extract from the target side.
    pub invert: bool,
    /// Resolved stopword file. The built-in list applies when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stopword_list: Option<PathBuf>,
}

impl ExtractSettings {
    /// Returns the case policy for extracted terms.
    pub fn case_fold(&self) -> CaseFold {
        CaseFold {
            fold_titlecase: self.fold_titlecase,
            ignore_case: self.ignore_case,
        }
    }
}

impl Default for ExtractSettings {
    fn default() -> Self {
        let case = CaseFold::default();
        Self {
            fold_titlecase: case.fold_titlecase,
            ignore_case: case.ignore_case,
            accelerators: String::new(),
            term_words: DEFAULT_TERM_LENGTH,
            source_language: String::from("en"),
            invert: false,
            stopword_list: None,
        }
    }
}

/// Minimum support a term needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThresholdSettings {
    /// Minimum corpus files. Unset means 1 for a single input file, else 2.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inputs_needed: Option<usize>,
    /// Minimum non-stopwords per term.
    pub nonstop_needed: usize,
    /// Minimum distinct sources for whole-message terms.
    pub fullmsg_needed: usize,
    /// Minimum distinct sources for substring terms.
    pub substr_needed: usize,
    /// Minimum distinct source code locations.
    pub locs_needed: usize,
}

impl Default for ThresholdSettings {
    fn default() -> Self {
        let thresholds = Thresholds::default();
        Self {
            inputs_needed: None,
            nonstop_needed: 1,
            fullmsg_needed: thresholds.fullmsg_needed,
            substr_needed: thresholds.substr_needed,
            locs_needed: thresholds.locs_needed,
        }
    }
}

/// Corpus input settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputSettings {
    /// Glob patterns selecting corpus files inside input directories.
    pub include: Vec<String>,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            include: DEFAULT_INCLUDE_PATTERNS.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputSettings {
    /// Sort keys, the last one primary.
    pub sort: Vec<String>,
    /// Maximum terms in table output; 0 shows all.
    pub limit: usize,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            sort: DEFAULT_SORT_ORDER.iter().map(|k| k.to_string()).collect(),
            limit: 0,
        }
    }
}

/// Borrowed settings laid out as a config file.
#[derive(Serialize)]
struct SerializableSettings<'a> {
    /// Extraction settings.
    extract: &'a ExtractSettings,
    /// Support thresholds.
    thresholds: &'a ThresholdSettings,
    /// Corpus input settings.
    input: &'a InputSettings,
    /// Output settings.
    output: &'a OutputSettings,
}
