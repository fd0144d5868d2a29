//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`, applying
//! precedence rules and resolving paths relative to the file that set them.

use std::path::{Path, PathBuf};

use crate::{
    Config, ExtractSettings, InputSettings, OutputSettings, ThresholdSettings,
    parse::{
        RawConfig, RawExtractSettings, RawInputSettings, RawOutputSettings, RawThresholdSettings,
    },
};

/// A parsed config file with its source path.
#[derive(Debug, Clone)]
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

impl ParsedConfig {
    /// Directory containing the config file.
    fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs are given highest precedence first (closest to the working
/// directory) and lowest precedence last (global config). Every setting takes
/// its value from the first file that defines it; lists such as `sort` and
/// `include` are replaced as a whole, not concatenated.
pub fn merge_configs(configs: &[ParsedConfig]) -> Config {
    let mut config = Config {
        config_root: configs.first().map(|c| c.dir().to_path_buf()),
        ..Config::default()
    };

    // lowest precedence first so closer files overwrite
    for parsed in configs.iter().rev() {
        let raw = &parsed.config;
        if let Some(extract) = &raw.extract {
            apply_raw_extract(&mut config.extract, extract, parsed.dir());
        }
        if let Some(thresholds) = &raw.thresholds {
            apply_raw_thresholds(&mut config.thresholds, thresholds);
        }
        if let Some(input) = &raw.input {
            apply_raw_input(&mut config.input, input);
        }
        if let Some(output) = &raw.output {
            apply_raw_output(&mut config.output, output);
        }
    }

    config
}

/// Applies raw extraction settings, resolving the stopword list against `dir`.
fn apply_raw_extract(result: &mut ExtractSettings, raw: &RawExtractSettings, dir: &Path) {
    if let Some(v) = raw.fold_titlecase {
        result.fold_titlecase = v;
    }
    if let Some(v) = raw.ignore_case {
        result.ignore_case = v;
    }
    if let Some(v) = &raw.accelerators {
        result.accelerators.clone_from(v);
    }
    if let Some(v) = raw.term_words {
        result.term_words = v;
    }
    if let Some(v) = &raw.source_language {
        result.source_language.clone_from(v);
    }
    if let Some(v) = raw.invert {
        result.invert = v;
    }
    if let Some(v) = &raw.stopword_list {
        result.stopword_list = Some(dir.join(v));
    }
}

/// Applies raw threshold settings.
fn apply_raw_thresholds(result: &mut ThresholdSettings, raw: &RawThresholdSettings) {
    if let Some(v) = raw.inputs_needed {
        result.inputs_needed = Some(v);
    }
    if let Some(v) = raw.nonstop_needed {
        result.nonstop_needed = v;
    }
    if let Some(v) = raw.fullmsg_needed {
        result.fullmsg_needed = v;
    }
    if let Some(v) = raw.substr_needed {
        result.substr_needed = v;
    }
    if let Some(v) = raw.locs_needed {
        result.locs_needed = v;
    }
}

/// Applies raw input settings.
fn apply_raw_input(result: &mut InputSettings, raw: &RawInputSettings) {
    if let Some(v) = &raw.include {
        result.include.clone_from(v);
    }
}

/// Applies raw output settings.
fn apply_raw_output(result: &mut OutputSettings, raw: &RawOutputSettings) {
    if let Some(v) = &raw.sort {
        result.sort.clone_from(v);
    }
    if let Some(v) = raw.limit {
        result.limit = v;
    }
}
