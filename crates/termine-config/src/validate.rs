//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for potential issues.

use std::fmt;

use termine_extract::SortOrder;

use crate::{Config, patterns::compile_glob};

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// A sort key is not one of the known keys; it will be skipped.
    UnknownSortOrder {
        /// The unrecognized key.
        key: String,
    },
    /// The configured stopword file does not exist.
    StopwordListMissing {
        /// The resolved path.
        path: String,
    },
    /// `term_words` is zero, which records no phrases.
    ZeroTermWords,
    /// An include pattern does not compile.
    InvalidIncludePattern {
        /// The pattern.
        pattern: String,
        /// Why it was rejected.
        error: String,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownSortOrder { key } => {
                write!(
                    f,
                    "unknown sort order '{key}' (expected frequency, dictionary or length)"
                )
            }
            Self::StopwordListMissing { path } => {
                write!(f, "stopword list does not exist: {path}")
            }
            Self::ZeroTermWords => write!(f, "term_words is 0, no phrases will be extracted"),
            Self::InvalidIncludePattern { pattern, error } => {
                write!(f, "include pattern '{pattern}' is invalid: {error}")
            }
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    for key in &config.output.sort {
        if key.parse::<SortOrder>().is_err() {
            warnings.push(ConfigWarning::UnknownSortOrder { key: key.clone() });
        }
    }

    if let Some(path) = &config.extract.stopword_list
        && !path.is_file()
    {
        warnings.push(ConfigWarning::StopwordListMissing {
            path: path.display().to_string(),
        });
    }

    if config.extract.term_words == 0 {
        warnings.push(ConfigWarning::ZeroTermWords);
    }

    for pattern in &config.input.include {
        if let Err(e) = compile_glob(pattern) {
            warnings.push(ConfigWarning::InvalidIncludePattern {
                pattern: pattern.clone(),
                error: e.to_string(),
            });
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use std::{fs, path::PathBuf};

    use super::*;

    #[test]
    fn default_config_is_clean() {
        assert!(Config::default().validate().is_empty());
    }

    #[test]
    fn unknown_sort_order() {
        let mut config = Config::default();
        config.output.sort = vec!["frequency".into(), "alphabetical".into()];

        assert_eq!(
            config.validate(),
            vec![ConfigWarning::UnknownSortOrder {
                key: "alphabetical".into()
            }]
        );
    }

    #[test]
    fn stopword_list_missing() {
        let mut config = Config::default();
        config.extract.stopword_list = Some(PathBuf::from("/nonexistent/termine/stoplist"));

        let warnings = config.validate();
        assert!(
            warnings
                .iter()
                .any(|w| matches!(w, ConfigWarning::StopwordListMissing { path } if path.contains("stoplist")))
        );
    }

    #[test]
    fn stopword_list_present() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("stoplist");
        fs::write(&path, "=the\n").unwrap();

        let mut config = Config::default();
        config.extract.stopword_list = Some(path);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn zero_term_words() {
        let mut config = Config::default();
        config.extract.term_words = 0;
        assert_eq!(config.validate(), vec![ConfigWarning::ZeroTermWords]);
    }

    #[test]
    fn invalid_include_pattern() {
        let mut config = Config::default();
        config.input.include = vec!["[broken".into()];

        let warnings = config.validate();
        assert_eq!(warnings.len(), 1);
        assert!(matches!(
            &warnings[0],
            ConfigWarning::InvalidIncludePattern { pattern, .. } if pattern == "[broken"
        ));
    }

    #[test]
    fn warning_display() {
        assert_eq!(
            ConfigWarning::StopwordListMissing {
                path: "/some/path".into()
            }
            .to_string(),
            "stopword list does not exist: /some/path"
        );
        assert_eq!(
            ConfigWarning::ZeroTermWords.to_string(),
            "term_words is 0, no phrases will be extracted"
        );
    }
}
