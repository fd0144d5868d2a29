//! Stopword rule tables.
//!
//! A stopword file is line oriented. The first character of each line selects
//! what the rest of the line means:
//!
//! | Prefix | Meaning |
//! |---|---|
//! | `#` | comment |
//! | `+` | plain entry, no actions |
//! | `:` | skip |
//! | `<` | phrase |
//! | `=` | word |
//! | `>` | word + skip |
//! | `@` | word + phrase |
//! | `/` | regular expression, matched against the whole word (word + phrase) |
//! | `!` | case directive: `!C` preserve case, `!F` fold title case, `!I` ignore case |
//!
//! Any other prefix ends parsing: the offending line and everything after it
//! are ignored, and a single warning is logged.

use std::{
    borrow::Cow,
    collections::HashMap,
    fmt, fs, io,
    path::Path,
};

use regex::Regex;
use stop_words::LANGUAGE;
use tracing::{debug, warn};

use crate::{CaseFold, StopwordError};

/// The set of exclusion actions attached to a stopword.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StopActions {
    /// The word may be elided inside a phrase and does not count toward its length.
    pub skip: bool,
    /// The word is never recorded as a single-word term.
    pub word: bool,
    /// The word terminates any phrase in progress.
    pub phrase: bool,
}

impl StopActions {
    /// No actions: the word is an ordinary term.
    pub const NONE: Self = Self {
        skip: false,
        word: false,
        phrase: false,
    };
    /// `:` entries.
    pub const SKIP: Self = Self {
        skip: true,
        word: false,
        phrase: false,
    };
    /// `<` entries.
    pub const PHRASE: Self = Self {
        skip: false,
        word: false,
        phrase: true,
    };
    /// `=` entries.
    pub const WORD: Self = Self {
        skip: false,
        word: true,
        phrase: false,
    };
    /// `>` entries.
    pub const WORD_SKIP: Self = Self {
        skip: true,
        word: true,
        phrase: false,
    };
    /// `@` entries and every pattern.
    pub const WORD_PHRASE: Self = Self {
        skip: false,
        word: true,
        phrase: true,
    };

    /// Returns the actions selected by a stopword file line prefix.
    pub fn from_prefix(prefix: char) -> Option<Self> {
        match prefix {
            '+' => Some(Self::NONE),
            ':' => Some(Self::SKIP),
            '<' => Some(Self::PHRASE),
            '=' => Some(Self::WORD),
            '>' => Some(Self::WORD_SKIP),
            '@' => Some(Self::WORD_PHRASE),
            _ => None,
        }
    }

    /// Returns true if no action is set.
    pub fn is_empty(&self) -> bool {
        !(self.skip || self.word || self.phrase)
    }
}

impl fmt::Display for StopActions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = [
            (self.skip, "skip"),
            (self.word, "word"),
            (self.phrase, "phrase"),
        ]
        .into_iter()
        .filter_map(|(set, name)| set.then_some(name))
        .collect();

        if names.is_empty() {
            write!(f, "none")
        } else {
            write!(f, "{}", names.join("+"))
        }
    }
}

/// A problem found while parsing a stopword file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopwordWarning {
    /// A `!` line with an unknown directive. Parsing continues.
    BadDirective {
        /// 1-based line number.
        line: usize,
    },
    /// A line with an unknown prefix. Parsing stopped here.
    BadEntry {
        /// 1-based line number.
        line: usize,
        /// The unrecognized prefix character.
        character: char,
    },
    /// A `/` line whose pattern does not compile. Parsing stopped here.
    BadPattern {
        /// 1-based line number.
        line: usize,
        /// The pattern text.
        pattern: String,
    },
}

impl StopwordWarning {
    /// Returns true if this warning ended parsing of the file.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::BadDirective { .. })
    }
}

impl fmt::Display for StopwordWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadDirective { line } => write!(f, "{line} - bad case mapping directive"),
            Self::BadEntry { line, character } => write!(
                f,
                "{line} - bad stopword entry starts with '{character}', all lines after error ignored"
            ),
            Self::BadPattern { line, pattern } => write!(
                f,
                "{line} - bad stopword pattern '{pattern}', all lines after error ignored"
            ),
        }
    }
}

/// A compiled `/` entry.
#[derive(Debug, Clone)]
struct StopPattern {
    /// Pattern anchored at both ends.
    regex: Regex,
    /// Actions applied when the pattern matches.
    actions: StopActions,
}

/// Stopword classification table.
///
/// Exact entries take precedence over patterns; patterns are tried in file
/// order and the first match wins.
#[derive(Debug, Clone, Default)]
pub struct StopwordTable {
    /// Exact entries keyed by the word as written in the file.
    words: HashMap<String, StopActions>,
    /// Patterns in file order.
    patterns: Vec<StopPattern>,
    /// Case policy used to map words before lookup.
    case: CaseFold,
    /// Problems found while parsing.
    warnings: Vec<StopwordWarning>,
}

impl StopwordTable {
    /// Creates an empty table that folds title case.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a stopword file.
    ///
    /// A missing file yields an empty table.
    pub fn load(path: &Path) -> Result<Self, StopwordError> {
        match fs::read_to_string(path) {
            Ok(contents) => Ok(Self::parse(&contents, &path.display().to_string())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(target: "termine.stopwords", path = %path.display(), "stopword file not found, using empty table");
                Ok(Self::new())
            }
            Err(source) => Err(StopwordError::ReadFile {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Parses stopword rules from a string.
    ///
    /// `origin` names the source in log messages.
    pub fn parse(contents: &str, origin: &str) -> Self {
        let mut table = Self::new();

        for (index, line) in contents.lines().enumerate() {
            let number = index + 1;
            let mut chars = line.chars();
            let Some(prefix) = chars.next() else {
                continue;
            };
            let rest = chars.as_str();

            match prefix {
                '#' => {}
                '!' => table.apply_directive(rest, number, origin),
                '/' => {
                    if table.insert_pattern(rest).is_err() {
                        table.stop_parsing(
                            StopwordWarning::BadPattern {
                                line: number,
                                pattern: rest.to_string(),
                            },
                            origin,
                        );
                        break;
                    }
                }
                _ => match StopActions::from_prefix(prefix) {
                    Some(actions) => table.insert(rest, actions),
                    None => {
                        table.stop_parsing(
                            StopwordWarning::BadEntry {
                                line: number,
                                character: prefix,
                            },
                            origin,
                        );
                        break;
                    }
                },
            }
        }

        table
    }

    /// Builds a table from the bundled stopword list for a language.
    ///
    /// The bundled lists are the short NLTK function word lists (articles,
    /// pronouns, prepositions, auxiliaries), so interface vocabulary such as
    /// "open" or "file" stays extractable. Every bundled word is classified
    /// `word` + `skip`: never a term on its own, but allowed inside a phrase.
    /// `language` may carry a region suffix (`en_US`, `pt-BR`). Unknown
    /// languages yield an empty table.
    pub fn builtin(language: &str) -> Self {
        let mut table = Self::new();
        let Some(lang) = builtin_language(language) else {
            debug!(target: "termine.stopwords", %language, "no bundled stopword list");
            return table;
        };

        for word in stop_words::get(lang) {
            table.insert(word, StopActions::WORD_SKIP);
        }

        table
    }

    /// Adds or replaces an exact entry.
    pub fn insert(&mut self, word: &str, actions: StopActions) {
        self.words.insert(word.to_string(), actions);
    }

    /// Adds a pattern entry, matched against the whole mapped word.
    pub fn insert_pattern(&mut self, pattern: &str) -> Result<(), regex::Error> {
        let regex = Regex::new(&format!("^(?:{pattern})$"))?;
        self.patterns.push(StopPattern {
            regex,
            actions: StopActions::WORD_PHRASE,
        });
        Ok(())
    }

    /// Returns the case policy used for lookups.
    pub fn case_fold(&self) -> CaseFold {
        self.case
    }

    /// Maps `word` to the form used as a lookup key.
    pub fn stopmap<'a>(&self, word: &'a str) -> Cow<'a, str> {
        self.case.apply(word)
    }

    /// Classifies `word`.
    pub fn stopword(&self, word: &str) -> StopActions {
        let key = self.stopmap(word);
        if let Some(actions) = self.words.get(key.as_ref()) {
            return *actions;
        }
        self.patterns
            .iter()
            .find(|pattern| pattern.regex.is_match(&key))
            .map_or(StopActions::NONE, |pattern| pattern.actions)
    }

    /// Returns warnings collected while parsing.
    pub fn warnings(&self) -> &[StopwordWarning] {
        &self.warnings
    }

    /// Returns the number of exact entries and patterns.
    pub fn len(&self) -> usize {
        self.words.len() + self.patterns.len()
    }

    /// Returns true if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty() && self.patterns.is_empty()
    }

    /// Applies a `!` case directive.
    fn apply_directive(&mut self, directive: &str, line: usize, origin: &str) {
        match directive.chars().next() {
            Some('C') => self.case = CaseFold::PRESERVE,
            Some('F') => {
                self.case = CaseFold {
                    fold_titlecase: true,
                    ignore_case: false,
                };
            }
            Some('I') => self.case.ignore_case = true,
            _ => {
                let warning = StopwordWarning::BadDirective { line };
                warn!(target: "termine.stopwords", "{origin}:{warning}");
                self.warnings.push(warning);
            }
        }
    }

    /// Records a warning that ends parsing.
    fn stop_parsing(&mut self, warning: StopwordWarning, origin: &str) {
        warn!(target: "termine.stopwords", "{origin}:{warning}");
        self.warnings.push(warning);
    }
}

/// Maps a language code to a bundled stopword list.
fn builtin_language(code: &str) -> Option<LANGUAGE> {
    let base = code
        .split(['_', '-'])
        .next()
        .unwrap_or(code)
        .to_ascii_lowercase();

    match base.as_str() {
        "en" => Some(LANGUAGE::English),
        "fr" => Some(LANGUAGE::French),
        "de" => Some(LANGUAGE::German),
        "es" => Some(LANGUAGE::Spanish),
        "it" => Some(LANGUAGE::Italian),
        "pt" => Some(LANGUAGE::Portuguese),
        "nl" => Some(LANGUAGE::Dutch),
        "sv" => Some(LANGUAGE::Swedish),
        "ru" => Some(LANGUAGE::Russian),
        _ => None,
    }
}
