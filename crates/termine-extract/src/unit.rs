//! Translation units consumed by the extractor.

use serde::{Deserialize, Deserializer, Serialize};

/// One source/target pair from a translation corpus, with its metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationUnit {
    /// Source text. Plural units give an array; the first form is used.
    #[serde(deserialize_with = "first_form")]
    pub source: String,
    /// Target text (empty when untranslated).
    pub target: String,
    /// Source code locations, usually `path:line`.
    pub locations: Vec<String>,
    /// Notes from the developers of the translated program.
    pub developer_notes: Vec<String>,
    /// Notes from translators.
    pub translator_notes: Vec<String>,
    /// Header or metadata unit that carries no translatable text.
    pub header: bool,
    /// The target needs review.
    #[serde(skip_serializing_if = "is_false")]
    pub fuzzy: bool,
}

impl TranslationUnit {
    /// Creates a unit from a source and target string.
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            ..Self::default()
        }
    }

    /// Adds a location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.locations.push(location.into());
        self
    }

    /// Adds a developer note.
    pub fn with_developer_note(mut self, note: impl Into<String>) -> Self {
        self.developer_notes.push(note.into());
        self
    }

    /// Adds a translator note.
    pub fn with_translator_note(mut self, note: impl Into<String>) -> Self {
        self.translator_notes.push(note.into());
        self
    }

    /// Returns true for header units.
    pub fn is_header(&self) -> bool {
        self.header
    }

    /// Returns a copy with source and target swapped.
    pub fn inverted(&self) -> Self {
        Self {
            source: self.target.clone(),
            target: self.source.clone(),
            ..self.clone()
        }
    }
}

/// Serde predicate for flags left out of output when unset.
fn is_false(flag: &bool) -> bool {
    !*flag
}

/// Source text as it appears in corpus files.
#[derive(Deserialize)]
#[serde(untagged)]
enum SourceText {
    /// A single string.
    Single(String),
    /// Plural forms.
    Plural(Vec<String>),
}

/// Deserializes a string or the first element of a string array.
fn first_form<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match SourceText::deserialize(deserializer)? {
        SourceText::Single(text) => text,
        SourceText::Plural(forms) => forms.into_iter().next().unwrap_or_default(),
    })
}
