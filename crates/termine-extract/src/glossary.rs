//! The term to evidence map built during one extraction run.

use std::{
    collections::{HashMap, hash_map},
    sync::Arc,
};

use crate::TranslationUnit;

/// One occurrence of a term: the cleaned strings it was found in and where
/// they came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationPair {
    /// Cleaned source string.
    pub source: String,
    /// Cleaned target string.
    pub target: String,
    /// The unit the strings came from (already role-swapped when inverting).
    pub unit: Arc<TranslationUnit>,
    /// The corpus file the unit was read from.
    pub origin: Arc<str>,
}

/// Shared handle to a [`TranslationPair`]; one unit contributes the same
/// evidence to many terms.
pub type Evidence = Arc<TranslationPair>;

/// Candidate terms and their evidence, in insertion order per term.
///
/// Keys are case-normalized terms; multi-word keys are space-joined. The map
/// lives for one extraction session and accumulates across every processed
/// file.
#[derive(Debug, Clone, Default)]
pub struct Glossary {
    /// Term to evidence list.
    entries: HashMap<String, Vec<Evidence>>,
    /// Units seen, headers included.
    units: usize,
}

impl Glossary {
    /// Creates an empty glossary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends evidence under `term`.
    pub fn add(&mut self, term: String, evidence: &Evidence) {
        self.entries
            .entry(term)
            .or_default()
            .push(Arc::clone(evidence));
    }

    /// Appends evidence for a single word, folding plurals.
    ///
    /// `files` joins an existing `file` entry. `file` renames an existing
    /// `files` entry to `file`, so later plurals land there too.
    pub fn add_word(&mut self, word: &str, evidence: &Evidence) {
        let length = word.chars().count();

        if let Some(singular) = word.strip_suffix('s')
            && length > 3
            && self.entries.contains_key(singular)
        {
            self.add(singular.to_string(), evidence);
            return;
        }

        if length > 2
            && let Some(plural) = self.entries.remove(&format!("{word}s"))
        {
            self.entries
                .entry(word.to_string())
                .or_default()
                .extend(plural);
        }

        self.add(word.to_string(), evidence);
    }

    /// Returns the evidence recorded for `term`.
    pub fn get(&self, term: &str) -> Option<&[Evidence]> {
        self.entries.get(term).map(Vec::as_slice)
    }

    /// Returns true if `term` has evidence.
    pub fn contains(&self, term: &str) -> bool {
        self.entries.contains_key(term)
    }

    /// Iterates over terms and their evidence in arbitrary order.
    pub fn iter(&self) -> hash_map::Iter<'_, String, Vec<Evidence>> {
        self.entries.iter()
    }

    /// Returns the number of terms.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no term was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of units processed, headers included.
    pub fn units(&self) -> usize {
        self.units
    }

    /// Counts one processed unit.
    pub(crate) fn count_unit(&mut self) {
        self.units += 1;
    }
}

impl<'a> IntoIterator for &'a Glossary {
    type Item = (&'a String, &'a Vec<Evidence>);
    type IntoIter = hash_map::Iter<'a, String, Vec<Evidence>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
