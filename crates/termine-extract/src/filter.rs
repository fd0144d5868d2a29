//! Threshold filtering of the glossary into scored records.
//!
//! Each surviving term is scored as `10 * files + sources`, where `files` is
//! the number of corpus files it occurs in and `sources` the number of distinct
//! source strings. Record construction is delegated to a [`RecordBuilder`] so
//! this pass does not depend on any output format.

use std::{
    collections::{BTreeMap, BTreeSet, HashSet},
    sync::LazyLock,
};

use regex::Regex;
use tracing::info;

use crate::{CaseFold, Glossary, TranslationUnit};

/// Trailing `:<line>` on a location.
static LOCATION_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":[0-9]+$").expect("location pattern is valid"));

/// Prefix for notes and markers generated by termine.
pub const NOTE_PREFIX: &str = "(termine)";

/// Scored records keyed by term.
pub type ExtractedTerms<R> = BTreeMap<String, (usize, R)>;

/// Minimum support a term needs to survive [`extract_terms`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    /// Minimum number of corpus files containing the term.
    pub inputs_needed: usize,
    /// Minimum distinct source strings for terms that are a whole message.
    pub fullmsg_needed: usize,
    /// Minimum distinct source strings for terms only found inside messages.
    pub substr_needed: usize,
    /// Minimum distinct source code locations, when the units have any.
    pub locs_needed: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            inputs_needed: 1,
            fullmsg_needed: 1,
            substr_needed: 2,
            locs_needed: 2,
        }
    }
}

/// Everything known about a surviving term, handed to a [`RecordBuilder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordInput {
    /// The term.
    pub term: String,
    /// `10 * files + sources`.
    pub score: usize,
    /// The unit whose whole source is the term, rewritten to the term and its
    /// normalized target.
    pub unit: Option<TranslationUnit>,
    /// Distinct whole-message translations and the files they appear in.
    pub targets: BTreeMap<String, Vec<String>>,
    /// Deduplicated locations, capped with a trailing marker.
    pub locations: Vec<String>,
    /// Developer notes of units whose source is the term.
    pub developer_notes: BTreeSet<String>,
    /// Translator notes of units whose source is the term.
    pub translator_notes: BTreeSet<String>,
    /// Occurrences of the term per corpus file.
    pub file_counts: BTreeMap<String, usize>,
}

/// Builds an output record for a surviving term.
///
/// Implemented for every `Fn(RecordInput) -> R`, including
/// [`TermRecord::from_input`](crate::TermRecord::from_input).
pub trait RecordBuilder {
    /// The record type produced.
    type Record;

    /// Builds the record.
    fn build(&self, input: RecordInput) -> Self::Record;
}

impl<F, R> RecordBuilder for F
where
    F: Fn(RecordInput) -> R,
{
    type Record = R;

    fn build(&self, input: RecordInput) -> R {
        self(input)
    }
}

/// Applies support thresholds to every glossary term seen more than once.
///
/// `case` is the extraction case policy, applied to whole-message targets.
pub fn extract_terms<B>(
    glossary: &Glossary,
    case: CaseFold,
    thresholds: &Thresholds,
    builder: &B,
) -> ExtractedTerms<B::Record>
where
    B: RecordBuilder,
{
    info!(
        target: "termine",
        "{} terms from {} units",
        glossary.len(),
        glossary.units()
    );

    let mut terms = BTreeMap::new();
    for (term, evidence) in glossary {
        if evidence.len() <= 1 {
            continue;
        }

        let term_lower = term.to_lowercase();
        let mut sources = HashSet::new();
        let mut file_counts: BTreeMap<String, usize> = BTreeMap::new();
        let mut locations = BTreeSet::new();
        let mut developer_notes = BTreeSet::new();
        let mut translator_notes = BTreeSet::new();
        let mut targets: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let mut best_unit = None;

        for pair in evidence {
            sources.insert(pair.source.as_str());
            *file_counts.entry(pair.origin.to_string()).or_default() += 1;

            if term_lower == pair.source.to_lowercase() {
                let target = case.apply(&pair.target).into_owned();
                if !target.is_empty() {
                    let files = targets.entry(target.clone()).or_default();
                    if !files.iter().any(|f| f.as_str() == &*pair.origin) {
                        files.push(pair.origin.to_string());
                    }
                }
                if term_lower == pair.unit.source.trim().to_lowercase() {
                    developer_notes.extend(joined_notes(&pair.unit.developer_notes));
                    translator_notes.extend(joined_notes(&pair.unit.translator_notes));
                }

                let mut unit = TranslationUnit::clone(&pair.unit);
                unit.source = term.clone();
                unit.target = target;
                best_unit = Some(unit);
            }

            locations.extend(
                pair.unit
                    .locations
                    .iter()
                    .filter(|loc| !is_generated(loc))
                    .map(|loc| LOCATION_LINE.replace(loc, "").into_owned()),
            );
        }

        let fullmsg = best_unit.is_some();
        let num_sources = sources.len();
        let num_files = file_counts.len();
        let num_locations = locations.len();

        if num_files < thresholds.inputs_needed
            || (num_locations > 0 && num_locations < thresholds.locs_needed)
        {
            continue;
        }
        let sources_needed = if fullmsg {
            thresholds.fullmsg_needed
        } else {
            thresholds.substr_needed
        };
        if num_sources < sources_needed {
            continue;
        }

        let score = 10 * num_files + num_sources;
        let input = RecordInput {
            term: term.clone(),
            score,
            unit: best_unit,
            targets,
            locations: cap_locations(locations, thresholds.locs_needed),
            developer_notes,
            translator_notes,
            file_counts,
        };
        terms.insert(term.clone(), (score, builder.build(input)));
    }

    terms
}

/// Joins a unit's notes the way they are displayed, skipping empty ones and
/// the per-file counts of an earlier run.
fn joined_notes(notes: &[String]) -> Option<String> {
    let joined = notes
        .iter()
        .filter(|note| !is_generated(note))
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("\n");
    (!joined.is_empty()).then_some(joined)
}

/// Notes and locations written by a previous extraction.
fn is_generated(text: &str) -> bool {
    text.starts_with(NOTE_PREFIX)
}

/// Keeps at most `2 * locs_needed` locations, noting how many were dropped.
fn cap_locations(locations: BTreeSet<String>, locs_needed: usize) -> Vec<String> {
    let limit = 2 * locs_needed;
    let total = locations.len();
    let mut kept: Vec<String> = locations.into_iter().take(limit).collect();
    if total > limit {
        kept.push(format!("{NOTE_PREFIX} {} more locations", total - limit));
    }
    kept
}
