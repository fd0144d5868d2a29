//! Subphrase reduction and ordering of extracted terms.

use std::{fmt, str::FromStr};

use tracing::{info, warn};

use crate::{ExtractedTerms, StopwordTable, UnknownSortOrder};

/// Sort keys applied when none are configured. The last key is primary.
pub const DEFAULT_SORT_ORDER: [&str; 3] = ["length", "dictionary", "frequency"];

/// A key the ranked terms can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Score, highest first.
    Frequency,
    /// Lowercased term, alphabetically.
    Dictionary,
    /// Term as written, alphabetically.
    Length,
}

impl SortOrder {
    /// Every sort key, in display order.
    pub const ALL: [Self; 3] = [Self::Frequency, Self::Dictionary, Self::Length];

    /// Returns the configuration name of this key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Frequency => "frequency",
            Self::Dictionary => "dictionary",
            Self::Length => "length",
        }
    }

    /// Stable-sorts `items` by this key.
    fn sort<R: TermEntry>(self, items: &mut [(usize, R)]) {
        match self {
            Self::Frequency => items.sort_by(|a, b| b.0.cmp(&a.0)),
            Self::Dictionary => items.sort_by_cached_key(|(_, record)| record.term().to_lowercase()),
            Self::Length => items.sort_by(|a, b| a.1.term().cmp(b.1.term())),
        }
    }
}

impl FromStr for SortOrder {
    type Err = UnknownSortOrder;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|order| order.as_str() == s)
            .ok_or_else(|| UnknownSortOrder(s.to_string()))
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record that knows which term it describes.
pub trait TermEntry {
    /// The term as stored in the glossary.
    fn term(&self) -> &str;
}

/// Removes redundant subphrases and orders what remains.
///
/// Terms with fewer than `nonstop_needed` words that are not stopwords are
/// dropped, unless every word is a stopword. For a term of three or more words,
/// each shorter phrase obtained by dropping words from its end, then from its
/// start, is removed if it has exactly the same score: it adds no evidence over
/// the longer term.
///
/// `sort_orders` are applied as successive stable sorts, so the last key is the
/// primary one. Unknown keys are logged and skipped.
pub fn filter_terms<R, S>(
    mut terms: ExtractedTerms<R>,
    stopwords: &StopwordTable,
    nonstop_needed: usize,
    sort_orders: &[S],
) -> Vec<(usize, R)>
where
    R: TermEntry,
    S: AsRef<str>,
{
    let mut by_length: Vec<String> = terms.keys().cloned().collect();
    by_length.sort_by_key(|term| term.chars().count());
    info!(target: "termine", "{} terms after thresholding", by_length.len());

    for term in &by_length {
        let Some(score) = terms.get(term).map(|(score, _)| *score) else {
            continue;
        };
        let words: Vec<&str> = term.split(' ').collect();

        let nonstop = words
            .iter()
            .filter(|word| stopwords.stopword(word).is_empty())
            .count();
        if nonstop < nonstop_needed && nonstop != 0 {
            terms.remove(term);
            continue;
        }

        for end in (2..words.len()).rev() {
            remove_if_scored(&mut terms, &words[..end], score);
        }
        for start in 1..words.len().saturating_sub(1) {
            remove_if_scored(&mut terms, &words[start..], score);
        }
    }
    info!(target: "termine", "{} terms after subphrase reduction", terms.len());

    let mut items: Vec<(usize, R)> = terms.into_values().collect();
    for key in sort_orders {
        match key.as_ref().parse::<SortOrder>() {
            Ok(order) => order.sort(&mut items),
            Err(e) => warn!(target: "termine", "{e}"),
        }
    }
    items
}

/// Removes the phrase made of `words` if it has exactly `score`.
fn remove_if_scored<R>(terms: &mut ExtractedTerms<R>, words: &[&str], score: usize) {
    let phrase = words.join(" ");
    if terms.get(&phrase).is_some_and(|(other, _)| *other == score) {
        terms.remove(&phrase);
    }
}
