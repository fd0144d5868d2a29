//! Terminology extraction from bilingual translation corpora.
//!
//! The engine turns translation units into a ranked list of candidate glossary
//! terms in four stages:
//!
//! 1. **Cleaning**: [`TextCleaner`] strips accelerators, format placeholders and
//!    markup from each source and target string
//! 2. **Windowing**: [`TermExtractor`] segments cleaned text into sentences and
//!    words and records single words and phrases in a [`Glossary`], guided by a
//!    [`StopwordTable`]
//! 3. **Thresholding**: [`extract_terms`] keeps terms with enough support and
//!    scores them as `10 * files + distinct sources`
//! 4. **Ranking**: [`filter_terms`] removes subphrases that add no evidence over
//!    a longer term and sorts the rest
//!
//! A full run looks like this:
//!
//! ```
//! use termine_extract::{
//!     DEFAULT_SORT_ORDER, ExtractorConfig, StopwordTable, TermExtractor, TermRecord,
//!     Thresholds, TranslationUnit, filter_terms,
//! };
//!
//! let stopwords = StopwordTable::parse(">the\n", "inline");
//! let mut extractor = TermExtractor::new(ExtractorConfig::default(), stopwords.clone());
//! for file in ["a.jsonl", "b.jsonl"] {
//!     extractor.process_units(vec![TranslationUnit::new("Open File", "Abrir archivo")], file);
//! }
//!
//! let terms = extractor.extract_terms(&Thresholds::default(), &TermRecord::from_input);
//! let ranked = filter_terms(terms, &stopwords, 1, &DEFAULT_SORT_ORDER);
//! assert_eq!(ranked[0].1.term, "open file");
//! assert_eq!(ranked[0].0, 21);
//! ```

#![warn(missing_docs)]

mod case;
mod clean;
mod error;
mod extract;
mod filter;
mod glossary;
mod rank;
mod record;
mod segment;
mod stopwords;
mod unit;

pub use case::{CaseFold, is_titlecase};
pub use clean::TextCleaner;
pub use error::{StopwordError, UnknownSortOrder};
pub use extract::{DEFAULT_TERM_LENGTH, ExtractorConfig, TermExtractor};
pub use filter::{
    ExtractedTerms, NOTE_PREFIX, RecordBuilder, RecordInput, Thresholds, extract_terms,
};
pub use glossary::{Evidence, Glossary, TranslationPair};
pub use rank::{DEFAULT_SORT_ORDER, SortOrder, TermEntry, filter_terms};
pub use record::TermRecord;
pub use segment::{Segmenter, UnicodeSegmenter, segmenter_for};
pub use stopwords::{StopActions, StopwordTable, StopwordWarning};
pub use unit::TranslationUnit;
