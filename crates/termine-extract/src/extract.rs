//! Sliding-window term extraction.
//!
//! Each sentence is scanned once, left to right. Every word that is not a
//! `word` stopword becomes a single-word candidate. In parallel a window of
//! recent words produces phrase candidates: a phrase never starts or ends on a
//! `skip` word, has at least two words, and has more words than the skip words
//! it encloses. Skip words do not count toward the maximum phrase length.

use std::{collections::VecDeque, sync::Arc};

use tracing::debug;

use crate::{
    CaseFold, Evidence, Glossary, RecordBuilder, Segmenter, StopwordTable, TextCleaner,
    Thresholds, TranslationPair, TranslationUnit,
    filter::{ExtractedTerms, extract_terms},
    segment::segmenter_for,
};

/// Default maximum number of words in a phrase.
pub const DEFAULT_TERM_LENGTH: usize = 3;

/// Settings for a [`TermExtractor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorConfig {
    /// Case policy for extracted terms.
    pub case: CaseFold,
    /// Accelerator characters stripped before matching.
    pub accelerators: String,
    /// Maximum words per phrase, not counting skip words. 1 disables phrases.
    pub term_length: usize,
    /// Source language code.
    pub source_language: String,
    /// Extract from the target side instead of the source side.
    pub invert: bool,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            case: CaseFold::default(),
            accelerators: String::new(),
            term_length: DEFAULT_TERM_LENGTH,
            source_language: String::from("en"),
            invert: false,
        }
    }
}

/// One extraction session: configuration, stopwords and the glossary being built.
pub struct TermExtractor {
    /// Session settings.
    config: ExtractorConfig,
    /// Cleaner built from the configured accelerators.
    cleaner: TextCleaner,
    /// Stopword classification.
    stopwords: StopwordTable,
    /// Sentence and word splitting.
    segmenter: Box<dyn Segmenter>,
    /// Terms accumulated across every processed file.
    glossary: Glossary,
}

impl TermExtractor {
    /// Creates an extractor with the segmenter for the configured language.
    pub fn new(config: ExtractorConfig, stopwords: StopwordTable) -> Self {
        Self {
            cleaner: TextCleaner::new(&config.accelerators),
            segmenter: segmenter_for(&config.source_language),
            config,
            stopwords,
            glossary: Glossary::new(),
        }
    }

    /// Replaces the segmenter.
    pub fn with_segmenter(mut self, segmenter: impl Segmenter + 'static) -> Self {
        self.segmenter = Box::new(segmenter);
        self
    }

    /// Returns the session settings.
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Returns the stopword table.
    pub fn stopwords(&self) -> &StopwordTable {
        &self.stopwords
    }

    /// Returns the glossary built so far.
    pub fn glossary(&self) -> &Glossary {
        &self.glossary
    }

    /// Adds every unit of one corpus file to the glossary.
    ///
    /// `origin` identifies the file in the evidence and in per-file counts.
    pub fn process_units<I>(&mut self, units: I, origin: &str)
    where
        I: IntoIterator<Item = TranslationUnit>,
    {
        let origin: Arc<str> = Arc::from(origin);
        let before = self.glossary.len();

        for unit in units {
            self.glossary.count_unit();
            if unit.is_header() {
                continue;
            }
            let unit = if self.config.invert {
                unit.inverted()
            } else {
                unit
            };

            let source = self.cleaner.clean(&unit.source);
            if source.chars().count() <= 1 {
                continue;
            }
            let evidence = Arc::new(TranslationPair {
                target: self.cleaner.clean(&unit.target),
                source,
                unit: Arc::new(unit),
                origin: Arc::clone(&origin),
            });

            for sentence in self.segmenter.sentences(&evidence.source) {
                let words = self.segmenter.words(sentence);
                self.process_sentence(&words, &evidence);
            }
        }

        debug!(
            target: "termine",
            origin = %origin,
            new_terms = self.glossary.len().saturating_sub(before),
            "processed units"
        );
    }

    /// Runs the window over one sentence.
    fn process_sentence(&mut self, words: &[&str], evidence: &Evidence) {
        let term_length = self.config.term_length;
        let mut window = PhraseWindow::default();

        for raw in words {
            let actions = self.stopwords.stopword(raw);
            let word = self.config.case.apply(raw);

            if !actions.word {
                self.glossary.add_word(&word, evidence);
            }
            if term_length <= 1 {
                continue;
            }

            if actions.phrase {
                window.flush_trailing(&mut self.glossary, evidence);
                window.clear();
                continue;
            }

            window.push(word.into_owned(), actions.skip);
            if window.overflows(term_length) {
                while window.overflows(term_length) {
                    window.pop_front();
                }
                window.flush(&mut self.glossary, evidence, true);
            } else {
                window.flush(&mut self.glossary, evidence, false);
            }
        }

        if term_length > 1 {
            window.flush_trailing(&mut self.glossary, evidence);
        }
    }

    /// Filters the glossary into scored records.
    ///
    /// See [`extract_terms`].
    pub fn extract_terms<B>(
        &self,
        thresholds: &Thresholds,
        builder: &B,
    ) -> ExtractedTerms<B::Record>
    where
        B: RecordBuilder,
    {
        extract_terms(&self.glossary, self.config.case, thresholds, builder)
    }
}

/// A word held in the phrase window.
#[derive(Debug, Clone, PartialEq, Eq)]
struct WindowWord {
    /// Case-normalized word.
    text: String,
    /// Whether the word was classified `skip` when it entered the window.
    skip: bool,
}

/// The in-progress phrase: recent words plus the number of skip words among them.
#[derive(Debug, Default)]
struct PhraseWindow {
    /// Words in sentence order.
    words: VecDeque<WindowWord>,
    /// Skip words currently in `words`.
    skips: usize,
}

impl PhraseWindow {
    /// Appends a word.
    fn push(&mut self, text: String, skip: bool) {
        if skip {
            self.skips += 1;
        }
        self.words.push_back(WindowWord { text, skip });
    }

    /// Drops the oldest word.
    fn pop_front(&mut self) {
        if let Some(word) = self.words.pop_front()
            && word.skip
        {
            self.skips -= 1;
        }
    }

    /// Empties the window.
    fn clear(&mut self) {
        self.words.clear();
        self.skips = 0;
    }

    /// Number of words, skip words included.
    fn len(&self) -> usize {
        self.words.len()
    }

    /// True when the window holds more non-skip words than `term_length`.
    fn overflows(&self, term_length: usize) -> bool {
        self.len() > term_length + self.skips
    }

    /// Records the window as a phrase, and with `partials` every prefix of it
    /// down to two words.
    fn flush(&mut self, glossary: &mut Glossary, evidence: &Evidence, partials: bool) {
        let words = self.words.make_contiguous();
        let mut skips = self.skips;

        if accepts(words, skips) {
            glossary.add(join(words), evidence);
        }
        if !partials {
            return;
        }

        let mut end = words.len();
        while end > 2 {
            end -= 1;
            if words[end].skip {
                skips -= 1;
            }
            let part = &words[..end];
            if accepts(part, skips) {
                glossary.add(join(part), evidence);
            }
        }
    }

    /// Records the phrases left in the window once no more words will follow,
    /// dropping words from the front.
    fn flush_trailing(&mut self, glossary: &mut Glossary, evidence: &Evidence) {
        while self.len() > 2 {
            self.pop_front();
            self.flush(glossary, evidence, true);
        }
    }
}

/// True if `words` form a valid phrase given the skip words among them.
fn accepts(words: &[WindowWord], skips: usize) -> bool {
    match (words.first(), words.last()) {
        (Some(first), Some(last)) => words.len() > skips + 1 && !first.skip && !last.skip,
        _ => false,
    }
}

/// Joins window words into a glossary key.
fn join(words: &[WindowWord]) -> String {
    words
        .iter()
        .map(|w| w.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
