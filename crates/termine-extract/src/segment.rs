//! Sentence and word segmentation.

use unicode_segmentation::UnicodeSegmentation;

/// Splits cleaned text into sentences and sentences into words.
///
/// Implementations return finite lists of slices borrowed from the input, so
/// callers can walk them as many times as needed.
pub trait Segmenter {
    /// Splits `text` into sentences.
    fn sentences<'a>(&self, text: &'a str) -> Vec<&'a str>;

    /// Splits a sentence into words, dropping punctuation and whitespace.
    fn words<'a>(&self, sentence: &'a str) -> Vec<&'a str>;
}

/// Segmenter based on Unicode text segmentation (UAX #29).
///
/// Works for any language that separates words with spaces or punctuation.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeSegmenter;

impl Segmenter for UnicodeSegmenter {
    fn sentences<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.unicode_sentences()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    fn words<'a>(&self, sentence: &'a str) -> Vec<&'a str> {
        sentence.unicode_words().collect()
    }
}

/// Returns the segmenter for a source language code.
///
/// Every language currently shares [`UnicodeSegmenter`].
pub fn segmenter_for(_language: &str) -> Box<dyn Segmenter> {
    Box::new(UnicodeSegmenter)
}
