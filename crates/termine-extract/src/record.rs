//! The default record produced for each extracted term.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{RecordInput, TermEntry, TranslationUnit, filter::NOTE_PREFIX};

/// A glossary entry ready for review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermRecord {
    /// The term.
    pub term: String,
    /// `10 * files + sources`.
    pub score: usize,
    /// Suggested translation. When translations disagree this lists each one
    /// with the files using it, and `fuzzy` is set.
    pub target: String,
    /// Translations disagree and need review.
    pub fuzzy: bool,
    /// Whole-message translations and the files they appear in.
    pub targets: BTreeMap<String, Vec<String>>,
    /// Source code locations.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<String>,
    /// Developer notes of units whose source is the term.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub developer_notes: Vec<String>,
    /// Translator notes, followed by the term's occurrence count per file.
    pub translator_notes: Vec<String>,
    /// The unit whose whole source is the term, if any.
    #[serde(skip)]
    pub unit: Option<TranslationUnit>,
}

impl TermRecord {
    /// Builds a record from a surviving term. Usable as a
    /// [`RecordBuilder`](crate::RecordBuilder).
    pub fn from_input(input: RecordInput) -> Self {
        let mut translator_notes: Vec<String> = input.translator_notes.into_iter().collect();

        // A target that already lists competing translations comes from an
        // earlier run and is kept for the reviewer.
        let (target, fuzzy) = match input.targets.len() {
            0 => (String::new(), false),
            1 => (
                input
                    .unit
                    .as_ref()
                    .map(|unit| unit.target.clone())
                    .unwrap_or_default(),
                false,
            ),
            _ => match input.targets.keys().find(|target| target.contains("};")) {
                Some(previous) => {
                    translator_notes.push(describe_targets(&input.targets));
                    (previous.clone(), true)
                }
                None => (describe_targets(&input.targets), true),
            },
        };

        translator_notes.extend(
            input
                .file_counts
                .iter()
                .map(|(file, count)| format!("{NOTE_PREFIX} {file} ({count})")),
        );

        Self {
            term: input.term,
            score: input.score,
            target,
            fuzzy,
            targets: input.targets,
            locations: input.locations,
            developer_notes: input.developer_notes.into_iter().collect(),
            translator_notes,
            unit: input.unit,
        }
    }

    /// Converts the record to a translation unit, so a glossary written as
    /// JSON Lines can be read back as corpus input.
    pub fn to_unit(&self) -> TranslationUnit {
        TranslationUnit {
            source: self.term.clone(),
            target: self.target.clone(),
            locations: self.locations.clone(),
            developer_notes: self.developer_notes.clone(),
            translator_notes: self.translator_notes.clone(),
            header: false,
            fuzzy: self.fuzzy,
        }
    }
}

impl TermEntry for TermRecord {
    fn term(&self) -> &str {
        &self.term
    }
}

/// Formats competing translations as `t1 {f1, f2}; t2 {f3}`.
fn describe_targets(targets: &BTreeMap<String, Vec<String>>) -> String {
    targets
        .iter()
        .map(|(target, files)| format!("{target} {{{}}}", files.join(", ")))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn input() -> RecordInput {
        RecordInput {
            term: "open file".to_string(),
            score: 21,
            unit: Some(TranslationUnit::new("open file", "Abrir archivo")),
            targets: BTreeMap::from([(
                "Abrir archivo".to_string(),
                vec!["a.jsonl".to_string(), "b.jsonl".to_string()],
            )]),
            locations: Vec::new(),
            developer_notes: BTreeSet::new(),
            translator_notes: BTreeSet::from(["verb".to_string()]),
            file_counts: BTreeMap::from([("a.jsonl".to_string(), 1), ("b.jsonl".to_string(), 3)]),
        }
    }

    #[test]
    fn single_target_is_used_directly() {
        let record = TermRecord::from_input(input());
        assert_eq!(record.target, "Abrir archivo");
        assert!(!record.fuzzy);
        assert_eq!(
            record.translator_notes,
            vec!["verb", "(termine) a.jsonl (1)", "(termine) b.jsonl (3)"]
        );
    }

    #[test]
    fn competing_targets_are_fuzzy() {
        let mut input = input();
        input
            .targets
            .insert("Abrir fichero".to_string(), vec!["c.jsonl".to_string()]);

        let record = TermRecord::from_input(input);
        assert!(record.fuzzy);
        assert_eq!(
            record.target,
            "Abrir archivo {a.jsonl, b.jsonl}; Abrir fichero {c.jsonl}"
        );
    }

    #[test]
    fn earlier_fuzzy_target_is_kept() {
        let mut input = input();
        input.targets = BTreeMap::from([
            (
                "Abrir archivo {a.jsonl}; Abrir fichero {b.jsonl}".to_string(),
                vec!["glossary.jsonl".to_string()],
            ),
            ("Abrir archivo".to_string(), vec!["c.jsonl".to_string()]),
        ]);

        let record = TermRecord::from_input(input);
        assert!(record.fuzzy);
        assert_eq!(record.target, "Abrir archivo {a.jsonl}; Abrir fichero {b.jsonl}");
        assert!(
            record.translator_notes[1].starts_with("Abrir archivo {c.jsonl}; "),
            "{:?}",
            record.translator_notes
        );
    }

    #[test]
    fn converts_to_corpus_unit() {
        let mut input = input();
        input.locations = vec!["menu.c".to_string()];
        let unit = TermRecord::from_input(input).to_unit();

        assert_eq!(unit.source, "open file");
        assert_eq!(unit.target, "Abrir archivo");
        assert_eq!(unit.locations, vec!["menu.c"]);
        assert_eq!(unit.translator_notes.len(), 3);
        assert!(!unit.fuzzy);
        assert!(!unit.is_header());
    }

    #[test]
    fn substring_terms_have_no_target() {
        let mut input = input();
        input.unit = None;
        input.targets.clear();

        let record = TermRecord::from_input(input);
        assert_eq!(record.target, "");
        assert!(!record.fuzzy);
    }

    #[test]
    fn serializes_without_unit() {
        let record = TermRecord::from_input(input());
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["term"], "open file");
        assert_eq!(json["score"], 21);
        assert!(json.get("unit").is_none());
        assert!(json.get("locations").is_none());
    }
}
