//! CLI integration tests for termine commands.
//!
//! These tests focus on exit codes and the terms that come out, not on table
//! layout which may change.

// Integration tests live outside cfg(test)
#![allow(clippy::tests_outside_test_module)]

use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Stopword rules used by the extraction tests.
const STOPLIST: &str = "# test rules\n>the\n>of\n:a\n";

/// A project directory with its own isolated home.
struct Project {
    /// Working directory for the command.
    dir: TempDir,
    /// HOME for the command, so the user's global config is never read.
    home: TempDir,
}

impl Project {
    /// Creates the directories and writes the stopword list.
    fn new() -> Self {
        let project = Self {
            dir: tempfile::tempdir().unwrap(),
            home: tempfile::tempdir().unwrap(),
        };
        project.write("stoplist", STOPLIST);
        project
    }

    /// Returns the project directory.
    fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes a file relative to the project directory.
    fn write(&self, name: &str, contents: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }

    /// Writes a JSON Lines corpus file with one unit per `(source, target)`.
    fn corpus(&self, name: &str, units: &[(&str, &str)]) {
        let lines: String = units
            .iter()
            .map(|(source, target)| {
                format!(
                    "{}\n",
                    serde_json::json!({ "source": source, "target": target })
                )
            })
            .collect();
        self.write(name, &lines);
    }

    /// Returns a `termine` command running in the project.
    fn termine(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("termine").unwrap();
        cmd.env("HOME", self.home.path())
            .env_remove("TERMINE_LOG")
            .current_dir(self.dir.path());
        cmd
    }

    /// Runs `termine extract --json -S stoplist` with extra arguments and
    /// returns the parsed records.
    fn extract_json(&self, args: &[&str]) -> Vec<serde_json::Value> {
        self.extract_json_with(&[&["-S", "stoplist"][..], args].concat())
    }

    /// Runs `termine extract --json` with exactly the given arguments, so the
    /// stopword list comes from configuration or the built-in list.
    fn extract_json_with(&self, args: &[&str]) -> Vec<serde_json::Value> {
        let output = self
            .termine()
            .args(["extract", "--json"])
            .args(args)
            .output()
            .unwrap();
        assert!(
            output.status.success(),
            "extract failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).unwrap()
    }
}

/// Reads a JSON Lines file written by `--update` or `--jsonl`.
fn read_jsonl(path: &Path) -> Vec<serde_json::Value> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

/// Collects the `source` field of each unit.
fn sources(units: &[serde_json::Value]) -> Vec<&str> {
    units.iter().filter_map(|u| u["source"].as_str()).collect()
}

/// Collects the `term` field of each record.
fn terms(records: &[serde_json::Value]) -> Vec<&str> {
    records.iter().filter_map(|r| r["term"].as_str()).collect()
}

mod extract {
    use super::*;

    #[test]
    fn term_shared_by_two_files() {
        let project = Project::new();
        project.corpus("a.jsonl", &[("Open File", "Abrir archivo")]);
        project.corpus("b.jsonl", &[("Open File", "Abrir archivo")]);

        let records = project.extract_json(&["a.jsonl", "b.jsonl"]);
        assert_eq!(terms(&records), vec!["open file"]);
        assert_eq!(records[0]["score"], 21);
        assert_eq!(records[0]["fuzzy"], false);
    }

    #[test]
    fn directory_inputs_use_include_patterns() {
        let project = Project::new();
        project.corpus("po/a.jsonl", &[("Open File", "Abrir archivo")]);
        project.corpus("po/nested/b.jsonl", &[("Open File", "Abrir archivo")]);
        project.corpus("po/c.txt", &[("Close Window", "Cerrar ventana")]);

        let records = project.extract_json(&["po"]);
        assert_eq!(terms(&records), vec!["open file"]);
    }

    #[test]
    fn single_file_needs_one_input() {
        let project = Project::new();
        project.corpus(
            "app.jsonl",
            &[("Open File", "Abrir archivo"), ("Open File", "Abrir archivo")],
        );

        let records = project.extract_json(&["app.jsonl"]);
        assert_eq!(terms(&records), vec!["open file"]);
        assert_eq!(records[0]["score"], 11);

        let records = project.extract_json(&["app.jsonl", "--inputs-needed", "2"]);
        assert!(records.is_empty());
    }

    #[test]
    fn substring_terms_need_several_messages() {
        let project = Project::new();
        for name in ["a.jsonl", "b.jsonl"] {
            project.corpus(
                name,
                &[
                    ("Save the file", "Guardar el archivo"),
                    ("Close the file", "Cerrar el archivo"),
                ],
            );
        }

        let records = project.extract_json(&["a.jsonl", "b.jsonl"]);
        assert!(terms(&records).contains(&"file"), "{records:?}");
        assert_eq!(
            records.iter().find(|r| r["term"] == "file").unwrap()["score"],
            22
        );
    }

    #[test]
    fn disagreeing_translations_are_fuzzy() {
        let project = Project::new();
        project.corpus("a.jsonl", &[("Print", "Imprimir")]);
        project.corpus("b.jsonl", &[("Print", "Impresión")]);

        let records = project.extract_json(&["a.jsonl", "b.jsonl"]);
        assert_eq!(terms(&records), vec!["print"]);
        assert_eq!(records[0]["fuzzy"], true);
    }

    #[test]
    fn table_output_lists_terms() {
        let project = Project::new();
        project.corpus("a.jsonl", &[("Open File", "Abrir archivo")]);
        project.corpus("b.jsonl", &[("Open File", "Abrir archivo")]);

        project
            .termine()
            .args(["extract", "-S", "stoplist", "a.jsonl", "b.jsonl"])
            .assert()
            .success()
            .stdout(predicate::str::contains("open file"))
            .stdout(predicate::str::contains("Score"));
    }

    #[test]
    fn writes_output_file() {
        let project = Project::new();
        project.corpus("a.jsonl", &[("Open File", "Abrir archivo")]);
        project.corpus("b.jsonl", &[("Open File", "Abrir archivo")]);

        project
            .termine()
            .args(["extract", "-S", "stoplist", "--json", "-o", "terms.json"])
            .args(["a.jsonl", "b.jsonl"])
            .assert()
            .success()
            .stdout(predicate::str::is_empty());

        let written = fs::read_to_string(project.path().join("terms.json")).unwrap();
        let records: Vec<serde_json::Value> = serde_json::from_str(&written).unwrap();
        assert_eq!(terms(&records), vec!["open file"]);
    }

    #[test]
    fn broken_file_is_skipped_with_warning() {
        let project = Project::new();
        project.corpus("a.jsonl", &[("Open File", "Abrir archivo")]);
        project.corpus("b.jsonl", &[("Open File", "Abrir archivo")]);
        project.write("c.jsonl", "not json\n");

        project
            .termine()
            .args(["extract", "-S", "stoplist", "a.jsonl", "b.jsonl", "c.jsonl"])
            .assert()
            .success()
            .stdout(predicate::str::contains("open file"))
            .stderr(predicate::str::contains("c.jsonl:1"));
    }

    #[test]
    fn no_corpus_files_fails() {
        let project = Project::new();
        fs::create_dir(project.path().join("empty")).unwrap();

        project
            .termine()
            .args(["extract", "empty"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("no corpus files found"));
    }

    #[test]
    fn builtin_stopwords_keep_interface_terms() {
        let project = Project::new();
        project.corpus("a.jsonl", &[("Open File", "Abrir archivo")]);
        project.corpus("b.jsonl", &[("Open File", "Abrir archivo")]);

        let records = project.extract_json_with(&["a.jsonl", "b.jsonl"]);
        assert_eq!(terms(&records), vec!["open file"]);
        assert_eq!(records[0]["score"], 21);

        project
            .termine()
            .args(["extract", "a.jsonl", "b.jsonl"])
            .assert()
            .success()
            .stdout(predicate::str::contains("open file"));
    }

    #[test]
    fn builtin_stopwords_drop_function_words() {
        let project = Project::new();
        for name in ["a.jsonl", "b.jsonl"] {
            project.corpus(
                name,
                &[
                    ("Save the file", "Guardar el archivo"),
                    ("Close the file", "Cerrar el archivo"),
                ],
            );
        }

        let records = project.extract_json_with(&["a.jsonl", "b.jsonl"]);
        let found = terms(&records);
        assert!(found.contains(&"file"), "{found:?}");
        assert!(!found.contains(&"the"), "{found:?}");
    }

    #[test]
    fn configured_stopword_list_is_used() {
        let project = Project::new();
        project.write("rules", "=file\n");
        project.write(".termine.toml", "[extract]\nstopword_list = \"rules\"\n");
        for name in ["a.jsonl", "b.jsonl"] {
            project.corpus(
                name,
                &[
                    ("Save the file", "Guardar el archivo"),
                    ("Close the file", "Cerrar el archivo"),
                ],
            );
        }

        let records = project.extract_json_with(&["a.jsonl", "b.jsonl"]);
        let found = terms(&records);
        assert!(found.contains(&"the"), "{found:?}");
        assert!(!found.contains(&"file"), "{found:?}");

        // an explicit list wins over the configured one
        let records = project.extract_json(&["a.jsonl", "b.jsonl"]);
        let found = terms(&records);
        assert!(found.contains(&"file"), "{found:?}");
        assert!(!found.contains(&"the"), "{found:?}");
    }

    #[test]
    fn missing_configured_stopword_list_is_empty() {
        let project = Project::new();
        project.write(".termine.toml", "[extract]\nstopword_list = \"absent\"\n");
        for name in ["a.jsonl", "b.jsonl"] {
            project.corpus(
                name,
                &[
                    ("Save the file", "Guardar el archivo"),
                    ("Close the file", "Cerrar el archivo"),
                ],
            );
        }

        // no fallback to the built-in list
        let records = project.extract_json_with(&["a.jsonl", "b.jsonl"]);
        let found = terms(&records);
        assert!(found.contains(&"the"), "{found:?}");
        assert!(found.contains(&"file"), "{found:?}");
    }

    #[test]
    fn update_merges_into_existing_glossary() {
        let project = Project::new();
        project.corpus("a.jsonl", &[("Open File", "Abrir archivo")]);
        project.corpus("b.jsonl", &[("Open File", "Abrir archivo")]);

        project
            .termine()
            .args(["extract", "-S", "stoplist", "a.jsonl", "b.jsonl"])
            .args(["--update", "glossary.jsonl"])
            .assert()
            .success()
            .stdout(predicate::str::is_empty());

        let glossary = project.path().join("glossary.jsonl");
        let units = read_jsonl(&glossary);
        assert_eq!(sources(&units), vec!["open file"]);
        assert!(
            units[0]["target"]
                .as_str()
                .unwrap()
                .eq_ignore_ascii_case("abrir archivo"),
            "{units:?}"
        );

        project.corpus(
            "c.jsonl",
            &[
                ("Open File", "Abrir archivo"),
                ("Close Window", "Cerrar ventana"),
                ("Close Window", "Cerrar ventana"),
            ],
        );
        project
            .termine()
            .args(["extract", "-S", "stoplist", "c.jsonl", "-u", "glossary.jsonl"])
            .assert()
            .success();

        let units = read_jsonl(&glossary);
        let merged = sources(&units);
        assert!(merged.contains(&"open file"), "{merged:?}");
        assert!(merged.contains(&"close window"), "{merged:?}");

        let open_file = units.iter().find(|u| u["source"] == "open file").unwrap();
        assert!(open_file.get("fuzzy").is_none(), "{open_file}");
        let notes = open_file["translator_notes"].as_array().unwrap();
        assert!(
            !notes.iter().any(|n| n == "(termine) a.jsonl (1)"),
            "per-file counts are recomputed: {notes:?}"
        );
        assert!(notes.iter().any(|n| n == "(termine) glossary.jsonl (1)"), "{notes:?}");
    }

    #[test]
    fn unreadable_glossary_is_not_overwritten() {
        let project = Project::new();
        project.corpus("a.jsonl", &[("Open File", "Abrir archivo")]);
        project.write("glossary.jsonl", "not json\n");

        project
            .termine()
            .args(["extract", "-S", "stoplist", "a.jsonl", "-u", "glossary.jsonl"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("glossary.jsonl:1"));

        let contents = fs::read_to_string(project.path().join("glossary.jsonl")).unwrap();
        assert_eq!(contents, "not json\n");
    }

    #[test]
    fn jsonl_output_reads_back_as_corpus() {
        let project = Project::new();
        project.corpus("a.jsonl", &[("Open File", "Abrir archivo")]);
        project.corpus("b.jsonl", &[("Open File", "Abrir archivo")]);

        project
            .termine()
            .args(["extract", "-S", "stoplist", "--jsonl", "-o", "terms.jsonl"])
            .args(["a.jsonl", "b.jsonl"])
            .assert()
            .success();
        assert_eq!(
            sources(&read_jsonl(&project.path().join("terms.jsonl"))),
            vec!["open file"]
        );

        // the written glossary is valid input for another run
        let records = project.extract_json(&["terms.jsonl", "a.jsonl"]);
        assert!(terms(&records).contains(&"open file"), "{records:?}");
    }

    #[test]
    fn config_file_supplies_settings() {
        let project = Project::new();
        project.write(
            ".termine.toml",
            "[extract]\nstopword_list = \"stoplist\"\nterm_words = 1\n",
        );
        project.corpus("a.jsonl", &[("Open File", "Abrir archivo")]);
        project.corpus("b.jsonl", &[("Open File", "Abrir archivo")]);

        let output = project
            .termine()
            .args(["extract", "--json", "a.jsonl", "b.jsonl"])
            .output()
            .unwrap();
        assert!(output.status.success());
        let records: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
        // single words only, and neither occurs in two distinct messages
        assert!(records.is_empty(), "{records:?}");
    }
}

mod classify {
    use super::*;

    #[test]
    fn shows_actions() {
        let project = Project::new();

        project
            .termine()
            .args(["classify", "-S", "stoplist", "The", "window"])
            .assert()
            .success()
            .stdout(predicate::str::contains("skip+word"))
            .stdout(predicate::str::contains("none"));
    }

    #[test]
    fn uses_builtin_list_without_flag() {
        let project = Project::new();

        project
            .termine()
            .args(["classify", "the", "open", "file"])
            .assert()
            .success()
            .stdout(predicate::str::contains("skip+word"))
            .stdout(predicate::str::contains("none"));
    }

    #[test]
    fn requires_words() {
        let project = Project::new();
        project.termine().arg("classify").assert().failure();
    }
}

mod init {
    use super::*;

    #[test]
    fn creates_config_file() {
        let project = Project::new();

        project.termine().arg("init").assert().success();

        let contents = fs::read_to_string(project.path().join(".termine.toml")).unwrap();
        assert!(contents.contains("# [extract]"));
    }

    #[test]
    fn fails_if_config_exists() {
        let project = Project::new();
        project.write(".termine.toml", "existing");

        project
            .termine()
            .arg("init")
            .assert()
            .failure()
            .stderr(predicate::str::contains("already exists"));
    }

    #[test]
    fn force_overwrites_existing() {
        let project = Project::new();
        project.write(".termine.toml", "old content");

        project.termine().args(["init", "--force"]).assert().success();

        let contents = fs::read_to_string(project.path().join(".termine.toml")).unwrap();
        assert!(contents.contains("# [extract]"));
    }

    #[test]
    fn global_writes_to_home() {
        let project = Project::new();

        project.termine().args(["init", "--global"]).assert().success();

        assert!(project.home.path().join(".termine.toml").exists());
        assert!(!project.path().join(".termine.toml").exists());
    }
}

mod config {
    use super::*;

    #[test]
    fn shows_defaults() {
        let project = Project::new();

        project
            .termine()
            .arg("config")
            .assert()
            .success()
            .stdout(predicate::str::contains("term_words = 3"))
            .stdout(predicate::str::contains("[thresholds]"));
    }

    #[test]
    fn shows_merged_settings() {
        let project = Project::new();
        project.write(".termine.toml", "[extract]\nterm_words = 2\n");

        project
            .termine()
            .arg("config")
            .assert()
            .success()
            .stdout(predicate::str::contains("term_words = 2"));
    }

    #[test]
    fn invalid_toml_fails() {
        let project = Project::new();
        project.write(".termine.toml", "[extract\n");

        project
            .termine()
            .arg("config")
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to load configuration"));
    }
}

mod check {
    use super::*;

    #[test]
    fn succeeds_without_config() {
        let project = Project::new();

        project
            .termine()
            .arg("check")
            .assert()
            .success()
            .stdout(predicate::str::contains("No configuration files found"));
    }

    #[test]
    fn reports_unknown_sort_order() {
        let project = Project::new();
        project.write(".termine.toml", "[output]\nsort = \"alphabetical\"\n");

        project
            .termine()
            .arg("check")
            .assert()
            .failure()
            .stdout(predicate::str::contains("unknown sort order 'alphabetical'"));
    }

    #[test]
    fn valid_config_passes() {
        let project = Project::new();
        project.write(".termine.toml", "[extract]\nstopword_list = \"stoplist\"\n");

        project
            .termine()
            .arg("check")
            .assert()
            .success()
            .stdout(predicate::str::contains("No issues found"));
    }
}
