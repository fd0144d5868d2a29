//! Clap argument definitions for the `termine` CLI.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "termine", version)]
#[command(about = "Extract candidate terminology from bilingual translation corpora")]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Log more (-v for progress, -vv for debugging). TERMINE_LOG overrides.
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Supported `termine` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Extract a ranked glossary from JSON Lines corpus files
    #[command(after_help = "\
INPUT FORMAT:
  One JSON object per line, e.g.
  {\"source\": \"Open File\", \"target\": \"Abrir archivo\", \"locations\": [\"src/menu.c:12\"]}

  Optional fields: developer_notes, translator_notes (arrays of strings) and
  header (true for metadata units). A plural source may be an array; its first
  form is used.

SORT ORDER:
  Keys are applied one after the other, so the last --sort is the primary key.
  frequency  highest score first
  dictionary alphabetical, ignoring case
  length     alphabetical, as written

EXAMPLES:
  termine extract po/                      Every *.jsonl file under po/
  termine extract app.jsonl -S stoplist    Use a stopword file
  termine extract a.jsonl b.jsonl --json   Machine-readable output
  termine extract po/ -u glossary.jsonl    Merge new terms into a glossary
  termine extract po/ -t 2 --locs-needed 1 Shorter phrases, fewer locations")]
    Extract(ExtractCommand),

    /// Show how words are classified by a stopword list
    Classify(ClassifyCommand),

    /// Initialize termine configuration in current directory
    Init(InitCommand),

    /// Show effective configuration settings
    Config,

    /// Validate configuration and diagnose issues
    Check,
}

/// Arguments for `termine extract`.
#[derive(Args, Debug, Clone)]
pub struct ExtractCommand {
    /// Corpus files or directories
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Write output to FILE instead of stdout
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    /// Output one translation unit per line, readable as corpus input
    #[arg(long, conflicts_with = "json")]
    pub jsonl: bool,

    /// Read FILE as an extra input and rewrite it with the results as JSON Lines
    #[arg(
        short = 'u',
        long,
        value_name = "FILE",
        conflicts_with_all = ["output", "json"]
    )]
    pub update: Option<PathBuf>,

    /// Maximum rows in table output, 0 for all
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Stopword and extraction options.
    #[command(flatten)]
    pub extraction: ExtractionArgs,

    /// Threshold options.
    #[command(flatten)]
    pub thresholds: ThresholdArgs,

    /// Sort key, repeatable; the last one is primary [default: length, dictionary, frequency]
    #[arg(long = "sort", value_name = "ORDER")]
    pub sort: Vec<String>,
}

/// Flags that shape how terms are extracted.
#[derive(Args, Debug, Clone, Default)]
pub struct ExtractionArgs {
    /// Read stopword rules from STOPFILE
    #[arg(short = 'S', long = "stopword-list", value_name = "STOPFILE")]
    pub stopword_list: Option<PathBuf>,

    /// Lowercase words written in Title Case [default]
    #[arg(short = 'F', long, conflicts_with_all = ["preserve_case", "ignore_case"])]
    pub fold_titlecase: bool,

    /// Keep words exactly as written
    #[arg(short = 'C', long, conflicts_with = "ignore_case")]
    pub preserve_case: bool,

    /// Lowercase every word
    #[arg(short = 'I', long)]
    pub ignore_case: bool,

    /// Accelerator characters to strip, e.g. "&_"
    #[arg(long = "accelerator", value_name = "CHARS")]
    pub accelerators: Option<String>,

    /// Maximum words per phrase, 1 for single words only [default: 3]
    #[arg(short = 't', long, value_name = "N")]
    pub term_words: Option<usize>,

    /// Source language, used for the built-in stopword list [default: en]
    #[arg(long, value_name = "LANG")]
    pub source_language: Option<String>,

    /// Extract terms from translations, not sources (long flag only, -v is verbosity)
    #[arg(long)]
    pub invert: bool,
}

/// Flags that override support thresholds.
#[derive(Args, Debug, Clone, Default)]
pub struct ThresholdArgs {
    /// Words that must not be stopwords [default: 1]
    #[arg(long, value_name = "N")]
    pub nonstop_needed: Option<usize>,

    /// Files a term must appear in [default: 1 for a single file, else 2]
    #[arg(long, value_name = "N")]
    pub inputs_needed: Option<usize>,

    /// Distinct messages needed for whole-message terms [default: 1]
    #[arg(long, value_name = "N")]
    pub fullmsg_needed: Option<usize>,

    /// Distinct messages needed for terms inside messages [default: 2]
    #[arg(long, value_name = "N")]
    pub substr_needed: Option<usize>,

    /// Distinct source files needed when units have locations [default: 2]
    #[arg(long, value_name = "N")]
    pub locs_needed: Option<usize>,
}

/// Arguments for `termine classify`.
#[derive(Args, Debug, Clone)]
pub struct ClassifyCommand {
    /// Words to classify
    #[arg(required = true)]
    pub words: Vec<String>,

    /// Read stopword rules from STOPFILE
    #[arg(short = 'S', long = "stopword-list", value_name = "STOPFILE")]
    pub stopword_list: Option<PathBuf>,

    /// Language of the built-in stopword list [default: en]
    #[arg(long, value_name = "LANG")]
    pub source_language: Option<String>,
}

/// Arguments for `termine init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.termine.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Parses CLI arguments.
pub fn parse_cli() -> Cli {
    Cli::parse()
}
