//! Implementation of `termine classify`.

use std::process::ExitCode;

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use termine_extract::StopwordTable;

use crate::cli::{args::ClassifyCommand, context::CommandContext};

/// Prints the stopword classification of each word.
pub fn run(ctx: &CommandContext, cmd: &ClassifyCommand) -> ExitCode {
    let language = cmd
        .source_language
        .as_deref()
        .unwrap_or(&ctx.config.extract.source_language);
    let stopwords = match ctx.stopwords(cmd.stopword_list.as_deref(), language) {
        Ok(table) => table,
        Err(code) => return code,
    };

    println!("{}", classification_table(&stopwords, &cmd.words));
    ExitCode::SUCCESS
}

/// Builds a table of each word, its lookup key and its actions.
fn classification_table(stopwords: &StopwordTable, words: &[String]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Word", "Lookup", "Actions"]);
    for word in words {
        table.add_row(vec![
            Cell::new(word),
            Cell::new(stopwords.stopmap(word)),
            Cell::new(stopwords.stopword(word).to_string()),
        ]);
    }
    table
}
