//! Implementation of `termine check`.

use std::process::ExitCode;

use termine_config::{ConfigWarning, discover_config_files, is_global_config};

use crate::cli::{
    context::CommandContext,
    output::{dim, subheader, warning},
};

/// Lists configuration files and reports validation warnings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config_files = discover_config_files(&ctx.cwd);
    if config_files.is_empty() {
        println!("{}", dim("No configuration files found."));
        println!();
        println!(
            "Run {} to create a configuration file.",
            subheader("termine init")
        );
    } else {
        println!("{}", subheader("Config files:"));
        for path in &config_files {
            let display = path.strip_prefix(&ctx.cwd).unwrap_or(path).display();
            if is_global_config(path) {
                println!("   {display} {}", dim("(global)"));
            } else {
                println!("   {display}");
            }
        }
    }
    println!();

    let config = &ctx.config;
    println!("{}", subheader("Stopwords:"));
    match &config.extract.stopword_list {
        Some(path) => println!("   {}", path.display()),
        None => println!(
            "   {}",
            dim(&format!("built-in ({})", config.extract.source_language))
        ),
    }
    println!();

    let warnings = config.validate();
    if warnings.is_empty() {
        println!("No issues found.");
        return ExitCode::SUCCESS;
    }

    println!("{}", subheader(&format!("Warnings ({}):", warnings.len())));
    for w in &warnings {
        println!("   {}", warning(&w.to_string()));
    }
    println!();

    print_hints(&warnings);

    ExitCode::FAILURE
}

/// Prints hints for resolving common warnings.
fn print_hints(warnings: &[ConfigWarning]) {
    for w in warnings {
        let hint = match w {
            ConfigWarning::UnknownSortOrder { .. } => {
                "Hint: sort keys are frequency, dictionary and length"
            }
            ConfigWarning::StopwordListMissing { .. } => {
                "Hint: stopword_list is resolved relative to the file that sets it"
            }
            ConfigWarning::ZeroTermWords => "Hint: set term_words = 1 to extract single words only",
            ConfigWarning::InvalidIncludePattern { .. } => continue,
        };
        println!("{}", dim(hint));
    }
}
