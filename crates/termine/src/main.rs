//! Command-line interface for termine.
//!
//! termine mines translation corpora for recurring words and phrases worth
//! standardizing, and prints them as a candidate glossary for review.

#![warn(missing_docs)]

mod cli;

use std::process::ExitCode;

use cli::{
    args::{Commands, parse_cli},
    commands,
    context::CommandContext,
    logging::init_logging,
};

fn main() -> ExitCode {
    let cli = parse_cli();
    init_logging(cli.verbose);

    // init must work even when an existing config file is broken
    let ctx = match cli.command {
        Commands::Init(_) => CommandContext::load_cwd_only(),
        _ => CommandContext::load(),
    };
    match ctx {
        Ok(ctx) => commands::run(cli.command, &ctx),
        Err(code) => code,
    }
}
