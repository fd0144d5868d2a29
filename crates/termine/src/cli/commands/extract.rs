//! Implementation of `termine extract`.

use std::{path::Path, process::ExitCode};

use termine_config::Config;
use termine_extract::{
    CaseFold, ExtractorConfig, TermExtractor, TermRecord, Thresholds, filter_terms,
};
use tracing::{debug, info, warn};

use crate::cli::{
    args::{ExtractCommand, ExtractionArgs, ThresholdArgs},
    context::CommandContext,
    corpus::{collect_inputs, default_inputs_needed, read_units},
    output::{dim, open_output, write_json, write_jsonl, write_table},
};

/// Extracts ranked terms from the given corpus files and directories.
pub fn run(ctx: &CommandContext, cmd: &ExtractCommand) -> ExitCode {
    let config = &ctx.config;
    let extractor_config = cmd.extraction.build_config(config);

    let includes = match config.compile_includes() {
        Ok(includes) => includes,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    let inputs: Vec<_> = cmd.inputs.iter().map(|p| ctx.cwd.join(p)).collect();
    let inputs_needed = default_inputs_needed(&inputs);
    let update = cmd.update.as_ref().map(|p| ctx.cwd.join(p));

    let mut files = collect_inputs(&inputs, &includes);
    if let Some(update) = update.as_ref().filter(|p| p.is_file()) {
        debug!(target: "termine", path = %update.display(), "merging existing glossary");
        if !files.contains(update) {
            files.push(update.clone());
        }
    }
    if files.is_empty() {
        eprintln!("error: no corpus files found");
        return ExitCode::FAILURE;
    }

    let stopwords = match ctx.stopwords(
        cmd.extraction.stopword_list.as_deref(),
        &extractor_config.source_language,
    ) {
        Ok(table) => table,
        Err(code) => return code,
    };

    let mut extractor = TermExtractor::new(extractor_config, stopwords);
    let mut processed = 0_usize;
    for file in &files {
        let units = match read_units(file) {
            Ok(units) => units,
            // an unreadable glossary must not be overwritten
            Err(e) if update.as_ref() == Some(file) => {
                eprintln!("error: {e}");
                return ExitCode::FAILURE;
            }
            Err(e) => {
                warn!(target: "termine", "skipping {e}");
                continue;
            }
        };
        let origin = file.strip_prefix(&ctx.cwd).unwrap_or(file);
        extractor.process_units(units, &origin.display().to_string());
        processed += 1;
    }
    info!(
        target: "termine",
        files = processed,
        units = extractor.glossary().units(),
        terms = extractor.glossary().len(),
        "corpus processed"
    );

    let thresholds = cmd
        .thresholds
        .build_thresholds(config, inputs_needed);
    let nonstop_needed = cmd
        .thresholds
        .nonstop_needed
        .unwrap_or(config.thresholds.nonstop_needed);
    let sort = if cmd.sort.is_empty() {
        &config.output.sort
    } else {
        &cmd.sort
    };

    let terms = extractor.extract_terms(&thresholds, &TermRecord::from_input);
    let ranked = filter_terms(terms, extractor.stopwords(), nonstop_needed, sort);

    let destination = update.as_deref().or(cmd.output.as_deref());
    if ranked.is_empty() && destination.is_none() && !cmd.json && !cmd.jsonl {
        println!("{}", dim("No terms found."));
        return ExitCode::SUCCESS;
    }

    let limit = cmd.limit.unwrap_or(config.output.limit);
    write_results(cmd, destination, &ranked, limit)
}

/// Writes ranked terms in the format the command asked for.
fn write_results(
    cmd: &ExtractCommand,
    destination: Option<&Path>,
    ranked: &[(usize, TermRecord)],
    limit: usize,
) -> ExitCode {
    let mut out = match open_output(destination) {
        Ok(out) => out,
        Err(e) => {
            let target =
                destination.map_or_else(|| String::from("stdout"), |p| p.display().to_string());
            eprintln!("error: failed to open {target}: {e}");
            return ExitCode::FAILURE;
        }
    };
    let written = if cmd.json {
        write_json(&mut out, ranked)
    } else if cmd.jsonl || cmd.update.is_some() {
        write_jsonl(&mut out, ranked)
    } else {
        write_table(&mut out, ranked, limit)
    };
    if let Err(e) = written {
        eprintln!("error: failed to write output: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

impl ExtractionArgs {
    /// Builds engine settings by applying CLI overrides to the configuration.
    fn build_config(&self, config: &Config) -> ExtractorConfig {
        let mut settings = config.extractor_config();
        if let Some(case) = self.case_fold() {
            settings.case = case;
        }
        if let Some(accelerators) = &self.accelerators {
            settings.accelerators.clone_from(accelerators);
        }
        if let Some(term_words) = self.term_words {
            settings.term_length = term_words;
        }
        if let Some(language) = &self.source_language {
            settings.source_language.clone_from(language);
        }
        settings.invert |= self.invert;
        settings
    }

    /// Case policy selected on the command line, if any.
    fn case_fold(&self) -> Option<CaseFold> {
        if self.ignore_case {
            Some(CaseFold::IGNORE)
        } else if self.preserve_case {
            Some(CaseFold::PRESERVE)
        } else if self.fold_titlecase {
            Some(CaseFold::default())
        } else {
            None
        }
    }
}

impl ThresholdArgs {
    /// Builds filtering thresholds by applying CLI overrides to the configuration.
    fn build_thresholds(&self, config: &Config, inputs_needed: usize) -> Thresholds {
        let defaults = config.thresholds(inputs_needed);
        Thresholds {
            inputs_needed: self.inputs_needed.unwrap_or(defaults.inputs_needed),
            fullmsg_needed: self.fullmsg_needed.unwrap_or(defaults.fullmsg_needed),
            substr_needed: self.substr_needed.unwrap_or(defaults.substr_needed),
            locs_needed: self.locs_needed.unwrap_or(defaults.locs_needed),
        }
    }
}
