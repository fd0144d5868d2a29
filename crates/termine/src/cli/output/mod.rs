//! Rendering and JSON serialization for CLI output.

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use termine_extract::TermRecord;

/// ANSI escape codes for terminal styling.
mod colors {
    /// Bold text.
    pub const BOLD: &str = "\x1b[1m";
    /// Yellow text (for warnings).
    pub const YELLOW: &str = "\x1b[33m";
    /// Dim/gray text (for less important info).
    pub const DIM: &str = "\x1b[2m";
    /// Reset all formatting.
    pub const RESET: &str = "\x1b[0m";
}

/// Formats a section heading.
pub fn subheader(text: &str) -> String {
    format!("{}{}{}", colors::BOLD, text, colors::RESET)
}

/// Formats text as dimmed/less important.
pub fn dim(text: &str) -> String {
    format!("{}{}{}", colors::DIM, text, colors::RESET)
}

/// Formats text as a warning.
pub fn warning(text: &str) -> String {
    format!("{}{}{}", colors::YELLOW, text, colors::RESET)
}

/// Opens the destination for results: a file when given, else stdout.
pub fn open_output(path: Option<&Path>) -> io::Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    })
}

/// Writes ranked terms as a table. `limit` of 0 writes every term.
pub fn write_table(
    out: &mut dyn Write,
    terms: &[(usize, TermRecord)],
    limit: usize,
) -> io::Result<()> {
    let shown = if limit == 0 {
        terms.len()
    } else {
        limit.min(terms.len())
    };

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Score", "Term", "Target"]);
    for (score, record) in &terms[..shown] {
        let target = if record.fuzzy {
            format!("{} (fuzzy)", record.target)
        } else {
            record.target.clone()
        };
        table.add_row(vec![
            Cell::new(score.to_string()),
            Cell::new(&record.term),
            Cell::new(target),
        ]);
    }

    writeln!(out, "{table}")?;
    if shown < terms.len() {
        writeln!(out, "{} of {} terms shown", shown, terms.len())?;
    }
    out.flush()
}

/// Writes ranked terms as a pretty-printed JSON array of records.
pub fn write_json(out: &mut dyn Write, terms: &[(usize, TermRecord)]) -> io::Result<()> {
    let records: Vec<&TermRecord> = terms.iter().map(|(_, record)| record).collect();
    serde_json::to_writer_pretty(&mut *out, &records)?;
    writeln!(out)?;
    out.flush()
}

/// Writes ranked terms as JSON Lines translation units, one per line.
pub fn write_jsonl(out: &mut dyn Write, terms: &[(usize, TermRecord)]) -> io::Result<()> {
    for (_, record) in terms {
        serde_json::to_writer(&mut *out, &record.to_unit())?;
        writeln!(out)?;
    }
    out.flush()
}
