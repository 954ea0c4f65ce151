use clap::ValueEnum;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::finding::Finding;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Print findings in a concise format, one per line
    #[default]
    Concise,
    /// Print findings as JSON
    Json,
}

/// Takes the findings and per-file errors and displays them in different
/// ways depending on the `--output-format` provided by the user.
pub trait Emitter {
    fn emit<W: Write>(
        &self,
        writer: &mut W,
        findings: &Vec<&Finding>,
        errors: &Vec<(String, anyhow::Error)>,
    ) -> anyhow::Result<()>;
}

pub struct ConciseEmitter;

impl Emitter for ConciseEmitter {
    fn emit<W: Write>(
        &self,
        writer: &mut W,
        findings: &Vec<&Finding>,
        errors: &Vec<(String, anyhow::Error)>,
    ) -> anyhow::Result<()> {
        // First, print all file-level errors.
        for (_path, err) in errors {
            eprintln!("{}: {:#}", "Error".red().bold(), err);
        }

        // Then, the findings.
        let mut total_findings = 0;
        let mut n_with_suggestion = 0usize;
        for finding in findings {
            let (row, col) = match finding.location {
                Some(loc) => (loc.row(), loc.column()),
                None => (0, 0),
            };
            write!(
                writer,
                "{} [{}:{}] {} {}\n",
                finding.filename.to_string_lossy().white(),
                row,
                col,
                finding.rule.red(),
                finding.message
            )?;
            if let Some(suggestion) = &finding.suggestion {
                write!(writer, "  suggestion: {suggestion}\n")?;
                n_with_suggestion += 1;
            }
            total_findings += 1;
        }

        // Finally, the summary.
        if total_findings > 0 {
            if total_findings > 1 {
                writeln!(writer, "\nFound {} issues.", total_findings)?;
            } else {
                writeln!(writer, "\nFound 1 issue.")?;
            }
            if n_with_suggestion > 0 {
                writeln!(writer, "{n_with_suggestion} with a suggested rewrite.")?;
            }
        } else if errors.is_empty() {
            writeln!(writer, "All checks passed!")?;
        }

        Ok(())
    }
}

pub struct JsonEmitter;

impl Emitter for JsonEmitter {
    fn emit<W: Write>(
        &self,
        writer: &mut W,
        findings: &Vec<&Finding>,
        _errors: &Vec<(String, anyhow::Error)>,
    ) -> anyhow::Result<()> {
        serde_json::to_writer_pretty(&mut *writer, findings)?;
        writeln!(writer)?;
        Ok(())
    }
}
