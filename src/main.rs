use clap::Parser;
use colored::Colorize;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;
use walkdir::WalkDir;

use vakt::args::{Args, CheckCommand, Command};
use vakt::check::check;
use vakt::config::build_config;
use vakt::finding::Finding;
use vakt::logging::init_logging;
use vakt::output_format::{ConciseEmitter, Emitter, JsonEmitter, OutputFormat};

fn main() {
    let args = Args::parse();
    init_logging(args.global_options.log_level);
    if args.global_options.no_color {
        colored::control::set_override(false);
    }

    let outcome = match args.command {
        Command::Check(cmd) => run_check(cmd),
    };

    match outcome {
        Ok(clean) => std::process::exit(if clean { 0 } else { 1 }),
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            std::process::exit(2);
        }
    }
}

fn run_check(cmd: CheckCommand) -> anyhow::Result<bool> {
    let start = Instant::now();

    let paths = discover_files(&cmd.files)?;
    let config = build_config(&cmd, paths)?;
    let results = check(&config);

    let mut reports = Vec::new();
    let mut errors: Vec<(String, anyhow::Error)> = Vec::new();
    for (path, result) in results {
        match result {
            Ok(report) => {
                for diagnostic in &report.diagnostics {
                    tracing::warn!(file = %path.display(), "{diagnostic}");
                }
                reports.push(report);
            }
            Err(e) => errors.push((path.display().to_string(), e)),
        }
    }

    let mut findings: Vec<&Finding> = reports.iter().flat_map(|r| r.findings.iter()).collect();
    findings.sort();

    let mut stdout = std::io::stdout().lock();
    match cmd.output_format {
        OutputFormat::Concise => ConciseEmitter.emit(&mut stdout, &findings, &errors)?,
        OutputFormat::Json => JsonEmitter.emit(&mut stdout, &findings, &errors)?,
    }
    stdout.flush()?;

    if cmd.with_timing {
        println!("Checked files in: {:?}", start.elapsed());
    }

    Ok(findings.is_empty() && errors.is_empty())
}

/// Expand the command-line inputs: files are taken as-is, directories are
/// walked for `*.vx` snippet files.
fn discover_files(inputs: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        let path = PathBuf::from(input);
        if path.is_file() {
            files.push(path);
            continue;
        }
        if !path.is_dir() {
            anyhow::bail!("no such file or directory: {input}");
        }
        for entry in WalkDir::new(&path)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
            .filter(|e| e.path().extension() == Some(std::ffi::OsStr::new("vx")))
        {
            files.push(entry.path().to_path_buf());
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}
