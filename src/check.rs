use anyhow::{Context, Result};
use rayon::prelude::*;
use std::fs;
use std::path::PathBuf;

use crate::config::Config;
use crate::engine::{Engine, EngineConfig, EngineDiagnostic};
use crate::facts::{DefaultFacts, SemanticFacts};
use crate::finding::Finding;
use crate::location::LineIndex;
use crate::parser::parse_source;
use crate::rule::RuleSet;

/// Everything one file produced: findings in traversal order plus
/// non-finding engine diagnostics (budget aborts).
#[derive(Debug, Default)]
pub struct FileReport {
    pub findings: Vec<Finding>,
    pub diagnostics: Vec<EngineDiagnostic>,
}

/// Check every configured path, one rayon task per file. A failure in
/// one file (unreadable, unparsable) is reported for that file only.
pub fn check(config: &Config) -> Vec<(PathBuf, Result<FileReport>)> {
    config
        .paths
        .par_iter()
        .map(|file| (file.clone(), check_path(file, config)))
        .collect()
}

pub fn check_path(path: &PathBuf, config: &Config) -> Result<FileReport> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    // The CLI has no external analyzer attached, so the syntactic
    // default provider answers the semantic queries.
    let mut report = check_source(&contents, &config.rules, &DefaultFacts, config.engine)
        .with_context(|| format!("Failed to check file: {}", path.display()))?;

    for finding in &mut report.findings {
        finding.filename = path.clone();
    }
    Ok(report)
}

/// Parse a source snippet and run the rule set over it. Findings come
/// back with row/column locations resolved; the filename is left for the
/// caller.
pub fn check_source(
    contents: &str,
    rules: &RuleSet,
    facts: &dyn SemanticFacts,
    engine_config: EngineConfig,
) -> Result<FileReport> {
    let tree = parse_source(contents)?;
    let engine = Engine::with_config(rules, facts, engine_config);
    let out = engine.run(&tree)?;

    let index = LineIndex::new(contents);
    let mut findings = out.findings;
    for finding in &mut findings {
        finding.location = Some(index.location(finding.report_span().start));
    }

    Ok(FileReport { findings, diagnostics: out.diagnostics })
}
