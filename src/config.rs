use std::path::PathBuf;

use crate::args::CheckCommand;
use crate::engine::{EngineConfig, Overlap};
use crate::rule::RuleSet;
use crate::rule_table::RuleTable;
use crate::rules::compile_builtin;

/// Resolved configuration for one `check` invocation.
#[derive(Clone)]
pub struct Config {
    /// Paths to files to check.
    pub paths: Vec<PathBuf>,
    /// The compiled rule set, already narrowed to the selected rules.
    pub rules: RuleSet,
    pub engine: EngineConfig,
}

pub fn build_config(cmd: &CheckCommand, paths: Vec<PathBuf>) -> anyhow::Result<Config> {
    let (full_set, errors) = compile_builtin();
    // Collect-and-continue: a rule that fails to compile is dropped, the
    // rest of the set still loads.
    for error in &errors {
        tracing::warn!(rule = %error.rule, error = %error.error, "rule failed to compile");
    }

    let table = resolve_rule_table(&full_set, &cmd.select_rules, &cmd.ignore_rules)?;
    let mut rules = full_set;
    rules.retain(|rule| table.enabled(rule.name()));

    let engine = EngineConfig {
        overlap: if cmd.skip_matched { Overlap::SkipMatched } else { Overlap::Descend },
        match_budget: cmd.match_budget,
    };

    Ok(Config { paths, rules, engine })
}

/// Expand `--select-rules`/`--ignore-rules` tokens (rule names or
/// category codes such as `PERF`) against the compiled set.
pub fn resolve_rule_table(
    set: &RuleSet,
    select: &str,
    ignore: &str,
) -> anyhow::Result<RuleTable> {
    let mut table = RuleTable::empty();

    if select.is_empty() {
        for rule in set.rules() {
            table.enable(rule.name());
        }
    } else {
        for token in select.split(',') {
            let names = expand_token(set, token);
            if names.is_empty() {
                anyhow::bail!("--select-rules: unknown rule or category `{token}`");
            }
            for name in names {
                table.enable(&name);
            }
        }
    }

    if !ignore.is_empty() {
        for token in ignore.split(',') {
            let names = expand_token(set, token);
            if names.is_empty() {
                anyhow::bail!("--ignore-rules: unknown rule or category `{token}`");
            }
            for name in names {
                table.disable(&name);
            }
        }
    }

    Ok(table)
}

fn expand_token(set: &RuleSet, token: &str) -> Vec<String> {
    set.rules()
        .iter()
        .filter(|rule| rule.name() == token || rule.category().code() == token)
        .map(|rule| rule.name().to_string())
        .collect()
}
