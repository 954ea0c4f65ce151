use clap::{Parser, Subcommand};

use crate::logging::LogLevel;
use crate::output_format::OutputFormat;

#[derive(Parser)]
#[command(
    author,
    name = "vakt",
    about = "vakt: structural pattern matching and rewrite over syntax trees",
    after_help = "For help with a specific command, see: `vakt help <command>`."
)]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
    #[clap(flatten)]
    pub global_options: GlobalOptions,
}

#[derive(Subcommand)]
pub enum Command {
    /// Check a set of files or directories
    Check(CheckCommand),
}

#[derive(Clone, Debug, Parser)]
#[command(arg_required_else_help(true))]
pub struct CheckCommand {
    #[arg(
        required = true,
        help = "List of files or directories to check, for example `vakt check .`."
    )]
    pub files: Vec<String>,
    #[arg(
        short,
        long,
        default_value = "",
        help = "Names of rules to include, separated by a comma (no spaces). This also accepts names of groups of rules, such as \"PERF\"."
    )]
    pub select_rules: String,
    #[arg(
        short,
        long,
        default_value = "",
        help = "Names of rules to exclude, separated by a comma (no spaces). This also accepts names of groups of rules, such as \"PERF\"."
    )]
    pub ignore_rules: String,
    #[arg(
        long,
        default_value = "false",
        help = "Skip the children of a matched node instead of reporting nested issues inside it."
    )]
    pub skip_matched: bool,
    #[arg(
        long,
        help = "Abort a single rule/node match attempt after this many matcher steps. Guards against pathological variadic backtracking."
    )]
    pub match_budget: Option<u64>,
    #[arg(
        short,
        long,
        default_value = "false",
        help = "Show the time taken by the check."
    )]
    pub with_timing: bool,
    #[arg(
        long,
        value_enum,
        default_value_t = OutputFormat::default(),
        help = "Output serialization format for findings."
    )]
    pub output_format: OutputFormat,
}

/// All configuration options that can be passed "globally"
#[derive(Debug, Default, clap::Args)]
#[command(next_help_heading = "Global options")]
pub struct GlobalOptions {
    /// The log level. One of: `error`, `warn`, `info`, `debug`, or `trace`. Defaults
    /// to `warn`.
    #[arg(long, global = true)]
    pub log_level: Option<LogLevel>,

    /// Disable colored output. To turn colored output off, either set this option or set
    /// the environment variable `NO_COLOR` to any non-zero value.
    #[arg(long, global = true)]
    pub no_color: bool,
}
