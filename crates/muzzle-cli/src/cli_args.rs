use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "muzzle",
    version,
    about = "Suppress schema lint warnings in bulk"
)]
pub(crate) struct Cli {
    /// Entry-point schema file to compile
    pub entry_point: PathBuf,

    /// Lint rule set to enable (repeatable, e.g. core/recommended)
    #[arg(short = 'r', long = "rule-set", value_name = "NAME")]
    pub rule_sets: Vec<String>,

    /// Message recorded in each inserted annotation
    #[arg(short, long)]
    pub message: Option<String>,

    /// Print a run summary to stderr
    #[arg(long)]
    pub verbose: bool,
}
