//! muzzle CLI — bulk warning suppression for schema sources.
//!
//! Compiles the entry file with the requested lint rule sets, inserts a
//! `#suppress` annotation for every warning, then reformats the touched
//! files. See `muzzle --help` for usage.

use clap::Parser;

mod cli_args;

use cli_args::Cli;
use muzzle_core::host::OsHost;
use muzzle_suppress::pipeline::{self, SuppressOptions};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version land here too; they are not failures
            let code = match err.kind() {
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = err.print();
            std::process::exit(code);
        }
    };

    let options = SuppressOptions {
        entry_point: cli.entry_point,
        rule_sets: cli.rule_sets,
        message: cli.message,
    };

    let exit_code = match pipeline::run(&OsHost, &options) {
        Ok(summary) => {
            if cli.verbose {
                eprintln!(
                    "muzzle: {} warnings seen, {} annotations inserted, {} files formatted",
                    summary.warnings_seen, summary.suppressions, summary.files_formatted
                );
            }
            0
        }
        Err(err) => {
            eprintln!("muzzle: {err}");
            1
        }
    };
    std::process::exit(exit_code);
}
