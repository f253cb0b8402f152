//! fiche - file inventory, duplicate finder and tree comparator
//!
//! Entry point for the fiche CLI application.

use clap::Parser;
use fiche::{cli::Cli, error::ExitCode, logging::init_logging_with_progress};
use indicatif::MultiProgress;

fn main() {
    let cli = Cli::parse();
    let multi = MultiProgress::new();
    init_logging_with_progress(cli.verbose, cli.quiet, &multi);

    match fiche::run_app_with_progress(cli, multi) {
        Ok(code) => std::process::exit(code.as_i32()),
        Err(err) => {
            let exit_code = ExitCode::GeneralError;
            eprintln!("[{}] Error: {:#}", exit_code.code_prefix(), err);
            std::process::exit(exit_code.as_i32());
        }
    }
}
