//! CLI entry point for the tile pattern generator

use clap::Parser;
use std::process::ExitCode;
use tilecollapse::io::cli::{Cli, PatternRunner};

// Allow print so failures reach the user without a Debug-formatted error
#[allow(clippy::print_stderr)]
fn main() -> ExitCode {
    let runner = PatternRunner::new(Cli::parse());
    match runner.process() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}
