//! `mediacenter`: browse a language-aware media catalog from the command line.

mod cli;
mod error;
mod logging;
mod output;
mod source;

use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    logging::init(cli.verbose);
    match cli.run() {
        Ok(code) => code,
        Err(err) => {
            tracing::debug!(retryable = err.is_retryable(), "Command failed");
            eprintln!("Error: {err:?}");
            ExitCode::FAILURE
        },
    }
}
