#![allow(clippy::enum_variant_names)]

use std::process::ExitCode;

use clap::Parser as _;
use tracing::{debug, info};

use crate::{
    application::{Application, data::LogLevel},
    cli::Cli,
};

mod application;
mod changes;
mod cli;
mod commands;
mod console;
mod ext;
mod filesystem;
mod fingerprint;
mod guard;
#[cfg(test)]
mod test_support;

/// Exit status for options clap could not parse.
const INVALID_OPTIONS_EXIT_CODE: u8 = 1;

#[compio::main]
async fn main() -> ExitCode {
    let cli_args = match Cli::try_parse() {
        Ok(cli_args) => cli_args,
        Err(error) if !error.use_stderr() => error.exit(),
        Err(error) => {
            let _ = error.print();
            return ExitCode::from(INVALID_OPTIONS_EXIT_CODE);
        }
    };
    setup_tracing(cli_args.effective_log_level());
    console::setup_colors();
    debug!("Parsed CLI arguments: {cli_args:?}");

    match Application::run(cli_args).await {
        Ok(change_set) => {
            info!("Replicated {} changes", change_set.len());
            ExitCode::SUCCESS
        }
        Err(error) => {
            let exit_code = error.exit_code();
            debug!("Run failed with {:?} error, exiting with {exit_code}", error.kind());
            eprintln!("{}", snafu::Report::from_error(error));
            ExitCode::from(exit_code)
        }
    }
}

fn setup_tracing(log_level: LogLevel) {
    if let Some(level) = log_level.to_tracing_level() {
        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .without_time()
            .compact()
            .init();
    }
}
