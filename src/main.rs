// Entrypoint for the CLI application.
// - Keeps `main` small: parse flags, set up logging, hand off to `commands`.
// - Errors print once to stderr; the exit code is 1 on any failure.

use std::io::IsTerminal;
use std::process::ExitCode;

use clap::Parser;
use crossterm::style::Stylize;

use trello_cli::{cli::Cli, commands, logging};

fn main() -> ExitCode {
    let cli = Cli::parse();
    let quiet = cli.global.quiet;

    if let Err(err) = logging::init_logging(cli.global.debug, quiet) {
        eprintln!("failed to initialize logging: {err:#}");
    }

    match commands::run(cli) {
        Ok(code) => code,
        Err(err) => {
            if !quiet {
                let prefix = if std::io::stderr().is_terminal() {
                    "Error:".red().bold().to_string()
                } else {
                    "Error:".to_string()
                };
                eprintln!("{prefix} {err:#}");
            }
            ExitCode::FAILURE
        }
    }
}
