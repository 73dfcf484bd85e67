use std::process::ExitCode;

use anyhow::{Context, Result};

use super::OutputSettings;
use crate::api::TrelloApi;
use crate::batch::{BatchFile, BatchRunner};
use crate::cli::BatchCommand;
use crate::execute::execute;
use crate::format::truncate_to_token_limit;
use crate::ui;

/// Runs a batch and prints its report. Any failed operation makes the exit
/// code non-zero.
pub fn run(api: &dyn TrelloApi, cmd: &BatchCommand, settings: &OutputSettings) -> Result<ExitCode> {
    let file = match cmd {
        BatchCommand::File { path } => BatchFile::load(path).context("failed to load batch file")?,
        BatchCommand::Stdin => {
            BatchFile::from_reader(std::io::stdin().lock()).context("failed to load batch from stdin")?
        }
    };
    tracing::debug!(
        operations = file.operations.len(),
        continue_on_error = file.continue_on_error,
        "running batch"
    );

    let mut runner = BatchRunner::new(file.continue_on_error);
    ui::with_spinner(!settings.quiet, "Running batch...", || {
        runner.run(&file.operations, |request| {
            Ok(execute(api, request)?.into_value()?)
        })
    });

    let report = runner.render(settings.format)?;
    settings.emit(&truncate_to_token_limit(report, settings.options.max_tokens));

    if runner.error_count() > 0 {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
