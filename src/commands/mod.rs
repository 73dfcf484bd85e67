//! Command handlers.
//!
//! `run` is the composition root: it loads the config file once, derives the
//! output settings, resolves credentials for commands that talk to Trello and
//! hands an explicit client to the handler.

mod batch;
mod config;
mod schema;

use std::process::ExitCode;

use anyhow::Result;

use crate::api::{HttpClient, TrelloApi};
use crate::cli::{Cli, Command, GlobalArgs};
use crate::config::{AuthConfig, Config, Credentials};
use crate::execute::{execute, Reply};
use crate::format::{new_formatter, FormatOptions, Formatter, OutputFormat};
use crate::request::Request;
use crate::ui;

const LLM_HELP: &str = include_str!("llm_help.txt");

/// Output choices for one invocation, built from the flags with the config
/// file as fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputSettings {
    pub format: OutputFormat,
    pub options: FormatOptions,
    pub quiet: bool,
}

impl OutputSettings {
    pub fn resolve(global: &GlobalArgs, config: &Config) -> Self {
        OutputSettings {
            format: global.format.unwrap_or(config.default_format),
            options: FormatOptions {
                fields: global.fields.clone(),
                verbose: global.verbose,
                max_tokens: global.max_tokens.unwrap_or(config.max_tokens),
            },
            quiet: global.quiet,
        }
    }

    pub fn formatter(&self) -> Box<dyn Formatter> {
        new_formatter(self.format, self.options.clone())
    }

    /// Prints `text` to stdout unless `--quiet` is set.
    pub fn emit(&self, text: &str) {
        if !self.quiet {
            println!("{text}");
        }
    }
}

pub fn run(cli: Cli) -> Result<ExitCode> {
    let Cli { global, command } = cli;
    let config = load_config();
    let settings = OutputSettings::resolve(&global, config.as_ref().unwrap_or(&Config::default()));

    let request: Request = match command {
        Command::Board(cmd) => cmd.into(),
        Command::List(cmd) => cmd.into(),
        Command::Card(cmd) => cmd.into(),
        Command::Label(cmd) => cmd.into(),
        Command::Checklist(cmd) => cmd.into(),
        Command::Member(cmd) => cmd.into(),
        Command::Attachment(cmd) => cmd.into(),
        Command::Batch(cmd) => {
            let client = connect(&global, config.as_ref())?;
            return batch::run(&client, &cmd, &settings);
        }
        Command::Config(cmd) => {
            config::run(&cmd, &global, &settings)?;
            return Ok(ExitCode::SUCCESS);
        }
        Command::Schema => {
            settings.emit(&schema::render()?);
            return Ok(ExitCode::SUCCESS);
        }
        Command::LlmHelp => {
            settings.emit(LLM_HELP);
            return Ok(ExitCode::SUCCESS);
        }
    };

    let client = connect(&global, config.as_ref())?;
    let output = run_request(&client, &request, &settings)?;
    settings.emit(&output);
    Ok(ExitCode::SUCCESS)
}

/// Executes one request and renders the reply. A resource of a different
/// shape than the request declares is an error and prints nothing.
pub fn run_request(api: &dyn TrelloApi, request: &Request, settings: &OutputSettings) -> Result<String> {
    let (kind, action) = request.name();
    let reply = ui::with_spinner(!settings.quiet, &format!("{kind} {action}..."), || {
        execute(api, request)
    })?;

    let formatter = settings.formatter();
    let text = match (reply, request.expected_kind()) {
        (Reply::Resource(resource), Some(expected)) => formatter.format_as(expected, &resource)?,
        (Reply::Resource(resource), None) => formatter.format(&resource)?,
        (Reply::Done(message), _) => formatter.format_success(&message),
    };
    Ok(text)
}

/// A config file that cannot be read is reported and otherwise ignored.
fn load_config() -> Option<Config> {
    match Config::load() {
        Ok(config) => Some(config),
        Err(err) => {
            tracing::warn!(%err, "ignoring config file");
            None
        }
    }
}

fn connect(global: &GlobalArgs, config: Option<&Config>) -> Result<HttpClient> {
    let flags = Credentials::new(global.api_key.clone(), global.token.clone());
    let auth = AuthConfig::load(config, &flags)?;
    Ok(HttpClient::new(&auth)?)
}
