// Terminal helpers: a spinner shown while remote calls run and the
// interactive `config init` wizard. Both stay out of the way when output is
// not a terminal, so piped and scripted use is unaffected.

use std::io::IsTerminal;
use std::time::Duration;

use anyhow::{bail, Result};
use dialoguer::{Input, Password, Select};
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::Config;
use crate::format::OutputFormat;

/// Runs `f` with a spinner on stderr when `show` is set and stderr is a
/// terminal.
pub fn with_spinner<T>(show: bool, message: &str, f: impl FnOnce() -> T) -> T {
    if !show || !std::io::stderr().is_terminal() {
        return f();
    }
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    let out = f();
    spinner.finish_and_clear();
    out
}

/// Prompts for credentials and output defaults, starting from `current`.
/// Empty secret input keeps the saved value.
pub fn config_wizard(current: &Config) -> Result<Config> {
    if !std::io::stdin().is_terminal() {
        bail!("config init needs an interactive terminal; use `config set --api-key .. --token ..` instead");
    }

    println!("Get your API key and token at https://trello.com/app-key\n");

    let api_key: String = Input::new()
        .with_prompt("Trello API key")
        .with_initial_text(current.api_key.clone())
        .interact_text()?;
    // `Password` hides input in the terminal.
    let token: String = Password::new()
        .with_prompt("Trello token (leave empty to keep the saved one)")
        .allow_empty_password(true)
        .interact()?;

    let formats = [OutputFormat::Markdown, OutputFormat::Json];
    let default = formats
        .iter()
        .position(|f| *f == current.default_format)
        .unwrap_or(0);
    let choice = Select::new()
        .with_prompt("Default output format")
        .items(&formats)
        .default(default)
        .interact()?;

    let max_tokens: usize = Input::new()
        .with_prompt("Max tokens per response (0 = unlimited)")
        .default(current.max_tokens)
        .interact_text()?;

    Ok(Config {
        api_key: api_key.trim().to_string(),
        token: if token.is_empty() {
            current.token.clone()
        } else {
            token
        },
        default_format: formats[choice],
        max_tokens,
    })
}
