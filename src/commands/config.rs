use anyhow::{Context, Result};

use super::OutputSettings;
use crate::cli::{ConfigCommand, GlobalArgs};
use crate::config::{config_path, mask, Config};
use crate::ui;

pub fn run(cmd: &ConfigCommand, global: &GlobalArgs, settings: &OutputSettings) -> Result<()> {
    match cmd {
        ConfigCommand::Set { default_format } => {
            let mut config = Config::load().context("failed to load config")?;
            if let Some(key) = &global.api_key {
                config.api_key = key.clone();
            }
            if let Some(token) = &global.token {
                config.token = token.clone();
            }
            if let Some(format) = default_format {
                config.default_format = *format;
            }
            if let Some(max_tokens) = global.max_tokens {
                config.max_tokens = max_tokens;
            }
            let path = config.save().context("failed to save config")?;
            settings.emit(
                &settings
                    .formatter()
                    .format_success(&format!("Configuration saved to {}", path.display())),
            );
        }
        ConfigCommand::Show => {
            let config = Config::load().context("failed to load config")?;
            let path = config_path()?;
            settings.emit(&show(&config, &path.display().to_string()));
        }
        ConfigCommand::Path => {
            let path = config_path().context("failed to get config path")?;
            settings.emit(&path.display().to_string());
        }
        ConfigCommand::Init => {
            let current = Config::load().unwrap_or_default();
            let config = ui::config_wizard(&current)?;
            let path = config.save().context("failed to save config")?;
            settings.emit(
                &settings
                    .formatter()
                    .format_success(&format!("Configuration saved to {}", path.display())),
            );
        }
    }
    Ok(())
}

fn show(config: &Config, path: &str) -> String {
    format!(
        "Configuration file: {path}\nAPI Key: {}\nToken: {}\nDefault Format: {}\nMax Tokens: {}",
        mask(&config.api_key),
        mask(&config.token),
        config.default_format,
        config.max_tokens
    )
}
