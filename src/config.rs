// Configuration file and credential resolution.
//
// The file lives at `~/.trello-cli/config.yaml`. Credentials are resolved
// from, in order: environment variables, the config file, command-line flags.

use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::format::OutputFormat;

pub const ENV_API_KEY: &str = "TRELLO_API_KEY";
pub const ENV_TOKEN: &str = "TRELLO_TOKEN";

const CONFIG_DIR: &str = ".trello-cli";
const CONFIG_FILE: &str = "config.yaml";

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub api_key: String,
    pub token: String,
    pub default_format: OutputFormat,
    /// Zero means unlimited.
    pub max_tokens: usize,
}

pub fn config_path() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or(Error::NoHomeDir)?;
    Ok(home.join(CONFIG_DIR).join(CONFIG_FILE))
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path()?)
    }

    /// A missing file is not an error and yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
            Err(e) => return Err(Error::io("failed to read config file", path, e)),
        };
        if text.trim().is_empty() {
            return Ok(Config::default());
        }
        serde_yaml::from_str(&text).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = config_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Writes the file readable by the owner only.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| Error::io("failed to create config directory", dir, e))?;
        }
        let yaml = serde_yaml::to_string(self)?;

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options
            .open(path)
            .map_err(|e| Error::io("failed to write config file", path, e))?;
        #[cfg(unix)]
        {
            // `mode` only applies on creation; tighten an existing file too.
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o600))
                .map_err(|e| Error::io("failed to set permissions on", path, e))?;
        }
        file.write_all(yaml.as_bytes())
            .map_err(|e| Error::io("failed to write config file", path, e))?;
        tracing::debug!(path = %path.display(), "saved config");
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    Environment,
    ConfigFile,
    Flags,
}

impl fmt::Display for AuthSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AuthSource::Environment => "environment variables",
            AuthSource::ConfigFile => "config file",
            AuthSource::Flags => "command-line flags",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    pub api_key: String,
    pub token: String,
    pub source: AuthSource,
}

/// A possibly incomplete key/token pair from one source.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub api_key: Option<String>,
    pub token: Option<String>,
}

impl Credentials {
    pub fn new(api_key: Option<String>, token: Option<String>) -> Self {
        Credentials { api_key, token }
    }

    pub fn from_env() -> Self {
        Credentials {
            api_key: std::env::var(ENV_API_KEY).ok(),
            token: std::env::var(ENV_TOKEN).ok(),
        }
    }

    fn complete(&self, source: AuthSource) -> Option<AuthConfig> {
        match (self.api_key.as_deref(), self.token.as_deref()) {
            (Some(key), Some(token)) if !key.is_empty() && !token.is_empty() => Some(AuthConfig {
                api_key: key.to_string(),
                token: token.to_string(),
                source,
            }),
            _ => None,
        }
    }
}

impl AuthConfig {
    /// First source holding both a key and a token wins.
    pub fn resolve(env: &Credentials, config: Option<&Config>, flags: &Credentials) -> Result<Self> {
        let from_config = config.map(|c| Credentials::new(Some(c.api_key.clone()), Some(c.token.clone())));
        env.complete(AuthSource::Environment)
            .or_else(|| from_config.and_then(|c| c.complete(AuthSource::ConfigFile)))
            .or_else(|| flags.complete(AuthSource::Flags))
            .ok_or(Error::MissingCredentials)
    }

    /// Resolves against the process environment, an already loaded config
    /// file (if it could be read) and the command-line flags.
    pub fn load(config: Option<&Config>, flags: &Credentials) -> Result<Self> {
        let auth = Self::resolve(&Credentials::from_env(), config, flags)?;
        tracing::debug!(source = %auth.source, "resolved credentials");
        Ok(auth)
    }
}

/// Shows the first and last four characters of longer secrets.
pub fn mask(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    match chars.len() {
        0 => "(not set)".to_string(),
        n if n <= 8 => "***".to_string(),
        n => {
            let head: String = chars[..4].iter().collect();
            let tail: String = chars[n - 4..].iter().collect();
            format!("{head}***{tail}")
        }
    }
}
