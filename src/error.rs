// Error types shared by the library modules. Command handlers wrap these
// with `anyhow` context; the types here stay small and descriptive.

use std::path::PathBuf;

use thiserror::Error;

use crate::format::FormatError;
use crate::request::ValidationError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Format(#[from] FormatError),

    /// Non-success status from the Trello API, with the response body.
    #[error("Trello API returned {status}: {body}")]
    Api { status: u16, body: String },

    /// Transport or decoding failure. The request URL is stripped because
    /// it carries the API key and token.
    #[error("HTTP request failed")]
    Http(#[source] reqwest::Error),

    #[error("invalid Trello id '{0}'")]
    InvalidId(String),

    #[error("invalid Trello API URL {url}: {reason}")]
    BaseUrl { url: String, reason: String },

    #[error("no valid Trello credentials found. Please set TRELLO_API_KEY and TRELLO_TOKEN environment variables, create a config file, or use --api-key and --token flags")]
    MissingCredentials,

    #[error("could not determine the home directory")]
    NoHomeDir,

    #[error("{action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("could not parse batch input as JSON or YAML")]
    BatchParse,

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Http(err.without_url())
    }
}

impl Error {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            action,
            path: path.into(),
            source,
        }
    }
}
