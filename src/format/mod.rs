//! Output formatting for Trello results.
//!
//! Two renderers share one contract: an optional field allow-list, a
//! verbosity flag and an approximate token ceiling. Token counts are
//! estimated at four characters per token; output above the ceiling is cut
//! at a character boundary and marked with [`TRUNCATION_MARKER`].

mod json;
mod markdown;

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Resource, ResourceKind};

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;

/// Appended to output cut down to the token ceiling.
pub const TRUNCATION_MARKER: &str = "\n\n... (truncated to fit token limit)";

const CHARS_PER_TOKEN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    #[default]
    #[value(alias = "md")]
    #[serde(alias = "md")]
    Markdown,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => f.write_str("json"),
            OutputFormat::Markdown => f.write_str("markdown"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            other => Err(FormatError::UnsupportedFormat(other.to_string())),
        }
    }
}

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("invalid result type: expected {expected}, got {found}")]
    TypeMismatch {
        expected: ResourceKind,
        found: ResourceKind,
    },

    #[error("unsupported format: {0} (supported: json, markdown)")]
    UnsupportedFormat(String),

    #[error("failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Field allow-list, verbosity and token ceiling shared by both renderers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormatOptions {
    pub fields: Vec<String>,
    pub verbose: bool,
    /// Zero disables truncation.
    pub max_tokens: usize,
}

impl FormatOptions {
    /// Whether an optional section should be rendered.
    pub fn shows(&self, field: &str) -> bool {
        self.verbose || self.fields.iter().any(|f| f == field)
    }
}

pub trait Formatter {
    fn format(&self, resource: &Resource) -> Result<String, FormatError>;

    fn format_success(&self, message: &str) -> String;

    /// Renders `resource` only if it is the shape the caller asked for.
    fn format_as(&self, expected: ResourceKind, resource: &Resource) -> Result<String, FormatError> {
        let found = resource.kind();
        if found != expected {
            return Err(FormatError::TypeMismatch { expected, found });
        }
        self.format(resource)
    }
}

pub fn new_formatter(format: OutputFormat, options: FormatOptions) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Json => Box::new(JsonFormatter::new(options)),
        OutputFormat::Markdown => Box::new(MarkdownFormatter::new(options)),
    }
}

pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / CHARS_PER_TOKEN
}

/// Cuts `text` to `max_tokens * 4` characters plus [`TRUNCATION_MARKER`]
/// when it is longer than that. `max_tokens == 0` means unlimited.
pub fn truncate_to_token_limit(text: String, max_tokens: usize) -> String {
    if max_tokens == 0 {
        return text;
    }
    let max_chars = max_tokens.saturating_mul(CHARS_PER_TOKEN);
    match text.char_indices().nth(max_chars) {
        None => text,
        Some((cut, _)) => {
            let mut truncated = text;
            truncated.truncate(cut);
            truncated.push_str(TRUNCATION_MARKER);
            truncated
        }
    }
}
