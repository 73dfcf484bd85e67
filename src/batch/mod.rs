//! Batch operations: many requests from one JSON or YAML document.
//!
//! ```yaml
//! continue_on_error: true
//! operations:
//!   - type: card
//!     resource: card
//!     action: move
//!     id: 5f1c...
//!     data:
//!       list_id: 5f1d...
//! ```

mod runner;

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

pub use runner::{BatchResult, BatchRunner};

/// One declarative unit of work. Missing keys deserialize to empty values
/// and are reported by validation rather than failing the whole document.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Operation {
    #[serde(rename = "type")]
    pub kind: String,
    pub resource: String,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub data: Map<String, Value>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<String, String>,
}

impl Operation {
    /// The target id, if present and non-empty.
    pub fn target_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct BatchFile {
    pub operations: Vec<Operation>,
    pub continue_on_error: bool,
}

impl BatchFile {
    /// Parses JSON, falling back to YAML. Blank input is an empty batch.
    pub fn parse(input: &str) -> Result<Self> {
        if input.trim().is_empty() {
            return Ok(BatchFile::default());
        }
        if let Ok(file) = serde_json::from_str(input) {
            return Ok(file);
        }
        serde_yaml::from_str(input).map_err(|err| {
            tracing::debug!(%err, "batch input is neither JSON nor YAML");
            Error::BatchParse
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::io("failed to read batch file", path, e))?;
        Self::parse(&text)
    }

    pub fn from_reader(mut reader: impl Read) -> Result<Self> {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(|e| Error::io("failed to read batch input from", "stdin", e))?;
        Self::parse(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_json() {
        let file = BatchFile::parse(
            r#"{"operations":[{"type":"board","resource":"board","action":"get","id":""}],"continue_on_error":true}"#,
        )
        .unwrap();
        assert!(file.continue_on_error);
        assert_eq!(file.operations.len(), 1);
        assert_eq!(file.operations[0].kind, "board");
        assert_eq!(file.operations[0].target_id(), None);
    }

    #[test]
    fn parses_yaml() {
        let yaml = "\
continue_on_error: false
operations:
  - type: card
    resource: card
    action: create
    data:
      name: Write tests
      list_id: l1
      pos: 2
";
        let file = BatchFile::parse(yaml).unwrap();
        assert!(!file.continue_on_error);
        let op = &file.operations[0];
        assert_eq!(op.action, "create");
        assert_eq!(op.data["name"], "Write tests");
        assert_eq!(op.data["pos"], 2);
    }

    #[test]
    fn empty_input_is_an_empty_batch() {
        assert_eq!(BatchFile::parse("").unwrap(), BatchFile::default());
        assert!(BatchFile::parse("  \n").unwrap().operations.is_empty());
    }

    #[test]
    fn missing_keys_default() {
        let file = BatchFile::parse(r#"{"operations":[{"action":"get"}]}"#).unwrap();
        assert!(!file.continue_on_error);
        assert_eq!(file.operations[0].kind, "");
    }

    #[test]
    fn rejects_garbage() {
        let err = BatchFile::parse("operations: [unclosed").unwrap_err();
        assert_eq!(err.to_string(), "could not parse batch input as JSON or YAML");
    }

    #[test]
    fn loads_from_file_and_reader() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, r#"{{"operations":[],"continue_on_error":true}}"#).unwrap();
        assert!(BatchFile::load(tmp.path()).unwrap().continue_on_error);

        let file = BatchFile::from_reader("operations: []\n".as_bytes()).unwrap();
        assert!(file.operations.is_empty());
    }

    #[test]
    fn missing_file_names_path() {
        let err = BatchFile::load(Path::new("/nonexistent/batch.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/batch.json"));
    }
}
