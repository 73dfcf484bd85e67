use std::fmt::Write as _;

use serde::Serialize;
use serde_json::Value;

use super::Operation;
use crate::format::OutputFormat;
use crate::request::Request;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct BatchResult {
    pub operation: Operation,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Runs operations in order and keeps one result per attempted operation.
#[derive(Debug, Default)]
pub struct BatchRunner {
    continue_on_error: bool,
    results: Vec<BatchResult>,
}

impl BatchRunner {
    pub fn new(continue_on_error: bool) -> Self {
        BatchRunner {
            continue_on_error,
            results: Vec::new(),
        }
    }

    /// Validates each operation and hands the typed request to `dispatch`.
    /// Operations failing validation never reach `dispatch`. Without
    /// `continue_on_error` the first failure ends the run.
    pub fn run<F>(&mut self, operations: &[Operation], mut dispatch: F)
    where
        F: FnMut(&Request) -> anyhow::Result<Value>,
    {
        for (index, op) in operations.iter().enumerate() {
            let outcome = Request::from_operation(op)
                .map_err(anyhow::Error::from)
                .and_then(|request| dispatch(&request));

            let failed = outcome.is_err();
            let result = match outcome {
                Ok(data) => BatchResult {
                    operation: op.clone(),
                    success: true,
                    error: None,
                    data: Some(data),
                },
                Err(err) => {
                    tracing::debug!(index, error = %format!("{err:#}"), "batch operation failed");
                    BatchResult {
                        operation: op.clone(),
                        success: false,
                        error: Some(format!("{err:#}")),
                        data: None,
                    }
                }
            };
            self.results.push(result);

            if failed && !self.continue_on_error {
                tracing::debug!(
                    skipped = operations.len() - index - 1,
                    "stopping batch after first failure"
                );
                return;
            }
        }
    }

    pub fn results(&self) -> &[BatchResult] {
        &self.results
    }

    pub fn success_count(&self) -> usize {
        self.results.iter().filter(|r| r.success).count()
    }

    pub fn error_count(&self) -> usize {
        self.results.iter().filter(|r| !r.success).count()
    }

    pub fn render(&self, format: OutputFormat) -> serde_json::Result<String> {
        match format {
            OutputFormat::Json => serde_json::to_string_pretty(&self.results),
            OutputFormat::Markdown => Ok(self.render_markdown()),
        }
    }

    fn render_markdown(&self) -> String {
        let mut out = String::from("# Batch Operation Results\n\n");
        let _ = write!(
            out,
            "**Total Operations:** {}\n**Successful:** {}\n**Failed:** {}\n\n",
            self.results.len(),
            self.success_count(),
            self.error_count()
        );

        for (i, result) in self.results.iter().enumerate() {
            let op = &result.operation;
            let icon = if result.success { "✅" } else { "❌" };
            let _ = write!(
                out,
                "## Operation {} {icon}\n- **Type:** {}\n- **Resource:** {}\n- **Action:** {}\n",
                i + 1,
                op.kind,
                op.resource,
                op.action
            );
            if let Some(id) = op.target_id() {
                let _ = writeln!(out, "- **ID:** {id}");
            }
            match &result.error {
                None => out.push_str("- **Status:** Success\n"),
                Some(err) => {
                    let _ = write!(out, "- **Status:** Failed\n- **Error:** {err}\n");
                }
            }
            out.push('\n');
        }
        out
    }
}
