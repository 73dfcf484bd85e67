use serde_json::{json, Map, Value};

use super::{truncate_to_token_limit, FormatError, FormatOptions, Formatter};
use crate::models::Resource;

/// Pretty-printed JSON. A non-empty field list restricts each object (or
/// each object in a collection) to exactly those keys.
pub struct JsonFormatter {
    options: FormatOptions,
}

impl JsonFormatter {
    pub fn new(options: FormatOptions) -> Self {
        JsonFormatter { options }
    }

    fn filter(&self, value: Value) -> Value {
        if self.options.fields.is_empty() {
            return value;
        }
        match value {
            Value::Object(map) => Value::Object(self.filter_object(map)),
            Value::Array(items) => Value::Array(items.into_iter().map(|v| self.filter(v)).collect()),
            other => other,
        }
    }

    fn filter_object(&self, mut map: Map<String, Value>) -> Map<String, Value> {
        let mut kept = Map::new();
        for field in &self.options.fields {
            if let Some(v) = map.remove(field) {
                kept.insert(field.clone(), v);
            }
        }
        kept
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, resource: &Resource) -> Result<String, FormatError> {
        let value = self.filter(serde_json::to_value(resource)?);
        let text = serde_json::to_string_pretty(&value)?;
        Ok(truncate_to_token_limit(text, self.options.max_tokens))
    }

    fn format_success(&self, message: &str) -> String {
        let value = json!({ "status": "success", "message": message });
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| message.to_string())
    }
}
