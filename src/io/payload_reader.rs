use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::Value;

use crate::payload::Payload;

pub fn parse_payload_file(path: &Path) -> Result<Payload> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read payload file: {}", path.display()))?;
    parse_payload_content(&content)
        .with_context(|| format!("failed to parse payload file: {}", path.display()))
}

pub fn parse_payload_content(content: &str) -> Result<Payload> {
    let trimmed = content.trim_start_matches('\u{feff}').trim();
    if trimmed.is_empty() {
        bail!("Payload is empty; expected a JSON object");
    }

    let value: Value = serde_json::from_str(trimmed).context("Payload is not valid JSON")?;
    match value {
        Value::Object(map) => Ok(map),
        other => bail!(
            "Payload must be a JSON object, got {}",
            json_kind(&other)
        ),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
