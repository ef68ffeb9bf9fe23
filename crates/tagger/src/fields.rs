use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};

/// Read a JSON object of raw field values from `path`
pub fn load_fields_file(path: &str) -> Result<Map<String, Value>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read fields file '{}'", path))?;
    parse_fields(&text).with_context(|| format!("Invalid fields file '{}'", path))
}

pub fn parse_fields(text: &str) -> Result<Map<String, Value>> {
    match serde_json::from_str::<Value>(text)? {
        Value::Object(map) => Ok(map),
        other => bail!("expected a JSON object of field values, got {}", other),
    }
}

/// Parse `key=value`; values that are valid JSON keep their JSON type, the rest are text
pub fn parse_assignment(assignment: &str) -> Result<(String, Value)> {
    let Some((key, raw)) = assignment.split_once('=') else {
        bail!("expected KEY=VALUE, got '{}'", assignment);
    };

    let key = key.trim();
    if key.is_empty() {
        bail!("field name missing in '{}'", assignment);
    }

    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}

/// Later layers win per key
pub fn merge_fields(layers: impl IntoIterator<Item = Map<String, Value>>) -> Map<String, Value> {
    let mut merged = Map::new();
    for layer in layers {
        merged.extend(layer);
    }
    merged
}
