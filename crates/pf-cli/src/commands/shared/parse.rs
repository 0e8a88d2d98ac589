use std::io::Read;

use anyhow::Context;
use serde_json::{Map, Value};

/// Parse `key=value`. The value is taken as JSON when it parses, else as a
/// plain string.
pub fn parse_assignment(raw: &str) -> anyhow::Result<(String, Value)> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow::anyhow!("invalid assignment '{raw}': expected key=value"))?;
    let key = key.trim();
    if key.is_empty() {
        anyhow::bail!("invalid assignment '{raw}': empty key");
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

/// Collect repeated `key=value` flags into a map; later keys win.
pub fn parse_assignments(raw: &[String]) -> anyhow::Result<Map<String, Value>> {
    let mut map = Map::new();
    for item in raw {
        let (key, value) = parse_assignment(item)?;
        map.insert(key, value);
    }
    Ok(map)
}

/// Read a whole file, or stdin when `path` is `-`.
pub fn read_text(path: &str) -> anyhow::Result<String> {
    if path == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read stdin")?;
        return Ok(buffer);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {path}"))
}

/// Read and parse a JSON file, or stdin when `path` is `-`.
pub fn read_json(path: &str) -> anyhow::Result<Value> {
    let text = read_text(path)?;
    serde_json::from_str(&text).with_context(|| format!("{path} is not valid JSON"))
}
