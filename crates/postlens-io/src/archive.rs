//! Loading raw records from an archive export
//!
//! Accepts the `tweets.js` layout (`window.YTD.tweets.part0 = [...]` with
//! each record wrapped in `{"tweet": {...}}`), a plain JSON array, or JSONL.

use anyhow::{Context, Result};
use postlens_core::RawRecord;
use serde_json::Value;
use std::path::Path;

/// Drop the `window.YTD.<name>.partN =` assignment in front of the array
fn strip_assignment(contents: &str) -> &str {
    let trimmed = contents.trim_start();
    if trimmed.starts_with("window.") {
        if let Some(eq) = trimmed.find('=') {
            return trimmed[eq + 1..].trim_start();
        }
    }
    trimmed
}

/// Unwrap `{"tweet": {...}}`. A value that does not fit the record shape
/// becomes an empty record, so ingestion still counts it as malformed and
/// positions stay stable.
fn to_record(index: usize, value: Value) -> RawRecord {
    let value = match value {
        Value::Object(mut map) if map.len() == 1 && map.contains_key("tweet") => {
            map.remove("tweet").unwrap_or(Value::Null)
        }
        other => other,
    };
    match serde_json::from_value(normalize_ids(value)) {
        Ok(record) => record,
        Err(e) => {
            tracing::debug!(index, error = %e, "record does not match the archive shape");
            RawRecord::default()
        }
    }
}

/// Numeric ids become strings
fn normalize_ids(mut value: Value) -> Value {
    if let Value::Object(map) = &mut value {
        for key in ["id", "id_str"] {
            let id = match map.get(key) {
                Some(Value::Number(n)) => n.to_string(),
                _ => continue,
            };
            map.insert(key.to_string(), Value::String(id));
        }
    }
    value
}

/// Parse archive contents in any of the accepted layouts
pub fn parse_archive(contents: &str) -> Result<Vec<RawRecord>> {
    let body = strip_assignment(contents);
    if body.is_empty() {
        return Ok(Vec::new());
    }

    if body.starts_with('[') {
        let array = body.trim_end().trim_end_matches(';');
        let values: Vec<Value> =
            serde_json::from_str(array).context("archive is not a JSON array")?;
        return Ok(values
            .into_iter()
            .enumerate()
            .map(|(i, v)| to_record(i, v))
            .collect());
    }

    let mut records = Vec::new();
    for (line_no, line) in body.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let value: Value = serde_json::from_str(line)
            .with_context(|| format!("line {} is not valid JSON", line_no + 1))?;
        records.push(to_record(records.len(), value));
    }
    Ok(records)
}

/// Read and parse an archive file
pub fn load_archive(path: &Path) -> Result<Vec<RawRecord>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read archive: {}", path.display()))?;
    let records =
        parse_archive(&contents).with_context(|| format!("Failed to parse {}", path.display()))?;
    tracing::info!(records = records.len(), path = %path.display(), "loaded archive");
    Ok(records)
}
