//! Inspection record -> `docker run` translation. Pure, no I/O.
mod command;
mod types;

pub use types::{
    Argv, ContainerConfig, HostConfig, InspectionRecord, PortBinding, RestartPolicy,
    TranslatedResult,
};

use serde_json::Value;

use crate::error::RekcodError;

const SHORT_HASH_LEN: usize = 12;

/// Translate a single inspection record.
pub fn translate(record: &InspectionRecord) -> TranslatedResult {
    let name = record.name.as_deref().map(normalize_name);
    TranslatedResult {
        image: record.image.as_deref().map(short_hash),
        id: record.id.as_deref().map(short_hash),
        command: command::render(record, name.as_deref()),
        name,
    }
}

/// Translate a parsed `docker inspect` document.
///
/// Accepts either a single record object or an array of them and always
/// returns a list.
pub fn translate_value(value: Value) -> Result<Vec<TranslatedResult>, RekcodError> {
    records_from_value(value).map(|records| records.iter().map(translate).collect())
}

/// Parse a JSON string holding one record or an array of records.
pub fn parse(json: &str, origin: &str) -> Result<Vec<TranslatedResult>, RekcodError> {
    let value: Value = serde_json::from_str(json).map_err(|source| RekcodError::Parse {
        origin: origin.to_string(),
        source,
    })?;
    translate_value(value)
}

fn records_from_value(value: Value) -> Result<Vec<InspectionRecord>, RekcodError> {
    match value {
        Value::Array(items) => items.into_iter().map(record_from_value).collect(),
        other => Ok(vec![record_from_value(other)?]),
    }
}

fn record_from_value(value: Value) -> Result<InspectionRecord, RekcodError> {
    if !value.is_object() {
        return Err(RekcodError::MalformedRecord(format!(
            "expected an object, found {}",
            kind_of(&value)
        )));
    }
    serde_json::from_value(value).map_err(|e| RekcodError::MalformedRecord(e.to_string()))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Shorten a content hash to its first 12 characters.
pub fn short_hash(hash: &str) -> String {
    hash.chars().take(SHORT_HASH_LEN).collect()
}

/// Strip exactly one leading `/` from a container name.
pub fn normalize_name(name: &str) -> String {
    name.strip_prefix('/').unwrap_or(name).to_string()
}
