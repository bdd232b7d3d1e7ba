//! Classification of raw arguments into inline JSON, files, or containers.

use std::path::{Path, PathBuf};

use log::debug;
use serde_json::Value;

/// What a single command-line argument turned out to be.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    /// A `docker inspect` document passed inline.
    Json(Value),
    /// A path to a file holding `docker inspect` output.
    File(PathBuf),
    /// Anything else: a container name or id for the inspect program.
    Container(String),
}

/// An input together with its position on the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedInput {
    pub index: usize,
    pub input: Input,
}

/// Classify one argument.
///
/// Probes in order: JSON document, existing path, container identifier.
/// Only objects and arrays count as JSON, so numeric ids such as `123456`
/// are still treated as containers.
pub fn classify(raw: &str) -> Input {
    if let Some(value) = parse_document(raw) {
        return Input::Json(value);
    }
    if Path::new(raw).metadata().is_ok() {
        return Input::File(PathBuf::from(raw));
    }
    Input::Container(raw.to_string())
}

/// Classify every argument, keeping its position.
pub fn classify_all<S: AsRef<str>>(args: &[S]) -> Vec<IndexedInput> {
    args.iter()
        .enumerate()
        .map(|(index, raw)| {
            let input = classify(raw.as_ref());
            debug!("input #{index} classified as {}", input.kind());
            IndexedInput { index, input }
        })
        .collect()
}

/// Inputs taken from a stdin blob when no arguments were given.
///
/// A whole-blob JSON document (piped `docker inspect`) becomes one input;
/// otherwise the blob is split on whitespace (piped `docker ps -q`) and each
/// token is classified. Returns an empty list for a blank blob.
pub fn from_stdin(blob: &str) -> Vec<IndexedInput> {
    if let Some(value) = parse_document(blob) {
        return vec![IndexedInput {
            index: 0,
            input: Input::Json(value),
        }];
    }
    let tokens: Vec<&str> = blob.split_whitespace().collect();
    classify_all(&tokens)
}

fn parse_document(raw: &str) -> Option<Value> {
    match serde_json::from_str::<Value>(raw) {
        Ok(value @ (Value::Object(_) | Value::Array(_))) => Some(value),
        _ => None,
    }
}

impl Input {
    pub fn kind(&self) -> &'static str {
        match self {
            Input::Json(_) => "json",
            Input::File(_) => "file",
            Input::Container(_) => "container",
        }
    }
}
