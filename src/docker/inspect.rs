use std::process::{Command, Stdio};

use log::debug;
use serde_json::Value;

use crate::error::RekcodError;

/// Resolves container identifiers to raw inspection documents.
///
/// Implementations must resolve the whole batch in one shot: either every
/// identifier is returned, in request order, or the batch fails.
pub trait Inspect: Send + Sync {
    fn inspect_many(&self, ids: &[String]) -> Result<Vec<Value>, RekcodError>;
}

/// Runs an external inspect program (`docker inspect` by default) once with
/// every identifier appended to its arguments.
#[derive(Debug, Clone)]
pub struct CommandInspector {
    program: String,
    args: Vec<String>,
}

impl CommandInspector {
    /// Build from an argv whose first element is the program to run.
    pub fn from_argv(argv: Vec<String>) -> Option<Self> {
        let mut iter = argv.into_iter();
        let program = iter.next()?;
        Some(Self {
            program,
            args: iter.collect(),
        })
    }

    fn display_name(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for CommandInspector {
    fn default() -> Self {
        Self {
            program: "docker".into(),
            args: vec!["inspect".into()],
        }
    }
}

impl Inspect for CommandInspector {
    fn inspect_many(&self, ids: &[String]) -> Result<Vec<Value>, RekcodError> {
        debug!("running {} for {} container(s)", self.display_name(), ids.len());

        let output = Command::new(&self.program)
            .args(&self.args)
            .args(ids)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| RekcodError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(RekcodError::ProcessExit {
                program: self.display_name(),
                code: output.status.code(),
                signal: exit_signal(&output.status),
                stdout: non_empty(&output.stdout),
                stderr: non_empty(&output.stderr),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let value: Value =
            serde_json::from_str(&stdout).map_err(|source| RekcodError::Parse {
                origin: format!("`{}` output", self.display_name()),
                source,
            })?;
        Ok(into_list(value))
    }
}

/// Normalize a single object or an array of objects to a list.
pub fn into_list(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        other => vec![other],
    }
}

fn non_empty(bytes: &[u8]) -> Option<String> {
    if bytes.is_empty() {
        None
    } else {
        Some(String::from_utf8_lossy(bytes).into_owned())
    }
}

#[cfg(unix)]
fn exit_signal(status: &std::process::ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn exit_signal(_status: &std::process::ExitStatus) -> Option<i32> {
    None
}
