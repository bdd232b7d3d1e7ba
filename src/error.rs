use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort a translation run.
///
/// Every variant is fatal: the first one raised stops the whole invocation.
#[derive(Error, Debug)]
pub enum RekcodError {
    /// The inspect program could not be started.
    #[error("failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The inspect program ran but exited unsuccessfully.
    #[error("{program} failed with code {} from signal {}", fmt_opt(.code), fmt_opt(.signal))]
    ProcessExit {
        program: String,
        code: Option<i32>,
        signal: Option<i32>,
        stdout: Option<String>,
        stderr: Option<String>,
    },

    /// Input that should have been JSON was not.
    #[error("failed to parse JSON from {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    /// A path classified as a file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// JSON that does not have the shape of an inspection record.
    #[error("malformed inspection record: {0}")]
    MalformedRecord(String),
}

impl RekcodError {
    /// Process exit status to report for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ProcessExit {
                code: Some(code), ..
            } if *code != 0 => *code,
            _ => 1,
        }
    }

    /// Captured stdout of a failed inspect process, if any.
    pub fn captured_stdout(&self) -> Option<&str> {
        match self {
            Self::ProcessExit { stdout, .. } => stdout.as_deref(),
            _ => None,
        }
    }

    /// Captured stderr of a failed inspect process, if any.
    pub fn captured_stderr(&self) -> Option<&str> {
        match self {
            Self::ProcessExit { stderr, .. } => stderr.as_deref(),
            _ => None,
        }
    }
}

fn fmt_opt(value: &Option<i32>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "null".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exit(code: Option<i32>, signal: Option<i32>) -> RekcodError {
        RekcodError::ProcessExit {
            program: "docker inspect".into(),
            code,
            signal,
            stdout: None,
            stderr: Some("Error: No such object: nope\n".into()),
        }
    }

    #[test]
    fn process_exit_carries_upstream_code() {
        assert_eq!(exit(Some(3), None).exit_code(), 3);
    }

    #[test]
    fn signal_kill_falls_back_to_one() {
        assert_eq!(exit(None, Some(9)).exit_code(), 1);
    }

    #[test]
    fn other_kinds_exit_with_one() {
        let err = RekcodError::MalformedRecord("expected an object".into());
        assert_eq!(err.exit_code(), 1);
        assert!(err.captured_stderr().is_none());
    }

    #[test]
    fn process_exit_message_names_code_and_signal() {
        let msg = exit(Some(1), None).to_string();
        assert_eq!(msg, "docker inspect failed with code 1 from signal null");
    }

    #[test]
    fn captured_streams_are_exposed() {
        let err = exit(Some(1), None);
        assert_eq!(err.captured_stderr(), Some("Error: No such object: nope\n"));
        assert_eq!(err.captured_stdout(), None);
    }
}
