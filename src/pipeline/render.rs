use std::fmt::Write;

use anyhow::{Context, Result};

use super::orchestrator::Resolved;

const NOTHING: &str = "Nothing to translate";

/// Plain-text rendering: every command preceded by a blank line, with a
/// placeholder for inputs that produced no records and a trailing blank line.
pub fn render_text(resolved: &Resolved) -> String {
    let mut out = String::new();
    for slot in resolved {
        if slot.is_empty() {
            let _ = write!(out, "\n{NOTHING}\n");
            continue;
        }
        for result in slot {
            let _ = write!(out, "\n{}\n", result.command);
        }
    }
    out.push('\n');
    out
}

/// JSON rendering: one array of translated results per input.
pub fn render_json(resolved: &Resolved) -> Result<String> {
    let mut json =
        serde_json::to_string_pretty(resolved).context("failed to serialize results")?;
    json.push('\n');
    Ok(json)
}
