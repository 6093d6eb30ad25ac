//! Recorded input scripts: one JSON [`InputEvent`] per line.
//!
//! Blank lines and lines starting with `#` are skipped, so scripts can carry
//! comments.
//!
//! ```text
//! # paint two cells red
//! {"type":"select_swatch","name":"red"}
//! {"type":"pointer_down","x":85,"y":65,"button":"primary"}
//! {"type":"pointer_move","x":105,"y":65}
//! {"type":"pointer_up","x":105,"y":65,"button":"primary"}
//! ```

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;

use canvas::input::InputEvent;

#[derive(Debug, thiserror::Error)]
#[error("line {line}: {source}")]
pub struct ScriptError {
    pub line: usize,
    #[source]
    pub source: serde_json::Error,
}

/// Parse a whole script.
///
/// # Errors
///
/// Returns the first line that is not a valid event.
pub fn parse_events(text: &str) -> Result<Vec<InputEvent>, ScriptError> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(line, raw)| serde_json::from_str(raw).map_err(|source| ScriptError { line, source }))
        .collect()
}
