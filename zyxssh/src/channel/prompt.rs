//! Prompt detection and output normalization.
//!
//! The device shell gives no end-of-output framing, so the raw capture
//! contains the login prompt, the echoed command and one or more trailing
//! prompts mixed in with the report. [`clean_output`] reduces it to the
//! report text alone.

use serde::Deserialize;

/// Shell prompt markers printed by the access point CLI.
///
/// Any output line containing one of the markers is treated as a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct PromptMarkers(Vec<String>);

impl PromptMarkers {
    /// Create a marker set from arbitrary strings.
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(markers.into_iter().map(Into::into).collect())
    }

    /// Check whether a line is, or contains, a prompt.
    pub fn is_prompt_line(&self, line: &str) -> bool {
        self.0.iter().any(|marker| line.contains(marker.as_str()))
    }

    /// Iterate over the configured markers.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Default for PromptMarkers {
    fn default() -> Self {
        Self::new(["Router(config)#", "Router#", "Router>"])
    }
}

/// Strip prompts, command echo and surrounding blank lines from raw output.
///
/// Cleaning is idempotent: feeding the result back in returns it unchanged.
pub fn clean_output(raw: &str, command: &str, prompts: &PromptMarkers) -> String {
    let command = command.trim();
    let mut lines: Vec<&str> = Vec::new();

    for line in raw.split('\n') {
        let line = line.trim_end_matches('\r');

        if prompts.is_prompt_line(line) {
            continue;
        }
        if !command.is_empty() && line.trim() == command {
            continue;
        }
        if lines.is_empty() && line.trim().is_empty() {
            continue;
        }
        lines.push(line);
    }

    while lines.last().is_some_and(|line| line.trim().is_empty()) {
        lines.pop();
    }

    lines.join("\n").trim().to_string()
}
