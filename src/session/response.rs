//! Result type for a completed console command.

use std::time::Duration;

/// Successful outcome of one console session run.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// The command that was executed.
    pub command: String,

    /// The cleaned output: echo and trailing prompt removed, leading and
    /// trailing whitespace trimmed, internal line breaks preserved.
    pub output: String,

    /// The raw response text before echo scrubbing.
    pub raw: String,

    /// The prompt that delimited the response.
    pub prompt: String,

    /// Wall time from spawn to prompt-delimited response.
    pub elapsed: Duration,
}

impl CommandOutput {
    /// Iterate over the cleaned output lines.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.output.lines()
    }

    /// Check if the cleaned output is empty.
    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }
}

impl std::fmt::Display for CommandOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.output)
    }
}
