//! Error types for conex.

use std::io;
use std::time::Duration;

use thiserror::Error;

/// Main error type for conex operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Process transport-level errors
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Prompt pattern / buffer errors
    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),

    /// Session protocol errors
    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

/// Transport layer errors (process spawning, PTY I/O).
#[derive(Error, Debug)]
pub enum TransportError {
    /// Failed to open a PTY pair
    #[error("Failed to open PTY: {0}")]
    PtyOpenFailed(String),

    /// Failed to spawn the console tool
    #[error("Failed to spawn '{program}': {message}")]
    SpawnFailed { program: String, message: String },

    /// Failed to write to the process
    #[error("Failed to write to process: {0}")]
    WriteFailed(String),

    /// The transport was used after being closed
    #[error("Transport closed")]
    Closed,

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Channel layer errors (prompt pattern compilation and validation).
#[derive(Error, Debug)]
pub enum ChannelError {
    /// Invalid regex pattern
    #[error("Invalid prompt pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Pattern would match before any output arrives
    #[error("Prompt pattern '{pattern}' matches the empty string")]
    MatchesEmpty { pattern: String },
}

/// Session protocol errors (the terminal failure kinds of a run).
#[derive(Error, Debug)]
pub enum SessionError {
    /// A prompt wait exceeded its bound. The remote state is unknown;
    /// the process is still released on this path.
    #[error("No prompt within {timeout:?} while waiting for {at}")]
    PromptTimeout {
        at: WaitPoint,
        timeout: Duration,
        /// Bytes buffered before the deadline, lossy-decoded. Diagnostic
        /// content only.
        partial: String,
    },

    /// The process stream ended before a prompt was observed.
    #[error("Console closed unexpectedly while waiting for {at}")]
    UnexpectedEof {
        at: WaitPoint,
        /// Bytes buffered before the stream ended, lossy-decoded. Cannot
        /// be trusted as a complete prompt-delimited response.
        partial: String,
    },

    /// Caller error: the command cannot be sent as a single line.
    #[error("Invalid command: {message}")]
    InvalidCommand { message: String },
}

impl SessionError {
    /// Partial bytes captured before the failure, if any.
    pub fn partial(&self) -> Option<&str> {
        match self {
            SessionError::PromptTimeout { partial, .. }
            | SessionError::UnexpectedEof { partial, .. } => {
                if partial.is_empty() { None } else { Some(partial) }
            }
            SessionError::InvalidCommand { .. } => None,
        }
    }
}

/// Which prompt wait a failure occurred in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitPoint {
    /// Waiting for the shell's first prompt after spawn.
    InitialPrompt,
    /// Waiting for the prompt that delimits the command's output.
    ResponsePrompt,
}

impl std::fmt::Display for WaitPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WaitPoint::InitialPrompt => write!(f, "the initial prompt"),
            WaitPoint::ResponsePrompt => write!(f, "the response prompt"),
        }
    }
}

/// Result type alias using conex's Error.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_display_names_the_wait_step() {
        let err = SessionError::PromptTimeout {
            at: WaitPoint::ResponsePrompt,
            timeout: Duration::from_secs(30),
            partial: String::new(),
        };
        let msg = err.to_string();
        assert!(msg.contains("response prompt"), "got: {msg}");
    }

    #[test]
    fn partial_is_none_when_empty() {
        let err = SessionError::UnexpectedEof {
            at: WaitPoint::InitialPrompt,
            partial: String::new(),
        };
        assert!(err.partial().is_none());

        let err = SessionError::UnexpectedEof {
            at: WaitPoint::InitialPrompt,
            partial: "half a banner".to_string(),
        };
        assert_eq!(err.partial(), Some("half a banner"));
    }
}
