//! Console session driver.
//!
//! A [`ConsoleSession`] runs exactly one
//! connect → wait for prompt → send command → wait for prompt →
//! collect output → disconnect protocol against a spawned console
//! process and reports its outcome. One call is one attempt: no retries,
//! no persisted state, and the spawned process is released on every exit
//! path.

mod response;
mod scrub;

pub use response::CommandOutput;
pub use scrub::strip_echo;

use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::channel::PromptPattern;
use crate::error::{Result, SessionError, WaitPoint};
use crate::transport::{LaunchSpec, PtyTransport, ReadResult, ReadStatus};

/// Explicit session configuration: the prompt marker, the per-wait-step
/// timeout, and whether to ask the PTY to suppress local echo.
#[derive(Debug)]
pub struct SessionConfig {
    /// Pattern detecting the console's readiness prompt.
    pub prompt: PromptPattern,

    /// Timeout applied independently to each wait-for-prompt step.
    pub timeout: Duration,

    /// Disable the PTY's local echo before the first prompt wait.
    /// Best-effort: the echo scrubber copes when the transport cannot
    /// honor it.
    pub suppress_echo: bool,
}

impl SessionConfig {
    /// Create a configuration with echo suppression enabled.
    pub fn new(prompt: PromptPattern, timeout: Duration) -> Self {
        Self {
            prompt,
            timeout,
            suppress_echo: true,
        }
    }
}

/// Driver for one-shot interactive console sessions.
pub struct ConsoleSession {
    config: SessionConfig,
}

impl ConsoleSession {
    /// Create a session driver with the given configuration.
    pub fn new(config: SessionConfig) -> Self {
        Self { config }
    }

    /// Run one command on the console described by `spec`.
    ///
    /// Spawns the process, synchronizes on the prompt, sends `command`
    /// terminated by a single line break, collects everything up to the
    /// next prompt, scrubs the echo, requests a graceful `exit` without
    /// waiting for it, and releases the process. The command must be a
    /// single non-empty line.
    pub async fn run(&self, spec: &LaunchSpec, command: &str) -> Result<CommandOutput> {
        validate_command(command)?;

        let start = Instant::now();
        let mut transport = PtyTransport::spawn(spec)?;

        let result = self.drive(&mut transport, command, start).await;

        // Graceful exit is best-effort; the process is released
        // regardless of whether the remote side acknowledges.
        let _ = transport.send_line("exit");
        transport.close();

        result
    }

    async fn drive(
        &self,
        transport: &mut PtyTransport,
        command: &str,
        start: Instant,
    ) -> Result<CommandOutput> {
        if self.config.suppress_echo {
            if let Err(e) = transport.set_echo(false) {
                warn!("could not disable pty echo: {e}");
            }
        }

        // No input before a prompt is observed, or the command races
        // with the remote shell's startup banner.
        debug!("waiting for initial prompt /{}/", self.config.prompt);
        self.expect_prompt(transport, WaitPoint::InitialPrompt).await?;

        transport.send_line(command)?;

        debug!("command sent, waiting for output");
        let response = self
            .expect_prompt(transport, WaitPoint::ResponsePrompt)
            .await?;

        let raw = String::from_utf8_lossy(response.before_prompt()).to_string();
        let prompt = String::from_utf8_lossy(response.prompt().unwrap_or_default())
            .trim()
            .to_string();
        let output = strip_echo(&raw, command);

        Ok(CommandOutput {
            command: command.to_string(),
            output,
            raw,
            prompt,
            elapsed: start.elapsed(),
        })
    }

    /// Wait for the prompt, mapping timeout and stream-end to the
    /// session failure kinds for the given wait point.
    async fn expect_prompt(
        &self,
        transport: &mut PtyTransport,
        at: WaitPoint,
    ) -> Result<ReadResult> {
        let result = transport
            .read_until_prompt(&self.config.prompt, self.config.timeout)
            .await;

        match result.status {
            ReadStatus::PromptFound { .. } => Ok(result),
            ReadStatus::TimedOut => Err(SessionError::PromptTimeout {
                at,
                timeout: self.config.timeout,
                partial: String::from_utf8_lossy(&result.data).to_string(),
            }
            .into()),
            ReadStatus::Eof => Err(SessionError::UnexpectedEof {
                at,
                partial: String::from_utf8_lossy(&result.data).to_string(),
            }
            .into()),
        }
    }
}

fn validate_command(command: &str) -> Result<()> {
    if command.is_empty() {
        return Err(SessionError::InvalidCommand {
            message: "command is empty".to_string(),
        }
        .into());
    }
    if command.contains('\n') || command.contains('\r') {
        return Err(SessionError::InvalidCommand {
            message: "command contains a line break".to_string(),
        }
        .into());
    }
    Ok(())
}
