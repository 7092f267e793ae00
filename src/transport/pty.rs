//! PTY process transport.
//!
//! Spawns the console tool on a pseudo-terminal, pumps its output from a
//! dedicated reader thread into a bounded channel, and provides
//! timeout-bounded reads that stop at a prompt-pattern match.

use std::io::{Read, Write};
use std::time::{Duration, Instant};

use log::{debug, trace};
use portable_pty::{Child, ChildKiller, CommandBuilder, MasterPty, PtySize, native_pty_system};
use tokio::sync::mpsc;

use super::config::LaunchSpec;
use crate::channel::{PatternBuffer, PromptPattern};
use crate::error::TransportError;

const TERM_ROWS: u16 = 24;
const TERM_COLS: u16 = 80;
const READ_CHUNK: usize = 4096;
const OUTPUT_CHANNEL_CAPACITY: usize = 64;

/// One spawned console process plus the duplex byte stream driving it.
///
/// The child process, the master PTY, and its writer are exclusively
/// owned by this transport and released when it is closed or dropped.
pub struct PtyTransport {
    child: Box<dyn Child + Send + Sync>,
    master: Box<dyn MasterPty + Send>,
    writer: Box<dyn Write + Send>,
    output_rx: mpsc::Receiver<Vec<u8>>,
    buffer: PatternBuffer,
}

impl PtyTransport {
    /// Spawn the process described by `spec` attached to a new PTY.
    pub fn spawn(spec: &LaunchSpec) -> Result<Self, TransportError> {
        let pty_system = native_pty_system();

        let pair = pty_system
            .openpty(PtySize {
                rows: TERM_ROWS,
                cols: TERM_COLS,
                pixel_width: 0,
                pixel_height: 0,
            })
            .map_err(|e| TransportError::PtyOpenFailed(e.to_string()))?;

        let mut cmd = CommandBuilder::new(&spec.program);
        cmd.args(&spec.args);

        let child = pair
            .slave
            .spawn_command(cmd)
            .map_err(|e| TransportError::SpawnFailed {
                program: spec.program.clone(),
                message: e.to_string(),
            })?;

        // The child holds its own slave handles.
        drop(pair.slave);

        let reader = pair
            .master
            .try_clone_reader()
            .map_err(|e| TransportError::PtyOpenFailed(e.to_string()))?;
        let writer = pair
            .master
            .take_writer()
            .map_err(|e| TransportError::PtyOpenFailed(e.to_string()))?;

        let (output_tx, output_rx) = mpsc::channel(OUTPUT_CHANNEL_CAPACITY);
        std::thread::spawn(move || Self::reader_loop(reader, output_tx));

        debug!("spawned '{}' on a pty", spec.command_line());

        Ok(Self {
            child,
            master: pair.master,
            writer,
            output_rx,
            buffer: PatternBuffer::default(),
        })
    }

    /// Reader loop running on a dedicated thread. Exits on EOF, read
    /// error, or when the receiving side is dropped.
    fn reader_loop(mut reader: Box<dyn Read + Send>, output_tx: mpsc::Sender<Vec<u8>>) {
        let mut chunk = [0u8; READ_CHUNK];
        loop {
            match reader.read(&mut chunk) {
                // EOF: dropping the sender signals end-of-stream.
                Ok(0) => break,
                Ok(n) => {
                    if output_tx.blocking_send(chunk[..n].to_vec()).is_err() {
                        break;
                    }
                }
                Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                    std::thread::sleep(Duration::from_millis(10));
                }
                // Read errors mean the process exited or the PTY closed.
                Err(_) => break,
            }
        }
    }

    /// Toggle the PTY's local echo flag (termios `ECHO`).
    ///
    /// The remote prompt is the only reliable synchronization signal, so
    /// suppressing local echo keeps the response stream cleaner. Callers
    /// treat failure as non-fatal; the echo scrubber copes either way.
    #[cfg(unix)]
    pub fn set_echo(&self, enable: bool) -> Result<(), TransportError> {
        let fd = self.master.as_raw_fd().ok_or_else(|| {
            TransportError::Io(std::io::Error::other("pty exposes no file descriptor"))
        })?;

        // SAFETY: fd is a valid open PTY descriptor owned by `master`,
        // and termios is plain data fully initialized by tcgetattr.
        unsafe {
            let mut term: libc::termios = std::mem::zeroed();
            if libc::tcgetattr(fd, &mut term) != 0 {
                return Err(TransportError::Io(std::io::Error::last_os_error()));
            }
            if enable {
                term.c_lflag |= libc::ECHO;
            } else {
                term.c_lflag &= !libc::ECHO;
            }
            if libc::tcsetattr(fd, libc::TCSANOW, &term) != 0 {
                return Err(TransportError::Io(std::io::Error::last_os_error()));
            }
        }
        Ok(())
    }

    /// Echo control is not available off unix.
    #[cfg(not(unix))]
    pub fn set_echo(&self, _enable: bool) -> Result<(), TransportError> {
        Err(TransportError::Io(std::io::Error::other(
            "echo control is not supported on this platform",
        )))
    }

    /// Send a single line, terminated by one line break.
    pub fn send_line(&mut self, line: &str) -> Result<(), TransportError> {
        trace!("sending line: {line:?}");
        self.writer
            .write_all(line.as_bytes())
            .and_then(|_| self.writer.write_all(b"\n"))
            .and_then(|_| self.writer.flush())
            .map_err(|e| TransportError::WriteFailed(e.to_string()))
    }

    /// Read until `prompt` matches the accumulated output, the stream
    /// ends, or `timeout` elapses, whichever comes first.
    ///
    /// On a match, everything up to and including the prompt is drained
    /// and returned; bytes already received past the match stay buffered
    /// for the next read. On timeout or EOF the partial buffer is
    /// drained and returned with the corresponding status.
    pub async fn read_until_prompt(
        &mut self,
        prompt: &PromptPattern,
        timeout: Duration,
    ) -> ReadResult {
        let deadline = Instant::now() + timeout;

        loop {
            if let Some((start, end)) = self.buffer.find_prompt(prompt) {
                let mut data = self.buffer.take();
                let rest = data.split_off(end);
                self.buffer.extend(&rest);
                return ReadResult {
                    data,
                    status: ReadStatus::PromptFound {
                        prompt_start: start,
                    },
                };
            }

            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return ReadResult {
                    data: self.buffer.take(),
                    status: ReadStatus::TimedOut,
                };
            }

            match tokio::time::timeout(remaining, self.output_rx.recv()).await {
                Ok(Some(chunk)) => self.buffer.extend(&chunk),
                Ok(None) => {
                    return ReadResult {
                        data: self.buffer.take(),
                        status: ReadStatus::Eof,
                    };
                }
                Err(_) => {
                    return ReadResult {
                        data: self.buffer.take(),
                        status: ReadStatus::TimedOut,
                    };
                }
            }
        }
    }

    /// Terminate the process and release the PTY.
    pub fn close(self) {
        debug!("closing console transport");
        // Drop does the actual teardown.
    }
}

impl Drop for PtyTransport {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.try_wait();
    }
}

/// Outcome of a `read_until_prompt` call.
#[derive(Debug)]
pub struct ReadResult {
    /// Bytes accumulated during this read. When the prompt matched, this
    /// includes the prompt itself; otherwise it is whatever partial
    /// output arrived before the timeout or EOF.
    pub data: Vec<u8>,

    /// How the read ended.
    pub status: ReadStatus,
}

/// How a prompt read ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadStatus {
    /// The prompt matched; `prompt_start` is its byte offset in `data`.
    PromptFound { prompt_start: usize },
    /// The timeout elapsed before a prompt appeared.
    TimedOut,
    /// The stream ended before a prompt appeared.
    Eof,
}

impl ReadResult {
    /// Bytes before the prompt match, or all data if there was none.
    pub fn before_prompt(&self) -> &[u8] {
        match self.status {
            ReadStatus::PromptFound { prompt_start } => &self.data[..prompt_start],
            _ => &self.data,
        }
    }

    /// The matched prompt bytes, if any.
    pub fn prompt(&self) -> Option<&[u8]> {
        match self.status {
            ReadStatus::PromptFound { prompt_start } => Some(&self.data[prompt_start..]),
            _ => None,
        }
    }
}
