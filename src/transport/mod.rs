//! Process transport layer.
//!
//! This module spawns the external console tool attached to a
//! pseudo-terminal and exposes a byte-oriented duplex stream to it,
//! with timeout-bounded prompt-pattern reads.

pub mod config;
mod pty;

pub use config::LaunchSpec;
pub use pty::{PtyTransport, ReadResult, ReadStatus};
