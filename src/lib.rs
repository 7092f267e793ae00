//! # conex
//!
//! One-shot command runner for remote app-platform consoles.
//!
//! conex drives a single interactive session with a console exposed
//! through an external CLI tool (such as `doctl apps console`): it
//! spawns the tool on a pseudo-terminal, synchronizes on a shell-style
//! prompt, injects one command, captures the output produced before the
//! next prompt, and terminates the session cleanly. Failures (prompt
//! timeout, unexpected stream end, spawn faults) are returned as typed
//! values with diagnostic context, never panics.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use conex::{ConsoleSession, LaunchSpec, PromptPattern, SessionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), conex::Error> {
//!     let config = SessionConfig::new(
//!         PromptPattern::new(r"\$ $")?,
//!         Duration::from_secs(30),
//!     );
//!     let spec = LaunchSpec::new("doctl")
//!         .args(["apps", "console", "e6cd1234", "dev-workspace"]);
//!
//!     let session = ConsoleSession::new(config);
//!     let out = session.run(&spec, "ls -l").await?;
//!     println!("{}", out.output);
//!     Ok(())
//! }
//! ```

pub mod channel;
pub mod error;
pub mod session;
pub mod transport;

// Re-export main types for convenience
pub use channel::PromptPattern;
pub use error::{Error, Result, SessionError, TransportError, WaitPoint};
pub use session::{CommandOutput, ConsoleSession, SessionConfig};
pub use transport::LaunchSpec;
