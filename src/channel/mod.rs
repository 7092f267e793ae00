//! Channel layer for prompt detection.
//!
//! This module handles prompt-pattern compilation and the byte buffer
//! that accumulates console output between prompt matches.

mod buffer;
mod patterns;

pub use buffer::PatternBuffer;
pub use patterns::PromptPattern;
