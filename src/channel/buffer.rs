//! Accumulation buffer with tail-bounded prompt search.
//!
//! Prompt patterns only ever match near the end of the stream, so the
//! search is restricted to the last `search_depth` bytes rather than the
//! whole accumulated output. Large command outputs stay cheap to poll.

use super::patterns::PromptPattern;

const DEFAULT_SEARCH_DEPTH: usize = 1000;

/// Buffer that accumulates console output and searches its tail for a
/// prompt.
///
/// ANSI escape sequences are stripped as data arrives, so the prompt
/// pattern and any later text processing see plain bytes. Control
/// sequences are tolerated, not interpreted.
#[derive(Debug)]
pub struct PatternBuffer {
    buffer: Vec<u8>,
    search_depth: usize,
}

impl PatternBuffer {
    /// Create a buffer that searches the last `search_depth` bytes for
    /// prompt matches.
    pub fn new(search_depth: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(4096),
            search_depth,
        }
    }

    /// Append raw PTY output, stripping ANSI escape codes.
    pub fn extend(&mut self, data: &[u8]) {
        let cleaned = strip_ansi_escapes::strip(data);
        self.buffer.extend_from_slice(&cleaned);
    }

    /// Search the buffer tail for the prompt.
    ///
    /// Returns the match as (start, end) byte offsets into the full
    /// buffer, not the tail.
    pub fn find_prompt(&self, prompt: &PromptPattern) -> Option<(usize, usize)> {
        let tail_start = self.buffer.len().saturating_sub(self.search_depth);
        prompt
            .find(&self.buffer[tail_start..])
            .map(|(s, e)| (tail_start + s, tail_start + e))
    }

    /// Check if the tail contains a prompt match.
    pub fn contains_prompt(&self, prompt: &PromptPattern) -> bool {
        self.find_prompt(prompt).is_some()
    }

    /// Take ownership of the buffer contents and reset.
    pub fn take(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.buffer)
    }

    /// Buffer contents.
    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    /// Buffer contents as a string (lossy UTF-8 conversion).
    pub fn as_str_lossy(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.buffer)
    }

    /// Current buffer length.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

impl Default for PatternBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DEPTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extend_accumulates() {
        let mut buffer = PatternBuffer::new(100);
        buffer.extend(b"hello, ");
        buffer.extend(b"console");
        assert_eq!(buffer.as_slice(), b"hello, console");
    }

    #[test]
    fn ansi_codes_are_stripped() {
        let mut buffer = PatternBuffer::new(100);
        buffer.extend(b"\x1b[32mgreen\x1b[0m text");
        assert_eq!(buffer.as_slice(), b"green text");
    }

    #[test]
    fn prompt_found_in_tail_with_absolute_offsets() {
        let mut buffer = PatternBuffer::new(20);
        buffer.extend(&[b'x'; 100]);
        buffer.extend(b"\napp$ ");

        let prompt = PromptPattern::new(r"app\$ $").unwrap();
        let (start, end) = buffer.find_prompt(&prompt).unwrap();
        assert_eq!(&buffer.as_slice()[start..end], b"app$ ");
        assert_eq!(end, buffer.len());
    }

    #[test]
    fn prompt_outside_search_depth_is_missed() {
        let mut buffer = PatternBuffer::new(10);
        buffer.extend(b"app$ ");
        buffer.extend(&[b'x'; 100]);

        // The prompt scrolled out of the searched tail.
        let prompt = PromptPattern::new(r"app\$ ").unwrap();
        assert!(!buffer.contains_prompt(&prompt));
    }

    #[test]
    fn take_clears_the_buffer() {
        let mut buffer = PatternBuffer::new(100);
        buffer.extend(b"partial output");
        assert_eq!(buffer.take(), b"partial output");
        assert!(buffer.is_empty());
    }
}
