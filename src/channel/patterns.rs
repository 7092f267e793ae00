//! Prompt pattern compilation and validation.

use regex::bytes::Regex;

use crate::error::ChannelError;

/// A compiled prompt pattern, matched over raw bytes.
///
/// Console output is not guaranteed to be valid UTF-8 at the point of
/// matching, so the pattern operates on the byte stream directly.
///
/// A pattern that matches the empty string is rejected at construction:
/// it would signal readiness before the console produced any output.
#[derive(Debug, Clone)]
pub struct PromptPattern {
    pattern: Regex,
}

impl PromptPattern {
    /// Compile a prompt pattern from a regex string.
    pub fn new(pattern: &str) -> Result<Self, ChannelError> {
        let compiled = Regex::new(pattern)?;
        if compiled.is_match(b"") {
            return Err(ChannelError::MatchesEmpty {
                pattern: pattern.to_string(),
            });
        }
        Ok(Self { pattern: compiled })
    }

    /// Byte range of the first match in `data`, as (start, end) offsets.
    pub fn find(&self, data: &[u8]) -> Option<(usize, usize)> {
        self.pattern.find(data).map(|m| (m.start(), m.end()))
    }

    /// Check whether `data` contains a prompt match.
    pub fn is_match(&self, data: &[u8]) -> bool {
        self.pattern.is_match(data)
    }

    /// The pattern source string.
    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }
}

impl std::fmt::Display for PromptPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.pattern.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_shell_dollar_prompt() {
        let prompt = PromptPattern::new(r"\$ $").unwrap();
        assert!(prompt.is_match(b"user@host:/workspaces/app$ "));
        assert!(prompt.is_match(b"some output\n$ "));
        assert!(!prompt.is_match(b"still running..."));
    }

    #[test]
    fn find_reports_match_offsets() {
        let prompt = PromptPattern::new(r"app\$ $").unwrap();
        let data = b"line one\napp$ ";
        let (start, end) = prompt.find(data).unwrap();
        assert_eq!(&data[start..end], b"app$ ");
        assert_eq!(end, data.len());
    }

    #[test]
    fn rejects_empty_matching_pattern() {
        assert!(matches!(
            PromptPattern::new(r".*"),
            Err(ChannelError::MatchesEmpty { .. })
        ));
        assert!(matches!(
            PromptPattern::new(r"x?"),
            Err(ChannelError::MatchesEmpty { .. })
        ));
    }

    #[test]
    fn rejects_invalid_regex() {
        assert!(matches!(
            PromptPattern::new(r"("),
            Err(ChannelError::InvalidPattern(_))
        ));
    }
}
