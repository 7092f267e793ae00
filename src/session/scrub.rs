//! Best-effort removal of the remote shell's command echo.

/// Strip the echoed command from a raw prompt-delimited response.
///
/// Two-tier strategy, tolerating transports with inconsistent echo
/// behavior: first look for a line whose trimmed content contains the
/// exact command text and keep only the lines strictly after it; when no
/// such line exists, or when the echo line is the last line (echo glued
/// to the output with no line break), strip just the first literal
/// occurrence of the command substring. Idempotent on already-cleaned
/// output.
///
/// Line endings are normalized to `\n`; leading and trailing whitespace
/// is trimmed, internal structure preserved.
pub fn strip_echo(raw: &str, command: &str) -> String {
    let normalized = raw.replace("\r\n", "\n");
    let lines: Vec<&str> = normalized.lines().collect();

    if let Some(echo_idx) = lines.iter().position(|line| line.trim().contains(command)) {
        if echo_idx + 1 < lines.len() {
            return lines[echo_idx + 1..].join("\n").trim().to_string();
        }
    }

    normalized.replacen(command, "", 1).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_full_line_echo() {
        let raw = "ls -l\r\ntotal 3\r\nfile-a\r\nfile-b\r\n";
        assert_eq!(strip_echo(raw, "ls -l"), "total 3\nfile-a\nfile-b");
    }

    #[test]
    fn removes_echo_with_prompt_fragments_around_it() {
        // Some consoles echo the command glued to a prompt fragment.
        let raw = "user@box:/app$ ls -l\ntotal 3\nfile-a\n";
        assert_eq!(strip_echo(raw, "ls -l"), "total 3\nfile-a");
    }

    #[test]
    fn glued_echo_falls_back_to_substring_strip() {
        // Echo and output on one line: the line-based tier would keep
        // nothing, so the substring fallback recovers the output.
        let raw = "ls -ltotal 3";
        assert_eq!(strip_echo(raw, "ls -l"), "total 3");
    }

    #[test]
    fn no_echo_passes_through_trimmed() {
        let raw = "  total 3\nfile-a\n\n";
        assert_eq!(strip_echo(raw, "ls -l"), "total 3\nfile-a");
    }

    #[test]
    fn idempotent_on_cleaned_output() {
        let raw = "ls -l\ntotal 3\nfile-a\nfile-b";
        let once = strip_echo(raw, "ls -l");
        let twice = strip_echo(&once, "ls -l");
        assert_eq!(once, twice);
    }

    #[test]
    fn echo_only_response_yields_empty_output() {
        assert_eq!(strip_echo("ls -l\n", "ls -l"), "");
        assert_eq!(strip_echo("ls -l", "ls -l"), "");
    }

    #[test]
    fn preserves_internal_blank_lines() {
        let raw = "cat notes\nfirst\n\nsecond\n";
        assert_eq!(strip_echo(raw, "cat notes"), "first\n\nsecond");
    }
}
