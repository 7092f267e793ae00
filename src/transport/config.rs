//! Launch configuration for the external console tool.

/// Description of the external process to spawn: program name plus
/// argument list. The tool itself is opaque to the session driver; its
/// stdout/stderr on the PTY form the byte stream the session reads, and
/// its stdin is where commands are written.
#[derive(Debug, Clone)]
pub struct LaunchSpec {
    /// Program to execute.
    pub program: String,

    /// Arguments passed to the program.
    pub args: Vec<String>,
}

impl LaunchSpec {
    /// Create a launch spec for the given program with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append a single argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// The full command line, for log and diagnostic messages.
    pub fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_argument_list() {
        let spec = LaunchSpec::new("doctl")
            .args(["apps", "console"])
            .arg("e6cd1234")
            .arg("dev-workspace");

        assert_eq!(spec.program, "doctl");
        assert_eq!(spec.args, ["apps", "console", "e6cd1234", "dev-workspace"]);
        assert_eq!(
            spec.command_line(),
            "doctl apps console e6cd1234 dev-workspace"
        );
    }
}
