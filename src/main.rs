//! CLI entry point: run one command on a remote app-platform console.

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use log::info;

use conex::{ConsoleSession, Error, LaunchSpec, PromptPattern, SessionConfig};

const BANNER: &str = "==================================================";

/// Run a single command on a remote app-platform console via
/// `doctl apps console`.
#[derive(Parser, Debug)]
#[command(name = "conex", version, about)]
struct Cli {
    /// Target app deployment id
    app_id: String,

    /// Component (process group) within the app
    component: String,

    /// Command to execute on the remote console (one line)
    command: String,

    /// Regex matched against the console byte stream to detect the
    /// shell prompt
    #[arg(long, default_value = r"\$ $")]
    prompt_pattern: String,

    /// Timeout in seconds applied to each wait-for-prompt step
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(output) => {
            println!("{BANNER}");
            println!("Remote Command Output:");
            println!("{BANNER}");
            println!("{output}");
            println!("{BANNER}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            if let Error::Session(ref session_err) = err {
                if let Some(partial) = session_err.partial() {
                    eprintln!("partial output before failure:\n{partial}");
                }
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> conex::Result<String> {
    let prompt = PromptPattern::new(&cli.prompt_pattern)?;
    let config = SessionConfig::new(prompt, Duration::from_secs(cli.timeout_secs));

    let spec = LaunchSpec::new("doctl")
        .args(["apps", "console"])
        .arg(&cli.app_id)
        .arg(&cli.component);

    info!(
        "running {:?} on component '{}' of app {}",
        cli.command, cli.component, cli.app_id
    );

    let session = ConsoleSession::new(config);
    let out = session.run(&spec, &cli.command).await?;
    Ok(out.output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_wrong_arity() {
        assert!(Cli::try_parse_from(["conex"]).is_err());
        assert!(Cli::try_parse_from(["conex", "app"]).is_err());
        assert!(Cli::try_parse_from(["conex", "app", "component"]).is_err());
        assert!(
            Cli::try_parse_from(["conex", "app", "component", "ls -l", "extra"]).is_err()
        );
    }

    #[test]
    fn accepts_exactly_three_positionals() {
        let cli = Cli::try_parse_from(["conex", "e6cd1234", "dev-workspace", "ls -l"]).unwrap();
        assert_eq!(cli.app_id, "e6cd1234");
        assert_eq!(cli.component, "dev-workspace");
        assert_eq!(cli.command, "ls -l");
        assert_eq!(cli.prompt_pattern, r"\$ $");
        assert_eq!(cli.timeout_secs, 30);
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "conex",
            "app",
            "component",
            "uptime",
            "--prompt-pattern",
            r"# $",
            "--timeout-secs",
            "5",
        ])
        .unwrap();
        assert_eq!(cli.prompt_pattern, r"# $");
        assert_eq!(cli.timeout_secs, 5);
    }
}
