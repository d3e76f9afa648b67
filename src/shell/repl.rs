//! Interactive REPL (Read-Eval-Print Loop) for minigit.

use std::io::{self, BufRead, Write};

use crate::shell::error::{ShellError, ShellResult};
use crate::shell::session::{Outcome, Shell};

/// REPL configuration.
#[derive(Debug, Clone)]
pub struct ReplConfig {
    /// Prompt string.
    pub prompt: String,
    /// Print the banner on start.
    pub banner: bool,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: "minigit> ".into(),
            banner: true,
        }
    }
}

/// The interactive REPL.
pub struct Repl {
    shell: Shell,
    config: ReplConfig,
    history: Vec<String>,
}

impl Repl {
    /// Create a new REPL around a shell session.
    pub fn new(shell: Shell) -> Self {
        Self::with_config(shell, ReplConfig::default())
    }

    /// Create a REPL with custom configuration.
    pub fn with_config(shell: Shell, config: ReplConfig) -> Self {
        Self {
            shell,
            config,
            history: Vec::new(),
        }
    }

    /// Run the REPL on stdin/stdout.
    pub fn run(&mut self) -> ShellResult<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run_with(stdin.lock(), stdout.lock())
    }

    /// Run the REPL over arbitrary input and output.
    pub fn run_with<R: BufRead, W: Write>(&mut self, mut input: R, mut out: W) -> ShellResult<()> {
        if self.config.banner {
            self.print_banner(&mut out)?;
        }

        loop {
            write!(out, "{}", self.config.prompt)?;
            out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                // EOF.
                writeln!(out)?;
                break;
            }

            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if line == "history" {
                for (i, cmd) in self.history.iter().enumerate() {
                    writeln!(out, "  {}: {}", i + 1, cmd)?;
                }
                continue;
            }
            self.history.push(line.to_string());

            match self.shell.execute(line) {
                Ok(Outcome::Quit) => break,
                Ok(Outcome::Output(text)) if text.is_empty() => {}
                Ok(Outcome::Output(text)) => writeln!(out, "{}", text)?,
                Err(e) => writeln!(out, "{}: {}", error_prefix(&e), e)?,
            }
        }

        Ok(())
    }

    /// The session behind this REPL.
    pub fn shell(&self) -> &Shell {
        &self.shell
    }

    fn print_banner<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "minigit v{}", env!("CARGO_PKG_VERSION"))?;
        writeln!(
            out,
            "repository '{}' on branch {}",
            self.shell.repo().name(),
            self.shell.repo().current_branch()
        )?;
        if self.shell.repo().config().message_policy.allows_empty() {
            writeln!(out, "empty commit messages are allowed")?;
        }
        writeln!(out, "Type 'help' for commands.")?;
        writeln!(out)
    }
}

/// Mistakes the user can retype are plain errors; anything else means the
/// repository itself is in trouble.
fn error_prefix(e: &ShellError) -> &'static str {
    if e.is_user_error() {
        "error"
    } else {
        "internal error"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{GraphError, Repository, RepositoryConfig};

    fn run(script: &str) -> (Repl, String) {
        let config = ReplConfig {
            prompt: "> ".into(),
            banner: false,
        };
        let mut repl = Repl::with_config(Shell::new(Repository::new("demo")), config);
        let mut out = Vec::new();
        repl.run_with(script.as_bytes(), &mut out).unwrap();
        (repl, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_script_until_eof() {
        let (repl, out) = run("commit a\ncommit b\ncheckout dev\ncommit c\ncheckout master\nlog\n");
        assert!(out.contains("Switched to a new branch 'dev'"));
        assert!(out.contains("Switched to existing branch 'master'"));
        assert_eq!(repl.shell().repo().log().count(), 2);
        assert_eq!(repl.shell().repo().commit_count(), 3);
    }

    #[test]
    fn test_quit_stops_reading() {
        let (repl, _) = run("commit a\nquit\ncommit b\n");
        assert_eq!(repl.shell().repo().commit_count(), 1);
    }

    #[test]
    fn test_errors_are_printed_and_loop_continues() {
        let (repl, out) = run("commit\nfrobnicate\ncommit ok\n");
        assert!(out.contains("error: invalid input: commit message cannot be empty"));
        assert!(out.contains("error: unknown command: frobnicate"));
        assert_eq!(repl.shell().repo().commit_count(), 1);
    }

    #[test]
    fn test_history_command() {
        let (_, out) = run("status\nbranches\nhistory\n");
        assert!(out.contains("  1: status"));
        assert!(out.contains("  2: branches"));
    }

    #[test]
    fn test_error_prefix() {
        assert_eq!(error_prefix(&ShellError::Usage("log [count]")), "error");
        assert_eq!(
            error_prefix(&ShellError::Graph(GraphError::NotFound("commit 'ff'".into()))),
            "error"
        );
        assert_eq!(
            error_prefix(&ShellError::Graph(GraphError::integrity("dangling branch"))),
            "internal error"
        );
    }

    #[test]
    fn test_usage_errors_use_plain_prefix() {
        let (_, out) = run("log 0
");
        assert!(out.contains("error: usage: log [count]"));
        assert!(!out.contains("internal error"));
    }

    #[test]
    fn test_banner_shows_message_policy() {
        let repo = Repository::with_config("demo", RepositoryConfig::new().allow_empty_messages(true));
        let mut repl = Repl::new(Shell::new(repo));
        let mut out = Vec::new();
        repl.run_with("quit\n".as_bytes(), &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("repository 'demo' on branch master"));
        assert!(out.contains("empty commit messages are allowed"));

        let mut quiet = Repl::new(Shell::new(Repository::new("demo")));
        let mut out = Vec::new();
        quiet.run_with("quit\n".as_bytes(), &mut out).unwrap();
        assert!(!String::from_utf8(out).unwrap().contains("empty commit messages"));
    }
}
