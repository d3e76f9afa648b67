//! A shell session: one repository plus the commands that drive it.
//!
//! Rendering lives here so the REPL and the `-e` mode of the binary print
//! exactly the same text.

use std::fmt::Write as _;

use tracing::debug;

use crate::graph::{Checkout, Commit, Repository};
use crate::shell::command::Command;
use crate::shell::error::ShellResult;

/// What running one line produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Text to print (may be empty).
    Output(String),
    /// The user asked to leave.
    Quit,
}

impl Outcome {
    fn text(s: impl Into<String>) -> Self {
        Outcome::Output(s.into())
    }
}

/// Output options for a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionConfig {
    /// Render `log` and `show` as JSON.
    pub json: bool,
}

/// A repository driven by text commands.
pub struct Shell {
    repo: Repository,
    config: SessionConfig,
}

impl Shell {
    pub fn new(repo: Repository) -> Self {
        Self::with_config(repo, SessionConfig::default())
    }

    pub fn with_config(repo: Repository, config: SessionConfig) -> Self {
        Self { repo, config }
    }

    pub fn repo(&self) -> &Repository {
        &self.repo
    }

    /// Parse and run one line.
    pub fn execute(&mut self, line: &str) -> ShellResult<Outcome> {
        match Command::parse(line)? {
            Some(command) => self.run(command),
            None => Ok(Outcome::text("")),
        }
    }

    /// Run an already-parsed command.
    pub fn run(&mut self, command: Command) -> ShellResult<Outcome> {
        debug!(?command, "running shell command");

        let out = match command {
            Command::Commit { message } => {
                let commit = self.repo.commit(message)?;
                format!(
                    "[{} {}] {}",
                    self.repo.current_branch(),
                    commit.id().short(),
                    commit.summary()
                )
            }
            Command::Checkout { branch } => match self.repo.switch_branch(&branch)? {
                Checkout::Existing(b) => format!("Switched to existing branch '{}'", b),
                Checkout::Created(b) => format!("Switched to a new branch '{}'", b),
            },
            Command::Log { limit } => self.render_log(limit)?,
            Command::Branches => self.render_branches(),
            Command::Status => self.render_status(),
            Command::Show { id } => {
                let commit = self.repo.find_commit(&id)?;
                if self.config.json {
                    serde_json::to_string_pretty(commit)?
                } else {
                    render_commit(commit)
                }
            }
            Command::Stats => self.repo.stats().to_string(),
            Command::Verify => {
                self.repo.verify()?;
                format!("ok: {} commits verified", self.repo.commit_count())
            }
            Command::Help => HELP.trim_end().to_string(),
            Command::Quit => return Ok(Outcome::Quit),
        };

        Ok(Outcome::text(out))
    }

    fn render_log(&self, limit: Option<usize>) -> ShellResult<String> {
        let commits = self.repo.history(limit);

        if self.config.json {
            return Ok(serde_json::to_string_pretty(&commits)?);
        }

        if commits.is_empty() {
            return Ok("(no commits)".to_string());
        }

        let lines: Vec<String> = commits
            .iter()
            .map(|c| format!("{} {}", c.id().short(), c.summary()))
            .collect();
        Ok(lines.join("\n"))
    }

    fn render_branches(&self) -> String {
        let current = self.repo.current_branch();
        self.repo
            .branches()
            .iter()
            .map(|b| {
                let marker = if b == current { "*" } else { " " };
                format!("{} {}", marker, b)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render_status(&self) -> String {
        let mut out = format!("On branch {}", self.repo.current_branch());
        match self.repo.head() {
            Some(head) => {
                let _ = write!(out, "\nHEAD {} {}", head.id().short(), head.summary());
            }
            None => out.push_str("\n(no commits yet)"),
        }
        out
    }
}

fn render_commit(commit: &Commit) -> String {
    let parent = commit
        .parent()
        .map(|p| p.to_string())
        .unwrap_or_else(|| "(root)".to_string());
    format!(
        "commit {}\nparent {}\nsequence {}\ndate   {}\n\n    {}",
        commit.id(),
        parent,
        commit.sequence(),
        commit.timestamp().to_rfc3339(),
        commit.message().replace('\n', "\n    ")
    )
}

const HELP: &str = "\
Commands:
  commit <message>        Record a commit on the current branch
  checkout <branch>       Switch branch, creating it at HEAD if new
  log [count]             Show history from HEAD, newest first
  branches                List branches (* marks the current one)
  status                  Show the current branch and HEAD
  show <id-or-prefix>     Show one commit in full
  stats                   Show repository statistics
  verify                  Check graph invariants
  help                    Show this help message
  quit                    Exit
";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::error::ShellError;

    fn shell() -> Shell {
        Shell::new(Repository::new("demo"))
    }

    fn out(shell: &mut Shell, line: &str) -> String {
        match shell.execute(line).unwrap() {
            Outcome::Output(s) => s,
            Outcome::Quit => panic!("unexpected quit"),
        }
    }

    #[test]
    fn test_commit_output() {
        let mut sh = shell();
        let text = out(&mut sh, "commit first change");
        let head = sh.repo().head_id().unwrap();
        assert_eq!(text, format!("[master {}] first change", head.short()));
    }

    #[test]
    fn test_checkout_output() {
        let mut sh = shell();
        out(&mut sh, "commit a");
        assert_eq!(out(&mut sh, "checkout dev"), "Switched to a new branch 'dev'");
        assert_eq!(
            out(&mut sh, "checkout master"),
            "Switched to existing branch 'master'"
        );
    }

    #[test]
    fn test_log_output() {
        let mut sh = shell();
        assert_eq!(out(&mut sh, "log"), "(no commits)");

        out(&mut sh, "commit a");
        out(&mut sh, "commit b");
        let log = out(&mut sh, "log");
        let lines: Vec<&str> = log.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(" b"));
        assert!(lines[1].ends_with(" a"));

        assert_eq!(out(&mut sh, "log 1").lines().count(), 1);
    }

    #[test]
    fn test_log_json() {
        let mut sh = Shell::with_config(Repository::new("demo"), SessionConfig { json: true });
        out(&mut sh, "commit a");
        out(&mut sh, "commit b");

        let json: serde_json::Value = serde_json::from_str(&out(&mut sh, "log")).unwrap();
        assert!(json.is_array());
        assert_eq!(json.as_array().unwrap().len(), 2);
        assert_eq!(json[0]["message"], "b");
        assert_eq!(json[1]["parent"], serde_json::Value::Null);

        let limited: serde_json::Value = serde_json::from_str(&out(&mut sh, "log 1")).unwrap();
        assert_eq!(limited.as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_log_json_empty() {
        let mut sh = Shell::with_config(Repository::new("demo"), SessionConfig { json: true });
        let json: serde_json::Value = serde_json::from_str(&out(&mut sh, "log")).unwrap();
        assert_eq!(json, serde_json::json!([]));
    }

    #[test]
    fn test_checkout_quoted_name() {
        let mut sh = shell();
        out(&mut sh, "commit a");
        assert_eq!(
            out(&mut sh, "checkout \"dev\""),
            "Switched to a new branch 'dev'"
        );
        assert_eq!(
            out(&mut sh, "checkout 'my branch'"),
            "Switched to a new branch 'my branch'"
        );
        assert_eq!(out(&mut sh, "checkout dev"), "Switched to existing branch 'dev'");

        let branches = sh.repo().branches();
        let names: Vec<&str> = branches.iter().map(|b| b.as_str()).collect();
        assert_eq!(names, vec!["dev", "master", "my branch"]);
    }

    #[test]
    fn test_log_zero_rejected() {
        let mut sh = shell();
        out(&mut sh, "commit a");
        assert!(matches!(
            sh.execute("log 0"),
            Err(ShellError::Usage("log [count]"))
        ));
    }

    #[test]
    fn test_branches_and_status() {
        let mut sh = shell();
        assert_eq!(out(&mut sh, "status"), "On branch master\n(no commits yet)");

        out(&mut sh, "commit a");
        out(&mut sh, "checkout dev");
        assert_eq!(out(&mut sh, "branches"), "* dev\n  master");
        assert!(out(&mut sh, "status").starts_with("On branch dev\nHEAD "));
    }

    #[test]
    fn test_show() {
        let mut sh = shell();
        out(&mut sh, "commit hello\nworld");
        let id = sh.repo().head_id().unwrap();

        let text = out(&mut sh, &format!("show {}", id.short()));
        assert!(text.starts_with(&format!("commit {}", id)));
        assert!(text.contains("parent (root)"));
    }

    #[test]
    fn test_verify_and_stats() {
        let mut sh = shell();
        out(&mut sh, "commit a");
        assert_eq!(out(&mut sh, "verify"), "ok: 1 commits verified");
        assert!(out(&mut sh, "stats").contains("Commits: 1"));
    }

    #[test]
    fn test_errors_leave_state() {
        let mut sh = shell();
        out(&mut sh, "commit a");

        let err = sh.execute("commit").unwrap_err();
        assert!(matches!(err, ShellError::Graph(ref e) if e.is_invalid_input()));
        assert_eq!(sh.repo().commit_count(), 1);

        assert!(sh.execute("show ffff").unwrap_err().is_user_error());
    }

    #[test]
    fn test_quit_and_blank() {
        let mut sh = shell();
        assert_eq!(sh.execute("quit").unwrap(), Outcome::Quit);
        assert_eq!(sh.execute("").unwrap(), Outcome::Output(String::new()));
    }

    #[test]
    fn test_help() {
        let mut sh = shell();
        assert!(out(&mut sh, "help").contains("checkout <branch>"));
    }
}
