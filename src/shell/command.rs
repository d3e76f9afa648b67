//! Shell command parsing.

use crate::shell::error::{ShellError, ShellResult};

/// One parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Commit { message: String },
    Checkout { branch: String },
    Log { limit: Option<usize> },
    Branches,
    Status,
    Show { id: String },
    Stats,
    Verify,
    Help,
    Quit,
}

impl Command {
    /// Parse a single input line. Blank lines and `#` comments yield `None`.
    pub fn parse(line: &str) -> ShellResult<Option<Command>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_lowercase().as_str() {
            "commit" => Command::Commit {
                message: parse_message(rest),
            },
            "checkout" | "switch" => Command::Checkout {
                branch: parse_branch(rest)?,
            },
            "log" => {
                let limit = match rest {
                    "" => None,
                    n => match n.parse::<usize>() {
                        Ok(n) if n > 0 => Some(n),
                        _ => return Err(ShellError::Usage("log [count]")),
                    },
                };
                Command::Log { limit }
            }
            "branches" | "branch" => Command::Branches,
            "status" => Command::Status,
            "show" => {
                if rest.is_empty() {
                    return Err(ShellError::Usage("show <commit-id>"));
                }
                Command::Show {
                    id: rest.to_string(),
                }
            }
            "stats" => Command::Stats,
            "verify" => Command::Verify,
            "help" | "h" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(ShellError::UnknownCommand(other.to_string())),
        };

        Ok(Some(command))
    }
}

/// Accepts `msg`, `"msg"`, `-m msg` and `-m "msg"`.
fn parse_message(rest: &str) -> String {
    let rest = rest
        .strip_prefix("-m")
        .filter(|r| r.is_empty() || r.starts_with(char::is_whitespace))
        .map(str::trim)
        .unwrap_or(rest);

    unquote(rest).unwrap_or(rest).to_string()
}

/// Accepts `name`, or `"name"`/`'name'` when the name contains spaces.
fn parse_branch(rest: &str) -> ShellResult<String> {
    let branch = match unquote(rest) {
        Some(inner) => inner,
        None if rest.contains(char::is_whitespace) => "",
        None => rest,
    };
    if branch.is_empty() {
        return Err(ShellError::Usage("checkout <branch>"));
    }
    Ok(branch.to_string())
}

/// Strip one pair of matching double or single quotes.
fn unquote(s: &str) -> Option<&str> {
    s.strip_prefix('"')
        .and_then(|r| r.strip_suffix('"'))
        .or_else(|| s.strip_prefix('\'').and_then(|r| r.strip_suffix('\'')))
}
