//! minigit - a content-addressed commit graph
//!
//! This is the main entry point for the minigit command-line shell.

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use minigit::graph::{BranchName, Repository, RepositoryConfig};
use minigit::shell::{Outcome, Repl, SessionConfig, Shell};

/// In-memory commit graph shell.
#[derive(Debug, Parser)]
#[command(name = "minigit", version, about)]
struct Args {
    /// Repository name
    #[arg(short, long, default_value = "my repo")]
    name: String,

    /// Branch a fresh repository starts on
    #[arg(long, default_value = BranchName::DEFAULT)]
    default_branch: String,

    /// Accept empty commit messages
    #[arg(long)]
    allow_empty: bool,

    /// Run a command and exit (repeatable, runs in order)
    #[arg(short, long = "execute", value_name = "COMMAND")]
    execute: Vec<String>,

    /// Render log and show output as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let default_branch = match BranchName::new(args.default_branch.as_str()) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("Error: invalid --default-branch: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let config = RepositoryConfig::new()
        .default_branch(default_branch)
        .allow_empty_messages(args.allow_empty);
    let repo = Repository::with_config(&args.name, config);
    debug!(repository = %args.name, "repository created");

    let shell = Shell::with_config(repo, SessionConfig { json: args.json });

    if args.execute.is_empty() {
        run_repl(shell)
    } else {
        execute_commands(shell, &args.execute)
    }
}

/// Log to stderr; `RUST_LOG` overrides the default filter.
fn init_tracing(verbose: bool) {
    let default = if verbose { "minigit=debug" } else { "minigit=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn execute_commands(mut shell: Shell, commands: &[String]) -> ExitCode {
    for command in commands {
        match shell.execute(command) {
            Ok(Outcome::Quit) => break,
            Ok(Outcome::Output(text)) => {
                if !text.is_empty() {
                    println!("{}", text);
                }
            }
            Err(e) => {
                error!(command = %command, "command failed");
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}

fn run_repl(shell: Shell) -> ExitCode {
    let mut repl = Repl::new(shell);
    match repl.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
