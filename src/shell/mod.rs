//! Text shell for driving a repository.
//!
//! This module is the external caller of the commit graph: it turns lines
//! like `commit fix parser` or `checkout dev` into repository operations
//! and renders the results as text (or JSON).

mod command;
mod error;
mod repl;
mod session;

pub use command::Command;
pub use error::{ShellError, ShellResult};
pub use repl::{Repl, ReplConfig};
pub use session::{Outcome, SessionConfig, Shell};
