//! commit graph for minigit
//!
//! this module is the whole version-control model: content-addressed
//! commits, named branches and a HEAD derived from the current branch.
//! Drivers (the shell, tests, embedding programs) use this API and never
//! touch the commit store directly.
//!
//!  # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                Repository / SharedRepository                │
//! │        (commit, checkout, log, lookups, verification)       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!               ┌──────────────┴──────────────┐
//!               │                             │
//!               ▼                             ▼
//!        ┌─────────────┐               ┌─────────────┐
//!        │   commit    │               │    refs     │
//!        │  (history)  │               │ (branches)  │
//!        └─────────────┘               └─────────────┘
//!               │
//!               ▼
//!        ┌─────────────┐
//!        │    hash     │
//!        │ (identity)  │
//!        └─────────────┘
//!  ```
//!
//! # Usage
//!
//! ```
//! use minigit::graph::Repository;
//!
//! let mut repo = Repository::new("demo");
//! let a = repo.commit("a").unwrap();
//! let b = repo.commit("b").unwrap();
//! assert_eq!(b.parent(), Some(a.id()));
//!
//! repo.checkout("dev").unwrap();
//! repo.commit("c").unwrap();
//! repo.checkout("master").unwrap();
//!
//! let messages: Vec<&str> = repo.log().map(|c| c.message()).collect();
//! assert_eq!(messages, vec!["b", "a"]);
//! ```

mod commit;
mod config;
mod error;
mod hash;
mod refs;
mod repository;
mod types;

pub use commit::{Commit, History};
pub use config::{MessagePolicy, RepositoryConfig};
pub use error::{GraphError, GraphResult};
pub use hash::compute_id;
pub use refs::{Branch, RefTable};
pub use repository::{Checkout, Repository, RepositoryStats, SharedRepository};
pub use types::{BranchName, CommitId, InvalidNameError};
