//! minigit - a content-addressed commit graph
//!
//! This crate models the core of a version-control system: immutable
//! commits identified by a SHA-256 of their content, named branches that
//! point into the history, and a HEAD that follows the current branch.
//!
//! # Example
//!
//! ```
//! use minigit::graph::Repository;
//!
//! let mut repo = Repository::new("my repo");
//! repo.commit("make your commit work").unwrap();
//! repo.checkout("feature").unwrap();
//! repo.commit("feature work").unwrap();
//! assert_eq!(repo.log().count(), 2);
//! ```

pub mod graph;
pub mod shell;
