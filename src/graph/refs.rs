//!  Branch and reference management.
//!
//!  Branches are named pointers to commits. This module handles:
//! - The branch record itself (name + tip)
//! - The per-repository table of branches, keyed by unique name
//! - Tip resolution and advancement
//!
//! Tips are commit ids, never owned commits; the repository's commit
//! store is the single owner of commit records.

use std::collections::HashMap;

use crate::graph::error::{GraphError, GraphResult};
use crate::graph::types::{BranchName, CommitId};

/// A named, movable pointer into the history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    name: BranchName,
    tip: Option<CommitId>,
}

impl Branch {
    pub fn new(name: BranchName, tip: Option<CommitId>) -> Self {
        Self { name, tip }
    }

    pub fn name(&self) -> &BranchName {
        &self.name
    }

    /// The commit this branch points at, `None` before the first commit.
    pub fn tip(&self) -> Option<CommitId> {
        self.tip
    }

    /// Move the tip to `commit`.
    pub(crate) fn advance(&mut self, commit: CommitId) {
        self.tip = Some(commit);
    }
}

/// All branches of a repository.
#[derive(Debug, Clone, Default)]
pub struct RefTable {
    branches: HashMap<BranchName, Branch>,
}

impl RefTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// A table holding one empty branch.
    pub fn with_initial(name: BranchName) -> Self {
        let mut branches = HashMap::new();
        branches.insert(name.clone(), Branch::new(name, None));
        Self { branches }
    }

    /// Check if a branch exists.
    pub fn exists(&self, name: &BranchName) -> bool {
        self.branches.contains_key(name)
    }

    pub fn get(&self, name: &BranchName) -> Option<&Branch> {
        self.branches.get(name)
    }

    /// Resolve a branch name to its current tip.
    pub fn resolve(&self, name: &BranchName) -> GraphResult<Option<CommitId>> {
        self.branches
            .get(name)
            .map(Branch::tip)
            .ok_or_else(|| GraphError::NotFound(format!("branch '{}'", name)))
    }

    /// Create a new branch pointing at `tip`.
    ///
    /// Names are unique; creating an existing name is an integrity violation
    /// because callers are expected to check first.
    pub fn create(&mut self, name: BranchName, tip: Option<CommitId>) -> GraphResult<&Branch> {
        if self.exists(&name) {
            return Err(GraphError::integrity(format!(
                "branch already exists: {}",
                name
            )));
        }

        let branch = self
            .branches
            .entry(name.clone())
            .or_insert_with(|| Branch::new(name, tip));
        Ok(branch)
    }

    /// Advance an existing branch to `commit`.
    pub fn advance(&mut self, name: &BranchName, commit: CommitId) -> GraphResult<()> {
        let branch = self
            .branches
            .get_mut(name)
            .ok_or_else(|| GraphError::integrity(format!("cannot advance missing branch '{}'", name)))?;
        branch.advance(commit);
        Ok(())
    }

    /// All branch names, sorted.
    pub fn names(&self) -> Vec<BranchName> {
        let mut names: Vec<BranchName> = self.branches.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn iter(&self) -> impl Iterator<Item = &Branch> {
        self.branches.values()
    }

    pub fn len(&self) -> usize {
        self.branches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }
}
