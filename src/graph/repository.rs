//!   Core repository.
//!
//!  This is the central component of the commit graph. It owns every commit
//!  and every branch, tracks which branch is current, and derives HEAD from
//!  that branch's tip.
//!
//! `Repository` is a plain value mutated through `&mut self`. Wrap it in a
//! [`SharedRepository`] to use it from several threads.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, error, info, warn};

use crate::graph::commit::{Commit, CommitStore, History};
use crate::graph::config::RepositoryConfig;
use crate::graph::error::{GraphError, GraphResult};
use crate::graph::refs::{Branch, RefTable};
use crate::graph::types::{BranchName, CommitId};

/// Which way a checkout went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Checkout {
    /// switched to a branch that already existed
    Existing(BranchName),
    /// created the branch at the current HEAD, then switched to it
    Created(BranchName),
}

impl Checkout {
    pub fn branch(&self) -> &BranchName {
        match self {
            Checkout::Existing(b) | Checkout::Created(b) => b,
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, Checkout::Created(_))
    }
}

/// A commit graph with branches and a movable HEAD.
#[derive(Debug, Clone)]
pub struct Repository {
    name: String,
    config: RepositoryConfig,
    commits: CommitStore,
    refs: RefTable,
    current: BranchName,
    /// sequence number of the most recent commit (0 before the first)
    sequence: u64,
}

impl Repository {
    /// Create an empty repository on the default `master` branch.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, RepositoryConfig::default())
    }

    /// Create an empty repository with explicit configuration.
    pub fn with_config(name: impl Into<String>, config: RepositoryConfig) -> Self {
        let current = config.default_branch.clone();
        let refs = RefTable::with_initial(current.clone());

        Self {
            name: name.into(),
            config,
            commits: CommitStore::new(),
            refs,
            current,
            sequence: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &RepositoryConfig {
        &self.config
    }

    // ==================== Mutations ====================

    /// Record a new commit on top of HEAD and advance the current branch.
    ///
    /// Nothing changes if this fails.
    pub fn commit(&mut self, message: impl Into<String>) -> GraphResult<Commit> {
        let head = self.current_tip()?;
        let parent = match head {
            Some(id) => Some(self.commits.get(&id).ok_or_else(|| {
                error!(head = %id, "HEAD references a commit missing from the store");
                GraphError::integrity(format!("HEAD references missing commit {}", id))
            })?),
            None => None,
        };

        let sequence = self.sequence + 1;
        let commit = Commit::with_policy(message, parent, sequence, self.config.message_policy)
            .inspect_err(|e| warn!(branch = %self.current, "commit rejected: {}", e))?;

        if self.commits.contains_key(&commit.id()) {
            error!(id = %commit.id(), "commit id collision");
            return Err(GraphError::integrity(format!(
                "commit id collision: {}",
                commit.id()
            )));
        }

        self.refs.advance(&self.current, commit.id())?;
        self.commits.insert(commit.id(), commit.clone());
        self.sequence = sequence;

        debug!(
            id = %commit.id().short(),
            branch = %self.current,
            sequence,
            "created commit"
        );
        Ok(commit)
    }

    /// Switch to `branch_name`, creating it at HEAD if it doesn't exist.
    ///
    /// Returns `self` for chaining; use [`Repository::switch_branch`] to learn
    /// whether the branch was created.
    pub fn checkout(&mut self, branch_name: &str) -> GraphResult<&mut Self> {
        self.switch_branch(branch_name)?;
        Ok(self)
    }

    /// Same transition as [`Repository::checkout`], reporting which case applied.
    pub fn switch_branch(&mut self, branch_name: &str) -> GraphResult<Checkout> {
        let name = BranchName::new(branch_name).map_err(|e| {
            warn!("checkout rejected: {}", e);
            GraphError::from(e)
        })?;

        if self.refs.exists(&name) {
            self.current = name.clone();
            info!(branch = %name, "switched to existing branch");
            return Ok(Checkout::Existing(name));
        }

        // new branches start at the current position
        let head = self.current_tip()?;
        self.refs
            .create(name.clone(), head)
            .inspect_err(|e| error!(branch = %name, "branch creation failed: {}", e))?;
        self.current = name.clone();
        info!(branch = %name, "switched to new branch");
        Ok(Checkout::Created(name))
    }

    // ==================== History ====================

    /// Walk from HEAD to the root, newest first.
    pub fn log(&self) -> History<'_> {
        History::new(&self.commits, self.head_id())
    }

    /// Walk from the tip of a named branch to the root.
    pub fn log_branch(&self, branch_name: &str) -> GraphResult<History<'_>> {
        let name = BranchName::new(branch_name)?;
        let tip = self.refs.resolve(&name)?;
        Ok(History::new(&self.commits, tip))
    }

    /// Get commit history from HEAD, optionally capped at `limit` entries.
    pub fn history(&self, limit: Option<usize>) -> Vec<Commit> {
        let walk = self.log().cloned();
        match limit {
            Some(n) => walk.take(n).collect(),
            None => walk.collect(),
        }
    }

    // ==================== Lookups ====================

    /// The commit HEAD points at.
    pub fn head(&self) -> Option<&Commit> {
        self.head_id().and_then(|id| self.commits.get(&id))
    }

    /// HEAD's id, `None` while the current branch has no commits.
    pub fn head_id(&self) -> Option<CommitId> {
        self.refs.get(&self.current).and_then(Branch::tip)
    }

    pub fn current_branch(&self) -> &BranchName {
        &self.current
    }

    /// All branch names, sorted.
    pub fn branches(&self) -> Vec<BranchName> {
        self.refs.names()
    }

    pub fn branch(&self, branch_name: &str) -> Option<&Branch> {
        let name = BranchName::new(branch_name).ok()?;
        self.refs.get(&name)
    }

    pub fn get_commit(&self, id: &CommitId) -> Option<&Commit> {
        self.commits.get(id)
    }

    /// Find a commit by full id or unambiguous hex prefix.
    pub fn find_commit(&self, prefix: &str) -> GraphResult<&Commit> {
        let prefix = prefix.to_ascii_lowercase();
        if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(GraphError::invalid_input(format!(
                "not a commit id or prefix: '{}'",
                prefix
            )));
        }

        let mut matches = self
            .commits
            .values()
            .filter(|c| c.id().to_hex().starts_with(&prefix));

        match (matches.next(), matches.next()) {
            (Some(commit), None) => Ok(commit),
            (Some(_), Some(_)) => Err(GraphError::invalid_input(format!(
                "ambiguous commit prefix: {}",
                prefix
            ))),
            (None, _) => Err(GraphError::NotFound(format!("commit {}", prefix))),
        }
    }

    /// True until the first commit is recorded on any branch.
    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    pub fn commit_count(&self) -> usize {
        self.commits.len()
    }

    /// Get statistics about the repository.
    pub fn stats(&self) -> RepositoryStats {
        RepositoryStats {
            name: self.name.clone(),
            commit_count: self.commits.len(),
            branch_count: self.refs.len(),
            current_branch: self.current.clone(),
            head: self.head_id(),
            history_depth: self.log().count(),
        }
    }

    // ==================== Integrity ====================

    /// Check every graph invariant. Never mutates.
    pub fn verify(&self) -> GraphResult<()> {
        let result = self.verify_inner();
        if let Err(ref e) = result {
            error!(repository = %self.name, "verification failed: {}", e);
        }
        result
    }

    fn verify_inner(&self) -> GraphResult<()> {
        if !self.refs.exists(&self.current) {
            return Err(GraphError::integrity(format!(
                "current branch '{}' is not in the branch table",
                self.current
            )));
        }

        for (id, commit) in &self.commits {
            if *id != commit.id() || commit.rehash() != commit.id() {
                return Err(GraphError::integrity(format!(
                    "commit {} does not hash to its id",
                    id
                )));
            }
            if let Some(parent) = commit.parent() {
                if !self.commits.contains_key(&parent) {
                    return Err(GraphError::integrity(format!(
                        "commit {} has missing parent {}",
                        id, parent
                    )));
                }
            }
        }

        for branch in self.refs.iter() {
            let Some(tip) = branch.tip() else { continue };
            if !self.commits.contains_key(&tip) {
                return Err(GraphError::integrity(format!(
                    "branch '{}' points at missing commit {}",
                    branch.name(),
                    tip
                )));
            }
            // a chain longer than the store can only be a cycle
            let depth = History::new(&self.commits, Some(tip))
                .take(self.commits.len() + 1)
                .count();
            if depth > self.commits.len() {
                return Err(GraphError::integrity(format!(
                    "cycle in history of branch '{}'",
                    branch.name()
                )));
            }
        }

        Ok(())
    }

    fn current_tip(&self) -> GraphResult<Option<CommitId>> {
        self.refs.resolve(&self.current).map_err(|_| {
            error!(branch = %self.current, "current branch missing from branch table");
            GraphError::integrity(format!(
                "current branch '{}' is not in the branch table",
                self.current
            ))
        })
    }
}

/// Statistics about the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryStats {
    pub name: String,
    pub commit_count: usize,
    pub branch_count: usize,
    pub current_branch: BranchName,
    pub head: Option<CommitId>,
    /// commits reachable from HEAD
    pub history_depth: usize,
}

impl fmt::Display for RepositoryStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Repository: {}", self.name)?;
        writeln!(f, "  Commits: {}", self.commit_count)?;
        writeln!(f, "  Branches: {}", self.branch_count)?;
        writeln!(f, "  Current Branch: {}", self.current_branch)?;
        match self.head {
            Some(id) => writeln!(f, "  HEAD: {}", id.short())?,
            None => writeln!(f, "  HEAD: (none)")?,
        }
        write!(f, "  History Depth: {}", self.history_depth)
    }
}

/// Thread-safe repository handle.
///
/// Every operation holds one lock for its whole duration, so commits and
/// checkouts never interleave. Clone this to share across threads - it uses
/// Arc internally.
#[derive(Clone)]
pub struct SharedRepository {
    inner: Arc<Mutex<Repository>>,
}

impl SharedRepository {
    pub fn new(repo: Repository) -> Self {
        Self {
            inner: Arc::new(Mutex::new(repo)),
        }
    }

    /// Execute a function with exclusive access to the repository.
    pub fn with_repo<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&mut Repository) -> T,
    {
        let mut repo = self.inner.lock();
        f(&mut repo)
    }

    pub fn commit(&self, message: impl Into<String>) -> GraphResult<Commit> {
        self.with_repo(|repo| repo.commit(message))
    }

    /// Checkout; returns the outcome rather than a chaining handle.
    pub fn checkout(&self, branch_name: &str) -> GraphResult<Checkout> {
        self.with_repo(|repo| repo.switch_branch(branch_name))
    }

    /// History from HEAD, collected under the lock.
    pub fn log(&self) -> Vec<Commit> {
        self.with_repo(|repo| repo.history(None))
    }

    pub fn head_id(&self) -> Option<CommitId> {
        self.with_repo(|repo| repo.head_id())
    }

    pub fn current_branch(&self) -> BranchName {
        self.with_repo(|repo| repo.current_branch().clone())
    }

    pub fn branches(&self) -> Vec<BranchName> {
        self.with_repo(|repo| repo.branches())
    }

    pub fn stats(&self) -> RepositoryStats {
        self.with_repo(|repo| repo.stats())
    }

    pub fn verify(&self) -> GraphResult<()> {
        self.with_repo(|repo| repo.verify())
    }
}

impl From<Repository> for SharedRepository {
    fn from(repo: Repository) -> Self {
        Self::new(repo)
    }
}
