//!  Commit records and history traversal
//!
//!  commits are the immutable nodes of the history DAG:
//! - each commit names at most one parent, which must already exist
//! - its id is derived from its content (see [`crate::graph::hash`])
//! - the repository owns every commit; branches only hold ids
//!
//! this module handles commit construction and walking parent links

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::graph::config::MessagePolicy;
use crate::graph::error::{GraphError, GraphResult};
use crate::graph::hash::compute_id;
use crate::graph::types::CommitId;

/// every commit of a repository, keyed by id
pub(crate) type CommitStore = HashMap<CommitId, Commit>;

/// an immutable commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Commit {
    id: CommitId,
    message: String,
    parent: Option<CommitId>,
    sequence: u64,
    timestamp: DateTime<Utc>,
}

impl Commit {
    /// create a commit on top of `parent`, rejecting empty messages
    pub fn new(
        message: impl Into<String>,
        parent: Option<&Commit>,
        sequence: u64,
    ) -> GraphResult<Self> {
        Self::with_policy(message, parent, sequence, MessagePolicy::RequireNonEmpty)
    }

    /// create a commit with an explicit empty-message policy
    pub fn with_policy(
        message: impl Into<String>,
        parent: Option<&Commit>,
        sequence: u64,
        policy: MessagePolicy,
    ) -> GraphResult<Self> {
        let message = message.into();
        if message.is_empty() && !policy.allows_empty() {
            return Err(GraphError::invalid_input("commit message cannot be empty"));
        }

        let parent = parent.map(Commit::id);
        let id = compute_id(&message, parent.as_ref(), sequence);

        Ok(Self {
            id,
            message,
            parent,
            sequence,
            timestamp: Utc::now(),
        })
    }

    pub fn id(&self) -> CommitId {
        self.id
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// id of the parent commit, `None` for a root commit
    pub fn parent(&self) -> Option<CommitId> {
        self.parent
    }

    /// repository-wide creation counter folded into the id
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// wall-clock creation time (not part of the id)
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// get a short summary of the commit (first line of message)
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or(&self.message)
    }

    /// recompute the id from the stored fields
    pub(crate) fn rehash(&self) -> CommitId {
        compute_id(&self.message, self.parent.as_ref(), self.sequence)
    }
}

/// lazy walk from a commit back to the root, newest first
///
/// Cheap to clone; a clone restarts from wherever the original currently is.
#[derive(Debug, Clone)]
pub struct History<'a> {
    store: &'a CommitStore,
    next: Option<CommitId>,
}

impl<'a> History<'a> {
    pub(crate) fn new(store: &'a CommitStore, start: Option<CommitId>) -> Self {
        Self { store, next: start }
    }

    /// collect the ids of the remaining commits
    pub fn ids(self) -> Vec<CommitId> {
        self.map(Commit::id).collect()
    }
}

impl<'a> Iterator for History<'a> {
    type Item = &'a Commit;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next.take()?;
        // parents are inserted before children, so a miss means a broken store
        let commit = self.store.get(&id)?;
        self.next = commit.parent;
        Some(commit)
    }
}

impl std::iter::FusedIterator for History<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(messages: &[&str]) -> (CommitStore, Vec<CommitId>) {
        let mut store = CommitStore::new();
        let mut ids = Vec::new();
        let mut parent: Option<Commit> = None;

        for (seq, msg) in messages.iter().enumerate() {
            let commit = Commit::new(*msg, parent.as_ref(), seq as u64 + 1).unwrap();
            ids.push(commit.id());
            store.insert(commit.id(), commit.clone());
            parent = Some(commit);
        }

        (store, ids)
    }

    #[test]
    fn test_root_commit() {
        let commit = Commit::new("initial", None, 1).unwrap();
        assert!(commit.is_root());
        assert_eq!(commit.parent(), None);
        assert_eq!(commit.message(), "initial");
        assert_eq!(commit.id(), compute_id("initial", None, 1));
    }

    #[test]
    fn test_child_links_parent() {
        let root = Commit::new("a", None, 1).unwrap();
        let child = Commit::new("b", Some(&root), 2).unwrap();
        assert_eq!(child.parent(), Some(root.id()));
        assert!(!child.is_root());
        assert_ne!(child.id(), root.id());
    }

    #[test]
    fn test_empty_message_rejected() {
        let err = Commit::new("", None, 1).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_empty_message_allowed_by_policy() {
        let commit = Commit::with_policy("", None, 1, MessagePolicy::AllowEmpty).unwrap();
        assert_eq!(commit.message(), "");
        assert_eq!(commit.summary(), "");
    }

    #[test]
    fn test_summary() {
        let commit = Commit::new("Fix parser\n\nLonger body here.", None, 1).unwrap();
        assert_eq!(commit.summary(), "Fix parser");
    }

    #[test]
    fn test_rehash_matches_id() {
        let commit = Commit::new("x", None, 9).unwrap();
        assert_eq!(commit.rehash(), commit.id());
    }

    #[test]
    fn test_history_iteration() {
        let (store, ids) = chain(&["first", "second", "third"]);

        let walked = History::new(&store, ids.last().copied()).ids();
        assert_eq!(walked, vec![ids[2], ids[1], ids[0]]);
    }

    #[test]
    fn test_history_from_middle() {
        let (store, ids) = chain(&["first", "second", "third"]);

        let messages: Vec<&str> = History::new(&store, Some(ids[1]))
            .map(Commit::message)
            .collect();
        assert_eq!(messages, vec!["second", "first"]);
    }

    #[test]
    fn test_history_empty() {
        let store = CommitStore::new();
        assert_eq!(History::new(&store, None).count(), 0);
    }

    #[test]
    fn test_history_clone_restarts() {
        let (store, ids) = chain(&["a", "b"]);
        let mut walk = History::new(&store, Some(ids[1]));
        let snapshot = walk.clone();

        assert!(walk.next().is_some());
        assert_eq!(walk.count(), 1);
        assert_eq!(snapshot.count(), 2);
    }

    #[test]
    fn test_serialize() {
        let commit = Commit::new("hello", None, 1).unwrap();
        let json = serde_json::to_value(&commit).unwrap();
        assert_eq!(json["message"], "hello");
        assert_eq!(json["parent"], serde_json::Value::Null);
        assert_eq!(json["id"], commit.id().to_hex());
    }
}
