//! Repository configuration.

use crate::graph::types::BranchName;

/// What to do with an empty commit message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessagePolicy {
    /// reject with `InvalidInput`
    #[default]
    RequireNonEmpty,
    /// accept it like any other message
    AllowEmpty,
}

impl MessagePolicy {
    pub fn allows_empty(self) -> bool {
        matches!(self, MessagePolicy::AllowEmpty)
    }
}

/// Repository configuration options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryConfig {
    /// Branch created (and checked out) by a fresh repository.
    pub default_branch: BranchName,
    /// Empty commit message handling.
    pub message_policy: MessagePolicy,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            default_branch: BranchName::default_branch(),
            message_policy: MessagePolicy::default(),
        }
    }
}

impl RepositoryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial branch.
    pub fn default_branch(mut self, branch: BranchName) -> Self {
        self.default_branch = branch;
        self
    }

    /// Set the empty message policy.
    pub fn message_policy(mut self, policy: MessagePolicy) -> Self {
        self.message_policy = policy;
        self
    }

    /// Shorthand for `message_policy(AllowEmpty)` when `value` is true.
    pub fn allow_empty_messages(self, value: bool) -> Self {
        let policy = if value {
            MessagePolicy::AllowEmpty
        } else {
            MessagePolicy::RequireNonEmpty
        };
        self.message_policy(policy)
    }
}
