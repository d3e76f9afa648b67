//! core type-safe identifiers for the commit graph.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::graph::error::GraphError;

/// Content-derived commit identifier (SHA-256, 32 bytes).
///
/// Commits are never numbered; their id is a digest of what they contain.
/// See [`crate::graph::hash::compute_id`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CommitId(pub(crate) [u8; 32]);

impl CommitId {
    /// width of the digest in bytes
    pub const LEN: usize = 32;

    /// the all-zero id hashed in place of a missing parent
    pub const ROOT: CommitId = CommitId([0u8; 32]);

    pub(crate) fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// parse CommitId from a 64-char hex string
    pub fn from_hex(hex_str: &str) -> Result<Self, GraphError> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(hex_str, &mut bytes)?;
        Ok(Self(bytes))
    }

    /// full lowercase hex form
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// short form of the commit ID
    pub fn short(&self) -> String {
        self.to_hex()[..7].to_string()
    }

    /// true for the root sentinel
    pub fn is_root_sentinel(&self) -> bool {
        *self == Self::ROOT
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for CommitId {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for CommitId {
    type Error = GraphError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<CommitId> for String {
    fn from(id: CommitId) -> Self {
        id.to_hex()
    }
}

/// a branch name; the only rule is that it is not empty
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BranchName(String);

impl BranchName {
    /// the branch every repository starts on
    pub const DEFAULT: &'static str = "master";

    /// create a new BranchName
    pub fn new(name: impl Into<String>) -> Result<Self, InvalidNameError> {
        let name = name.into();
        if name.is_empty() {
            return Err(InvalidNameError::Empty);
        }
        Ok(Self(name))
    }

    /// the default branch reference
    pub fn default_branch() -> Self {
        Self(Self::DEFAULT.to_string())
    }

    /// get the short name
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// convert to owned String
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for BranchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for BranchName {
    type Error = InvalidNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BranchName> for String {
    fn from(name: BranchName) -> Self {
        name.0
    }
}

/// error type for invalid branch names
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidNameError {
    Empty,
}

impl fmt::Display for InvalidNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "name cannot be empty"),
        }
    }
}

impl std::error::Error for InvalidNameError {}
