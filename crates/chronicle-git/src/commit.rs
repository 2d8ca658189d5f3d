//! Git commit types and operations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Aggregate diff statistics for a single commit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffStat {
    /// Number of files changed
    pub files_changed: usize,
    /// Total lines added
    pub insertions: usize,
    /// Total lines deleted
    pub deletions: usize,
}

/// Represents a parsed git commit
///
/// Created once at ingestion and never mutated afterwards. Ref decorations
/// carry the branches and tags pointing at the commit; tags use the
/// `"tag: <name>"` form that `git log --decorate` prints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// The commit SHA (40 hex characters)
    pub hash: String,
    /// Commit timestamp
    pub timestamp: DateTime<Utc>,
    /// Author name
    pub author_name: String,
    /// Author email
    pub author_email: String,
    /// Commit message (may span multiple lines)
    pub message: String,
    /// Diff statistics, if they were computed during ingestion
    pub diff: Option<DiffStat>,
    /// Ref decorations pointing at this commit (branch names, `tag: <name>`)
    pub refs: Vec<String>,
}

impl Commit {
    /// Validate that a hash is a valid 40-character hex string
    #[must_use]
    pub fn is_valid_hash(hash: &str) -> bool {
        hash.len() == 40 && hash.chars().all(|c| c.is_ascii_hexdigit())
    }

    /// Get the short hash (first 7 characters)
    #[must_use]
    pub fn short_hash(&self) -> &str {
        &self.hash[..7.min(self.hash.len())]
    }

    /// Get the first line of the commit message (subject)
    #[must_use]
    pub fn subject(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    /// Check whether any ref decoration contains the given marker
    ///
    /// Release detection matches `"tag: <name>"` literally, so callers pass
    /// the fully formed marker rather than a bare tag name.
    #[must_use]
    pub fn has_ref_marker(&self, marker: &str) -> bool {
        self.refs.iter().any(|r| r.contains(marker))
    }
}
