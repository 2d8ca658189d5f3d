// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Git log ingestion
//!
//! This module reads a repository's commit log into an immutable
//! [`HistorySnapshot`] using the `git2` crate. One snapshot is produced per
//! pipeline run; downstream analysis never touches the repository again.

use crate::commit::{Commit, DiffStat};
use crate::error::HistoryError;
use chrono::{DateTime, TimeZone, Utc};
use git2::{DiffOptions, ErrorCode, Oid, Repository, Sort};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Query options for reading the commit log
///
/// Every field is optional; absence means "no bound". `from`/`to` form a
/// revision range and only take effect when both are present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogOptions {
    /// Only include commits at or after this date
    pub since: Option<DateTime<Utc>>,
    /// Only include commits at or before this date
    pub until: Option<DateTime<Utc>>,
    /// Start of an explicit revision range (exclusive)
    pub from: Option<String>,
    /// End of an explicit revision range (inclusive)
    pub to: Option<String>,
    /// Maximum number of commits to retrieve
    pub limit: Option<usize>,
}

impl LogOptions {
    /// Create options for reading the N most recent commits
    #[must_use]
    pub fn latest(n: usize) -> Self {
        Self {
            limit: Some(n),
            ..Default::default()
        }
    }

    /// Filter commits since a date
    #[must_use]
    pub fn since(mut self, date: DateTime<Utc>) -> Self {
        self.since = Some(date);
        self
    }

    /// Filter commits until a date
    #[must_use]
    pub fn until(mut self, date: DateTime<Utc>) -> Self {
        self.until = Some(date);
        self
    }

    /// Restrict the walk to the revision range `from..to`
    #[must_use]
    pub fn range(mut self, from: &str, to: &str) -> Self {
        self.from = Some(from.to_string());
        self.to = Some(to.to_string());
        self
    }

    /// Canonical serialization used as the option half of a cache fingerprint
    ///
    /// Field order is fixed and absent bounds render as `-`, so two option
    /// sets produce the same key exactly when they are equal.
    #[must_use]
    pub fn cache_key(&self) -> String {
        fn date(value: Option<&DateTime<Utc>>) -> String {
            value.map_or_else(|| "-".to_string(), DateTime::to_rfc3339)
        }
        fn text(value: Option<&String>) -> &str {
            value.map_or("-", String::as_str)
        }
        format!(
            "since={};until={};from={};to={};limit={}",
            date(self.since.as_ref()),
            date(self.until.as_ref()),
            text(self.from.as_ref()),
            text(self.to.as_ref()),
            self.limit.map_or_else(|| "-".to_string(), |n| n.to_string()),
        )
    }
}

/// The full result of one log ingestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySnapshot {
    /// Commits ordered newest first
    pub commits: Vec<Commit>,
    /// Number of commits in the snapshot
    pub total_commits: usize,
    /// Branch names known to the repository
    pub branches: Vec<String>,
    /// Tag names known to the repository
    pub tags: Vec<String>,
}

impl HistorySnapshot {
    /// Create a snapshot with no commits, keeping whatever metadata exists
    #[must_use]
    pub fn empty(branches: Vec<String>, tags: Vec<String>) -> Self {
        Self {
            commits: Vec::new(),
            total_commits: 0,
            branches,
            tags,
        }
    }

    /// True when the snapshot carries no commits
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }
}

/// A git repository wrapper for reading history
pub struct GitRepo {
    repo: Repository,
}

impl GitRepo {
    /// Open a git repository at the given path
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::NotARepository`] if the path is not under
    /// version control.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, HistoryError> {
        let path = path.as_ref();
        let repo = Repository::open(path).map_err(|_| HistoryError::NotARepository {
            path: path.display().to_string(),
        })?;
        debug!("opened git repository at {}", path.display());
        Ok(Self { repo })
    }

    /// Discover and open a git repository containing the given path
    ///
    /// This walks up the directory tree to find a `.git` directory.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::NotARepository`] if no repository is found.
    pub fn discover(path: impl AsRef<Path>) -> Result<Self, HistoryError> {
        let path = path.as_ref();
        let repo = Repository::discover(path).map_err(|_| HistoryError::NotARepository {
            path: path.display().to_string(),
        })?;
        Ok(Self { repo })
    }

    /// Get the working directory path (None for bare repos)
    #[must_use]
    pub fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    /// Get the current head revision id
    ///
    /// Returns `None` for a repository whose HEAD is unborn (no commits
    /// yet); that condition is data, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if HEAD exists but cannot be resolved.
    pub fn head_revision(&self) -> Result<Option<String>, HistoryError> {
        match self.repo.head() {
            Ok(head) => Ok(head.target().map(|oid| oid.to_string())),
            Err(e) if is_empty_history(&e) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List branch names (local and remote)
    ///
    /// # Errors
    ///
    /// Returns an error if the branch iterator fails.
    pub fn branch_names(&self) -> Result<Vec<String>, HistoryError> {
        let mut names = Vec::new();
        for entry in self.repo.branches(None)? {
            let (branch, _) = entry?;
            if let Ok(Some(name)) = branch.name() {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }

    /// List tag names
    ///
    /// # Errors
    ///
    /// Returns an error if the tag listing fails.
    pub fn tag_names(&self) -> Result<Vec<String>, HistoryError> {
        let names = self.repo.tag_names(None)?;
        Ok(names.iter().flatten().map(String::from).collect())
    }

    /// Read the commit log according to the given options
    ///
    /// Commits are returned newest first with diff statistics and ref
    /// decorations attached. A repository with zero commits yields an empty
    /// snapshot rather than an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the walk fails for any reason other than an
    /// unborn HEAD.
    pub fn read_log(&self, options: &LogOptions) -> Result<HistorySnapshot, HistoryError> {
        let branches = self.branch_names()?;
        let tags = self.tag_names()?;
        let decorations = self.ref_decorations()?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TIME | Sort::TOPOLOGICAL)?;

        if let (Some(from), Some(to)) = (&options.from, &options.to) {
            revwalk.push_range(&format!("{from}..{to}"))?;
        } else {
            match revwalk.push_head() {
                Ok(()) => {}
                Err(e) if is_empty_history(&e) => {
                    debug!("repository has no commits yet, returning empty snapshot");
                    return Ok(HistorySnapshot::empty(branches, tags));
                }
                Err(e) => return Err(e.into()),
            }
        }

        let mut commits = Vec::new();
        let limit = options.limit.unwrap_or(usize::MAX);

        for oid_result in revwalk {
            if commits.len() >= limit {
                break;
            }

            let oid = oid_result?;
            let git_commit = self.repo.find_commit(oid)?;

            let time = git_commit.time();
            let timestamp = Utc
                .timestamp_opt(time.seconds(), 0)
                .single()
                .unwrap_or_else(Utc::now);

            if let Some(since) = options.since {
                if timestamp < since {
                    continue;
                }
            }
            if let Some(until) = options.until {
                if timestamp > until {
                    continue;
                }
            }

            let refs = decorations.get(&oid).cloned().unwrap_or_default();
            commits.push(self.extract_commit(&git_commit, timestamp, refs)?);
        }

        debug!(total = commits.len(), "read commit log");
        let total_commits = commits.len();
        Ok(HistorySnapshot {
            commits,
            total_commits,
            branches,
            tags,
        })
    }

    /// Convert a git2 commit into the ingestion record
    fn extract_commit(
        &self,
        git_commit: &git2::Commit<'_>,
        timestamp: DateTime<Utc>,
        refs: Vec<String>,
    ) -> Result<Commit, HistoryError> {
        Ok(Commit {
            hash: git_commit.id().to_string(),
            timestamp,
            author_name: git_commit.author().name().unwrap_or("Unknown").to_string(),
            author_email: git_commit.author().email().unwrap_or("").to_string(),
            message: git_commit.message().unwrap_or("").to_string(),
            diff: Some(self.commit_diff(git_commit)?),
            refs,
        })
    }

    /// Compute aggregate diff statistics for a commit
    ///
    /// Diffs against the first parent; root commits diff against the empty
    /// tree, so their stats cover every introduced file.
    fn commit_diff(&self, git_commit: &git2::Commit<'_>) -> Result<DiffStat, HistoryError> {
        let tree = git_commit.tree()?;

        let parent_tree = if git_commit.parent_count() > 0 {
            Some(git_commit.parent(0)?.tree()?)
        } else {
            None
        };

        let mut opts = DiffOptions::new();
        opts.ignore_whitespace(false);

        let diff =
            self.repo
                .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), Some(&mut opts))?;
        let stats = diff.stats()?;

        Ok(DiffStat {
            files_changed: stats.files_changed(),
            insertions: stats.insertions(),
            deletions: stats.deletions(),
        })
    }

    /// Map each decorated commit to its branch names and `tag: <name>` entries
    fn ref_decorations(&self) -> Result<HashMap<Oid, Vec<String>>, HistoryError> {
        let mut map: HashMap<Oid, Vec<String>> = HashMap::new();

        for entry in self.repo.branches(None)? {
            let (branch, _) = entry?;
            if let Some(target) = branch.get().target() {
                if let Ok(Some(name)) = branch.name() {
                    map.entry(target).or_default().push(name.to_string());
                }
            }
        }

        // Annotated tags peel to the commit they ultimately reference
        for name in self.repo.tag_names(None)?.iter().flatten() {
            let Ok(object) = self.repo.revparse_single(&format!("refs/tags/{name}")) else {
                continue;
            };
            if let Ok(commit) = object.peel_to_commit() {
                map.entry(commit.id())
                    .or_default()
                    .push(format!("tag: {name}"));
            }
        }

        Ok(map)
    }
}

/// True when the error indicates a repository with no commits yet
fn is_empty_history(err: &git2::Error) -> bool {
    matches!(err.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound)
}
