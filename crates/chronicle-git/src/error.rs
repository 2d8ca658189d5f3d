// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for chronicle-git

use thiserror::Error;

/// Errors that can occur during history ingestion
///
/// Both variants are fatal to a pipeline run. Recoverable conditions
/// (a repository with zero commits, a commit that fits no category) are
/// represented as data, not as errors.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// The target path is not under version control
    #[error("not a git repository: {path}")]
    NotARepository {
        /// The path that was searched for a repository
        path: String,
    },

    /// Any other underlying git operation failure, original message attached
    #[error("git operation failed: {0}")]
    Command(#[from] git2::Error),
}
