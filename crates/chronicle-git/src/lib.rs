// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! chronicle-git: Git history ingestion for chronicle
//!
//! This library crate reads a repository's commit log into canonical,
//! immutable records for consumption by the chronicle analysis pipeline.

#![warn(missing_docs)]

//! # Example
//!
//! ```no_run
//! use chronicle_git::{GitRepo, LogOptions};
//!
//! let repo = GitRepo::open(".").expect("open repo");
//! let snapshot = repo.read_log(&LogOptions::latest(100)).expect("read log");
//!
//! for c in &snapshot.commits {
//!     println!("{} - {}", c.short_hash(), c.subject());
//! }
//! ```

pub mod commit;
pub mod error;
pub mod repo;

pub use commit::{Commit, DiffStat};
pub use error::HistoryError;
pub use repo::{GitRepo, HistorySnapshot, LogOptions};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::commit::{Commit, DiffStat};
    pub use crate::error::HistoryError;
    pub use crate::repo::{GitRepo, HistorySnapshot, LogOptions};
}
