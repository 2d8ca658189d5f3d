//! chronicle-analysis library
//!
//! The analytical middle of the pipeline: classifies commits into
//! categories with impact scores, folds timestamps into a weekly activity
//! matrix, rolls up per-author statistics, and detects milestones. All of
//! it is pure computation over [`chronicle_git::Commit`] slices.

pub mod classify;
pub mod contributors;
pub mod milestones;
pub mod temporal;

pub use classify::{
    AnalysisReport, AnalyzedCommit, Classification, CommitCategory, classify, classify_commit,
};
pub use contributors::{ContributorStats, index_contributors};
pub use milestones::{CHURN_FILE_THRESHOLD, Milestone, MilestoneKind, detect_milestones};
pub use temporal::{ActivityMatrix, DAY_NAMES, TermCount, aggregate, tokenize_message, top_terms};
