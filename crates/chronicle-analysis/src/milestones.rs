// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Landmark detection over a repository's history.
//!
//! Three kinds of landmark are recognized: the first commit ever made, a
//! release for every tag that decorates a commit, and any commit whose
//! churn crosses the large-refactor threshold.

use chrono::{DateTime, Utc};
use chronicle_git::Commit;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Commits touching strictly more files than this count as a refactor
/// milestone.
pub const CHURN_FILE_THRESHOLD: usize = 15;

/// The kinds of milestone the detector recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MilestoneKind {
    /// The repository's first commit
    Inception,
    /// A tagged release
    Release,
    /// A commit with unusually wide churn
    Refactor,
}

/// One landmark event in the history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    /// When the milestone happened
    pub date: DateTime<Utc>,
    /// Hash of the commit it is anchored to
    pub hash: String,
    /// Which kind of landmark this is
    pub kind: MilestoneKind,
    /// Short display title
    pub title: String,
    /// One-line description
    pub description: String,
    /// Display glyph for the milestone
    pub icon: String,
}

/// Scans the history for milestones, returned in date order.
///
/// Releases match tags against commit ref decorations: a tag produces a
/// milestone only when some commit's decorations literally contain
/// `tag: <name>`. Tags pointing outside the walked range are skipped.
#[must_use]
pub fn detect_milestones(commits: &[Commit], tags: &[String]) -> Vec<Milestone> {
    let mut sorted: Vec<&Commit> = commits.iter().collect();
    sorted.sort_by_key(|c| c.timestamp);

    let Some(first) = sorted.first() else {
        return Vec::new();
    };

    let mut milestones = vec![Milestone {
        date: first.timestamp,
        hash: first.hash.clone(),
        kind: MilestoneKind::Inception,
        title: "Project Inception".to_string(),
        description: "The journey begins!".to_string(),
        icon: "\u{1f331}".to_string(),
    }];

    for tag in tags {
        let marker = format!("tag: {tag}");
        if let Some(tagged) = sorted.iter().find(|c| c.has_ref_marker(&marker)) {
            milestones.push(Milestone {
                date: tagged.timestamp,
                hash: tagged.hash.clone(),
                kind: MilestoneKind::Release,
                title: format!("Release {tag}"),
                description: format!("Version {tag} released."),
                icon: "\u{1f680}".to_string(),
            });
        }
    }

    for commit in &sorted {
        if let Some(diff) = commit.diff {
            if diff.files_changed > CHURN_FILE_THRESHOLD {
                milestones.push(Milestone {
                    date: commit.timestamp,
                    hash: commit.hash.clone(),
                    kind: MilestoneKind::Refactor,
                    title: "Major Changes".to_string(),
                    description: format!(
                        "Massive update affecting {} files.",
                        diff.files_changed
                    ),
                    icon: "\u{1f3d7}\u{fe0f}".to_string(),
                });
            }
        }
    }

    // stable, so same-day milestones keep detection order
    milestones.sort_by_key(|m| m.date);

    debug!(count = milestones.len(), "detected milestones");
    milestones
}
