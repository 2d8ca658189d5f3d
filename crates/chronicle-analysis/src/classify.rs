// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Commit classification and impact scoring.
//!
//! Every commit is sorted into exactly one [`CommitCategory`], either from
//! a conventional-commit prefix (`feat(scope): ...`) or, failing that, from
//! keyword heuristics over the whole message. An impact score accompanies
//! the category so downstream consumers can rank commits by weight.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use chronicle_git::Commit;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

// ============================================================================
// Categories
// ============================================================================

/// The closed set of commit categories.
///
/// Variant order is meaningful: it fixes the serialization order of
/// category maps and the display order of category breakdowns.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum CommitCategory {
    /// New functionality
    Feat,
    /// Bug fixes
    Fix,
    /// Documentation-only changes
    Docs,
    /// Formatting and whitespace changes
    Style,
    /// Restructuring without behavior change
    Refactor,
    /// Test additions or changes
    Test,
    /// Build plumbing and maintenance
    Chore,
    /// Anything that matched nothing else
    Other,
}

impl CommitCategory {
    /// Every category, in declaration order.
    pub const ALL: [CommitCategory; 8] = [
        CommitCategory::Feat,
        CommitCategory::Fix,
        CommitCategory::Docs,
        CommitCategory::Style,
        CommitCategory::Refactor,
        CommitCategory::Test,
        CommitCategory::Chore,
        CommitCategory::Other,
    ];

    /// The lowercase conventional-commit word for this category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            CommitCategory::Feat => "feat",
            CommitCategory::Fix => "fix",
            CommitCategory::Docs => "docs",
            CommitCategory::Style => "style",
            CommitCategory::Refactor => "refactor",
            CommitCategory::Test => "test",
            CommitCategory::Chore => "chore",
            CommitCategory::Other => "other",
        }
    }

    /// Parses a declared conventional-commit type, case-insensitively.
    ///
    /// Only the seven named types are recognized; `Other` is never declared
    /// explicitly, it is the fallback of last resort.
    #[must_use]
    pub fn from_type_word(word: &str) -> Option<Self> {
        match word.to_ascii_lowercase().as_str() {
            "feat" => Some(CommitCategory::Feat),
            "fix" => Some(CommitCategory::Fix),
            "docs" => Some(CommitCategory::Docs),
            "style" => Some(CommitCategory::Style),
            "refactor" => Some(CommitCategory::Refactor),
            "test" => Some(CommitCategory::Test),
            "chore" => Some(CommitCategory::Chore),
            _ => None,
        }
    }
}

impl fmt::Display for CommitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Classification
// ============================================================================

/// `type(scope): subject` with a mandatory non-empty subject.
static CONVENTIONAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\w+)(?:\(([^)]+)\))?: .+").expect("valid regex"));

/// What the classifier decided about a single commit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// The category the commit was sorted into
    pub category: CommitCategory,
    /// The scope from a conventional-commit prefix, when one was present
    pub scope: Option<String>,
    /// Heuristic weight of the commit, at least 1.0
    pub impact: f64,
}

/// A commit together with its classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedCommit {
    /// The underlying commit record
    pub commit: Commit,
    /// The classifier's verdict for it
    pub analysis: Classification,
}

/// The classifier's output over a whole log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Commit counts per category; every category is present, zero or not
    pub categories: BTreeMap<CommitCategory, usize>,
    /// The classified commits, in the same order they were given
    pub commits: Vec<AnalyzedCommit>,
}

impl AnalysisReport {
    /// Commits in the report.
    #[must_use]
    pub fn total(&self) -> usize {
        self.commits.len()
    }

    /// Count for one category.
    #[must_use]
    pub fn count(&self, category: CommitCategory) -> usize {
        self.categories.get(&category).copied().unwrap_or(0)
    }
}

/// Classifies every commit and tallies the per-category counts.
///
/// Input order is preserved in the output; the category map always carries
/// all eight categories so consumers never need to special-case absence.
#[must_use]
pub fn classify(commits: &[Commit]) -> AnalysisReport {
    let mut categories: BTreeMap<CommitCategory, usize> =
        CommitCategory::ALL.iter().map(|c| (*c, 0)).collect();

    let analyzed: Vec<AnalyzedCommit> = commits
        .iter()
        .map(|commit| {
            let analysis = classify_commit(commit);
            *categories
                .entry(analysis.category)
                .or_insert(0) += 1;
            AnalyzedCommit {
                commit: commit.clone(),
                analysis,
            }
        })
        .collect();

    debug!(total = analyzed.len(), "classified commits");

    AnalysisReport {
        categories,
        commits: analyzed,
    }
}

/// Classifies one commit: category, scope, and impact score.
#[must_use]
pub fn classify_commit(commit: &Commit) -> Classification {
    let lower = commit.message.to_lowercase();

    let mut scope = None;
    let category = if let Some(caps) = CONVENTIONAL_RE.captures(commit.subject()) {
        scope = caps.get(2).map(|m| m.as_str().to_string());
        // An unrecognized declared type keeps its scope but classifies by
        // keywords, same as an unstructured message.
        CommitCategory::from_type_word(&caps[1])
            .unwrap_or_else(|| keyword_category(&lower))
    } else {
        keyword_category(&lower)
    };

    let impact = impact_score(commit, &lower, category);

    Classification {
        category,
        scope,
        impact,
    }
}

/// Keyword fallback, checked in fixed priority order against the
/// lowercased message.
fn keyword_category(lower: &str) -> CommitCategory {
    if lower.contains("feature") || lower.contains("add") {
        CommitCategory::Feat
    } else if lower.contains("fix") || lower.contains("bug") {
        CommitCategory::Fix
    } else if lower.contains("doc") || lower.contains("readme") {
        CommitCategory::Docs
    } else if lower.contains("test") {
        CommitCategory::Test
    } else if lower.contains("refactor") {
        CommitCategory::Refactor
    } else {
        CommitCategory::Other
    }
}

/// Impact formula: a base of 1.0, plus diff churn, plus message and
/// category boosts. Commits without diff stats score on message alone.
fn impact_score(commit: &Commit, lower: &str, category: CommitCategory) -> f64 {
    let mut score = 1.0;

    if let Some(diff) = commit.diff {
        score += diff.files_changed as f64 * 0.5;
        score += diff.insertions as f64 * 0.1;
        score += diff.deletions as f64 * 0.1;
    }

    if lower.contains("breaking") {
        score += 5.0;
    }
    if lower.contains("major") {
        score += 3.0;
    }

    match category {
        CommitCategory::Feat => score += 2.0,
        CommitCategory::Fix => score += 1.0,
        _ => {}
    }

    score
}

// ============================================================================
// Tests
// ============================================================================


#[cfg(test)]
mod property_tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;

    fn arbitrary_commit() -> impl Strategy<Value = Commit> {
        ("[ -~]{0,80}", proptest::option::of((0usize..50, 0usize..500, 0usize..500))).prop_map(
            |(message, diff)| Commit {
                hash: "b".repeat(40),
                timestamp: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
                author_name: "Prop".to_string(),
                author_email: "prop@example.com".to_string(),
                message,
                diff: diff.map(|(files_changed, insertions, deletions)| chronicle_git::DiffStat {
                    files_changed,
                    insertions,
                    deletions,
                }),
                refs: Vec::new(),
            },
        )
    }

    proptest! {
        #[test]
        fn impact_never_below_one(commit in arbitrary_commit()) {
            let c = classify_commit(&commit);
            prop_assert!(c.impact >= 1.0);
        }

        #[test]
        fn impact_grows_with_churn(commit in arbitrary_commit(), extra in 1usize..100) {
            let base = classify_commit(&commit).impact;
            let mut heavier = commit;
            let diff = heavier.diff.get_or_insert_with(Default::default);
            diff.insertions += extra;
            let boosted = classify_commit(&heavier).impact;
            prop_assert!(boosted > base);
        }

        #[test]
        fn tallies_sum_to_total(messages in proptest::collection::vec("[ -~]{0,40}", 0..30)) {
            let commits: Vec<Commit> = messages
                .into_iter()
                .map(|message| Commit {
                    hash: "c".repeat(40),
                    timestamp: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
                    author_name: "Prop".to_string(),
                    author_email: "prop@example.com".to_string(),
                    message,
                    diff: None,
                    refs: Vec::new(),
                })
                .collect();
            let report = classify(&commits);
            let summed: usize = report.categories.values().sum();
            prop_assert_eq!(summed, commits.len());
        }

        #[test]
        fn declared_types_round_trip(category in proptest::sample::select(CommitCategory::ALL.to_vec())) {
            if category == CommitCategory::Other {
                // "other" is never a declared type
                prop_assert_eq!(CommitCategory::from_type_word("other"), None);
            } else {
                prop_assert_eq!(CommitCategory::from_type_word(category.as_str()), Some(category));
            }
        }
    }
}
