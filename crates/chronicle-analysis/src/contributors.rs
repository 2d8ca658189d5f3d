// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Per-author contribution rollups.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use chronicle_git::Commit;
use serde::{Deserialize, Serialize};

/// Everything the pipeline tracks about one author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorStats {
    /// Author name, or email when the name was empty
    pub name: String,
    /// Email from the author's first encountered commit
    pub email: String,
    /// Commits attributed to this author
    pub commit_count: usize,
    /// Timestamp of the author's earliest commit
    pub first_commit: DateTime<Utc>,
    /// Timestamp of the author's latest commit
    pub last_commit: DateTime<Utc>,
    /// Hashes of every commit by this author, in input order
    pub hashes: Vec<String>,
}

/// Groups commits by author and ranks the authors by commit count.
///
/// Authors are keyed by name, with email as the key for commits that carry
/// no name at all. Ranking is stable, so authors with equal counts keep the
/// order in which they first appeared.
#[must_use]
pub fn index_contributors(commits: &[Commit]) -> Vec<ContributorStats> {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut contributors: Vec<ContributorStats> = Vec::new();

    for commit in commits {
        let key = if commit.author_name.is_empty() {
            commit.author_email.clone()
        } else {
            commit.author_name.clone()
        };

        let idx = *slots.entry(key.clone()).or_insert_with(|| {
            contributors.push(ContributorStats {
                name: key,
                email: commit.author_email.clone(),
                commit_count: 0,
                first_commit: commit.timestamp,
                last_commit: commit.timestamp,
                hashes: Vec::new(),
            });
            contributors.len() - 1
        });

        let stats = &mut contributors[idx];
        stats.commit_count += 1;
        stats.hashes.push(commit.hash.clone());
        if commit.timestamp < stats.first_commit {
            stats.first_commit = commit.timestamp;
        }
        if commit.timestamp > stats.last_commit {
            stats.last_commit = commit.timestamp;
        }
    }

    contributors.sort_by(|a, b| b.commit_count.cmp(&a.commit_count));
    contributors
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn counts_sum_to_input_len(
            authors in proptest::collection::vec(0u8..5, 0..60),
        ) {
            let commits: Vec<Commit> = authors
                .iter()
                .enumerate()
                .map(|(i, author)| Commit {
                    hash: format!("{i:040x}"),
                    timestamp: Utc.timestamp_opt(1_700_000_000 + i as i64, 0).unwrap(),
                    author_name: format!("author-{author}"),
                    author_email: format!("author-{author}@example.com"),
                    message: "work".to_string(),
                    diff: None,
                    refs: Vec::new(),
                })
                .collect();

            let stats = index_contributors(&commits);

            let total: usize = stats.iter().map(|s| s.commit_count).sum();
            prop_assert_eq!(total, commits.len());

            for s in &stats {
                prop_assert_eq!(s.hashes.len(), s.commit_count);
                prop_assert!(s.first_commit <= s.last_commit);
            }
            for pair in stats.windows(2) {
                prop_assert!(pair[0].commit_count >= pair[1].commit_count);
            }
        }
    }
}
