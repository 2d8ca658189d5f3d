//! When work happens and what it is about.
//!
//! Aggregates commit timestamps into a day-of-week by hour-of-day grid in
//! the local timezone, and distills commit messages into a small ranked
//! vocabulary of recurring terms.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use chrono::{Datelike, Local, Timelike};
use chronicle_git::Commit;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Tracked weekdays; index 0 is Sunday.
pub const DAYS: usize = 7;

/// Tracked hours of the day.
pub const HOURS: usize = 24;

/// Weekday display names, aligned with the grid's day axis.
pub const DAY_NAMES: [&str; DAYS] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// How many ranked terms the vocabulary keeps.
const VOCABULARY_LIMIT: usize = 10;

/// Words too generic to say anything about a project: English function
/// words, conventional-commit types, and stock VCS phrasing.
static STOPWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "the", "a", "an", "and", "or", "but", "is", "are", "was", "were", "been", "be", "have",
        "has", "had", "do", "does", "did", "will", "would", "could", "should", "may", "might",
        "must", "shall", "can", "need", "this", "that", "these", "those", "i", "you", "he", "she",
        "it", "we", "they", "of", "in", "on", "at", "to", "for", "with", "by", "from", "up",
        "down", "into", "onto", "upon", "about", "over", "under", "again", "further", "then",
        "once", "feat", "fix", "chore", "docs", "style", "refactor", "test", "tests", "merge",
        "branch", "remote", "origin", "pull", "request", "bump", "version", "release", "add",
        "added", "remove", "removed", "update", "updated", "change", "changed", "initial",
        "commit", "wip", "minor", "some", "more", "misc", "stuff", "things",
    ]
    .into_iter()
    .collect()
});

/// A counted vocabulary term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermCount {
    /// The lowercased term
    pub term: String,
    /// How many times it appeared across all messages
    pub count: usize,
}

/// Activity counts over a week's worth of hours, plus the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityMatrix {
    /// Commit counts indexed `[day][hour]`, Sunday first, local time
    pub grid: [[u32; HOURS]; DAYS],
    /// Per-weekday totals
    pub day_totals: [u32; DAYS],
    /// Per-hour totals
    pub hour_totals: [u32; HOURS],
    /// The largest single cell, for heat scaling
    pub max_cell: u32,
    /// Recurring message terms, most frequent first
    pub vocabulary: Vec<TermCount>,
}

impl Default for ActivityMatrix {
    fn default() -> Self {
        ActivityMatrix {
            grid: [[0; HOURS]; DAYS],
            day_totals: [0; DAYS],
            hour_totals: [0; HOURS],
            max_cell: 0,
            vocabulary: Vec::new(),
        }
    }
}

impl ActivityMatrix {
    /// Total commits folded into the matrix.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.day_totals.iter().sum()
    }

    /// Index of the weekday with the most commits, `None` when empty.
    /// Ties resolve to the earlier day.
    #[must_use]
    pub fn busiest_day(&self) -> Option<usize> {
        busiest_index(&self.day_totals)
    }

    /// Hour of day with the most commits, `None` when empty.
    /// Ties resolve to the earlier hour.
    #[must_use]
    pub fn busiest_hour(&self) -> Option<usize> {
        busiest_index(&self.hour_totals)
    }
}

fn busiest_index(totals: &[u32]) -> Option<usize> {
    let (idx, &best) = totals
        .iter()
        .enumerate()
        .max_by_key(|&(i, &count)| (count, std::cmp::Reverse(i)))?;
    (best > 0).then_some(idx)
}

/// Folds commits into an [`ActivityMatrix`].
///
/// Timestamps are bucketed in the local timezone so the grid reflects the
/// clock the authors actually worked by.
#[must_use]
pub fn aggregate(commits: &[Commit]) -> ActivityMatrix {
    let mut matrix = ActivityMatrix::default();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for commit in commits {
        let local = commit.timestamp.with_timezone(&Local);
        let day = local.weekday().num_days_from_sunday() as usize;
        let hour = local.hour() as usize;

        matrix.grid[day][hour] += 1;
        matrix.day_totals[day] += 1;
        matrix.hour_totals[hour] += 1;

        for term in tokenize_message(&commit.message) {
            *counts.entry(term).or_insert(0) += 1;
        }
    }

    matrix.max_cell = matrix.grid.iter().flatten().copied().max().unwrap_or(0);
    matrix.vocabulary = top_terms(&counts, VOCABULARY_LIMIT);

    debug!(
        commits = commits.len(),
        terms = matrix.vocabulary.len(),
        "aggregated activity"
    );

    matrix
}

/// Splits a message into candidate vocabulary terms.
///
/// Lowercases, strips everything but word characters, then keeps words
/// longer than three characters that are neither stopwords nor purely
/// numeric. The story generator reuses this for theme extraction, so the
/// rules here define "theme" for the whole pipeline.
#[must_use]
pub fn tokenize_message(message: &str) -> Vec<String> {
    message
        .to_lowercase()
        .split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
                .collect::<String>()
        })
        .filter(|word| {
            word.len() > 3
                && !STOPWORDS.contains(word.as_str())
                && !word.chars().all(|c| c.is_ascii_digit())
        })
        .collect()
}

/// Ranks counted terms, highest count first; equal counts order
/// alphabetically so the ranking is deterministic.
#[must_use]
pub fn top_terms(counts: &HashMap<String, usize>, limit: usize) -> Vec<TermCount> {
    let mut ranked: Vec<TermCount> = counts
        .iter()
        .map(|(term, &count)| TermCount {
            term: term.clone(),
            count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.term.cmp(&b.term)));
    ranked.truncate(limit);
    ranked
}
