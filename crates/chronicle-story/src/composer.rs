// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Narrative composition.
//!
//! Turns an analyzed history into a markdown story: a prologue anchored on
//! the first commit, one chapter per calendar month, and an epilogue. All
//! free-text variation flows through the injected [`Picker`], so a seeded
//! picker makes the whole narrative reproducible.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{Datelike, Local};
use chronicle_analysis::{AnalyzedCommit, CommitCategory, Milestone};
use chronicle_git::Commit;
use tracing::debug;

use crate::picker::Picker;
use crate::templates::{
    self, COLLABORATIVE, CONSISTENT, EPILOGUES, HERO_BIOS, HIGH_ACTIVITY, INTROS, LOW_ACTIVITY,
    NEWCOMER_BIOS, TRANSITIONS, pick,
};

/// Categories that can dominate a chapter, in evaluation order.
const DOMINANCE_ORDER: [CommitCategory; 5] = [
    CommitCategory::Feat,
    CommitCategory::Fix,
    CommitCategory::Refactor,
    CommitCategory::Docs,
    CommitCategory::Chore,
];

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A month counts as busy above this many commits.
const HIGH_ACTIVITY_THRESHOLD: usize = 30;

/// A month counts as quiet below this many commits.
const LOW_ACTIVITY_THRESHOLD: usize = 5;

/// How many notable-work bullets a chapter shows at most.
const NOTABLE_LIMIT: usize = 5;

/// Everything the composer needs for one story.
#[derive(Debug, Clone, Copy)]
pub struct StoryInput<'a> {
    /// Display name for the title heading; `None` falls back to a generic
    /// title
    pub repo_name: Option<&'a str>,
    /// The analyzed commits, any order
    pub commits: &'a [AnalyzedCommit],
    /// Milestones detected over the same commits
    pub milestones: &'a [Milestone],
}

/// One month of the story, assembled before rendering.
struct Chapter {
    title: String,
    pretty_month: String,
    narrative: String,
    spotlight: Option<String>,
    key_moments: Vec<String>,
    notable: Vec<String>,
}

/// Composes the full narrative, or `None` when there are no commits.
pub fn compose(input: &StoryInput<'_>, picker: &mut dyn Picker) -> Option<String> {
    if input.commits.is_empty() {
        return None;
    }

    let months = bucket_by_month(input.commits);
    debug!(chapters = months.len(), "composing narrative");

    let mut story = String::new();

    match input.repo_name {
        Some(name) => story.push_str(&format!("# The Story of {name}\n\n")),
        None => story.push_str("# A Git Journey\n\n"),
    }

    // prologue speaks about the oldest commit, whatever the input order
    let first = input.commits.iter().min_by_key(|c| c.commit.timestamp)?;
    let first_date = first
        .commit
        .timestamp
        .with_timezone(&Local)
        .format("%b %-d, %Y")
        .to_string();
    let intro = pick(picker, &INTROS).replace("{date}", &first_date);
    story.push_str(&format!("## Prologue\n\n{intro}\n\n"));

    let mut seen_authors: HashSet<&str> = HashSet::new();
    let chapters: Vec<Chapter> = months
        .iter()
        .enumerate()
        .map(|(index, ((year, month), month_commits))| {
            build_chapter(
                *year,
                *month,
                month_commits,
                input.milestones,
                index,
                &mut seen_authors,
                picker,
            )
        })
        .collect();

    let last = chapters.len().saturating_sub(1);
    for (index, chapter) in chapters.iter().enumerate() {
        render_chapter(&mut story, chapter);
        if index < last {
            story.push_str(&format!("_{}_\n\n", pick(picker, &TRANSITIONS)));
        }
    }

    let epilogue =
        pick(picker, &EPILOGUES).replace("{count}", &input.commits.len().to_string());
    story.push_str(&format!("# Epilogue\n\n{epilogue}\n"));

    Some(story)
}

// ============================================================================
// Chapter assembly
// ============================================================================

/// Partitions commits into local-time calendar months, oldest month first.
fn bucket_by_month(
    commits: &[AnalyzedCommit],
) -> BTreeMap<(i32, u32), Vec<&AnalyzedCommit>> {
    let mut months: BTreeMap<(i32, u32), Vec<&AnalyzedCommit>> = BTreeMap::new();
    for commit in commits {
        let local = commit.commit.timestamp.with_timezone(&Local);
        months
            .entry((local.year(), local.month()))
            .or_default()
            .push(commit);
    }
    months
}

fn build_chapter<'a>(
    year: i32,
    month: u32,
    month_commits: &[&'a AnalyzedCommit],
    milestones: &[Milestone],
    index: usize,
    seen_authors: &mut HashSet<&'a str>,
    picker: &mut dyn Picker,
) -> Chapter {
    let total = month_commits.len();
    let pretty_month = format!("{} {}", MONTH_NAMES[(month - 1) as usize], year);

    let dominant = dominant_category(month_commits);
    let title = pick(picker, templates::title_pool(dominant)).to_string();

    // narrative paragraph: lead, mood, optional collaboration, focus, themes
    let mut narrative = format!("In {pretty_month}, the repository saw **{total} commits**.");

    let mood_pool = if total > HIGH_ACTIVITY_THRESHOLD {
        &HIGH_ACTIVITY
    } else if total < LOW_ACTIVITY_THRESHOLD {
        &LOW_ACTIVITY
    } else {
        &CONSISTENT
    };
    narrative.push(' ');
    narrative.push_str(pick(picker, mood_pool));

    let distinct_authors: HashSet<&str> =
        month_commits.iter().map(|c| author_key(&c.commit)).collect();
    if distinct_authors.len() > 1 && total > 10 {
        narrative.push(' ');
        narrative.push_str(pick(picker, &COLLABORATIVE));
    }

    narrative.push(' ');
    narrative.push_str(templates::focus_sentence(dominant));

    let themes = month_themes(month_commits);
    if !themes.is_empty() {
        narrative.push_str(&format!(" Key themes included **{}**.", themes.join(", ")));
    }

    let spotlight = build_spotlight(month_commits, total, index, seen_authors, picker);

    let key_moments = milestones
        .iter()
        .filter(|m| {
            let local = m.date.with_timezone(&Local);
            (local.year(), local.month()) == (year, month)
        })
        .map(|m| {
            format!(
                "- {} **{}**: {}",
                m.icon,
                m.title,
                templates::milestone_flavor(m.kind, &m.title)
            )
        })
        .collect();

    let notable = notable_work(month_commits);

    Chapter {
        title,
        pretty_month,
        narrative,
        spotlight,
        key_moments,
        notable,
    }
}

/// The category leading the month, if it clears the 40% bar and is a
/// unique maximum. A tie at the top means no dominance.
fn dominant_category(month_commits: &[&AnalyzedCommit]) -> Option<CommitCategory> {
    let total = month_commits.len();
    let mut dominant = None;
    let mut max_count = 0usize;
    let mut tied = false;

    for category in DOMINANCE_ORDER {
        let count = month_commits
            .iter()
            .filter(|c| c.analysis.category == category)
            .count();
        if count > max_count {
            max_count = count;
            dominant = Some(category);
            tied = false;
        } else if count == max_count && count > 0 {
            tied = true;
        }
    }

    let threshold = (2 * total).div_ceil(5);
    if tied || max_count < threshold {
        return None;
    }
    dominant
}

/// Top 3 recurring terms of the month, via the shared tokenizer.
fn month_themes(month_commits: &[&AnalyzedCommit]) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for commit in month_commits {
        for term in chronicle_analysis::tokenize_message(&commit.commit.message) {
            *counts.entry(term).or_insert(0) += 1;
        }
    }
    chronicle_analysis::top_terms(&counts, 3)
        .into_iter()
        .map(|t| t.term)
        .collect()
}

/// Newcomer and hero lines for the month, when either applies.
///
/// Every author still gets marked as seen in the first chapter even though
/// no newcomer line is shown for it; everyone is new on day one.
fn build_spotlight<'a>(
    month_commits: &[&'a AnalyzedCommit],
    total: usize,
    index: usize,
    seen_authors: &mut HashSet<&'a str>,
    picker: &mut dyn Picker,
) -> Option<String> {
    let mut parts: Vec<String> = Vec::new();

    let mut newcomers: Vec<&str> = Vec::new();
    for commit in month_commits {
        let author = author_key(&commit.commit);
        if seen_authors.insert(author) {
            newcomers.push(author);
        }
    }

    if index > 0 && !newcomers.is_empty() {
        let name = newcomers[picker.pick_index(newcomers.len())];
        parts.push(pick(picker, &NEWCOMER_BIOS).replace("{name}", name));
    }

    if let Some((name, count)) = top_author(month_commits) {
        let share = count as f64 / total as f64;
        if count > 1 && share > 0.3 {
            parts.push(
                pick(picker, &HERO_BIOS)
                    .replace("{name}", name)
                    .replace("{count}", &count.to_string()),
            );
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

/// The month's most prolific author; ties keep the first one encountered.
fn top_author<'a>(month_commits: &[&'a AnalyzedCommit]) -> Option<(&'a str, usize)> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for commit in month_commits {
        let author = author_key(&commit.commit);
        let slot = counts.entry(author).or_insert_with(|| {
            order.push(author);
            0
        });
        *slot += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for author in order {
        let count = counts[author];
        if best.is_none_or(|(_, top)| count > top) {
            best = Some((author, count));
        }
    }
    best
}

/// High-impact commits worth naming, routine noise filtered out.
fn notable_work(month_commits: &[&AnalyzedCommit]) -> Vec<String> {
    let mut meaningful: Vec<&&AnalyzedCommit> = month_commits
        .iter()
        .filter(|c| {
            let lower = c.commit.message.to_lowercase();
            !lower.starts_with("merge")
                && !lower.contains("bump version")
                && !lower.contains("typo")
                && c.commit.message.chars().count() >= 10
        })
        .collect();

    meaningful.sort_by(|a, b| b.analysis.impact.total_cmp(&a.analysis.impact));
    meaningful.truncate(NOTABLE_LIMIT);

    meaningful
        .iter()
        .map(|c| truncate_subject(c.commit.subject()))
        .collect()
}

/// Clips a subject to 60 characters, marking the cut with an ellipsis.
fn truncate_subject(subject: &str) -> String {
    if subject.chars().count() > 60 {
        let head: String = subject.chars().take(57).collect();
        format!("{head}...")
    } else {
        subject.to_string()
    }
}

/// Authors are identified by name, or email when the name is blank, same
/// as the contributor index.
fn author_key(commit: &Commit) -> &str {
    if commit.author_name.is_empty() {
        &commit.author_email
    } else {
        &commit.author_name
    }
}

// ============================================================================
// Rendering
// ============================================================================

fn render_chapter(story: &mut String, chapter: &Chapter) {
    story.push_str(&format!(
        "## Chapter: {} ({})\n\n",
        chapter.title, chapter.pretty_month
    ));
    story.push_str(&chapter.narrative);
    story.push_str("\n\n");

    if let Some(spotlight) = &chapter.spotlight {
        story.push_str(&format!("> \u{1f465} {spotlight}\n\n"));
    }

    if !chapter.key_moments.is_empty() {
        story.push_str("### Key Moments\n");
        for line in &chapter.key_moments {
            story.push_str(line);
            story.push('\n');
        }
        story.push('\n');
    }

    if !chapter.notable.is_empty() {
        story.push_str("> *Notable work:*\n");
        for subject in &chapter.notable {
            story.push_str(&format!("> * {subject}\n"));
        }
        story.push('\n');
    }
}

// ============================================================================
// Tests
// ============================================================================
