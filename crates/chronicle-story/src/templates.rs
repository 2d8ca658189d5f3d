// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Fixed prose pools the composer draws from.
//!
//! Placeholders use `{name}` style markers and are substituted with plain
//! string replacement; a pool entry never contains a marker it does not
//! document.

use chronicle_analysis::{CommitCategory, MilestoneKind};

use crate::picker::Picker;

/// Prologue openers; `{date}` is the first commit's date.
pub static INTROS: [&str; 3] = [
    "It began on {date}. A new repository was initialized, and with it, a new journey.",
    "The story starts on {date}. The first lines of code were written, laying the foundation for what was to come.",
    "On {date}, the screen flickered to life. A project was born.",
];

/// Chapter titles for feature-dominated months.
pub static FEAT_TITLES: [&str; 4] = [
    "The Era of Expansion",
    "Building Blocks",
    "New Horizons",
    "Feature Frenzy",
];

/// Chapter titles for fix-dominated months.
pub static FIX_TITLES: [&str; 4] = [
    "The Great Clean-up",
    "Squashing Bugs",
    "Stability First",
    "The Refinement",
];

/// Chapter titles for refactor-dominated months.
pub static REFACTOR_TITLES: [&str; 4] = [
    "Restructuring the Core",
    "Paying Technical Debt",
    "Architectural Shift",
    "Polishing the Gem",
];

/// Chapter titles when no category dominates.
pub static MIXED_TITLES: [&str; 4] = [
    "Steady Progress",
    "The Grind",
    "Ebb and Flow",
    "Moving Forward",
];

/// Mood sentences for busy months (more than 30 commits).
pub static HIGH_ACTIVITY: [&str; 3] = [
    "It was a time of frantic activity.",
    "Commits landed at a furious pace.",
    "The pace bordered on relentless.",
];

/// Mood sentences for quiet months (fewer than 5 commits).
pub static LOW_ACTIVITY: [&str; 3] = [
    "Things were quiet for a while.",
    "The repository barely stirred.",
    "Only a handful of changes trickled in.",
];

/// Mood sentences for everything in between.
pub static CONSISTENT: [&str; 3] = [
    "Progress continued at a steady pace.",
    "Work moved along at a familiar rhythm.",
    "The cadence held steady.",
];

/// Appended when several authors were active in a busy month.
pub static COLLABORATIVE: [&str; 3] = [
    "The team was firing on all cylinders.",
    "Contributors worked shoulder to shoulder.",
    "It was a genuinely collective effort.",
];

/// Spotlight lines for first-time contributors; `{name}` is the author.
pub static NEWCOMER_BIOS: [&str; 3] = [
    "A new challenger approached! {name} made their first contribution.",
    "Fresh energy arrived as {name} joined the effort.",
    "{name} pushed their first commit and wasted no time settling in.",
];

/// Spotlight lines for the month's top author; `{name}` and `{count}`.
pub static HERO_BIOS: [&str; 3] = [
    "{name} carried the month with {count} commits.",
    "{name} was unstoppable, landing {count} commits.",
    "Much of the heavy lifting fell to {name}, who shipped {count} commits.",
];

/// Bridging lines between chapters.
pub static TRANSITIONS: [&str; 4] = [
    "The weeks rolled on.",
    "A new month brought new priorities.",
    "And so the work continued.",
    "Time passed, and the repository kept growing.",
];

/// Closing lines; `{count}` is the total commit count.
pub static EPILOGUES: [&str; 3] = [
    "And so the story continues, {count} commits and counting.",
    "After {count} commits, the journey is far from over.",
    "{count} commits later, the repository stands as a testament to persistence.",
];

/// The title pool for a chapter's dominant category.
///
/// Only feature, fix, and refactor months have their own pools; docs- and
/// chore-dominated months share the mixed pool, as does `None`.
#[must_use]
pub fn title_pool(dominant: Option<CommitCategory>) -> &'static [&'static str] {
    match dominant {
        Some(CommitCategory::Feat) => &FEAT_TITLES,
        Some(CommitCategory::Fix) => &FIX_TITLES,
        Some(CommitCategory::Refactor) => &REFACTOR_TITLES,
        _ => &MIXED_TITLES,
    }
}

/// The fixed focus sentence for a chapter's dominant category.
#[must_use]
pub fn focus_sentence(dominant: Option<CommitCategory>) -> &'static str {
    match dominant {
        Some(CommitCategory::Feat) => "The primary focus was on shipping new features.",
        Some(CommitCategory::Fix) => "Efforts were concentrated on stability and bug fixes.",
        Some(CommitCategory::Refactor) => "The team took a step back to improve code quality.",
        Some(CommitCategory::Docs) => "Documentation was a priority this month.",
        Some(CommitCategory::Chore) => "Maintenance tasks dominated the workload.",
        _ => "Work was balanced across various areas.",
    }
}

/// Flavor text for a milestone callout.
#[must_use]
pub fn milestone_flavor(kind: MilestoneKind, title: &str) -> String {
    match kind {
        MilestoneKind::Inception => "The project sparked into existence.".to_string(),
        MilestoneKind::Release => format!("And thus, {title} was released to the world."),
        MilestoneKind::Refactor => "The code underwent a massive transformation.".to_string(),
    }
}

/// Draws one entry from a pool.
pub(crate) fn pick<'a>(picker: &mut dyn Picker, pool: &'a [&'a str]) -> &'a str {
    pool[picker.pick_index(pool.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picker::SeededPicker;

    #[test]
    fn title_pools_route_by_dominance() {
        similar_asserts::assert_eq!(
            title_pool(Some(CommitCategory::Feat)),
            &FEAT_TITLES[..]
        );
        similar_asserts::assert_eq!(title_pool(Some(CommitCategory::Fix)), &FIX_TITLES[..]);
        similar_asserts::assert_eq!(
            title_pool(Some(CommitCategory::Refactor)),
            &REFACTOR_TITLES[..]
        );
        // docs and chore months have no dedicated pool
        similar_asserts::assert_eq!(
            title_pool(Some(CommitCategory::Docs)),
            &MIXED_TITLES[..]
        );
        similar_asserts::assert_eq!(
            title_pool(Some(CommitCategory::Chore)),
            &MIXED_TITLES[..]
        );
        similar_asserts::assert_eq!(title_pool(None), &MIXED_TITLES[..]);
    }

    #[test]
    fn focus_sentences_cover_all_dominance_outcomes() {
        for category in [
            Some(CommitCategory::Feat),
            Some(CommitCategory::Fix),
            Some(CommitCategory::Refactor),
            Some(CommitCategory::Docs),
            Some(CommitCategory::Chore),
            None,
        ] {
            assert!(!focus_sentence(category).is_empty());
        }
    }

    #[test]
    fn release_flavor_names_the_milestone() {
        let flavor = milestone_flavor(MilestoneKind::Release, "Release v1.0.0");
        similar_asserts::assert_eq!(
            flavor,
            "And thus, Release v1.0.0 was released to the world."
        );
    }

    #[test]
    fn pick_returns_a_pool_member() {
        let mut picker = SeededPicker::new(3);
        for _ in 0..20 {
            let chosen = pick(&mut picker, &TRANSITIONS);
            assert!(TRANSITIONS.contains(&chosen));
        }
    }

    #[test]
    fn placeholder_markers_are_where_they_belong() {
        assert!(INTROS.iter().all(|t| t.contains("{date}")));
        assert!(NEWCOMER_BIOS.iter().all(|t| t.contains("{name}")));
        assert!(
            HERO_BIOS
                .iter()
                .all(|t| t.contains("{name}") && t.contains("{count}"))
        );
        assert!(EPILOGUES.iter().all(|t| t.contains("{count}")));
        assert!(TRANSITIONS.iter().all(|t| !t.contains('{')));
    }
}
