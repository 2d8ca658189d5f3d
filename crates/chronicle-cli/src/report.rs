//! Report rendering
//!
//! Turns one [`PipelineReport`] into terminal text, markdown, or JSON.
//! The renderers only read the report; everything they show was computed
//! by the pipeline.

use std::fs;
use std::path::Path;

use chrono::Local;
use chronicle_analysis::{CommitCategory, DAY_NAMES};
use tracing::info;

use crate::config::OutputFormat;
use crate::pipeline::PipelineReport;

/// How many contributors the stats report names
const CONTRIBUTOR_LIMIT: usize = 5;

/// How many vocabulary terms the stats report shows
const VOCABULARY_DISPLAY: usize = 8;

/// Render the story command's output
///
/// Markdown and text both emit the narrative as-is; JSON emits the whole
/// report. A repository with nothing to tell yields a short notice
/// instead of an empty document.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_story(
    report: &PipelineReport,
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json => render_json(report),
        OutputFormat::Text | OutputFormat::Markdown => Ok(match &report.narrative {
            Some(narrative) => narrative.clone(),
            None => "No commits found in this repository.\n".to_string(),
        }),
    }
}

/// Render the stats command's output
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_stats(
    report: &PipelineReport,
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json => render_json(report),
        OutputFormat::Markdown => Ok(stats_markdown(report)),
        OutputFormat::Text => Ok(stats_text(report)),
    }
}

/// Write a rendered report to a file, or to stdout when no file is given
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_output(content: &str, target: Option<&Path>) -> std::io::Result<()> {
    match target {
        Some(path) => {
            fs::write(path, content)?;
            info!("wrote report to {}", path.display());
        }
        None => {
            print!("{content}");
            if !content.ends_with('\n') {
                println!();
            }
        }
    }
    Ok(())
}

fn render_json(report: &PipelineReport) -> Result<String, serde_json::Error> {
    let mut json = serde_json::to_string_pretty(report)?;
    json.push('\n');
    Ok(json)
}

/// Display icon for a category
fn category_icon(category: CommitCategory) -> &'static str {
    match category {
        CommitCategory::Feat => "\u{2728}",
        CommitCategory::Fix => "\u{1f41b}",
        CommitCategory::Docs => "\u{1f4da}",
        CommitCategory::Style => "\u{1f485}",
        CommitCategory::Refactor => "\u{267b}\u{fe0f}",
        CommitCategory::Test => "\u{1f9ea}",
        CommitCategory::Chore => "\u{1f527}",
        CommitCategory::Other => "\u{1f4dd}",
    }
}

/// Display label for a category
fn category_label(category: CommitCategory) -> &'static str {
    match category {
        CommitCategory::Feat => "Features",
        CommitCategory::Fix => "Bug Fixes",
        CommitCategory::Docs => "Documentation",
        CommitCategory::Style => "Styling",
        CommitCategory::Refactor => "Refactoring",
        CommitCategory::Test => "Tests",
        CommitCategory::Chore => "Chores",
        CommitCategory::Other => "Other",
    }
}

fn display_name(report: &PipelineReport) -> &str {
    report.repo_name.as_deref().unwrap_or("(unnamed)")
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "commit" } else { "commits" }
}

fn stats_text(report: &PipelineReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("Repository: {}\n", display_name(report)));
    out.push_str(&format!("Commits:    {}\n", report.total_commits));
    out.push_str(&format!("Branches:   {}\n", report.branch_count));
    out.push_str(&format!("Tags:       {}\n", report.tag_count));

    let counted: Vec<CommitCategory> = CommitCategory::ALL
        .into_iter()
        .filter(|category| report.analysis.count(*category) > 0)
        .collect();
    if !counted.is_empty() {
        out.push_str("\nCommit breakdown:\n");
        for category in counted {
            out.push_str(&format!(
                "  {} {}: {}\n",
                category_icon(category),
                category_label(category),
                report.analysis.count(category)
            ));
        }
    }

    if !report.contributors.is_empty() {
        out.push_str("\nTop contributors:\n");
        for (rank, contributor) in report.contributors.iter().take(CONTRIBUTOR_LIMIT).enumerate() {
            out.push_str(&format!(
                "  {}. {} ({} {})\n",
                rank + 1,
                contributor.name,
                contributor.commit_count,
                plural(contributor.commit_count)
            ));
        }
    }

    if let Some(day) = report.temporal.busiest_day() {
        out.push_str(&format!("\nBusiest day:  {}\n", DAY_NAMES[day]));
        if let Some(hour) = report.temporal.busiest_hour() {
            out.push_str(&format!("Busiest hour: {hour:02}:00\n"));
        }
    }

    if !report.temporal.vocabulary.is_empty() {
        let terms: Vec<&str> = report
            .temporal
            .vocabulary
            .iter()
            .take(VOCABULARY_DISPLAY)
            .map(|t| t.term.as_str())
            .collect();
        out.push_str(&format!("\nVocabulary: {}\n", terms.join(", ")));
    }

    if !report.milestones.is_empty() {
        out.push_str("\nKey milestones:\n");
        for milestone in &report.milestones {
            out.push_str(&format!(
                "  {}  {} {}\n",
                milestone.date.with_timezone(&Local).format("%Y-%m-%d"),
                milestone.icon,
                milestone.title
            ));
        }
    }

    out
}

fn stats_markdown(report: &PipelineReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("# Repository Statistics: {}\n\n", display_name(report)));
    out.push_str("| Statistic | Value |\n");
    out.push_str("| --- | --- |\n");
    out.push_str(&format!("| Commits | {} |\n", report.total_commits));
    out.push_str(&format!("| Branches | {} |\n", report.branch_count));
    out.push_str(&format!("| Tags | {} |\n", report.tag_count));

    let counted: Vec<CommitCategory> = CommitCategory::ALL
        .into_iter()
        .filter(|category| report.analysis.count(*category) > 0)
        .collect();
    if !counted.is_empty() {
        out.push_str("\n## \u{1f4e6} Commit Breakdown\n\n");
        out.push_str("| Category | Count |\n");
        out.push_str("| --- | --- |\n");
        for category in counted {
            out.push_str(&format!(
                "| {} {} | {} |\n",
                category_icon(category),
                category_label(category),
                report.analysis.count(category)
            ));
        }
    }

    if !report.contributors.is_empty() {
        out.push_str("\n## \u{1f465} Top Contributors\n\n");
        out.push_str("| Name | Commits | First | Last |\n");
        out.push_str("| --- | --- | --- | --- |\n");
        for contributor in report.contributors.iter().take(CONTRIBUTOR_LIMIT) {
            out.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                contributor.name,
                contributor.commit_count,
                contributor.first_commit.with_timezone(&Local).format("%Y-%m-%d"),
                contributor.last_commit.with_timezone(&Local).format("%Y-%m-%d")
            ));
        }
    }

    if let Some(day) = report.temporal.busiest_day() {
        out.push_str("\n## \u{1f552} Productivity\n\n");
        out.push_str(&format!("Busiest day: **{}**.", DAY_NAMES[day]));
        if let Some(hour) = report.temporal.busiest_hour() {
            out.push_str(&format!(" Busiest hour: **{hour:02}:00**."));
        }
        out.push('\n');
    }

    if !report.temporal.vocabulary.is_empty() {
        let terms: Vec<&str> = report
            .temporal
            .vocabulary
            .iter()
            .take(VOCABULARY_DISPLAY)
            .map(|t| t.term.as_str())
            .collect();
        out.push_str("\n## \u{1f4ac} Vocabulary\n\n");
        out.push_str(&format!("{}\n", terms.join(", ")));
    }

    if !report.milestones.is_empty() {
        out.push_str("\n## \u{1f3c6} Key Milestones\n\n");
        for milestone in &report.milestones {
            out.push_str(&format!(
                "- {} **{}** ({})\n",
                milestone.icon,
                milestone.title,
                milestone.date.with_timezone(&Local).format("%Y-%m-%d")
            ));
        }
    }

    out
}

// ============================================================================
// Tests
// ============================================================================
