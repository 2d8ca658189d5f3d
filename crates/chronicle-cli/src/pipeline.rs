// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! The end-to-end analysis pipeline
//!
//! One run reads a repository snapshot (through the cache when possible),
//! pushes it through classification, temporal aggregation, contributor
//! indexing, and milestone detection, then composes the narrative. Every
//! stage consumes the immutable output of the previous one; the cache is
//! the only state that outlives a run.

use std::path::Path;

use chronicle_analysis::{
    ActivityMatrix, AnalysisReport, ContributorStats, Milestone, aggregate, classify,
    detect_milestones, index_contributors,
};
use chronicle_git::{GitRepo, HistoryError, LogOptions};
use chronicle_story::{Picker, StoryInput, compose};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cache::HistoryCache;

/// Everything one pipeline run produces
///
/// The same report backs all output formats; renderers pick the parts
/// they need.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineReport {
    /// Display name of the repository (workdir basename), when known
    pub repo_name: Option<String>,
    /// Commits the run analyzed
    pub total_commits: usize,
    /// Branches known to the repository
    pub branch_count: usize,
    /// Tags known to the repository
    pub tag_count: usize,
    /// True when the snapshot came from the cache instead of a log walk
    pub cache_hit: bool,
    /// Per-category counts and the classified commits
    pub analysis: AnalysisReport,
    /// Day-by-hour activity grid and message vocabulary
    pub temporal: ActivityMatrix,
    /// Authors ranked by commit count
    pub contributors: Vec<ContributorStats>,
    /// Landmark events, ascending by date
    pub milestones: Vec<Milestone>,
    /// The composed story, absent when there is nothing to tell
    pub narrative: Option<String>,
}

/// Run the whole pipeline against one repository
///
/// The snapshot is fetched from the cache when the repository head and
/// query options match a stored fingerprint; otherwise the log is read and
/// the result cached. A repository with no commits yet produces an empty
/// report without touching the cache.
///
/// # Errors
///
/// Returns an error when the path is not a repository or the log walk
/// fails. Cache problems never surface here.
pub fn run_pipeline(
    repo_path: &Path,
    options: &LogOptions,
    cache: &mut HistoryCache,
    picker: &mut dyn Picker,
) -> Result<PipelineReport, HistoryError> {
    let repo = GitRepo::open(repo_path)?;
    let repo_name = repo
        .workdir()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned());

    let Some(head) = repo.head_revision()? else {
        info!("repository has no commits yet, producing an empty report");
        let branches = repo.branch_names()?;
        let tags = repo.tag_names()?;
        return Ok(PipelineReport {
            repo_name,
            total_commits: 0,
            branch_count: branches.len(),
            tag_count: tags.len(),
            cache_hit: false,
            analysis: classify(&[]),
            temporal: ActivityMatrix::default(),
            contributors: Vec::new(),
            milestones: Vec::new(),
            narrative: None,
        });
    };

    let fingerprint = format!("{head}:{}", options.cache_key());
    let (snapshot, cache_hit) = match cache.get(&fingerprint) {
        Some(snapshot) => {
            debug!("snapshot cache hit");
            (snapshot.clone(), true)
        }
        None => {
            debug!("snapshot cache miss, reading log");
            let snapshot = repo.read_log(options)?;
            cache.put(fingerprint, snapshot.clone());
            (snapshot, false)
        }
    };

    let analysis = classify(&snapshot.commits);
    let temporal = aggregate(&snapshot.commits);
    let contributors = index_contributors(&snapshot.commits);
    let milestones = detect_milestones(&snapshot.commits, &snapshot.tags);

    let narrative = compose(
        &StoryInput {
            repo_name: repo_name.as_deref(),
            commits: &analysis.commits,
            milestones: &milestones,
        },
        picker,
    );

    info!(
        commits = snapshot.total_commits,
        cache_hit, "pipeline complete"
    );

    Ok(PipelineReport {
        repo_name,
        total_commits: snapshot.total_commits,
        branch_count: snapshot.branches.len(),
        tag_count: snapshot.tags.len(),
        cache_hit,
        analysis,
        temporal,
        contributors,
        milestones,
        narrative,
    })
}
