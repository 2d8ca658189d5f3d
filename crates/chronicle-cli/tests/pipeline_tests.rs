// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! End-to-end pipeline tests
//!
//! These tests build small scratch repositories with git2 and run the full
//! pipeline against them, so the assertions cover ingestion, analysis,
//! caching, and composition together.

use chronicle_analysis::{CommitCategory, MilestoneKind};
use chronicle_cli::cache::HistoryCache;
use chronicle_cli::pipeline::{PipelineReport, run_pipeline};
use chronicle_git::{HistoryError, LogOptions};
use chronicle_story::SeededPicker;
use git2::{Repository, Signature, Time};
use similar_asserts::assert_eq;
use std::path::Path;
use tempfile::TempDir;

/// Create an empty repository in a fresh temp directory
fn init_repo() -> (TempDir, Repository) {
    let dir = TempDir::new().expect("create temp dir");
    let repo = Repository::init(dir.path()).expect("init repository");
    (dir, repo)
}

/// Write a file and commit it with a fixed author and timestamp
fn commit_file(
    repo: &Repository,
    name: &str,
    content: &str,
    message: &str,
    epoch_secs: i64,
) -> git2::Oid {
    let workdir = repo.workdir().expect("workdir");
    std::fs::write(workdir.join(name), content).expect("write file");

    let mut index = repo.index().expect("index");
    index.add_path(Path::new(name)).expect("add path");
    index.write().expect("write index");
    let tree_id = index.write_tree().expect("write tree");
    let tree = repo.find_tree(tree_id).expect("find tree");

    let sig = Signature::new("Ada Lovelace", "ada@example.com", &Time::new(epoch_secs, 0))
        .expect("signature");

    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .expect("commit")
}

// 2024-03-11T12:00:00Z and the two following days, same hour; midday
// mid-month keeps the local calendar month stable in every timezone
const DAY_ONE: i64 = 1_710_158_400;
const DAY_TWO: i64 = 1_710_244_800;
const DAY_THREE: i64 = 1_710_331_200;

/// The three-commit fixture: feat, fix, docs on consecutive days, the
/// last one tagged v1.0.0
fn seed_history(repo: &Repository) -> (git2::Oid, git2::Oid) {
    let first = commit_file(repo, "a.txt", "one", "feat: initial commit", DAY_ONE);
    commit_file(repo, "b.txt", "two", "fix: critical bug", DAY_TWO);
    let tagged = commit_file(repo, "c.txt", "three", "docs: update readme", DAY_THREE);

    let object = repo.find_object(tagged, None).expect("find object");
    repo.tag_lightweight("v1.0.0", &object, false).expect("tag");

    (first, tagged)
}

#[test]
fn test_pipeline_classifies_and_detects_milestones() {
    let (dir, repo) = init_repo();
    let (first, tagged) = seed_history(&repo);

    let mut cache = HistoryCache::ephemeral();
    let mut picker = SeededPicker::new(42);
    let report =
        run_pipeline(dir.path(), &LogOptions::default(), &mut cache, &mut picker).expect("run");

    assert_eq!(report.total_commits, 3);
    assert_eq!(report.analysis.count(CommitCategory::Feat), 1);
    assert_eq!(report.analysis.count(CommitCategory::Fix), 1);
    assert_eq!(report.analysis.count(CommitCategory::Docs), 1);
    assert_eq!(report.branch_count, 1);
    assert_eq!(report.tag_count, 1);

    assert_eq!(report.milestones.len(), 2);
    assert_eq!(report.milestones[0].kind, MilestoneKind::Inception);
    assert_eq!(report.milestones[0].hash, first.to_string());
    assert_eq!(report.milestones[1].kind, MilestoneKind::Release);
    assert_eq!(report.milestones[1].title, "Release v1.0.0");
    assert_eq!(report.milestones[1].hash, tagged.to_string());
}

#[test]
fn test_pipeline_produces_a_narrative() {
    let (dir, repo) = init_repo();
    seed_history(&repo);

    let mut cache = HistoryCache::ephemeral();
    let mut picker = SeededPicker::new(42);
    let report =
        run_pipeline(dir.path(), &LogOptions::default(), &mut cache, &mut picker).expect("run");

    let narrative = report.narrative.expect("narrative for non-empty history");
    assert!(narrative.contains("## Prologue"));
    assert!(narrative.contains("March 2024"));
    assert!(narrative.contains("**3 commits**"));
    assert!(narrative.contains("# Epilogue"));
}

#[test]
fn test_pipeline_reuses_the_cached_snapshot() {
    let (dir, repo) = init_repo();
    seed_history(&repo);

    let mut cache = HistoryCache::ephemeral();

    let mut picker = SeededPicker::new(42);
    let fresh =
        run_pipeline(dir.path(), &LogOptions::default(), &mut cache, &mut picker).expect("run");
    assert!(!fresh.cache_hit);
    assert_eq!(cache.len(), 1);

    let mut picker = SeededPicker::new(42);
    let cached =
        run_pipeline(dir.path(), &LogOptions::default(), &mut cache, &mut picker).expect("run");
    assert!(cached.cache_hit);
    assert_eq!(cache.len(), 1);

    // A fresh picker with the same seed makes the runs fully comparable
    assert_eq!(fresh.analysis, cached.analysis);
    assert_eq!(fresh.narrative, cached.narrative);
}

#[test]
fn test_pipeline_new_commit_invalidates_the_fingerprint() {
    let (dir, repo) = init_repo();
    seed_history(&repo);

    let mut cache = HistoryCache::ephemeral();
    let mut picker = SeededPicker::new(42);
    run_pipeline(dir.path(), &LogOptions::default(), &mut cache, &mut picker).expect("run");

    commit_file(&repo, "d.txt", "four", "feat: add export", DAY_THREE + 86_400);

    let mut picker = SeededPicker::new(42);
    let report =
        run_pipeline(dir.path(), &LogOptions::default(), &mut cache, &mut picker).expect("run");

    assert!(!report.cache_hit, "a moved head must miss the cache");
    assert_eq!(report.total_commits, 4);
    assert_eq!(cache.len(), 2);
}

#[test]
fn test_pipeline_distinct_options_are_cached_separately() {
    let (dir, repo) = init_repo();
    seed_history(&repo);

    let mut cache = HistoryCache::ephemeral();

    let mut picker = SeededPicker::new(42);
    let all = run_pipeline(dir.path(), &LogOptions::default(), &mut cache, &mut picker)
        .expect("run");

    let mut picker = SeededPicker::new(42);
    let limited =
        run_pipeline(dir.path(), &LogOptions::latest(1), &mut cache, &mut picker).expect("run");

    assert!(!limited.cache_hit, "different options mean a different key");
    assert_eq!(all.total_commits, 3);
    assert_eq!(limited.total_commits, 1);
    assert_eq!(cache.len(), 2);
}

#[test]
fn test_pipeline_empty_repository_yields_empty_report() {
    let (dir, _repo) = init_repo();

    let mut cache = HistoryCache::ephemeral();
    let mut picker = SeededPicker::new(42);
    let report =
        run_pipeline(dir.path(), &LogOptions::default(), &mut cache, &mut picker).expect("run");

    assert_eq!(report.total_commits, 0);
    assert_eq!(report.analysis.total(), 0);
    assert!(report.contributors.is_empty());
    assert!(report.milestones.is_empty());
    assert!(report.narrative.is_none());
    assert!(!report.cache_hit);
    assert!(cache.is_empty(), "unborn head never touches the cache");
}

#[test]
fn test_pipeline_rejects_a_plain_directory() {
    let dir = TempDir::new().expect("create temp dir");

    let mut cache = HistoryCache::ephemeral();
    let mut picker = SeededPicker::new(42);
    let result = run_pipeline(dir.path(), &LogOptions::default(), &mut cache, &mut picker);

    assert!(matches!(result, Err(HistoryError::NotARepository { .. })));
}

#[test]
fn test_pipeline_applies_the_commit_limit() {
    let (dir, repo) = init_repo();
    seed_history(&repo);

    let mut cache = HistoryCache::ephemeral();
    let mut picker = SeededPicker::new(42);
    let report =
        run_pipeline(dir.path(), &LogOptions::latest(2), &mut cache, &mut picker).expect("run");

    // The two newest commits are the fix and the docs change
    assert_eq!(report.total_commits, 2);
    assert_eq!(report.analysis.count(CommitCategory::Feat), 0);
    assert_eq!(report.analysis.count(CommitCategory::Fix), 1);
    assert_eq!(report.analysis.count(CommitCategory::Docs), 1);
}

#[test]
fn test_pipeline_narrative_is_reproducible_under_a_seed() {
    let (dir, repo) = init_repo();
    seed_history(&repo);

    let mut cache_a = HistoryCache::ephemeral();
    let mut picker_a = SeededPicker::new(7);
    let run_a =
        run_pipeline(dir.path(), &LogOptions::default(), &mut cache_a, &mut picker_a).expect("run");

    let mut cache_b = HistoryCache::ephemeral();
    let mut picker_b = SeededPicker::new(7);
    let run_b =
        run_pipeline(dir.path(), &LogOptions::default(), &mut cache_b, &mut picker_b).expect("run");

    assert_eq!(run_a.narrative, run_b.narrative);
}

#[test]
fn test_pipeline_report_roundtrips_through_json() {
    let (dir, repo) = init_repo();
    seed_history(&repo);

    let mut cache = HistoryCache::ephemeral();
    let mut picker = SeededPicker::new(42);
    let report =
        run_pipeline(dir.path(), &LogOptions::default(), &mut cache, &mut picker).expect("run");

    let json = serde_json::to_string(&report).expect("serialize");
    let back: PipelineReport = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, report);
}

#[test]
fn test_pipeline_cache_survives_a_restart() {
    let (dir, repo) = init_repo();
    seed_history(&repo);
    let cache_dir = TempDir::new().expect("create temp dir");
    let cache_path = cache_dir.path().join("history.json");

    let mut cache = HistoryCache::load(&cache_path);
    let mut picker = SeededPicker::new(42);
    run_pipeline(dir.path(), &LogOptions::default(), &mut cache, &mut picker).expect("run");
    cache.persist();

    // A new process would load the same file and hit immediately
    let mut reloaded = HistoryCache::load(&cache_path);
    let mut picker = SeededPicker::new(42);
    let report = run_pipeline(dir.path(), &LogOptions::default(), &mut reloaded, &mut picker)
        .expect("run");

    assert!(report.cache_hit);
}
