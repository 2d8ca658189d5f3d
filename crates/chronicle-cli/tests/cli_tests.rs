//! Command-line parsing tests
//!
//! These exercise the clap surface the way a shell would, including global
//! flags on either side of the subcommand.

use chronicle_cli::config::{Command, Config, OutputFormat};
use clap::Parser;
use std::path::PathBuf;

#[test]
fn test_parse_story_defaults() {
    let config = Config::try_parse_from(["chronicle", "story"]).expect("parse");
    assert!(matches!(config.command, Some(Command::Story)));
    assert!(config.since.is_none());
    assert!(config.until.is_none());
    assert!(config.limit.is_none());
    assert!(config.seed.is_none());
    assert!(!config.no_cache);
    assert_eq!(config.output_format(), OutputFormat::Markdown);
}

#[test]
fn test_parse_stats_defaults_to_text() {
    let config = Config::try_parse_from(["chronicle", "stats"]).expect("parse");
    assert!(matches!(config.command, Some(Command::Stats)));
    assert_eq!(config.output_format(), OutputFormat::Text);
}

#[test]
fn test_parse_global_flags_after_the_subcommand() {
    let config = Config::try_parse_from([
        "chronicle", "stats", "--seed", "7", "-n", "25", "--no-cache",
    ])
    .expect("parse");

    assert!(matches!(config.command, Some(Command::Stats)));
    assert_eq!(config.seed, Some(7));
    assert_eq!(config.limit, Some(25));
    assert!(config.no_cache);
}

#[test]
fn test_parse_global_flags_before_the_subcommand() {
    let config =
        Config::try_parse_from(["chronicle", "--seed", "9", "-v", "story"]).expect("parse");

    assert!(matches!(config.command, Some(Command::Story)));
    assert_eq!(config.seed, Some(9));
    assert!(config.verbose);
}

#[test]
fn test_parse_repo_flag() {
    let config =
        Config::try_parse_from(["chronicle", "story", "--repo", "/somewhere/else"]).expect("parse");
    assert_eq!(config.repo, Some(PathBuf::from("/somewhere/else")));
    assert_eq!(config.repo_path(), PathBuf::from("/somewhere/else"));
}

#[test]
fn test_parse_date_and_range_filters() {
    let config = Config::try_parse_from([
        "chronicle",
        "story",
        "--since",
        "2024-01-01",
        "--until",
        "2024-06-30",
        "--from",
        "v1.0.0",
        "--to",
        "HEAD",
    ])
    .expect("parse");

    assert!(config.validate().is_ok());
    let options = config.log_options().expect("log options");
    assert!(options.since.is_some());
    assert!(options.until.is_some());
    assert_eq!(options.from, Some("v1.0.0".to_string()));
    assert_eq!(options.to, Some("HEAD".to_string()));
}

#[test]
fn test_parse_output_and_cache_paths() {
    let config = Config::try_parse_from([
        "chronicle",
        "story",
        "--output",
        "story.md",
        "--cache-file",
        "/tmp/chronicle-test/cache.json",
    ])
    .expect("parse");

    assert_eq!(config.output, Some(PathBuf::from("story.md")));
    assert_eq!(
        config.cache_path(),
        PathBuf::from("/tmp/chronicle-test/cache.json")
    );
}

#[test]
fn test_parse_format_values() {
    for (value, expected) in [
        ("text", OutputFormat::Text),
        ("markdown", OutputFormat::Markdown),
        ("json", OutputFormat::Json),
    ] {
        let config =
            Config::try_parse_from(["chronicle", "stats", "--format", value]).expect("parse");
        assert_eq!(config.output_format(), expected);
    }
}

#[test]
fn test_parse_rejects_unknown_format() {
    let result = Config::try_parse_from(["chronicle", "stats", "--format", "html"]);
    assert!(result.is_err());
}

#[test]
fn test_parse_rejects_unknown_subcommand() {
    let result = Config::try_parse_from(["chronicle", "fable"]);
    assert!(result.is_err());
}

#[test]
fn test_parse_without_subcommand() {
    let config = Config::try_parse_from(["chronicle"]).expect("parse");
    assert!(config.command.is_none());
}

#[test]
fn test_parse_quiet_short_flag() {
    let config = Config::try_parse_from(["chronicle", "stats", "-q"]).expect("parse");
    assert!(config.quiet);
    assert!(!config.verbose);
}
