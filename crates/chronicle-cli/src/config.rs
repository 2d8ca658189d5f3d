//! Configuration for the chronicle command-line tool
//!
//! This module provides the clap-derived argument surface, the cache and
//! repository path resolution, and validation of flag combinations.

use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use chronicle_git::LogOptions;
use clap::{Parser, Subcommand, ValueEnum};

/// Chronicle - turn a git log into a story or a statistics report
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "chronicle")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the git repository to analyze
    ///
    /// Defaults to the current working directory.
    #[arg(short, long, global = true, env = "CHRONICLE_REPO")]
    pub repo: Option<PathBuf>,

    /// Only include commits at or after this date
    ///
    /// Accepts YYYY-MM-DD (midnight UTC) or a full RFC 3339 timestamp.
    #[arg(long, global = true)]
    pub since: Option<String>,

    /// Only include commits at or before this date
    ///
    /// Accepts YYYY-MM-DD (midnight UTC) or a full RFC 3339 timestamp.
    #[arg(long, global = true)]
    pub until: Option<String>,

    /// Start of a revision range (exclusive); requires --to
    #[arg(long, global = true)]
    pub from: Option<String>,

    /// End of a revision range (inclusive); requires --from
    #[arg(long, global = true)]
    pub to: Option<String>,

    /// Maximum number of commits to read
    #[arg(short = 'n', long, global = true)]
    pub limit: Option<usize>,

    /// Seed for template selection, making the output reproducible
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Skip the snapshot cache entirely for this run
    #[arg(long, global = true, default_value = "false")]
    pub no_cache: bool,

    /// Path to the snapshot cache file
    ///
    /// Defaults to chronicle/history.json under the platform cache
    /// directory.
    #[arg(long, global = true, env = "CHRONICLE_CACHE")]
    pub cache_file: Option<PathBuf>,

    /// Write the report to a file instead of stdout
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Output format
    ///
    /// Defaults to markdown for story and text for stats.
    #[arg(short, long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Enable verbose logging (debug level)
    ///
    /// Logs are written to stderr so piped report output stays clean.
    #[arg(short, long, global = true, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    ///
    /// Only errors and warnings will be logged.
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Generate a narrative story from the commit history
    ///
    /// Reads the log, classifies every commit, detects milestones, and
    /// composes a month-by-month story in markdown.
    Story,

    /// Summarize the commit history as a statistics report
    ///
    /// Shows category totals, top contributors, the busiest day and hour,
    /// recurring vocabulary, and milestones.
    Stats,
}

/// How a report is rendered
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain text for the terminal
    Text,
    /// Markdown suitable for files and viewers
    Markdown,
    /// The full pipeline report as JSON
    Json,
}

impl Config {
    /// Get the repository path, using the current directory as default
    #[must_use]
    pub fn repo_path(&self) -> PathBuf {
        self.repo
            .clone()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Get the cache file path, using a default if not specified
    ///
    /// Default location is platform-specific:
    /// - macOS: ~/Library/Caches/chronicle/history.json
    /// - Linux: ~/.cache/chronicle/history.json
    /// - Windows: %LOCALAPPDATA%\chronicle\history.json
    #[must_use]
    pub fn cache_path(&self) -> PathBuf {
        self.cache_file.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("chronicle")
                .join("history.json")
        })
    }

    /// Build the log query options from the date and range flags
    ///
    /// # Errors
    ///
    /// Returns an error if a date flag cannot be parsed.
    pub fn log_options(&self) -> Result<LogOptions, ConfigError> {
        let mut options = LogOptions::default();
        if let Some(value) = &self.since {
            options.since = Some(parse_date(value)?);
        }
        if let Some(value) = &self.until {
            options.until = Some(parse_date(value)?);
        }
        options.from = self.from.clone();
        options.to = self.to.clone();
        options.limit = self.limit;
        Ok(options)
    }

    /// The format to render with, falling back to the subcommand default
    #[must_use]
    pub fn output_format(&self) -> OutputFormat {
        self.format.unwrap_or(match self.command {
            Some(Command::Stats) => OutputFormat::Text,
            _ => OutputFormat::Markdown,
        })
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The repository path is specified but doesn't exist
    /// - Only one half of the --from/--to range is given
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref repo) = self.repo {
            if !repo.exists() {
                return Err(ConfigError::RepoNotFound(repo.clone()));
            }
            if !repo.is_dir() {
                return Err(ConfigError::RepoNotDirectory(repo.clone()));
            }
        }

        if self.from.is_some() != self.to.is_some() {
            return Err(ConfigError::IncompleteRange);
        }

        Ok(())
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

/// Parse a date flag as RFC 3339, or as a plain date at midnight UTC
fn parse_date(value: &str) -> Result<DateTime<Utc>, ConfigError> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(timestamp.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| ConfigError::InvalidDate(value.to_string(), e))?;
    Ok(date.and_time(NaiveTime::MIN).and_utc())
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Repository path not found
    #[error("Repository path not found: {0}")]
    RepoNotFound(PathBuf),

    /// Repository path is not a directory
    #[error("Repository path is not a directory: {0}")]
    RepoNotDirectory(PathBuf),

    /// A date flag could not be parsed
    #[error("Invalid date '{0}': {1} (expected YYYY-MM-DD or RFC 3339)")]
    InvalidDate(String, chrono::ParseError),

    /// Only one half of a revision range was given
    #[error("--from and --to must be given together")]
    IncompleteRange,
}
