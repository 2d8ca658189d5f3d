// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! chronicle: turn a repository's commit log into a story
//!
//! This binary reads a git repository's history, classifies and aggregates
//! it, and renders either a narrative markdown story or a statistics
//! report.

use std::process;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use tracing::debug;

use chronicle_cli::cache::HistoryCache;
use chronicle_cli::config::{Command, Config};
use chronicle_cli::pipeline::run_pipeline;
use chronicle_cli::report::{render_stats, render_story, write_output};
use chronicle_story::{Picker, SeededPicker, ThreadPicker};

fn main() {
    let config = Config::parse();

    // Logs go to stderr; stdout is reserved for the report itself
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&config) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(config: &Config) -> anyhow::Result<()> {
    let Some(command) = &config.command else {
        Config::command().print_help().context("print usage")?;
        return Ok(());
    };

    config.validate()?;
    let options = config.log_options()?;

    let mut cache = if config.no_cache {
        debug!("snapshot cache disabled for this run");
        HistoryCache::ephemeral()
    } else {
        HistoryCache::load(config.cache_path())
    };

    let mut picker: Box<dyn Picker> = match config.seed {
        Some(seed) => Box::new(SeededPicker::new(seed)),
        None => Box::new(ThreadPicker),
    };

    let report = run_pipeline(&config.repo_path(), &options, &mut cache, picker.as_mut())?;
    cache.persist();

    let format = config.output_format();
    let rendered = match command {
        Command::Story => render_story(&report, format)?,
        Command::Stats => render_stats(&report, format)?,
    };
    write_output(&rendered, config.output.as_deref()).context("failed to write the report")?;

    Ok(())
}
