//! chronicle-cli library
//!
//! The command-line front of the pipeline: configuration, the bounded
//! snapshot cache, the pipeline driver, and report rendering. The binary
//! in `main.rs` is a thin shell over these modules.

pub mod cache;
pub mod config;
pub mod pipeline;
pub mod report;

pub use cache::{CACHE_CAPACITY, HistoryCache};
pub use config::{Command, Config, ConfigError, OutputFormat};
pub use pipeline::{PipelineReport, run_pipeline};
pub use report::{render_stats, render_story, write_output};
