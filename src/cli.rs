//! CLI argument parsing for shrinkage
//!
//! A single operation, so no subcommands: flags tune the sampling
//! budget, shuffle seed, encoder, and output format.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Shrinkage - estimates how compressible a source tree is
#[derive(Parser, Debug)]
#[command(name = "shrinkage")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to estimate (defaults to the current directory)
    pub root: Option<PathBuf>,

    /// Sampling time budget in milliseconds
    #[arg(long, default_value_t = shrinkage_core::config::DEFAULT_BUDGET_MS)]
    pub budget_ms: u64,

    /// Shuffle seed (a fixed default keeps runs comparable)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Insert this byte value between concatenated files
    #[arg(long)]
    pub separator: Option<u8>,

    /// zstd compression level (defaults to the maximum)
    #[arg(long)]
    pub level: Option<i32>,

    /// zstd worker threads (0 disables multithreaded compression)
    #[arg(long, default_value_t = shrinkage_core::config::DEFAULT_WORKERS)]
    pub workers: u32,

    /// Content-cache capacity in bytes
    #[arg(long, default_value_t = shrinkage_core::config::DEFAULT_CACHE_CAPACITY)]
    pub cache_capacity: u64,

    /// Output format
    #[arg(long, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress per-file notices and warnings
    #[arg(long, short)]
    pub quiet: bool,

    /// Show per-file inclusion notices and per-round samples
    #[arg(long, short)]
    pub verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable report lines
    Human,
    /// Single JSON object
    Json,
}

impl Cli {
    /// Build the estimator configuration from the parsed flags.
    pub fn estimator_config(&self) -> shrinkage_core::EstimatorConfig {
        let defaults = shrinkage_core::EstimatorConfig::default();
        shrinkage_core::EstimatorConfig {
            budget_ms: self.budget_ms,
            seed: self.seed.unwrap_or(defaults.seed),
            separator: self.separator,
            level: self.level.unwrap_or(defaults.level),
            workers: self.workers,
            cache_capacity: self.cache_capacity,
        }
    }
}
