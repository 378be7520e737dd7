//! Shrinkage - repository compressibility estimator
//!
//! Walks a directory, keeps the valid-text files that survive
//! gitignore-style rules, and repeatedly compresses random shufflings
//! of their concatenation to report mean compressed size with standard
//! deviation alongside the raw total.

mod cli;
mod output;

use std::env;
use std::process::ExitCode;

use clap::Parser;

use cli::{Cli, OutputFormat};
use shrinkage_core::error::ExitCode as ShrinkageExitCode;
use shrinkage_core::{logging, ShrinkageError};

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init_tracing(cli.verbose, cli.quiet) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    match run(&cli) {
        Ok(()) => ExitCode::from(ShrinkageExitCode::Success as u8),
        Err(e) => {
            if !cli.quiet {
                eprintln!("error: {}", e);
            }
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn run(cli: &Cli) -> shrinkage_core::Result<()> {
    let root = match &cli.root {
        Some(root) => root.clone(),
        None => env::current_dir()?,
    };
    let config = cli.estimator_config();

    tracing::debug!(root = %root.display(), ?config, "starting estimation");
    let result = shrinkage_core::estimate(&root, &config)?;

    match cli.format {
        OutputFormat::Human => output::render_human(&result),
        OutputFormat::Json => {
            output::render_json(&result).map_err(|e| ShrinkageError::Other(e.to_string()))?;
        }
    }

    Ok(())
}
