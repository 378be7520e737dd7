//! Time-boxed sampling loop and the top-level estimation entry point.
//!
//! Rounds are strictly sequential: shuffle, compress end-to-end, record
//! the sample, then check the clock. The exit condition is evaluated
//! only after a completed round, so the round that crosses the budget
//! is always included and at least one round always runs, even with a
//! zero budget or an empty file set.

use std::path::Path;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::cache::ContentCache;
use crate::compress::StreamCompressor;
use crate::config::EstimatorConfig;
use crate::corpus::{self, EligibleFile};
use crate::error::Result;
use crate::shuffle::Shuffler;
use crate::stats::{self, EstimationResult};

/// Run one sampling round per shuffle until the budget elapses.
pub fn collect_samples(files: &[EligibleFile], config: &EstimatorConfig) -> Result<Vec<u64>> {
    let budget = Duration::from_millis(config.budget_ms);
    let mut shuffler = Shuffler::new(config.seed);
    let compressor = StreamCompressor::new(config);

    let start = Instant::now();
    let mut samples = Vec::new();
    loop {
        let mut permutation: Vec<&EligibleFile> = files.iter().collect();
        shuffler.shuffle(&mut permutation);
        let compressed = compressor.compress(&permutation)?;
        samples.push(compressed);
        debug!(
            round = samples.len(),
            compressed,
            elapsed = ?start.elapsed(),
            "sample recorded"
        );
        if start.elapsed() >= budget {
            break;
        }
    }
    Ok(samples)
}

/// Enumerate `root` and estimate its compressibility.
pub fn estimate(root: &Path, config: &EstimatorConfig) -> Result<EstimationResult> {
    let mut cache = ContentCache::new(config.cache_capacity);
    let corpus = corpus::collect(root, &mut cache)?;
    info!(
        files = corpus.files.len(),
        bytes = corpus.uncompressed_size,
        "enumerated eligible files"
    );

    let samples = collect_samples(&corpus.files, config)?;
    let (mean, stddev) = stats::aggregate(&samples);
    info!(rounds = samples.len(), mean, stddev, "sampling finished");

    Ok(EstimationResult {
        uncompressed_size: corpus.uncompressed_size,
        samples,
        mean,
        stddev,
    })
}
