use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Content-cache counters for structured logging.
///
/// Tracks hit/miss statistics and the bytes read through the cache so a
/// run can report how much of the tree was served from memory. All
/// operations are atomic and lock-free for minimal overhead.
#[derive(Debug, Default)]
pub struct ResourceMetrics {
    /// Cache hit count
    cache_hits: AtomicU64,
    /// Cache miss count
    cache_misses: AtomicU64,
    /// Total bytes read from disk (misses only)
    bytes_read: AtomicU64,
}

impl ResourceMetrics {
    /// Create a new ResourceMetrics instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a cache hit
    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a cache miss that read `bytes` from disk
    pub fn record_cache_miss(&self, bytes: u64) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
        self.bytes_read.fetch_add(bytes, Ordering::Relaxed);
    }

    /// Get cache hit count
    pub fn cache_hits(&self) -> u64 {
        self.cache_hits.load(Ordering::Relaxed)
    }

    /// Get cache miss count
    pub fn cache_misses(&self) -> u64 {
        self.cache_misses.load(Ordering::Relaxed)
    }

    /// Get total bytes read from disk
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read.load(Ordering::Relaxed)
    }

    /// Get cache hit rate as a percentage (0.0-100.0)
    pub fn cache_hit_rate(&self) -> f64 {
        let hits = self.cache_hits.load(Ordering::Relaxed);
        let misses = self.cache_misses.load(Ordering::Relaxed);
        let total = hits + misses;
        if total == 0 {
            0.0
        } else {
            (hits as f64 / total as f64) * 100.0
        }
    }
}

/// Initialize structured logging based on CLI arguments.
///
/// Default level shows per-file exclusion warnings and the run summary;
/// `verbose` adds per-file inclusion notices and per-round samples;
/// `quiet` drops everything below errors. `SHRINKAGE_LOG` (or
/// `RUST_LOG`) overrides all of it.
pub fn init_tracing(verbose: bool, quiet: bool) -> Result<(), Box<dyn std::error::Error>> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env("SHRINKAGE_LOG"))
        .unwrap_or_else(|_| {
            EnvFilter::new(format!("shrinkage={level},shrinkage_core={level}"))
        });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .try_init()?;

    Ok(())
}
