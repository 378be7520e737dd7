//! Run configuration for the estimator.
//!
//! Defaults reproduce the reference behavior: a 3 second sampling
//! budget, a fixed shuffle seed, no separator byte, maximum zstd
//! compression effort, and a 1 GiB content cache.

use crate::compress::max_compression_level;
use crate::shuffle::DEFAULT_SEED;

/// Default sampling time budget in milliseconds
pub const DEFAULT_BUDGET_MS: u64 = 3000;

/// Default content-cache capacity in bytes (1 GiB)
pub const DEFAULT_CACHE_CAPACITY: u64 = 1024 * 1024 * 1024;

/// Default zstd worker-thread count
pub const DEFAULT_WORKERS: u32 = 4;

/// Options controlling a single estimation run
#[derive(Debug, Clone)]
pub struct EstimatorConfig {
    /// Sampling time budget in milliseconds; the round that crosses it
    /// still completes
    pub budget_ms: u64,
    /// Seed for the shuffle generator
    pub seed: u64,
    /// Optional byte inserted between concatenated files
    pub separator: Option<u8>,
    /// zstd compression level
    pub level: i32,
    /// zstd internal worker threads (0 disables multithreading)
    pub workers: u32,
    /// Content-cache capacity in bytes
    pub cache_capacity: u64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            budget_ms: DEFAULT_BUDGET_MS,
            seed: DEFAULT_SEED,
            separator: None,
            level: max_compression_level(),
            workers: DEFAULT_WORKERS,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_behavior() {
        let config = EstimatorConfig::default();
        assert_eq!(config.budget_ms, 3000);
        assert_eq!(config.separator, None);
        assert_eq!(config.cache_capacity, 1024 * 1024 * 1024);
        assert!(config.level >= 19, "default level should be the maximum");
    }
}
