//! Sample aggregation: mean and population standard deviation.

use serde::Serialize;

/// Final report for one estimation run
#[derive(Debug, Clone, Serialize)]
pub struct EstimationResult {
    /// Sum of the byte lengths of all eligible files
    pub uncompressed_size: u64,
    /// One compressed size per sampling round, in round order
    pub samples: Vec<u64>,
    pub mean: f64,
    pub stddev: f64,
}

/// Mean and population standard deviation (divide by n, not n-1) of the
/// samples. Callers guarantee `samples` is non-empty; the sampling loop
/// always produces at least one round.
pub fn aggregate(samples: &[u64]) -> (f64, f64) {
    debug_assert!(!samples.is_empty());
    let n = samples.len() as f64;
    let mean = samples.iter().map(|&s| s as f64).sum::<f64>() / n;
    let variance = samples
        .iter()
        .map(|&s| {
            let delta = s as f64 - mean;
            delta * delta
        })
        .sum::<f64>()
        / n;
    (mean, variance.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_sample_has_zero_stddev() {
        let (mean, stddev) = aggregate(&[1234]);
        assert_eq!(mean, 1234.0);
        assert_eq!(stddev, 0.0);
    }

    #[test]
    fn identical_samples_have_zero_stddev() {
        let (mean, stddev) = aggregate(&[50, 50, 50, 50]);
        assert_eq!(mean, 50.0);
        assert_eq!(stddev, 0.0);
    }

    #[test]
    fn population_stddev_divides_by_n() {
        // classic textbook set: mean 5, population stddev 2
        let (mean, stddev) = aggregate(&[2, 4, 4, 4, 5, 5, 7, 9]);
        assert_eq!(mean, 5.0);
        assert_eq!(stddev, 2.0);
    }

    #[test]
    fn mean_of_two_samples() {
        let (mean, stddev) = aggregate(&[10, 20]);
        assert_eq!(mean, 15.0);
        assert_eq!(stddev, 5.0);
    }
}
