//! Summary Statistics
//!
//! All statistics are computed over every sample. No outlier trimming.

use crate::percentiles::compute_percentile;
use serde::Serialize;

/// Summary of a non-empty sample set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStatistics {
    /// Arithmetic mean
    pub mean: f64,
    /// 50th percentile
    pub median: f64,
    /// Sample standard deviation (n - 1)
    pub std_dev: f64,
    /// Smallest sample
    pub min: f64,
    /// Largest sample
    pub max: f64,
    /// 90th percentile
    pub p90: f64,
    /// 99th percentile
    pub p99: f64,
    /// Number of samples
    pub sample_count: usize,
}

impl SummaryStatistics {
    /// Coefficient of variation (relative stddev, percent)
    pub fn coefficient_of_variation(&self) -> f64 {
        if self.mean == 0.0 {
            0.0
        } else {
            (self.std_dev / self.mean) * 100.0
        }
    }
}

/// Compute summary statistics; `None` for an empty sample set.
pub fn compute_summary(samples: &[f64]) -> Option<SummaryStatistics> {
    if samples.is_empty() {
        return None;
    }

    let n = samples.len();
    let mean = samples.iter().sum::<f64>() / n as f64;

    let std_dev = if n < 2 {
        0.0
    } else {
        let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
        variance.sqrt()
    };

    let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
    let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    Some(SummaryStatistics {
        mean,
        median: compute_percentile(samples, 50.0),
        std_dev,
        min,
        max,
        p90: compute_percentile(samples, 90.0),
        p99: compute_percentile(samples, 99.0),
        sample_count: n,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_summary() {
        let summary = compute_summary(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();

        assert!((summary.mean - 3.0).abs() < 0.01);
        assert!((summary.median - 3.0).abs() < 0.01);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 5.0);
        assert_eq!(summary.sample_count, 5);
    }

    #[test]
    fn test_outlier_kept_in_mean() {
        let summary = compute_summary(&[1.0, 2.0, 3.0, 4.0, 5.0, 105.0]).unwrap();
        assert!((summary.mean - 20.0).abs() < f64::EPSILON);
        assert_eq!(summary.max, 105.0);
    }

    #[test]
    fn test_std_dev() {
        let summary = compute_summary(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        // Sample (n - 1) standard deviation
        assert!((summary.std_dev - 2.138).abs() < 0.001);
    }

    #[test]
    fn test_constant_samples() {
        let summary = compute_summary(&[100.0; 5]).unwrap();
        assert!((summary.coefficient_of_variation() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_samples() {
        assert!(compute_summary(&[]).is_none());
    }
}
