//! Percentile Computation

/// Compute a single percentile from samples
///
/// Uses linear interpolation between nearest ranks.
///
/// # Examples
///
/// ```
/// # use sortbench_stats::compute_percentile;
/// let samples = vec![1.0, 2.0, 3.0, 4.0, 5.0];
/// assert_eq!(compute_percentile(&samples, 50.0), 3.0);
/// ```
pub fn compute_percentile(samples: &[f64], percentile: f64) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }

    if samples.len() == 1 {
        return samples[0];
    }

    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n = sorted.len();
    let p = percentile.clamp(0.0, 100.0) / 100.0;

    let rank = p * (n - 1) as f64;
    let lower_idx = rank.floor() as usize;
    let upper_idx = (lower_idx + 1).min(n - 1);
    let fraction = rank - lower_idx as f64;

    sorted[lower_idx] + fraction * (sorted[upper_idx] - sorted[lower_idx])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median() {
        let samples = vec![5.0, 1.0, 4.0, 2.0, 3.0];
        assert!((compute_percentile(&samples, 50.0) - 3.0).abs() < 0.01);
    }

    #[test]
    fn test_interpolates_even_count() {
        let samples = vec![10.0, 20.0];
        assert!((compute_percentile(&samples, 50.0) - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_extreme_percentiles() {
        let samples: Vec<f64> = (1..=1000).map(|x| x as f64).collect();
        let p99 = compute_percentile(&samples, 99.0);
        assert!(p99 > 985.0 && p99 < 995.0);
        assert_eq!(compute_percentile(&samples, 100.0), 1000.0);
        assert_eq!(compute_percentile(&samples, 150.0), 1000.0);
    }

    #[test]
    fn test_single_and_empty() {
        assert!((compute_percentile(&[42.0], 90.0) - 42.0).abs() < f64::EPSILON);
        assert!((compute_percentile(&[], 50.0) - 0.0).abs() < f64::EPSILON);
    }
}
