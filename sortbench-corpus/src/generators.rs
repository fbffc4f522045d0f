//! Sequence Generators
//!
//! One generator per test class. Shapes are deterministic, values come from the
//! caller's `Rng`.

use crate::TestClass;
use rand::Rng;
use rand::seq::index;
use std::ops::RangeInclusive;
use thiserror::Error;

/// Range the single outlier of [`random_with_outliers`] is drawn from
pub const OUTLIER_RANGE: RangeInclusive<i64> = 100_000..=1_000_000;

/// Errors raised for generator parameters that cannot be satisfied
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// Fewer than `n` distinct values exist below `upper`
    #[error("Sample space too small: cannot draw {n} distinct values from [1, {upper})")]
    SampleSpaceTooSmall {
        /// Requested length
        n: usize,
        /// Exclusive upper bound of the sample space
        upper: u64,
    },

    /// `n * scale` does not fit the value type
    #[error("Sample space overflows: {n} * {scale}")]
    Overflow {
        /// Requested length
        n: usize,
        /// Requested scale
        scale: u64,
    },

    /// Lower parameter bound exceeds the upper one
    #[error("Invalid parameter range: {min}..={max}")]
    InvalidRange {
        /// Inclusive lower bound
        min: u64,
        /// Inclusive upper bound
        max: u64,
    },
}

/// Ascending run `[start, start + n)`.
pub fn sorted(n: usize, start: i64) -> Vec<i64> {
    (0..n as i64).map(|offset| start + offset).collect()
}

/// Descending run from `start + n` down to `start + 1`.
pub fn reverse_sorted(n: usize, start: i64) -> Vec<i64> {
    (0..n as i64).map(|offset| start + n as i64 - offset).collect()
}

/// Sequence of length `n` whose first `k` positions hold `start + position`
/// and whose remaining positions are independent draws from `[start, start + n)`.
///
/// `k >= n` yields a fully sorted run, `k == 0` a fully random sequence.
pub fn partially_sorted<R: Rng + ?Sized>(rng: &mut R, k: usize, n: usize, start: i64) -> Vec<i64> {
    let upper = start + n as i64;
    (0..n)
        .map(|position| {
            if position < k {
                start + position as i64
            } else {
                rng.gen_range(start..upper)
            }
        })
        .collect()
}

/// `n` pairwise distinct integers drawn without replacement from `[1, n * scale)`.
///
/// Fails when the range holds fewer than `n` values, i.e. `n >= n * scale`
/// for any non-empty request. `scale` must therefore be at least 2.
pub fn random<R: Rng + ?Sized>(
    rng: &mut R,
    n: usize,
    scale: u64,
) -> Result<Vec<i64>, GenerationError> {
    if n == 0 {
        return Ok(Vec::new());
    }

    let upper = (n as u64)
        .checked_mul(scale)
        .filter(|upper| *upper <= i64::MAX as u64)
        .ok_or(GenerationError::Overflow { n, scale })?;

    if n as u64 >= upper {
        return Err(GenerationError::SampleSpaceTooSmall { n, upper });
    }

    // [1, upper) holds upper - 1 values
    let population = usize::try_from(upper - 1).map_err(|_| GenerationError::Overflow { n, scale })?;

    Ok(index::sample(rng, population, n)
        .into_iter()
        .map(|i| i as i64 + 1)
        .collect())
}

/// [`random`] followed by one value drawn from [`OUTLIER_RANGE`].
pub fn random_with_outliers<R: Rng + ?Sized>(
    rng: &mut R,
    n: usize,
    scale: u64,
) -> Result<Vec<i64>, GenerationError> {
    let mut values = random(rng, n, scale)?;
    values.push(rng.gen_range(OUTLIER_RANGE));
    Ok(values)
}

/// Parameters for one generated input.
///
/// Not every class reads every field: `start` drives the run-shaped classes,
/// `scale` the random ones and `k` only the partially sorted one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorpusParams {
    /// Sequence length
    pub n: usize,
    /// First value of sorted runs
    pub start: i64,
    /// Sample-space multiplier for random classes
    pub scale: u64,
    /// Sorted prefix length for partially sorted inputs
    pub k: usize,
}

impl CorpusParams {
    /// Draw every parameter independently and uniformly from `range`.
    pub fn draw<R: Rng + ?Sized>(
        rng: &mut R,
        range: RangeInclusive<u64>,
    ) -> Result<Self, GenerationError> {
        let (min, max) = (*range.start(), *range.end());
        if min > max || max > i64::MAX as u64 {
            return Err(GenerationError::InvalidRange { min, max });
        }

        Ok(Self {
            n: rng.gen_range(range.clone()) as usize,
            start: rng.gen_range(range.clone()) as i64,
            scale: rng.gen_range(range.clone()),
            k: rng.gen_range(range) as usize,
        })
    }
}

/// Generate one input for `class`.
pub fn generate<R: Rng + ?Sized>(
    rng: &mut R,
    class: TestClass,
    params: &CorpusParams,
) -> Result<Vec<i64>, GenerationError> {
    match class {
        TestClass::Sorted => Ok(sorted(params.n, params.start)),
        TestClass::ReverseSorted => Ok(reverse_sorted(params.n, params.start)),
        TestClass::PartiallySorted => Ok(partially_sorted(rng, params.k, params.n, params.start)),
        TestClass::Random => random(rng, params.n, params.scale),
        TestClass::RandomWithOutliers => random_with_outliers(rng, params.n, params.scale),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0x5EED)
    }

    #[test]
    fn test_sorted_shape() {
        for (n, m) in [(1, 1), (5, 1), (100, -20), (37, 9_000)] {
            let values = sorted(n, m);
            assert_eq!(values.len(), n);
            assert_eq!(values[0], m);
            assert!(values.windows(2).all(|w| w[1] == w[0] + 1));
        }
        assert_eq!(sorted(5, 1), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_reverse_sorted_shape() {
        for (n, m) in [(1, 1), (5, 1), (100, -20), (37, 9_000)] {
            let values = reverse_sorted(n, m);
            assert_eq!(values.len(), n);
            assert_eq!(values[0], m + n as i64);
            assert!(values.windows(2).all(|w| w[1] == w[0] - 1));
        }
        assert_eq!(reverse_sorted(3, 1), vec![4, 3, 2]);
    }

    #[test]
    fn test_empty_runs() {
        assert!(sorted(0, 10).is_empty());
        assert!(reverse_sorted(0, 10).is_empty());
        assert!(partially_sorted(&mut rng(), 3, 0, 10).is_empty());
    }

    #[test]
    fn test_partially_sorted_prefix() {
        let mut rng = rng();
        let (k, n, m) = (40, 100, 7);
        let values = partially_sorted(&mut rng, k, n, m);

        assert_eq!(values.len(), n);
        for (position, value) in values.iter().take(k).enumerate() {
            assert_eq!(*value, m + position as i64);
        }
        for value in &values[k..] {
            assert!((m..m + n as i64).contains(value));
        }
    }

    #[test]
    fn test_partially_sorted_edges() {
        let mut rng = rng();
        assert_eq!(partially_sorted(&mut rng, 10, 10, 1), sorted(10, 1));
        assert_eq!(partially_sorted(&mut rng, 50, 10, 1), sorted(10, 1));

        let all_random = partially_sorted(&mut rng, 0, 1_000, 1);
        assert!(all_random.iter().all(|v| (1..1_001).contains(v)));
        assert_ne!(all_random, sorted(1_000, 1));
    }

    #[test]
    fn test_random_distinct_and_bounded() {
        let mut rng = rng();
        let (n, scale) = (500, 3);
        let values = random(&mut rng, n, scale).unwrap();

        assert_eq!(values.len(), n);
        let unique: HashSet<_> = values.iter().collect();
        assert_eq!(unique.len(), n);
        assert!(values.iter().all(|v| *v >= 1 && *v < (n as i64) * scale as i64));
    }

    #[test]
    fn test_random_exhausts_tight_space() {
        // scale 2 with n = 4 leaves exactly [1, 8) = 7 candidates
        let values = random(&mut rng(), 4, 2).unwrap();
        assert_eq!(values.len(), 4);
    }

    #[test]
    fn test_random_sample_space_too_small() {
        let err = random(&mut rng(), 10, 1).unwrap_err();
        assert_eq!(err, GenerationError::SampleSpaceTooSmall { n: 10, upper: 10 });
        assert!(random(&mut rng(), 1, 0).is_err());
        assert!(random(&mut rng(), 0, 1).unwrap().is_empty());
    }

    #[test]
    fn test_random_overflow() {
        let err = random(&mut rng(), usize::MAX, u64::MAX).unwrap_err();
        assert!(matches!(err, GenerationError::Overflow { .. }));
    }

    #[test]
    fn test_random_with_outliers_appends_one() {
        let mut rng = rng();
        let values = random_with_outliers(&mut rng, 50, 4).unwrap();
        assert_eq!(values.len(), 51);
        assert!(OUTLIER_RANGE.contains(values.last().unwrap()));
        assert!(values[..50].iter().all(|v| *v < 200));
    }

    #[test]
    fn test_draw_params_within_range() {
        let mut rng = rng();
        for _ in 0..100 {
            let params = CorpusParams::draw(&mut rng, 100..=10_000).unwrap();
            assert!((100..=10_000).contains(&params.n));
            assert!((100..=10_000).contains(&params.start));
            assert!((100..=10_000).contains(&params.scale));
            assert!((100..=10_000).contains(&params.k));
        }
        assert!(CorpusParams::draw(&mut rng, 10..=1).is_err());
    }

    #[test]
    fn test_generate_dispatch() {
        let params = CorpusParams { n: 5, start: 1, scale: 2, k: 2 };
        let mut rng = rng();
        assert_eq!(generate(&mut rng, TestClass::Sorted, &params).unwrap(), vec![1, 2, 3, 4, 5]);
        assert_eq!(
            generate(&mut rng, TestClass::ReverseSorted, &params).unwrap(),
            vec![6, 5, 4, 3, 2]
        );
        assert_eq!(generate(&mut rng, TestClass::Random, &params).unwrap().len(), 5);
        assert_eq!(
            generate(&mut rng, TestClass::RandomWithOutliers, &params).unwrap().len(),
            6
        );
    }

    #[test]
    fn test_same_seed_same_corpus() {
        let a = random(&mut StdRng::seed_from_u64(7), 64, 10).unwrap();
        let b = random(&mut StdRng::seed_from_u64(7), 64, 10).unwrap();
        assert_eq!(a, b);
    }
}
