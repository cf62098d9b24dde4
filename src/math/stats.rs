//! Descriptive statistics shared by the fitters.

/// Relative tolerance used to decide that constant-target predictions are exact.
const EXACT_RTOL: f64 = 1e-9;

/// Arithmetic mean. Returns `0.0` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Minimum and maximum of a non-empty slice.
pub fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let first = *values.first()?;
    Some(
        values
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
    )
}

/// Number of distinct values (exact comparison).
pub fn distinct_count(values: &[f64]) -> usize {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted.dedup();
    sorted.len()
}

/// Coefficient of determination `1 - SS_res / SS_tot`.
///
/// When the targets are constant (`SS_tot == 0`) the ratio is undefined and we
/// apply a fixed policy: `1.0` if every prediction equals its target (within a
/// `1e-9` relative tolerance), else `0.0`.
///
/// Both sums are taken over deviations divided by `max |y - mean(y)|`, so
/// targets near the top of the `f64` range do not overflow when squared.
pub fn r2_score(y: &[f64], predictions: &[f64]) -> f64 {
    let constant_target = y.windows(2).all(|w| w[0] == w[1]);
    if constant_target {
        let exact = y.iter().zip(predictions).all(|(yi, pi)| {
            (yi - pi).abs() <= EXACT_RTOL * yi.abs().max(1.0)
        });
        return if exact { 1.0 } else { 0.0 };
    }

    let m = mean(y);
    let scale = y.iter().map(|v| (v - m).abs()).fold(0.0, f64::max);
    let scaled_sq = |d: f64| {
        let r = d / scale;
        r * r
    };

    let ss_res: f64 = y
        .iter()
        .zip(predictions)
        .map(|(yi, pi)| scaled_sq(yi - pi))
        .sum();
    let ss_tot: f64 = y.iter().map(|v| scaled_sq(v - m)).sum();
    1.0 - ss_res / ss_tot
}

/// `n` evenly spaced values from `start` to `end` inclusive.
///
/// The first and last values are exactly `start` and `end`. For `n < 2` the
/// result is `[start, end]`.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    let n = n.max(2);
    let step = (end - start) / (n as f64 - 1.0);
    let mut out: Vec<f64> = (0..n).map(|i| (start + step * i as f64).min(end)).collect();
    out[n - 1] = end;
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn r2_is_one_for_perfect_predictions() {
        let y = [1.0, 3.0, 5.0];
        assert!((r2_score(&y, &y) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn r2_is_zero_for_mean_predictions() {
        let y = [1.0, 2.0, 6.0];
        let m = mean(&y);
        assert!(r2_score(&y, &[m, m, m]).abs() < 1e-12);
    }

    #[test]
    fn r2_constant_target_policy() {
        let y = [4.0, 4.0, 4.0];
        assert_eq!(r2_score(&y, &[4.0, 4.0, 4.0]), 1.0);
        assert_eq!(r2_score(&y, &[4.0, 4.0 + 1e-13, 4.0]), 1.0);
        assert_eq!(r2_score(&y, &[3.0, 4.0, 5.0]), 0.0);
    }

    #[test]
    fn r2_survives_huge_targets() {
        let y = [1e200, 2e200, 4e200];
        assert!((r2_score(&y, &y) - 1.0).abs() < 1e-12);

        let m = mean(&y);
        assert!(r2_score(&y, &[m, m, m]).abs() < 1e-12);

        let r2 = r2_score(&y, &[1.5e200, 2e200, 3.5e200]);
        assert!(r2.is_finite() && r2 > 0.0 && r2 < 1.0);
    }

    #[test]
    fn linspace_hits_both_endpoints() {
        let xs = linspace(-1.0, 0.3, 100);
        assert_eq!(xs.len(), 100);
        assert_eq!(xs[0], -1.0);
        assert_eq!(xs[99], 0.3);
        assert!(xs.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn distinct_and_range() {
        let xs = [3.0, 1.0, 3.0, 2.0];
        assert_eq!(distinct_count(&xs), 3);
        assert_eq!(min_max(&xs), Some((1.0, 3.0)));
        assert_eq!(min_max(&[]), None);
    }
}
