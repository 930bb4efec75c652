//! Trailing-window standardized scores.
//!
//! For row `i` the trailing window is the last `min(i + 1, w)` observations
//! ending at `i` — row count of the already-sorted series, not calendar days.
//! The z-score is `(x[i] - mean) / std` with the sample (n−1) standard
//! deviation over that window.
//!
//! A score is *undefined* (`None`) when the window holds a single observation
//! or its variance is zero. Undefined is preserved rather than defaulted to
//! `0.0`: a zero score means "exactly at the trailing mean", an undefined one
//! means "no variance to standardize against".

/// Rolling z-score per observation. Pure function of the trailing window:
/// recomputing over the same input yields identical output.
pub fn rolling_zscores(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let w = window.max(1);
    values
        .iter()
        .enumerate()
        .map(|(i, &x)| {
            let start = (i + 1).saturating_sub(w);
            zscore(&values[start..=i], x)
        })
        .collect()
}

fn zscore(tail: &[f64], x: f64) -> Option<f64> {
    if tail.len() < 2 {
        return None;
    }

    // A run of identical values must report zero variance exactly, not a
    // rounding residue that would standardize into garbage.
    let first = tail[0];
    if tail.iter().all(|&v| v == first) {
        return None;
    }

    let n = tail.len() as f64;
    let mean = tail.iter().sum::<f64>() / n;
    let variance = tail.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    let std = variance.sqrt();
    if std == 0.0 {
        return None;
    }
    Some((x - mean) / std)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_row_is_undefined() {
        let z = rolling_zscores(&[100.0, 110.0, 120.0], 26);
        assert_eq!(z[0], None);
        assert!(z[1].is_some());
    }

    #[test]
    fn known_window_value() {
        // Window at i=3 with w=3 is [2, 3, 4]: mean 3, sample std 1.
        let z = rolling_zscores(&[1.0, 2.0, 3.0, 4.0], 3);
        let z3 = z[3].unwrap();
        assert!((z3 - 1.0).abs() < 1e-12, "expected 1.0, got {z3}");
    }

    #[test]
    fn identical_values_yield_undefined_not_zero() {
        let z = rolling_zscores(&[7.0; 10], 4);
        assert!(z.iter().all(Option::is_none));
    }

    #[test]
    fn run_of_identical_values_after_variation_goes_undefined_once_window_fills() {
        // w=3; from i=4 on, the trailing window is identical 5s.
        let values = [1.0, 5.0, 5.0, 5.0, 5.0, 5.0];
        let z = rolling_zscores(&values, 3);
        assert!(z[1].is_some());
        assert!(z[2].is_some());
        assert_eq!(z[3], None);
        assert_eq!(z[4], None);
        assert_eq!(z[5], None);
    }

    #[test]
    fn recomputation_is_idempotent() {
        let values: Vec<f64> = (0..60).map(|i| ((i * 37) % 11) as f64).collect();
        let a = rolling_zscores(&values, 26);
        let b = rolling_zscores(&values, 26);
        assert_eq!(a, b);
    }

    #[test]
    fn window_never_exceeds_available_history() {
        // With w larger than the series, every window is the full prefix.
        let values = [10.0, 20.0, 30.0];
        let z_large = rolling_zscores(&values, 26);
        let z_exact = rolling_zscores(&values, 3);
        assert_eq!(z_large, z_exact);
    }

    #[test]
    fn window_of_zero_is_treated_as_one() {
        let z = rolling_zscores(&[1.0, 2.0], 0);
        assert!(z.iter().all(Option::is_none));
    }
}
