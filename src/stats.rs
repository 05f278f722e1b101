//! Robust descriptive statistics over curvature value arrays.
//!
//! Every measure reduces to the same nine fields:
//! count, mean, std, min, max, q05, q50, q95, neg_frac.
//!
//! Conventions preserved from the reference feature set:
//! - standard deviation is the population form (divide by n, not n−1)
//! - quantiles use linear interpolation at position q·(n−1)
//! - all numeric fields round to 6 decimal places
//! - an empty array yields count = 0 and `None` everywhere else, so absence
//!   is distinguishable from a computed zero

use serde::Serialize;

// ============================================================================
// Summary
// ============================================================================

/// Nine-field statistical reduction of one value array.
///
/// `None` is the "not computed" placeholder for empty input; it renders as an
/// empty CSV cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub q05: Option<f64>,
    pub q50: Option<f64>,
    pub q95: Option<f64>,
    pub neg_frac: Option<f64>,
}

impl Summary {
    /// Reduce a value array. Order of the input does not matter.
    pub fn of(values: &[f64]) -> Summary {
        if values.is_empty() {
            return Summary::empty();
        }

        let mut vals = values.to_vec();
        vals.sort_by(|a, b| a.total_cmp(b));
        let n = vals.len();
        let nf = n as f64;

        let mean = vals.iter().sum::<f64>() / nf;
        let var = vals.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / nf;
        let neg_frac = vals.iter().filter(|&&v| v < 0.0).count() as f64 / nf;

        Summary {
            count: n,
            mean: Some(round6(mean)),
            std: Some(round6(var.sqrt())),
            min: Some(round6(vals[0])),
            max: Some(round6(vals[n - 1])),
            q05: percentile(&vals, 0.05).map(round6),
            q50: percentile(&vals, 0.50).map(round6),
            q95: percentile(&vals, 0.95).map(round6),
            neg_frac: Some(round6(neg_frac)),
        }
    }

    /// The explicit empty placeholder: count 0, everything else not computed.
    pub fn empty() -> Summary {
        Summary {
            count: 0,
            mean: None,
            std: None,
            min: None,
            max: None,
            q05: None,
            q50: None,
            q95: None,
            neg_frac: None,
        }
    }

    /// Column names for one measure prefix, in output order.
    pub fn field_names(prefix: &str) -> [String; 9] {
        [
            format!("{prefix}_count"),
            format!("{prefix}_mean"),
            format!("{prefix}_std"),
            format!("{prefix}_min"),
            format!("{prefix}_max"),
            format!("{prefix}_q05"),
            format!("{prefix}_q50"),
            format!("{prefix}_q95"),
            format!("{prefix}_neg_frac"),
        ]
    }

    /// CSV cells in field order; `None` renders as an empty cell.
    pub fn csv_cells(&self) -> [String; 9] {
        [
            self.count.to_string(),
            render(self.mean),
            render(self.std),
            render(self.min),
            render(self.max),
            render(self.q05),
            render(self.q50),
            render(self.q95),
            render(self.neg_frac),
        ]
    }
}

fn render(field: Option<f64>) -> String {
    match field {
        Some(v) => format!("{v}"),
        None => String::new(),
    }
}

// ============================================================================
// Percentile
// ============================================================================

/// Linear-interpolation quantile over an ascending-sorted slice.
///
/// Position is q·(n−1); the result interpolates between the floor and ceiling
/// order statistics. A single value is every quantile of itself. Returns
/// `None` for an empty slice.
pub fn percentile(sorted: &[f64], q: f64) -> Option<f64> {
    let n = sorted.len();
    match n {
        0 => None,
        1 => Some(sorted[0]),
        _ => {
            let pos = q * (n - 1) as f64;
            let lower = pos.floor() as usize;
            let upper = (lower + 1).min(n - 1);
            if lower == upper {
                return Some(sorted[lower]);
            }
            let weight = pos - lower as f64;
            Some(sorted[lower] * (1.0 - weight) + sorted[upper] * weight)
        }
    }
}

fn round6(v: f64) -> f64 {
    (v * 1e6).round() / 1e6
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_empty_is_placeholder_not_zero() {
        let s = Summary::of(&[]);
        assert_eq!(s.count, 0);
        assert_eq!(s.mean, None);
        assert_eq!(s.std, None);
        assert_eq!(s.min, None);
        assert_eq!(s.max, None);
        assert_eq!(s.q05, None);
        assert_eq!(s.q50, None);
        assert_eq!(s.q95, None);
        assert_eq!(s.neg_frac, None);

        let cells = s.csv_cells();
        assert_eq!(cells[0], "0");
        assert!(cells[1..].iter().all(|c| c.is_empty()));
    }

    #[test]
    fn test_singleton() {
        let s = Summary::of(&[-2.5]);
        assert_eq!(s.count, 1);
        assert_eq!(s.min, Some(-2.5));
        assert_eq!(s.max, Some(-2.5));
        assert_eq!(s.q05, Some(-2.5));
        assert_eq!(s.q50, Some(-2.5));
        assert_eq!(s.q95, Some(-2.5));
        assert_eq!(s.std, Some(0.0));
        assert_eq!(s.neg_frac, Some(1.0));

        let positive = Summary::of(&[0.75]);
        assert_eq!(positive.neg_frac, Some(0.0));
    }

    #[test]
    fn test_population_std() {
        // population std of [1, 3] is 1.0; the sample form would be ~1.414
        let s = Summary::of(&[1.0, 3.0]);
        assert_eq!(s.std, Some(1.0));
        assert_eq!(s.mean, Some(2.0));
    }

    #[test]
    fn test_interpolated_quantiles() {
        // sorted [0, 1, 2, 3]: pos(q50) = 1.5 → 1.5; pos(q95) = 2.85 → 2.85
        let s = Summary::of(&[3.0, 0.0, 2.0, 1.0]);
        assert_eq!(s.q50, Some(1.5));
        assert_eq!(s.q95, Some(2.85));
        assert_eq!(s.q05, Some(0.15));
        assert_eq!(s.min, Some(0.0));
        assert_eq!(s.max, Some(3.0));
    }

    #[test]
    fn test_neg_frac() {
        let s = Summary::of(&[-1.0, -0.5, 0.0, 2.0]);
        assert_eq!(s.neg_frac, Some(0.5));
    }

    #[test]
    fn test_rounding_to_six_places() {
        let s = Summary::of(&[1.0 / 3.0]);
        assert_eq!(s.mean, Some(0.333333));
    }

    #[test]
    fn test_order_does_not_matter() {
        let a = Summary::of(&[3.0, 1.0, 2.0]);
        let b = Summary::of(&[1.0, 2.0, 3.0]);
        assert_eq!(a, b);
    }

    proptest! {
        /// q05 ≤ q50 ≤ q95 for any non-empty input.
        #[test]
        fn prop_quantiles_monotonic(values in proptest::collection::vec(-1e6f64..1e6, 1..200)) {
            let s = Summary::of(&values);
            let (q05, q50, q95) = (s.q05.unwrap(), s.q50.unwrap(), s.q95.unwrap());
            prop_assert!(q05 <= q50);
            prop_assert!(q50 <= q95);
            prop_assert!(s.min.unwrap() <= q05);
            prop_assert!(q95 <= s.max.unwrap());
        }
    }
}
