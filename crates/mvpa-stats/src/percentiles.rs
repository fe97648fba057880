/// Nearest-rank percentile of ascending `sorted_values`.
///
/// The `k`-th percentile of `n` values is the value at index
/// `floor(n * k / 100)`, clamped to the last one. Returns `None` for empty
/// input or a percentile outside `0..=100`.
///
/// ```
/// use mvpa_stats::percentiles::percentile;
///
/// let values = [1.0, 2.0, 3.0, 4.0, 5.0];
/// assert_eq!(percentile(&values, 50.0), Some(3.0));
/// assert_eq!(percentile(&values, 25.0), Some(2.0));
/// assert_eq!(percentile(&values, 100.0), Some(5.0));
/// assert_eq!(percentile(&values, 101.0), None);
/// assert_eq!(percentile(&[], 50.0), None);
/// ```
#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn percentile(sorted_values: &[f64], percentile: f64) -> Option<f64> {
    let last = sorted_values.len().checked_sub(1)?;
    if !(0.0..=100.0).contains(&percentile) {
        return None;
    }
    let rank = (sorted_values.len() as f64 * percentile / 100.0) as usize;
    Some(sorted_values[rank.min(last)])
}

/// Values of a sample at a fixed set of percentile points.
///
/// ```
/// use mvpa_stats::percentiles::Percentiles;
///
/// let null_values = [0.52, 0.48, 0.5, 0.61, 0.39, 0.5, 0.47, 0.55, 0.44, 0.5];
/// let summary = Percentiles::new(&null_values, &[5.0, 50.0, 95.0]).unwrap();
/// assert_eq!(summary.get(50.0), Some(0.5));
/// assert_eq!(summary.get(95.0), Some(0.61));
/// assert_eq!(summary.get(99.0), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Percentiles {
    points: Vec<(f64, f64)>,
}

impl Percentiles {
    /// Sorts `values` and evaluates every point of `percentile_points`.
    ///
    /// Returns `None` if `values` is empty or a point lies outside `0..=100`.
    #[must_use]
    pub fn new(values: &[f64], percentile_points: &[f64]) -> Option<Self> {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted, percentile_points)
    }

    /// Like [`Percentiles::new`] for values already in ascending order.
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64], percentile_points: &[f64]) -> Option<Self> {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );
        let points = percentile_points
            .iter()
            .map(|&p| Some((p, percentile(sorted_values, p)?)))
            .collect::<Option<Vec<_>>>()?;
        Some(Self { points })
    }

    /// Value at `point`, if it was one of the requested points.
    #[must_use]
    pub fn get(&self, point: f64) -> Option<f64> {
        self.points
            .iter()
            .find(|(p, _)| p.total_cmp(&point).is_eq())
            .map(|&(_, value)| value)
    }

    /// `(point, value)` pairs in request order.
    #[must_use]
    pub fn as_slice(&self) -> &[(f64, f64)] {
        &self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_keep_request_order() {
        let values = (0..100).map(f64::from).collect::<Vec<_>>();
        let percentiles = Percentiles::from_sorted(&values, &[95.0, 5.0, 50.0]).unwrap();
        assert_eq!(
            percentiles.as_slice(),
            &[(95.0, 95.0), (5.0, 5.0), (50.0, 50.0)]
        );
    }

    #[test]
    fn test_invalid_inputs() {
        assert_eq!(Percentiles::new(&[], &[50.0]), None);
        assert_eq!(Percentiles::new(&[1.0], &[-1.0]), None);
        assert_eq!(percentile(&[1.0, 2.0], f64::NAN), None);
    }

    #[test]
    fn test_single_value() {
        let percentiles = Percentiles::new(&[3.5], &[0.0, 100.0]).unwrap();
        assert_eq!(percentiles.get(0.0), Some(3.5));
        assert_eq!(percentiles.get(100.0), Some(3.5));
    }
}
