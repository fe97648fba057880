//! One-sample Kolmogorov–Smirnov goodness-of-fit test.

use crate::{distribution::Cdf, error::StatsError};

/// Result of [`ks_test`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KsTest {
    /// Largest absolute distance between the empirical and the reference CDF.
    pub statistic: f64,
    /// Asymptotic two-sided p-value of `statistic`.
    pub p_value: f64,
}

/// Tests whether `samples` were drawn from the distribution described by `cdf`.
///
/// The p-value uses the asymptotic Kolmogorov distribution with Stephens'
/// small-sample correction.
///
/// # Examples
///
/// ```
/// use mvpa_stats::{family::Family, ks::ks_test};
///
/// let grid = (0..100).map(|i| (f64::from(i) + 0.5) / 100.0).collect::<Vec<_>>();
/// let uniform = Family::Uniform.fit(&[0.0, 1.0]).unwrap();
/// let result = ks_test(&grid, &uniform).unwrap();
/// assert!((result.statistic - 0.005).abs() < 1e-12);
/// assert!(result.p_value > 0.99);
/// ```
#[expect(clippy::cast_precision_loss)]
pub fn ks_test<C>(samples: &[f64], cdf: &C) -> Result<KsTest, StatsError>
where
    C: Cdf + ?Sized,
{
    if samples.is_empty() {
        return Err(StatsError::EmptySamples);
    }
    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len() as f64;
    let statistic = sorted
        .iter()
        .enumerate()
        .map(|(i, &x)| {
            let f = cdf.cdf(x);
            let above = (i + 1) as f64 / n - f;
            let below = f - i as f64 / n;
            above.max(below)
        })
        .fold(f64::NEG_INFINITY, f64::max);

    let sqrt_n = n.sqrt();
    let lambda = (sqrt_n + 0.12 + 0.11 / sqrt_n) * statistic;
    Ok(KsTest {
        statistic,
        p_value: kolmogorov_survival(lambda),
    })
}

/// `Q_KS(lambda) = 2 * sum_{k>=1} (-1)^(k-1) exp(-2 k^2 lambda^2)`, clamped to `[0, 1]`.
#[must_use]
pub fn kolmogorov_survival(lambda: f64) -> f64 {
    const MAX_TERMS: i32 = 100;
    const EPS_TERM: f64 = 1e-10;
    const EPS_SUM: f64 = 1e-16;

    if lambda.is_nan() {
        return f64::NAN;
    }
    // The series converges too slowly near zero, where Q is 1 to double precision.
    if lambda < 0.2 {
        return 1.0;
    }

    let a2 = -2.0 * lambda * lambda;
    let mut sign = 2.0;
    let mut sum = 0.0;
    let mut previous_term = 0.0_f64;
    for k in 1..=MAX_TERMS {
        let term = sign * (a2 * f64::from(k * k)).exp();
        sum += term;
        if term.abs() <= EPS_TERM * previous_term || term.abs() <= EPS_SUM * sum {
            return sum.clamp(0.0, 1.0);
        }
        sign = -sign;
        previous_term = term.abs();
    }
    1.0
}
