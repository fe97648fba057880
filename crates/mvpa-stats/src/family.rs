//! Parametric distribution families and their parameter estimators.
//!
//! Each [`Family`] knows how to estimate its parameters from a sample set
//! ([`Family::fit`]). Estimators are maximum-likelihood where a closed form or
//! a short Newton iteration exists, and moment matching otherwise:
//!
//! | family        | estimator                                         | support   |
//! |---------------|---------------------------------------------------|-----------|
//! | `normal`      | MLE (mean, population std)                        | ℝ         |
//! | `lognormal`   | MLE on `ln x`                                     | x > 0     |
//! | `exponential` | MLE with location (`loc = min`)                   | x ≥ loc   |
//! | `uniform`     | sample minimum and maximum                        | [min,max] |
//! | `gamma`       | MLE shape (Minka start + Newton), `rate = k/mean` | x > 0     |
//! | `beta`        | method of moments                                 | 0 < x < 1 |
//! | `weibull`     | MLE shape (Newton), closed-form scale             | x > 0     |
//! | `laplace`     | median, mean absolute deviation                   | ℝ         |
//! | `logistic`    | moments                                           | ℝ         |
//! | `cauchy`      | median, half interquartile range                  | ℝ         |
//! | `gumbel`      | moments (right-skewed Gumbel)                     | ℝ         |
//! | `rayleigh`    | MLE                                               | x ≥ 0     |
//!
//! CDFs are evaluated with `statrs` where it provides the family.

use std::{
    f64::consts::{PI, SQRT_2},
    fmt,
};

use serde::{Deserialize, Serialize};
use statrs::{
    distribution::{Beta, Cauchy, ContinuousCDF, Exp, Gamma, Laplace, LogNormal, Normal, Uniform, Weibull},
    function::gamma::digamma,
};

use crate::{descriptive::DescriptiveStats, error::FitError, percentiles};

const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

const MAX_NEWTON_ITERATIONS: usize = 100;
const NEWTON_TOLERANCE: f64 = 1e-10;

/// A parametric distribution family that can be fit to samples.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::FromStr,
)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    Normal,
    LogNormal,
    Exponential,
    Uniform,
    Gamma,
    Beta,
    Weibull,
    Laplace,
    Logistic,
    Cauchy,
    Gumbel,
    Rayleigh,
}

impl Family {
    pub const ALL: [Family; 12] = [
        Family::Normal,
        Family::LogNormal,
        Family::Exponential,
        Family::Uniform,
        Family::Gamma,
        Family::Beta,
        Family::Weibull,
        Family::Laplace,
        Family::Logistic,
        Family::Cauchy,
        Family::Gumbel,
        Family::Rayleigh,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Family::Normal => "normal",
            Family::LogNormal => "lognormal",
            Family::Exponential => "exponential",
            Family::Uniform => "uniform",
            Family::Gamma => "gamma",
            Family::Beta => "beta",
            Family::Weibull => "weibull",
            Family::Laplace => "laplace",
            Family::Logistic => "logistic",
            Family::Cauchy => "cauchy",
            Family::Gumbel => "gumbel",
            Family::Rayleigh => "rayleigh",
        }
    }

    /// Estimates the parameters of this family from `samples`.
    ///
    /// # Examples
    ///
    /// ```
    /// use mvpa_stats::family::Family;
    ///
    /// let fitted = Family::Exponential.fit(&[1.0, 2.0, 3.0]).unwrap();
    /// assert_eq!(fitted.parameters(), &[("loc", 1.0), ("scale", 1.0)]);
    /// assert_eq!(fitted.cdf(1.0), 0.0);
    ///
    /// // Samples outside the support are rejected.
    /// assert!(Family::LogNormal.fit(&[-1.0, 2.0]).is_err());
    /// ```
    pub fn fit(self, samples: &[f64]) -> Result<FittedDistribution, FitError> {
        let family = self.name();
        if samples.len() < 2 {
            return Err(FitError::TooFewSamples {
                family,
                required: 2,
                actual: samples.len(),
            });
        }
        if samples.iter().any(|v| !v.is_finite()) {
            return Err(FitError::NonFiniteSample { family });
        }
        let mut sorted = samples.to_vec();
        sorted.sort_by(f64::total_cmp);
        let stats = DescriptiveStats::from_sorted(&sorted).ok_or(FitError::TooFewSamples {
            family,
            required: 2,
            actual: 0,
        })?;
        require_spread(self, stats.range())?;

        match self {
            Family::Normal => fit_normal(self, &stats),
            Family::LogNormal => fit_lognormal(self, &sorted),
            Family::Exponential => fit_exponential(self, &stats),
            Family::Uniform => fit_uniform(self, &stats),
            Family::Gamma => fit_gamma(self, &sorted, &stats),
            Family::Beta => fit_beta(self, &sorted, &stats),
            Family::Weibull => fit_weibull(self, &sorted),
            Family::Laplace => fit_laplace(self, &sorted),
            Family::Logistic => fit_logistic(self, &stats),
            Family::Cauchy => fit_cauchy(self, &sorted),
            Family::Gumbel => fit_gumbel(self, &stats),
            Family::Rayleigh => fit_rayleigh(self, &sorted),
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A distribution with parameters estimated by [`Family::fit`].
#[derive(Debug, Clone)]
pub struct FittedDistribution {
    family: Family,
    parameters: Vec<(&'static str, f64)>,
    model: Model,
}

#[derive(Debug, Clone)]
enum Model {
    Normal(Normal),
    LogNormal(LogNormal),
    Exponential { loc: f64, dist: Exp },
    Uniform(Uniform),
    Gamma(Gamma),
    Beta(Beta),
    Weibull(Weibull),
    Laplace(Laplace),
    Logistic { loc: f64, scale: f64 },
    Cauchy(Cauchy),
    Gumbel { loc: f64, scale: f64 },
    Rayleigh { sigma: f64 },
}

impl FittedDistribution {
    #[must_use]
    pub fn family(&self) -> Family {
        self.family
    }

    /// Estimated parameters as `(name, value)` pairs in a fixed order per family.
    #[must_use]
    pub fn parameters(&self) -> &[(&'static str, f64)] {
        &self.parameters
    }

    /// Returns `P(X <= x)`.
    #[must_use]
    pub fn cdf(&self, x: f64) -> f64 {
        match &self.model {
            Model::Normal(dist) => dist.cdf(x),
            Model::LogNormal(dist) => positive_cdf(x, |x| dist.cdf(x)),
            Model::Exponential { loc, dist } => {
                if x <= *loc {
                    0.0
                } else {
                    dist.cdf(x - loc)
                }
            }
            Model::Uniform(dist) => dist.cdf(x),
            Model::Gamma(dist) => positive_cdf(x, |x| dist.cdf(x)),
            Model::Beta(dist) => {
                if x <= 0.0 {
                    0.0
                } else if x >= 1.0 {
                    1.0
                } else {
                    dist.cdf(x)
                }
            }
            Model::Weibull(dist) => positive_cdf(x, |x| dist.cdf(x)),
            Model::Laplace(dist) => dist.cdf(x),
            Model::Logistic { loc, scale } => 1.0 / (1.0 + (-(x - loc) / scale).exp()),
            Model::Cauchy(dist) => dist.cdf(x),
            Model::Gumbel { loc, scale } => (-(-(x - loc) / scale).exp()).exp(),
            Model::Rayleigh { sigma } => {
                positive_cdf(x, |x| -(-(x / (SQRT_2 * sigma)).powi(2)).exp_m1())
            }
        }
    }
}

fn positive_cdf<F>(x: f64, cdf: F) -> f64
where
    F: FnOnce(f64) -> f64,
{
    if x <= 0.0 { 0.0 } else { cdf(x) }
}

fn fitted(
    family: Family,
    parameters: Vec<(&'static str, f64)>,
    model: Model,
) -> Result<FittedDistribution, FitError> {
    Ok(FittedDistribution {
        family,
        parameters,
        model,
    })
}

fn require_spread(family: Family, spread: f64) -> Result<(), FitError> {
    if spread > 0.0 && spread.is_finite() {
        Ok(())
    } else {
        Err(FitError::Degenerate {
            family: family.name(),
        })
    }
}

fn require_positive(family: Family, sorted: &[f64]) -> Result<(), FitError> {
    match sorted.first() {
        Some(&min) if min <= 0.0 => Err(FitError::OutOfSupport {
            family: family.name(),
            value: min,
        }),
        _ => Ok(()),
    }
}

fn median(sorted: &[f64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        0.5 * (sorted[mid - 1] + sorted[mid])
    } else {
        sorted[mid]
    }
}

#[expect(clippy::cast_precision_loss)]
fn mean_of<I>(values: I, len: usize) -> f64
where
    I: IntoIterator<Item = f64>,
{
    values.into_iter().sum::<f64>() / len as f64
}

fn fit_normal(family: Family, stats: &DescriptiveStats) -> Result<FittedDistribution, FitError> {
    require_spread(family, stats.std_dev)?;
    let dist = Normal::new(stats.mean, stats.std_dev)
        .map_err(|_| FitError::invalid(family, &[stats.mean, stats.std_dev]))?;
    fitted(
        family,
        vec![("loc", stats.mean), ("scale", stats.std_dev)],
        Model::Normal(dist),
    )
}

fn fit_lognormal(family: Family, sorted: &[f64]) -> Result<FittedDistribution, FitError> {
    require_positive(family, sorted)?;
    let log_stats = DescriptiveStats::new(sorted.iter().map(|v| v.ln())).ok_or(
        FitError::TooFewSamples {
            family: family.name(),
            required: 2,
            actual: 0,
        },
    )?;
    require_spread(family, log_stats.std_dev)?;
    let (mu, sigma) = (log_stats.mean, log_stats.std_dev);
    let dist = LogNormal::new(mu, sigma).map_err(|_| FitError::invalid(family, &[mu, sigma]))?;
    fitted(
        family,
        vec![("mu", mu), ("sigma", sigma)],
        Model::LogNormal(dist),
    )
}

fn fit_exponential(
    family: Family,
    stats: &DescriptiveStats,
) -> Result<FittedDistribution, FitError> {
    let loc = stats.min;
    let scale = stats.mean - stats.min;
    require_spread(family, scale)?;
    let dist = Exp::new(scale.recip()).map_err(|_| FitError::invalid(family, &[loc, scale]))?;
    fitted(
        family,
        vec![("loc", loc), ("scale", scale)],
        Model::Exponential { loc, dist },
    )
}

fn fit_uniform(family: Family, stats: &DescriptiveStats) -> Result<FittedDistribution, FitError> {
    require_spread(family, stats.range())?;
    let dist = Uniform::new(stats.min, stats.max)
        .map_err(|_| FitError::invalid(family, &[stats.min, stats.max]))?;
    fitted(
        family,
        vec![("min", stats.min), ("max", stats.max)],
        Model::Uniform(dist),
    )
}

fn fit_gamma(
    family: Family,
    sorted: &[f64],
    stats: &DescriptiveStats,
) -> Result<FittedDistribution, FitError> {
    require_positive(family, sorted)?;
    let mean_log = mean_of(sorted.iter().map(|v| v.ln()), sorted.len());
    // s >= 0 by Jensen; zero only for constant samples
    let s = stats.mean.ln() - mean_log;
    require_spread(family, s)?;

    let mut shape = (3.0 - s + ((s - 3.0).powi(2) + 24.0 * s).sqrt()) / (12.0 * s);
    let mut converged = false;
    for _ in 0..MAX_NEWTON_ITERATIONS {
        let objective = shape.ln() - digamma(shape) - s;
        let slope = shape.recip() - trigamma(shape);
        let mut next = shape - objective / slope;
        if next <= 0.0 || !next.is_finite() {
            next = shape / 2.0;
        }
        let delta = (next - shape).abs();
        shape = next;
        if delta <= NEWTON_TOLERANCE * shape {
            converged = true;
            break;
        }
    }
    if !converged {
        return Err(FitError::NoConvergence {
            family: family.name(),
        });
    }

    let rate = shape / stats.mean;
    let dist = Gamma::new(shape, rate).map_err(|_| FitError::invalid(family, &[shape, rate]))?;
    fitted(
        family,
        vec![("shape", shape), ("rate", rate)],
        Model::Gamma(dist),
    )
}

fn fit_beta(
    family: Family,
    sorted: &[f64],
    stats: &DescriptiveStats,
) -> Result<FittedDistribution, FitError> {
    if let Some(&value) = sorted.iter().find(|&&v| v <= 0.0 || v >= 1.0) {
        return Err(FitError::OutOfSupport {
            family: family.name(),
            value,
        });
    }
    require_spread(family, stats.variance)?;
    let common = stats.mean * (1.0 - stats.mean) / stats.variance - 1.0;
    let alpha = stats.mean * common;
    let beta = (1.0 - stats.mean) * common;
    if alpha <= 0.0 || beta <= 0.0 {
        return Err(FitError::invalid(family, &[alpha, beta]));
    }
    let dist = Beta::new(alpha, beta).map_err(|_| FitError::invalid(family, &[alpha, beta]))?;
    fitted(
        family,
        vec![("alpha", alpha), ("beta", beta)],
        Model::Beta(dist),
    )
}

fn fit_weibull(family: Family, sorted: &[f64]) -> Result<FittedDistribution, FitError> {
    require_positive(family, sorted)?;
    let max = sorted[sorted.len() - 1];
    // Shape is scale invariant; normalizing keeps `y^k` in range.
    let logs = sorted.iter().map(|v| (v / max).ln()).collect::<Vec<_>>();
    let log_stats = DescriptiveStats::new(logs.iter().copied()).ok_or(FitError::TooFewSamples {
        family: family.name(),
        required: 2,
        actual: 0,
    })?;
    require_spread(family, log_stats.std_dev)?;

    let power_sums = |shape: f64| {
        logs.iter().fold((0.0, 0.0, 0.0), |(b, a, c), &l| {
            let y = (shape * l).exp();
            (b + y, a + y * l, c + y * l * l)
        })
    };

    let mut shape = PI / (6.0_f64.sqrt() * log_stats.std_dev);
    let mut converged = false;
    for _ in 0..MAX_NEWTON_ITERATIONS {
        let (b, a, c) = power_sums(shape);
        let objective = a / b - shape.recip() - log_stats.mean;
        let slope = (c * b - a * a) / (b * b) + shape.powi(-2);
        let mut next = shape - objective / slope;
        if next <= 0.0 || !next.is_finite() {
            next = shape / 2.0;
        }
        let delta = (next - shape).abs();
        shape = next;
        if delta <= NEWTON_TOLERANCE * shape {
            converged = true;
            break;
        }
    }
    if !converged {
        return Err(FitError::NoConvergence {
            family: family.name(),
        });
    }

    let scale = max * mean_of(logs.iter().map(|&l| (shape * l).exp()), logs.len()).powf(shape.recip());
    let dist =
        Weibull::new(shape, scale).map_err(|_| FitError::invalid(family, &[shape, scale]))?;
    fitted(
        family,
        vec![("shape", shape), ("scale", scale)],
        Model::Weibull(dist),
    )
}

fn fit_laplace(family: Family, sorted: &[f64]) -> Result<FittedDistribution, FitError> {
    let loc = median(sorted);
    let scale = mean_of(sorted.iter().map(|v| (v - loc).abs()), sorted.len());
    require_spread(family, scale)?;
    let dist = Laplace::new(loc, scale).map_err(|_| FitError::invalid(family, &[loc, scale]))?;
    fitted(
        family,
        vec![("loc", loc), ("scale", scale)],
        Model::Laplace(dist),
    )
}

fn fit_logistic(family: Family, stats: &DescriptiveStats) -> Result<FittedDistribution, FitError> {
    let scale = stats.std_dev * 3.0_f64.sqrt() / PI;
    require_spread(family, scale)?;
    let loc = stats.mean;
    fitted(
        family,
        vec![("loc", loc), ("scale", scale)],
        Model::Logistic { loc, scale },
    )
}

fn fit_cauchy(family: Family, sorted: &[f64]) -> Result<FittedDistribution, FitError> {
    let loc = median(sorted);
    let (Some(q1), Some(q3)) = (
        percentiles::percentile(sorted, 25.0),
        percentiles::percentile(sorted, 75.0),
    ) else {
        return Err(FitError::Degenerate {
            family: family.name(),
        });
    };
    let scale = (q3 - q1) / 2.0;
    require_spread(family, scale)?;
    let dist = Cauchy::new(loc, scale).map_err(|_| FitError::invalid(family, &[loc, scale]))?;
    fitted(
        family,
        vec![("loc", loc), ("scale", scale)],
        Model::Cauchy(dist),
    )
}

fn fit_gumbel(family: Family, stats: &DescriptiveStats) -> Result<FittedDistribution, FitError> {
    let scale = stats.std_dev * 6.0_f64.sqrt() / PI;
    require_spread(family, scale)?;
    let loc = stats.mean - EULER_GAMMA * scale;
    fitted(
        family,
        vec![("loc", loc), ("scale", scale)],
        Model::Gumbel { loc, scale },
    )
}

fn fit_rayleigh(family: Family, sorted: &[f64]) -> Result<FittedDistribution, FitError> {
    if let Some(&value) = sorted.first().filter(|&&v| v < 0.0) {
        return Err(FitError::OutOfSupport {
            family: family.name(),
            value,
        });
    }
    let sigma = (mean_of(sorted.iter().map(|v| v * v), sorted.len()) / 2.0).sqrt();
    require_spread(family, sigma)?;
    fitted(family, vec![("sigma", sigma)], Model::Rayleigh { sigma })
}

/// Trigamma function via recurrence up to `x >= 6` and the asymptotic series.
fn trigamma(x: f64) -> f64 {
    let mut x = x;
    let mut acc = 0.0;
    while x < 6.0 {
        acc += (x * x).recip();
        x += 1.0;
    }
    let t = x.recip();
    let t2 = t * t;
    acc + t + t2 / 2.0 + t * t2 * (1.0 / 6.0 - t2 * (1.0 / 30.0 - t2 * (1.0 / 42.0 - t2 / 30.0)))
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_distr::Distribution as _;
    use rand_pcg::Pcg32;

    use super::*;

    fn draw<D>(dist: D, n: usize, seed: u64) -> Vec<f64>
    where
        D: rand_distr::Distribution<f64>,
    {
        let mut rng = Pcg32::seed_from_u64(seed);
        dist.sample_iter(&mut rng).take(n).collect()
    }

    fn param(fitted: &FittedDistribution, name: &str) -> f64 {
        fitted
            .parameters()
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| *v)
            .unwrap()
    }

    #[test]
    fn test_family_names_parse_back() {
        for family in Family::ALL {
            assert_eq!(family.name().parse::<Family>().unwrap(), family);
        }
    }

    #[test]
    fn test_too_few_and_non_finite_samples() {
        for family in Family::ALL {
            assert!(matches!(
                family.fit(&[1.0]),
                Err(FitError::TooFewSamples { actual: 1, .. })
            ));
            assert!(matches!(
                family.fit(&[0.5, f64::INFINITY]),
                Err(FitError::NonFiniteSample { .. })
            ));
        }
    }

    #[test]
    fn test_constant_samples_are_degenerate() {
        for family in Family::ALL {
            let err = family.fit(&[0.5; 8]).unwrap_err();
            assert!(
                matches!(err, FitError::Degenerate { .. }),
                "{family}: unexpected {err}"
            );
        }
    }

    #[test]
    fn test_support_violations() {
        for family in [Family::LogNormal, Family::Gamma, Family::Weibull] {
            assert!(matches!(
                family.fit(&[0.0, 1.0, 2.0]),
                Err(FitError::OutOfSupport { value: 0.0, .. })
            ));
        }
        assert!(matches!(
            Family::Beta.fit(&[0.2, 0.5, 1.0]),
            Err(FitError::OutOfSupport { value: 1.0, .. })
        ));
        assert!(matches!(
            Family::Rayleigh.fit(&[-0.1, 0.5]),
            Err(FitError::OutOfSupport { .. })
        ));
    }

    #[test]
    fn test_normal_fit_recovers_parameters() {
        let samples = draw(rand_distr::Normal::new(2.0, 3.0).unwrap(), 5000, 1);
        let fitted = Family::Normal.fit(&samples).unwrap();
        assert!((param(&fitted, "loc") - 2.0).abs() < 0.2);
        assert!((param(&fitted, "scale") - 3.0).abs() < 0.2);
        let median = param(&fitted, "loc");
        assert!((fitted.cdf(median) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_gamma_fit_recovers_parameters() {
        // rand_distr parameterizes by scale
        let samples = draw(rand_distr::Gamma::new(3.0, 2.0).unwrap(), 5000, 2);
        let fitted = Family::Gamma.fit(&samples).unwrap();
        assert!((param(&fitted, "shape") - 3.0).abs() < 0.3);
        assert!((param(&fitted, "rate") - 0.5).abs() < 0.05);
        assert_eq!(fitted.cdf(-1.0), 0.0);
    }

    #[test]
    fn test_weibull_fit_recovers_parameters() {
        let samples = draw(rand_distr::Weibull::new(2.0, 1.5).unwrap(), 5000, 3);
        let fitted = Family::Weibull.fit(&samples).unwrap();
        assert!((param(&fitted, "shape") - 1.5).abs() < 0.1);
        assert!((param(&fitted, "scale") - 2.0).abs() < 0.1);
    }

    #[test]
    fn test_beta_fit_recovers_parameters() {
        let samples = draw(rand_distr::Beta::new(2.0, 5.0).unwrap(), 5000, 4);
        let fitted = Family::Beta.fit(&samples).unwrap();
        assert!((param(&fitted, "alpha") - 2.0).abs() < 0.25);
        assert!((param(&fitted, "beta") - 5.0).abs() < 0.6);
        assert_eq!(fitted.cdf(0.0), 0.0);
        assert_eq!(fitted.cdf(1.0), 1.0);
    }

    #[test]
    fn test_closed_form_estimates() {
        let laplace = Family::Laplace.fit(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(laplace.parameters(), &[("loc", 3.0), ("scale", 1.2)]);
        assert!((laplace.cdf(3.0) - 0.5).abs() < 1e-12);

        let uniform = Family::Uniform.fit(&[4.0, 0.0, 2.0]).unwrap();
        assert_eq!(uniform.parameters(), &[("min", 0.0), ("max", 4.0)]);
        assert!((uniform.cdf(1.0) - 0.25).abs() < 1e-12);

        let rayleigh = Family::Rayleigh.fit(&[0.0, 2.0]).unwrap();
        assert!((param(&rayleigh, "sigma") - 1.0).abs() < 1e-12);
        assert!((rayleigh.cdf(1.0) - (1.0 - (-0.5_f64).exp())).abs() < 1e-12);
        assert_eq!(rayleigh.cdf(0.0), 0.0);
    }

    #[test]
    fn test_symmetric_families_center_on_location() {
        let samples = [-2.0, -1.0, 0.0, 1.0, 2.0];
        for family in [Family::Logistic, Family::Cauchy, Family::Laplace] {
            let fitted = family.fit(&samples).unwrap();
            assert!((fitted.cdf(0.0) - 0.5).abs() < 1e-12, "{family}");
        }
    }

    #[test]
    fn test_cdfs_are_monotone() {
        let samples = draw(rand_distr::Gamma::new(2.0, 1.0).unwrap(), 500, 5);
        let grid = (0..=100).map(|i| f64::from(i) * 0.1).collect::<Vec<_>>();
        for family in Family::ALL {
            let Ok(fitted) = family.fit(&samples) else {
                continue;
            };
            let cdfs = grid.iter().map(|&x| fitted.cdf(x)).collect::<Vec<_>>();
            assert!(cdfs.iter().all(|c| (0.0..=1.0).contains(c)), "{family}");
            assert!(cdfs.is_sorted_by(|a, b| a <= b), "{family}");
        }
    }

    #[test]
    fn test_trigamma_known_values() {
        // psi'(1) = pi^2 / 6
        assert!((trigamma(1.0) - PI * PI / 6.0).abs() < 1e-9);
        // psi'(1/2) = pi^2 / 2
        assert!((trigamma(0.5) - PI * PI / 2.0).abs() < 1e-9);
    }
}
