//! Search for the parametric family that best describes a sample set.
//!
//! Useful for "smelling" data, and for choosing a parametric replacement for a
//! non-parametric null distribution obtained by permutation. Every candidate
//! family is fit to the data and scored; candidates that cannot be fit are
//! skipped, candidates that fail the acceptance threshold are dropped, and the
//! rest are returned best-first.
//!
//! # Tests
//!
//! - [`MatchTest::KsTest`]: "full-body" comparison. The score is the
//!   Kolmogorov–Smirnov distance; a candidate is kept when the KS p-value
//!   exceeds the threshold (the null hypothesis "same distribution" is not
//!   rejected).
//! - [`MatchTest::PRoc`]: detection power in the tail. Data points that are
//!   significant (`p <= threshold`) under the data's own empirical distribution
//!   are the positives; the score is the number of points whose significance
//!   decision differs under the candidate, relative to the number of positives.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    distribution::Cdf,
    empirical::EmpiricalDistribution,
    error::StatsError,
    family::{Family, FittedDistribution},
    ks,
    pvalue::{self, Tail},
};

pub const DEFAULT_P_THRESHOLD: f64 = 0.05;

/// Goodness-of-fit criterion used by [`match_distribution`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "test")]
pub enum MatchTest {
    #[default]
    KsTest,
    PRoc {
        #[serde(default = "default_p_roc_tail")]
        tail: Tail,
    },
}

fn default_p_roc_tail() -> Tail {
    Tail::Any
}

impl MatchTest {
    /// p-ROC with the conventional two-sided tail.
    #[must_use]
    pub fn p_roc() -> Self {
        MatchTest::PRoc {
            tail: default_p_roc_tail(),
        }
    }
}

/// Options of [`match_distribution`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchOptions {
    pub test: MatchTest,
    pub p_threshold: f64,
    pub families: Vec<Family>,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            test: MatchTest::default(),
            p_threshold: DEFAULT_P_THRESHOLD,
            families: Family::ALL.to_vec(),
        }
    }
}

/// A candidate family that passed the acceptance threshold.
#[derive(Debug, Clone)]
pub struct DistributionMatch {
    /// Score of the candidate; smaller is better.
    pub distance: f64,
    /// p-value of the test (`1.0` for p-ROC).
    pub p_value: f64,
    pub fitted: FittedDistribution,
}

impl DistributionMatch {
    #[must_use]
    pub fn family(&self) -> Family {
        self.fitted.family()
    }
}

/// Determines the best matching distributions for `data`.
///
/// Returns every accepted candidate sorted by ascending distance (ties keep the
/// order of `options.families`). An empty result means no family was accepted.
///
/// # Errors
///
/// - [`StatsError::EmptySamples`] if `data` is empty
/// - [`StatsError::NonFiniteData`] if `data` holds NaN or an infinity
/// - [`StatsError::NoPositives`] for p-ROC when no data point is significant
///   under its own empirical distribution
///
/// # Examples
///
/// ```
/// use mvpa_stats::{family::Family, matching::{MatchOptions, match_distribution}};
///
/// let data = (1..=200).map(|i| f64::from(i) / 201.0).collect::<Vec<_>>();
/// let options = MatchOptions {
///     families: vec![Family::Normal, Family::Uniform],
///     ..MatchOptions::default()
/// };
/// let matches = match_distribution(&data, &options).unwrap();
/// assert_eq!(matches[0].family(), Family::Uniform);
/// ```
pub fn match_distribution(
    data: &[f64],
    options: &MatchOptions,
) -> Result<Vec<DistributionMatch>, StatsError> {
    if data.is_empty() {
        return Err(StatsError::EmptySamples);
    }
    if let Some((index, &value)) = data.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(StatsError::NonFiniteData { index, value });
    }
    let p_threshold = options.p_threshold;

    let scorer = match options.test {
        MatchTest::KsTest => Scorer::Ks,
        MatchTest::PRoc { tail } => Scorer::p_roc(data, tail, p_threshold)?,
    };

    let mut results = vec![];
    for &family in &options.families {
        let fitted = match family.fit(data) {
            Ok(fitted) => fitted,
            Err(e) => {
                debug!(%family, error = %e, "testing for distribution failed");
                continue;
            }
        };
        debug!(%family, parameters = ?fitted.parameters(), "got distribution parameters");

        let (distance, p_value) = match scorer.score(data, &fitted) {
            Ok(score) => score,
            Err(e) => {
                debug!(%family, error = %e, "testing for distribution failed");
                continue;
            }
        };

        if p_value > p_threshold && !distance.is_nan() {
            debug!(%family, distance, p_value, "candidate accepted");
            results.push(DistributionMatch {
                distance,
                p_value,
                fitted,
            });
        } else {
            debug!(%family, distance, p_value, "cannot consider distribution");
        }
    }

    // stable sort keeps the caller's family order on ties
    results.sort_by(|a, b| a.distance.total_cmp(&b.distance));

    match results.split_first() {
        Some((best, rest)) => {
            let runners_up = rest
                .iter()
                .take(2)
                .map(|r| format!("{}={:.3}", r.family(), r.distance))
                .collect::<Vec<_>>();
            debug!(
                best = %best.family(),
                distance = best.distance,
                parameters = ?best.fitted.parameters(),
                ?runners_up,
                "best distribution"
            );
        }
        None => debug!("could not find suitable distribution"),
    }

    Ok(results)
}

enum Scorer {
    Ks,
    PRoc {
        tail: Tail,
        p_threshold: f64,
        positives: Vec<bool>,
        num_positives: usize,
    },
}

impl Scorer {
    fn p_roc(data: &[f64], tail: Tail, p_threshold: f64) -> Result<Self, StatsError> {
        let empirical = EmpiricalDistribution::new(data).map_err(StatsError::Fit)?;
        let positives = significance_marks(data, &empirical, tail, p_threshold);
        let num_positives = positives.iter().filter(|&&p| p).count();
        if num_positives == 0 {
            return Err(StatsError::NoPositives { p_threshold });
        }
        debug!(num_positives, "positives in non-parametric distribution");
        Ok(Scorer::PRoc {
            tail,
            p_threshold,
            positives,
            num_positives,
        })
    }

    #[expect(clippy::cast_precision_loss)]
    fn score(&self, data: &[f64], fitted: &FittedDistribution) -> Result<(f64, f64), StatsError> {
        match self {
            Scorer::Ks => {
                let result = ks::ks_test(data, fitted)?;
                Ok((result.statistic, result.p_value))
            }
            Scorer::PRoc {
                tail,
                p_threshold,
                positives,
                num_positives,
            } => {
                let marks = significance_marks(data, fitted, *tail, *p_threshold);
                let mismatches = marks
                    .iter()
                    .zip(positives)
                    .filter(|(a, b)| a != b)
                    .count();
                Ok((mismatches as f64 / *num_positives as f64, 1.0))
            }
        }
    }
}

fn significance_marks<C>(data: &[f64], cdf: &C, tail: Tail, p_threshold: f64) -> Vec<bool>
where
    C: Cdf + ?Sized,
{
    data.iter()
        .map(|&x| pvalue::p_value(cdf.cdf(x), tail) <= p_threshold)
        .collect()
}
