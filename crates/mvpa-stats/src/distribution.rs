//! Cumulative distribution abstractions shared by fitted distributions.
//!
//! A [`DistributionFitter`] turns a set of samples into a [`Cdf`]. The null
//! distribution estimators are parameterized by a fitter, so the same
//! permutation run can be summarized either non-parametrically
//! ([`Empirical`]) or by one of the parametric [`Family`] variants.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    empirical::EmpiricalDistribution,
    error::FitError,
    family::{Family, FittedDistribution},
};

/// A univariate cumulative distribution function.
pub trait Cdf: fmt::Debug + Send + Sync {
    /// Returns `P(X <= x)`.
    fn cdf(&self, x: f64) -> f64;
}

pub type BoxedCdf = Box<dyn Cdf>;

impl<T> Cdf for Box<T>
where
    T: Cdf + ?Sized,
{
    fn cdf(&self, x: f64) -> f64 {
        (**self).cdf(x)
    }
}

/// Estimates a distribution from samples.
pub trait DistributionFitter: fmt::Debug + Send + Sync {
    /// Human-readable name, used in logs and reports.
    fn name(&self) -> &'static str;

    fn fit(&self, samples: &[f64]) -> Result<BoxedCdf, FitError>;
}

pub type BoxedFitter = Box<dyn DistributionFitter>;

/// Fitter producing [`EmpiricalDistribution`]s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Empirical;

impl DistributionFitter for Empirical {
    fn name(&self) -> &'static str {
        "empirical"
    }

    fn fit(&self, samples: &[f64]) -> Result<BoxedCdf, FitError> {
        Ok(Box::new(EmpiricalDistribution::new(samples)?))
    }
}

impl DistributionFitter for Family {
    fn name(&self) -> &'static str {
        Family::name(*self)
    }

    fn fit(&self, samples: &[f64]) -> Result<BoxedCdf, FitError> {
        Ok(Box::new(Family::fit(*self, samples)?))
    }
}

impl Cdf for FittedDistribution {
    fn cdf(&self, x: f64) -> f64 {
        FittedDistribution::cdf(self, x)
    }
}

/// Serializable choice of a [`DistributionFitter`].
///
/// ```
/// use mvpa_stats::{distribution::FitterKind, family::Family};
///
/// assert_eq!("empirical".parse::<FitterKind>().unwrap(), FitterKind::Empirical);
/// assert_eq!(
///     "normal".parse::<FitterKind>().unwrap(),
///     FitterKind::Parametric(Family::Normal)
/// );
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FitterKind {
    #[default]
    Empirical,
    Parametric(Family),
}

impl FitterKind {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            FitterKind::Empirical => Empirical.name(),
            FitterKind::Parametric(family) => family.name(),
        }
    }

    #[must_use]
    pub fn to_fitter(self) -> BoxedFitter {
        match self {
            FitterKind::Empirical => Box::new(Empirical),
            FitterKind::Parametric(family) => Box::new(family),
        }
    }
}

impl fmt::Display for FitterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown distribution '{_0}'")]
pub struct UnknownDistributionError(#[error(not(source))] pub String);

impl FromStr for FitterKind {
    type Err = UnknownDistributionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case(Empirical.name()) {
            return Ok(FitterKind::Empirical);
        }
        s.parse::<Family>()
            .map(FitterKind::Parametric)
            .map_err(|_| UnknownDistributionError(s.to_owned()))
    }
}

impl Serialize for FitterKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for FitterKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fitter_kind_names_roundtrip_through_parse() {
        for family in Family::ALL {
            let kind = FitterKind::Parametric(family);
            assert_eq!(kind.to_string().parse::<FitterKind>().unwrap(), kind);
        }
        assert_eq!(
            FitterKind::Empirical.to_string().parse::<FitterKind>().unwrap(),
            FitterKind::Empirical
        );
    }

    #[test]
    fn test_unknown_distribution_is_rejected() {
        let err = "zipf".parse::<FitterKind>().unwrap_err();
        assert_eq!(err.to_string(), "unknown distribution 'zipf'");
    }

    #[test]
    fn test_boxed_fitters_produce_cdfs() {
        let samples = [1.0, 2.0, 3.0, 4.0];
        let empirical = FitterKind::Empirical.to_fitter().fit(&samples).unwrap();
        assert_eq!(empirical.cdf(2.0), 0.5);

        let uniform = FitterKind::Parametric(Family::Uniform)
            .to_fitter()
            .fit(&samples)
            .unwrap();
        assert!((uniform.cdf(2.5) - 0.5).abs() < 1e-12);
    }
}
